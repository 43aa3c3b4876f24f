use super::*;
use crate::parse;

fn refs(src: &str) -> Vec<(Scope, String)> {
    let mut out = Vec::new();
    parse(src)
        .unwrap()
        .for_each_ref(&mut |s, n| out.push((s, n.to_owned())));
    out
}

#[test]
fn scope_aliases_map_to_canonical_prefix() {
    for scope in Scope::ALL {
        assert_eq!(Scope::from_prefix(scope.prefix()), Some(scope));
        let short = &scope.prefix()[..1];
        assert_eq!(Scope::from_prefix(short), Some(scope));
    }
    assert_eq!(Scope::from_prefix("math"), None);
    assert_eq!(Scope::from_prefix("Query"), None);
}

#[test]
fn only_variable_and_temp_are_writable() {
    assert!(Scope::Variable.is_writable());
    assert!(Scope::Temp.is_writable());
    assert!(!Scope::Query.is_writable());
    assert!(!Scope::Context.is_writable());
}

#[test]
fn refs_include_compound_assignment_targets() {
    let got = refs("v.a += q.b; t.c = 1; t.c");
    assert_eq!(
        got,
        vec![
            (Scope::Variable, "a".to_owned()),
            (Scope::Query, "b".to_owned()),
            (Scope::Temp, "c".to_owned()),
        ]
    );
}

#[test]
fn assignments_are_reported_once_each() {
    let mut out = Vec::new();
    parse("v.a = 1; t.b = v.a ? (v.c = 2) : 0")
        .unwrap()
        .for_each_assignment(&mut |s, n| out.push((s, n.to_owned())));
    assert_eq!(
        out,
        vec![
            (Scope::Variable, "a".to_owned()),
            (Scope::Temp, "b".to_owned()),
            (Scope::Variable, "c".to_owned()),
        ]
    );
}

#[test]
fn randomness_propagates_upwards() {
    assert!(parse("1 + math.random(0, 1)").unwrap().is_random());
    assert!(parse("v.x = math.die_roll(2, 1, 6)").unwrap().is_random());
    assert!(!parse("math.sin(query.t) * 2").unwrap().is_random());
}

#[test]
fn shared_constants() {
    assert_eq!(ZERO.as_constant(), Some(0.0));
    assert_eq!(ONE.as_constant(), Some(1.0));
    assert_eq!(Expr::reference(Scope::Query, "x").as_constant(), None);
}
