use super::*;

#[test]
fn identical_source_shares_one_template() {
    let c = MolangCompiler::default();
    let a = c.compile("query.a * 2").unwrap();
    let b = c.compile("query.a * 2").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(c.cached_len(), 1);
}

#[test]
fn simplified_and_raw_are_cached_separately() {
    let c = MolangCompiler::default();
    let s = c.compile_with("1 + 1", true).unwrap();
    let r = c.compile_with("1 + 1", false).unwrap();
    assert_eq!(*s, Expr::Constant(2.0));
    assert!(matches!(*r, Expr::Binary { .. }));
    assert_eq!(c.cached_len(), 2);
}

#[test]
fn cache_can_be_disabled_and_cleared() {
    let c = MolangCompiler::new(ParseOpts {
        cache: false,
        ..ParseOpts::default()
    });
    let a = c.compile("1").unwrap();
    let b = c.compile("1").unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(c.cached_len(), 0);

    let cached = MolangCompiler::default();
    cached.compile("2").unwrap();
    cached.clear_cache();
    assert_eq!(cached.cached_len(), 0);
}

#[test]
fn simplify_follows_options() {
    let c = MolangCompiler::new(ParseOpts {
        simplify: false,
        ..ParseOpts::default()
    });
    assert!(!c.opts().simplify);
    assert!(matches!(*c.compile("2 * 3").unwrap(), Expr::Binary { .. }));
}

#[test]
fn errors_are_not_cached() {
    let c = MolangCompiler::default();
    assert!(matches!(c.compile("1 +"), Err(crate::MolangError::Parse(_))));
    assert!(matches!(c.compile("1 & 2"), Err(crate::MolangError::Lex(_))));
    assert_eq!(c.cached_len(), 0);
}

#[test]
fn uncached_compile_leaves_cache_alone() {
    let c = MolangCompiler::default();
    assert_eq!(c.compile_uncached("4 / 2", true).unwrap(), Expr::Constant(2.0));
    assert_eq!(c.cached_len(), 0);
    assert_eq!(*c.constant(3.0), Expr::Constant(3.0));
}

#[test]
fn compiler_is_shareable_across_threads() {
    let c = Arc::new(MolangCompiler::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&c);
            std::thread::spawn(move || c.compile("query.x + 1").unwrap())
        })
        .collect();
    let first = c.compile("query.x + 1").unwrap();
    for h in handles {
        assert!(Arc::ptr_eq(&h.join().unwrap(), &first));
    }
}
