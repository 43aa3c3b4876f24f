use serde_json::json;

use super::*;
use crate::{EmptyEnvironment, Environment, MolangContext};

fn load(v: serde_json::Value) -> MolangResult<Curve> {
    Curve::from_json(&v, &MolangCompiler::default())
}

fn sample(curve: &Curve, input: f32) -> f32 {
    let mut env = MolangContext::new();
    env.set_query("t", input);
    curve.evaluate(&mut env)
}

#[test]
fn list_nodes_spread_over_unit_range() {
    let curve = load(json!({
        "type": "linear",
        "input": "query.t",
        "nodes": [0, 10, 40]
    }))
    .unwrap();
    let times: Vec<f32> = curve.nodes().iter().map(|n| n.time).collect();
    assert_eq!(times, vec![0.0, 0.5, 1.0]);
    assert_eq!(sample(&curve, 0.25), 5.0);
    assert_eq!(sample(&curve, 0.75), 25.0);
}

#[test]
fn keyed_nodes_use_their_times() {
    let curve = load(json!({
        "type": "linear",
        "input": 0.5,
        "nodes": { "0.0": 0, "1.0": { "value": "2 * 5" } }
    }))
    .unwrap();
    assert_eq!(curve.evaluate(&mut EmptyEnvironment::default()), 5.0);
}

#[test]
fn catmull_rom_list_reserves_end_nodes() {
    let curve = load(json!({
        "type": "catmull_rom",
        "input": "query.t",
        "nodes": [0, 1, 2, 3]
    }))
    .unwrap();
    let times: Vec<f32> = curve.nodes().iter().map(|n| n.time).collect();
    assert_eq!(times, vec![0.0, 0.0, 1.0, 2.0]);
    assert_eq!(sample(&curve, 0.5), 1.5);
}

#[test]
fn bezier_with_three_nodes_is_a_construction_error() {
    let err = load(json!({ "type": "bezier", "nodes": [0, 1, 2] })).unwrap_err();
    assert!(matches!(err, MolangError::Construction(_)));
}

#[test]
fn missing_input_and_range_take_defaults() {
    let curve = load(json!({ "type": "linear", "nodes": [3, 9] })).unwrap();
    assert_eq!(curve.input(), &ZERO);
    assert_eq!(curve.horizontal_range(), &ONE);
    assert_eq!(curve.evaluate(&mut EmptyEnvironment::default()), 3.0);
    assert!(load(json!({ "type": "linear" })).unwrap().nodes().is_empty());
}

#[test]
fn horizontal_range_is_an_expression() {
    let curve = load(json!({
        "type": "linear",
        "input": "query.t",
        "horizontal_range": "query.t * 2",
        "nodes": [0, 10]
    }))
    .unwrap();
    assert_eq!(sample(&curve, 3.0), 5.0);
}

#[test]
fn bezier_chain_accepts_shared_or_sided_fields() {
    let curve = load(json!({
        "type": "bezier_chain",
        "input": 0.5,
        "nodes": {
            "0": { "value": 0, "slope": 0 },
            "1": { "left_value": 1, "right_value": 4, "left_slope": 0 }
        }
    }))
    .unwrap();
    let last = &curve.nodes()[1];
    assert_eq!(last.left_value.as_constant(), Some(1.0));
    assert_eq!(last.right_value.as_constant(), Some(4.0));
    assert_eq!(last.right_slope.as_constant(), Some(0.0));
    assert_eq!(curve.evaluate(&mut EmptyEnvironment::default()), 0.5);
}

#[test]
fn bezier_chain_rejects_conflicting_fields() {
    let err = load(json!({
        "type": "bezier_chain",
        "nodes": { "0": { "value": 0, "left_value": 1 } }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("must not be present with value"));

    let err = load(json!({
        "type": "bezier_chain",
        "nodes": { "0": { "value": 0, "slope": 1, "right_slope": 2 } }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("must not be present with slope"));

    let err = load(json!({
        "type": "bezier_chain",
        "nodes": { "0": { "left_value": 1 } }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("has no right_value"));
}

#[test]
fn bezier_chain_needs_keyed_nodes() {
    let err = load(json!({ "type": "bezier_chain", "nodes": [0, 1] })).unwrap_err();
    assert!(err.to_string().contains("keyed by time"));
}

#[test]
fn malformed_definitions() {
    assert!(matches!(
        load(json!({ "type": "spline", "nodes": [0] })),
        Err(MolangError::Construction(_))
    ));
    assert!(matches!(
        load(json!({ "type": "linear", "nodes": { "soon": 1 } })),
        Err(MolangError::Construction(_))
    ));
    assert!(matches!(load(json!({ "nodes": [0] })), Err(MolangError::Serde(_))));
    assert!(matches!(
        load(json!({ "type": "linear", "nodes": ["1 +"] })),
        Err(MolangError::Parse(_))
    ));
    assert!(matches!(
        Curve::from_json_str("{ not json", &MolangCompiler::default()),
        Err(MolangError::Serde(_))
    ));
}

#[test]
fn from_json_str_reads_text() {
    let curve = Curve::from_json_str(
        r#"{ "type": "linear", "input": 1, "nodes": [2, 4] }"#,
        &MolangCompiler::default(),
    )
    .unwrap();
    let mut env = EmptyEnvironment::default();
    assert_eq!(env.safe_resolve(curve.input()), 1.0);
    assert_eq!(curve.evaluate(&mut env), 4.0);
}
