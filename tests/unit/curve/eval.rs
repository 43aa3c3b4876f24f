use std::sync::Arc;

use super::*;
use crate::expression::ast::{Expr, Scope};
use crate::{EmptyEnvironment, MolangContext};

fn c(v: f32) -> Arc<Expr> {
    Arc::new(Expr::Constant(v))
}

fn curve(kind: CurveType, points: &[(f32, f32)], input: f32) -> Curve {
    let nodes = points.iter().map(|&(t, v)| CurveNode::new(t, c(v))).collect();
    Curve::with_input(kind, nodes, c(input)).unwrap()
}

fn at(curve: &Curve) -> f32 {
    curve.evaluate(&mut EmptyEnvironment::default())
}

#[test]
fn linear_midpoint() {
    assert_eq!(at(&curve(CurveType::Linear, &[(0.0, 0.0), (1.0, 10.0)], 0.5)), 5.0);
    assert_eq!(at(&curve(CurveType::Linear, &[(0.0, 0.0), (0.5, 10.0), (1.0, 20.0)], 0.75)), 15.0);
}

#[test]
fn linear_clamps_outside_the_nodes() {
    let pts = [(0.0, 0.0), (1.0, 10.0)];
    assert_eq!(at(&curve(CurveType::Linear, &pts, -1.0)), 0.0);
    assert_eq!(at(&curve(CurveType::Linear, &pts, 2.0)), 10.0);
    assert_eq!(at(&curve(CurveType::Linear, &[(0.3, 4.0)], 0.9)), 4.0);
}

#[test]
fn empty_curve_is_zero_and_zero_range_is_one() {
    assert_eq!(at(&curve(CurveType::Linear, &[], 0.5)), 0.0);
    let nodes = vec![CurveNode::new(0.0, c(7.0))];
    let flat = Curve::new(CurveType::Linear, nodes, c(0.5), c(0.0)).unwrap();
    assert_eq!(at(&flat), 1.0);
}

#[test]
fn input_is_divided_by_horizontal_range() {
    let mut env = MolangContext::new();
    env.set_query("age", 5.0);
    env.set_query("lifetime", 10.0);
    let nodes = vec![CurveNode::new(0.0, c(0.0)), CurveNode::new(1.0, c(10.0))];
    let curve = Curve::new(
        CurveType::Linear,
        nodes,
        Arc::new(Expr::reference(Scope::Query, "age")),
        Arc::new(Expr::reference(Scope::Query, "lifetime")),
    )
    .unwrap();
    assert_eq!(curve.evaluate(&mut env), 5.0);
}

#[test]
fn bezier_uses_four_control_values() {
    let pts = [(0.0, 0.0), (0.33, 0.0), (0.66, 1.0), (1.0, 1.0)];
    assert_eq!(at(&curve(CurveType::Bezier, &pts, 0.5)), 0.5);
    assert_eq!(at(&curve(CurveType::Bezier, &pts, 0.0)), 0.0);
    assert_eq!(at(&curve(CurveType::Bezier, &pts, 1.0)), 1.0);
}

#[test]
fn catmull_rom_skips_end_nodes() {
    let pts = [(0.0, 0.0), (0.0, 1.0), (1.0, 2.0), (2.0, 3.0)];
    let spline = curve(CurveType::CatmullRom, &pts, 0.5);
    assert_eq!(spline.node_index(0.5), 1);
    assert_eq!(at(&spline), 1.5);
}

#[test]
fn catmull_rom_with_too_few_nodes_returns_input() {
    let pts = [(0.0, 0.0), (1.0, 2.0)];
    assert_eq!(at(&curve(CurveType::CatmullRom, &pts, 0.25)), 0.25);
}

#[test]
fn bezier_chain_with_flat_slopes_eases() {
    let nodes = vec![
        CurveNode::chain(0.0, c(0.0), c(0.0), c(0.0), c(0.0)),
        CurveNode::chain(1.0, c(1.0), c(1.0), c(0.0), c(0.0)),
    ];
    let chain = Curve::with_input(CurveType::BezierChain, nodes, c(0.5)).unwrap();
    assert_eq!(at(&chain), 0.5);
}

#[test]
fn bezier_chain_reads_sides_and_holds_last_right_value() {
    let nodes = vec![
        CurveNode::chain(0.0, c(9.0), c(0.0), c(0.0), c(3.0)),
        CurveNode::chain(1.0, c(3.0), c(-1.0), c(3.0), c(0.0)),
    ];
    // Slope 3 on both inner handles over a unit span makes the segment a straight line.
    let mid = Curve::with_input(CurveType::BezierChain, nodes.clone(), c(0.25)).unwrap();
    assert!((at(&mid) - 0.75).abs() < 1e-6);
    let past = Curve::with_input(CurveType::BezierChain, nodes, c(2.0)).unwrap();
    assert_eq!(at(&past), -1.0);
}

#[test]
fn node_index_picks_last_node_at_or_before_input() {
    let lin = curve(CurveType::Linear, &[(0.0, 0.0), (0.5, 1.0), (1.0, 2.0)], 0.0);
    assert_eq!(lin.node_index(-1.0), 0);
    assert_eq!(lin.node_index(0.5), 1);
    assert_eq!(lin.node_index(0.99), 1);
    assert_eq!(lin.node_index(5.0), 2);
}

#[test]
fn basis_functions() {
    assert_eq!(bezier(0.0, 0.0, 1.0, 1.0, 0.5), 0.5);
    assert_eq!(bezier(2.0, 5.0, 7.0, 3.0, 0.0), 2.0);
    assert_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 0.5), 1.5);
    assert_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 0.0), 1.0);
    assert_eq!(catmull_rom(0.0, 1.0, 2.0, 3.0, 1.0), 2.0);
}
