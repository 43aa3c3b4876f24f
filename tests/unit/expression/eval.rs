use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::{MolangContext, UnboundLog, parse};

fn ctx() -> MolangContext {
    MolangContext::new()
        .with_seed(1)
        .with_unbound_log(Arc::new(UnboundLog::new(Duration::from_secs(3600))))
}

fn eval(src: &str, env: &mut MolangContext) -> f32 {
    parse(src).unwrap().evaluate(env)
}

#[test]
fn arithmetic_and_comparison() {
    let mut env = ctx();
    assert_eq!(eval("2 + 3 * 4", &mut env), 14.0);
    assert_eq!(eval("(2 + 3) * 4", &mut env), 20.0);
    assert_eq!(eval("7 % 4", &mut env), 3.0);
    assert_eq!(eval("5 % 0", &mut env), 0.0);
    assert_eq!(eval("1 < 2", &mut env), 1.0);
    assert_eq!(eval("2 <= 1", &mut env), 0.0);
    assert_eq!(eval("3 == 3", &mut env), 1.0);
    assert_eq!(eval("!0", &mut env), 1.0);
    assert_eq!(eval("!4", &mut env), 0.0);
    assert_eq!(eval("-(2 - 5)", &mut env), 3.0);
}

#[test]
fn division_by_zero_follows_ieee() {
    let mut env = ctx();
    assert_eq!(eval("1 / 0", &mut env), f32::INFINITY);
    assert!(eval("0 / 0", &mut env).is_nan());
}

#[test]
fn logic_short_circuits() {
    let mut env = ctx();
    assert_eq!(eval("0 && (v.hit = 1)", &mut env), 0.0);
    assert_eq!(eval("1 || (v.hit = 1)", &mut env), 1.0);
    assert_eq!(env.variable("hit"), None);

    assert_eq!(eval("2 && 3", &mut env), 1.0);
    assert_eq!(eval("0 || -2", &mut env), 1.0);
    assert_eq!(eval("0 || 0", &mut env), 0.0);
}

#[test]
fn ternary_evaluates_one_branch() {
    let mut env = ctx();
    assert_eq!(eval("1 ? (v.a = 1) : (v.b = 2)", &mut env), 1.0);
    assert_eq!(env.variable("a"), Some(1.0));
    assert_eq!(env.variable("b"), None);
    assert_eq!(eval("0 ? 5 : 6", &mut env), 6.0);
}

#[test]
fn queries_and_aliases_resolve() {
    let mut env = ctx();
    env.set_query("life_time", 2.0);
    env.set_context("scale", 3.0);
    assert_eq!(eval("query.life_time * q.life_time", &mut env), 4.0);
    assert_eq!(eval("c.scale + context.scale", &mut env), 6.0);
}

#[test]
fn assignments_write_back_and_sequence_returns_last() {
    let mut env = ctx();
    let v = eval("t.a = 2; v.b = t.a * 3; v.b += 1; v.b", &mut env);
    assert_eq!(v, 7.0);
    assert_eq!(env.variable("b"), Some(7.0));
    assert_eq!(env.temp("a"), Some(2.0));
}

#[test]
fn compound_assignment_on_unbound_starts_from_zero() {
    let mut env = ctx();
    assert_eq!(eval("v.count += 1", &mut env), 1.0);
    assert_eq!(eval("v.count *= 5", &mut env), 5.0);
    assert_eq!(eval("v.count -= 1", &mut env), 4.0);
    assert_eq!(eval("v.count /= 2", &mut env), 2.0);
    assert_eq!(env.unbound_log().misses(), 0);
}

#[test]
fn unbound_reads_are_zero_and_rate_limited() {
    let log = Arc::new(UnboundLog::new(Duration::from_secs(3600)));
    let mut env = MolangContext::new().with_unbound_log(Arc::clone(&log));
    let expr = parse("query.missing + 1").unwrap();
    for _ in 0..1000 {
        assert_eq!(expr.evaluate(&mut env), 1.0);
    }
    assert_eq!(log.misses(), 1000);
    assert_eq!(log.logged(), 1);
}

#[test]
fn math_calls_evaluate_arguments() {
    let mut env = ctx();
    env.set_query("x", 4.0);
    assert_eq!(eval("math.sqrt(query.x) + math.abs(-1)", &mut env), 3.0);
    assert_eq!(eval("math.clamp(query.x, 0, 1)", &mut env), 1.0);
    assert_eq!(eval("math.mod(5, 0)", &mut env), 0.0);
}

#[test]
fn random_draws_come_from_the_environment() {
    let expr = parse("math.random(0, 10)").unwrap();
    let mut a = ctx().with_seed(99);
    let mut b = ctx().with_seed(99);
    for _ in 0..8 {
        let v = expr.evaluate(&mut a);
        assert_eq!(v, expr.evaluate(&mut b));
        assert!((0.0..10.0).contains(&v));
    }
    let r = parse("math.random_integer(1, 3)").unwrap();
    for _ in 0..64 {
        let v = r.evaluate(&mut a);
        assert!(v == 1.0 || v == 2.0 || v == 3.0);
    }
}

#[test]
fn apply_binary_matches_operators() {
    assert_eq!(apply_binary(BinaryOp::Ne, 1.0, 2.0), 1.0);
    assert_eq!(apply_binary(BinaryOp::Ge, 2.0, 2.0), 1.0);
    assert_eq!(apply_binary(BinaryOp::And, 1.0, 0.0), 0.0);
    assert_eq!(apply_binary(BinaryOp::Or, 0.0, 3.0), 1.0);
    assert_eq!(truth(true), 1.0);
}
