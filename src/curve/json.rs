use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize as _;

use crate::curve::model::{Curve, CurveNode, CurveType};
use crate::expression::ast::{Expr, ONE, ZERO};
use crate::expression::compiler::MolangCompiler;
use crate::foundation::error::{MolangError, MolangResult};

/// Expression source in a definition file: a number or Molang text.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum RawExpr {
    Number(f32),
    Source(String),
}

impl RawExpr {
    pub(crate) fn compile(&self, compiler: &MolangCompiler) -> MolangResult<Arc<Expr>> {
        match self {
            Self::Number(v) => Ok(compiler.constant(*v)),
            Self::Source(src) => compiler.compile(src),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct RawCurve {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    nodes: Option<RawNodes>,
    #[serde(default)]
    input: Option<RawExpr>,
    #[serde(default)]
    horizontal_range: Option<RawExpr>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawNodes {
    List(Vec<RawExpr>),
    Keyed(BTreeMap<String, RawNode>),
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawNode {
    Bare(RawExpr),
    Fields(RawNodeFields),
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
struct RawNodeFields {
    value: Option<RawExpr>,
    left_value: Option<RawExpr>,
    right_value: Option<RawExpr>,
    slope: Option<RawExpr>,
    left_slope: Option<RawExpr>,
    right_slope: Option<RawExpr>,
}

impl Curve {
    /// Read a curve definition from JSON text.
    pub fn from_json_str(s: &str, compiler: &MolangCompiler) -> MolangResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(&value, compiler)
    }

    /// Read a curve definition.
    ///
    /// Accepts `{ "type", "nodes", "input", "horizontal_range" }`. `nodes` is either a list of
    /// values spread evenly over `[0, 1]` or an object keyed by time. Bezier chains require the
    /// keyed form, where a node may give `value`/`slope` for both sides or the `left_`/`right_`
    /// variants, but not both.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_json(value: &serde_json::Value, compiler: &MolangCompiler) -> MolangResult<Self> {
        let raw = RawCurve::deserialize(value)?;
        let kind = CurveType::from_name(&raw.kind).ok_or_else(|| {
            MolangError::construction(format!(
                "unsupported curve type '{}', expected linear, bezier, bezier_chain or catmull_rom",
                raw.kind
            ))
        })?;

        let nodes = match &raw.nodes {
            None => Vec::new(),
            Some(RawNodes::List(values)) => list_nodes(kind, values, compiler)?,
            Some(RawNodes::Keyed(map)) => keyed_nodes(kind, map, compiler)?,
        };
        let input = match &raw.input {
            Some(e) => e.compile(compiler)?,
            None => Arc::new(ZERO.clone()),
        };
        let horizontal_range = match &raw.horizontal_range {
            Some(e) => e.compile(compiler)?,
            None => Arc::new(ONE.clone()),
        };
        Curve::new(kind, nodes, input, horizontal_range)
    }
}

fn list_nodes(
    kind: CurveType,
    values: &[RawExpr],
    compiler: &MolangCompiler,
) -> MolangResult<Vec<CurveNode>> {
    if kind == CurveType::BezierChain {
        return Err(MolangError::construction(
            "bezier_chain nodes must be an object keyed by time",
        ));
    }
    let offset = kind.offset();
    let span = values.len() as f32 - (offset * 2) as f32 - 1.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let slot = i.saturating_sub(offset) as f32;
            let time = if span > 0.0 { slot / span } else { 0.0 };
            Ok(CurveNode::new(time, v.compile(compiler)?))
        })
        .collect()
}

fn keyed_nodes(
    kind: CurveType,
    map: &BTreeMap<String, RawNode>,
    compiler: &MolangCompiler,
) -> MolangResult<Vec<CurveNode>> {
    let mut out = Vec::with_capacity(map.len());
    for (key, node) in map {
        let time: f32 = key.trim().parse().map_err(|_| {
            MolangError::construction(format!("curve node key '{key}' is not a time"))
        })?;
        let fields = match node {
            RawNode::Bare(v) => RawNodeFields {
                value: Some(v.clone()),
                ..Default::default()
            },
            RawNode::Fields(f) => f.clone(),
        };
        out.push(if kind == CurveType::BezierChain {
            chain_node(time, key, &fields, compiler)?
        } else {
            let value = fields.value.as_ref().ok_or_else(|| {
                MolangError::construction(format!("curve node '{key}' has no value"))
            })?;
            CurveNode::new(time, value.compile(compiler)?)
        });
    }
    Ok(out)
}

fn chain_node(
    time: f32,
    key: &str,
    f: &RawNodeFields,
    compiler: &MolangCompiler,
) -> MolangResult<CurveNode> {
    if f.value.is_some() && (f.left_value.is_some() || f.right_value.is_some()) {
        return Err(MolangError::construction(format!(
            "curve node '{key}': left_value and right_value must not be present with value"
        )));
    }
    if f.slope.is_some() && (f.left_slope.is_some() || f.right_slope.is_some()) {
        return Err(MolangError::construction(format!(
            "curve node '{key}': left_slope and right_slope must not be present with slope"
        )));
    }

    let (left_value, right_value) = match &f.value {
        Some(v) => {
            let v = v.compile(compiler)?;
            (Arc::clone(&v), v)
        }
        None => {
            let side = |e: &Option<RawExpr>, name: &str| {
                e.as_ref()
                    .ok_or_else(|| {
                        MolangError::construction(format!("curve node '{key}' has no {name}"))
                    })?
                    .compile(compiler)
            };
            (side(&f.left_value, "left_value")?, side(&f.right_value, "right_value")?)
        }
    };
    let (left_slope, right_slope) = match &f.slope {
        Some(s) => {
            let s = s.compile(compiler)?;
            (Arc::clone(&s), s)
        }
        None => {
            let side = |e: &Option<RawExpr>| match e {
                Some(e) => e.compile(compiler),
                None => Ok(Arc::new(ZERO.clone())),
            };
            (side(&f.left_slope)?, side(&f.right_slope)?)
        }
    };
    Ok(CurveNode::chain(
        time,
        left_value,
        right_value,
        left_slope,
        right_slope,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/curve/json.rs"]
mod tests;
