use std::sync::Arc;

use crate::expression::ast::{Expr, ONE, ZERO};
use crate::foundation::error::{MolangError, MolangResult};

/// Interpolation scheme of a [`Curve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveType {
    /// Piecewise linear between time-sorted nodes.
    Linear,
    /// One cubic Bézier over exactly four control values.
    Bezier,
    /// Hermite-style segments with per-node left/right values and slopes.
    BezierChain,
    /// Catmull-Rom spline; the first and last nodes only shape the end tangents.
    CatmullRom,
}

impl CurveType {
    /// Parse a type name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            ("linear", Self::Linear),
            ("bezier", Self::Bezier),
            ("bezier_chain", Self::BezierChain),
            ("catmull_rom", Self::CatmullRom),
        ]
        .into_iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, t)| t)
    }

    /// Leading and trailing nodes that sit outside the visible time range.
    pub fn offset(self) -> usize {
        match self {
            Self::CatmullRom => 1,
            _ => 0,
        }
    }
}

/// One control point.
///
/// Plain nodes carry the same expression on both sides and zero slopes; only bezier-chain nodes
/// distinguish left from right.
#[derive(Debug, Clone)]
pub struct CurveNode {
    /// Normalized time, usually in `[0, 1]`.
    pub time: f32,
    /// Value approaching the node.
    pub left_value: Arc<Expr>,
    /// Value leaving the node.
    pub right_value: Arc<Expr>,
    /// Slope approaching the node.
    pub left_slope: Arc<Expr>,
    /// Slope leaving the node.
    pub right_slope: Arc<Expr>,
}

impl CurveNode {
    /// Node with a single value.
    pub fn new(time: f32, value: Arc<Expr>) -> Self {
        Self {
            time,
            left_value: Arc::clone(&value),
            right_value: value,
            left_slope: Arc::new(ZERO.clone()),
            right_slope: Arc::new(ZERO.clone()),
        }
    }

    /// Bezier-chain node with independent sides.
    pub fn chain(
        time: f32,
        left_value: Arc<Expr>,
        right_value: Arc<Expr>,
        left_slope: Arc<Expr>,
        right_slope: Arc<Expr>,
    ) -> Self {
        Self {
            time,
            left_value,
            right_value,
            left_slope,
            right_slope,
        }
    }

    /// Value of a single-valued node.
    pub fn value(&self) -> &Expr {
        &self.left_value
    }
}

/// Control points evaluated at `input / horizontal_range`.
#[derive(Debug, Clone)]
pub struct Curve {
    kind: CurveType,
    nodes: Vec<CurveNode>,
    input: Arc<Expr>,
    horizontal_range: Arc<Expr>,
}

impl Curve {
    /// Build a curve, sorting nodes by time.
    ///
    /// Fails when a bezier curve does not have exactly four nodes or when a node time is not
    /// finite. Equal times keep their given order.
    pub fn new(
        kind: CurveType,
        mut nodes: Vec<CurveNode>,
        input: Arc<Expr>,
        horizontal_range: Arc<Expr>,
    ) -> MolangResult<Self> {
        if kind == CurveType::Bezier && nodes.len() != 4 {
            return Err(MolangError::construction(format!(
                "bezier curve expects 4 nodes, got {}",
                nodes.len()
            )));
        }
        if let Some(bad) = nodes.iter().find(|n| !n.time.is_finite()) {
            return Err(MolangError::construction(format!(
                "curve node time must be finite, got {}",
                bad.time
            )));
        }
        nodes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self {
            kind,
            nodes,
            input,
            horizontal_range,
        })
    }

    /// Build a curve over `input` with the default horizontal range of `1`.
    pub fn with_input(
        kind: CurveType,
        nodes: Vec<CurveNode>,
        input: Arc<Expr>,
    ) -> MolangResult<Self> {
        Self::new(kind, nodes, input, Arc::new(ONE.clone()))
    }

    /// Interpolation scheme.
    pub fn kind(&self) -> CurveType {
        self.kind
    }

    /// Nodes in ascending time order.
    pub fn nodes(&self) -> &[CurveNode] {
        &self.nodes
    }

    /// Input expression.
    pub fn input(&self) -> &Expr {
        &self.input
    }

    /// Horizontal range expression.
    pub fn horizontal_range(&self) -> &Expr {
        &self.horizontal_range
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
