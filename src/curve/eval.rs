use crate::curve::model::{Curve, CurveNode, CurveType};
use crate::expression::builtin::lerp;
use crate::runtime::env::Environment;

impl Curve {
    /// Evaluate at `input / horizontal_range`.
    ///
    /// An empty curve is `0`; a zero horizontal range is `1`. Shapes that need more nodes than
    /// the curve has fall back to the normalized input.
    pub fn evaluate<E: Environment + ?Sized>(&self, env: &mut E) -> f32 {
        let nodes = self.nodes();
        if nodes.is_empty() {
            return 0.0;
        }
        let range = env.safe_resolve(self.horizontal_range());
        if range == 0.0 {
            return 1.0;
        }
        let input = env.safe_resolve(self.input()) / range;
        let index = self.node_index(input);

        match self.kind() {
            CurveType::Linear => linear(env, nodes, index, input),
            CurveType::Bezier => {
                if nodes.len() < 4 {
                    return input;
                }
                let [a, b, c, d] = [0, 1, 2, 3].map(|i| env.safe_resolve(nodes[i].value()));
                bezier(a, b, c, d, input)
            }
            CurveType::BezierChain => bezier_chain(env, nodes, index, input),
            CurveType::CatmullRom => catmull_rom_segment(env, nodes, index, input),
        }
    }

    /// Last node at or before `input`, skipping the spline's virtual end nodes.
    pub fn node_index(&self, input: f32) -> usize {
        let nodes = self.nodes();
        let offset = self.kind().offset();
        let mut best = offset;
        let end = nodes.len().saturating_sub(offset * 2);
        for (i, node) in nodes.iter().enumerate().take(end).skip(offset) {
            if node.time > input {
                break;
            }
            best = i;
        }
        best
    }
}

fn progress(from: &CurveNode, to: &CurveNode, input: f32) -> f32 {
    let span = to.time - from.time;
    if span == 0.0 {
        0.0
    } else {
        (input - from.time) / span
    }
}

fn linear<E: Environment + ?Sized>(
    env: &mut E,
    nodes: &[CurveNode],
    index: usize,
    input: f32,
) -> f32 {
    if nodes.len() == 1 {
        return env.safe_resolve(nodes[0].value());
    }
    let cur = &nodes[index];
    let next = nodes.get(index + 1).unwrap_or(cur);
    let a = env.safe_resolve(cur.value());
    let b = env.safe_resolve(next.value());
    lerp(a, b, progress(cur, next, input).clamp(0.0, 1.0))
}

fn bezier_chain<E: Environment + ?Sized>(
    env: &mut E,
    nodes: &[CurveNode],
    index: usize,
    input: f32,
) -> f32 {
    let cur = &nodes[index];
    let Some(next) = nodes.get(index + 1) else {
        return env.safe_resolve(&cur.right_value);
    };
    let step = (next.time - cur.time) / 3.0;
    let a = env.safe_resolve(&cur.right_value);
    let b = a + step * env.safe_resolve(&cur.right_slope);
    let d = env.safe_resolve(&next.left_value);
    let c = d - step * env.safe_resolve(&next.left_slope);
    bezier(a, b, c, d, progress(cur, next, input).clamp(0.0, 1.0))
}

fn catmull_rom_segment<E: Environment + ?Sized>(
    env: &mut E,
    nodes: &[CurveNode],
    index: usize,
    input: f32,
) -> f32 {
    if nodes.len() < 4 || index == 0 || index + 2 >= nodes.len() {
        return input;
    }
    let [a, b, c, d] =
        [index - 1, index, index + 1, index + 2].map(|i| env.safe_resolve(nodes[i].value()));
    let t = progress(&nodes[index], &nodes[index + 1], input).clamp(0.0, 1.0);
    catmull_rom(a, b, c, d, t)
}

/// Cubic Bézier through control values `p0..p3` via the Bernstein basis.
pub fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let inv = 1.0 - t;
    inv * inv * inv * p0 + 3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t * p3
}

/// Uniform Catmull-Rom between `p1` and `p2`.
pub fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t * t
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t * t * t)
}

#[cfg(test)]
#[path = "../../tests/unit/curve/eval.rs"]
mod tests;
