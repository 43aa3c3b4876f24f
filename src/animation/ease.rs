use std::f32::consts::PI;

const C1: f32 = 1.70158;
const C2: f32 = C1 * 1.525;
const C3: f32 = C1 + 1.0;
const C4: f32 = (2.0 * PI) / 3.0;
const C5: f32 = (2.0 * PI) / 4.5;

/// Named easing curves for keyframe interpolation.
///
/// Serialized names follow the content format: `"linear"`, `"quad.in"`, `"elastic.inout"`...
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    #[serde(rename = "linear")]
    Linear,
    /// `t²`
    #[serde(rename = "quad.in")]
    QuadIn,
    /// Mirror of [`Ease::QuadIn`].
    #[serde(rename = "quad.out")]
    QuadOut,
    /// Quadratic in, then out.
    #[serde(rename = "quad.inout")]
    QuadInOut,
    /// `t³`
    #[serde(rename = "cubic.in")]
    CubicIn,
    /// Mirror of [`Ease::CubicIn`].
    #[serde(rename = "cubic.out")]
    CubicOut,
    /// Cubic in, then out.
    #[serde(rename = "cubic.inout")]
    CubicInOut,
    /// `t⁴`
    #[serde(rename = "quart.in")]
    QuartIn,
    /// Mirror of [`Ease::QuartIn`].
    #[serde(rename = "quart.out")]
    QuartOut,
    /// Quartic in, then out.
    #[serde(rename = "quart.inout")]
    QuartInOut,
    /// `t⁵`
    #[serde(rename = "quint.in")]
    QuintIn,
    /// Mirror of [`Ease::QuintIn`].
    #[serde(rename = "quint.out")]
    QuintOut,
    /// Quintic in, then out.
    #[serde(rename = "quint.inout")]
    QuintInOut,
    /// Quarter cosine.
    #[serde(rename = "sine.in")]
    SineIn,
    /// Quarter sine.
    #[serde(rename = "sine.out")]
    SineOut,
    /// Half cosine.
    #[serde(rename = "sine.inout")]
    SineInOut,
    /// `2^(10t - 10)`
    #[serde(rename = "expo.in")]
    ExpoIn,
    /// Mirror of [`Ease::ExpoIn`].
    #[serde(rename = "expo.out")]
    ExpoOut,
    /// Exponential in, then out.
    #[serde(rename = "expo.inout")]
    ExpoInOut,
    /// Quarter circle.
    #[serde(rename = "circ.in")]
    CircIn,
    /// Mirror of [`Ease::CircIn`].
    #[serde(rename = "circ.out")]
    CircOut,
    /// Circular in, then out.
    #[serde(rename = "circ.inout")]
    CircInOut,
    /// Pulls back below `0` before accelerating.
    #[serde(rename = "back.in")]
    BackIn,
    /// Overshoots `1` before settling.
    #[serde(rename = "back.out")]
    BackOut,
    /// Back in, then out.
    #[serde(rename = "back.inout")]
    BackInOut,
    /// Growing oscillation.
    #[serde(rename = "elastic.in")]
    ElasticIn,
    /// Decaying oscillation.
    #[serde(rename = "elastic.out")]
    ElasticOut,
    /// Elastic in, then out.
    #[serde(rename = "elastic.inout")]
    ElasticInOut,
}

const NAMES: &[(&str, Ease)] = &[
    ("linear", Ease::Linear),
    ("quad.in", Ease::QuadIn),
    ("quad.out", Ease::QuadOut),
    ("quad.inout", Ease::QuadInOut),
    ("cubic.in", Ease::CubicIn),
    ("cubic.out", Ease::CubicOut),
    ("cubic.inout", Ease::CubicInOut),
    ("quart.in", Ease::QuartIn),
    ("quart.out", Ease::QuartOut),
    ("quart.inout", Ease::QuartInOut),
    ("quint.in", Ease::QuintIn),
    ("quint.out", Ease::QuintOut),
    ("quint.inout", Ease::QuintInOut),
    ("sine.in", Ease::SineIn),
    ("sine.out", Ease::SineOut),
    ("sine.inout", Ease::SineInOut),
    ("expo.in", Ease::ExpoIn),
    ("expo.out", Ease::ExpoOut),
    ("expo.inout", Ease::ExpoInOut),
    ("circ.in", Ease::CircIn),
    ("circ.out", Ease::CircOut),
    ("circ.inout", Ease::CircInOut),
    ("back.in", Ease::BackIn),
    ("back.out", Ease::BackOut),
    ("back.inout", Ease::BackInOut),
    ("elastic.in", Ease::ElasticIn),
    ("elastic.out", Ease::ElasticOut),
    ("elastic.inout", Ease::ElasticInOut),
];

impl Ease {
    /// Every easing, `linear` first.
    pub fn all() -> impl Iterator<Item = Ease> {
        NAMES.iter().map(|(_, e)| *e)
    }

    /// Look up a content name such as `"cubic.out"`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, e)| *e)
    }

    /// Content name.
    pub fn name(self) -> &'static str {
        NAMES
            .iter()
            .find(|(_, e)| *e == self)
            .map(|(n, _)| *n)
            .unwrap_or("linear")
    }

    /// Map progress `t` (clamped to `[0, 1]`) through the curve.
    ///
    /// Every mode maps `0` to `0` and `1` to `1`; back and elastic leave `[0, 1]` in between.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,

            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t).powi(2),
            Self::QuadInOut => in_out_pow(t, 2),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => in_out_pow(t, 3),
            Self::QuartIn => t.powi(4),
            Self::QuartOut => 1.0 - (1.0 - t).powi(4),
            Self::QuartInOut => in_out_pow(t, 4),
            Self::QuintIn => t.powi(5),
            Self::QuintOut => 1.0 - (1.0 - t).powi(5),
            Self::QuintInOut => in_out_pow(t, 5),

            _ if t <= 0.0 => 0.0,
            _ if t >= 1.0 => 1.0,

            Self::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Self::SineOut => (t * PI / 2.0).sin(),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            Self::ExpoIn => 2f32.powf(10.0 * t - 10.0),
            Self::ExpoOut => 1.0 - 2f32.powf(-10.0 * t),
            Self::ExpoInOut => {
                if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            Self::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).sqrt(),
            Self::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - 4.0 * t * t).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }

            Self::BackIn => C3 * t * t * t - C1 * t * t,
            Self::BackOut => 1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2),
            Self::BackInOut => {
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }

            Self::ElasticIn => -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin(),
            Self::ElasticOut => 2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0,
            Self::ElasticInOut => {
                if t < 0.5 {
                    -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0 + 1.0
                }
            }
        }
    }
}

// `2^(n-1) t^n` below one half, mirrored above.
fn in_out_pow(t: f32, n: i32) -> f32 {
    let k = 2f32.powi(n - 1);
    if t < 0.5 {
        k * t.powi(n)
    } else {
        1.0 - k * (1.0 - t).powi(n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
