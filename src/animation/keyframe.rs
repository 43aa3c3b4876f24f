use crate::animation::ease::Ease;
use crate::curve::eval::{bezier, catmull_rom};
use crate::foundation::error::{MolangError, MolangResult};

/// How values move from one keyframe to the next.
///
/// The mode of the earlier keyframe of a pair governs the segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Interpolation {
    /// Eased linear blend.
    Ease(Ease),
    /// Hold the earlier value until the next key.
    Step,
    /// Catmull-Rom through the neighbouring keys.
    CatmullRom,
    /// Cubic Bézier using `post` of the earlier key and `pre` of the later key as handles.
    Bezier,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::Ease(Ease::Linear)
    }
}

impl Interpolation {
    /// Parse a mode name; unknown names fall back to linear with a warning.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("step") {
            Self::Step
        } else if trimmed.eq_ignore_ascii_case("catmullrom") {
            Self::CatmullRom
        } else if trimmed.eq_ignore_ascii_case("bezier") {
            Self::Bezier
        } else if let Some(e) = Ease::from_name(trimmed) {
            Self::Ease(e)
        } else {
            tracing::warn!(name, "unknown interpolation, using linear");
            Self::Ease(Ease::Linear)
        }
    }

    /// Content name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ease(e) => e.name(),
            Self::Step => "step",
            Self::CatmullRom => "catmullrom",
            Self::Bezier => "bezier",
        }
    }
}

impl From<String> for Interpolation {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Interpolation> for String {
    fn from(i: Interpolation) -> Self {
        i.name().to_owned()
    }
}

/// One key of a three-component channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Time of the key, in the channel's time unit.
    pub timestamp: f32,
    /// Value at the key.
    pub value: [f32; 3],
    /// Mode used from this key to the next.
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Incoming tangent, or the incoming Bézier handle for [`Interpolation::Bezier`].
    #[serde(default)]
    pub pre: Option<[f32; 3]>,
    /// Outgoing tangent, or the outgoing Bézier handle for [`Interpolation::Bezier`].
    #[serde(default)]
    pub post: Option<[f32; 3]>,
}

impl Keyframe {
    /// Key with the given mode and no tangents.
    pub fn new(timestamp: f32, value: [f32; 3], interpolation: Interpolation) -> Self {
        Self {
            timestamp,
            value,
            interpolation,
            pre: None,
            post: None,
        }
    }

    /// Set the incoming tangent or handle.
    pub fn with_pre(mut self, pre: [f32; 3]) -> Self {
        self.pre = Some(pre);
        self
    }

    /// Set the outgoing tangent or handle.
    pub fn with_post(mut self, post: [f32; 3]) -> Self {
        self.post = Some(post);
        self
    }
}

/// Time-sorted keys of one channel such as position, rotation or scale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeChannel {
    frames: Vec<Keyframe>,
}

impl KeyframeChannel {
    /// Build a channel, stably sorting keys by timestamp.
    ///
    /// Keys sharing a timestamp keep their given order; the first one wins when sampling
    /// exactly at that time.
    pub fn new(mut frames: Vec<Keyframe>) -> MolangResult<Self> {
        if let Some(bad) = frames.iter().find(|f| !f.timestamp.is_finite()) {
            return Err(MolangError::construction(format!(
                "keyframe timestamp must be finite, got {}",
                bad.timestamp
            )));
        }
        frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        Ok(Self { frames })
    }

    /// Keys in ascending time order.
    pub fn frames(&self) -> &[Keyframe] {
        &self.frames
    }

    /// Whether the channel has no keys.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Value at time `t`.
    ///
    /// Before the first key the first value holds, after the last key the last value holds, and
    /// an empty channel is all zeros.
    pub fn sample(&self, t: f32) -> [f32; 3] {
        let mut before = None;
        let mut after = None;
        for (i, f) in self.frames.iter().enumerate() {
            if f.timestamp <= t {
                before = Some(i);
            }
            if f.timestamp >= t {
                after = Some(i);
                break;
            }
        }

        let (bi, ai) = match (before, after) {
            (None, None) => return [0.0; 3],
            (None, Some(a)) => return self.frames[a].value,
            (Some(b), None) => return self.frames[b].value,
            (Some(b), Some(a)) if b == a => return self.frames[b].value,
            (Some(b), Some(a)) => (b, a),
        };

        let from = &self.frames[bi];
        let to = &self.frames[ai];
        let duration = to.timestamp - from.timestamp;
        let u = if duration > 0.0 {
            (t - from.timestamp) / duration
        } else {
            0.0
        };

        match from.interpolation {
            Interpolation::Step => from.value,
            Interpolation::CatmullRom => {
                let prev = if bi > 0 { &self.frames[bi - 1] } else { from };
                let next = self.frames.get(ai + 1).unwrap_or(to);
                std::array::from_fn(|k| {
                    catmull_rom(prev.value[k], from.value[k], to.value[k], next.value[k], u)
                })
            }
            Interpolation::Bezier => {
                let p1 = from.post.unwrap_or(from.value);
                let p2 = to.pre.unwrap_or(to.value);
                std::array::from_fn(|k| bezier(from.value[k], p1[k], p2[k], to.value[k], u))
            }
            Interpolation::Ease(ease) => {
                if from.post.is_some() || to.pre.is_some() {
                    return hermite(from, to, u);
                }
                let e = ease.apply(u);
                std::array::from_fn(|k| from.value[k] + (to.value[k] - from.value[k]) * e)
            }
        }
    }
}

// Cubic Hermite with tangents in per-segment units; a missing tangent is the chord.
fn hermite(from: &Keyframe, to: &Keyframe, u: f32) -> [f32; 3] {
    let u2 = u * u;
    let u3 = u2 * u;
    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;
    std::array::from_fn(|k| {
        let chord = to.value[k] - from.value[k];
        let m0 = from.post.map_or(chord, |p| p[k]);
        let m1 = to.pre.map_or(chord, |p| p[k]);
        h00 * from.value[k] + h10 * m0 + h01 * to.value[k] + h11 * m1
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
