//! `math.*` function table.
//!
//! Angles follow the content convention: trigonometric inputs and inverse-trigonometric outputs
//! are in degrees. Intermediate trigonometry is done in `f64` and narrowed on return.

/// Upper bound on dice rolled by a single `die_roll` call.
pub const MAX_DIE_ROLLS: i32 = 1024;

/// Built-in mathematical functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    /// `abs(x)`
    Abs,
    /// `acos(x)`, degrees out.
    Acos,
    /// `asin(x)`, degrees out.
    Asin,
    /// `atan(x)`, degrees out.
    Atan,
    /// `atan2(y, x)`, degrees out.
    Atan2,
    /// `ceil(x)`
    Ceil,
    /// `clamp(x, lo, hi)`
    Clamp,
    /// `cos(deg)`
    Cos,
    /// `die_roll(n, lo, hi)`: sum of `n` uniform samples in `[lo, hi)`.
    DieRoll,
    /// `die_roll_integer(n, lo, hi)`: sum of `n` uniform integers in `[lo, hi]`.
    DieRollInteger,
    /// `exp(x)`
    Exp,
    /// `floor(x)`
    Floor,
    /// `hermite_blend(t)`: `3t² - 2t³`.
    HermiteBlend,
    /// `lerp(a, b, t)`
    Lerp,
    /// `lerprotate(a, b, t)`: lerp along the shortest arc, in degrees.
    LerpRotate,
    /// `ln(x)`
    Ln,
    /// `max(a, b)`
    Max,
    /// `min(a, b)`
    Min,
    /// `min_angle(deg)`: wrap into `(-180, 180]`.
    MinAngle,
    /// `mod(a, b)`; zero when `b` is zero.
    Mod,
    /// `pi`, usable with or without parentheses.
    Pi,
    /// `pow(base, exp)`
    Pow,
    /// `random(lo, hi)`
    Random,
    /// `random_integer(lo, hi)`, inclusive bounds.
    RandomInteger,
    /// `round(x)`, halves away from zero.
    Round,
    /// `sin(deg)`
    Sin,
    /// `sqrt(x)`
    Sqrt,
    /// `tan(deg)`
    Tan,
    /// `trunc(x)`
    Trunc,
}

const TABLE: &[(&str, MathFn)] = &[
    ("abs", MathFn::Abs),
    ("acos", MathFn::Acos),
    ("asin", MathFn::Asin),
    ("atan", MathFn::Atan),
    ("atan2", MathFn::Atan2),
    ("ceil", MathFn::Ceil),
    ("clamp", MathFn::Clamp),
    ("cos", MathFn::Cos),
    ("die_roll", MathFn::DieRoll),
    ("die_roll_integer", MathFn::DieRollInteger),
    ("exp", MathFn::Exp),
    ("floor", MathFn::Floor),
    ("hermite_blend", MathFn::HermiteBlend),
    ("lerp", MathFn::Lerp),
    ("lerprotate", MathFn::LerpRotate),
    ("ln", MathFn::Ln),
    ("max", MathFn::Max),
    ("min", MathFn::Min),
    ("min_angle", MathFn::MinAngle),
    ("mod", MathFn::Mod),
    ("pi", MathFn::Pi),
    ("pow", MathFn::Pow),
    ("random", MathFn::Random),
    ("random_integer", MathFn::RandomInteger),
    ("round", MathFn::Round),
    ("sin", MathFn::Sin),
    ("sqrt", MathFn::Sqrt),
    ("tan", MathFn::Tan),
    ("trunc", MathFn::Trunc),
];

impl MathFn {
    /// Every function, in name order.
    pub fn all() -> impl Iterator<Item = MathFn> {
        TABLE.iter().map(|(_, f)| *f)
    }

    /// Look a function up by its name after `math.`.
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
    }

    /// Name after `math.`.
    pub fn name(self) -> &'static str {
        TABLE
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }

    /// Exact number of arguments.
    pub fn arity(self) -> usize {
        match self {
            Self::Pi => 0,
            Self::Abs
            | Self::Acos
            | Self::Asin
            | Self::Atan
            | Self::Ceil
            | Self::Cos
            | Self::Exp
            | Self::Floor
            | Self::HermiteBlend
            | Self::Ln
            | Self::MinAngle
            | Self::Round
            | Self::Sin
            | Self::Sqrt
            | Self::Tan
            | Self::Trunc => 1,
            Self::Atan2
            | Self::Max
            | Self::Min
            | Self::Mod
            | Self::Pow
            | Self::Random
            | Self::RandomInteger => 2,
            Self::Clamp | Self::DieRoll | Self::DieRollInteger | Self::Lerp | Self::LerpRotate => 3,
        }
    }

    /// Whether the function draws from the random source.
    pub fn is_random(self) -> bool {
        matches!(
            self,
            Self::Random | Self::RandomInteger | Self::DieRoll | Self::DieRollInteger
        )
    }

    /// Apply to already-evaluated arguments.
    ///
    /// `args` must hold exactly [`MathFn::arity`] values. `random` yields uniform samples in
    /// `[0, 1)` and is only called by random functions.
    pub fn apply(self, args: &[f32], random: &mut dyn FnMut() -> f32) -> f32 {
        let a = |i: usize| args.get(i).copied().unwrap_or(0.0);
        match self {
            Self::Abs => a(0).abs(),
            Self::Acos => f64::from(a(0)).acos().to_degrees() as f32,
            Self::Asin => f64::from(a(0)).asin().to_degrees() as f32,
            Self::Atan => f64::from(a(0)).atan().to_degrees() as f32,
            Self::Atan2 => f64::from(a(0)).atan2(f64::from(a(1))).to_degrees() as f32,
            Self::Ceil => a(0).ceil(),
            Self::Clamp => clamp(a(0), a(1), a(2)),
            Self::Cos => f64::from(a(0)).to_radians().cos() as f32,
            Self::DieRoll => {
                let (lo, hi) = (a(1), a(2));
                let mut sum = 0.0;
                for _ in 0..dice_count(a(0)) {
                    sum += lo + random() * (hi - lo);
                }
                sum
            }
            Self::DieRollInteger => {
                let (lo, hi) = (a(1) as i64, a(2) as i64);
                let mut sum = 0i64;
                for _ in 0..dice_count(a(0)) {
                    sum += random_integer(lo, hi, random());
                }
                sum as f32
            }
            Self::Exp => a(0).exp(),
            Self::Floor => a(0).floor(),
            Self::HermiteBlend => {
                let t = a(0);
                3.0 * t * t - 2.0 * t * t * t
            }
            Self::Lerp => lerp(a(0), a(1), a(2)),
            Self::LerpRotate => {
                let from = a(0);
                from + min_angle(a(1) - from) * a(2)
            }
            Self::Ln => a(0).ln(),
            Self::Max => a(0).max(a(1)),
            Self::Min => a(0).min(a(1)),
            Self::MinAngle => min_angle(a(0)),
            Self::Mod => fmod(a(0), a(1)),
            Self::Pi => std::f32::consts::PI,
            Self::Pow => a(0).powf(a(1)),
            Self::Random => {
                let (lo, hi) = (a(0), a(1));
                lo + random() * (hi - lo)
            }
            Self::RandomInteger => random_integer(a(0) as i64, a(1) as i64, random()) as f32,
            Self::Round => a(0).round(),
            Self::Sin => f64::from(a(0)).to_radians().sin() as f32,
            Self::Sqrt => a(0).sqrt(),
            Self::Tan => f64::from(a(0)).to_radians().tan() as f32,
            Self::Trunc => a(0).trunc(),
        }
    }
}

impl std::fmt::Display for MathFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "math.{}", self.name())
    }
}

/// Linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `min(max(x, lo), hi)`; never panics on inverted bounds.
pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// Remainder with the sign of the dividend; zero when `b` is zero.
pub fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 { 0.0 } else { a % b }
}

/// Wrap an angle in degrees into `(-180, 180]`.
///
/// Moderate magnitudes are wrapped by repeated subtraction so common inputs keep exact results;
/// larger ones use a single Euclidean remainder so the cost stays bounded.
pub fn min_angle(deg: f32) -> f32 {
    if !deg.is_finite() {
        return deg;
    }
    if deg.abs() < 360.0 * 16.0 {
        let mut v = deg;
        while v > 180.0 {
            v -= 360.0;
        }
        while v <= -180.0 {
            v += 360.0;
        }
        return v;
    }
    let r = deg.rem_euclid(360.0);
    if r > 180.0 { r - 360.0 } else { r }
}

fn dice_count(n: f32) -> i32 {
    (n as i32).clamp(0, MAX_DIE_ROLLS)
}

fn random_integer(lo: i64, hi: i64, sample: f32) -> i64 {
    lo + (f64::from(sample) * (hi - lo + 1) as f64) as i64
}

#[cfg(test)]
#[path = "../../tests/unit/expression/builtin.rs"]
mod tests;
