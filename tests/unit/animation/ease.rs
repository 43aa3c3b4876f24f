use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5
}

#[test]
fn quad_in_basics() {
    assert_eq!(Ease::QuadIn.apply(0.0), 0.0);
    assert_eq!(Ease::QuadIn.apply(1.0), 1.0);
    assert_eq!(Ease::QuadIn.apply(0.5), 0.25);
    assert_eq!(Ease::QuadOut.apply(0.5), 0.75);
}

#[test]
fn every_ease_pins_its_endpoints() {
    for e in Ease::all() {
        assert!(close(e.apply(0.0), 0.0), "{} at 0 = {}", e.name(), e.apply(0.0));
        assert!(close(e.apply(1.0), 1.0), "{} at 1 = {}", e.name(), e.apply(1.0));
    }
}

#[test]
fn input_is_clamped() {
    for e in Ease::all() {
        assert_eq!(e.apply(-3.0), e.apply(0.0), "{}", e.name());
        assert_eq!(e.apply(4.0), e.apply(1.0), "{}", e.name());
    }
}

#[test]
fn in_out_variants_pass_through_the_middle() {
    for e in [
        Ease::QuadInOut,
        Ease::CubicInOut,
        Ease::QuartInOut,
        Ease::QuintInOut,
        Ease::SineInOut,
        Ease::ExpoInOut,
        Ease::CircInOut,
        Ease::BackInOut,
        Ease::ElasticInOut,
    ] {
        assert!(close(e.apply(0.5), 0.5), "{} at 0.5 = {}", e.name(), e.apply(0.5));
    }
}

#[test]
fn in_out_variants_are_continuous_at_the_midpoint() {
    for e in Ease::all() {
        let below = e.apply(0.5 - 1e-6);
        let above = e.apply(0.5 + 1e-6);
        assert!((above - below).abs() < 0.01, "{} jumps at 0.5", e.name());
    }
}

#[test]
fn back_and_elastic_leave_the_unit_range() {
    let samples = || (1..100).map(|i| i as f32 / 100.0);
    assert!(samples().map(|t| Ease::BackIn.apply(t)).any(|v| v < 0.0));
    assert!(samples().map(|t| Ease::BackOut.apply(t)).any(|v| v > 1.0));
    assert!(samples().map(|t| Ease::ElasticOut.apply(t)).any(|v| v > 1.0));
    assert!(samples().map(|t| Ease::ElasticIn.apply(t)).any(|v| v < 0.0));
}

#[test]
fn polynomial_eases_are_monotonic() {
    for e in [Ease::Linear, Ease::CubicIn, Ease::QuartOut, Ease::SineInOut, Ease::CircIn] {
        let mut prev = e.apply(0.0);
        for i in 1..=100 {
            let v = e.apply(i as f32 / 100.0);
            assert!(v >= prev, "{} decreases at {i}", e.name());
            prev = v;
        }
    }
}

#[test]
fn names_round_trip() {
    let mut n = 0;
    for e in Ease::all() {
        assert_eq!(Ease::from_name(e.name()), Some(e));
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, format!("\"{}\"", e.name()));
        assert_eq!(serde_json::from_str::<Ease>(&json).unwrap(), e);
        n += 1;
    }
    assert_eq!(n, 28);
    assert_eq!(Ease::from_name(" Cubic.OUT "), Some(Ease::CubicOut));
    assert_eq!(Ease::from_name("cubic"), None);
}
