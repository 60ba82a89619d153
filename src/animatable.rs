use crate::value::Rgb;

/// Trait for values that can be animated by interpolating between endpoints
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation between two values
    /// t = 0.0 returns `from`, t = 1.0 returns `to`
    /// t can leave the [0, 1] range when an easing curve overshoots
    fn lerp(from: &Self, to: &Self, t: f64) -> Self;
}

impl Animatable for f64 {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Rgb {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        Rgb {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
        }
    }
}
