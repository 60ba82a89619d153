use crate::animatable::Animatable;
use crate::error::AnimationError;
use crate::transform::TransformList;
use crate::value::{parse_px, unit_for, RawValue, Rgb, Unit, Value};

/// Interpolator kinds. Resolved once when a track is created and fixed
/// for the life of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenKind {
    /// A single number, rendered in px unless the property is unit-less
    Pixel,
    /// An ordered list of transform components
    Matrix,
    /// An RGB color triple
    Color,
}

/// Classify a raw value. Rules apply in order: native numbers are
/// pixel-like; transform-list/matrix text is a matrix; `<n>px` or bare
/// numeric text is pixel-like; an `rgb(...)` triple is a color; anything
/// else falls back to the static per-property default table. `None`
/// means no interpolator is available.
pub fn resolve(raw: &RawValue, property: &str) -> Option<TweenKind> {
    match raw {
        RawValue::Number(_) => Some(TweenKind::Pixel),
        RawValue::Text(text) => {
            let text = text.trim();
            if TransformList::looks_like(text) {
                Some(TweenKind::Matrix)
            } else if parse_px(text).is_some() {
                Some(TweenKind::Pixel)
            } else if Rgb::parse(text).is_some() {
                Some(TweenKind::Color)
            } else {
                default_kind(property)
            }
        }
    }
}

/// Per-property-name defaults, consulted when the value itself is not
/// classifiable (e.g. a computed transform of `"none"`). Matches the
/// canonical name and vendor-aliased forms like `-webkit-transform`.
fn default_kind(property: &str) -> Option<TweenKind> {
    if property == "transform" || property.ends_with("-transform") {
        Some(TweenKind::Matrix)
    } else {
        None
    }
}

/// The from/to state for one animated property, with its interpolator
/// selected at creation time. The property name lives in the track
/// registry key; the tween only carries the endpoint pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pair: Pair,
}

#[derive(Clone, Debug, PartialEq)]
enum Pair {
    Pixel { from: f64, to: f64, unit: Unit },
    Matrix { from: TransformList, to: TransformList },
    Color { from: Rgb, to: Rgb },
}

impl Tween {
    /// Build a track of the given kind, coercing both endpoints. The
    /// endpoints always share the kind; a `to` value that does not fit
    /// it is a construction error.
    pub fn new(
        property: &str,
        kind: TweenKind,
        from: &RawValue,
        to: &RawValue,
    ) -> Result<Self, AnimationError> {
        let pair = match kind {
            TweenKind::Pixel => Pair::Pixel {
                from: coerce_number(property, from)?,
                to: coerce_number(property, to)?,
                unit: unit_for(property),
            },
            TweenKind::Matrix => Pair::Matrix {
                from: coerce_transform(property, from)?,
                to: coerce_transform(property, to)?,
            },
            TweenKind::Color => Pair::Color {
                from: coerce_color(property, from)?,
                to: coerce_color(property, to)?,
            },
        };
        Ok(Self { pair })
    }

    /// Value at eased progress `t`. Pure; never mutates the track.
    pub fn value_at(&self, t: f64) -> Value {
        match &self.pair {
            Pair::Pixel { from, to, unit } => Value::Number {
                value: f64::lerp(from, to, t),
                unit: *unit,
            },
            Pair::Matrix { from, to } => Value::Transform(TransformList::lerp(from, to, t)),
            Pair::Color { from, to } => Value::Color(Rgb::lerp(from, to, t)),
        }
    }

    /// The value this track ends at. Used for chain lookahead without
    /// going through frame computation.
    pub fn end_value(&self) -> Value {
        match &self.pair {
            Pair::Pixel { to, unit, .. } => Value::Number {
                value: *to,
                unit: *unit,
            },
            Pair::Matrix { to, .. } => Value::Transform(*to),
            Pair::Color { to, .. } => Value::Color(*to),
        }
    }

    /// Mutable access to the to-side transform component list, for the
    /// structural mutators. `None` when the track is not a matrix track.
    pub(crate) fn transform_to_mut(&mut self) -> Option<&mut TransformList> {
        match &mut self.pair {
            Pair::Matrix { to, .. } => Some(to),
            _ => None,
        }
    }
}

fn coerce_number(property: &str, raw: &RawValue) -> Result<f64, AnimationError> {
    raw.as_number().ok_or_else(|| AnimationError::UnresolvedType {
        property: property.to_string(),
        value: raw.to_string(),
    })
}

fn coerce_transform(property: &str, raw: &RawValue) -> Result<TransformList, AnimationError> {
    match raw {
        RawValue::Text(text) => TransformList::parse(text),
        RawValue::Number(_) => None,
    }
    .ok_or_else(|| AnimationError::UnresolvedType {
        property: property.to_string(),
        value: raw.to_string(),
    })
}

fn coerce_color(property: &str, raw: &RawValue) -> Result<Rgb, AnimationError> {
    match raw {
        RawValue::Text(text) => Rgb::parse(text),
        RawValue::Number(_) => None,
    }
    .ok_or_else(|| AnimationError::InvalidColor {
        property: property.to_string(),
        value: raw.to_string(),
    })
}
