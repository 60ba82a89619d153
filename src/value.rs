use std::fmt;

use crate::transform::TransformList;

/// A raw property value as read from a target, before any type
/// resolution has happened.
#[derive(Clone, Debug, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric view of the value. Textual values use a leading-number
    /// parse, so `"5px"` yields `5.0`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(text) => {
                let text = text.trim();
                let mut end = 0;
                for (i, c) in text.char_indices() {
                    let numeric = c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'));
                    if !numeric {
                        break;
                    }
                    end = i + c.len_utf8();
                }
                text[..end].parse().ok()
            }
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(n) => write!(f, "{}", fmt_number(*n)),
            RawValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<f32> for RawValue {
    fn from(value: f32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Rendering unit of a numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// Rendered with a `px` suffix.
    Px,
    /// Rendered as a bare number.
    None,
}

/// Properties whose numeric values render without a unit.
const UNITLESS: &[&str] = &[
    "opacity",
    "z-index",
    "zoom",
    "font-weight",
    "line-height",
    "flex-grow",
    "flex-shrink",
    "order",
];

/// Rendering unit for a numeric value of `property`.
pub fn unit_for(property: &str) -> Unit {
    if UNITLESS.contains(&property) {
        Unit::None
    } else {
        Unit::Px
    }
}

/// An RGB color. Channels are kept as floats so intermediate frames can
/// interpolate freely; rendering rounds to the nearest integer (ties
/// away from zero) and clamps to the 0..=255 range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse an `rgb(r, g, b)` triple.
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<f64>().ok());
        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;
        if channels.next().is_some() {
            return None;
        }
        Some(Self { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        write!(
            f,
            "rgb({},{},{})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// A typed property value, the unit of interpolation. Every variant
/// round-trips through its rendered textual form.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number { value: f64, unit: Unit },
    Transform(TransformList),
    Color(Rgb),
}

impl Value {
    /// Convert back to the raw representation a target read would yield.
    pub(crate) fn to_raw(&self) -> RawValue {
        match self {
            Value::Number {
                value,
                unit: Unit::None,
            } => RawValue::Number(*value),
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number {
                value,
                unit: Unit::Px,
            } => write!(f, "{}px", fmt_number(*value)),
            Value::Number {
                value,
                unit: Unit::None,
            } => write!(f, "{}", fmt_number(*value)),
            Value::Transform(list) => write!(f, "{list}"),
            Value::Color(color) => write!(f, "{color}"),
        }
    }
}

/// Parse a pixel-style scalar: `"<n>px"` or a bare number.
pub(crate) fn parse_px(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix("px").unwrap_or(text);
    text.trim().parse().ok()
}

/// Render a number with up to three decimal places, trailing zeros
/// trimmed, so frames stay short and reproducible.
pub(crate) fn fmt_number(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let mut text = format!("{n:.3}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}
