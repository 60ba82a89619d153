use std::fmt;

use crate::animatable::Animatable;
use crate::value::fmt_number;

/// Ordered list of transform components. Frames render the textual
/// composition of all components in a fixed canonical order (translate,
/// rotate, skew, scale), never a pre-multiplied matrix, so repeated
/// renders are reproducible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformList {
    /// Translation in x, y and z (px)
    pub translate: (f64, f64, f64),
    /// Rotation in degrees (clockwise)
    pub rotate: f64,
    /// Skew in x and y (degrees)
    pub skew: (f64, f64),
    /// Scale in x and y (1.0 = no scale)
    pub scale: (f64, f64),
}

impl TransformList {
    /// Identity transform (no transformation)
    pub const IDENTITY: Self = Self {
        translate: (0.0, 0.0, 0.0),
        rotate: 0.0,
        skew: (0.0, 0.0),
        scale: (1.0, 1.0),
    };

    /// Quick check whether a textual value is in transform-list or
    /// matrix form. `"none"` is deliberately excluded; the per-property
    /// default table covers it.
    pub(crate) fn looks_like(text: &str) -> bool {
        let text = text.trim_start();
        ["matrix(", "matrix3d(", "translate", "rotate", "skew", "scale"]
            .iter()
            .any(|prefix| text.starts_with(prefix))
    }

    /// Parse a textual transform value: `"none"`, a `matrix(...)` /
    /// `matrix3d(...)` form (decomposed into components), or a list of
    /// transform functions.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == "none" || text.is_empty() {
            return Some(Self::IDENTITY);
        }
        if let Some(args) = text.strip_prefix("matrix(") {
            let m = parse_args(args.strip_suffix(')')?)?;
            if m.len() != 6 {
                return None;
            }
            return Some(Self::from_matrix2d(m[0], m[1], m[2], m[3], m[4], m[5]));
        }
        if let Some(args) = text.strip_prefix("matrix3d(") {
            let m = parse_args(args.strip_suffix(')')?)?;
            if m.len() != 16 {
                return None;
            }
            // Decompose the 2D part; carry the z translation through.
            let mut list = Self::from_matrix2d(m[0], m[1], m[4], m[5], m[12], m[13]);
            list.translate.2 = m[14];
            return Some(list);
        }
        Self::parse_functions(text)
    }

    /// Decompose a 2D affine matrix `[a b c d e f]` into translate,
    /// rotate, skew-x and scale components.
    fn from_matrix2d(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        let scale_x = (a * a + b * b).sqrt();
        if scale_x == 0.0 {
            return Self {
                translate: (e, f, 0.0),
                rotate: 0.0,
                skew: (0.0, 0.0),
                scale: (0.0, (c * c + d * d).sqrt()),
            };
        }
        let rotate = b.atan2(a).to_degrees();
        let det = a * d - b * c;
        let scale_y = det / scale_x;
        let skew_x = if det == 0.0 {
            0.0
        } else {
            ((a * c + b * d) / det).atan().to_degrees()
        };
        Self {
            translate: (e, f, 0.0),
            rotate,
            skew: (skew_x, 0.0),
            scale: (scale_x, scale_y),
        }
    }

    fn parse_functions(text: &str) -> Option<Self> {
        let mut list = Self::IDENTITY;
        for chunk in text.split(')') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            let (name, args) = chunk.split_once('(')?;
            let name = name.trim().to_ascii_lowercase();
            let args = parse_args(args)?;
            match (name.as_str(), args.as_slice()) {
                ("translate", [x]) => list.translate.0 = *x,
                ("translate", [x, y]) => (list.translate.0, list.translate.1) = (*x, *y),
                ("translate3d", [x, y, z]) => list.translate = (*x, *y, *z),
                ("translatex", [x]) => list.translate.0 = *x,
                ("translatey", [y]) => list.translate.1 = *y,
                ("translatez", [z]) => list.translate.2 = *z,
                ("rotate" | "rotatez", [angle]) => list.rotate = *angle,
                ("skew", [x]) => list.skew.0 = *x,
                ("skew", [x, y]) => list.skew = (*x, *y),
                ("skewx", [x]) => list.skew.0 = *x,
                ("skewy", [y]) => list.skew.1 = *y,
                ("scale", [s]) => list.scale = (*s, *s),
                ("scale", [x, y]) => list.scale = (*x, *y),
                ("scalex", [x]) => list.scale.0 = *x,
                ("scaley", [y]) => list.scale.1 = *y,
                _ => return None,
            }
        }
        Some(list)
    }
}

/// Parse a comma-separated argument list, stripping `px`/`deg` suffixes
/// and converting `rad` angles to degrees.
fn parse_args(args: &str) -> Option<Vec<f64>> {
    args.split(',').map(parse_scalar).collect()
}

fn parse_scalar(arg: &str) -> Option<f64> {
    let arg = arg.trim();
    if let Some(n) = arg.strip_suffix("px") {
        n.trim().parse().ok()
    } else if let Some(n) = arg.strip_suffix("deg") {
        n.trim().parse().ok()
    } else if let Some(n) = arg.strip_suffix("rad") {
        n.trim().parse::<f64>().ok().map(f64::to_degrees)
    } else {
        arg.parse().ok()
    }
}

impl Animatable for TransformList {
    fn lerp(from: &Self, to: &Self, t: f64) -> Self {
        Self {
            translate: (
                f64::lerp(&from.translate.0, &to.translate.0, t),
                f64::lerp(&from.translate.1, &to.translate.1, t),
                f64::lerp(&from.translate.2, &to.translate.2, t),
            ),
            rotate: f64::lerp(&from.rotate, &to.rotate, t),
            skew: (
                f64::lerp(&from.skew.0, &to.skew.0, t),
                f64::lerp(&from.skew.1, &to.skew.1, t),
            ),
            scale: (
                f64::lerp(&from.scale.0, &to.scale.0, t),
                f64::lerp(&from.scale.1, &to.scale.1, t),
            ),
        }
    }
}

impl Default for TransformList {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translateX({}px) translateY({}px) translateZ({}px) rotate({}deg) skewX({}deg) skewY({}deg) scaleX({}) scaleY({})",
            fmt_number(self.translate.0),
            fmt_number(self.translate.1),
            fmt_number(self.translate.2),
            fmt_number(self.rotate),
            fmt_number(self.skew.0),
            fmt_number(self.skew.1),
            fmt_number(self.scale.0),
            fmt_number(self.scale.1),
        )
    }
}
