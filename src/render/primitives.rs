use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};
use crate::geometry::PathData;

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`) so palettes stay
/// readable in JSON configs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn from_hex(hex: &str) -> ChartResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ChartError::InvalidData(format!(
                "color `{hex}` must be #rrggbb or #rrggbbaa"
            )));
        }

        let channel = |index: usize| -> ChartResult<f64> {
            u8::from_str_radix(&digits[index * 2..index * 2 + 2], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("color `{hex}` is not valid hex")))
        };

        let alpha = if digits.len() == 8 { channel(3)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, alpha))
    }

    /// CSS color text: `#rrggbb` when opaque, `rgba(...)` otherwise.
    #[must_use]
    pub fn to_css(self) -> String {
        let [r, g, b] = [self.red, self.green, self.blue].map(to_byte);
        if self.alpha >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {:.2})", self.alpha.clamp(0.0, 1.0))
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        let [r, g, b, a] = [value.red, value.green, value.blue, value.alpha].map(to_byte);
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

fn check_finite(values: &[f64], what: &str) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn check_stroke_width(width: f64) -> ChartResult<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ))
    }
}

/// Stroke settings shared by outlined primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    fn validate(self) -> ChartResult<()> {
        check_stroke_width(self.width)?;
        self.color.validate()
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    /// Dash length in pixels; `None` draws a solid line.
    pub dash: Option<f64>,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            dash: None,
        }
    }

    #[must_use]
    pub const fn dashed(mut self, dash: f64) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        check_finite(&[self.x1, self.y1, self.x2, self.y2], "line")?;
        check_stroke_width(self.stroke_width)?;
        if let Some(dash) = self.dash {
            check_stroke_width(dash)?;
        }
        self.color.validate()
    }
}

/// Filled, optionally rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn rounded(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        check_finite(
            &[self.x, self.y, self.width, self.height, self.corner_radius],
            "rect",
        )?;
        if self.width < 0.0 || self.height < 0.0 || self.corner_radius < 0.0 {
            return Err(ChartError::InvalidData(
                "rect size and corner radius must be >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Clockwise rotation around `(x, y)` in degrees.
    pub rotation_deg: f64,
    pub bold: bool,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_deg: 0.0,
            bold: false,
        }
    }

    #[must_use]
    pub fn rotated(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        check_finite(&[self.x, self.y, self.rotation_deg], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Arbitrary path with optional fill and stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub data: PathData,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl PathPrimitive {
    #[must_use]
    pub fn stroked(data: PathData, stroke: Stroke) -> Self {
        Self {
            data,
            fill: None,
            stroke: Some(stroke),
        }
    }

    #[must_use]
    pub fn filled(data: PathData, fill: Color) -> Self {
        Self {
            data,
            fill: Some(fill),
            stroke: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.data.validate()?;
        if self.fill.is_none() && self.stroke.is_none() {
            return Err(ChartError::InvalidData(
                "path needs a fill or a stroke".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Circle, used for scatter markers and radar grid rings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn filled(cx: f64, cy: f64, radius: f64, fill: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: Some(fill),
            stroke: None,
        }
    }

    #[must_use]
    pub const fn outlined(cx: f64, cy: f64, radius: f64, stroke: Stroke) -> Self {
        Self {
            cx,
            cy,
            radius,
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        check_finite(&[self.cx, self.cy, self.radius], "circle")?;
        if self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be > 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Closed polygon; the last vertex joins back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub points: Vec<PixelPoint>,
    pub fill: Color,
    pub stroke: Option<Stroke>,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn new(points: Vec<PixelPoint>, fill: Color) -> Self {
        Self {
            points,
            fill,
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.points.is_empty() {
            return Err(ChartError::InvalidData(
                "polygon must have at least one vertex".to_owned(),
            ));
        }
        if !self.points.iter().all(|point| point.is_finite()) {
            return Err(ChartError::InvalidData(
                "polygon coordinates must be finite".to_owned(),
            ));
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        self.fill.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_round_trip_through_strings() {
        let color = Color::from_hex("#4a90e2").expect("color");
        assert_eq!(color.to_css(), "#4a90e2");
        assert_eq!(String::from(color), "#4a90e2");

        let translucent = Color::from_hex("#4a90e266").expect("color");
        assert!(translucent.alpha < 1.0);
        assert_eq!(String::from(translucent), "#4a90e266");
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("4a90e").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }
}
