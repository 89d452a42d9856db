use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;
use crate::error::{ChartError, ChartResult};

/// One drawing instruction of a path descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(PixelPoint),
    LineTo(PixelPoint),
    /// Circular arc from the current point to `to`.
    Arc {
        radius: f64,
        large_arc: bool,
        clockwise: bool,
        to: PixelPoint,
    },
    Close,
}

impl PathCommand {
    fn validate(self) -> ChartResult<()> {
        let finite = match self {
            Self::MoveTo(point) | Self::LineTo(point) => point.is_finite(),
            Self::Arc { radius, to, .. } => radius.is_finite() && radius > 0.0 && to.is_finite(),
            Self::Close => true,
        };
        if finite {
            Ok(())
        } else {
            Err(ChartError::InvalidData(format!(
                "path command has non-finite geometry: {self:?}"
            )))
        }
    }
}

/// Backend-neutral path descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, point: PixelPoint) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    #[must_use]
    pub fn line_to(mut self, point: PixelPoint) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self.commands.first() {
            None => {
                return Err(ChartError::InvalidData("path must not be empty".to_owned()));
            }
            Some(PathCommand::MoveTo(_)) => {}
            Some(_) => {
                return Err(ChartError::InvalidData(
                    "path must start with a move command".to_owned(),
                ));
            }
        }
        self.commands.iter().try_for_each(|command| command.validate())
    }

    /// SVG `d` attribute for this path.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut parts = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            parts.push(match *command {
                PathCommand::MoveTo(p) => format!("M {} {}", format_coord(p.x), format_coord(p.y)),
                PathCommand::LineTo(p) => format!("L {} {}", format_coord(p.x), format_coord(p.y)),
                PathCommand::Arc {
                    radius,
                    large_arc,
                    clockwise,
                    to,
                } => format!(
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(large_arc),
                    u8::from(clockwise),
                    format_coord(to.x),
                    format_coord(to.y),
                    r = format_coord(radius),
                ),
                PathCommand::Close => "Z".to_owned(),
            });
        }
        parts.join(" ")
    }
}

impl FromIterator<PathCommand> for PathData {
    fn from_iter<T: IntoIterator<Item = PathCommand>>(iter: T) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// "Move to the first point, line to each following point."
///
/// An empty input yields an empty path.
#[must_use]
pub fn line_path(points: &[PixelPoint]) -> PathData {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            if index == 0 {
                PathCommand::MoveTo(*point)
            } else {
                PathCommand::LineTo(*point)
            }
        })
        .collect()
}

/// Compact coordinate text: at most three decimals, trailing zeros dropped.
#[must_use]
pub fn format_coord(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_path_moves_then_lines() {
        let path = line_path(&[
            PixelPoint::new(0.0, 10.0),
            PixelPoint::new(5.5, 2.0),
            PixelPoint::new(10.0, 0.0),
        ]);
        assert_eq!(path.to_svg(), "M 0 10 L 5.5 2 L 10 0");
        path.validate().expect("valid path");
    }

    #[test]
    fn coordinates_are_compact() {
        assert_eq!(format_coord(12.0), "12");
        assert_eq!(format_coord(1.23456), "1.235");
        assert_eq!(format_coord(-0.0001), "0");
    }
}
