//! Backend-neutral draw commands.
//!
//! Every [`Canvas`](crate::Canvas) call reduces to one [`DrawCommand`], which
//! makes paint output comparable in tests and serializable for tooling.

use crate::widget::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke or fill for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// Solid fill
    Fill(Color),
    /// Outline of the given width
    Stroke {
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        width: f32,
    },
}

impl Paint {
    /// Color of the fill or stroke.
    #[must_use]
    pub const fn color(&self) -> Color {
        match self {
            Self::Fill(color) | Self::Stroke { color, .. } => *color,
        }
    }
}

/// Drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Fill or stroke
        paint: Paint,
    },
    /// Circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Fill or stroke
        paint: Paint,
    },
    /// Open arc
    Arc {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Start angle (radians)
        start_angle: f32,
        /// End angle (radians)
        end_angle: f32,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Polyline
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Text run
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Text content, for text commands.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Short single-line description, used by tooling output.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Rect { bounds, paint } => format!(
                "rect   {:>7.1} {:>7.1} {:>7.1}x{:<7.1} {}",
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height,
                describe_paint(paint)
            ),
            Self::Circle {
                center,
                radius,
                paint,
            } => format!(
                "circle {:>7.1} {:>7.1} r={radius:.1} {}",
                center.x,
                center.y,
                describe_paint(paint)
            ),
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                color,
                ..
            } => format!(
                "arc    {:>7.1} {:>7.1} r={radius:.1} {start_angle:.2}..{end_angle:.2} {}",
                center.x,
                center.y,
                color.to_hex()
            ),
            Self::Path { points, color, .. } => {
                format!("path   {} points {}", points.len(), color.to_hex())
            }
            Self::Text {
                content, position, ..
            } => format!("text   {:>7.1} {:>7.1} {content:?}", position.x, position.y),
        }
    }
}

fn describe_paint(paint: &Paint) -> String {
    match paint {
        Paint::Fill(color) => format!("fill {}", color.to_hex()),
        Paint::Stroke { color, width } => format!("stroke {} w={width}", color.to_hex()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_accessor() {
        let cmd = DrawCommand::Text {
            content: "Name".to_string(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        assert_eq!(cmd.text(), Some("Name"));

        let rect = DrawCommand::Rect {
            bounds: Rect::default(),
            paint: Paint::Fill(Color::WHITE),
        };
        assert_eq!(rect.text(), None);
    }

    #[test]
    fn test_paint_color() {
        assert_eq!(Paint::Fill(Color::RED_500).color(), Color::RED_500);
        let stroke = Paint::Stroke {
            color: Color::GRAY_300,
            width: 1.0,
        };
        assert_eq!(stroke.color(), Color::GRAY_300);
    }

    #[test]
    fn test_summary_mentions_content() {
        let cmd = DrawCommand::Text {
            content: "No data available.".to_string(),
            position: Point::new(1.0, 2.0),
            style: TextStyle::default(),
        };
        assert!(cmd.summary().contains("No data available."));

        let rect = DrawCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            paint: Paint::Fill(Color::WHITE),
        };
        assert!(rect.summary().starts_with("rect"));
        assert!(rect.summary().contains("#ffffff"));
    }

    #[test]
    fn test_serialize_tagged() {
        let cmd = DrawCommand::Path {
            points: vec![Point::ORIGIN, Point::new(1.0, 1.0)],
            color: Color::BLACK,
            width: 2.0,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["op"], "path");
    }
}
