//! Stroke icons drawn with canvas primitives.
//!
//! Icons are designed on a 24-unit grid with a 2-unit stroke and scaled to
//! the square they are painted into.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use trellis_core::{Canvas, Color, Point, Rect};

/// Built-in icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    /// Ascending sort indicator
    ArrowUp,
    /// Descending sort indicator
    ArrowDown,
    /// Busy indicator (three-quarter ring)
    Spinner,
    /// Clear / close cross
    Close,
    /// Reveal password
    Eye,
    /// Hide password
    EyeOff,
    /// Check mark
    Check,
}

impl Icon {
    /// Stable name, used in accessible labels and tooling output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArrowUp => "arrow-up",
            Self::ArrowDown => "arrow-down",
            Self::Spinner => "spinner",
            Self::Close => "close",
            Self::Eye => "eye",
            Self::EyeOff => "eye-off",
            Self::Check => "check",
        }
    }

    /// Paint the icon scaled into `bounds` (the shorter side wins).
    pub fn paint(self, canvas: &mut dyn Canvas, bounds: Rect, color: Color) {
        let side = bounds.width.min(bounds.height);
        let frame = Rect::centered_square(bounds.center(), side);
        let unit = side / 24.0;
        let stroke = 2.0 * unit;
        let at = |x: f32, y: f32| Point::new(frame.x + x * unit, frame.y + y * unit);

        match self {
            Self::ArrowUp => {
                canvas.draw_line(at(12.0, 19.0), at(12.0, 5.0), color, stroke);
                canvas.draw_path(&[at(5.0, 12.0), at(12.0, 5.0), at(19.0, 12.0)], color, stroke);
            }
            Self::ArrowDown => {
                canvas.draw_line(at(12.0, 5.0), at(12.0, 19.0), color, stroke);
                canvas.draw_path(&[at(19.0, 12.0), at(12.0, 19.0), at(5.0, 12.0)], color, stroke);
            }
            Self::Spinner => {
                canvas.stroke_arc(at(12.0, 12.0), 9.0 * unit, 0.0, 1.5 * PI, color, stroke);
            }
            Self::Close => {
                canvas.draw_line(at(18.0, 6.0), at(6.0, 18.0), color, stroke);
                canvas.draw_line(at(6.0, 6.0), at(18.0, 18.0), color, stroke);
            }
            Self::Eye => paint_eye(canvas, &at, unit, color, stroke),
            Self::EyeOff => {
                paint_eye(canvas, &at, unit, color, stroke);
                canvas.draw_line(at(2.0, 2.0), at(22.0, 22.0), color, stroke);
            }
            Self::Check => {
                canvas.draw_path(&[at(20.0, 6.0), at(9.0, 17.0), at(4.0, 12.0)], color, stroke);
            }
        }
    }
}

fn paint_eye(
    canvas: &mut dyn Canvas,
    at: &dyn Fn(f32, f32) -> Point,
    unit: f32,
    color: Color,
    stroke: f32,
) {
    // Almond outline sampled from two arcs.
    let samples = 12;
    let mut outline = Vec::with_capacity(samples * 2 + 1);
    for i in 0..=samples {
        let t = i as f32 / samples as f32;
        let x = 2.0 + 20.0 * t;
        let y = 12.0 - 7.0 * (PI * t).sin();
        outline.push(at(x, y));
    }
    for i in 1..=samples {
        let t = 1.0 - i as f32 / samples as f32;
        let x = 2.0 + 20.0 * t;
        let y = 12.0 + 7.0 * (PI * t).sin();
        outline.push(at(x, y));
    }
    canvas.draw_path(&outline, color, stroke);
    canvas.stroke_circle(at(12.0, 12.0), 3.0 * unit, color, stroke);
}
