//! Checkbox glyph used by selectable tables.

use crate::icon::Icon;
use serde::{Deserialize, Serialize};
use trellis_core::{Canvas, Color, Point, Rect};

/// Side length of the checkbox square.
pub const CHECKBOX_SIZE: f32 = 16.0;

/// Visual state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckboxGlyph {
    /// Whether the box is ticked
    pub checked: bool,
    /// Whether clicks are ignored
    pub disabled: bool,
}

impl CheckboxGlyph {
    /// Glyph with the given checked and disabled flags.
    #[must_use]
    pub const fn new(checked: bool, disabled: bool) -> Self {
        Self { checked, disabled }
    }

    /// Hit area of a checkbox centered on `center`.
    #[must_use]
    pub fn rect_at(center: Point) -> Rect {
        Rect::centered_square(center, CHECKBOX_SIZE)
    }

    /// Paint the box centered on `center`.
    pub fn paint(&self, canvas: &mut dyn Canvas, center: Point) {
        let rect = Self::rect_at(center);
        let opacity = if self.disabled { 0.5 } else { 1.0 };

        if self.checked {
            canvas.fill_rect(rect, Color::INDIGO_600.faded(opacity));
            Icon::Check.paint(canvas, rect.inset(2.0), Color::WHITE.faded(opacity));
        } else {
            canvas.fill_rect(rect, Color::WHITE);
            canvas.stroke_rect(rect, Color::GRAY_300.faded(opacity), 1.0);
        }
    }
}
