//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle and receive input through
//! [`Widget::event`]:
//!
//! 1. **Measure**: compute intrinsic size given constraints
//! 2. **Layout**: record the allocated bounds
//! 3. **Paint**: emit draw calls on a [`Canvas`]
//! 4. **Event**: react to input, optionally returning a message
//!
//! Messages are boxed `Any` values; callers downcast them to the message
//! types each widget documents.
//!
//! # Examples
//!
//! ```
//! use trellis_core::{TextStyle, FontWeight, Color};
//!
//! let style = TextStyle {
//!     size: 14.0,
//!     weight: FontWeight::Medium,
//!     color: Color::GRAY_700,
//! };
//! assert_eq!(TextStyle::default().size, 16.0);
//! assert_ne!(style, TextStyle::default());
//! ```

use crate::constraints::Constraints;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Message returned from [`Widget::event`].
pub type Message = Box<dyn Any + Send>;

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size given constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Record the allocated bounds and position internal parts.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Emit draw calls for the current state.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle an input event.
    fn event(&mut self, event: &Event) -> Option<Message>;

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Check if this widget can receive keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// A minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a stroked rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw text with its baseline-left at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw a stroked circle.
    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32);

    /// Stroke an open arc. Angles are in radians, clockwise from +x.
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        width: f32,
    );

    /// Draw a polyline.
    fn draw_path(&mut self, points: &[Point], color: Color, width: f32);
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
        }
    }
}

impl TextStyle {
    /// Style with the given size and color at normal weight.
    #[must_use]
    pub const fn sized(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            weight: FontWeight::Normal,
        }
    }

    /// Approximate rendered width of `text`.
    ///
    /// Backends without font metrics use an average advance of 0.55em.
    #[must_use]
    pub fn approx_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.55
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    Normal,
    /// Medium (500)
    Medium,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Text input
    TextInput,
    /// Table
    Table,
}
