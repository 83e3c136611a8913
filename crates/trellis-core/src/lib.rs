//! Core types and traits for the Trellis widget library.
//!
//! This crate provides the foundation shared by every widget:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] and the shared palette
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`MouseButton`]
//! - The [`Widget`] and [`Canvas`] traits, plus [`RecordingCanvas`]

mod canvas;
mod color;
mod constraints;
mod draw;
mod event;
mod geometry;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::Color;
pub use constraints::Constraints;
pub use draw::{DrawCommand, Paint};
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, Message, TextStyle, TypeId, Widget,
};
