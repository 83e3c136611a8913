//! Story catalog for Trellis widgets.
//!
//! A catalog is a YAML document listing components and named example
//! configurations ("stories") for each. Stories can `extends` a sibling and
//! override some of its fields. [`Catalog::builtin`] returns the stories
//! shipped with the widgets.

mod catalog;
mod error;
mod story;

pub use catalog::{Catalog, Component, ComponentKind};
pub use error::CatalogError;
pub use story::{ColumnSpec, InputProps, Story, StoryProps, StoryWidget, TableProps};
