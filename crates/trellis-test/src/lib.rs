//! Testing harness for Trellis widgets.
//!
//! [`Harness`] owns a widget, lays it out in a viewport, feeds it
//! simulated input and keeps every message the widget returns so tests can
//! assert on them.
//!
//! ```ignore
//! let mut harness = Harness::new(DataTable::new().columns(cols).rows(rows));
//! harness.click(header_center);
//! harness.paint().assert_text_drawn("Name");
//! ```

mod harness;

pub use harness::{Harness, Painted};
