//! Widgets for Trellis.
//!
//! - [`DataTable`]: sortable, selectable tabular data
//! - [`InputField`]: labeled text entry with helper/error text, loading
//!   indicator, clear action and password visibility toggle
//! - [`Icon`]: the stroke icons both widgets draw with

mod checkbox;
pub mod data_table;
mod icon;
pub mod input_field;

pub use checkbox::{CheckboxGlyph, CHECKBOX_SIZE};
pub use data_table::{
    CellValue, DataTable, RowId, RowSelectHandler, SortDirection, SortState, TableBody,
    TableColumn, TableRow, TableSelectionChanged, TableSortChanged, EMPTY_MESSAGE,
};
pub use icon::Icon;
pub use input_field::{
    ChangeHandler, InputField, InputMessage, InputSize, InputType, TextChanged, TextSubmitted,
    Variant,
};
