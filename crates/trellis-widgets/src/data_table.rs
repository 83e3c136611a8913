//! `DataTable` widget: sortable, selectable tabular data.
//!
//! The table owns two pieces of transient state:
//!
//! - **Sort state**: at most one active column. Clicking a sortable header
//!   makes it active in ascending order; clicking the active header again
//!   flips the direction.
//! - **Selection**: a set of rows keyed by [`RowId`]. Row checkboxes toggle
//!   membership; the header checkbox selects every row, or clears the
//!   selection when every row is already selected.
//!
//! Row data belongs to the caller. Sorting produces a derived order and
//! never reorders the rows that were supplied.
//!
//! # Examples
//!
//! ```
//! use trellis_widgets::{DataTable, SortDirection, TableColumn, TableRow};
//!
//! let mut table = DataTable::new()
//!     .column(TableColumn::new("name", "Name").sortable())
//!     .rows([
//!         TableRow::new(1).cell("name", "B"),
//!         TableRow::new(2).cell("name", "A"),
//!     ]);
//!
//! assert_eq!(table.toggle_sort("name"), Some(SortDirection::Ascending));
//! let names: Vec<_> = table
//!     .sorted_rows()
//!     .iter()
//!     .map(|row| row.get("name").display())
//!     .collect();
//! assert_eq!(names, ["A", "B"]);
//! ```

use crate::checkbox::CheckboxGlyph;
use crate::icon::Icon;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;
use trellis_core::{
    AccessibleRole, Canvas, Color, Constraints, Event, FontWeight, LayoutResult, Message, Point,
    Rect, Size, TextStyle, TypeId, Widget,
};

const HEADER_HEIGHT: f32 = 44.0;
const ROW_HEIGHT: f32 = 48.0;
const CHECKBOX_COLUMN_WIDTH: f32 = 48.0;
const PREFERRED_COLUMN_WIDTH: f32 = 160.0;
const CELL_PADDING_X: f32 = 24.0;
const HEADER_PADDING_Y: f32 = 12.0;
const SORT_ICON_SIZE: f32 = 14.0;
const SPINNER_SIZE: f32 = 32.0;

/// Text shown when there is nothing to display.
pub const EMPTY_MESSAGE: &str = "No data available.";

/// Unique identifier of a row, independent of its position or contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for RowId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RowId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A cell value in the table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// Empty cell
    #[default]
    Empty,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Total order used for sorting.
    ///
    /// Values of the same kind compare naturally (NaN equals everything).
    /// Mixed kinds order as `Empty < Bool < Number < Text`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A row of data: an identifier plus cell values keyed by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row identifier
    pub id: RowId,
    /// Cell values by field name
    #[serde(flatten)]
    pub cells: BTreeMap<String, CellValue>,
}

impl TableRow {
    /// Create a row with no cells.
    #[must_use]
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }

    /// Value of `field`; missing fields read as [`CellValue::Empty`].
    #[must_use]
    pub fn get(&self, field: &str) -> &CellValue {
        self.cells.get(field).unwrap_or(&EMPTY_CELL)
    }
}

/// Column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Unique column key
    pub key: String,
    /// Header label
    pub title: String,
    /// Row field displayed and sorted by this column
    pub data_index: String,
    /// Whether clicking the header sorts by this column
    #[serde(default)]
    pub sortable: bool,
}

impl TableColumn {
    /// Column reading the field named like its key.
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            data_index: key.clone(),
            key,
            title: title.into(),
            sortable: false,
        }
    }

    /// Read a different row field.
    #[must_use]
    pub fn data_index(mut self, field: impl Into<String>) -> Self {
        self.data_index = field.into();
        self
    }

    /// Make column sortable.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn icon(self) -> Icon {
        match self {
            Self::Ascending => Icon::ArrowUp,
            Self::Descending => Icon::ArrowDown,
        }
    }
}

/// Active sort field and direction. `direction` only matters when `key` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Field being sorted by
    pub key: Option<String>,
    /// Sort direction
    pub direction: SortDirection,
}

/// Message emitted when table sorting changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSortChanged {
    /// Field now sorted by
    pub data_index: String,
    /// Sort direction
    pub direction: SortDirection,
}

/// Message emitted whenever the selection set changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSelectionChanged {
    /// The full selection after the change
    pub rows: Vec<TableRow>,
}

/// What the table body currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a> {
    /// A single busy-indicator row
    Loading,
    /// A single "no data" row
    Empty,
    /// Data rows in display order
    Rows(Vec<&'a TableRow>),
}

impl TableBody<'_> {
    /// Number of rows the body paints.
    #[must_use]
    pub fn row_count(&self) -> usize {
        match self {
            Self::Loading | Self::Empty => 1,
            Self::Rows(rows) => rows.len(),
        }
    }
}

/// Callback receiving the full selection after every change.
pub type RowSelectHandler = Arc<dyn Fn(&[TableRow]) + Send + Sync>;

/// `DataTable` widget for displaying tabular data.
pub struct DataTable {
    columns: Vec<TableColumn>,
    rows: Vec<TableRow>,
    loading: bool,
    selectable: bool,
    sort: SortState,
    /// Display order as indices into `rows`
    order: Vec<usize>,
    /// Selected rows, oldest first
    selected: Vec<TableRow>,
    on_row_select: Option<RowSelectHandler>,
    accessible_name_value: Option<String>,
    test_id_value: Option<String>,
    bounds: Rect,
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("loading", &self.loading)
            .field("selectable", &self.selectable)
            .field("sort", &self.sort)
            .field("selected", &self.selected.len())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl DataTable {
    /// Create a new empty data table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            loading: false,
            selectable: false,
            sort: SortState {
                key: None,
                direction: SortDirection::Ascending,
            },
            order: Vec::new(),
            selected: Vec::new(),
            on_row_select: None,
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = TableColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Set the row data.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.set_rows(rows.into_iter().collect());
        self
    }

    /// Show the loading indicator instead of data.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Enable row selection checkboxes.
    #[must_use]
    pub const fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Register the selection-change callback.
    #[must_use]
    pub fn on_row_select(mut self, handler: impl Fn(&[TableRow]) + Send + Sync + 'static) -> Self {
        self.on_row_select = Some(Arc::new(handler));
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // === Caller-driven updates ===

    /// Replace the row data.
    ///
    /// The display order is recomputed. Selected rows whose ids are gone are
    /// dropped from the selection (notifying if that changed it); the rest
    /// are refreshed to the new row data.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) -> Option<TableSelectionChanged> {
        self.rows = rows;
        self.resort();

        let before = self.selected.len();
        let fresh: Vec<TableRow> = self
            .selected
            .iter()
            .filter_map(|s| self.rows.iter().find(|r| r.id == s.id).cloned())
            .collect();
        self.selected = fresh;

        if self.selected.len() == before {
            None
        } else {
            tracing::debug!(
                pruned = before - self.selected.len(),
                "dropped selected rows missing from new data"
            );
            Some(self.notify_selection())
        }
    }

    /// Toggle the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Toggle row selection checkboxes.
    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    // === Accessors ===

    /// Column descriptors.
    #[must_use]
    pub fn get_columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Rows in the order the caller supplied them.
    #[must_use]
    pub fn get_rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Whether the table shows the loading indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether rows can be selected.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Current sort state.
    #[must_use]
    pub const fn sort_state(&self) -> &SortState {
        &self.sort
    }

    // === Sorting ===

    /// Click behaviour of a sortable header.
    ///
    /// Activates `data_index` in ascending order, or flips the direction if
    /// it is already active. Returns `None` (and changes nothing) when no
    /// sortable column reads that field.
    pub fn toggle_sort(&mut self, data_index: &str) -> Option<SortDirection> {
        if !self
            .columns
            .iter()
            .any(|c| c.sortable && c.data_index == data_index)
        {
            return None;
        }

        if self.sort.key.as_deref() == Some(data_index) {
            self.sort.direction = self.sort.direction.reversed();
        } else {
            self.sort.key = Some(data_index.to_string());
            self.sort.direction = SortDirection::Ascending;
        }
        tracing::debug!(field = data_index, direction = ?self.sort.direction, "sort changed");

        self.resort();
        Some(self.sort.direction)
    }

    /// Rows in display order.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<&TableRow> {
        self.order.iter().map(|&i| &self.rows[i]).collect()
    }

    fn resort(&mut self) {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        if let Some(key) = self.sort.key.as_deref() {
            let descending = self.sort.direction == SortDirection::Descending;
            order.sort_by(|&a, &b| {
                let ord = self.rows[a].get(key).compare(self.rows[b].get(key));
                if descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
        self.order = order;
    }

    // === Selection ===

    /// Selected rows, in the order they were selected.
    #[must_use]
    pub fn selected_rows(&self) -> &[TableRow] {
        &self.selected
    }

    /// Whether the row with `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.iter().any(|r| &r.id == id)
    }

    /// Header checkbox state: at least one row, and every row selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let selected: HashSet<&RowId> = self.selected.iter().map(|r| &r.id).collect();
        self.rows.iter().all(|r| selected.contains(&r.id))
    }

    /// Add the row to the selection if absent, remove it if present.
    ///
    /// Returns the change notification, or `None` if no row has this id.
    pub fn toggle_row(&mut self, id: &RowId) -> Option<TableSelectionChanged> {
        if let Some(pos) = self.selected.iter().position(|r| &r.id == id) {
            self.selected.remove(pos);
        } else {
            let row = self.rows.iter().find(|r| &r.id == id)?;
            self.selected.push(row.clone());
        }
        Some(self.notify_selection())
    }

    /// Header checkbox behaviour.
    ///
    /// Clears the selection when every row is selected, otherwise selects
    /// every row in data order. Returns `None` if nothing changed.
    pub fn toggle_select_all(&mut self) -> Option<TableSelectionChanged> {
        let next = if self.is_all_selected() {
            Vec::new()
        } else {
            self.rows.clone()
        };
        if next == self.selected {
            return None;
        }
        self.selected = next;
        Some(self.notify_selection())
    }

    fn notify_selection(&self) -> TableSelectionChanged {
        tracing::debug!(selected = self.selected.len(), "selection changed");
        if let Some(handler) = &self.on_row_select {
            handler(&self.selected);
        }
        TableSelectionChanged {
            rows: self.selected.clone(),
        }
    }

    // === Body ===

    /// What the body shows: loading wins over data, then empty, then rows.
    #[must_use]
    pub fn body(&self) -> TableBody<'_> {
        if self.loading {
            TableBody::Loading
        } else if self.rows.is_empty() {
            TableBody::Empty
        } else {
            TableBody::Rows(self.sorted_rows())
        }
    }

    // === Geometry ===

    fn checkbox_column_width(&self) -> f32 {
        if self.selectable {
            CHECKBOX_COLUMN_WIDTH
        } else {
            0.0
        }
    }

    fn column_width(&self) -> f32 {
        if self.columns.is_empty() {
            0.0
        } else {
            (self.bounds.width - self.checkbox_column_width()) / self.columns.len() as f32
        }
    }

    /// Header cell of column `index`.
    fn header_cell(&self, index: usize) -> Rect {
        let width = self.column_width();
        Rect::new(
            (index as f32).mul_add(width, self.bounds.x + self.checkbox_column_width()),
            self.bounds.y,
            width,
            HEADER_HEIGHT,
        )
    }

    /// Clickable label area inside a header cell.
    #[must_use]
    pub fn header_label_rect(&self, index: usize) -> Rect {
        self.header_cell(index)
            .inset_xy(CELL_PADDING_X, HEADER_PADDING_Y)
    }

    /// Hit area of the header checkbox.
    #[must_use]
    pub fn header_checkbox_rect(&self) -> Rect {
        CheckboxGlyph::rect_at(Point::new(
            self.bounds.x + CHECKBOX_COLUMN_WIDTH / 2.0,
            self.bounds.y + HEADER_HEIGHT / 2.0,
        ))
    }

    fn body_row_rect(&self, visual_index: usize) -> Rect {
        Rect::new(
            self.bounds.x,
            (visual_index as f32).mul_add(ROW_HEIGHT, self.bounds.y + HEADER_HEIGHT),
            self.bounds.width,
            ROW_HEIGHT,
        )
    }

    /// Hit area of the checkbox on the row at `visual_index` (display order).
    #[must_use]
    pub fn row_checkbox_rect(&self, visual_index: usize) -> Rect {
        let row = self.body_row_rect(visual_index);
        CheckboxGlyph::rect_at(Point::new(
            self.bounds.x + CHECKBOX_COLUMN_WIDTH / 2.0,
            row.center().y,
        ))
    }

    // === Painting ===

    fn paint_header(&self, canvas: &mut dyn Canvas) {
        let header = Rect::new(self.bounds.x, self.bounds.y, self.bounds.width, HEADER_HEIGHT);
        canvas.fill_rect(header, Color::GRAY_50);

        if self.selectable {
            CheckboxGlyph::new(self.is_all_selected(), self.loading)
                .paint(canvas, self.header_checkbox_rect().center());
        }

        let style = TextStyle {
            size: 12.0,
            color: Color::GRAY_500,
            weight: FontWeight::Medium,
        };
        for (index, column) in self.columns.iter().enumerate() {
            let label = self.header_label_rect(index);
            let baseline = Point::new(label.x, label.center().y);
            canvas.draw_text(&column.title, baseline, &style);

            if self.sort.key.as_deref() == Some(column.data_index.as_str()) {
                let icon_x = label.x + style.approx_width(&column.title) + 8.0;
                let icon = Rect::new(
                    icon_x,
                    label.center().y - SORT_ICON_SIZE / 2.0,
                    SORT_ICON_SIZE,
                    SORT_ICON_SIZE,
                );
                self.sort.direction.icon().paint(canvas, icon, style.color);
            }
        }

        canvas.draw_line(
            Point::new(header.x, header.bottom()),
            Point::new(header.right(), header.bottom()),
            Color::GRAY_200,
            1.0,
        );
    }

    fn paint_body(&self, canvas: &mut dyn Canvas) {
        match self.body() {
            TableBody::Loading => {
                let row = self.body_row_rect(0);
                canvas.fill_rect(row, Color::WHITE);
                Icon::Spinner.paint(
                    canvas,
                    Rect::centered_square(row.center(), SPINNER_SIZE),
                    Color::GRAY_500,
                );
            }
            TableBody::Empty => {
                let row = self.body_row_rect(0);
                canvas.fill_rect(row, Color::WHITE);
                let style = TextStyle::sized(14.0, Color::GRAY_500);
                let x = row.center().x - style.approx_width(EMPTY_MESSAGE) / 2.0;
                canvas.draw_text(EMPTY_MESSAGE, Point::new(x, row.center().y), &style);
            }
            TableBody::Rows(rows) => {
                let style = TextStyle::sized(14.0, Color::GRAY_900);
                for (visual_index, row) in rows.iter().enumerate() {
                    let rect = self.body_row_rect(visual_index);
                    let selected = self.is_selected(&row.id);
                    let background = if selected {
                        Color::INDIGO_50
                    } else {
                        Color::WHITE
                    };
                    canvas.fill_rect(rect, background);

                    if self.selectable {
                        CheckboxGlyph::new(selected, self.loading)
                            .paint(canvas, self.row_checkbox_rect(visual_index).center());
                    }

                    let width = self.column_width();
                    for (index, column) in self.columns.iter().enumerate() {
                        let x = (index as f32).mul_add(
                            width,
                            self.bounds.x + self.checkbox_column_width() + CELL_PADDING_X,
                        );
                        canvas.draw_text(
                            &row.get(&column.data_index).display(),
                            Point::new(x, rect.center().y),
                            &style,
                        );
                    }

                    canvas.draw_line(
                        Point::new(rect.x, rect.bottom()),
                        Point::new(rect.right(), rect.bottom()),
                        Color::GRAY_200,
                        1.0,
                    );
                }
            }
        }
    }

    // === Input ===

    fn handle_click(&mut self, position: Point) -> Option<Message> {
        if self.selectable && !self.loading {
            if self.header_checkbox_rect().contains_point(&position) {
                return self.toggle_select_all().map(|m| Box::new(m) as Message);
            }

            let hit = (0..self.order.len())
                .find(|&i| self.row_checkbox_rect(i).contains_point(&position))
                .map(|i| self.rows[self.order[i]].id.clone());
            if let Some(id) = hit {
                return self.toggle_row(&id).map(|m| Box::new(m) as Message);
            }
        }

        let field = self
            .columns
            .iter()
            .enumerate()
            .find(|(i, c)| c.sortable && self.header_label_rect(*i).contains_point(&position))
            .map(|(_, c)| c.data_index.clone())?;
        let direction = self.toggle_sort(&field)?;
        Some(Box::new(TableSortChanged {
            data_index: field,
            direction,
        }))
    }
}

impl Widget for DataTable {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            (self.columns.len().max(1) as f32)
                .mul_add(PREFERRED_COLUMN_WIDTH, self.checkbox_column_width())
        };
        let height = (self.body().row_count() as f32).mul_add(ROW_HEIGHT, HEADER_HEIGHT);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.paint_header(canvas);
        self.paint_body(canvas);
        canvas.stroke_rect(self.bounds, Color::GRAY_200, 1.0);
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        let position = event.click_position()?;
        tracing::trace!(x = position.x, y = position.y, "table click");
        self.handle_click(position)
    }

    fn is_interactive(&self) -> bool {
        self.selectable || self.columns.iter().any(|c| c.sortable)
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;

    fn users() -> Vec<TableRow> {
        vec![
            TableRow::new(1).cell("name", "John Doe").cell("role", "Admin"),
            TableRow::new(2).cell("name", "Jane Smith").cell("role", "User"),
            TableRow::new(3).cell("name", "Peter Jones").cell("role", "User"),
            TableRow::new(4).cell("name", "Alice Williams").cell("role", "Guest"),
        ]
    }

    fn table() -> DataTable {
        DataTable::new()
            .column(TableColumn::new("name", "Name").sortable())
            .column(TableColumn::new("email", "Email Address"))
            .column(TableColumn::new("role", "Role").sortable())
            .rows(users())
    }

    fn names(table: &DataTable) -> Vec<String> {
        table
            .sorted_rows()
            .iter()
            .map(|r| r.get("name").display())
            .collect()
    }

    fn ids(rows: &[TableRow]) -> Vec<RowId> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    // ===== Value Tests =====

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::from("Hello").display(), "Hello");
        assert_eq!(CellValue::Number(42.5).display(), "42.5");
        assert_eq!(CellValue::Bool(true).display(), "Yes");
        assert_eq!(CellValue::Bool(false).display(), "No");
        assert_eq!(CellValue::Empty.display(), "");
    }

    #[test]
    fn test_cell_value_compare_same_kind() {
        assert_eq!(CellValue::from("a").compare(&"b".into()), Ordering::Less);
        assert_eq!(CellValue::from(10).compare(&2.into()), Ordering::Greater);
        assert_eq!(CellValue::from(false).compare(&true.into()), Ordering::Less);
        assert_eq!(
            CellValue::Number(f64::NAN).compare(&CellValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_cell_value_compare_mixed_kinds() {
        assert_eq!(CellValue::Empty.compare(&false.into()), Ordering::Less);
        assert_eq!(CellValue::from(true).compare(&1.into()), Ordering::Less);
        assert_eq!(CellValue::from(99).compare(&"0".into()), Ordering::Less);
    }

    #[test]
    fn test_row_missing_field_is_empty() {
        let row = TableRow::new("a").cell("name", "x");
        assert_eq!(row.get("nope"), &CellValue::Empty);
        assert_eq!(row.get("name"), &CellValue::from("x"));
    }

    #[test]
    fn test_row_id_display_and_from() {
        assert_eq!(RowId::from(7).to_string(), "7");
        assert_eq!(RowId::from("u-1").to_string(), "u-1");
        assert_ne!(RowId::from(1), RowId::from("1"));
    }

    #[test]
    fn test_row_deserialize_flattens_cells() {
        let row: TableRow =
            serde_json::from_str(r#"{"id": 3, "name": "Ann", "age": 31, "admin": true}"#).unwrap();
        assert_eq!(row.id, RowId::Int(3));
        assert_eq!(row.get("name"), &CellValue::from("Ann"));
        assert_eq!(row.get("age"), &CellValue::Number(31.0));
        assert_eq!(row.get("admin"), &CellValue::Bool(true));
        assert!(!row.cells.contains_key("id"));
    }

    #[test]
    fn test_table_column_builder() {
        let col = TableColumn::new("name", "Name");
        assert_eq!(col.data_index, "name");
        assert!(!col.sortable);

        let col = TableColumn::new("full", "Full name").data_index("name").sortable();
        assert_eq!(col.key, "full");
        assert_eq!(col.data_index, "name");
        assert!(col.sortable);
    }

    // ===== Sorting =====

    #[test]
    fn test_initial_order_is_caller_order() {
        let table = table();
        assert_eq!(table.sort_state(), &SortState::default());
        assert_eq!(
            names(&table),
            ["John Doe", "Jane Smith", "Peter Jones", "Alice Williams"]
        );
    }

    #[test]
    fn test_toggle_sort_new_column_is_ascending() {
        let mut table = table();
        assert_eq!(table.toggle_sort("name"), Some(SortDirection::Ascending));
        assert_eq!(
            names(&table),
            ["Alice Williams", "Jane Smith", "John Doe", "Peter Jones"]
        );
    }

    #[test]
    fn test_toggle_sort_same_column_flips() {
        let mut table = table();
        table.toggle_sort("name");
        assert_eq!(table.toggle_sort("name"), Some(SortDirection::Descending));
        assert_eq!(
            names(&table),
            ["Peter Jones", "John Doe", "Jane Smith", "Alice Williams"]
        );
        assert_eq!(table.toggle_sort("name"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_toggle_sort_other_column_resets_to_ascending() {
        let mut table = table();
        table.toggle_sort("name");
        table.toggle_sort("name");
        assert_eq!(table.toggle_sort("role"), Some(SortDirection::Ascending));
        assert_eq!(table.sort_state().key.as_deref(), Some("role"));
    }

    #[test]
    fn test_toggle_sort_non_sortable_is_inert() {
        let mut table = table();
        table.toggle_sort("name");
        assert_eq!(table.toggle_sort("email"), None);
        assert_eq!(table.toggle_sort("missing"), None);
        assert_eq!(table.sort_state().key.as_deref(), Some("name"));
    }

    #[test]
    fn test_sorting_does_not_touch_caller_rows() {
        let mut table = table();
        table.toggle_sort("name");
        assert_eq!(ids(table.get_rows()), ids(&users()));
    }

    #[test]
    fn test_set_rows_resorts() {
        let mut table = table();
        table.toggle_sort("name");
        table.set_rows(vec![
            TableRow::new(9).cell("name", "Zed"),
            TableRow::new(8).cell("name", "Amy"),
        ]);
        assert_eq!(names(&table), ["Amy", "Zed"]);
    }

    #[test]
    fn test_two_row_scenario() {
        let mut table = DataTable::new()
            .column(TableColumn::new("name", "Name").sortable())
            .rows([
                TableRow::new(1).cell("name", "B"),
                TableRow::new(2).cell("name", "A"),
            ]);
        table.toggle_sort("name");
        assert_eq!(names(&table), ["A", "B"]);
        table.toggle_sort("name");
        assert_eq!(names(&table), ["B", "A"]);
    }

    // ===== Selection =====

    #[test]
    fn test_toggle_row_adds_then_removes() {
        let mut table = table().selectable(true);
        let added = table.toggle_row(&RowId::Int(2)).unwrap();
        assert_eq!(ids(&added.rows), [RowId::Int(2)]);
        assert!(table.is_selected(&RowId::Int(2)));

        let removed = table.toggle_row(&RowId::Int(2)).unwrap();
        assert!(removed.rows.is_empty());
        assert!(!table.is_selected(&RowId::Int(2)));
    }

    #[test]
    fn test_toggle_row_keeps_selection_order() {
        let mut table = table().selectable(true);
        table.toggle_row(&RowId::Int(3));
        table.toggle_row(&RowId::Int(1));
        assert_eq!(ids(table.selected_rows()), [RowId::Int(3), RowId::Int(1)]);
    }

    #[test]
    fn test_toggle_unknown_row_is_noop() {
        let mut table = table().selectable(true);
        assert!(table.toggle_row(&RowId::Int(99)).is_none());
        assert!(table.selected_rows().is_empty());
    }

    #[test]
    fn test_select_all_twice_clears() {
        let mut table = table().selectable(true);
        let all = table.toggle_select_all().unwrap();
        assert_eq!(all.rows.len(), 4);
        assert!(table.is_all_selected());

        let none = table.toggle_select_all().unwrap();
        assert!(none.rows.is_empty());
        assert!(!table.is_all_selected());
    }

    #[test]
    fn test_select_all_from_partial_selects_everything() {
        let mut table = table().selectable(true);
        table.toggle_row(&RowId::Int(4));
        table.toggle_select_all();
        assert_eq!(ids(table.selected_rows()), ids(&users()));
    }

    #[test]
    fn test_select_all_on_empty_table() {
        let mut table = DataTable::new().selectable(true);
        assert!(!table.is_all_selected());
        assert!(table.toggle_select_all().is_none());
    }

    #[test]
    fn test_callback_receives_every_change() {
        let seen: Arc<Mutex<Vec<Vec<RowId>>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let mut table = table()
            .selectable(true)
            .on_row_select(move |rows| sink.lock().unwrap().push(ids(rows)));

        table.toggle_row(&RowId::Int(1));
        table.toggle_select_all();
        table.toggle_select_all();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], [RowId::Int(1)]);
        assert_eq!(seen[1].len(), 4);
        assert!(seen[2].is_empty());
    }

    #[test]
    fn test_callback_not_fired_on_construction_or_paint() {
        let calls = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&calls);
        let table = table()
            .selectable(true)
            .on_row_select(move |_| *sink.lock().unwrap() += 1);
        let mut canvas = trellis_core::RecordingCanvas::new();
        table.paint(&mut canvas);
        table.paint(&mut canvas);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_set_rows_prunes_stale_selection() {
        let mut table = table().selectable(true);
        table.toggle_select_all();
        let change = table
            .set_rows(vec![
                TableRow::new(2).cell("name", "Jane Smith-Jones"),
                TableRow::new(5).cell("name", "New Person"),
            ])
            .unwrap();
        assert_eq!(ids(&change.rows), [RowId::Int(2)]);
        assert_eq!(
            table.selected_rows()[0].get("name"),
            &CellValue::from("Jane Smith-Jones")
        );
        assert!(!table.is_all_selected());
    }

    #[test]
    fn test_set_rows_without_pruning_is_silent() {
        let mut table = table().selectable(true);
        table.toggle_row(&RowId::Int(1));
        assert!(table.set_rows(users()).is_none());
        assert!(table.is_selected(&RowId::Int(1)));
    }

    // ===== Body =====

    #[test]
    fn test_body_loading_wins() {
        let table = table().loading(true);
        assert_eq!(table.body(), TableBody::Loading);
        assert_eq!(table.body().row_count(), 1);
    }

    #[test]
    fn test_body_empty() {
        let table = DataTable::new().column(TableColumn::new("name", "Name"));
        assert_eq!(table.body(), TableBody::Empty);
        assert_eq!(table.body().row_count(), 1);
    }

    #[test]
    fn test_body_rows() {
        let table = table();
        assert_eq!(table.body().row_count(), 4);
    }

    // ===== Widget =====

    #[test]
    fn test_measure_unbounded_prefers_column_width() {
        let table = table().selectable(true);
        let size = table.measure(Constraints::unbounded());
        assert_eq!(size.width, 3.0 * PREFERRED_COLUMN_WIDTH + CHECKBOX_COLUMN_WIDTH);
        assert_eq!(size.height, HEADER_HEIGHT + 4.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_measure_fills_bounded_width() {
        let table = table();
        let size = table.measure(Constraints::loose(Size::new(900.0, 1000.0)));
        assert_eq!(size.width, 900.0);
    }

    #[test]
    fn test_accessible_role_and_ids() {
        let table = table().accessible_name("Users").test_id("users-table");
        assert_eq!(table.accessible_role(), AccessibleRole::Table);
        assert_eq!(Widget::accessible_name(&table), Some("Users"));
        assert_eq!(Widget::test_id(&table), Some("users-table"));
        assert!(table.is_interactive());
        assert!(!DataTable::new().is_interactive());
    }

    // ===== Properties =====

    fn arb_rows() -> impl Strategy<Value = Vec<TableRow>> {
        prop::collection::vec(0i32..20, 0..12).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| TableRow::new(i as i64).cell("v", v))
                .collect()
        })
    }

    fn distinct_order(table: &DataTable) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::new();
        for row in table.sorted_rows() {
            if let CellValue::Number(n) = row.get("v") {
                if !out.contains(n) {
                    out.push(*n);
                }
            }
        }
        out
    }

    proptest! {
        #[test]
        fn prop_descending_reverses_distinct_values(rows in arb_rows()) {
            let mut table = DataTable::new()
                .column(TableColumn::new("v", "V").sortable())
                .rows(rows);
            table.toggle_sort("v");
            let asc = distinct_order(&table);
            table.toggle_sort("v");
            let mut desc = distinct_order(&table);
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }

        #[test]
        fn prop_double_toggle_returns_to_ascending(rows in arb_rows()) {
            let mut table = DataTable::new()
                .column(TableColumn::new("v", "V").sortable())
                .rows(rows);
            table.toggle_sort("v");
            let first: Vec<RowId> = table.sorted_rows().iter().map(|r| r.id.clone()).collect();
            table.toggle_sort("v");
            table.toggle_sort("v");
            let again: Vec<RowId> = table.sorted_rows().iter().map(|r| r.id.clone()).collect();
            prop_assert_eq!(table.sort_state().direction, SortDirection::Ascending);
            prop_assert_eq!(first, again);
        }

        #[test]
        fn prop_select_all_is_a_toggle(rows in arb_rows()) {
            let mut table = DataTable::new().selectable(true).rows(rows);
            table.toggle_select_all();
            table.toggle_select_all();
            prop_assert!(table.selected_rows().is_empty());
        }

        #[test]
        fn prop_selection_is_subset_of_rows(rows in arb_rows(), picks in prop::collection::vec(0i64..20, 0..10)) {
            let mut table = DataTable::new().selectable(true).rows(rows);
            for id in picks {
                table.toggle_row(&RowId::Int(id));
            }
            for selected in table.selected_rows() {
                prop_assert!(table.get_rows().iter().any(|r| r.id == selected.id));
            }
        }
    }
}
