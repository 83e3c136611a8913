//! Story properties and the widgets they build.

use serde::{Deserialize, Serialize};
use trellis_core::{
    AccessibleRole, Canvas, Constraints, Event, LayoutResult, Message, Rect, Size, TypeId, Widget,
};
use trellis_widgets::{
    DataTable, InputField, InputSize, InputType, TableColumn, TableRow, TextChanged, Variant,
};

/// Column as written in a catalog; `data_index` defaults to the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    /// Unique column key
    pub key: String,
    /// Header label
    pub title: String,
    /// Row field to read
    #[serde(default)]
    pub data_index: Option<String>,
    /// Header click sorts
    #[serde(default)]
    pub sortable: bool,
}

impl From<&ColumnSpec> for TableColumn {
    fn from(spec: &ColumnSpec) -> Self {
        let column = Self::new(spec.key.clone(), spec.title.clone());
        let column = match &spec.data_index {
            Some(field) => column.data_index(field.clone()),
            None => column,
        };
        if spec.sortable {
            column.sortable()
        } else {
            column
        }
    }
}

/// Properties of a `data-table` story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableProps {
    /// Column descriptors
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    /// Row data
    #[serde(default)]
    pub rows: Vec<TableRow>,
    /// Show the loading row
    #[serde(default)]
    pub loading: bool,
    /// Show selection checkboxes
    #[serde(default)]
    pub selectable: bool,
}

impl TableProps {
    /// First column key that appears twice.
    pub(crate) fn duplicate_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .enumerate()
            .find(|(i, c)| self.columns[..*i].iter().any(|p| p.key == c.key))
            .map(|(_, c)| c.key.as_str())
    }

    fn build(&self) -> DataTable {
        DataTable::new()
            .columns(self.columns.iter().map(TableColumn::from))
            .rows(self.rows.iter().cloned())
            .loading(self.loading)
            .selectable(self.selectable)
    }
}

/// Properties of an `input-field` story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputProps {
    /// Initial value
    #[serde(default)]
    pub value: String,
    /// Label above the control
    #[serde(default)]
    pub label: Option<String>,
    /// Placeholder text
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Helper text
    #[serde(default)]
    pub helper_text: Option<String>,
    /// Error text shown while invalid
    #[serde(default)]
    pub error_message: Option<String>,
    /// Disabled flag
    #[serde(default)]
    pub disabled: bool,
    /// Invalid flag
    #[serde(default)]
    pub invalid: bool,
    /// Loading flag
    #[serde(default)]
    pub loading: bool,
    /// Input type
    #[serde(default, rename = "type")]
    pub input_type: InputType,
    /// Visual variant
    #[serde(default)]
    pub variant: Variant,
    /// Size preset
    #[serde(default)]
    pub size: InputSize,
    /// Apply proposed values back to the field
    #[serde(default)]
    pub controlled: bool,
}

impl InputProps {
    fn build(&self) -> InputField {
        let mut field = InputField::new()
            .value(self.value.clone())
            .disabled(self.disabled)
            .invalid(self.invalid)
            .loading(self.loading)
            .input_type(self.input_type)
            .variant(self.variant)
            .size(self.size);
        if let Some(label) = &self.label {
            field = field.label(label.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            field = field.placeholder(placeholder.clone());
        }
        if let Some(helper) = &self.helper_text {
            field = field.helper_text(helper.clone());
        }
        if let Some(error) = &self.error_message {
            field = field.error_message(error.clone());
        }
        field
    }
}

/// Resolved properties of a story.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryProps {
    /// Data table story
    Table(TableProps),
    /// Input field story
    Input(InputProps),
}

/// A named, fully resolved example of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Story name, unique within its component
    pub name: String,
    /// Properties after `extends` has been applied
    pub props: StoryProps,
}

impl Story {
    /// Build a live widget for this story.
    #[must_use]
    pub fn build(&self) -> StoryWidget {
        match &self.props {
            StoryProps::Table(props) => StoryWidget::Table(props.build()),
            StoryProps::Input(props) => StoryWidget::Input {
                field: props.build(),
                controlled: props.controlled,
            },
        }
    }
}

/// A widget built from a story.
#[derive(Debug)]
pub enum StoryWidget {
    /// Data table
    Table(DataTable),
    /// Input field; when `controlled`, proposed values are applied back.
    Input {
        /// The field
        field: InputField,
        /// Whether change messages update the value
        controlled: bool,
    },
}

impl StoryWidget {
    /// The table, if this story builds one.
    #[must_use]
    pub const fn as_table(&self) -> Option<&DataTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Input { .. } => None,
        }
    }

    /// The input field, if this story builds one.
    #[must_use]
    pub const fn as_input(&self) -> Option<&InputField> {
        match self {
            Self::Input { field, .. } => Some(field),
            Self::Table(_) => None,
        }
    }

    fn inner(&self) -> &dyn Widget {
        match self {
            Self::Table(table) => table as &dyn Widget,
            Self::Input { field, .. } => field as &dyn Widget,
        }
    }
}

impl Widget for StoryWidget {
    fn type_id(&self) -> TypeId {
        self.inner().type_id()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        self.inner().measure(constraints)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        match self {
            Self::Table(table) => table.layout(bounds),
            Self::Input { field, .. } => field.layout(bounds),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.inner().paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        match self {
            Self::Table(table) => table.event(event),
            Self::Input { field, controlled } => {
                let message = field.event(event)?;
                if *controlled {
                    if let Some(change) = message.downcast_ref::<TextChanged>() {
                        field.set_value(change.value.clone());
                    }
                }
                Some(message)
            }
        }
    }

    fn is_interactive(&self) -> bool {
        self.inner().is_interactive()
    }

    fn is_focusable(&self) -> bool {
        self.inner().is_focusable()
    }

    fn accessible_name(&self) -> Option<&str> {
        self.inner().accessible_name()
    }

    fn accessible_role(&self) -> AccessibleRole {
        self.inner().accessible_role()
    }

    fn test_id(&self) -> Option<&str> {
        self.inner().test_id()
    }

    fn bounds(&self) -> Rect {
        self.inner().bounds()
    }
}
