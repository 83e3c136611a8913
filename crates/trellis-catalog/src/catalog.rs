//! Catalog documents: parsing, `extends` resolution and lookup.

use crate::error::CatalogError;
use crate::story::{Story, StoryProps, TableProps};
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_DATA_TABLE: &str = include_str!("../stories/data_table.yaml");
const BUILTIN_INPUT_FIELD: &str = include_str!("../stories/input_field.yaml");

/// Which widget a component's stories build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// [`trellis_widgets::DataTable`]
    DataTable,
    /// [`trellis_widgets::InputField`]
    InputField,
}

impl ComponentKind {
    /// Name as written in catalog files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::DataTable => "data-table",
            Self::InputField => "input-field",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    components: Vec<RawComponent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawComponent {
    title: String,
    component: ComponentKind,
    #[serde(default)]
    stories: Vec<RawStory>,
}

#[derive(Debug, Deserialize)]
struct RawStory {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(flatten)]
    fields: Mapping,
}

/// A widget and its stories.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Display title, e.g. `Components/DataTable`
    pub title: String,
    /// Widget the stories build
    pub kind: ComponentKind,
    /// Stories in document order
    pub stories: Vec<Story>,
}

impl Component {
    /// Last segment of the title.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.title.rsplit('/').next().unwrap_or(&self.title)
    }

    /// Whether `query` names this component by title, short name or kind.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        [self.title.as_str(), self.short_name(), self.kind.slug()]
            .iter()
            .any(|name| name.eq_ignore_ascii_case(query))
    }

    /// Look up a story by exact name.
    pub fn story(&self, name: &str) -> Result<&Story, CatalogError> {
        self.stories
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::UnknownStory {
                component: self.title.clone(),
                story: name.to_string(),
            })
    }

    fn from_raw(raw: RawComponent) -> Result<Self, CatalogError> {
        let mut by_name: HashMap<&str, &RawStory> = HashMap::new();
        for story in &raw.stories {
            if by_name.insert(story.name.as_str(), story).is_some() {
                return Err(CatalogError::DuplicateStory {
                    component: raw.title.clone(),
                    story: story.name.clone(),
                });
            }
        }

        let stories = raw
            .stories
            .iter()
            .map(|story| {
                let fields = resolve_fields(&raw.title, story, &by_name)?;
                let props = parse_props(&raw.title, raw.component, &story.name, fields)?;
                Ok(Story {
                    name: story.name.clone(),
                    props,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        tracing::debug!(component = %raw.title, stories = stories.len(), "component loaded");
        Ok(Self {
            title: raw.title,
            kind: raw.component,
            stories,
        })
    }
}

/// Merge a story's fields over those of its ancestors, nearest wins.
fn resolve_fields(
    component: &str,
    story: &RawStory,
    by_name: &HashMap<&str, &RawStory>,
) -> Result<Mapping, CatalogError> {
    let mut chain = vec![story];
    let mut current = story;
    while let Some(parent) = &current.extends {
        let next = by_name
            .get(parent.as_str())
            .ok_or_else(|| CatalogError::UnknownParent {
                component: component.to_string(),
                story: current.name.clone(),
                parent: parent.clone(),
            })?;
        if let Some(start) = chain.iter().position(|s| s.name == next.name) {
            let mut names: Vec<String> = chain[start..].iter().map(|s| s.name.clone()).collect();
            names.push(next.name.clone());
            return Err(CatalogError::ExtendsCycle {
                component: component.to_string(),
                chain: names,
            });
        }
        chain.push(next);
        current = next;
    }

    let mut merged = Mapping::new();
    for link in chain.iter().rev() {
        for (key, value) in &link.fields {
            merged.insert(key.clone(), value.clone());
        }
    }
    Ok(merged)
}

fn parse_props(
    component: &str,
    kind: ComponentKind,
    story: &str,
    fields: Mapping,
) -> Result<StoryProps, CatalogError> {
    let invalid = |source| CatalogError::InvalidStory {
        component: component.to_string(),
        story: story.to_string(),
        source,
    };
    let value = Value::Mapping(fields);
    match kind {
        ComponentKind::DataTable => {
            let props: TableProps =
                serde_yaml_ng::from_value(value).map_err(invalid)?;
            if let Some(key) = props.duplicate_column() {
                return Err(CatalogError::DuplicateColumn {
                    component: component.to_string(),
                    story: story.to_string(),
                    key: key.to_string(),
                });
            }
            Ok(StoryProps::Table(props))
        }
        ComponentKind::InputField => serde_yaml_ng::from_value(value)
            .map(StoryProps::Input)
            .map_err(invalid),
    }
}

/// A validated collection of components and their stories.
///
/// # Examples
///
/// ```
/// use trellis_catalog::Catalog;
///
/// let catalog = Catalog::from_yaml(
///     r#"
/// components:
///   - title: Forms/Search
///     component: input-field
///     stories:
///       - name: Base
///         label: Search
///       - name: Big
///         extends: Base
///         size: lg
/// "#,
/// )
/// .unwrap();
///
/// let story = catalog.story("search", "Big").unwrap();
/// assert_eq!(story.build().as_input().unwrap().get_label(), Some("Search"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_yaml_ng::from_str(yaml)?;
        let components = raw
            .components
            .into_iter()
            .map(Component::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { components })
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading catalog");
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The stories shipped with the widgets.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Self::from_yaml(BUILTIN_DATA_TABLE)?;
        catalog.extend(Self::from_yaml(BUILTIN_INPUT_FIELD)?);
        Ok(catalog)
    }

    /// Append another catalog's components.
    pub fn extend(&mut self, other: Self) {
        self.components.extend(other.components);
    }

    /// All components in document order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Find a component by title, short name or kind (case-insensitive).
    pub fn component(&self, query: &str) -> Result<&Component, CatalogError> {
        self.components
            .iter()
            .find(|c| c.matches(query))
            .ok_or_else(|| CatalogError::UnknownComponent(query.to_string()))
    }

    /// Find a story of a component.
    pub fn story(&self, component: &str, story: &str) -> Result<&Story, CatalogError> {
        self.component(component)?.story(story)
    }

    /// Total number of stories.
    #[must_use]
    pub fn story_count(&self) -> usize {
        self.components.iter().map(|c| c.stories.len()).sum()
    }
}
