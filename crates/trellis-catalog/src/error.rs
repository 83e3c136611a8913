//! Catalog errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid YAML or does not match the catalog shape.
    #[error("invalid catalog YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A story's resolved properties do not fit its component.
    #[error("story '{component}/{story}' is invalid: {source}")]
    InvalidStory {
        /// Component title
        component: String,
        /// Story name
        story: String,
        /// Underlying error
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// Two stories of one component share a name.
    #[error("component '{component}' defines story '{story}' more than once")]
    DuplicateStory {
        /// Component title
        component: String,
        /// Repeated story name
        story: String,
    },

    /// Two columns of one table story share a key.
    #[error("story '{component}/{story}' defines column '{key}' more than once")]
    DuplicateColumn {
        /// Component title
        component: String,
        /// Story name
        story: String,
        /// Repeated column key
        key: String,
    },

    /// `extends` names a story that does not exist in the component.
    #[error("story '{component}/{story}' extends unknown story '{parent}'")]
    UnknownParent {
        /// Component title
        component: String,
        /// Story name
        story: String,
        /// Missing parent
        parent: String,
    },

    /// `extends` chains loop back on themselves.
    #[error("stories of '{component}' extend each other in a cycle: {}", chain.join(" -> "))]
    ExtendsCycle {
        /// Component title
        component: String,
        /// Story names along the cycle, first one repeated at the end
        chain: Vec<String>,
    },

    /// No story with this name in the component.
    #[error("component '{component}' has no story '{story}'")]
    UnknownStory {
        /// Component title
        component: String,
        /// Requested story
        story: String,
    },

    /// No component matches the query.
    #[error("no component named '{0}'")]
    UnknownComponent(String),
}
