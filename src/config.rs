//! Runtime configuration.

use crate::template::PlaceholderRule;
use std::path::PathBuf;

/// Directory templates are read from unless configured otherwise.
pub const DEFAULT_TEMPLATES_DIR: &str = "Templates";

/// Settings shared by every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the `.pptx` templates
    pub templates_dir: PathBuf,

    /// Placeholder pattern for both field listing and substitution
    pub placeholder_rule: PlaceholderRule,

    /// Root of the tree listing
    pub tree_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            placeholder_rule: PlaceholderRule::Greedy,
            tree_root: PathBuf::from("."),
        }
    }
}
