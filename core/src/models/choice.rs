//! Choice-list models for selection widgets.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// What a refresh group asks the lister for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMode {
    /// Subdirectories of the root.
    Directory,
    /// Files under the root, filtered by extension.
    Files,
}

impl FromStr for ListMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directory" => Ok(ListMode::Directory),
            "files" => Ok(ListMode::Files),
            other => Err(Error::InvalidRefreshSpec(format!(
                "unknown mode `{other}` (expected `directory` or `files`)"
            ))),
        }
    }
}

/// One updated choice list for a selection widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceUpdate {
    /// Unique identifier for this update instance.
    pub id: Uuid,

    /// Directory the choices were listed from.
    pub root: PathBuf,

    /// Whether the list holds directories or files.
    pub mode: ListMode,

    /// The entries to offer, in ascending path order.
    pub choices: Vec<PathBuf>,
}

impl ChoiceUpdate {
    pub fn new(root: PathBuf, mode: ListMode, choices: Vec<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            root,
            mode,
            choices,
        }
    }
}

/// Result of a refresh: one update or several, in input-group order.
///
/// The widget binding layer rejects a one-element sequence where it expects
/// a lone value, so `Single` serializes as a plain object while `Multiple`
/// serializes as an array. The collapsing lives here, at the boundary type,
/// never inside the refresh logic itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSet {
    Single(ChoiceUpdate),
    Multiple(Vec<ChoiceUpdate>),
}

impl ChoiceSet {
    /// Collapse a one-element batch into `Single`, keep the rest as-is.
    pub fn from_updates(mut updates: Vec<ChoiceUpdate>) -> Self {
        if updates.len() == 1 {
            ChoiceSet::Single(updates.remove(0))
        } else {
            ChoiceSet::Multiple(updates)
        }
    }

    /// Uniform view over the contained updates.
    pub fn updates(&self) -> &[ChoiceUpdate] {
        match self {
            ChoiceSet::Single(update) => std::slice::from_ref(update),
            ChoiceSet::Multiple(updates) => updates,
        }
    }

    pub fn len(&self) -> usize {
        self.updates().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates().is_empty()
    }
}
