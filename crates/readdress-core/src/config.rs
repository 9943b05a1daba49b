//! Saved-configuration record persisted by the application shell.

use crate::reconcile::SelectionRect;

/// How the target rectangle is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReplaceMode {
    /// Locate the target automatically by searching for text.
    #[default]
    Auto,
    /// Use a manually drawn selection rectangle.
    Manual,
}

/// Snapshot of the last successful configuration.
///
/// Loaded once at session start, written once per successful process action,
/// cleared on explicit user request. Not versioned: a stored record with an
/// incompatible shape fails to parse and is treated as absent.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedConfig {
    /// Selection mode of the last run.
    pub mode: ReplaceMode,
    /// Search text used in auto mode.
    pub search_text: String,
    /// Replacement text drawn over the covered box.
    pub new_address: String,
    /// Manual selection of the last run, if mode was manual.
    pub manual_selection: Option<SelectionRect>,
}
