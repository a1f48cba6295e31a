//! Task lifecycle states and free-text coercion.
//!
//! Older clients submit states as loose text ("completo", "en proceso",
//! "pendiente"). Two entry points share one rule set:
//!
//! - [`TaskState::coerce`] never fails: unknown text becomes [`TaskState::Pending`].
//! - [`TaskState::parse_strict`] rejects text no rule recognises.
//!
//! Rules, applied to the trimmed, lower-cased input in this order:
//!
//! ```text
//! contains "complet"                        -> COMPLETED
//! contains "pend"                           -> PENDING
//! contains "rev"                            -> IN_REVIEW
//! contains "cancel"                         -> CANCELLED
//! contains "progres" / "proceso" / "progreso" -> IN_PROGRESS
//! ```
//!
//! Then the input is upper-cased with spaces and hyphens replaced by
//! underscores and matched exactly against the canonical and legacy names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Enum
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    #[default]
    Pending,
    InProgress,
    InReview,
    Completed,
    Cancelled,
}

/// Every state in lifecycle order.
pub const ALL_TASK_STATES: [TaskState; 5] = [
    TaskState::Pending,
    TaskState::InProgress,
    TaskState::InReview,
    TaskState::Completed,
    TaskState::Cancelled,
];

/// Ordered substring rules. The first fragment found wins.
const SUBSTRING_RULES: &[(&[&str], TaskState)] = &[
    (&["complet"], TaskState::Completed),
    (&["pend"], TaskState::Pending),
    (&["rev"], TaskState::InReview),
    (&["cancel"], TaskState::Cancelled),
    (&["progres", "proceso", "progreso"], TaskState::InProgress),
];

/// Upper-case enum names from the legacy Spanish schema.
const LEGACY_NAMES: &[(&str, TaskState)] = &[
    ("PENDIENTE", TaskState::Pending),
    ("EN_PROGRESO", TaskState::InProgress),
    ("EN_REVISION", TaskState::InReview),
    ("COMPLETADA", TaskState::Completed),
    ("CANCELADA", TaskState::Cancelled),
];

impl TaskState {
    /// Canonical wire/storage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Lenient coercion used by form bindings and stored documents.
    ///
    /// Returns `None` only for empty input; unrecognised text falls back to
    /// [`TaskState::Pending`].
    pub fn coerce(input: &str) -> Option<Self> {
        match classify(input) {
            Classified::Empty => None,
            Classified::Matched(state) => Some(state),
            Classified::Unrecognized => Some(Self::Pending),
        }
    }

    /// Strict parse used by the JSON API.
    ///
    /// Empty input is `Ok(None)` so the caller can apply its default.
    pub fn parse_strict(input: &str) -> Result<Option<Self>, CoreError> {
        match classify(input) {
            Classified::Empty => Ok(None),
            Classified::Matched(state) => Ok(Some(state)),
            Classified::Unrecognized => Err(CoreError::Validation(format!(
                "Unrecognized task state '{}'. Must be one of: {}",
                input.trim(),
                ALL_TASK_STATES
                    .iter()
                    .map(TaskState::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Resolve optional free text under `policy`, defaulting to `PENDING`.
    pub fn resolve(input: Option<&str>, policy: StatePolicy) -> Result<Self, CoreError> {
        let Some(raw) = input else {
            return Ok(Self::default());
        };
        let state = match policy {
            StatePolicy::Lenient => Self::coerce(raw),
            StatePolicy::Strict => Self::parse_strict(raw)?,
        };
        Ok(state.unwrap_or_default())
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// How an entry point treats state text no rule recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePolicy {
    /// Fall back to `PENDING` (web forms, legacy clients).
    Lenient,
    /// Reject with a validation error (JSON API).
    Strict,
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored documents may carry legacy text, so decoding is lenient.
impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::coerce(&raw).unwrap_or_default())
    }
}

/* --------------------------------------------------------------------------
Classification
-------------------------------------------------------------------------- */

enum Classified {
    Empty,
    Matched(TaskState),
    Unrecognized,
}

fn classify(input: &str) -> Classified {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Classified::Empty;
    }

    let lowered = trimmed.to_lowercase();
    for (fragments, state) in SUBSTRING_RULES {
        if fragments.iter().any(|f| lowered.contains(f)) {
            return Classified::Matched(*state);
        }
    }

    let normalized = trimmed.to_uppercase().replace([' ', '-'], "_");
    if let Some(state) = ALL_TASK_STATES
        .iter()
        .find(|s| s.as_str() == normalized)
    {
        return Classified::Matched(*state);
    }
    if let Some((_, state)) = LEGACY_NAMES.iter().find(|(name, _)| *name == normalized) {
        return Classified::Matched(*state);
    }

    Classified::Unrecognized
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_spanish_forms() {
        assert_eq!(TaskState::coerce("completo"), Some(TaskState::Completed));
        assert_eq!(TaskState::coerce("en proceso"), Some(TaskState::InProgress));
        assert_eq!(TaskState::coerce("pendiente"), Some(TaskState::Pending));
        assert_eq!(TaskState::coerce("EN_REVISION"), Some(TaskState::InReview));
        assert_eq!(TaskState::coerce("Cancelada"), Some(TaskState::Cancelled));
        assert_eq!(TaskState::coerce("en progreso"), Some(TaskState::InProgress));
    }

    #[test]
    fn canonical_names_round_trip() {
        for state in ALL_TASK_STATES {
            assert_eq!(TaskState::coerce(state.as_str()), Some(state));
            assert_eq!(TaskState::parse_strict(state.as_str()).unwrap(), Some(state));
        }
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(TaskState::coerce("  In-Progress "), Some(TaskState::InProgress));
        assert_eq!(TaskState::coerce("COMPLETED"), Some(TaskState::Completed));
    }

    #[test]
    fn first_matching_rule_wins() {
        // Contains both "complet" and "pend"; "complet" is checked first.
        assert_eq!(
            TaskState::coerce("pending completion"),
            Some(TaskState::Completed)
        );
        // "rev" beats "progres".
        assert_eq!(
            TaskState::coerce("review in progress"),
            Some(TaskState::InReview)
        );
    }

    #[test]
    fn empty_input_is_absent() {
        assert_eq!(TaskState::coerce(""), None);
        assert_eq!(TaskState::coerce("   "), None);
        assert_eq!(TaskState::parse_strict("  ").unwrap(), None);
    }

    #[test]
    fn lenient_falls_back_to_pending() {
        assert_eq!(TaskState::coerce("garbage"), Some(TaskState::Pending));
    }

    #[test]
    fn strict_rejects_unrecognized() {
        let err = TaskState::parse_strict("garbage").unwrap_err();
        match err {
            CoreError::Validation(msg) => assert!(msg.contains("garbage")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn resolve_applies_policy_and_default() {
        assert_eq!(
            TaskState::resolve(None, StatePolicy::Strict).unwrap(),
            TaskState::Pending
        );
        assert_eq!(
            TaskState::resolve(Some("terminado?"), StatePolicy::Lenient).unwrap(),
            TaskState::Pending
        );
        assert!(TaskState::resolve(Some("terminado?"), StatePolicy::Strict).is_err());
        assert_eq!(
            TaskState::resolve(Some("completo"), StatePolicy::Strict).unwrap(),
            TaskState::Completed
        );
    }

    #[test]
    fn serializes_canonical_name() {
        let json = serde_json::to_string(&TaskState::InReview).unwrap();
        assert_eq!(json, "\"IN_REVIEW\"");
    }

    #[test]
    fn deserializes_leniently() {
        let state: TaskState = serde_json::from_str("\"completo\"").unwrap();
        assert_eq!(state, TaskState::Completed);
        let state: TaskState = serde_json::from_str("\"\"").unwrap();
        assert_eq!(state, TaskState::Pending);
    }
}
