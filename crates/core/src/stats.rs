//! Aggregate counts for project statistics and employee reports.
//!
//! Functions take plain values rather than persisted models so they can be
//! reused by any store implementation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::task_state::TaskState;

/* --------------------------------------------------------------------------
Task statistics
-------------------------------------------------------------------------- */

/// Per-project task breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    /// Every task not in the `COMPLETED` state.
    pub pending: usize,
    pub percent_complete: f64,
}

impl TaskStats {
    pub fn from_states(states: impl IntoIterator<Item = TaskState>) -> Self {
        let (total, completed) = states
            .into_iter()
            .fold((0usize, 0usize), |(total, done), state| {
                (total + 1, done + usize::from(state.is_completed()))
            });
        Self {
            total,
            completed,
            pending: total - completed,
            percent_complete: percent(completed, total),
        }
    }
}

/// Percentage of `part` in `whole`, `0.0` when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/* --------------------------------------------------------------------------
Project statistics
-------------------------------------------------------------------------- */

/// Totals across every project, as served by `GET /projects/statistics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatistics {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub active_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
}

impl ProjectStatistics {
    /// Fold `(project_completed, task_stats)` pairs into totals.
    pub fn collect(projects: impl IntoIterator<Item = (bool, TaskStats)>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut acc, (completed, tasks)| {
                acc.total_projects += 1;
                if completed {
                    acc.completed_projects += 1;
                } else {
                    acc.active_projects += 1;
                }
                acc.total_tasks += tasks.total;
                acc.completed_tasks += tasks.completed;
                acc.pending_tasks += tasks.pending;
                acc
            })
    }
}

/* --------------------------------------------------------------------------
Employee report
-------------------------------------------------------------------------- */

/// Salary aggregates. All zero for an empty workforce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySummary {
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
}

impl SalarySummary {
    pub fn from_salaries(salaries: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut maximum = f64::MIN;
        let mut minimum = f64::MAX;
        for salary in salaries {
            count += 1;
            sum += salary;
            maximum = maximum.max(salary);
            minimum = minimum.min(salary);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            average: sum / count as f64,
            maximum,
            minimum,
        }
    }
}

/// Count occurrences of each key, sorted by key.
pub fn count_by<'a>(keys: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}
