//! Project document model with its embedded tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use staffhub_core::error::CoreError;
use staffhub_core::stats::TaskStats;
use staffhub_core::task_state::{StatePolicy, TaskState};
use staffhub_core::types::{DbId, DocumentId};
use staffhub_core::validation::{non_blank, require_text};

/* --------------------------------------------------------------------------
Task
-------------------------------------------------------------------------- */

/// A work item embedded in a project, identified by its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: TaskState,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_employee_id: Option<DbId>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Raw task body. The state is free text resolved under a [`StatePolicy`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub assigned_employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub comments: Option<String>,
}

impl TaskInput {
    pub fn into_task(self, policy: StatePolicy) -> Result<Task, CoreError> {
        let title = self.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(CoreError::Validation("Task title is required".into()));
        }
        let state = TaskState::resolve(self.state.as_deref(), policy)?;

        Ok(Task {
            title: title.trim().to_string(),
            state,
            description: non_blank(self.description),
            assigned_employee_id: self.assigned_employee_id,
            start_date: self.start_date,
            due_date: self.due_date,
            completion_date: self.completion_date,
            comments: non_blank(self.comments),
        })
    }
}

/* --------------------------------------------------------------------------
Project
-------------------------------------------------------------------------- */

/// A project as stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DocumentId,
    pub name: String,
    pub description: Option<String>,
    /// Checked against the employee store on write only; may dangle.
    pub employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub completed: bool,
    pub tasks: Vec<Task>,
    /// Incremented by every successful replace.
    pub version: i64,
}

impl Project {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_task_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.state.is_completed()).count()
    }

    pub fn task_stats(&self) -> TaskStats {
        TaskStats::from_states(self.tasks.iter().map(|t| t.state))
    }

    /// Overwrite every mutable field. Fields absent from `new` are cleared.
    pub fn apply(&mut self, new: NewProject) {
        self.name = new.name;
        self.description = new.description;
        self.employee_id = new.employee_id;
        self.start_date = new.start_date;
        self.completed = new.completed;
        self.tasks = new.tasks;
    }
}

/// Validated field values for an insert or a wholesale replace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub completed: bool,
    pub tasks: Vec<Task>,
}

/// Raw project body as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub employee_id: Option<DbId>,
    pub start_date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub tasks: Option<Vec<TaskInput>>,
}

impl ProjectInput {
    pub fn validate(self, policy: StatePolicy) -> Result<NewProject, CoreError> {
        let name = self.name.unwrap_or_default();
        require_text("Name", &name)?;

        let tasks = self
            .tasks
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into_task(policy))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewProject {
            name: name.trim().to_string(),
            description: non_blank(self.description),
            employee_id: self.employee_id,
            start_date: self.start_date,
            completed: self.completed.unwrap_or(false),
            tasks,
        })
    }
}
