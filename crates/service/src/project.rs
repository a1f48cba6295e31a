//! Project business rules atop a [`ProjectStore`], with employee references
//! checked through an [`EmployeeDirectory`].
//!
//! Every task mutation reads the whole project, edits its task list and
//! writes the whole document back. The write is a compare-and-swap on the
//! project version, so a concurrent writer surfaces as a `Conflict` instead
//! of a lost update.

use std::sync::Arc;

use serde::Serialize;
use staffhub_core::error::CoreError;
use staffhub_core::stats::ProjectStatistics;
use staffhub_core::task_state::StatePolicy;
use staffhub_core::types::DbId;
use staffhub_core::validation::validate_task_index;
use staffhub_db::models::project::{Project, ProjectInput, Task, TaskInput};
use staffhub_db::store::{EmployeeDirectory, ProjectStore};

const ENTITY: &str = "Project";

/// Optional listing filters, composed by [`ProjectService::find`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.completed.is_none() && self.search.is_none()
    }
}

#[derive(Clone)]
pub struct ProjectService {
    store: Arc<dyn ProjectStore>,
    employees: Arc<dyn EmployeeDirectory>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn ProjectStore>, employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { store, employees }
    }

    /// Create a project. Any referenced employee must exist right now.
    pub async fn create(
        &self,
        input: ProjectInput,
        policy: StatePolicy,
    ) -> Result<Project, CoreError> {
        let new = input.validate(policy)?;
        self.ensure_employee(new.employee_id).await?;

        let project = self.store.insert(&new).await?;
        tracing::info!(project_id = %project.id, employee_id = ?project.employee_id, "Project created");
        Ok(project)
    }

    pub async fn get_all(&self) -> Result<Vec<Project>, CoreError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Project>, CoreError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Like [`get_by_id`](Self::get_by_id) but absence is a `NotFound` error.
    pub async fn require(&self, id: &str) -> Result<Project, CoreError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))
    }

    pub async fn get_by_employee(&self, employee_id: DbId) -> Result<Vec<Project>, CoreError> {
        Ok(self.store.find_by_employee(employee_id).await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Project>, CoreError> {
        Ok(self.store.search_by_name(term.trim()).await?)
    }

    pub async fn get_by_completed(&self, completed: bool) -> Result<Vec<Project>, CoreError> {
        Ok(self.store.find_by_completed(completed).await?)
    }

    pub async fn get_by_employee_and_completed(
        &self,
        employee_id: DbId,
        completed: bool,
    ) -> Result<Vec<Project>, CoreError> {
        Ok(self
            .store
            .find_by_employee_and_completed(employee_id, completed)
            .await?)
    }

    /// Apply the first matching filter shape: employee and completion
    /// together, then either alone, then a name search, else everything.
    pub async fn find(&self, filter: &ProjectFilter) -> Result<Vec<Project>, CoreError> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (filter.employee_id, filter.completed, search) {
            (Some(employee_id), Some(completed), _) => {
                self.get_by_employee_and_completed(employee_id, completed)
                    .await
            }
            (Some(employee_id), None, _) => self.get_by_employee(employee_id).await,
            (None, Some(completed), _) => self.get_by_completed(completed).await,
            (None, None, Some(term)) => self.search_by_name(term).await,
            (None, None, None) => self.get_all().await,
        }
    }

    /// Overwrite every field, including the whole task list.
    pub async fn update(
        &self,
        id: &str,
        input: ProjectInput,
        policy: StatePolicy,
    ) -> Result<Project, CoreError> {
        self.replace_fields(id, input, policy, false).await
    }

    /// Overwrite every field but keep the current task list.
    ///
    /// Used by HTML forms, which edit tasks one at a time and never submit
    /// the list.
    pub async fn update_details(
        &self,
        id: &str,
        input: ProjectInput,
        policy: StatePolicy,
    ) -> Result<Project, CoreError> {
        self.replace_fields(id, input, policy, true).await
    }

    async fn replace_fields(
        &self,
        id: &str,
        input: ProjectInput,
        policy: StatePolicy,
        keep_tasks: bool,
    ) -> Result<Project, CoreError> {
        let mut project = self.require(id).await?;
        let mut new = input.validate(policy)?;
        self.ensure_employee(new.employee_id).await?;

        if keep_tasks {
            new.tasks = std::mem::take(&mut project.tasks);
        }
        project.apply(new);
        let project = self.store.replace(&project).await?;
        tracing::info!(project_id = %project.id, version = project.version, "Project updated");
        Ok(project)
    }

    /// Append a task to the end of the list.
    pub async fn add_task(
        &self,
        id: &str,
        input: TaskInput,
        policy: StatePolicy,
    ) -> Result<Project, CoreError> {
        let mut project = self.require(id).await?;
        let task = input.into_task(policy)?;

        project.tasks.push(task);
        let project = self.store.replace(&project).await?;
        tracing::info!(
            project_id = %project.id,
            task_index = project.tasks.len() - 1,
            "Task added"
        );
        Ok(project)
    }

    /// Replace the task at `index` wholesale.
    pub async fn update_task(
        &self,
        id: &str,
        index: i64,
        input: TaskInput,
        policy: StatePolicy,
    ) -> Result<Project, CoreError> {
        let mut project = self.require(id).await?;
        let position = validate_task_index(index, project.tasks.len())?;
        let task = input.into_task(policy)?;

        project.tasks[position] = task;
        let project = self.store.replace(&project).await?;
        tracing::info!(project_id = %project.id, task_index = position, "Task updated");
        Ok(project)
    }

    /// Remove the task at `index`. Later tasks shift down by one.
    pub async fn remove_task(&self, id: &str, index: i64) -> Result<(Project, Task), CoreError> {
        let mut project = self.require(id).await?;
        let position = validate_task_index(index, project.tasks.len())?;

        let removed = project.tasks.remove(position);
        let project = self.store.replace(&project).await?;
        tracing::info!(project_id = %project.id, task_index = position, "Task removed");
        Ok((project, removed))
    }

    /// Delete by id. Deleting an absent project is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        if self.store.delete(id).await? {
            tracing::info!(project_id = %id, "Project deleted");
        }
        Ok(())
    }

    /// Totals across every project and task.
    pub async fn statistics(&self) -> Result<ProjectStatistics, CoreError> {
        let projects = self.get_all().await?;
        Ok(ProjectStatistics::collect(
            projects.iter().map(|p| (p.completed, p.task_stats())),
        ))
    }

    pub async fn ping(&self) -> Result<(), CoreError> {
        Ok(self.store.ping().await?)
    }

    async fn ensure_employee(&self, employee_id: Option<DbId>) -> Result<(), CoreError> {
        let Some(employee_id) = employee_id else {
            return Ok(());
        };
        if !self.employees.exists(employee_id).await? {
            tracing::warn!(employee_id, "Rejected reference to missing employee");
            return Err(CoreError::Validation(format!(
                "Employee with id {employee_id} does not exist"
            )));
        }
        Ok(())
    }
}
