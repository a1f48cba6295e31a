//! Repository for the `projects` collection.
//!
//! Documents use camelCase field names and a native `_id`, rendered to the
//! rest of the system as a 24-character hex string.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use staffhub_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::models::project::{NewProject, Project, Task};
use crate::store::ProjectStore;

const COLLECTION: &str = "projects";

/// Stored shape of a project. Legacy documents may lack `version` or carry
/// `tasks: null`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    employee_id: Option<DbId>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    tasks: Option<Vec<Task>>,
    #[serde(default)]
    version: i64,
}

impl ProjectDocument {
    fn from_new(project: &NewProject) -> Self {
        Self {
            id: None,
            name: project.name.clone(),
            description: project.description.clone(),
            employee_id: project.employee_id,
            start_date: project.start_date,
            completed: project.completed,
            tasks: Some(project.tasks.clone()),
            version: 0,
        }
    }

    fn into_project(self) -> StoreResult<Project> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Malformed("project document without _id".into()))?;
        Ok(Project {
            id: id.to_hex(),
            name: self.name,
            description: self.description,
            employee_id: self.employee_id,
            start_date: self.start_date,
            completed: self.completed,
            tasks: self.tasks.unwrap_or_default(),
            version: self.version,
        })
    }
}

/// Provides CRUD and predicate queries for projects.
#[derive(Clone)]
pub struct ProjectRepo {
    db: Database,
    collection: Collection<ProjectDocument>,
}

impl ProjectRepo {
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<ProjectDocument>(COLLECTION);
        Self { db, collection }
    }

    /// Create the secondary indexes used by the employee and completion filters.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let models = vec![
            IndexModel::builder().keys(doc! { "employeeId": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "employeeId": 1, "completed": 1 })
                .build(),
        ];
        self.collection.create_indexes(models).await?;
        Ok(())
    }

    async fn find_many(&self, filter: Document) -> StoreResult<Vec<Project>> {
        let docs: Vec<ProjectDocument> = self
            .collection
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(ProjectDocument::into_project).collect()
    }
}

/// Compare-and-swap filter on `_id` and `version`. A missing `version`
/// field counts as version 0.
fn replace_filter(oid: ObjectId, version: i64) -> Document {
    if version == 0 {
        doc! {
            "_id": oid,
            "$or": [ { "version": 0_i64 }, { "version": { "$exists": false } } ],
        }
    } else {
        doc! { "_id": oid, "version": version }
    }
}

/// Case-insensitive substring regex with the term matched literally.
fn contains_ignore_case(term: &str) -> Document {
    doc! { "$regex": regex::escape(term), "$options": "i" }
}

#[async_trait]
impl ProjectStore for ProjectRepo {
    async fn find_all(&self) -> StoreResult<Vec<Project>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Project>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(ProjectDocument::into_project)
            .transpose()
    }

    async fn find_by_employee(&self, employee_id: DbId) -> StoreResult<Vec<Project>> {
        self.find_many(doc! { "employeeId": employee_id }).await
    }

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Project>> {
        self.find_many(doc! { "name": contains_ignore_case(term) })
            .await
    }

    async fn find_by_completed(&self, completed: bool) -> StoreResult<Vec<Project>> {
        self.find_many(doc! { "completed": completed }).await
    }

    async fn find_by_employee_and_completed(
        &self,
        employee_id: DbId,
        completed: bool,
    ) -> StoreResult<Vec<Project>> {
        self.find_many(doc! { "employeeId": employee_id, "completed": completed })
            .await
    }

    async fn insert(&self, project: &NewProject) -> StoreResult<Project> {
        let mut document = ProjectDocument::from_new(project);
        let result = self.collection.insert_one(&document).await?;
        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Malformed("inserted _id is not an ObjectId".into()))?;
        document.id = Some(oid);
        document.into_project()
    }

    async fn replace(&self, project: &Project) -> StoreResult<Project> {
        let conflict = || StoreError::VersionConflict {
            id: project.id.clone(),
        };
        let oid = ObjectId::parse_str(&project.id).map_err(|_| conflict())?;

        let next = ProjectDocument {
            id: Some(oid),
            name: project.name.clone(),
            description: project.description.clone(),
            employee_id: project.employee_id,
            start_date: project.start_date,
            completed: project.completed,
            tasks: Some(project.tasks.clone()),
            version: project.version + 1,
        };

        let result = self
            .collection
            .replace_one(replace_filter(oid, project.version), &next)
            .await?;
        if result.matched_count == 0 {
            return Err(conflict());
        }
        next.into_project()
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn legacy_document_decodes_with_defaults() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Legacy",
            "tasks": bson::Bson::Null,
        };
        let document: ProjectDocument = bson::from_document(raw).unwrap();
        let project = document.into_project().unwrap();
        assert_eq!(project.version, 0);
        assert!(project.tasks.is_empty());
        assert!(!project.completed);
        assert_eq!(project.id.len(), 24);
    }

    #[test]
    fn legacy_task_state_is_coerced() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "name": "Legacy",
            "tasks": [ { "title": "t", "state": "completo" } ],
        };
        let document: ProjectDocument = bson::from_document(raw).unwrap();
        let project = document.into_project().unwrap();
        assert!(project.tasks[0].state.is_completed());
    }

    #[test]
    fn version_zero_matches_missing_field() {
        let oid = ObjectId::new();
        assert!(replace_filter(oid, 0).contains_key("$or"));
        assert_eq!(
            replace_filter(oid, 3),
            doc! { "_id": oid, "version": 3_i64 }
        );
    }

    #[test]
    fn regex_escapes_term() {
        let filter = contains_ignore_case("a.b");
        assert_eq!(filter.get_str("$regex").unwrap(), "a\\.b");
        assert_eq!(filter.get_str("$options").unwrap(), "i");
    }
}
