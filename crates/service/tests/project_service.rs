mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use staffhub_core::error::CoreError;
use staffhub_core::task_state::{StatePolicy, TaskState};
use staffhub_db::memory::{MemoryEmployeeStore, MemoryProjectStore};
use staffhub_db::models::project::ProjectInput;
use staffhub_db::store::ProjectStore;
use staffhub_service::{ProjectFilter, ProjectService};

use common::{project_input, seed_employee, services, task_input};

#[tokio::test]
async fn create_without_employee_always_succeeds() {
    let s = services();
    let project = s
        .projects
        .create(project_input("P1", None), StatePolicy::Strict)
        .await
        .unwrap();
    assert_eq!(project.version, 0);
    assert!(project.tasks.is_empty());
    assert_eq!(s.projects.get_by_id(&project.id).await.unwrap(), Some(project));
}

#[tokio::test]
async fn create_with_missing_employee_is_a_validation_error() {
    let s = services();
    let result = s
        .projects
        .create(project_input("P1", Some(77)), StatePolicy::Strict)
        .await;
    assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("77"));
}

#[tokio::test]
async fn update_replaces_every_field() {
    let s = services();
    let employee = seed_employee(&s, "A", "a@x.com").await;
    let created = s
        .projects
        .create(
            ProjectInput {
                name: Some("P1".into()),
                description: Some("first".into()),
                employee_id: Some(employee.id),
                completed: Some(true),
                tasks: Some(vec![task_input("t1", None)]),
                ..Default::default()
            },
            StatePolicy::Strict,
        )
        .await
        .unwrap();

    let updated = s
        .projects
        .update(&created.id, project_input("P1b", None), StatePolicy::Strict)
        .await
        .unwrap();
    assert_eq!(updated.name, "P1b");
    assert_eq!(updated.description, None);
    assert_eq!(updated.employee_id, None);
    assert!(!updated.completed);
    assert!(updated.tasks.is_empty());
    assert_eq!(updated.version, 1);
}

#[tokio::test]
async fn update_details_keeps_tasks() {
    let s = services();
    let mut input = project_input("P1", None);
    input.tasks = Some(vec![task_input("t1", Some("COMPLETED"))]);
    let created = s.projects.create(input, StatePolicy::Lenient).await.unwrap();

    let updated = s
        .projects
        .update_details(&created.id, project_input("Renamed", None), StatePolicy::Lenient)
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.tasks, created.tasks);
    assert_eq!(updated.version, created.version + 1);
}

#[tokio::test]
async fn update_checks_existence_and_employee() {
    let s = services();
    let missing = s
        .projects
        .update("0123456789abcdef01234567", project_input("X", None), StatePolicy::Strict)
        .await;
    assert_matches!(missing, Err(CoreError::NotFound { entity: "Project", .. }));

    let project = s
        .projects
        .create(project_input("P", None), StatePolicy::Strict)
        .await
        .unwrap();
    let dangling = s
        .projects
        .update(&project.id, project_input("P", Some(5)), StatePolicy::Strict)
        .await;
    assert_matches!(dangling, Err(CoreError::Validation(_)));
}

#[tokio::test]
async fn add_task_appends_and_keeps_order() {
    let s = services();
    let project = s
        .projects
        .create(
            ProjectInput {
                tasks: Some(vec![task_input("a", None), task_input("b", Some("completo"))]),
                ..project_input("P", None)
            },
            StatePolicy::Lenient,
        )
        .await
        .unwrap();

    s.projects
        .add_task(&project.id, task_input("c", Some("en proceso")), StatePolicy::Lenient)
        .await
        .unwrap();

    let fetched = s.projects.require(&project.id).await.unwrap();
    let titles: Vec<&str> = fetched.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    assert_eq!(fetched.tasks[1].state, TaskState::Completed);
    assert_eq!(fetched.tasks[2].state, TaskState::InProgress);
}

#[tokio::test]
async fn add_task_requires_title_and_existing_project() {
    let s = services();
    let project = s
        .projects
        .create(project_input("P", None), StatePolicy::Strict)
        .await
        .unwrap();

    let untitled = s
        .projects
        .add_task(&project.id, Default::default(), StatePolicy::Lenient)
        .await;
    assert_matches!(untitled, Err(CoreError::Validation(msg)) if msg == "Task title is required");

    let missing = s
        .projects
        .add_task("nope", task_input("t", None), StatePolicy::Lenient)
        .await;
    assert_matches!(missing, Err(CoreError::NotFound { .. }));
}

#[tokio::test]
async fn update_task_replaces_in_range_and_rejects_out_of_range() {
    let s = services();
    let project = s
        .projects
        .create(
            ProjectInput {
                tasks: Some(vec![task_input("only", None)]),
                ..project_input("P", None)
            },
            StatePolicy::Strict,
        )
        .await
        .unwrap();

    let updated = s
        .projects
        .update_task(&project.id, 0, task_input("replaced", Some("IN_REVIEW")), StatePolicy::Strict)
        .await
        .unwrap();
    assert_eq!(updated.tasks.len(), 1);
    assert_eq!(updated.tasks[0].title, "replaced");
    assert_eq!(updated.tasks[0].state, TaskState::InReview);

    let out_of_range = s
        .projects
        .update_task(&project.id, 5, task_input("x", None), StatePolicy::Strict)
        .await;
    assert_matches!(out_of_range, Err(CoreError::Validation(msg)) if msg == "Invalid task index: 5");
}

#[tokio::test]
async fn strict_policy_rejects_unknown_state() {
    let s = services();
    let project = s
        .projects
        .create(project_input("P", None), StatePolicy::Strict)
        .await
        .unwrap();

    let strict = s
        .projects
        .add_task(&project.id, task_input("t", Some("garbage")), StatePolicy::Strict)
        .await;
    assert_matches!(strict, Err(CoreError::Validation(_)));

    let lenient = s
        .projects
        .add_task(&project.id, task_input("t", Some("garbage")), StatePolicy::Lenient)
        .await
        .unwrap();
    assert_eq!(lenient.tasks[0].state, TaskState::Pending);
}

#[tokio::test]
async fn remove_task_shifts_later_tasks_down() {
    let s = services();
    let project = s
        .projects
        .create(
            ProjectInput {
                tasks: Some(vec![
                    task_input("t0", None),
                    task_input("t1", None),
                    task_input("t2", None),
                ]),
                ..project_input("P", None)
            },
            StatePolicy::Strict,
        )
        .await
        .unwrap();

    let (after, removed) = s.projects.remove_task(&project.id, 0).await.unwrap();
    assert_eq!(removed.title, "t0");
    assert_eq!(after.tasks.len(), 2);
    assert_eq!(after.tasks[0].title, "t1");
    assert_eq!(after.tasks[1].title, "t2");

    assert_matches!(
        s.projects.remove_task(&project.id, -1).await,
        Err(CoreError::Validation(_))
    );
}

#[tokio::test]
async fn stale_write_is_a_conflict() {
    let employees = Arc::new(MemoryEmployeeStore::new());
    let store = Arc::new(MemoryProjectStore::new());
    let service = ProjectService::new(store.clone(), employees);

    let project = service
        .create(project_input("P", None), StatePolicy::Strict)
        .await
        .unwrap();
    let stale = store.find_by_id(&project.id).await.unwrap().unwrap();

    // Another writer lands first and bumps the version.
    service
        .add_task(&project.id, task_input("first", None), StatePolicy::Strict)
        .await
        .unwrap();

    let err = store.replace(&stale).await.unwrap_err();
    assert_matches!(CoreError::from(err), CoreError::Conflict(msg) if msg.contains("modified concurrently"));

    let current = service.require(&project.id).await.unwrap();
    assert_eq!(current.version, 1);
    assert_eq!(current.tasks.len(), 1);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let s = services();
    let project = s
        .projects
        .create(project_input("P", None), StatePolicy::Strict)
        .await
        .unwrap();

    s.projects.delete(&project.id).await.unwrap();
    s.projects.delete(&project.id).await.unwrap();
    assert_eq!(s.projects.get_by_id(&project.id).await.unwrap(), None);
}

#[tokio::test]
async fn filters_compose_in_priority_order() {
    let s = services();
    let a = seed_employee(&s, "A", "a@x.com").await;
    let b = seed_employee(&s, "B", "b@x.com").await;
    for (name, employee, completed) in [
        ("Alpha", a.id, true),
        ("Beta", a.id, false),
        ("Gamma", b.id, true),
    ] {
        s.projects
            .create(
                ProjectInput {
                    completed: Some(completed),
                    ..project_input(name, Some(employee))
                },
                StatePolicy::Strict,
            )
            .await
            .unwrap();
    }

    let names = |projects: Vec<staffhub_db::models::project::Project>| -> Vec<String> {
        projects.into_iter().map(|p| p.name).collect()
    };

    let both = ProjectFilter {
        employee_id: Some(a.id),
        completed: Some(true),
        search: Some("gamma".into()),
    };
    assert_eq!(names(s.projects.find(&both).await.unwrap()), vec!["Alpha"]);

    let by_employee = ProjectFilter {
        employee_id: Some(a.id),
        ..Default::default()
    };
    assert_eq!(names(s.projects.find(&by_employee).await.unwrap()), vec!["Alpha", "Beta"]);

    let by_completed = ProjectFilter {
        completed: Some(true),
        ..Default::default()
    };
    assert_eq!(names(s.projects.find(&by_completed).await.unwrap()), vec!["Alpha", "Gamma"]);

    let by_name = ProjectFilter {
        search: Some("ET".into()),
        ..Default::default()
    };
    assert_eq!(names(s.projects.find(&by_name).await.unwrap()), vec!["Beta"]);

    assert_eq!(s.projects.find(&ProjectFilter::default()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn statistics_count_completed_tasks_by_state() {
    let s = services();
    s.projects
        .create(
            ProjectInput {
                completed: Some(true),
                tasks: Some(vec![
                    task_input("a", Some("COMPLETED")),
                    task_input("b", Some("PENDING")),
                ]),
                ..project_input("P1", None)
            },
            StatePolicy::Strict,
        )
        .await
        .unwrap();
    s.projects
        .create(
            ProjectInput {
                tasks: Some(vec![task_input("c", Some("completada"))]),
                ..project_input("P2", None)
            },
            StatePolicy::Lenient,
        )
        .await
        .unwrap();

    let stats = s.projects.statistics().await.unwrap();
    assert_eq!(stats.total_projects, 2);
    assert_eq!(stats.completed_projects, 1);
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.pending_tasks, 1);
}
