mod common;

use staffhub_core::task_state::StatePolicy;
use staffhub_service::report::employee_report;

use common::{employee_input, project_input, services};

#[tokio::test]
async fn deleting_an_employee_leaves_dangling_project_reference() {
    let s = services();
    let a = s
        .employees
        .create(employee_input("A", "Dev", 1000.0, "a@x.com"))
        .await
        .unwrap();
    let p1 = s
        .projects
        .create(project_input("P1", Some(a.id)), StatePolicy::Strict)
        .await
        .unwrap();

    let before = s.projects.get_by_employee(a.id).await.unwrap();
    assert_eq!(before, vec![p1.clone()]);

    s.employees.delete(a.id).await.unwrap();

    let after = s.projects.get_by_employee(a.id).await.unwrap();
    assert_eq!(after, vec![p1]);
    assert_eq!(s.employees.get_by_id(a.id).await.unwrap(), None);
}

#[tokio::test]
async fn report_aggregates_salaries_titles_and_projects() {
    let s = services();
    let a = s
        .employees
        .create(employee_input("A", "Dev", 1000.0, "a@x.com"))
        .await
        .unwrap();
    s.employees
        .create(employee_input("B", "Dev", 3000.0, "b@x.com"))
        .await
        .unwrap();
    s.employees
        .create(employee_input("C", "QA", 2000.0, "c@x.com"))
        .await
        .unwrap();
    for name in ["P1", "P2"] {
        s.projects
            .create(project_input(name, Some(a.id)), StatePolicy::Strict)
            .await
            .unwrap();
    }

    let report = employee_report(&s.employees, &s.projects).await.unwrap();
    assert_eq!(report.total_employees, 3);
    assert_eq!(report.salary.average, 2000.0);
    assert_eq!(report.salary.maximum, 3000.0);
    assert_eq!(report.salary.minimum, 1000.0);
    assert_eq!(report.employees_by_title.get("Dev"), Some(&2));
    assert_eq!(report.employees_by_title.get("QA"), Some(&1));
    assert_eq!(report.projects_per_employee[0].projects, 2);
    assert_eq!(report.projects_per_employee[1].projects, 0);
}
