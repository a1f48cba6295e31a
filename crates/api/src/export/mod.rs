//! Export tables and file-download responses.
//!
//! Both formats render the same [`Table`], so CSV and XLSX always agree on
//! columns and values.

pub mod xlsx;

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use staffhub_core::export::{Cell, Table};
use staffhub_db::models::employee::Employee;
use staffhub_db::models::project::Project;

use crate::error::{AppError, AppResult};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub fn employee_table(employees: &[Employee]) -> Table {
    let mut table = Table::new("Employees", &["ID", "Name", "Title", "Salary", "Email"]);
    for e in employees {
        table.push_row(vec![
            e.id.into(),
            e.name.as_str().into(),
            e.title.as_str().into(),
            e.salary.into(),
            e.email.as_str().into(),
        ]);
    }
    table
}

pub fn project_table(projects: &[Project]) -> Table {
    let mut table = Table::new(
        "Projects",
        &[
            "ID",
            "Name",
            "Description",
            "Employee ID",
            "Start Date",
            "Status",
            "Total Tasks",
            "Completed Tasks",
        ],
    );
    for p in projects {
        let status = if p.completed { "Completed" } else { "In progress" };
        table.push_row(vec![
            p.id.as_str().into(),
            p.name.as_str().into(),
            Cell::opt_text(p.description.as_deref()),
            p.employee_id.map_or(Cell::Empty, Cell::from),
            Cell::opt_text(p.start_date.map(|d| d.format("%Y-%m-%d"))),
            status.into(),
            p.task_count().into(),
            p.completed_task_count().into(),
        ]);
    }
    table
}

/// Build a download response with `Content-Disposition: attachment`.
pub fn attachment(content_type: &str, filename: &str, body: Vec<u8>) -> AppResult<Response> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(body))
        .map(IntoResponse::into_response)
        .map_err(|e| AppError::InternalError(format!("Failed to build download: {e}")))
}

pub fn csv_download(table: &Table, filename: &str) -> AppResult<Response> {
    attachment(CSV_CONTENT_TYPE, filename, table.to_csv().into_bytes())
}

pub fn xlsx_download(table: &Table, filename: &str) -> AppResult<Response> {
    let bytes = xlsx::write_workbook(table)
        .map_err(|e| AppError::InternalError(format!("Failed to write workbook: {e}")))?;
    attachment(xlsx::CONTENT_TYPE, filename, bytes)
}
