//! Query parameter types shared by the web and `/api` handlers.
//!
//! HTML filter forms submit blank fields (`?employeeId=`), so optional typed
//! parameters treat an empty string as absent.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};
use staffhub_core::types::DbId;
use staffhub_service::ProjectFilter;

/// Deserialize `""` as `None` and anything else through `FromStr`.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

/// `?search=` on employee listings.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// `?term=` on the combined name/title search.
#[derive(Debug, Deserialize)]
pub struct TermParams {
    pub term: Option<String>,
}

/// `?name=`
#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: Option<String>,
}

/// `?title=`
#[derive(Debug, Deserialize)]
pub struct TitleParams {
    pub title: Option<String>,
}

/// `?min=&max=` inclusive salary range. Both bounds are required.
#[derive(Debug, Deserialize)]
pub struct SalaryRangeParams {
    pub min: f64,
    pub max: f64,
}

/// `?employeeId=&completed=&search=` on project listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<DbId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub completed: Option<bool>,
    pub search: Option<String>,
}

impl From<ProjectListParams> for ProjectFilter {
    fn from(params: ProjectListParams) -> Self {
        ProjectFilter {
            employee_id: params.employee_id,
            completed: params.completed,
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// `?employeeId=` on project exports.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<DbId>,
}

/// Trim a required text parameter, `None` when blank.
pub fn required_term(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
