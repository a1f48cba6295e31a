//! Success envelope for the `/api` surface.
//!
//! `{ "success": true, "message": ..., "data": ..., "total"?: n, "filters"?: {..} }`.
//! Task mutations add `taskIndex`. Errors use the same outer shape via
//! [`AppError`](crate::error::AppError).

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_index: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            total: None,
            filters: None,
            task_index: None,
        }
    }

    /// Echo the filters that produced this result.
    ///
    /// Null entries are removed; an object left empty is dropped entirely.
    pub fn with_filters(mut self, mut filters: Value) -> Self {
        if let Value::Object(map) = &mut filters {
            map.retain(|_, v| !v.is_null());
            if map.is_empty() {
                return self;
            }
        }
        if !filters.is_null() {
            self.filters = Some(filters);
        }
        self
    }

    pub fn with_task_index(mut self, index: usize) -> Self {
        self.task_index = Some(index);
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// A list result with `total` set to its length.
    pub fn list(message: impl Into<String>, data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            total: Some(total),
            ..Self::ok(message, data)
        }
    }
}
