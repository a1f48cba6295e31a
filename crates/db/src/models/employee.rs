//! Employee entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffhub_core::error::CoreError;
use staffhub_core::types::DbId;
use staffhub_core::validation::{require_text, validate_email, validate_salary};

/// A row from the `employees` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub title: String,
    pub salary: f64,
    pub email: String,
}

/// Validated, trimmed field values for an insert or a full update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub title: String,
    pub salary: f64,
    pub email: String,
}

/// Raw employee body as submitted by a client.
///
/// Any `id` in the body is ignored: inserts are store-assigned and updates
/// take the id from the path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub salary: Option<f64>,
    pub email: Option<String>,
}

impl EmployeeInput {
    pub fn validate(self) -> Result<NewEmployee, CoreError> {
        let name = self.name.unwrap_or_default();
        let title = self.title.unwrap_or_default();
        let email = self.email.unwrap_or_default();

        require_text("Name", &name)?;
        require_text("Title", &title)?;
        validate_email(&email)?;
        let salary = validate_salary(self.salary)?;

        Ok(NewEmployee {
            name: name.trim().to_string(),
            title: title.trim().to_string(),
            salary,
            email: email.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            name: Some("  Ana ".into()),
            title: Some("Dev".into()),
            salary: Some(1000.0),
            email: Some(" ana@example.com ".into()),
        }
    }

    #[test]
    fn validate_trims_fields() {
        let new = input().validate().unwrap();
        assert_eq!(new.name, "Ana");
        assert_eq!(new.email, "ana@example.com");
    }

    #[test]
    fn validate_requires_name_and_email() {
        let missing_name = EmployeeInput {
            name: None,
            ..input()
        };
        assert!(matches!(missing_name.validate(), Err(CoreError::Validation(_))));

        let missing_email = EmployeeInput {
            email: Some("".into()),
            ..input()
        };
        assert!(matches!(missing_email.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_salary() {
        let negative = EmployeeInput {
            salary: Some(-5.0),
            ..input()
        };
        assert!(negative.validate().is_err());
    }
}
