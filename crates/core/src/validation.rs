//! Input validation helpers shared by the service and HTTP layers.
//!
//! Each helper returns [`CoreError::Validation`] with a message suitable for
//! showing to the user as-is.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Reject a required text field that is empty after trimming.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a required email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    require_text("Email", email)?;
    if !email.trim().validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid email address '{}'",
            email.trim()
        )));
    }
    Ok(())
}

/// Validate a required, non-negative, finite salary.
pub fn validate_salary(salary: Option<f64>) -> Result<f64, CoreError> {
    let salary = salary.ok_or_else(|| CoreError::Validation("Salary is required".into()))?;
    if !salary.is_finite() {
        return Err(CoreError::Validation("Salary must be a number".into()));
    }
    if salary < 0.0 {
        return Err(CoreError::Validation(
            "Salary must be greater than or equal to 0".into(),
        ));
    }
    Ok(salary)
}

/// Validate an inclusive salary range filter.
pub fn validate_salary_range(min: f64, max: f64) -> Result<(), CoreError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(CoreError::Validation(
            "Salary range bounds must be numbers".into(),
        ));
    }
    if min < 0.0 || max < 0.0 {
        return Err(CoreError::Validation(
            "Salary range bounds must be non-negative".into(),
        ));
    }
    if min > max {
        return Err(CoreError::Validation(format!(
            "Minimum salary {min} is greater than maximum salary {max}"
        )));
    }
    Ok(())
}

/// Check `0 <= index < len` and return the index as a position.
pub fn validate_task_index(index: i64, len: usize) -> Result<usize, CoreError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| CoreError::Validation(format!("Invalid task index: {index}")))
}

/// Trim a value and map blank strings to `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_validation(result: Result<(), CoreError>) -> bool {
        matches!(result, Err(CoreError::Validation(_)))
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(is_validation(require_text("Name", "   ")));
        assert!(require_text("Name", "Ana").is_ok());
    }

    #[test]
    fn email_format() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(is_validation(validate_email("not-an-email")));
        assert!(is_validation(validate_email("")));
    }

    #[test]
    fn salary_bounds() {
        assert_eq!(validate_salary(Some(0.0)).unwrap(), 0.0);
        assert!(validate_salary(Some(-1.0)).is_err());
        assert!(validate_salary(Some(f64::NAN)).is_err());
        assert!(validate_salary(None).is_err());
    }

    #[test]
    fn salary_range() {
        assert!(validate_salary_range(100.0, 100.0).is_ok());
        assert!(is_validation(validate_salary_range(-1.0, 10.0)));
        assert!(is_validation(validate_salary_range(10.0, -1.0)));
        assert!(is_validation(validate_salary_range(20.0, 10.0)));
    }

    #[test]
    fn salary_range_rejects_non_finite_bounds() {
        assert!(is_validation(validate_salary_range(f64::NAN, f64::NAN)));
        assert!(is_validation(validate_salary_range(0.0, f64::INFINITY)));
        assert!(is_validation(validate_salary_range(f64::NEG_INFINITY, 10.0)));
    }

    #[test]
    fn task_index_bounds() {
        assert_eq!(validate_task_index(0, 1).unwrap(), 0);
        assert!(validate_task_index(1, 1).is_err());
        assert!(validate_task_index(-1, 3).is_err());
        assert!(validate_task_index(0, 0).is_err());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
