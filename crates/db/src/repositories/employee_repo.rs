//! Repository for the `employees` table.

use async_trait::async_trait;
use sqlx::PgPool;
use staffhub_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::models::employee::{Employee, NewEmployee};
use crate::store::{EmployeeDirectory, EmployeeStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, title, salary, email";

/// Provides CRUD and search operations for employees.
#[derive(Clone)]
pub struct EmployeeRepo {
    pool: PgPool,
}

impl EmployeeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_like(&self, predicate: &str, term: &str) -> StoreResult<Vec<Employee>> {
        let query =
            format!("SELECT {COLUMNS} FROM employees WHERE {predicate} ORDER BY id ASC");
        let rows = sqlx::query_as::<_, Employee>(&query)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Map a unique-constraint violation (SQLSTATE 23505 on a `uq_` constraint)
/// to [`StoreError::Duplicate`].
fn map_write_error(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let is_unique = db_err.code().as_deref() == Some("23505")
            && db_err.constraint().is_some_and(|c| c.starts_with("uq_"));
        if is_unique {
            return StoreError::Duplicate(format!(
                "An employee with email '{email}' already exists"
            ));
        }
    }
    StoreError::Sql(err)
}

#[async_trait]
impl EmployeeDirectory for EmployeeRepo {
    async fn exists(&self, id: DbId) -> StoreResult<bool> {
        let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}

#[async_trait]
impl EmployeeStore for EmployeeRepo {
    async fn find_all(&self) -> StoreResult<Vec<Employee>> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY id ASC");
        Ok(sqlx::query_as::<_, Employee>(&query)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Employee>> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        Ok(sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE email = $1");
        Ok(sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn search_name_or_title(&self, term: &str) -> StoreResult<Vec<Employee>> {
        self.fetch_like("name ILIKE $1 ESCAPE '\\' OR title ILIKE $1 ESCAPE '\\'", term)
            .await
    }

    async fn search_by_name(&self, term: &str) -> StoreResult<Vec<Employee>> {
        self.fetch_like("name ILIKE $1 ESCAPE '\\'", term).await
    }

    async fn search_by_title(&self, term: &str) -> StoreResult<Vec<Employee>> {
        self.fetch_like("title ILIKE $1 ESCAPE '\\'", term).await
    }

    async fn find_by_salary_range(&self, min: f64, max: f64) -> StoreResult<Vec<Employee>> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees \
             WHERE salary BETWEEN $1 AND $2 \
             ORDER BY salary DESC, id ASC"
        );
        Ok(sqlx::query_as::<_, Employee>(&query)
            .bind(min)
            .bind(max)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn insert(&self, employee: &NewEmployee) -> StoreResult<Employee> {
        let query = format!(
            "INSERT INTO employees (name, title, salary, email) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(&employee.name)
            .bind(&employee.title)
            .bind(employee.salary)
            .bind(&employee.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &employee.email))
    }

    async fn update(&self, id: DbId, employee: &NewEmployee) -> StoreResult<Option<Employee>> {
        let query = format!(
            "UPDATE employees SET name = $2, title = $3, salary = $4, email = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&employee.name)
            .bind(&employee.title)
            .bind(employee.salary)
            .bind(&employee.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &employee.email))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
