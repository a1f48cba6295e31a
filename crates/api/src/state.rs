use std::sync::Arc;

use staffhub_db::store::{EmployeeDirectory, EmployeeStore, ProjectStore};
use staffhub_service::{EmployeeService, ProjectService};

use crate::auth::provider::AuthProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: services and provider sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeService,
    pub projects: ProjectService,
    pub auth: Arc<dyn AuthProvider>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire both services. The employee store doubles as the directory the
    /// project service checks references against.
    pub fn new<E>(
        employee_store: Arc<E>,
        project_store: Arc<dyn ProjectStore>,
        auth: Arc<dyn AuthProvider>,
        config: ServerConfig,
    ) -> Self
    where
        E: EmployeeStore + EmployeeDirectory + 'static,
    {
        Self {
            employees: EmployeeService::new(employee_store.clone()),
            projects: ProjectService::new(project_store, employee_store),
            auth,
            config: Arc::new(config),
        }
    }
}
