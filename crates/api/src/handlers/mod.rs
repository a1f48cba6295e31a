pub mod auth;
pub mod employee;
pub mod employee_api;
pub mod export;
pub mod project;
pub mod project_api;
pub mod web;
