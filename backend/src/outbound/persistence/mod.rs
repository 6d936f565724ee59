//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel row models and
//! domain types and contain no business rules. Rows (`models.rs`) and the
//! table definitions (`schema.rs`) stay private to this module.
//!
//! ```no_run
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! use tracker::outbound::persistence::{
//!     DbPool, DieselEmployeeRepository, DieselProjectRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let employees = DieselEmployeeRepository::new(pool.clone());
//! let projects = DieselProjectRepository::new(pool);
//! # let _ = (employees, projects);
//! # Ok(())
//! # }
//! ```

mod diesel_employee_repository;
mod diesel_error_mapping;
mod diesel_project_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_project_repository::DieselProjectRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
