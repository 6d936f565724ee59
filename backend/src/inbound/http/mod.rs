//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod employees;
pub mod error;
pub mod health;
pub mod projects;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register the employee and project resources together with the extractor
/// configuration their error mapping relies on.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use tracker::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState) {
///     let _app = App::new()
///         .app_data(web::Data::new(state))
///         .configure(configure);
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(employees::list_employees)
        .service(employees::get_employee)
        .service(employees::create_employee)
        .service(employees::update_employee)
        .service(employees::delete_employee)
        .service(projects::list_projects)
        .service(projects::get_project)
        .service(projects::create_project)
        .service(projects::update_project)
        .service(projects::delete_project);
}
