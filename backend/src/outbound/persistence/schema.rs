//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Projects employees are assigned to.
    projects (project_id) {
        project_id -> Int4,
        /// Unique business key (max 10 characters).
        project_code -> Varchar,
        project_name -> Varchar,
        start_date -> Date,
        end_date -> Nullable<Date>,
        /// NUMERIC(18,2), non-negative.
        budget -> Numeric,
    }
}

diesel::table! {
    /// Employees; each belongs to exactly one project.
    employees (employee_id) {
        employee_id -> Int4,
        /// Unique business key (max 8 characters).
        employee_code -> Varchar,
        full_name -> Varchar,
        /// Unique contact address.
        email -> Text,
        designation -> Varchar,
        /// NUMERIC(18,2), non-negative.
        salary -> Numeric,
        /// `ON DELETE RESTRICT` reference to `projects`.
        project_id -> Int4,
    }
}

diesel::joinable!(employees -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(employees, projects);
