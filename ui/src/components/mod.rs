pub mod schema_form;
pub mod schema_viewer;
