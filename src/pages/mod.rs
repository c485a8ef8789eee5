//! Page objects.

/// The practice "Form Fields" page.
pub mod form_fields;

pub use form_fields::FormFieldsPage;
