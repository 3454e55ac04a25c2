//! Reusable UI components for the admin TUI

pub mod form_field;
pub mod record_list;

pub use form_field::{DropdownOption, Form, FormError, FormField, FormFieldType};
pub use record_list::RecordList;
