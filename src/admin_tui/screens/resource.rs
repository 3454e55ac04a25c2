//! Per-resource description plugged into the generic list-and-form screen

use ratatui::widgets::ListItem;
use serde::{de::DeserializeOwned, Serialize};

use crate::admin_tui::components::{Form, FormError, FormField};
use crate::api::ApiError;
use crate::models::ResourceKind;

/// Everything that differs between the four screens: endpoints (via
/// [`ResourceKind`]), field set, payload mapping, messages and rendering.
pub trait Resource: 'static {
    /// Record shape returned by the collection endpoint
    type Record: DeserializeOwned + Send + Sync + 'static;
    /// Body sent to the creation endpoint
    type Payload: Serialize + Send;

    const KIND: ResourceKind;

    /// Shown when a required field is empty
    const MISSING_FIELDS_MESSAGE: &'static str;
    /// Shown when the collection cannot be fetched
    const LOAD_FAILED_MESSAGE: &'static str;
    /// Shown when the create request fails
    const CREATE_FAILED_MESSAGE: &'static str;
    /// Prefer the backend's `error` message over the fallbacks above
    const USES_SERVER_MESSAGE: bool = false;

    /// Column headers for the CLI table
    const COLUMNS: &'static [&'static str];

    /// Declared field set, in display order. Every field is required.
    fn fields() -> Vec<FormField>;

    /// Coerce the typed form values into the create payload
    fn build_payload(form: &Form) -> Result<Self::Payload, FormError>;

    /// One record as shown in the TUI list
    fn record_item(record: &Self::Record) -> ListItem<'static>;

    /// One record as a CLI table row, matching [`Resource::COLUMNS`]
    fn table_row(record: &Self::Record) -> Vec<String>;

    /// Message for a failed request
    fn failure_message(error: &ApiError, fallback: &str) -> String {
        if Self::USES_SERVER_MESSAGE {
            if let Some(message) = error.server_message() {
                return message.to_string();
            }
        }
        fallback.to_string()
    }
}
