//! User management screen

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use super::resource::Resource;
use crate::admin_tui::{
    components::{Form, FormError, FormField, FormFieldType},
    ui::Styles,
};
use crate::models::{NewUser, ResourceKind, User};

pub struct Users;

impl Resource for Users {
    type Record = User;
    type Payload = NewUser;

    const KIND: ResourceKind = ResourceKind::Users;
    const MISSING_FIELDS_MESSAGE: &'static str = "All fields are required";
    const LOAD_FAILED_MESSAGE: &'static str = "Failed to fetch users";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to create user";
    const COLUMNS: &'static [&'static str] = &["User", "Username", "Email"];

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FormFieldType::Text).with_placeholder("Enter Name"),
            FormField::new("email", "Email", FormFieldType::Text).with_placeholder("Enter Email"),
            FormField::new("password", "Password", FormFieldType::Password).with_placeholder("Enter Password"),
        ]
    }

    fn build_payload(form: &Form) -> Result<NewUser, FormError> {
        Ok(NewUser {
            name: form.text("name"),
            email: form.text("email"),
            password: form.text("password"),
        })
    }

    fn record_item(user: &User) -> ListItem<'static> {
        ListItem::new(vec![
            Line::from(Span::styled(user.username.clone(), Styles::bold())),
            Line::from(Span::styled(user.email.clone(), Styles::inactive())),
            Line::from(""),
        ])
    }

    fn table_row(user: &User) -> Vec<String> {
        vec![user.user_id.to_string(), user.username.clone(), user.email.clone()]
    }
}
