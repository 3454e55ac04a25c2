//! Order management screen

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use super::resource::Resource;
use crate::admin_tui::{
    components::{DropdownOption, Form, FormError, FormField, FormFieldType},
    ui::{format_timestamp, Styles},
};
use crate::models::{NewOrder, Order, ResourceKind};

/// Display class of an order status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Warning,
    Info,
    Success,
    Neutral,
}

/// Case-insensitive status → color mapping. Unknown statuses are neutral.
pub fn status_color(status: &str) -> StatusColor {
    match status.to_lowercase().as_str() {
        "pending" => StatusColor::Warning,
        "shipped" => StatusColor::Info,
        "delivered" => StatusColor::Success,
        _ => StatusColor::Neutral,
    }
}

pub struct Orders;

impl Resource for Orders {
    type Record = Order;
    type Payload = NewOrder;

    const KIND: ResourceKind = ResourceKind::Orders;
    const MISSING_FIELDS_MESSAGE: &'static str = "Please fill in all fields";
    const LOAD_FAILED_MESSAGE: &'static str = "Failed to fetch orders";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to create order";
    const COLUMNS: &'static [&'static str] = &["Order", "User", "Total", "Status", "Date"];

    fn fields() -> Vec<FormField> {
        let statuses = ["pending", "shipped", "delivered"]
            .into_iter()
            .map(|status| {
                let mut label = status.to_string();
                label[..1].make_ascii_uppercase();
                DropdownOption {
                    value: status.to_string(),
                    label,
                }
            })
            .collect();

        vec![
            FormField::new("user_id", "User ID", FormFieldType::Number).with_placeholder("Enter User ID"),
            FormField::new("total_amount", "Total Amount", FormFieldType::Number)
                .with_placeholder("Enter Total Amount"),
            FormField::new("status", "Status", FormFieldType::Dropdown)
                .with_placeholder("Select Status")
                .with_dropdown_options(statuses),
        ]
    }

    fn build_payload(form: &Form) -> Result<NewOrder, FormError> {
        Ok(NewOrder {
            user_id: form.integer("user_id")?,
            total_amount: form.number("total_amount")?,
            status: form.text("status"),
        })
    }

    fn record_item(order: &Order) -> ListItem<'static> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("User ID: ", Styles::bold()),
                Span::raw(order.user_id.to_string()),
            ]),
            Line::from(Span::styled(format!("Total: ${}", order.total_amount), Styles::success())),
            Line::from(Span::styled(
                format!("Status: {}", order.status),
                Styles::status(status_color(&order.status)),
            )),
        ];
        if let Some(date) = &order.order_date {
            lines.push(Line::from(Span::styled(format_timestamp(date), Styles::inactive())));
        }
        lines.push(Line::from(""));
        ListItem::new(lines)
    }

    fn table_row(order: &Order) -> Vec<String> {
        vec![
            order.order_id.to_string(),
            order.user_id.to_string(),
            order.total_amount.to_string(),
            order.status.clone(),
            order.order_date.as_deref().map(format_timestamp).unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_tui::screens::{ListFormScreen, SubmitOutcome};
    use crate::api::testing::{Call, ScriptedBackend};
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
    use serde_json::json;

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(screen: &mut ListFormScreen<Orders>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| screen.draw(f, f.size())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_status_color_is_case_insensitive() {
        for status in ["PENDING", "Pending", "pending"] {
            assert_eq!(status_color(status), StatusColor::Warning);
        }
        assert_eq!(status_color("Shipped"), StatusColor::Info);
        assert_eq!(status_color("DELIVERED"), StatusColor::Success);
        assert_eq!(status_color("cancelled"), StatusColor::Neutral);
        assert_eq!(status_color(""), StatusColor::Neutral);
    }

    #[test]
    fn test_status_options_are_labelled() {
        let fields = Orders::fields();
        let status = fields.iter().find(|field| field.key == "status").unwrap();
        let labels: Vec<&str> = status.dropdown_options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Pending", "Shipped", "Delivered"]);
    }

    #[test]
    fn test_payload_coerces_types() {
        let mut form = Form::new(Orders::fields());
        form.set_value("user_id", "3");
        form.set_value("total_amount", "25.5");
        form.set_value("status", "pending");

        let body = serde_json::to_value(Orders::build_payload(&form).unwrap()).unwrap();
        assert_eq!(body, json!({ "user_id": 3, "total_amount": 25.5, "status": "pending" }));
    }

    #[tokio::test]
    async fn test_create_order_scenario() {
        let backend = ScriptedBackend::new()
            .on_get(json!([]))
            .on_post_ok()
            .on_get(json!([
                { "order_id": 1, "user_id": 3, "total_amount": 25.5, "status": "pending" }
            ]));
        let mut screen = ListFormScreen::<Orders>::new();

        screen.mount(&backend).await;
        assert!(screen.records().is_empty());
        assert!(render(&mut screen).contains("No orders found"));

        screen.form.set_value("user_id", "3");
        screen.form.set_value("total_amount", "25.5");
        screen.form.set_value("status", "pending");
        assert_eq!(screen.submit(&backend).await, SubmitOutcome::Created);

        let calls = backend.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[1],
            Call::Post(
                "/createOrders".to_string(),
                json!({ "user_id": 3, "total_amount": 25.5, "status": "pending" })
            )
        );

        assert_eq!(screen.records().len(), 1);
        let order = screen.records()[0].clone();
        assert_eq!(order.user_id, 3);
        assert_eq!(Orders::table_row(&order)[2], "25.5");

        let text = render(&mut screen);
        assert!(text.contains("Total: $25.5"));
        assert!(text.contains("Status: pending"));
        assert!(!text.contains("No orders found"));
    }

    #[test]
    fn test_record_item_uses_status_color() {
        let order = Order {
            order_id: 1,
            user_id: 3,
            total_amount: 25.5,
            status: "pending".to_string(),
            order_date: None,
        };

        let mut screen = ListFormScreen::<Orders>::new();
        screen.records.set_items(vec![order]);

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| screen.draw(f, f.size())).unwrap();
        let buffer = terminal.backend().buffer();
        let text = buffer_text(buffer);

        let width = buffer.area.width as usize;
        let row = text.lines().position(|line| line.contains("Status: pending")).unwrap();
        let col = text.lines().nth(row).unwrap().find("Status: pending").unwrap();
        // Everything left of the match is single-width ASCII or box drawing
        let col = text.lines().nth(row).unwrap()[..col].chars().count();
        assert_eq!(buffer.content[row * width + col].fg, Color::Yellow);
    }
}
