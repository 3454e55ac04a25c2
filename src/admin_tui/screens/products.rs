//! Product management screen

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use super::resource::Resource;
use crate::admin_tui::{
    components::{Form, FormError, FormField, FormFieldType},
    ui::Styles,
};
use crate::models::{NewProduct, Product, ResourceKind};

pub struct Products;

impl Resource for Products {
    type Record = Product;
    type Payload = NewProduct;

    const KIND: ResourceKind = ResourceKind::Products;
    const MISSING_FIELDS_MESSAGE: &'static str = "All fields are required";
    const LOAD_FAILED_MESSAGE: &'static str = "Failed to load products";
    const CREATE_FAILED_MESSAGE: &'static str = "Failed to create product";
    const COLUMNS: &'static [&'static str] = &["Product", "Name", "Price", "Stock", "Description"];

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Product Name", FormFieldType::Text).with_placeholder("Enter Product Name"),
            FormField::new("price", "Price", FormFieldType::Number).with_placeholder("Enter Price"),
            FormField::new("stock", "Stock", FormFieldType::Number).with_placeholder("Enter Stock"),
            FormField::new("description", "Description", FormFieldType::TextArea)
                .with_placeholder("Enter Product Description"),
        ]
    }

    fn build_payload(form: &Form) -> Result<NewProduct, FormError> {
        Ok(NewProduct {
            product_name: form.text("name"),
            description: form.text("description"),
            price: form.non_negative_number("price")?,
            stock: form.non_negative_integer("stock")?,
        })
    }

    fn record_item(product: &Product) -> ListItem<'static> {
        ListItem::new(vec![
            Line::from(Span::styled(product.product_name.clone(), Styles::bold())),
            Line::from(product.description.clone()),
            Line::from(Span::styled(format!("Price: ${}", product.price), Styles::success())),
            Line::from(Span::styled(format!("Stock: {}", product.stock), Styles::warning())),
            Line::from(""),
        ])
    }

    fn table_row(product: &Product) -> Vec<String> {
        vec![
            product.product_id.to_string(),
            product.product_name.clone(),
            product.price.to_string(),
            product.stock.to_string(),
            product.description.clone(),
        ]
    }
}
