use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order as returned by `GET /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "lenient_i64")]
    pub order_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub user_id: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub order_date: Option<String>,
}

/// Product as returned by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient_i64")]
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_i64")]
    pub stock: i64,
}

/// Review as returned by `GET /reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(deserialize_with = "lenient_i64")]
    pub review_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub user_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub product_id: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub rating: i64,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// User as returned by `GET /users`. The password is write-only and is
/// never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "lenient_i64")]
    pub user_id: i64,
    #[serde(alias = "name")]
    pub username: String,
    pub email: String,
}

/// Body of `POST /createOrders`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub user_id: i64,
    pub total_amount: f64,
    pub status: String,
}

/// Body of `POST /createProducts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

/// Body of `POST /createReviews`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub user_id: i64,
    pub product_id: i64,
    pub rating: u8,
    pub review_text: String,
}

/// Body of `POST /createUsers`
#[derive(Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The four resources managed by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Orders,
    Products,
    Reviews,
    Users,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Orders,
        ResourceKind::Products,
        ResourceKind::Reviews,
        ResourceKind::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "orders",
            ResourceKind::Products => "products",
            ResourceKind::Reviews => "reviews",
            ResourceKind::Users => "users",
        }
    }

    /// Label used in the tab bar
    pub fn tab_label(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "Orders",
            ResourceKind::Products => "Products",
            ResourceKind::Reviews => "Reviews",
            ResourceKind::Users => "Users",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "Order Management",
            ResourceKind::Products => "Product Management",
            ResourceKind::Reviews => "Reviews",
            ResourceKind::Users => "User Management",
        }
    }

    pub fn form_title(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "Create a New Order",
            ResourceKind::Products => "Create a New Product",
            ResourceKind::Reviews => "Submit a Review",
            ResourceKind::Users => "Create a New User",
        }
    }

    pub fn list_title(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "Existing Orders",
            ResourceKind::Products => "Product List",
            ResourceKind::Reviews => "Reviews",
            ResourceKind::Users => "User List",
        }
    }

    /// Collection endpoint, relative to the backend base URL
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "/orders",
            ResourceKind::Products => "/products",
            ResourceKind::Reviews => "/reviews",
            ResourceKind::Users => "/users",
        }
    }

    /// Creation endpoint, relative to the backend base URL
    pub fn creation_path(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "/createOrders",
            ResourceKind::Products => "/createProducts",
            ResourceKind::Reviews => "/createReviews",
            ResourceKind::Users => "/createUsers",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "No orders found",
            ResourceKind::Products => "No products found",
            ResourceKind::Reviews => "No reviews found",
            ResourceKind::Users => "No users found",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ResourceKind::Orders => 0,
            ResourceKind::Products => 1,
            ResourceKind::Reviews => 2,
            ResourceKind::Users => 3,
        }
    }

    pub fn next(&self) -> ResourceKind {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> ResourceKind {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order" | "orders" => Ok(ResourceKind::Orders),
            "product" | "products" => Ok(ResourceKind::Products),
            "review" | "reviews" => Ok(ResourceKind::Reviews),
            "user" | "users" => Ok(ResourceKind::Users),
            other => Err(anyhow::anyhow!(
                "Unknown resource: {}. Supported resources: orders, products, reviews, users",
                other
            )),
        }
    }
}

/// Accepts a JSON number or a numeric string. Some backends serialize
/// decimal columns as strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accepts a JSON integer, an integral float (`12.0`) or a numeric string
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerLike {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    let value = match IntegerLike::deserialize(deserializer)? {
        IntegerLike::Integer(n) => return Ok(n),
        IntegerLike::Float(n) => n,
        IntegerLike::Text(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                return Ok(n);
            }
            s.parse::<f64>().map_err(serde::de::Error::custom)?
        }
    };

    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(serde::de::Error::custom(format!("expected an integer, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_deserialization() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            {
                "order_id": 7,
                "user_id": 3,
                "total_amount": 25.5,
                "status": "pending",
                "order_date": "2025-01-15T10:30:00Z"
            },
            {
                "order_id": 8,
                "user_id": 4,
                "total_amount": "19.99",
                "status": "Shipped"
            }
        ]))
        .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id, 7);
        assert_eq!(orders[0].total_amount, 25.5);
        assert_eq!(orders[1].total_amount, 19.99);
        assert!(orders[1].order_date.is_none());
    }

    #[test]
    fn test_integer_fields_accept_floats_and_strings() {
        let products: Vec<Product> = serde_json::from_value(json!([
            { "product_id": 1, "product_name": "Lamp", "price": 19.99, "stock": 12.0 },
            { "product_id": "2", "product_name": "Desk", "price": "19.99", "stock": "12" }
        ]))
        .unwrap();
        assert_eq!(products[0].stock, 12);
        assert_eq!(products[1].product_id, 2);
        assert_eq!(products[1].stock, 12);
        assert_eq!(products[1].price, 19.99);

        let reviews: Vec<Review> = serde_json::from_value(json!([
            { "review_id": 1, "user_id": 7, "product_id": 12, "rating": "4", "review_text": "Solid" }
        ]))
        .unwrap();
        assert_eq!(reviews[0].rating, 4);

        let fractional = serde_json::from_value::<Product>(json!({
            "product_id": 1, "product_name": "Lamp", "price": 1, "stock": 1.5
        }));
        assert!(fractional.is_err());
    }

    #[test]
    fn test_user_accepts_name_or_username_and_ignores_password() {
        let users: Vec<User> = serde_json::from_value(json!([
            { "user_id": 1, "username": "alice", "email": "a@example.com", "password": "secret" },
            { "user_id": 2, "name": "bob", "email": "b@example.com" }
        ]))
        .unwrap();

        assert_eq!(users[0].username, "alice");
        assert_eq!(users[1].username, "bob");
        let round = serde_json::to_value(&users[0]).unwrap();
        assert!(round.get("password").is_none());
    }

    #[test]
    fn test_new_user_debug_hides_password() {
        let user = NewUser {
            name: "alice".to_string(),
            email: "a@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", user);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_resource_kind_endpoints() {
        assert_eq!(ResourceKind::Orders.collection_path(), "/orders");
        assert_eq!(ResourceKind::Orders.creation_path(), "/createOrders");
        assert_eq!(ResourceKind::Products.creation_path(), "/createProducts");
        assert_eq!(ResourceKind::Reviews.creation_path(), "/createReviews");
        assert_eq!(ResourceKind::Users.collection_path(), "/users");
    }

    #[test]
    fn test_resource_kind_parsing_and_cycling() {
        assert_eq!("Order".parse::<ResourceKind>().unwrap(), ResourceKind::Orders);
        assert_eq!("REVIEWS".parse::<ResourceKind>().unwrap(), ResourceKind::Reviews);
        assert!("invoices".parse::<ResourceKind>().is_err());

        assert_eq!(ResourceKind::Users.next(), ResourceKind::Orders);
        assert_eq!(ResourceKind::Orders.previous(), ResourceKind::Users);
    }
}
