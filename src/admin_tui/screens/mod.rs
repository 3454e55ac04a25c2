//! Screen modules for the admin TUI

pub mod list_form;
pub mod orders;
pub mod products;
pub mod resource;
pub mod reviews;
pub mod users;

pub use list_form::{ListFormScreen, SubmitOutcome};
pub use orders::{status_color, Orders, StatusColor};
pub use products::Products;
pub use resource::Resource;
pub use reviews::Reviews;
pub use users::Users;

pub type OrdersScreen = ListFormScreen<Orders>;
pub type ProductsScreen = ListFormScreen<Products>;
pub type ReviewsScreen = ListFormScreen<Reviews>;
pub type UsersScreen = ListFormScreen<Users>;
