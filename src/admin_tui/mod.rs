//! Admin Terminal User Interface (TUI)
//!
//! Four list-and-form screens (orders, products, reviews, users) sharing one
//! generic implementation, switched through a tab bar.

pub mod app;
pub mod components;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::App;
pub use screens::{ListFormScreen, Resource, SubmitOutcome};
