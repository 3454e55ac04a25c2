//! shopadmin - terminal admin console for a shop REST backend

pub mod admin_tui;
pub mod api;
pub mod cli;
pub mod config;
pub mod models;
