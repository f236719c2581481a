pub mod api;
pub mod core;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
