//! HTTP API handlers for yep-hub

pub mod command_center;
pub mod health;

pub use command_center::get_command_center;
pub use health::health_routes;
