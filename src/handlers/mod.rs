//! HTTP handlers for the directory resources

use serde::Serialize;

pub mod admin;
pub mod business;
pub mod business_type;
pub mod health;

pub use admin::*;
pub use business::*;
pub use business_type::*;
pub use health::*;

/// Plain confirmation body used by deletes and logout
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
