//! Business logic services for the directory backend

pub mod admin;
pub mod auth;
pub mod business;
pub mod business_type;

pub use admin::AdminService;
pub use auth::AuthService;
pub use business::BusinessService;
pub use business_type::BusinessTypeService;
