pub mod availability;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod macros;
pub mod permission;
pub mod shift;
pub mod swap;
pub mod user_service;
pub mod uuid_service;

#[cfg(test)]
mod test;

pub use user_service::UserServiceDev;
