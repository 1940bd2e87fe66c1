pub mod health;
pub use self::health::health;

pub mod auth;
pub mod me;
pub mod pages;
pub mod providers;
