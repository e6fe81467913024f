pub mod client;
pub mod health;

pub use client::{DEFAULT_BASE_URL, HttpTransport};
pub use health::HealthStatus;
