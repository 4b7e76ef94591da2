// PaymentXP Connector Library
// Form-encoded request building and response normalization for the PaymentXP gateway

pub mod configs;
pub mod connectors;
pub mod errors;
pub mod logger;
pub mod service;
pub mod types;

// Re-export main connector
pub use connectors::{PaymentOptions, PaymentXp};
