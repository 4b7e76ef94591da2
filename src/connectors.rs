// Connector registry and exports

pub mod paymentxp;

pub use paymentxp::{PaymentOptions, PaymentXp};
