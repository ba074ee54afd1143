//! Card payment pipeline: validation, mapping, bank authorization and
//! the in-memory result store.

pub mod bank_client;
pub mod error;
pub mod mapper;
pub mod provider;
pub mod store;
pub mod types;
pub mod validation;

pub use bank_client::BankClient;
pub use error::{PaymentError, PaymentResult};
pub use provider::BankAuthorizer;
pub use store::PaymentStore;
pub use validation::PaymentValidator;
