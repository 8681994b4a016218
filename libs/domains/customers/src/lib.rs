//! Customers Domain
//!
//! Read-only customer listing, layered like the products domain:
//! handlers → service → repository → models.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{CustomerError, CustomerResult};
pub use handlers::ApiDoc;
pub use models::Customer;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use service::CustomerService;
