//! Products Domain
//!
//! Product catalog lookup, filtering and the add-product write path.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart form binding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, category × manufacturer × price intersection
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Catalog queries (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, NewProduct, ProductFilter, PriceRange
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, seed, AttachmentStore, ProductService};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = seed::seeded_repository()?;
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service, AttachmentStore::new("./resources"));
//! # Ok(())
//! # }
//! ```

pub mod attachments;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use attachments::{AttachmentKind, AttachmentStore};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{NewProduct, PriceRange, Product, ProductAttribute, ProductFilter};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
