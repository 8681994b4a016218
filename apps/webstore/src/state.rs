//! Application state management

use domain_customers::{CustomerService, InMemoryCustomerRepository};
use domain_products::{AttachmentStore, InMemoryProductRepository, ProductService};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: ProductService<InMemoryProductRepository>,
    pub customers: CustomerService<InMemoryCustomerRepository>,
    pub attachments: AttachmentStore,
}

impl AppState {
    /// Build the stores, seeded with the demo data when configured
    pub fn new(config: Config) -> eyre::Result<Self> {
        let (product_repository, customer_repository) = if config.seed_catalog {
            (
                domain_products::seed::seeded_repository()?,
                domain_customers::seed::seeded_repository(),
            )
        } else {
            (
                InMemoryProductRepository::new(),
                InMemoryCustomerRepository::new(),
            )
        };

        Ok(Self {
            attachments: AttachmentStore::new(&config.upload_dir),
            products: ProductService::new(product_repository),
            customers: CustomerService::new(customer_repository),
            config,
        })
    }
}
