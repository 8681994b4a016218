//! Customer Service

use std::sync::Arc;
use tracing::instrument;

use crate::error::CustomerResult;
use crate::models::Customer;
use crate::repository::CustomerRepository;

pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_customers(&self) -> CustomerResult<Vec<Customer>> {
        self.repository.get_all_customers().await
    }
}

impl<R: CustomerRepository> Clone for CustomerService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
