use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CustomerResult;
use crate::models::Customer;

/// Repository trait for customers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers in insertion order
    async fn get_all_customers(&self) -> CustomerResult<Vec<Customer>>;
}

/// In-memory implementation of CustomerRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<Vec<Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customers<I>(customers: I) -> Self
    where
        I: IntoIterator<Item = Customer>,
    {
        Self {
            customers: Arc::new(RwLock::new(customers.into_iter().collect())),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn get_all_customers(&self) -> CustomerResult<Vec<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.clone())
    }
}
