//! Demo customers loaded at startup

use crate::models::Customer;
use crate::repository::InMemoryCustomerRepository;

pub fn demo_customers() -> Vec<Customer> {
    vec![
        Customer::new("C1001", "John Smith", "221 Baker Street, London").with_orders(3),
        Customer::new("C1002", "Maria Garcia", "14 Calle Mayor, Madrid").with_orders(1),
        Customer::new("C1003", "Wei Chen", "88 Nanjing Road, Shanghai"),
    ]
}

/// Repository holding [`demo_customers`]
pub fn seeded_repository() -> InMemoryCustomerRepository {
    InMemoryCustomerRepository::with_customers(demo_customers())
}
