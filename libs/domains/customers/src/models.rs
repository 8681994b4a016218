use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = "C1001")]
    pub customer_id: String,
    pub name: String,
    pub address: String,
    pub no_of_orders_made: u64,
}

impl Customer {
    pub fn new(
        customer_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            name: name.into(),
            address: address.into(),
            no_of_orders_made: 0,
        }
    }

    pub fn with_orders(mut self, no_of_orders_made: u64) -> Self {
        self.no_of_orders_made = no_of_orders_made;
        self
    }
}
