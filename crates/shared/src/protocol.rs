use serde::{Deserialize, Serialize};

use crate::domain::Customer;

pub const CUSTOMERS_ROUTE: &str = "/api/customers";
pub const HEALTH_ROUTE: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomersResponse {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
