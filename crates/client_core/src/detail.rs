use shared::domain::Customer;

use crate::view::format_long_date;

/// What the detail view shows for a selected customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetail {
    pub name: String,
    pub id_line: String,
    pub status_label: &'static str,
    pub email: String,
    pub mailto: String,
    pub address: String,
    pub joined: String,
    pub notes: Option<String>,
}

impl CustomerDetail {
    pub fn from_customer(customer: &Customer) -> Self {
        let notes = customer.notes.trim();
        Self {
            name: customer.name.clone(),
            id_line: format!("ID: {}", customer.id),
            status_label: customer.status.label(),
            email: customer.email.clone(),
            mailto: format!("mailto:{}", customer.email),
            address: customer.address.clone(),
            joined: format_long_date(&customer.joined_at),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}
