//! Single-owner state behind the customer dashboard screen.

use shared::domain::{Customer, CustomerId};
use tracing::debug;

use crate::{
    detail::CustomerDetail,
    dropdown::StatusDropdown,
    error::FetchError,
    view::{self, FilterConfig, SortConfig, SortDirection, SortField, StatusFilter},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(FetchError),
}

/// Issued per fetch so late responses can be told apart from current ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Filters hide every record.
    Filtered,
    /// The collection itself is empty.
    NoData,
}

impl EmptyState {
    pub const TITLE: &'static str = "No customers found";

    pub fn message(self) -> &'static str {
        match self {
            Self::Filtered => "Try adjusting your search or filter criteria.",
            Self::NoData => "No customers available at the moment.",
        }
    }
}

pub struct Dashboard {
    customers: Vec<Customer>,
    load_state: LoadState,
    search_input: String,
    filter: FilterConfig,
    sort: SortConfig,
    dropdown: StatusDropdown,
    selected: Option<CustomerId>,
    issued: u64,
    applied: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            customers: Vec::new(),
            load_state: LoadState::Loading,
            search_input: String::new(),
            filter: FilterConfig::default(),
            sort: SortConfig::default(),
            dropdown: StatusDropdown::default(),
            selected: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Applies a fetch result. Returns `false` when a newer request already
    /// completed and this result was discarded.
    pub fn finish_request(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Customer>, FetchError>,
    ) -> bool {
        if ticket.0 <= self.applied {
            debug!(
                ticket = ticket.0,
                applied = self.applied,
                "discarding stale customer response"
            );
            return false;
        }
        self.applied = ticket.0;

        match result {
            Ok(customers) => {
                if let Some(id) = &self.selected {
                    if !customers.iter().any(|c| &c.id == id) {
                        self.selected = None;
                    }
                }
                self.customers = customers;
                self.load_state = LoadState::Ready;
            }
            Err(err) => self.load_state = LoadState::Failed(err),
        }
        true
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_refreshing(&self) -> bool {
        self.issued > self.applied
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Records typed text without re-deriving; see [`Dashboard::apply_search`].
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    /// Makes `text` the search term used for derivation (after debouncing).
    pub fn apply_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        debug!(search = %self.filter.search, "search applied");
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn dropdown(&self) -> &StatusDropdown {
        &self.dropdown
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown.toggle();
    }

    pub fn dismiss_dropdown(&mut self) {
        self.dropdown.dismiss();
    }

    pub fn choose_status(&mut self, status: StatusFilter) {
        let chosen = self.dropdown.choose(status);
        self.set_status(chosen);
    }

    pub fn status_label(&self) -> &'static str {
        self.dropdown.selected_label(self.filter.status)
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.filter = FilterConfig::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_input.is_empty() || self.filter.is_active()
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort = view::toggle_sort(self.sort, field);
    }

    pub fn sort_indicator(&self, field: SortField) -> SortIndicator {
        if self.sort.field != field {
            return SortIndicator::Unsorted;
        }
        match self.sort.direction {
            SortDirection::Asc => SortIndicator::Ascending,
            SortDirection::Desc => SortIndicator::Descending,
        }
    }

    pub fn visible(&self) -> Vec<Customer> {
        view::derive_visible(&self.customers, &self.filter, self.sort)
    }

    pub fn summary(&self) -> String {
        let total = self.customers.len();
        let shown = self.visible().len();
        if shown == total {
            format!("{total} customers")
        } else {
            format!("{shown} of {total} customers")
        }
    }

    /// Why the table is empty, or `None` when rows are shown or data is not loaded.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.load_state != LoadState::Ready || !self.visible().is_empty() {
            return None;
        }
        Some(if self.filter.is_active() {
            EmptyState::Filtered
        } else {
            EmptyState::NoData
        })
    }

    pub fn select(&mut self, id: &CustomerId) -> Option<CustomerDetail> {
        let customer = self.customers.iter().find(|c| &c.id == id)?;
        self.selected = Some(customer.id.clone());
        Some(CustomerDetail::from_customer(customer))
    }

    pub fn selected_detail(&self) -> Option<CustomerDetail> {
        let id = self.selected.as_ref()?;
        self.customers
            .iter()
            .find(|c| &c.id == id)
            .map(CustomerDetail::from_customer)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
