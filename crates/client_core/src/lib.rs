//! Client side of the customer dashboard: fetching, caching, and the view
//! state that turns the raw collection into table rows.

pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod detail;
pub mod dropdown;
pub mod error;
pub mod retry;
pub mod view;

pub use cache::QueryCache;
pub use client::{CustomerClient, CustomerSource};
pub use dashboard::{Dashboard, EmptyState, LoadState, RequestTicket, SortIndicator};
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use detail::CustomerDetail;
pub use error::FetchError;
pub use retry::{fetch_with_retry, RetryPolicy};
pub use view::{
    derive_visible, toggle_sort, FilterConfig, SortConfig, SortDirection, SortField, StatusFilter,
};
