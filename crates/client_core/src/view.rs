//! Filtering and sorting of the customer table.
//!
//! Everything here is a pure function of the record collection and the
//! current [`FilterConfig`] / [`SortConfig`]; callers re-derive on every
//! configuration change.

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use shared::domain::{parse_timestamp, Customer, CustomerStatus, UnknownStatus};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CustomerStatus),
}

impl StatusFilter {
    pub fn matches(self, status: CustomerStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    pub search: String,
    pub status: StatusFilter,
}

impl FilterConfig {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.status != StatusFilter::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Status,
    JoinedAt,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Name, Self::Email, Self::Status, Self::JoinedAt];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Status => "status",
            Self::JoinedAt => "joined_at",
        }
    }

    /// Column header text.
    pub fn title(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Status => "Status",
            Self::JoinedAt => "Joined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field '{0}'; expected name, email, status or joined_at")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "joined" => Ok(Self::JoinedAt),
            other => Self::ALL
                .into_iter()
                .find(|field| field.as_str() == other)
                .ok_or_else(|| UnknownSortField(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortConfig {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Header activation: flips direction on the active field, otherwise starts
/// the new field ascending.
pub fn toggle_sort(current: SortConfig, field: SortField) -> SortConfig {
    if current.field == field {
        SortConfig {
            field,
            direction: current.direction.flipped(),
        }
    } else {
        SortConfig {
            field,
            direction: SortDirection::Asc,
        }
    }
}

/// Filtered then stably sorted copy of `records`.
pub fn derive_visible(
    records: &[Customer],
    filter: &FilterConfig,
    sort: SortConfig,
) -> Vec<Customer> {
    let needle = filter.search.to_lowercase();
    let mut visible: Vec<Customer> = records
        .iter()
        .filter(|customer| filter.status.matches(customer.status))
        .filter(|customer| needle.is_empty() || search_text(customer).contains(&needle))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_by(sort.field, a, b);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    visible
}

/// Lowercased text a search term is matched against: the row as displayed.
pub fn search_text(customer: &Customer) -> String {
    format!(
        "{} {} {} {}",
        customer.name,
        customer.email,
        customer.status,
        format_short_date(&customer.joined_at)
    )
    .to_lowercase()
}

fn compare_by(field: SortField, a: &Customer, b: &Customer) -> Ordering {
    match field {
        SortField::Name => compare_text(&a.name, &b.name),
        SortField::Email => compare_text(&a.email, &b.email),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::JoinedAt => compare_instants(a.joined_instant(), b.joined_instant()),
    }
}

// Letters first without accents or case, then accents, then lowercase before uppercase.
fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
}

fn base_letters(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn swap_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect()
            }
        })
        .collect()
}

// Unparsable timestamps order after every valid one.
fn compare_instants(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Table format, e.g. `Jan 15, 2024`.
pub fn format_short_date(raw: &str) -> String {
    format_date(raw, "%b %-d, %Y")
}

/// Detail format, e.g. `January 15, 2024`.
pub fn format_long_date(raw: &str) -> String {
    format_date(raw, "%B %-d, %Y")
}

fn format_date(raw: &str, pattern: &str) -> String {
    parse_timestamp(raw)
        .map(|at| at.format(pattern).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
