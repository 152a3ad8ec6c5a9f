use shared::domain::CustomerStatus;

use crate::view::StatusFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: StatusFilter,
    pub label: &'static str,
}

/// Open/closed state of the status selector. Selecting an option or
/// interacting anywhere outside the menu closes it.
#[derive(Debug, Clone)]
pub struct StatusDropdown {
    options: Vec<DropdownOption>,
    is_open: bool,
}

impl Default for StatusDropdown {
    fn default() -> Self {
        let mut options = vec![DropdownOption {
            value: StatusFilter::All,
            label: "All Status",
        }];
        options.extend(CustomerStatus::ALL.into_iter().map(|status| DropdownOption {
            value: StatusFilter::Only(status),
            label: status.label(),
        }));
        Self::with_options(options)
    }
}

impl StatusDropdown {
    pub fn with_options(options: Vec<DropdownOption>) -> Self {
        Self {
            options,
            is_open: false,
        }
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Outside click.
    pub fn dismiss(&mut self) {
        self.is_open = false;
    }

    pub fn choose(&mut self, value: StatusFilter) -> StatusFilter {
        self.is_open = false;
        value
    }

    /// Label for `current`, or the first option's label when it isn't listed.
    pub fn selected_label(&self, current: StatusFilter) -> &'static str {
        self.options
            .iter()
            .find(|option| option.value == current)
            .or_else(|| self.options.first())
            .map_or("", |option| option.label)
    }
}
