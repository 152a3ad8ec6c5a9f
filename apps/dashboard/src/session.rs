//! Interactive dashboard session driven by line commands on stdin.

use anyhow::{anyhow, bail, Result};
use client_core::{
    CustomerSource, Dashboard, Debouncer, QueryCache, RetryPolicy, SortField, StatusFilter,
    SEARCH_DEBOUNCE,
};
use shared::domain::CustomerId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::render::{render_dashboard, render_detail};

pub const HELP: &str = "\
commands:
  search <text>     filter by name, email, status or join date (empty clears)
  status <value>    all | active | inactive | pending
  menu              open or close the status menu
  sort <field>      name | email | status | joined (repeat to flip direction)
  show <id>         open customer details
  close             close customer details
  clear             clear search and status filters
  refresh | retry   refetch customers
  help              show this help
  quit              leave the dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Status(StatusFilter),
    Menu,
    Sort(SortField),
    Show(CustomerId),
    Close,
    Clear,
    Refresh,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

        let command = match verb.to_ascii_lowercase().as_str() {
            "search" | "/" => Self::Search(rest.to_string()),
            "status" => Self::Status(rest.parse().map_err(|e| anyhow!("{e}"))?),
            "menu" => Self::Menu,
            "sort" => Self::Sort(rest.parse().map_err(|e| anyhow!("{e}"))?),
            "show" | "open" => {
                if rest.is_empty() {
                    bail!("show needs a customer id");
                }
                Self::Show(CustomerId::from(rest))
            }
            "close" => Self::Close,
            "clear" => Self::Clear,
            "refresh" | "retry" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command '{other}'; type 'help'"),
        };
        Ok(Some(command))
    }
}

pub struct Session<S: CustomerSource> {
    source: S,
    policy: RetryPolicy,
    cache: QueryCache,
    pub dashboard: Dashboard,
}

impl<S: CustomerSource> Session<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self {
            source,
            policy,
            cache: QueryCache::default(),
            dashboard: Dashboard::new(),
        }
    }

    /// Fetches (or reuses fresh cached data unless `force`) and applies the result.
    pub async fn load(&mut self, force: bool) {
        let ticket = self.dashboard.begin_request();
        let result = self
            .cache
            .get_or_fetch(&self.source, self.policy, force)
            .await;
        if let Ok(customers) = &result {
            info!(count = customers.len(), "customers loaded");
        }
        self.dashboard.finish_request(ticket, result);
    }

    /// Applies one command; returns text to print, or `None` to quit.
    /// Search text goes through `debouncer` and is applied by the caller later.
    pub async fn handle(
        &mut self,
        command: Command,
        debouncer: &mut Debouncer<String>,
    ) -> Option<String> {
        let output = match command {
            Command::Search(text) => {
                self.dashboard.set_search_input(text.clone());
                debouncer.push(text);
                return Some(String::new());
            }
            Command::Status(status) => {
                self.dashboard.choose_status(status);
                render_dashboard(&self.dashboard)
            }
            Command::Menu => {
                self.dashboard.toggle_dropdown();
                self.render_menu()
            }
            Command::Sort(field) => {
                self.dashboard.toggle_sort(field);
                render_dashboard(&self.dashboard)
            }
            Command::Show(id) => match self.dashboard.select(&id) {
                Some(detail) => render_detail(&detail),
                None => format!("no customer with id '{id}'\n"),
            },
            Command::Close => {
                self.dashboard.close_detail();
                render_dashboard(&self.dashboard)
            }
            Command::Clear => {
                debouncer.cancel();
                self.dashboard.clear_filters();
                render_dashboard(&self.dashboard)
            }
            Command::Refresh => {
                self.load(true).await;
                render_dashboard(&self.dashboard)
            }
            Command::Help => format!("{HELP}\n"),
            Command::Quit => return None,
        };
        Some(output)
    }

    /// Applies a search that survived the debounce window. Returns `None` when the
    /// input changed since it was scheduled, e.g. after `clear`.
    pub fn apply_debounced(&mut self, search: String) -> Option<String> {
        if search != self.dashboard.search_input() {
            debug!(%search, "dropping superseded search");
            return None;
        }
        debug!(%search, "debounced search fired");
        self.dashboard.apply_search(search);
        Some(render_dashboard(&self.dashboard))
    }

    fn render_menu(&self) -> String {
        let dropdown = self.dashboard.dropdown();
        if !dropdown.is_open() {
            return String::new();
        }
        let current = self.dashboard.filter().status;
        dropdown
            .options()
            .iter()
            .map(|option| {
                let mark = if option.value == current { "*" } else { " " };
                format!("{mark} {:<10} (status {})\n", option.label, option.value)
            })
            .collect()
    }

    /// Reads commands until EOF or `quit`, printing through `print`.
    pub async fn run<R>(&mut self, input: R, mut print: impl FnMut(&str)) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let (mut debouncer, mut applied) = Debouncer::new(SEARCH_DEBOUNCE);
        let mut lines = input.lines();
        print(&render_dashboard(&self.dashboard));

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let command = match Command::parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(err) => {
                            print(&format!("{err}\n"));
                            continue;
                        }
                    };
                    // Any command other than the menu toggle counts as an outside click.
                    if command != Command::Menu {
                        self.dashboard.dismiss_dropdown();
                    }
                    let clearing = command == Command::Clear;
                    match self.handle(command, &mut debouncer).await {
                        Some(output) => print(&output),
                        None => break,
                    }
                    if clearing {
                        while applied.try_recv().is_ok() {}
                    }
                }
                Some(search) = applied.recv() => {
                    if let Some(output) = self.apply_debounced(search) {
                        print(&output);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
