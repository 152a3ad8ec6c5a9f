use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    config::{load_settings, parse_base_url},
    CustomerClient, LoadState, RetryPolicy, SortConfig, SortDirection, SortField, StatusFilter,
};
use shared::domain::CustomerId;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod render;
mod session;

use render::{render_dashboard, render_detail};
use session::Session;

#[derive(Parser, Debug)]
#[command(about = "Browse the customer list served by the dashboard backend")]
struct Args {
    /// Backend base URL; defaults to API_BASE_URL or http://localhost:3001.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    /// all, active, inactive or pending.
    #[arg(long, default_value = "all")]
    status: StatusFilter,
    /// name, email, status or joined.
    #[arg(long, default_value = "name")]
    sort: SortField,
    #[arg(long)]
    desc: bool,
    /// Print the details of one customer instead of the table.
    #[arg(long)]
    show: Option<String>,
    #[arg(long, short)]
    interactive: bool,
    #[arg(long, default_value_t = 3)]
    retries: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let base_url = match &args.api_url {
        Some(raw) => parse_base_url(raw)?,
        None => load_settings()?.api_base_url,
    };
    let policy = RetryPolicy {
        max_retries: args.retries,
        ..RetryPolicy::default()
    };
    let mut session = Session::new(CustomerClient::new(base_url), policy);

    session.dashboard.set_search_input(args.search.clone());
    session.dashboard.apply_search(args.search);
    session.dashboard.choose_status(args.status);
    session.dashboard.set_sort(SortConfig {
        field: args.sort,
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
    });

    session.load(false).await;

    if args.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        return session.run(stdin, |text| print!("{text}")).await;
    }

    if let LoadState::Failed(err) = session.dashboard.load_state() {
        return Err(anyhow!("failed to load customers: {err}"));
    }

    match args.show {
        Some(id) => {
            let id = CustomerId::from(id.as_str());
            let detail = session
                .dashboard
                .select(&id)
                .ok_or_else(|| anyhow!("no customer with id '{id}'"))?;
            print!("{}", render_detail(&detail));
        }
        None => print!("{}", render_dashboard(&session.dashboard)),
    }
    Ok(())
}
