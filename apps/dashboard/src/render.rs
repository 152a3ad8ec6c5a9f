//! Plain-text rendering of dashboard state.

use std::fmt::Write as _;

use client_core::{
    view::format_short_date, CustomerDetail, Dashboard, EmptyState, LoadState, SortField,
    SortIndicator,
};

fn indicator(dashboard: &Dashboard, field: SortField) -> &'static str {
    match dashboard.sort_indicator(field) {
        SortIndicator::Unsorted => "",
        SortIndicator::Ascending => " ^",
        SortIndicator::Descending => " v",
    }
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    match dashboard.load_state() {
        LoadState::Loading => out.push_str("Loading customers...\n"),
        LoadState::Failed(err) => {
            let _ = writeln!(out, "Failed to load customers");
            let _ = writeln!(out, "{err}");
            out.push_str("Type 'retry' to try again.\n");
        }
        LoadState::Ready => {
            let _ = writeln!(
                out,
                "Status: {} | {}{}",
                dashboard.status_label(),
                dashboard.summary(),
                if dashboard.has_active_filters() {
                    " (type 'clear' to clear filters)"
                } else {
                    ""
                }
            );
            match dashboard.empty_state() {
                Some(empty) => render_empty(&mut out, empty),
                None => render_table(&mut out, dashboard),
            }
        }
    }
    out
}

fn render_empty(out: &mut String, empty: EmptyState) {
    let _ = writeln!(out, "{}", EmptyState::TITLE);
    let _ = writeln!(out, "{}", empty.message());
}

fn render_table(out: &mut String, dashboard: &Dashboard) {
    let rows: Vec<[String; 5]> = dashboard
        .visible()
        .into_iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name,
                c.email,
                c.status.label().to_string(),
                format_short_date(&c.joined_at),
            ]
        })
        .collect();

    let header = [
        "ID".to_string(),
        format!("{}{}", SortField::Name.title(), indicator(dashboard, SortField::Name)),
        format!("{}{}", SortField::Email.title(), indicator(dashboard, SortField::Email)),
        format!("{}{}", SortField::Status.title(), indicator(dashboard, SortField::Status)),
        format!(
            "{}{}",
            SortField::JoinedAt.title(),
            indicator(dashboard, SortField::JoinedAt)
        ),
    ];

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths);
    for row in &rows {
        write_row(out, row, &widths);
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn render_detail(detail: &CustomerDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Customer Details");
    let _ = writeln!(out, "{} [{}]", detail.name, detail.status_label);
    let _ = writeln!(out, "{}", detail.id_line);
    let _ = writeln!(out, "Email:   {} <{}>", detail.email, detail.mailto);
    let _ = writeln!(out, "Address: {}", detail.address);
    let _ = writeln!(out, "Joined:  {}", detail.joined);
    if let Some(notes) = &detail.notes {
        let _ = writeln!(out, "Notes:   {notes}");
    }
    out
}
