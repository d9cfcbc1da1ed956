//! Maintenance view rendering.
//!
//! Active and upcoming maintenances as two collapsible sections. Only the
//! search term filters them; a section with no matches is hidden.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use super::{render_list, section_header};
use crate::app::{App, ListLayout, Row};
use crate::data::{
    classify_maintenance, format_timestamp_in, DashboardData, DashboardView, SectionId,
};
use crate::source::MaintenanceRecord;

/// Render the Maintenance view.
/// Returns the list layout, or an empty one when no list is shown.
pub fn render(frame: &mut Frame, app: &App, area: Rect) -> ListLayout {
    let Some(ref data) = app.data else {
        return ListLayout::default();
    };
    let view = data.view(&app.filter);
    let rows = app.rows_for(&view);

    let total = data.active_maintenances.len() + data.upcoming_maintenances.len();
    let block = Block::default()
        .title(format!(" Scheduled Maintenance ({}) ", total))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if rows.is_empty() {
        let message = if app.filter.search_term.is_empty() {
            "No scheduled maintenance.".to_string()
        } else {
            format!("No maintenance matches '{}'.", app.filter.search_term)
        };
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(message)])
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return ListLayout::default();
    }

    let items: Vec<ListItem> =
        rows.iter().map(|row| ListItem::new(row_text(app, data, &view, row))).collect();

    render_list(frame, app, area, block, items)
}

fn row_text<'a>(app: &App, data: &DashboardData, view: &'a DashboardView, row: &Row) -> Text<'a> {
    match row {
        Row::Section(section) => {
            let (title, total) = match section {
                SectionId::ActiveMaintenance => {
                    ("Active Maintenance", data.active_maintenances.len())
                }
                _ => ("Upcoming Maintenance", data.upcoming_maintenances.len()),
            };
            Text::from(section_header(
                app,
                format!("{} ({})", title, total),
                app.expansion.is_open(section),
            ))
        }
        Row::Entry(SectionId::ActiveMaintenance, i) => {
            maintenance_text(app, &view.active_maintenances[*i])
        }
        Row::Entry(_, i) => maintenance_text(app, &view.upcoming_maintenances[*i]),
        _ => Text::default(),
    }
}

fn maintenance_text<'a>(app: &App, maintenance: &'a MaintenanceRecord) -> Text<'a> {
    let badge = classify_maintenance(maintenance.status);
    let muted = Style::default().fg(app.theme.muted);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("    "),
            Span::styled(maintenance.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("[{}]", badge.label), app.theme.status_style(badge.color)),
        ]),
        Line::from(vec![
            Span::styled("      Impact: ", muted),
            Span::raw(maintenance.impact.as_str()),
            Span::styled("  Scheduled: ", muted),
            Span::raw(format_timestamp_in(&maintenance.scheduled_for, "N/A", "maintenance")),
            Span::styled("  Until: ", muted),
            Span::raw(format_timestamp_in(&maintenance.scheduled_until, "N/A", "maintenance")),
        ]),
    ];

    if !maintenance.components.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("      Affects {} component(s)", maintenance.components.len()),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    if !maintenance.shortlink.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("      {}", maintenance.shortlink),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::UNDERLINED),
        )));
    }

    Text::from(lines)
}
