//! Components view rendering.
//!
//! Points of Presence as a flat list, followed by service groups as
//! collapsible sections.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use super::{render_list, section_header};
use crate::app::{App, ListLayout, Row};
use crate::data::{classify, format_timestamp_in, DashboardView, SectionId};
use crate::source::Component;

/// Render the Components view.
/// Returns the list layout, or an empty one when no list is shown.
pub fn render(frame: &mut Frame, app: &App, area: Rect) -> ListLayout {
    let Some(ref data) = app.data else {
        return ListLayout::default();
    };
    let view = data.view(&app.filter);
    let rows = app.rows_for(&view);

    let organized = &data.organized;
    let total = organized.points_of_presence.len()
        + organized.parent_groups.iter().map(|g| g.children.len()).sum::<usize>();
    let block = Block::default()
        .title(format!(" Components ({}/{}) ", view.component_count(), total))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if view.has_no_components() {
        let mut text = vec![
            Line::from(""),
            Line::from("No components match your search criteria."),
        ];
        if app.filter.only_issues {
            text.push(Line::from(Span::styled(
                "Try disabling \"only issues\" (press i) to see all components.",
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return ListLayout::default();
    }

    let items: Vec<ListItem> = rows.iter().map(|row| row_item(app, &view, row)).collect();

    render_list(frame, app, area, block, items)
}

fn row_item<'a>(app: &App, view: &'a DashboardView, row: &Row) -> ListItem<'a> {
    match row {
        Row::Heading(title) => {
            ListItem::new(Line::from(Span::styled(title.clone(), app.theme.header)))
        }
        Row::PointOfPresence(i) => {
            ListItem::new(component_line(app, &view.points_of_presence[*i], 2))
        }
        Row::Section(SectionId::Group(id)) => {
            let name = view
                .groups
                .iter()
                .find(|g| &g.parent.id == id)
                .map(|g| g.parent.name.clone())
                .unwrap_or_default();
            let open = app.expansion.is_open(&SectionId::Group(id.clone()));
            ListItem::new(section_header(app, name, open))
        }
        Row::Entry(SectionId::Group(id), i) => {
            let child = view
                .groups
                .iter()
                .find(|g| &g.parent.id == id)
                .and_then(|g| g.children.get(*i));
            match child {
                Some(child) => ListItem::new(component_line(app, child, 6)),
                None => ListItem::new(Line::default()),
            }
        }
        _ => ListItem::new(Line::default()),
    }
}

/// One component: name, status dot and label, last update.
fn component_line<'a>(app: &App, component: &'a Component, indent: usize) -> Line<'a> {
    let class = classify(component.status);
    let context = format!("component: {}", component.name);
    let updated = format_timestamp_in(&component.updated_at, "N/A", &context);

    Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled("● ", app.theme.status_style(class.color)),
        Span::raw(component.name.as_str()),
        Span::raw("  "),
        Span::styled(class.label, app.theme.status_style(class.color)),
        Span::styled(
            format!("  Last updated: {}", updated),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ])
}
