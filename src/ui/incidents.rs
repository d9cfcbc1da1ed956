//! Incidents view rendering.
//!
//! Lists unresolved incidents under the overall status, each with its
//! impact badge and latest update.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

use super::render_list;
use crate::app::{App, ListLayout};
use crate::data::{classify_impact, classify_indicator, format_timestamp_in, StatusColor};
use crate::source::IncidentRecord;

/// Render the Incidents view.
/// Returns the list layout, or an empty one when no list is shown.
pub fn render(frame: &mut Frame, app: &App, area: Rect) -> ListLayout {
    let Some(ref data) = app.data else {
        return ListLayout::default();
    };

    let indicator = classify_indicator(&data.header.indicator);
    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(" Current Status: "),
            Span::styled(data.header.description, app.theme.status_style(indicator)),
            Span::raw(format!(" ({}) ", data.incidents.len())),
        ]))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if data.incidents.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "✓ All Systems Operational",
                app.theme.status_style(StatusColor::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("No unresolved incidents detected."),
        ];
        let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return ListLayout::default();
    }

    let items: Vec<ListItem> =
        data.incidents.iter().map(|incident| ListItem::new(incident_text(app, incident))).collect();

    render_list(frame, app, area, block, items)
}

fn incident_text<'a>(app: &App, incident: &'a IncidentRecord) -> Text<'a> {
    let badge = classify_impact(&incident.impact);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(incident.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("[{}]", badge.label), app.theme.status_style(badge.color)),
        ]),
        Line::from(vec![
            Span::styled("  Status: ", Style::default().fg(app.theme.muted)),
            Span::raw(capitalize(&incident.status)),
        ]),
    ];

    if let Some(update) = incident.latest_update() {
        let context = format!("incident: {}", incident.name);
        lines.push(Line::from(vec![
            Span::styled("  Latest update: ", Style::default().fg(app.theme.muted)),
            Span::raw(update.body.as_str()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  Updated: {}", format_timestamp_in(&update.updated_at, "N/A", &context)),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }

    if !incident.shortlink.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", incident.shortlink),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::UNDERLINED),
        )));
    }

    lines.push(Line::from(""));
    Text::from(lines)
}

/// Upper-case the first character ("investigating" → "Investigating").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("investigating"), "Investigating");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Monitoring"), "Monitoring");
    }
}
