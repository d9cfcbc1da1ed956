//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, search bar, status bar,
//! the first-load panels and the help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::data::{classify_indicator, format_timestamp_in, StatusColor};

/// Render the header bar with the overall status.
///
/// Displays: indicator dot, headline, page name, last update time.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(" ● ", app.theme.status_style(StatusColor::Gray)),
            Span::styled("STATUSWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("│ Loading... │ Last updated: Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let indicator = classify_indicator(&data.header.indicator);
    let page_name = if data.page.name.is_empty() {
        "STATUSWATCH".to_string()
    } else {
        data.page.name.to_uppercase()
    };
    let updated = format_timestamp_in(&data.page.updated_at, "Loading...", "status header");

    let line = Line::from(vec![
        Span::styled(" ● ", app.theme.status_style(indicator)),
        Span::styled(
            format!("{} ", page_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(data.header.description, app.theme.status_style(indicator)),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", data.incidents.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" incidents │ "),
        Span::raw(format!("Last updated: {}", updated)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Incidents "),
        Line::from(" 2:Maintenance "),
        Line::from(" 3:Components "),
    ];

    let selected = match app.current_view {
        View::Incidents => 0,
        View::Maintenance => 1,
        View::Components => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the search line: current term and the issue toggle.
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let term = if app.filter_active {
        Span::styled(
            format!("/{}_", app.filter.search_term),
            Style::default().fg(app.theme.highlight),
        )
    } else if app.filter.search_term.is_empty() {
        Span::styled(
            "Search by name (e.g. 'api', 'dns', 'workers')... press /",
            Style::default().add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(
            format!("/{}/ [c:clear]", app.filter.search_term),
            Style::default().fg(app.theme.highlight),
        )
    };

    let toggle = if app.filter.only_issues {
        Span::styled("[x] only issues", app.theme.status_style(StatusColor::Yellow))
    } else {
        Span::styled("[ ] only issues", Style::default().add_modifier(Modifier::DIM))
    };

    let line = Line::from(vec![
        Span::raw(" Search: "),
        term,
        Span::raw("  "),
        toggle,
        Span::raw(" (i)"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: source, time since last update, available controls.
/// Also displays temporary status messages and refresh errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    // A failed refresh with data on screen: stale data, say so
    if let (Some(_), Some(err)) = (&app.data, &app.load_error) {
        let message = format!(" Refresh failed: {} | showing previous data | r:retry", err);
        let paragraph = Paragraph::new(message).style(app.theme.status_style(StatusColor::Red));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        let controls = if app.filter_active {
            "Type to search | Enter:apply Esc:cancel"
        } else {
            match app.current_view {
                View::Incidents => "/:search r:refresh Tab:switch ?:help q:quit",
                View::Maintenance | View::Components => {
                    "/:search i:issues Enter:expand Tab:switch ?:help q:quit"
                }
            }
        };

        format!(
            " {} | {} | Updated {}s ago | {}",
            app.source_description(),
            app.current_view.label(),
            elapsed.as_secs(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        format!(" {} | Loading... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the panel shown before the first snapshot arrives.
///
/// Returns false when data is available and the view should render instead.
pub fn render_first_load(frame: &mut Frame, app: &App, area: Rect) -> bool {
    if app.data.is_some() {
        return false;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let text = match app.load_error {
        Some(ref err) => vec![
            Line::from(Span::styled("Error", app.theme.status_style(StatusColor::Red))),
            Line::from(""),
            Line::from(err.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to retry",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
        None => vec![
            Line::from(Span::styled("Loading...", app.theme.header)),
            Line::from(""),
            Line::from(format!("Fetching status data from {}", app.source_description())),
        ],
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
    true
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1 2 3       Jump to view"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter/Space Expand/collapse"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Filtering",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Search by name"),
        Line::from("  i         Toggle only issues"),
        Line::from("  c / Esc   Clear search"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 26u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
