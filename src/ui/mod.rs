//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`incidents`]: Overall status and unresolved incidents
//! - [`maintenance`]: Active and upcoming maintenance sections
//! - [`components`]: Points of Presence and service groups
//! - [`common`]: Shared components (header, tabs, search, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │ Search (common::render_search_bar)   │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (incidents/maintenance/components)   │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod components;
pub mod incidents;
pub mod maintenance;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};
use ratatui::Frame;

use crate::app::{App, ListLayout};

/// Header line of a collapsible section with its open/closed marker.
pub(crate) fn section_header(app: &App, title: String, open: bool) -> Line<'static> {
    let marker = if open { "▼ " } else { "▶ " };
    Line::from(vec![
        Span::styled(marker, app.theme.header),
        Span::styled(title, app.theme.header.add_modifier(Modifier::BOLD)),
    ])
}

/// Render a selectable list, keeping the previous scroll offset.
///
/// Returns the resulting layout so clicks can be mapped back to rows.
pub(crate) fn render_list(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    block: Block<'_>,
    items: Vec<ListItem<'_>>,
) -> ListLayout {
    let heights: Vec<usize> = items.iter().map(ListItem::height).collect();
    let selected = app.selected_index.min(heights.len().saturating_sub(1));

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default()
        .with_offset(app.list_layout.offset)
        .with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);

    ListLayout {
        offset: state.offset(),
        heights,
    }
}
