use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// File written by the in-app export key.
pub const EXPORT_FILE: &str = "status_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Incidents),
        KeyCode::Char('2') => app.set_view(View::Maintenance),
        KeyCode::Char('3') => app.set_view(View::Components),

        // Navigation (up/down for rows, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Expand/collapse the section under the cursor
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),

        // Reload
        KeyCode::Char('r') => app.refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Filter (start typing to search)
        KeyCode::Char('/') => app.start_filter(),

        // Only show issues
        KeyCode::Char('i') => app.toggle_only_issues(),

        // Clear search
        KeyCode::Char('c') | KeyCode::Esc => {
            if !app.filter.search_term.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter.search_term.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select, click again to expand
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Content rows start after the block border
            if clicked_row > content_start_row {
                let line = (clicked_row - content_start_row - 1) as usize;
                if let Some(index) = app.list_layout.row_at(line) {
                    if index == app.selected_index {
                        app.toggle_selected();
                    } else {
                        app.select_row(index);
                    }
                }
            }

            // Check for tab clicks (row 1, after header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Incidents (0-13), Maintenance (14-29), Components (30-45)
                if col < 14 {
                    app.set_view(View::Incidents);
                } else if col < 30 {
                    app.set_view(View::Maintenance);
                } else if col < 46 {
                    app.set_view(View::Components);
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ListLayout;
    use crate::data::FilterState;
    use crate::source::{ChannelSource, Component, StatusSnapshot};
    use crate::ui::Theme;
    use crossterm::event::KeyEventState;

    fn app_with(snapshot: StatusSnapshot) -> App {
        let (tx, source) = ChannelSource::create("test");
        tx.send(Ok(snapshot)).unwrap();
        let mut app = App::with_theme(Box::new(source), FilterState::default(), Theme::dark());
        app.reload_data();
        app
    }

    fn app() -> App {
        app_with(StatusSnapshot::default())
    }

    fn click(row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key_event(app, key(*code));
        }
    }

    #[test]
    fn test_search_input() {
        let mut app = app();

        press(
            &mut app,
            &[KeyCode::Char('/'), KeyCode::Char('d'), KeyCode::Char('n'), KeyCode::Char('s')],
        );
        assert!(app.filter_active);
        assert_eq!(app.filter.search_term, "dns");

        // 'q' while typing is text, not quit
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.running);
        assert_eq!(app.filter.search_term, "dnsq");

        press(&mut app, &[KeyCode::Backspace, KeyCode::Enter]);
        assert!(!app.filter_active);
        assert_eq!(app.filter.search_term, "dns");

        press(&mut app, &[KeyCode::Char('c')]);
        assert!(app.filter.search_term.is_empty());
    }

    #[test]
    fn test_backspace_to_empty_leaves_input_mode() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('/'), KeyCode::Char('a'), KeyCode::Backspace]);
        assert!(!app.filter_active);
    }

    #[test]
    fn test_only_issues_toggle() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('i')]);
        assert!(app.filter.only_issues);
        press(&mut app, &[KeyCode::Char('i')]);
        assert!(!app.filter.only_issues);
    }

    #[test]
    fn test_view_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.current_view, View::Components);
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.current_view, View::Incidents);
        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.current_view, View::Components);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert!(app.show_help);
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }

    #[test]
    fn test_tab_click() {
        let mut app = app();
        let click = MouseEvent {
            column: 20,
            ..click(1)
        };
        handle_mouse_event(&mut app, click, 3);
        assert_eq!(app.current_view, View::Maintenance);
    }

    #[test]
    fn test_click_on_scrolled_list() {
        let mut snapshot = StatusSnapshot::default();
        snapshot.components.components = (0..30)
            .map(|i: u8| Component {
                id: format!("p{}", i),
                name: format!("Site (X{}{})", (b'A' + i / 26) as char, (b'A' + i % 26) as char),
                ..Default::default()
            })
            .collect();
        let mut app = app_with(snapshot);
        app.set_view(View::Components);
        assert_eq!(app.rows().len(), 31);

        // Heading plus 30 PoPs, scrolled down by 20 rows
        app.list_layout = ListLayout {
            offset: 20,
            heights: vec![1; 31],
        };

        // Content starts at row 3, its border takes row 4: row 6 is the third visible line
        handle_mouse_event(&mut app, click(6), 3);
        assert_eq!(app.selected_index, 22);

        // Clicking below the last row does nothing
        handle_mouse_event(&mut app, click(40), 3);
        assert_eq!(app.selected_index, 22);
    }
}
