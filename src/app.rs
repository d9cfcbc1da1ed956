//! Application state and navigation logic.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::data::{DashboardData, DashboardView, FilterEvent, FilterState, SectionId};
use crate::source::{DataSource, StatusSnapshot};
use crate::ui::Theme;

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Unresolved incidents under the overall status.
    Incidents,
    /// Active and upcoming maintenance accordions.
    Maintenance,
    /// Points of Presence and service groups.
    Components,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Incidents => View::Maintenance,
            View::Maintenance => View::Components,
            View::Components => View::Incidents,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Incidents => View::Components,
            View::Maintenance => View::Incidents,
            View::Components => View::Maintenance,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Incidents => "Incidents",
            View::Maintenance => "Maintenance",
            View::Components => "Components",
        }
    }
}

/// Set of expanded collapsible sections.
///
/// Sections start collapsed. A non-empty search opens every section that
/// still has results; nothing ever collapses automatically. A data refresh
/// only opens sections whose results were empty before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    open: BTreeSet<SectionId>,
}

impl Expansion {
    pub fn is_open(&self, section: &SectionId) -> bool {
        self.open.contains(section)
    }

    /// Flip one section, returning whether it is now open.
    pub fn toggle(&mut self, section: &SectionId) -> bool {
        if self.open.remove(section) {
            false
        } else {
            self.open.insert(section.clone());
            true
        }
    }

    pub fn collapse(&mut self, section: &SectionId) {
        self.open.remove(section);
    }

    /// Next expansion state after a filter change.
    pub fn after_filter(mut self, view: &DashboardView, filter: &FilterState) -> Self {
        if !filter.search_term.is_empty() {
            self.open.extend(view.sections_with_results());
        }
        self
    }

    /// Next expansion state after a data refresh. `previous` holds the
    /// sections that had results before the refresh; those keep whatever
    /// state the user left them in.
    pub fn after_refresh(
        mut self,
        previous: &[SectionId],
        view: &DashboardView,
        filter: &FilterState,
    ) -> Self {
        if !filter.search_term.is_empty() {
            let fresh = view.sections_with_results().into_iter();
            self.open.extend(fresh.filter(|section| !previous.contains(section)));
        }
        self
    }
}

/// One navigable line in the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Section title that is not collapsible.
    Heading(String),
    /// An unresolved incident, by index.
    Incident(usize),
    /// Collapsible section header.
    Section(SectionId),
    /// Entry inside an open section, by index into the filtered list.
    Entry(SectionId, usize),
    /// A Point of Presence, by index into the filtered list.
    PointOfPresence(usize),
}

/// Where the rows of the last rendered list landed on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLayout {
    /// Index of the first visible row.
    pub offset: usize,
    /// Height in lines of every row.
    pub heights: Vec<usize>,
}

impl ListLayout {
    /// Row shown at `line`, counted from the top of the list body.
    pub fn row_at(&self, line: usize) -> Option<usize> {
        let mut top = 0;
        for (index, height) in self.heights.iter().enumerate().skip(self.offset) {
            if line < top + height {
                return Some(index);
            }
            top += height;
        }
        None
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<DashboardData>,
    pub load_error: Option<String>,

    // Search/filter
    pub filter: FilterState,
    pub filter_active: bool,
    pub expansion: Expansion,

    // Navigation state
    pub selected_index: usize,
    pub list_layout: ListLayout,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and initial filter.
    pub fn new(source: Box<dyn DataSource>, filter: FilterState) -> Self {
        Self::with_theme(source, filter, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(source: Box<dyn DataSource>, filter: FilterState, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Incidents,
            show_help: false,
            source,
            data: None,
            load_error: None,
            filter,
            filter_active: false,
            expansion: Expansion::default(),
            selected_index: 0,
            list_layout: ListLayout::default(),
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// No snapshot has arrived yet and nothing has failed.
    pub fn is_initial_loading(&self) -> bool {
        self.data.is_none() && self.load_error.is_none()
    }

    /// Poll the data source for new data.
    ///
    /// Returns true if a new snapshot replaced the current one. A failed
    /// refresh only records the error; the previous snapshot stays on screen.
    pub fn reload_data(&mut self) -> bool {
        let snapshot = self.source.poll();
        self.load_error = self.source.error().map(str::to_string);

        match snapshot {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replace the current data with a new snapshot.
    pub fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        let previous = self
            .dashboard_view()
            .map(|view| view.sections_with_results())
            .unwrap_or_default();
        self.data = Some(DashboardData::from_snapshot(snapshot));
        if let Some(view) = self.dashboard_view() {
            let expansion = std::mem::take(&mut self.expansion);
            self.expansion = expansion.after_refresh(&previous, &view, &self.filter);
        }
        self.clamp_selection();
    }

    /// Ask the source for a fresh snapshot and pick up whatever is ready.
    pub fn refresh(&mut self) {
        self.source.request_refresh();
        self.reload_data();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Filtered projection of the current data.
    pub fn dashboard_view(&self) -> Option<DashboardView> {
        self.data.as_ref().map(|data| data.view(&self.filter))
    }

    /// Navigable rows of the current view.
    pub fn rows(&self) -> Vec<Row> {
        match self.dashboard_view() {
            Some(view) => self.rows_for(&view),
            None => Vec::new(),
        }
    }

    /// Navigable rows of the current view for an already computed projection.
    pub fn rows_for(&self, view: &DashboardView) -> Vec<Row> {
        let mut rows = Vec::new();
        match self.current_view {
            View::Incidents => {
                let count = self.data.as_ref().map_or(0, |d| d.incidents.len());
                rows.extend((0..count).map(Row::Incident));
            }
            View::Maintenance => {
                let sections = [
                    (SectionId::ActiveMaintenance, view.active_maintenances.len()),
                    (SectionId::UpcomingMaintenance, view.upcoming_maintenances.len()),
                ];
                for (section, count) in sections {
                    self.push_section(&mut rows, section, count);
                }
            }
            View::Components => {
                if !view.points_of_presence.is_empty() {
                    rows.push(Row::Heading(format!(
                        "Points of Presence ({})",
                        view.points_of_presence.len()
                    )));
                    rows.extend((0..view.points_of_presence.len()).map(Row::PointOfPresence));
                }
                if !view.groups.is_empty() {
                    rows.push(Row::Heading("Services by Region".to_string()));
                    for group in &view.groups {
                        let section = SectionId::Group(group.parent.id.clone());
                        self.push_section(&mut rows, section, group.children.len());
                    }
                }
            }
        }
        rows
    }

    fn push_section(&self, rows: &mut Vec<Row>, section: SectionId, count: usize) {
        // Sections without visible entries are hidden
        if count == 0 {
            return;
        }
        let open = self.expansion.is_open(&section);
        rows.push(Row::Section(section.clone()));
        if open {
            rows.extend((0..count).map(|i| Row::Entry(section.clone(), i)));
        }
    }

    fn sync_expansion(&mut self) {
        if let Some(ref data) = self.data {
            let view = data.view(&self.filter);
            self.expansion = std::mem::take(&mut self.expansion).after_filter(&view, &self.filter);
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.rows().len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }

    /// Switch to the next view (cycles through Incidents → Maintenance → Components).
    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_index = 0;
        self.list_layout = ListLayout::default();
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.rows().len().saturating_sub(1);
        self.selected_index = (self.selected_index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        self.selected_index = self.selected_index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        self.selected_index = self.rows().len().saturating_sub(1);
    }

    /// Select a row by position if it exists.
    pub fn select_row(&mut self, index: usize) {
        if index < self.rows().len() {
            self.selected_index = index;
        }
    }

    /// Expand or collapse the section under the cursor.
    ///
    /// On an entry inside an open section, collapses that section and moves
    /// the cursor to its header.
    pub fn toggle_selected(&mut self) {
        let rows = self.rows();
        match rows.get(self.selected_index) {
            Some(Row::Section(section)) => {
                let section = section.clone();
                self.expansion.toggle(&section);
            }
            Some(Row::Entry(section, _)) => {
                let section = section.clone();
                self.expansion.collapse(&section);
                if let Some(pos) = rows.iter().position(|r| *r == Row::Section(section.clone())) {
                    self.selected_index = pos;
                }
            }
            _ => {}
        }
        self.clamp_selection();
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Apply a filter change and open sections with search results.
    pub fn update_filter(&mut self, event: FilterEvent) {
        self.filter = std::mem::take(&mut self.filter).apply(event);
        self.sync_expansion();
        self.clamp_selection();
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the search term.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the search term and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.update_filter(FilterEvent::ClearSearch);
        self.filter_active = false;
    }

    /// Append a character to the search term.
    pub fn filter_push(&mut self, c: char) {
        self.update_filter(FilterEvent::Push(c));
    }

    /// Remove the last character from the search term.
    pub fn filter_pop(&mut self) {
        self.update_filter(FilterEvent::Pop);
    }

    /// Flip "only show issues".
    pub fn toggle_only_issues(&mut self) {
        self.update_filter(FilterEvent::ToggleOnlyIssues);
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the filtered dashboard to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let json = serde_json::to_string_pretty(&data.export(&self.filter))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
