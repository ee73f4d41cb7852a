//! View-state coordinator for the directory browser.
//!
//! This module owns the filter criteria, the route derived from the
//! navigator's fragment history, the detail tab and the persisted display
//! preference, and keeps the filtered profile list in sync with them.

use super::events::AppEvent;
use super::ports::{ClipboardSink, Navigator, PreferenceStore, ProfileSource};
use super::view_state::{ViewRoute, ViewState};
use crate::domain::{
    DetailTab, DirectoryData, DomainError, DomainResult, Profile, Route, Settings, ThemeFilter,
    HOME_FRAGMENT,
};
use std::sync::Arc;

/// Preference key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Represents the current input mode of the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Card list (or open detail) navigation
    Browse,
    /// User is typing into the search box
    Search,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Main application state: the profile list plus everything the
/// presentation layer needs to render it.
///
/// The filtered list is recomputed eagerly after every mutating call, so it
/// is always the pure result of (profiles, search term, theme filter).
///
/// # Examples
///
/// ```
/// use smoelenboek::application::App;
/// use smoelenboek::infrastructure::{HistoryNavigator, MemoryPreferenceStore, StaticSource};
/// use std::sync::Arc;
///
/// let mut app = App::new(
///     Arc::new(StaticSource::default()),
///     Box::new(MemoryPreferenceStore::default()),
///     Box::new(HistoryNavigator::new("home")),
/// );
/// app.initialize();
/// assert!(app.filtered_profiles().is_empty());
/// assert_eq!(app.current_fragment(), "home");
/// ```
pub struct App {
    profiles: Vec<Profile>,
    settings: Settings,
    view: ViewState,
    /// Indices into `profiles` that pass the current filter
    filtered: Vec<usize>,
    /// Current input mode
    pub mode: AppMode,
    /// Cursor position in the filtered list
    pub selected: usize,
    /// Raw search box contents (the stored term is lowercased)
    pub search_input: String,
    /// Cursor position within the active text input
    pub cursor_position: usize,
    /// Input buffer for filename entry
    pub filename_input: String,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Scroll position in the detail body
    pub detail_scroll: u16,
    /// Temporary status message to display
    pub status_message: Option<String>,
    source: Arc<dyn ProfileSource>,
    preferences: Box<dyn PreferenceStore>,
    navigator: Box<dyn Navigator>,
    clipboard: Option<Box<dyn ClipboardSink>>,
}

impl App {
    /// Builds the coordinator with default filters and the dark-mode flag
    /// read from the preference store. Nothing is fetched yet; call
    /// [`App::initialize`] for that.
    pub fn new(
        source: Arc<dyn ProfileSource>,
        preferences: Box<dyn PreferenceStore>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        let dark_mode = preferences.get(DARK_MODE_KEY).unwrap_or(false);

        Self {
            profiles: Vec::new(),
            settings: Settings::default(),
            view: ViewState::new(dark_mode),
            filtered: Vec::new(),
            mode: AppMode::Browse,
            selected: 0,
            search_input: String::new(),
            cursor_position: 0,
            filename_input: String::new(),
            help_scroll: 0,
            detail_scroll: 0,
            status_message: None,
            source,
            preferences,
            navigator,
            clipboard: None,
        }
    }

    /// Attaches the clipboard used by [`App::copy_detail_email`]. Without
    /// one, copying reports that no clipboard is available.
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Loads the data and derives the route from the current fragment.
    pub fn initialize(&mut self) {
        self.load_data();
        self.sync_route();
    }

    /// Fetches synchronously from the profile source.
    pub fn load_data(&mut self) {
        let result = self.source.fetch();
        self.apply_refresh(result);
    }

    /// Replaces the profile list with a fetch result.
    ///
    /// A failed fetch degrades to an empty list. An open detail is
    /// re-resolved by id against the new list and closed if it is gone.
    ///
    /// # Arguments
    ///
    /// * `result` - Payload from the profile source, or the fetch error
    pub fn apply_refresh(&mut self, result: DomainResult<DirectoryData>) {
        match result {
            Ok(data) => {
                tracing::info!(
                    count = data.profiles.len(),
                    location = self.source.location(),
                    "loaded profiles"
                );
                self.profiles = data.profiles;
                self.settings = data.settings;
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading profiles");
                self.profiles.clear();
                self.settings = Settings::default();
                self.status_message = Some(format!("Could not load profiles: {}", e));
            }
        }

        self.recompute();

        if let Some(id) = self.view.detail_id().map(str::to_string) {
            if self.find_profile(&id).is_none() {
                tracing::info!(id = %id, "open profile disappeared after refresh");
                self.view.route = ViewRoute::Home;
                self.navigator.replace(HOME_FRAGMENT);
            }
        }
    }

    /// The full profile list from the last fetch, unfiltered.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// Directory settings from the last fetch, or defaults after a failure.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read-only view of the filter criteria, route and display preference.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Whether the dark display preference is active.
    pub fn dark_mode(&self) -> bool {
        self.view.dark_mode
    }

    /// The selected detail tab, or `None` while no detail is open.
    pub fn active_tab(&self) -> Option<DetailTab> {
        self.view.active_tab()
    }

    /// The navigator's current fragment, without the leading `#`.
    pub fn current_fragment(&self) -> &str {
        self.navigator.current()
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    /// A shared handle to the profile source, for the refresh worker.
    pub fn source(&self) -> Arc<dyn ProfileSource> {
        Arc::clone(&self.source)
    }

    /// Looks a profile up by id in the full list, ignoring the filter.
    pub fn find_profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// The filtered view, in source order.
    pub fn filtered_profiles(&self) -> Vec<&Profile> {
        self.filtered.iter().map(|&index| &self.profiles[index]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// The profile under the list cursor, if the filtered list is not empty.
    pub fn selected_profile(&self) -> Option<&Profile> {
        self.filtered
            .get(self.selected)
            .map(|&index| &self.profiles[index])
    }

    /// The profile shown in the detail view, if one is open.
    pub fn detail_profile(&self) -> Option<&Profile> {
        self.view.detail_id().and_then(|id| self.find_profile(id))
    }

    fn recompute(&mut self) {
        self.filtered = self.view.filter().matching_indices(&self.profiles);
        self.selected = self.selected.min(self.filtered.len().saturating_sub(1));
    }

    /// Stores the lowercased term and refilters.
    pub fn set_search_term(&mut self, text: &str) {
        self.view.search_term = text.to_lowercase();
        self.recompute();
    }

    /// Replaces the theme selector and refilters.
    ///
    /// # Arguments
    ///
    /// * `filter` - `ThemeFilter::All` or a single theme
    pub fn set_theme_filter(&mut self, filter: ThemeFilter) {
        self.view.theme_filter = filter;
        self.recompute();
    }

    /// Advances to the next theme selector, wrapping back to all themes.
    pub fn cycle_theme_filter(&mut self) {
        self.set_theme_filter(self.view.theme_filter.next());
    }

    /// Pushes the parsed route onto the history and re-derives state from it.
    pub fn navigate(&mut self, route: &str) {
        let fragment = Route::parse(route).to_fragment();
        if self.navigator.current() != fragment {
            self.navigator.push(&fragment);
        }
        self.sync_route();
    }

    /// Derives the route state from the current fragment alone.
    ///
    /// An unknown profile id leaves the detail closed and rewrites the
    /// fragment to `home` so the two never disagree.
    pub fn sync_route(&mut self) {
        match Route::parse(self.navigator.current()) {
            Route::Home => {
                self.view.route = ViewRoute::Home;
            }
            Route::Profile(id) => {
                if self.find_profile(&id).is_some() {
                    tracing::debug!(id = %id, "route opened profile");
                    self.select_by_id(&id);
                    self.view.route = ViewRoute::Detail {
                        profile_id: id,
                        tab: DetailTab::About,
                    };
                    self.detail_scroll = 0;
                } else {
                    tracing::warn!(id = %id, "route points at unknown profile");
                    self.view.route = ViewRoute::Home;
                    self.navigator.replace(HOME_FRAGMENT);
                    self.status_message = Some(format!("Profile '{}' not found", id));
                }
            }
        }
    }

    /// Opens the detail view on the About tab. Returns `false`, without
    /// touching any state, when the id is unknown.
    pub fn open_detail(&mut self, id: &str) -> bool {
        if self.find_profile(id).is_none() {
            tracing::debug!(id = %id, "ignoring request to open unknown profile");
            return false;
        }

        self.select_by_id(id);
        self.view.route = ViewRoute::Detail {
            profile_id: id.to_string(),
            tab: DetailTab::About,
        };
        self.detail_scroll = 0;
        self.navigator.push(&Route::profile(id).to_fragment());
        true
    }

    /// Opens the detail for the profile under the list cursor.
    pub fn open_selected(&mut self) -> bool {
        match self.selected_profile().map(|p| p.id.clone()) {
            Some(id) => self.open_detail(&id),
            None => false,
        }
    }

    /// Returns to the card list and pushes `home` onto the history.
    ///
    /// Does nothing when the list is already showing and the fragment is
    /// already `home`, so repeated closes add no history entries.
    pub fn close_detail(&mut self) {
        if !self.view.is_detail_open() && self.navigator.current() == HOME_FRAGMENT {
            return;
        }
        self.view.route = ViewRoute::Home;
        self.navigator.push(HOME_FRAGMENT);
    }

    /// Only applies while a detail is open.
    pub fn switch_tab(&mut self, tab: DetailTab) -> bool {
        match &mut self.view.route {
            ViewRoute::Detail { tab: active, .. } => {
                *active = tab;
                self.detail_scroll = 0;
                true
            }
            ViewRoute::Home => false,
        }
    }

    /// Moves to the next detail tab, wrapping from Contact to About.
    pub fn next_tab(&mut self) -> bool {
        match self.active_tab() {
            Some(tab) => self.switch_tab(tab.next()),
            None => false,
        }
    }

    /// Moves to the previous detail tab, wrapping from About to Contact.
    pub fn previous_tab(&mut self) -> bool {
        match self.active_tab() {
            Some(tab) => self.switch_tab(tab.previous()),
            None => false,
        }
    }

    /// Flips dark mode and writes it through to the preference store.
    pub fn toggle_display_preference(&mut self) {
        self.view.dark_mode = !self.view.dark_mode;

        if let Err(e) = self.preferences.set(DARK_MODE_KEY, self.view.dark_mode) {
            tracing::warn!(error = %e, "could not persist display preference");
            self.status_message = Some(format!("Could not save preference: {}", e));
        }
    }

    /// Steps back through the fragment history and re-derives the route.
    ///
    /// Returns `false` when there is no older entry.
    pub fn go_back(&mut self) -> bool {
        if self.navigator.back() {
            self.sync_route();
            true
        } else {
            false
        }
    }

    /// Steps forward through the fragment history and re-derives the route.
    ///
    /// Returns `false` when there is no newer entry.
    pub fn go_forward(&mut self) -> bool {
        if self.navigator.forward() {
            self.sync_route();
            true
        } else {
            false
        }
    }

    /// Copies the open profile's email address to the clipboard and reports
    /// the outcome in the status bar.
    ///
    /// Returns `true` only when the text was handed to the clipboard.
    pub fn copy_detail_email(&mut self) -> bool {
        let Some(email) = self.detail_profile().and_then(|p| p.email.clone()) else {
            self.status_message = Some("This profile has no email address".to_string());
            return false;
        };

        let result = match self.clipboard.as_mut() {
            Some(clipboard) => clipboard.set_text(&email),
            None => Err(DomainError::Clipboard("no system clipboard".to_string())),
        };
        match result {
            Ok(()) => {
                self.status_message = Some(format!("Copied {} to clipboard", email));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard copy failed");
                self.status_message = Some(e.to_string());
                false
            }
        }
    }

    /// Single entry point for typed events.
    pub fn dispatch(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchChanged(text) => self.set_search_term(&text),
            AppEvent::ThemeFilterChanged(filter) => self.set_theme_filter(filter),
            AppEvent::CycleThemeFilter => self.cycle_theme_filter(),
            AppEvent::Navigate(route) => self.navigate(&route),
            AppEvent::OpenProfile(id) => {
                self.open_detail(&id);
            }
            AppEvent::CloseDetail => self.close_detail(),
            AppEvent::SwitchTab(tab) => {
                self.switch_tab(tab);
            }
            AppEvent::NextTab => {
                self.next_tab();
            }
            AppEvent::PreviousTab => {
                self.previous_tab();
            }
            AppEvent::ToggleDisplayPreference => self.toggle_display_preference(),
            AppEvent::HistoryBack => {
                self.go_back();
            }
            AppEvent::HistoryForward => {
                self.go_forward();
            }
            AppEvent::Refreshed(result) => self.apply_refresh(result),
        }
    }

    fn select_by_id(&mut self, id: &str) {
        if let Some(pos) = self
            .filtered
            .iter()
            .position(|&index| self.profiles[index].id == id)
        {
            self.selected = pos;
        }
    }

    /// Moves the list cursor down one card, stopping at the last.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    /// Moves the list cursor up one card, stopping at the first.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    /// Switches to search mode, keeping the current query for editing.
    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.cursor_position = self.search_input.len();
        self.status_message = None;
    }

    /// Leaves search mode with the query still applied.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Browse;
        self.cursor_position = 0;

        let count = self.filtered_len();
        if !self.search_input.is_empty() {
            self.status_message = Some(format!(
                "{} profile{} match '{}'",
                count,
                if count == 1 { "" } else { "s" },
                self.search_input
            ));
        }
    }

    /// Leaves search mode and clears the query.
    pub fn cancel_search(&mut self) {
        self.mode = AppMode::Browse;
        self.search_input.clear();
        self.cursor_position = 0;
        self.set_search_term("");
    }

    /// Inserts a character at the cursor and refilters as the user types.
    ///
    /// # Arguments
    ///
    /// * `c` - Character to insert
    pub fn search_insert(&mut self, c: char) {
        self.search_input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
        self.dispatch(AppEvent::SearchChanged(self.search_input.clone()));
    }

    /// Deletes the character before the cursor.
    pub fn search_backspace(&mut self) {
        if let Some(c) = self.search_input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.search_input.remove(self.cursor_position);
            self.dispatch(AppEvent::SearchChanged(self.search_input.clone()));
        }
    }

    /// Deletes the character under the cursor.
    pub fn search_delete(&mut self) {
        if self.cursor_position < self.search_input.len() {
            self.search_input.remove(self.cursor_position);
            self.dispatch(AppEvent::SearchChanged(self.search_input.clone()));
        }
    }

    /// Opens the help popup scrolled to the top.
    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    /// Switches to CSV export mode to prompt for a filename.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = "profiles.csv".to_string();
        self.cursor_position = self.filename_input.len();
        self.status_message = None;
    }

    /// Returns the filename input if not empty, otherwise the default.
    pub fn get_csv_export_filename(&self) -> String {
        if self.filename_input.is_empty() {
            "profiles.csv".to_string()
        } else {
            self.filename_input.clone()
        }
    }

    /// Abandons the export prompt and returns to browse mode.
    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Browse;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    /// Processes the result of a CSV export and returns to browse mode.
    ///
    /// # Arguments
    ///
    /// * `result` - The written filename, or the export error
    pub fn set_csv_export_result(&mut self, result: DomainResult<String>) {
        match result {
            Ok(filename) => {
                tracing::info!(file = %filename, "exported profiles");
                self.status_message = Some(format!(
                    "Exported {} profiles to {}",
                    self.filtered_len(),
                    filename
                ));
            }
            Err(error) => {
                tracing::warn!(error = %error, "profile export failed");
                self.status_message = Some(error.to_string());
            }
        }

        self.mode = AppMode::Browse;
        self.filename_input.clear();
        self.cursor_position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Theme};
    use crate::infrastructure::{HistoryNavigator, MemoryPreferenceStore, StaticSource};
    use std::sync::Mutex;

    struct FailingPreferences;

    impl PreferenceStore for FailingPreferences {
        fn get(&self, _key: &str) -> Option<bool> {
            None
        }

        fn set(&mut self, _key: &str, _value: bool) -> DomainResult<()> {
            Err(DomainError::Config("read-only".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        copied: Arc<Mutex<Vec<String>>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> DomainResult<()> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn ann_and_bo() -> DirectoryData {
        DirectoryData {
            profiles: vec![
                Profile {
                    id: "a".to_string(),
                    name: "Ann".to_string(),
                    role: "Dev".to_string(),
                    bio: "loves go".to_string(),
                    theme: Some(Theme::Blue),
                    ..Default::default()
                },
                Profile {
                    id: "b".to_string(),
                    name: "Bo".to_string(),
                    role: "PM".to_string(),
                    bio: "likes rust".to_string(),
                    theme: Some(Theme::Green),
                    ..Default::default()
                },
            ],
            settings: Settings::default(),
        }
    }

    fn create_app_at(fragment: &str) -> App {
        let mut app = App::new(
            Arc::new(StaticSource::new(ann_and_bo())),
            Box::new(MemoryPreferenceStore::default()),
            Box::new(HistoryNavigator::new(fragment)),
        );
        app.initialize();
        app
    }

    fn create_app() -> App {
        create_app_at("")
    }

    fn names(app: &App) -> Vec<&str> {
        app.filtered_profiles()
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    #[test]
    fn test_app_initial_state() {
        let app = create_app();
        assert!(matches!(app.mode, AppMode::Browse));
        assert_eq!(app.view().route, ViewRoute::Home);
        assert_eq!(app.view().theme_filter, ThemeFilter::All);
        assert!(app.view().search_term.is_empty());
        assert!(!app.dark_mode());
        assert_eq!(names(&app), vec!["Ann", "Bo"]);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_dark_mode_read_from_preferences() {
        let mut preferences = MemoryPreferenceStore::default();
        preferences.set(DARK_MODE_KEY, true).unwrap();

        let app = App::new(
            Arc::new(StaticSource::new(ann_and_bo())),
            Box::new(preferences),
            Box::new(HistoryNavigator::new("home")),
        );
        assert!(app.dark_mode());
    }

    #[test]
    fn test_search_then_theme_scenario() {
        let mut app = create_app();

        app.set_search_term("dev");
        assert_eq!(names(&app), vec!["Ann"]);

        app.set_search_term("");
        app.set_theme_filter(ThemeFilter::Only(Theme::Green));
        assert_eq!(names(&app), vec!["Bo"]);
    }

    #[test]
    fn test_search_term_is_lowercased() {
        let mut app = create_app();
        app.set_search_term("RUST");
        assert_eq!(app.view().search_term, "rust");
        assert_eq!(names(&app), vec!["Bo"]);
    }

    #[test]
    fn test_set_search_term_is_idempotent() {
        let mut app = create_app();
        app.set_search_term("o");
        let once: Vec<String> = names(&app).iter().map(|s| s.to_string()).collect();
        app.set_search_term("o");
        assert_eq!(names(&app), once);
    }

    #[test]
    fn test_cycle_theme_filter() {
        let mut app = create_app();
        app.cycle_theme_filter();
        assert_eq!(app.view().theme_filter, ThemeFilter::Only(Theme::Blue));
        assert_eq!(names(&app), vec!["Ann"]);
    }

    #[test]
    fn test_navigate_round_trip() {
        let mut app = create_app();

        app.navigate("profile/b");
        assert_eq!(
            app.view().route,
            ViewRoute::Detail {
                profile_id: "b".to_string(),
                tab: DetailTab::About
            }
        );
        assert_eq!(app.current_fragment(), "profile/b");
        assert_eq!(app.detail_profile().map(|p| p.name.as_str()), Some("Bo"));

        app.close_detail();
        assert_eq!(app.view().route, ViewRoute::Home);
        assert_eq!(app.current_fragment(), "home");
        assert!(app.detail_profile().is_none());
    }

    #[test]
    fn test_navigate_to_unknown_profile() {
        let mut app = create_app();
        app.navigate("#profile/missing");

        assert_eq!(app.view().route, ViewRoute::Home);
        assert_eq!(app.current_fragment(), "home");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Profile 'missing' not found")
        );
    }

    #[test]
    fn test_open_missing_detail_is_noop() {
        let mut app = create_app();
        let fragment_before = app.current_fragment().to_string();

        assert!(!app.open_detail("missing"));
        assert_eq!(app.view().route, ViewRoute::Home);
        assert_eq!(app.current_fragment(), fragment_before);
    }

    #[test]
    fn test_open_detail_resets_tab() {
        let mut app = create_app();

        assert!(app.open_detail("a"));
        assert!(app.switch_tab(DetailTab::Contact));
        assert_eq!(app.active_tab(), Some(DetailTab::Contact));

        app.close_detail();
        assert!(app.open_detail("a"));
        assert_eq!(app.active_tab(), Some(DetailTab::About));
        assert_eq!(app.current_fragment(), "profile/a");
    }

    #[test]
    fn test_switch_tab_requires_open_detail() {
        let mut app = create_app();
        assert!(!app.switch_tab(DetailTab::Skills));
        assert!(!app.next_tab());
        assert_eq!(app.active_tab(), None);
    }

    #[test]
    fn test_tab_cycling_in_detail() {
        let mut app = create_app();
        app.open_detail("b");
        app.next_tab();
        assert_eq!(app.active_tab(), Some(DetailTab::Skills));
        app.previous_tab();
        app.previous_tab();
        assert_eq!(app.active_tab(), Some(DetailTab::Contact));
    }

    #[test]
    fn test_back_and_forward_rederive_route() {
        let mut app = create_app();

        app.open_detail("a");
        app.switch_tab(DetailTab::Projects);
        app.close_detail();

        assert!(app.go_back());
        assert_eq!(
            app.view().route,
            ViewRoute::Detail {
                profile_id: "a".to_string(),
                tab: DetailTab::About
            }
        );

        assert!(app.go_back());
        assert_eq!(app.view().route, ViewRoute::Home);
        assert!(!app.go_back());

        assert!(app.go_forward());
        assert_eq!(app.view().detail_id(), Some("a"));
        assert!(app.go_forward());
        assert_eq!(app.view().route, ViewRoute::Home);
        assert!(!app.go_forward());
    }

    #[test]
    fn test_startup_route_from_fragment() {
        let app = create_app_at("#profile/b");
        assert_eq!(app.view().detail_id(), Some("b"));
        assert_eq!(app.selected, 1);

        let missing = create_app_at("profile/zzz");
        assert_eq!(missing.view().route, ViewRoute::Home);
        assert_eq!(missing.current_fragment(), "home");
    }

    #[test]
    fn test_close_detail_on_home_is_noop() {
        let mut app = create_app_at("home");
        app.close_detail();
        assert_eq!(app.current_fragment(), "home");
        assert!(!app.go_back());
    }

    #[test]
    fn test_toggle_display_preference_writes_through() {
        let mut app = create_app();
        let original = app.dark_mode();

        app.toggle_display_preference();
        assert_eq!(app.dark_mode(), !original);
        assert_eq!(app.preferences().get(DARK_MODE_KEY), Some(app.dark_mode()));

        app.toggle_display_preference();
        assert_eq!(app.dark_mode(), original);
        assert_eq!(app.preferences().get(DARK_MODE_KEY), Some(original));
    }

    #[test]
    fn test_toggle_with_failing_store_still_flips() {
        let mut app = App::new(
            Arc::new(StaticSource::new(ann_and_bo())),
            Box::new(FailingPreferences),
            Box::new(HistoryNavigator::new("home")),
        );
        app.toggle_display_preference();
        assert!(app.dark_mode());
        assert!(app.status_message.as_deref().unwrap().starts_with("Could not save preference"));
    }

    #[test]
    fn test_fetch_failure_degrades_to_empty_list() {
        let mut app = App::new(
            Arc::new(StaticSource::failing("offline")),
            Box::new(MemoryPreferenceStore::default()),
            Box::new(HistoryNavigator::new("home")),
        );
        app.initialize();

        assert!(app.profiles().is_empty());
        assert!(app.filtered_profiles().is_empty());
        assert!(app.selected_profile().is_none());
        assert!(app.status_message.is_some());
        assert_eq!(app.settings().title(), "Smoelenboek");
    }

    #[test]
    fn test_refresh_keeps_open_detail_by_id() {
        let mut app = create_app();
        app.open_detail("b");
        app.switch_tab(DetailTab::Skills);

        let mut data = ann_and_bo();
        data.profiles.reverse();
        data.profiles[0].bio = "likes rust a lot".to_string();
        app.dispatch(AppEvent::Refreshed(Ok(data)));

        assert_eq!(app.view().detail_id(), Some("b"));
        assert_eq!(app.active_tab(), Some(DetailTab::Skills));
        assert_eq!(
            app.detail_profile().map(|p| p.bio.as_str()),
            Some("likes rust a lot")
        );
        assert_eq!(names(&app), vec!["Bo", "Ann"]);
    }

    #[test]
    fn test_refresh_closes_vanished_detail() {
        let mut app = create_app();
        app.open_detail("b");

        let mut data = ann_and_bo();
        data.profiles.truncate(1);
        app.apply_refresh(Ok(data));

        assert_eq!(app.view().route, ViewRoute::Home);
        assert_eq!(app.current_fragment(), "home");
    }

    #[test]
    fn test_refresh_reapplies_current_filter() {
        let mut app = create_app();
        app.set_search_term("bo");

        let mut data = ann_and_bo();
        data.profiles.push(Profile {
            id: "c".to_string(),
            name: "Bob".to_string(),
            ..Default::default()
        });
        app.apply_refresh(Ok(data));

        assert_eq!(names(&app), vec!["Bo", "Bob"]);
    }

    #[test]
    fn test_selection_is_clamped_after_filtering() {
        let mut app = create_app();
        app.select_last();
        assert_eq!(app.selected, 1);

        app.set_search_term("ann");
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_profile().map(|p| p.id.as_str()), Some("a"));

        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_open_selected() {
        let mut app = create_app();
        app.select_next();
        assert!(app.open_selected());
        assert_eq!(app.view().detail_id(), Some("b"));

        app.close_detail();
        app.set_search_term("nobody");
        assert!(!app.open_selected());
    }

    #[test]
    fn test_dispatch_events() {
        let mut app = create_app();

        app.dispatch(AppEvent::SearchChanged("PM".to_string()));
        assert_eq!(names(&app), vec!["Bo"]);

        app.dispatch(AppEvent::OpenProfile("b".to_string()));
        app.dispatch(AppEvent::SwitchTab(DetailTab::Contact));
        assert_eq!(app.active_tab(), Some(DetailTab::Contact));

        app.dispatch(AppEvent::CloseDetail);
        app.dispatch(AppEvent::HistoryBack);
        assert_eq!(app.view().detail_id(), Some("b"));

        app.dispatch(AppEvent::Navigate("home".to_string()));
        assert_eq!(app.view().route, ViewRoute::Home);

        app.dispatch(AppEvent::ToggleDisplayPreference);
        assert!(app.dark_mode());
    }

    #[test]
    fn test_search_mode_editing() {
        let mut app = create_app();
        app.start_search();
        assert!(matches!(app.mode, AppMode::Search));

        for c in "AN".chars() {
            app.search_insert(c);
        }
        assert_eq!(app.search_input, "AN");
        assert_eq!(names(&app), vec!["Ann"]);

        app.search_backspace();
        assert_eq!(app.search_input, "A");
        assert_eq!(names(&app), vec!["Ann"]);

        app.finish_search();
        assert!(matches!(app.mode, AppMode::Browse));
        assert_eq!(app.status_message.as_deref(), Some("1 profile match 'A'"));

        app.start_search();
        app.cancel_search();
        assert!(app.search_input.is_empty());
        assert_eq!(names(&app), vec!["Ann", "Bo"]);
    }

    #[test]
    fn test_csv_export_flow() {
        let mut app = create_app();
        app.start_csv_export();
        assert!(matches!(app.mode, AppMode::ExportCsv));
        assert_eq!(app.get_csv_export_filename(), "profiles.csv");

        app.filename_input.clear();
        assert_eq!(app.get_csv_export_filename(), "profiles.csv");

        app.set_csv_export_result(Ok("out.csv".to_string()));
        assert!(matches!(app.mode, AppMode::Browse));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Exported 2 profiles to out.csv")
        );

        app.start_csv_export();
        app.set_csv_export_result(Err(DomainError::Export("disk full".to_string())));
        assert_eq!(app.status_message.as_deref(), Some("Export failed: disk full"));
    }

    #[test]
    fn test_copy_detail_email_uses_the_session_clipboard() {
        let mut data = ann_and_bo();
        data.profiles[0].email = Some("ann@example.com".to_string());
        let copied = Arc::new(Mutex::new(Vec::new()));
        let clipboard = RecordingClipboard {
            copied: Arc::clone(&copied),
        };

        let mut app = App::new(
            Arc::new(StaticSource::new(data)),
            Box::new(MemoryPreferenceStore::default()),
            Box::new(HistoryNavigator::new("profile/a")),
        )
        .with_clipboard(Box::new(clipboard));
        app.initialize();

        assert!(app.copy_detail_email());
        assert!(app.copy_detail_email());
        assert_eq!(
            *copied.lock().unwrap(),
            vec!["ann@example.com", "ann@example.com"]
        );
        assert_eq!(
            app.status_message.as_deref(),
            Some("Copied ann@example.com to clipboard")
        );
    }

    #[test]
    fn test_copy_detail_email_without_clipboard() {
        let mut data = ann_and_bo();
        data.profiles[0].email = Some("ann@example.com".to_string());
        let mut app = App::new(
            Arc::new(StaticSource::new(data)),
            Box::new(MemoryPreferenceStore::default()),
            Box::new(HistoryNavigator::new("profile/a")),
        );
        app.initialize();

        assert!(!app.copy_detail_email());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Clipboard unavailable: no system clipboard")
        );

        app.close_detail();
        assert!(!app.copy_detail_email());
        assert_eq!(
            app.status_message.as_deref(),
            Some("This profile has no email address")
        );
    }
}
