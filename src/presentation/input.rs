use crate::application::{App, AppEvent, AppMode};
use crate::domain::{DetailTab, Theme, ThemeFilter};
use crate::infrastructure::CsvExporter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Browse => Self::handle_browse_mode(app, key, modifiers),
            AppMode::Search => Self::handle_search_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportCsv => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_csv_export();
            }
            return;
        }

        if modifiers.contains(KeyModifiers::ALT) {
            match key {
                KeyCode::Left => app.dispatch(AppEvent::HistoryBack),
                KeyCode::Right => app.dispatch(AppEvent::HistoryForward),
                _ => {}
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Char('[') => app.dispatch(AppEvent::HistoryBack),
            KeyCode::Char(']') => app.dispatch(AppEvent::HistoryForward),
            KeyCode::Char('d') => app.dispatch(AppEvent::ToggleDisplayPreference),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ if app.view().is_detail_open() => Self::handle_detail_keys(app, key),
            _ => Self::handle_list_keys(app, key),
        }
    }

    fn handle_list_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Enter => {
                app.open_selected();
            }
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('t') => app.dispatch(AppEvent::CycleThemeFilter),
            KeyCode::Char(c @ '0'..='4') => {
                let filter = match c {
                    '0' => ThemeFilter::All,
                    c => ThemeFilter::Only(Theme::ALL[c as usize - '1' as usize]),
                };
                app.dispatch(AppEvent::ThemeFilterChanged(filter));
            }
            _ => {}
        }
    }

    fn handle_detail_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc => app.dispatch(AppEvent::CloseDetail),
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.dispatch(AppEvent::NextTab),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                app.dispatch(AppEvent::PreviousTab)
            }
            KeyCode::Char(c @ '1'..='4') => {
                let tab = DetailTab::ALL[c as usize - '1' as usize];
                app.dispatch(AppEvent::SwitchTab(tab));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.detail_scroll = app.detail_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.detail_scroll = app.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('y') => {
                app.copy_detail_email();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Browse;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_csv_export_filename();
                let result = CsvExporter::export_profiles(&app.filtered_profiles(), &filename);
                app.set_csv_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            KeyCode::Backspace => {
                if app.cursor_position > 0 {
                    app.filename_input.remove(app.cursor_position - 1);
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Delete => {
                if app.cursor_position < app.filename_input.len() {
                    app.filename_input.remove(app.cursor_position);
                }
            }
            KeyCode::Left => {
                if app.cursor_position > 0 {
                    app.cursor_position -= 1;
                }
            }
            KeyCode::Right => {
                if app.cursor_position < app.filename_input.len() {
                    app.cursor_position += 1;
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.filename_input.len();
            }
            KeyCode::Char(c) if c.is_ascii() => {
                app.filename_input.insert(app.cursor_position, c);
                app.cursor_position += 1;
            }
            _ => {}
        }
    }

    fn handle_search_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                app.finish_search();
            }
            KeyCode::Esc => {
                app.cancel_search();
            }
            KeyCode::Backspace => {
                app.search_backspace();
            }
            KeyCode::Delete => {
                app.search_delete();
            }
            KeyCode::Left => {
                if let Some(c) = app.search_input[..app.cursor_position].chars().next_back() {
                    app.cursor_position -= c.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(c) = app.search_input[app.cursor_position..].chars().next() {
                    app.cursor_position += c.len_utf8();
                }
            }
            KeyCode::Home => {
                app.cursor_position = 0;
            }
            KeyCode::End => {
                app.cursor_position = app.search_input.len();
            }
            KeyCode::Down => {
                app.select_next();
            }
            KeyCode::Up => {
                app.select_previous();
            }
            KeyCode::Char(c) => {
                app.search_insert(c);
            }
            _ => {}
        }
    }
}
