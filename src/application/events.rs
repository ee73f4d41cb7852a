use crate::domain::{DetailTab, DirectoryData, DomainResult, ThemeFilter};

/// Typed requests the presentation layer and the refresh loop send to the
/// coordinator through [`App::dispatch`](super::App::dispatch).
#[derive(Debug)]
pub enum AppEvent {
    SearchChanged(String),
    ThemeFilterChanged(ThemeFilter),
    CycleThemeFilter,
    /// Raw fragment, e.g. `profile/ann` or `#home`
    Navigate(String),
    OpenProfile(String),
    CloseDetail,
    SwitchTab(DetailTab),
    NextTab,
    PreviousTab,
    ToggleDisplayPreference,
    HistoryBack,
    HistoryForward,
    Refreshed(DomainResult<DirectoryData>),
}
