use crate::domain::{DetailTab, ProfileFilter, ThemeFilter};

/// Which view the directory is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewRoute {
    #[default]
    Home,
    Detail { profile_id: String, tab: DetailTab },
}

/// Filters, route and display preference of the directory browser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Lowercased search term
    pub search_term: String,
    pub theme_filter: ThemeFilter,
    pub route: ViewRoute,
    /// Persisted across sessions
    pub dark_mode: bool,
}

impl ViewState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Default::default()
        }
    }

    pub fn filter(&self) -> ProfileFilter {
        ProfileFilter::new(&self.search_term, self.theme_filter)
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self.route, ViewRoute::Detail { .. })
    }

    pub fn detail_id(&self) -> Option<&str> {
        match &self.route {
            ViewRoute::Detail { profile_id, .. } => Some(profile_id),
            ViewRoute::Home => None,
        }
    }

    pub fn active_tab(&self) -> Option<DetailTab> {
        match &self.route {
            ViewRoute::Detail { tab, .. } => Some(*tab),
            ViewRoute::Home => None,
        }
    }
}
