//! Navigational routes encoded as history fragments.
//!
//! A fragment is the text after `#` in a browser URL. The browser keeps two
//! shapes of it: `home` for the card list and `profile/<id>` for a profile
//! detail. Anything else falls back to `home`.

use std::fmt;

pub const HOME_FRAGMENT: &str = "home";
const PROFILE_PREFIX: &str = "profile/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Profile(String),
}

impl Route {
    /// Parses a fragment, with or without its leading `#`.
    ///
    /// For `profile/a/b` only the first segment after the prefix is the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoelenboek::domain::Route;
    ///
    /// assert_eq!(Route::parse("#profile/ann"), Route::Profile("ann".to_string()));
    /// assert_eq!(Route::parse(""), Route::Home);
    /// assert_eq!(Route::parse("settings"), Route::Home);
    /// ```
    pub fn parse(fragment: &str) -> Route {
        let fragment = fragment.trim().trim_start_matches('#');

        match fragment.strip_prefix(PROFILE_PREFIX) {
            Some(rest) => {
                let id = rest.split('/').next().unwrap_or_default();
                if id.is_empty() {
                    Route::Home
                } else {
                    Route::Profile(id.to_string())
                }
            }
            None => Route::Home,
        }
    }

    pub fn profile(id: impl Into<String>) -> Route {
        Route::Profile(id.into())
    }

    pub fn to_fragment(&self) -> String {
        match self {
            Route::Home => HOME_FRAGMENT.to_string(),
            Route::Profile(id) => format!("{}{}", PROFILE_PREFIX, id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_fragment())
    }
}
