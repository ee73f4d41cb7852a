//! Profile filtering for the directory view.
//!
//! Filtering is a pure function of the profile list and the two filter
//! criteria; there is no ranking, so matches keep their source order.

use super::models::{Profile, ThemeFilter};

/// Search term plus theme selector, applied as a logical AND.
///
/// # Examples
///
/// ```
/// use smoelenboek::domain::{Profile, ProfileFilter, ThemeFilter};
///
/// let profiles = vec![
///     Profile { id: "a".into(), name: "Ann".into(), role: "Dev".into(), ..Default::default() },
///     Profile { id: "b".into(), name: "Bo".into(), role: "PM".into(), ..Default::default() },
/// ];
///
/// let filter = ProfileFilter::new("DEV", ThemeFilter::All);
/// assert_eq!(filter.matching_indices(&profiles), vec![0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFilter {
    term: String,
    theme: ThemeFilter,
}

impl ProfileFilter {
    /// Creates a filter. The term is lowercased here so matching is
    /// case-insensitive; an empty term matches every profile.
    ///
    /// # Arguments
    ///
    /// * `term` - Free-text search term
    /// * `theme` - Theme selector the profile's theme must pass
    pub fn new(term: &str, theme: ThemeFilter) -> Self {
        Self {
            term: term.to_lowercase(),
            theme,
        }
    }

    /// The lowercased search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn theme(&self) -> ThemeFilter {
        self.theme
    }

    /// A profile matches when the term occurs in its name, role, bio or any
    /// skill, and the theme selector accepts its theme.
    pub fn matches(&self, profile: &Profile) -> bool {
        self.matches_term(profile) && self.theme.accepts(profile.theme)
    }

    fn matches_term(&self, profile: &Profile) -> bool {
        if self.term.is_empty() {
            return true;
        }

        let contains = |field: &str| field.to_lowercase().contains(&self.term);

        contains(&profile.name)
            || contains(&profile.role)
            || contains(&profile.bio)
            || profile.skills.iter().any(|skill| contains(skill))
    }

    /// Positions of the matching profiles, in source order.
    pub fn matching_indices(&self, profiles: &[Profile]) -> Vec<usize> {
        profiles
            .iter()
            .enumerate()
            .filter(|(_, profile)| self.matches(profile))
            .map(|(index, _)| index)
            .collect()
    }

    /// The matching profiles themselves, in source order.
    pub fn apply<'a>(&self, profiles: &'a [Profile]) -> Vec<&'a Profile> {
        profiles.iter().filter(|profile| self.matches(profile)).collect()
    }
}
