use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Categorical display tag on a profile, used for filtering and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Blue,
    Green,
    Dark,
    Purple,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Blue, Theme::Green, Theme::Dark, Theme::Purple];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Dark => "dark",
            Theme::Purple => "purple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Blue => "Blue",
            Theme::Green => "Green",
            Theme::Dark => "Dark",
            Theme::Purple => "Purple",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" => Ok(Theme::Blue),
            "green" => Ok(Theme::Green),
            "dark" => Ok(Theme::Dark),
            "purple" => Ok(Theme::Purple),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Theme selector of the filter bar: either every theme or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeFilter {
    #[default]
    All,
    Only(Theme),
}

impl ThemeFilter {
    pub fn accepts(&self, theme: Option<Theme>) -> bool {
        match self {
            ThemeFilter::All => true,
            ThemeFilter::Only(wanted) => theme == Some(*wanted),
        }
    }

    /// Steps through All, then each theme in declaration order, then back to All.
    pub fn next(&self) -> ThemeFilter {
        match self {
            ThemeFilter::All => ThemeFilter::Only(Theme::ALL[0]),
            ThemeFilter::Only(theme) => {
                let pos = Theme::ALL.iter().position(|t| t == theme).unwrap_or(0);
                match Theme::ALL.get(pos + 1) {
                    Some(next) => ThemeFilter::Only(*next),
                    None => ThemeFilter::All,
                }
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeFilter::All => "All Themes",
            ThemeFilter::Only(theme) => theme.label(),
        }
    }
}

impl FromStr for ThemeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ThemeFilter::All)
        } else {
            s.parse().map(ThemeFilter::Only)
        }
    }
}

/// Tabs of the profile detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    About,
    Skills,
    Projects,
    Contact,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::About,
        DetailTab::Skills,
        DetailTab::Projects,
        DetailTab::Contact,
    ];

    pub fn index(&self) -> usize {
        DetailTab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> DetailTab {
        DetailTab::ALL[(self.index() + 1) % DetailTab::ALL.len()]
    }

    pub fn previous(&self) -> DetailTab {
        let len = DetailTab::ALL.len();
        DetailTab::ALL[(self.index() + len - 1) % len]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::About => "About",
            DetailTab::Skills => "Skills",
            DetailTab::Projects => "Projects",
            DetailTab::Contact => "Contact",
        }
    }
}

impl FromStr for DetailTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "about" => Ok(DetailTab::About),
            "skills" => Ok(DetailTab::Skills),
            "projects" => Ok(DetailTab::Projects),
            "contact" => Ok(DetailTab::Contact),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

/// A single directory entry representing one person.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_theme")]
    pub theme: Option<Theme>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hobbies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub office: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social: BTreeMap<String, String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub pitch: Option<String>,
    #[serde(default)]
    pub work: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub age: Option<String>,
}

impl Profile {
    pub fn has_contact_info(&self) -> bool {
        self.email.is_some()
            || self.phone.is_some()
            || self.office.is_some()
            || self.location.is_some()
            || !self.social.is_empty()
    }
}

/// Directory-wide display settings shipped alongside the profiles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
}

impl Settings {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Smoelenboek")
    }

    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("Student Portfolio")
    }
}

/// The whole payload of the static data resource.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DirectoryData {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub settings: Settings,
}

impl DirectoryData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}

// A `null` collection reads as an empty one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Unknown theme names, and non-string themes, read as no theme.
fn lenient_theme<'de, D>(deserializer: D) -> Result<Option<Theme>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok()))
}
