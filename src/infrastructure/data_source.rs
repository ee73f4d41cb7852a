use crate::application::ProfileSource;
use crate::domain::{DirectoryData, DomainError, DomainResult};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Reads the directory from a local JSON file.
pub struct FileSource {
    path: PathBuf,
    location: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

impl ProfileSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    fn fetch(&self) -> DomainResult<DirectoryData> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| DomainError::io(&self.path, e))?;
        Ok(DirectoryData::from_json(&content)?)
    }
}

/// Fetches the directory with a blocking HTTP GET.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> DomainResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Fetch {
                location: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl ProfileSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> DomainResult<DirectoryData> {
        let fetch_error = |e: reqwest::Error| DomainError::Fetch {
            location: self.url.clone(),
            message: e.to_string(),
        };

        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch_error)?;

        Ok(DirectoryData::from_json(&body)?)
    }
}

/// Serves a fixed payload, or a fixed failure.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    data: DirectoryData,
    failure: Option<String>,
}

impl StaticSource {
    pub fn new(data: DirectoryData) -> Self {
        Self {
            data,
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            data: DirectoryData::default(),
            failure: Some(message.to_string()),
        }
    }
}

impl ProfileSource for StaticSource {
    fn location(&self) -> &str {
        "static"
    }

    fn fetch(&self) -> DomainResult<DirectoryData> {
        match &self.failure {
            Some(message) => Err(DomainError::Fetch {
                location: self.location().to_string(),
                message: message.clone(),
            }),
            None => Ok(self.data.clone()),
        }
    }
}

/// Picks an HTTP source for `http://` and `https://` locations and a file
/// source for everything else.
pub fn source_for(location: &str) -> DomainResult<Arc<dyn ProfileSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(location)?))
    } else {
        Ok(Arc::new(FileSource::new(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_reads_profiles() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"profiles": [{{"id": "a", "name": "Ann"}}], "settings": {{"title": "Class"}}}}"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let data = source.fetch().unwrap();
        assert_eq!(data.profiles.len(), 1);
        assert_eq!(data.profiles[0].name, "Ann");
        assert_eq!(data.settings.title(), "Class");
    }

    #[test]
    fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("data.json"));
        assert!(matches!(source.fetch(), Err(DomainError::Io { .. })));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<html>not json</html>").unwrap();

        let source = FileSource::new(file.path());
        assert!(matches!(source.fetch(), Err(DomainError::Parse(_))));
    }

    #[test]
    fn test_static_source() {
        let ok = StaticSource::default();
        assert!(ok.fetch().unwrap().profiles.is_empty());

        let failing = StaticSource::failing("offline");
        let err = failing.fetch().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch profiles from static: offline");
    }

    #[test]
    fn test_source_for_picks_by_scheme() {
        let file = source_for("data/data.json").unwrap();
        assert_eq!(file.location(), "data/data.json");

        let http = source_for("https://example.com/data.json").unwrap();
        assert_eq!(http.location(), "https://example.com/data.json");
    }
}
