use crate::domain::{DomainError, DomainResult, Profile};
use std::path::Path;

/// Writes the visible profiles to a CSV file.
pub struct CsvExporter;

impl CsvExporter {
    const HEADERS: [&'static str; 9] = [
        "id", "name", "role", "theme", "email", "phone", "office", "location", "skills",
    ];

    /// Returns the filename on success.
    pub fn export_profiles(profiles: &[&Profile], filename: &str) -> DomainResult<String> {
        let export_error = |e: csv::Error| DomainError::Export(e.to_string());

        let mut writer = csv::Writer::from_path(Path::new(filename)).map_err(export_error)?;
        writer.write_record(Self::HEADERS).map_err(export_error)?;

        for profile in profiles {
            let theme = profile.theme.map(|t| t.as_str()).unwrap_or_default();
            let skills = profile.skills.join("; ");
            writer
                .write_record([
                    profile.id.as_str(),
                    profile.name.as_str(),
                    profile.role.as_str(),
                    theme,
                    profile.email.as_deref().unwrap_or_default(),
                    profile.phone.as_deref().unwrap_or_default(),
                    profile.office.as_deref().unwrap_or_default(),
                    profile.location.as_deref().unwrap_or_default(),
                    skills.as_str(),
                ])
                .map_err(export_error)?;
        }

        writer
            .flush()
            .map_err(|e| DomainError::io(filename, e))?;
        Ok(filename.to_string())
    }
}
