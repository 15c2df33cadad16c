use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::RequestSettings, validate_settings, ConfigError};

/// Load request settings from file with environment variable overrides
pub fn load_settings(path: &Path) -> Result<RequestSettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let settings: RequestSettings = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("CONCIERGE_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// Load request settings from TOML string (useful for testing)
pub fn load_settings_from_str(toml_str: &str) -> Result<RequestSettings, ConfigError> {
    let settings: RequestSettings =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_settings(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApprovalMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_settings_from_str_valid() {
        let toml = r#"
delay_in_days = 30
default_limit_tv = 3
set_limit = true
"#;
        let settings = load_settings_from_str(toml).unwrap();
        assert_eq!(settings.delay_in_days, 30);
        assert_eq!(settings.default_limit_tv, 3);
        assert!(settings.set_limit);
        assert_eq!(settings.approval_method, ApprovalMethod::PerQuota);
    }

    #[test]
    fn test_load_settings_from_str_empty_uses_defaults() {
        let settings = load_settings_from_str("").unwrap();
        assert_eq!(settings.delay_in_days, 7);
        assert!(!settings.set_limit);
    }

    #[test]
    fn test_load_settings_file_not_found() {
        let result = load_settings(Path::new("/nonexistent/settings.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
delay_in_days = 14
default_limit_movies = 5
approval_method = "auto_approve"
"#
        )
        .unwrap();

        let settings = load_settings(temp_file.path()).unwrap();
        assert_eq!(settings.delay_in_days, 14);
        assert_eq!(settings.default_limit_movies, 5);
        assert_eq!(settings.approval_method, ApprovalMethod::AutoApprove);
    }
}
