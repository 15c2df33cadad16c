use super::{types::RequestSettings, ConfigError};

/// Validate request settings
/// Currently validates:
/// - The rolling window is at least one day
pub fn validate_settings(settings: &RequestSettings) -> Result<(), ConfigError> {
    if settings.delay_in_days == 0 {
        return Err(ConfigError::ValidationError(
            "delay_in_days cannot be 0".to_string(),
        ));
    }

    Ok(())
}
