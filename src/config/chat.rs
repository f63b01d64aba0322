//! Chat gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Chat gateway configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatConfig {
    /// Companion web-app URL offered on the welcome menu.
    ///
    /// When unset, the welcome reply offers goal setup only.
    #[serde(default)]
    pub webapp_url: Option<String>,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webapp_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebAppUrl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_webapp_url_is_valid() {
        assert!(ChatConfig::default().validate().is_ok());
    }

    #[test]
    fn http_webapp_url_is_valid() {
        let config = ChatConfig {
            webapp_url: Some("https://app.example/stride".to_string()),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_http_webapp_url_is_rejected() {
        let config = ChatConfig {
            webapp_url: Some("ftp://app.example".to_string()),
        };
        assert!(config.validate().is_err());
    }
}
