use std::env;

/// Password guarding the analytics portal when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "namma cauvery";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServicesConfig {
    pub feedback_webhook_url: Option<String>,
    pub admin_password: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            feedback_webhook_url: None,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_owned(),
        }
    }
}

impl ServicesConfig {
    /// Read `CONF_FEEDBACK_WEBHOOK_URL` and `CONF_ADMIN_PASSWORD`.
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            feedback_webhook_url: non_blank("CONF_FEEDBACK_WEBHOOK_URL")
                .map(|url| url.trim().to_owned()),
            admin_password: non_blank("CONF_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = ServicesConfig::from_lookup(|_| None);
        assert_eq!(config, ServicesConfig::default());
    }

    #[test]
    fn blank_webhook_url_disables_forwarding() {
        let config = ServicesConfig::from_lookup(|key| match key {
            "CONF_FEEDBACK_WEBHOOK_URL" => Some("   ".into()),
            "CONF_ADMIN_PASSWORD" => Some("letmein".into()),
            _ => None,
        });
        assert_eq!(config.feedback_webhook_url, None);
        assert_eq!(config.admin_password, "letmein");
    }

    #[test]
    fn webhook_url_is_trimmed() {
        let config = ServicesConfig::from_lookup(|key| {
            (key == "CONF_FEEDBACK_WEBHOOK_URL").then(|| " https://hooks.example/f ".into())
        });
        assert_eq!(
            config.feedback_webhook_url.as_deref(),
            Some("https://hooks.example/f")
        );
    }
}
