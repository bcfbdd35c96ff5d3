use serde_derive::{Deserialize, Serialize};

/// Overrides `bundle.service_name` when set.
pub const SERVICE_NAME_ENV: &str = "SUGAR_BUNDLE_SERVICE_NAME";
/// Overrides `bundle.default_type` when set.
pub const DEFAULT_TYPE_ENV: &str = "SUGAR_BUNDLE_DEFAULT_TYPE";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub bundle: BundleConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// Service name of the activity bundle (e.g. "org.laptop.Chat")
    pub service_name: Option<String>,

    /// Network service type advertised and searched by the activity
    /// (e.g. "_chat_olpc._udp")
    pub default_type: Option<String>,
}

/// Bundle metadata once every value has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub service_name: String,
    pub default_type: String,
}

impl Config {
    /// Apply the `SUGAR_BUNDLE_*` environment variables on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(service_name) = lookup(SERVICE_NAME_ENV) {
            self.bundle.service_name = Some(service_name);
        }
        if let Some(default_type) = lookup(DEFAULT_TYPE_ENV) {
            self.bundle.default_type = Some(default_type);
        }
        self
    }

    /// Resolve the bundle metadata, a missing value means the environment is misconfigured.
    pub fn bundle(&self) -> eyre::Result<Bundle> {
        let service_name = non_empty(&self.bundle.service_name).ok_or_else(|| {
            eyre::eyre!("bundle service name is not set (bundle.service_name or ${SERVICE_NAME_ENV})")
        })?;
        let default_type = non_empty(&self.bundle.default_type).ok_or_else(|| {
            eyre::eyre!("bundle default type is not set (bundle.default_type or ${DEFAULT_TYPE_ENV})")
        })?;

        Ok(Bundle {
            service_name,
            default_type,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_bundle_section() -> eyre::Result<()> {
        let config: Config = toml::from_str(
            r#"
            [bundle]
            service_name = "org.laptop.Chat"
            default_type = "_chat_olpc._udp"
            "#,
        )?;

        let bundle = config.with_overrides(no_env).bundle()?;
        assert_eq!(bundle.service_name, "org.laptop.Chat");
        assert_eq!(bundle.default_type, "_chat_olpc._udp");
        Ok(())
    }

    #[test]
    fn test_environment_takes_precedence() -> eyre::Result<()> {
        let config: Config = toml::from_str(
            r#"
            [bundle]
            service_name = "org.laptop.Chat"
            default_type = "_chat_olpc._udp"
            "#,
        )?;

        let bundle = config
            .with_overrides(|key| match key {
                SERVICE_NAME_ENV => Some("org.laptop.Sketch".to_string()),
                _ => None,
            })
            .bundle()?;

        assert_eq!(bundle.service_name, "org.laptop.Sketch");
        assert_eq!(bundle.default_type, "_chat_olpc._udp");
        Ok(())
    }

    #[test]
    fn test_environment_only() -> eyre::Result<()> {
        let bundle = Config::default()
            .with_overrides(|key| match key {
                SERVICE_NAME_ENV => Some("org.laptop.Web".to_string()),
                DEFAULT_TYPE_ENV => Some("_web_olpc._udp".to_string()),
                _ => None,
            })
            .bundle()?;

        assert_eq!(bundle.service_name, "org.laptop.Web");
        assert_eq!(bundle.default_type, "_web_olpc._udp");
        Ok(())
    }

    #[test]
    fn test_missing_values_are_rejected() {
        assert!(Config::default().with_overrides(no_env).bundle().is_err());

        let blank = Config {
            bundle: BundleConfig {
                service_name: Some("org.laptop.Chat".to_string()),
                default_type: Some("  ".to_string()),
            },
        };
        assert!(blank.bundle().is_err());
    }
}
