use sugar_config::Bundle;

/// Static metadata of the bundle an activity was launched from.
pub trait BundleMetadata: Send + Sync {
    /// Activity type, the bundle service name.
    fn service_name(&self) -> &str;

    /// Type of the default network service of the activity.
    fn default_type(&self) -> &str;
}

impl BundleMetadata for Bundle {
    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn default_type(&self) -> &str {
        &self.default_type
    }
}
