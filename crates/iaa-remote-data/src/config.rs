//! Remote-data access configuration.

/// Payload type carrying in-app automation schedules.
pub const IN_APP_MESSAGES_PAYLOAD_TYPE: &str = "in_app_messages";

/// Configuration for [`crate::RemoteScheduleFreshnessCoordinator`]
#[derive(Debug, Clone)]
pub struct RemoteDataAccessConfig {
    /// Payload types requested from the remote-data feed
    pub remote_data_types: Vec<String>,
}

impl RemoteDataAccessConfig {
    /// Replace the requested payload types.
    pub fn with_remote_data_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remote_data_types = types.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for RemoteDataAccessConfig {
    fn default() -> Self {
        Self {
            remote_data_types: vec![IN_APP_MESSAGES_PAYLOAD_TYPE.to_string()],
        }
    }
}
