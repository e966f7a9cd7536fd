use std::{ops::Deref, sync::LazyLock, time::Duration};

use microcuenca_utils::microcuenca_version;

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "Microcuenca Email Service/{} (+{})",
        microcuenca_version(),
        env!("CARGO_PKG_REPOSITORY")
    )
});

/// Connecting never takes longer than the whole request.
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the EmailJS api. Every request fails once `timeout` has elapsed,
/// so a stalled provider cannot hold a submission forever.
#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT.as_str())
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .timeout(timeout)
            .build()
            .unwrap();
        Self(client)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent() {
        assert!(USER_AGENT.starts_with("Microcuenca Email Service/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_REPOSITORY")));
    }
}
