use std::time::Duration;

use microcuenca_models::stats::MemoryUsage;

/// Information about the running server process.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ProcessService: Send + Sync + 'static {
    /// Returns the time elapsed since the process started.
    fn uptime(&self) -> Duration;

    /// Returns the current memory usage of the process.
    fn memory_usage(&self) -> anyhow::Result<MemoryUsage>;
}

#[cfg(feature = "mock")]
impl MockProcessService {
    pub fn with_uptime(mut self, uptime: Duration) -> Self {
        self.expect_uptime().once().return_const(uptime);
        self
    }

    pub fn with_memory_usage(mut self, memory_usage: MemoryUsage) -> Self {
        self.expect_memory_usage()
            .once()
            .return_once(move || Ok(memory_usage));
        self
    }
}
