use std::time::{Duration, Instant};

use anyhow::Context;
use microcuenca_models::stats::MemoryUsage;
use microcuenca_shared_contracts::process::ProcessService;

#[derive(Debug, Clone, Copy)]
pub struct ProcessServiceImpl {
    started: Instant,
}

impl ProcessServiceImpl {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for ProcessServiceImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessService for ProcessServiceImpl {
    fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    #[cfg(target_os = "linux")]
    fn memory_usage(&self) -> anyhow::Result<MemoryUsage> {
        let status = std::fs::read_to_string("/proc/self/status")
            .context("Failed to read /proc/self/status")?;
        parse_proc_status(&status)
    }

    #[cfg(not(target_os = "linux"))]
    fn memory_usage(&self) -> anyhow::Result<MemoryUsage> {
        Ok(MemoryUsage::default())
    }
}

#[cfg_attr(
    not(target_os = "linux"),
    allow(dead_code, reason = "procfs is only read on linux")
)]
fn parse_proc_status(status: &str) -> anyhow::Result<MemoryUsage> {
    let field = |name: &str| -> anyhow::Result<u64> {
        let line = status
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(':'))
            .with_context(|| format!("Missing {name} in process status"))?;
        let kib = line
            .trim()
            .trim_end_matches("kB")
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid {name} in process status"))?;
        Ok(kib * 1024)
    };

    Ok(MemoryUsage {
        rss: field("VmRSS")?,
        virtual_memory: field("VmSize")?,
    })
}
