//! CPU and memory polling for the status label.

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// One reading of the counters shown in the monitor label.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub cpu_percent: f32,
    /// Bytes.
    pub mem_used: u64,
    /// Bytes.
    pub mem_total: u64,
}

impl Snapshot {
    pub fn label(&self) -> String {
        format!(
            "CPU Usage: {:.1}% | Memory: {:.2}GB/{:.2}GB",
            self.cpu_percent,
            self.mem_used as f64 / GIB,
            self.mem_total as f64 / GIB,
        )
    }

    /// Used memory as a 0..=1 ratio (for the gauge).
    pub fn mem_ratio(&self) -> f64 {
        if self.mem_total == 0 {
            0.0
        } else {
            (self.mem_used as f64 / self.mem_total as f64).clamp(0.0, 1.0)
        }
    }
}

/// Owns the `sysinfo` handle between polls.  CPU usage is a delta between
/// two refreshes, so the handle must live across ticks.
pub struct Monitor {
    sys: System,
}

impl Monitor {
    pub fn new() -> Self {
        let refresh = RefreshKind::new()
            .with_cpu(CpuRefreshKind::new().with_cpu_usage())
            .with_memory(MemoryRefreshKind::new().with_ram());
        let mut sys = System::new_with_specifics(refresh);
        // Prime the CPU counters; the first poll measures from here.
        sys.refresh_cpu_usage();
        Self { sys }
    }

    pub fn poll(&mut self) -> Snapshot {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        Snapshot {
            cpu_percent: self.sys.global_cpu_info().cpu_usage().clamp(0.0, 100.0),
            mem_used: self.sys.used_memory(),
            mem_total: self.sys.total_memory(),
        }
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_binary_gigabytes() {
        let snap = Snapshot {
            cpu_percent: 12.34,
            mem_used: 3 * 1024 * 1024 * 1024 / 2,
            mem_total: 8 * 1024 * 1024 * 1024,
        };
        assert_eq!(snap.label(), "CPU Usage: 12.3% | Memory: 1.50GB/8.00GB");
        assert!((snap.mem_ratio() - 0.1875).abs() < 1e-9);
    }

    #[test]
    fn zero_total_memory_ratio() {
        assert_eq!(Snapshot::default().mem_ratio(), 0.0);
    }

    #[test]
    fn poll_reports_sane_values() {
        let mut monitor = Monitor::new();
        let snap = monitor.poll();
        assert!((0.0..=100.0).contains(&snap.cpu_percent));
        assert!(snap.mem_used <= snap.mem_total);
    }
}
