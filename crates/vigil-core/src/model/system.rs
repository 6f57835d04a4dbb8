// ── System gauges ──

use serde::{Deserialize, Serialize};

/// Server-wide gauges shown on the dashboard.
///
/// Percentages are whole numbers in `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub storage_usage_pct: u8,
    pub retention_days: u32,
    pub cpu_load_pct: u8,
    pub memory_usage_pct: u8,
    pub server_status: String,
    pub uptime: String,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            storage_usage_pct: 82,
            retention_days: 42,
            cpu_load_pct: 45,
            memory_usage_pct: 68,
            server_status: "Healthy".into(),
            uptime: "15d 4h 23m".into(),
        }
    }
}
