use serde::Serialize;

/// Snapshot of registry-wide figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_patients: usize,
    pub ordered_height: u32,
    pub balanced_height: u32,
    pub balanced: bool,
    pub emergency: usize,
    pub critical: usize,
    pub non_critical: usize,
    pub average_priority: f64,
    /// Both indices yield the same id sequence.
    pub indices_in_sync: bool,
    pub discharged: usize,
}
