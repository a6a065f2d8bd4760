//! Per-event context consumed by event-dependent policies.

/// Identity and timing of the event currently being processed. Produced by
/// the host adapter from the framework's current event; consumed only by
/// policies that implement `get_event_seed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    pub run_number: u32,
    pub sub_run_number: u32,
    pub event_number: u32,
    pub timestamp: u64,
    pub is_time_valid: bool,
    pub process_name: String,
    pub module_label: String,
}

impl EventData {
    #[must_use]
    pub fn new(
        run_number: u32,
        sub_run_number: u32,
        event_number: u32,
        timestamp: u64,
        is_time_valid: bool,
        process_name: impl Into<String>,
        module_label: impl Into<String>,
    ) -> Self {
        Self {
            run_number,
            sub_run_number,
            event_number,
            timestamp,
            is_time_valid,
            process_name: process_name.into(),
            module_label: module_label.into(),
        }
    }
}
