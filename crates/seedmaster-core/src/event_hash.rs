//! The `EventTimestamp_v1` per-event hashing algorithm.
//!
//! Builds a canonical string from an engine id and its event context, hashes
//! it with BLAKE3 (this implementation's choice of "platform-stable hash" —
//! spec only requires determinism within one implementation, not bit
//! compatibility across implementations), and folds the digest down to the
//! seed's 32-bit width. A zero result is bumped to one, since seeds must be
//! valid by construction.

use crate::engine_id::EngineId;
use crate::error::{InvalidInputError, SeedMasterError};
use crate::event_data::EventData;
use crate::seed::Seed;

/// Build the canonical string hashed by `EventTimestamp_v1`:
/// `"Run: R Subrun: S Event: E Timestamp: T Process: P Module: M[ Instance: I]"`.
/// The `Instance:` clause is present only for non-empty instance names.
fn canonical_string(id: &EngineId, data: &EventData) -> String {
    let mut s = format!(
        "Run: {} Subrun: {} Event: {} Timestamp: {} Process: {} Module: {}",
        data.run_number, data.sub_run_number, data.event_number, data.timestamp, data.process_name, data.module_label,
    );
    if !id.instance_name().is_empty() {
        s.push_str(" Instance: ");
        s.push_str(id.instance_name());
    }
    s
}

/// Compute the `EventTimestamp_v1` seed for `id` given `data`.
///
/// # Errors
///
/// Returns [`InvalidInputError::InvalidTimestamp`] wrapped in
/// [`SeedMasterError`] when `data.is_time_valid` is `false`.
pub fn event_timestamp_v1(id: &EngineId, data: &EventData) -> Result<Seed, SeedMasterError> {
    if !data.is_time_valid {
        return Err(InvalidInputError::InvalidTimestamp { engine: id.clone() }.into());
    }

    let text = canonical_string(id, data);
    let digest = blake3::hash(text.as_bytes());
    let bytes = digest.as_bytes();
    let folded = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

    Ok(Seed::new(if folded == 0 { 1 } else { folded }))
}
