//! Observability seam for positions dropped from a summary.

use crate::domain::{Address, PositionDescriptor};
use crate::error::PositionError;
use std::fmt;
use std::sync::Mutex;
use tracing::warn;

/// Receives every recoverable position fault.
pub trait FaultSink: Send + Sync + fmt::Debug {
    fn position_dropped(&self, holder: &Address, position: &PositionDescriptor, error: &PositionError);
}

/// Logs dropped positions at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn position_dropped(&self, holder: &Address, position: &PositionDescriptor, error: &PositionError) {
        warn!(
            "Dropping position {} ({} on chain {}) for {}: {}",
            position.name, position.address, position.chain_id, holder, error
        );
    }
}

/// A dropped position as seen by [`RecordingFaultSink`].
#[derive(Debug, Clone)]
pub struct DroppedPosition {
    pub holder: Address,
    pub position: String,
    pub address: Address,
    pub error: PositionError,
}

/// Keeps dropped positions in memory for inspection.
#[derive(Debug, Default)]
pub struct RecordingFaultSink {
    dropped: Mutex<Vec<DroppedPosition>>,
}

impl RecordingFaultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dropped(&self) -> Vec<DroppedPosition> {
        self.dropped
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

impl FaultSink for RecordingFaultSink {
    fn position_dropped(&self, holder: &Address, position: &PositionDescriptor, error: &PositionError) {
        if let Ok(mut dropped) = self.dropped.lock() {
            dropped.push(DroppedPosition {
                holder: holder.clone(),
                position: position.name.clone(),
                address: position.address.clone(),
                error: error.clone(),
            });
        }
    }
}
