//! Per-zone coalescing of position events
//!
//! Playback position arrives far more often than downstream consumers want
//! to hear about it. The debouncer opens a per-zone window on the first
//! offer and delivers exactly the most recent value when the window's
//! deadline elapses; intermediate values within the window are replaced,
//! never queued. Zones have independent windows so a busy zone cannot delay
//! another zone's events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::model::ZoneIndex;

/// Default coalescing window for position events
pub const POSITION_WINDOW: Duration = Duration::from_millis(500);

type EmitFn = Arc<dyn Fn(ZoneIndex, u64, f64) + Send + Sync>;

#[derive(Default)]
struct ZoneWindow {
    /// Most recent value offered within the open window
    pending: Option<(u64, f64)>,
    /// Whether a deadline task is currently scheduled
    armed: bool,
}

/// Trailing-edge, per-zone debouncer for position events
///
/// Cloning shares the underlying windows. `offer` must run inside a Tokio
/// runtime because the deadline is a spawned sleep task.
pub(crate) struct PositionDebouncer {
    window: Duration,
    zones: Arc<Mutex<HashMap<ZoneIndex, ZoneWindow>>>,
    emit: EmitFn,
}

impl PositionDebouncer {
    pub(crate) fn new(window: Duration, emit: EmitFn) -> Self {
        Self {
            window,
            zones: Arc::new(Mutex::new(HashMap::new())),
            emit,
        }
    }

    /// Offer the latest position for a zone
    ///
    /// Arms the zone's deadline task if no window is open; otherwise just
    /// replaces the pending value the open window will deliver.
    pub(crate) fn offer(&self, zone: ZoneIndex, position_ms: u64, progress: f64) {
        let arm = {
            let mut zones = self.zones.lock();
            let entry = zones.entry(zone).or_default();
            entry.pending = Some((position_ms, progress));
            if entry.armed {
                false
            } else {
                entry.armed = true;
                true
            }
        };

        if arm {
            let debouncer = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(debouncer.window).await;
                debouncer.fire(zone);
            });
        }
    }

    /// Deliver the pending value for a zone and close its window
    fn fire(&self, zone: ZoneIndex) {
        let taken = {
            let mut zones = self.zones.lock();
            match zones.get_mut(&zone) {
                Some(entry) => {
                    entry.armed = false;
                    entry.pending.take()
                }
                None => None,
            }
        };

        if let Some((position_ms, progress)) = taken {
            (self.emit)(zone, position_ms, progress);
        }
    }
}

impl Clone for PositionDebouncer {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            zones: Arc::clone(&self.zones),
            emit: Arc::clone(&self.emit),
        }
    }
}
