//! Attack session state shared by the receive callback and the main loop

use deauther_capture::{CaptureRing, CaptureStats, CaptureStatsCounters};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::trace;

/// Process-wide state of one capture/attack session
///
/// The receive callback is the only producer: it pushes into the ring, sets
/// the beacon flag and bumps the counters. The main loop is the only
/// consumer of the ring. The controller resets the flag and counters when a
/// session starts; stopping leaves them in place for reporting.
#[derive(Debug, Default)]
pub struct Session {
    ring: CaptureRing,
    beacon_captured: AtomicBool,
    eliminated_stations: AtomicU32,
    stats: CaptureStatsCounters,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture ring shared with the main loop
    pub fn ring(&self) -> &CaptureRing {
        &self.ring
    }

    /// Check whether the target beacon was stored this session
    pub fn beacon_captured(&self) -> bool {
        self.beacon_captured.load(Ordering::Acquire)
    }

    /// Stations hit by a single-target burst this session
    pub fn eliminated_stations(&self) -> u32 {
        self.eliminated_stations.load(Ordering::Relaxed)
    }

    /// Live counters
    pub fn counters(&self) -> &CaptureStatsCounters {
        &self.stats
    }

    /// Statistics snapshot
    pub fn stats(&self) -> CaptureStats {
        self.stats.snapshot()
    }

    /// Clear the beacon flag, the station counter and the statistics
    ///
    /// Frames still pending in the ring are kept for the main loop.
    pub fn reset(&self) {
        self.beacon_captured.store(false, Ordering::Release);
        self.eliminated_stations.store(0, Ordering::Relaxed);
        self.stats.reset();
    }

    pub(crate) fn mark_beacon_captured(&self) {
        self.beacon_captured.store(true, Ordering::Release);
    }

    pub(crate) fn record_elimination(&self) {
        self.eliminated_stations.fetch_add(1, Ordering::Relaxed);
    }

    /// Push a frame copy into the ring, counting a drop when it is full
    pub(crate) fn capture(&self, frame: &[u8]) -> bool {
        if self.ring.try_push(frame) {
            true
        } else {
            self.stats.record_buffer_full();
            trace!(len = frame.len(), "Capture ring full, frame dropped");
            false
        }
    }
}
