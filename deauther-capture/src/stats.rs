//! Capture and injection statistics

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Snapshot of session statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureStats {
    /// Frames delivered to the receive callback
    pub frames_seen: u64,
    /// Frames dropped for exceeding the maximum frame size
    pub oversized_dropped: u64,
    /// Captures dropped because the ring was full
    pub buffer_full_dropped: u64,
    /// Beacons stored
    pub beacons_captured: u64,
    /// EAPOL frames stored
    pub eapol_captured: u64,
    /// Deauthentication bursts triggered
    pub bursts: u64,
    /// Deauthentication frames handed to the radio
    pub frames_sent: u64,
    /// Transmit calls the radio reported as failed
    pub transmit_failures: u64,
    /// Time since the counters were last reset
    pub duration: Duration,
}

impl CaptureStats {
    /// Frames stored in the ring
    pub fn captured(&self) -> u64 {
        self.beacons_captured + self.eapol_captured
    }

    /// Frames lost for any reason
    pub fn dropped(&self) -> u64 {
        self.oversized_dropped + self.buffer_full_dropped
    }

    /// Share of captures lost to a full ring, as a percentage
    pub fn drop_rate(&self) -> f64 {
        let attempts = self.captured() + self.buffer_full_dropped;
        if attempts == 0 {
            return 0.0;
        }
        (self.buffer_full_dropped as f64 / attempts as f64) * 100.0
    }

    /// Format statistics as human-readable string
    pub fn format(&self) -> String {
        format!(
            "Frames seen: {} ({} oversized)\n\
             Captured: {} beacon, {} EAPOL ({} dropped, {:.2}%)\n\
             Deauth: {} bursts, {} frames sent, {} failed\n\
             Duration: {:.2}s",
            self.frames_seen,
            self.oversized_dropped,
            self.beacons_captured,
            self.eapol_captured,
            self.buffer_full_dropped,
            self.drop_rate(),
            self.bursts,
            self.frames_sent,
            self.transmit_failures,
            self.duration.as_secs_f64(),
        )
    }
}

/// Lock-free counters updated from the receive callback
#[derive(Debug)]
pub struct CaptureStatsCounters {
    frames_seen: AtomicU64,
    oversized_dropped: AtomicU64,
    buffer_full_dropped: AtomicU64,
    beacons_captured: AtomicU64,
    eapol_captured: AtomicU64,
    bursts: AtomicU64,
    frames_sent: AtomicU64,
    transmit_failures: AtomicU64,
    started_at: Mutex<Instant>,
}

impl CaptureStatsCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self {
            frames_seen: AtomicU64::new(0),
            oversized_dropped: AtomicU64::new(0),
            buffer_full_dropped: AtomicU64::new(0),
            beacons_captured: AtomicU64::new(0),
            eapol_captured: AtomicU64::new(0),
            bursts: AtomicU64::new(0),
            frames_sent: AtomicU64::new(0),
            transmit_failures: AtomicU64::new(0),
            started_at: Mutex::new(Instant::now()),
        }
    }

    pub fn record_frame(&self) {
        self.frames_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_oversized(&self) {
        self.oversized_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_buffer_full(&self) {
        self.buffer_full_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_beacon(&self) {
        self.beacons_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eapol(&self) {
        self.eapol_captured.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one burst of `sent` successful and `failed` rejected transmits
    pub fn record_burst(&self, sent: u64, failed: u64) {
        self.bursts.fetch_add(1, Ordering::Relaxed);
        self.frames_sent.fetch_add(sent, Ordering::Relaxed);
        self.transmit_failures.fetch_add(failed, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub fn snapshot(&self) -> CaptureStats {
        CaptureStats {
            frames_seen: self.frames_seen.load(Ordering::Relaxed),
            oversized_dropped: self.oversized_dropped.load(Ordering::Relaxed),
            buffer_full_dropped: self.buffer_full_dropped.load(Ordering::Relaxed),
            beacons_captured: self.beacons_captured.load(Ordering::Relaxed),
            eapol_captured: self.eapol_captured.load(Ordering::Relaxed),
            bursts: self.bursts.load(Ordering::Relaxed),
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            transmit_failures: self.transmit_failures.load(Ordering::Relaxed),
            duration: self.started_at.lock().elapsed(),
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.frames_seen.store(0, Ordering::Relaxed);
        self.oversized_dropped.store(0, Ordering::Relaxed);
        self.buffer_full_dropped.store(0, Ordering::Relaxed);
        self.beacons_captured.store(0, Ordering::Relaxed);
        self.eapol_captured.store(0, Ordering::Relaxed);
        self.bursts.store(0, Ordering::Relaxed);
        self.frames_sent.store(0, Ordering::Relaxed);
        self.transmit_failures.store(0, Ordering::Relaxed);
        *self.started_at.lock() = Instant::now();
    }
}

impl Default for CaptureStatsCounters {
    fn default() -> Self {
        Self::new()
    }
}
