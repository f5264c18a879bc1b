//! Deauthentication burst transmission

use deauther_capture::CaptureStatsCounters;
use deauther_core::{Radio, RadioInterface};
use deauther_packet::DeauthFrame;
use std::sync::Weak;

/// Outcome of one burst
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurstReport {
    /// Frames the radio accepted
    pub sent: usize,
    /// Frames the radio rejected
    pub failed: usize,
}

impl BurstReport {
    /// Transmit calls made
    pub fn attempts(&self) -> usize {
        self.sent + self.failed
    }
}

/// Fire-and-forget transmitter for deauthentication bursts
///
/// Holds only a weak handle on the radio: the injector lives inside the
/// receive callback, which the radio itself owns.
pub struct Injector<R: Radio + ?Sized> {
    radio: Weak<R>,
    burst_size: usize,
}

impl<R: Radio + ?Sized> Injector<R> {
    pub fn new(radio: Weak<R>, burst_size: usize) -> Self {
        Self { radio, burst_size }
    }

    /// Frames transmitted per trigger
    pub fn burst_size(&self) -> usize {
        self.burst_size
    }

    /// Transmit the current state of `frame` `burst_size` times
    ///
    /// Every frame is attempted once. Radio failures are counted, never
    /// retried. When the radio is gone the whole burst counts as failed.
    pub fn burst(
        &self,
        frame: &DeauthFrame,
        interface: RadioInterface,
        stats: &CaptureStatsCounters,
    ) -> BurstReport {
        let mut report = BurstReport::default();

        match self.radio.upgrade() {
            Some(radio) => {
                let bytes = frame.to_bytes();
                for _ in 0..self.burst_size {
                    match radio.transmit(interface, &bytes) {
                        Ok(()) => report.sent += 1,
                        Err(_) => report.failed += 1,
                    }
                }
            }
            None => report.failed = self.burst_size,
        }

        stats.record_burst(report.sent as u64, report.failed as u64);
        report
    }
}
