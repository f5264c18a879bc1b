//! In-memory radio for host builds and tests
//!
//! [`SimulatedRadio`] implements [`Radio`] without hardware: it records every
//! control call and transmission, keeps the installed receive callback and
//! feeds it frames through [`SimulatedRadio::deliver`], applying the
//! promiscuous switch and category filter the way a driver would.

use deauther_core::{
    AccessPointInfo, Channel, Error, PromiscuousFilter, Radio, RadioInterface, RadioMode, Result,
    RxCallback, RxPacket,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::trace;

/// Control call recorded by the simulated radio
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioCall {
    SetPromiscuous(bool),
    SetFilter(PromiscuousFilter),
    SetRxCallback,
    SetChannel(Channel),
    SetMode(RadioMode),
    StartSoftAp {
        ssid: String,
        channel: Option<Channel>,
    },
    StopSoftAp,
}

/// Frame accepted by [`Radio::transmit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub interface: RadioInterface,
    pub channel: Channel,
    pub frame: Vec<u8>,
}

#[derive(Debug)]
struct SimState {
    promiscuous: bool,
    filter: PromiscuousFilter,
    channel: Channel,
    mode: RadioMode,
    soft_ap: Option<String>,
    calls: Vec<RadioCall>,
}

/// Hardware-free [`Radio`] implementation
pub struct SimulatedRadio {
    access_points: Vec<AccessPointInfo>,
    state: Mutex<SimState>,
    callback: Mutex<Option<RxCallback>>,
    transmissions: Mutex<Vec<Transmission>>,
    transmit_attempts: AtomicUsize,
    reject_transmit: AtomicBool,
}

impl SimulatedRadio {
    pub fn new() -> Self {
        Self {
            access_points: Vec::new(),
            state: Mutex::new(SimState {
                promiscuous: false,
                filter: PromiscuousFilter::ALL,
                channel: Channel::first(),
                mode: RadioMode::AccessPoint,
                soft_ap: None,
                calls: Vec::new(),
            }),
            callback: Mutex::new(None),
            transmissions: Mutex::new(Vec::new()),
            transmit_attempts: AtomicUsize::new(0),
            reject_transmit: AtomicBool::new(false),
        }
    }

    /// Add an access point to the scan results
    pub fn with_access_point(mut self, info: AccessPointInfo) -> Self {
        self.access_points.push(info);
        self
    }

    /// Make every transmit call fail
    pub fn set_reject_transmit(&self, reject: bool) {
        self.reject_transmit.store(reject, Ordering::Relaxed);
    }

    /// Deliver a raw frame, classified from its frame-control byte
    ///
    /// Returns `true` when the receive callback ran.
    pub fn deliver(&self, frame: &[u8]) -> bool {
        self.deliver_packet(RxPacket::classify(frame))
    }

    /// Deliver a packet as the driver would
    ///
    /// Nothing happens unless promiscuous capture is on, the filter accepts
    /// the packet's category and a callback is installed.
    pub fn deliver_packet(&self, packet: RxPacket<'_>) -> bool {
        {
            let state = self.state.lock();
            if !state.promiscuous || !state.filter.accepts(packet.category) {
                trace!(category = ?packet.category, "Frame filtered by simulated radio");
                return false;
            }
        }

        match self.callback.lock().as_mut() {
            Some(callback) => {
                callback(packet);
                true
            }
            None => false,
        }
    }

    /// Frames the radio accepted
    pub fn transmissions(&self) -> Vec<Transmission> {
        self.transmissions.lock().clone()
    }

    /// Transmit calls made, accepted or not
    pub fn transmit_attempts(&self) -> usize {
        self.transmit_attempts.load(Ordering::Relaxed)
    }

    /// Forget recorded transmissions
    pub fn clear_transmissions(&self) {
        self.transmissions.lock().clear();
        self.transmit_attempts.store(0, Ordering::Relaxed);
    }

    /// Control calls in the order they were made
    pub fn calls(&self) -> Vec<RadioCall> {
        self.state.lock().calls.clone()
    }

    pub fn is_promiscuous(&self) -> bool {
        self.state.lock().promiscuous
    }

    pub fn filter(&self) -> PromiscuousFilter {
        self.state.lock().filter
    }

    pub fn channel(&self) -> Channel {
        self.state.lock().channel
    }

    pub fn mode(&self) -> RadioMode {
        self.state.lock().mode
    }

    /// SSID of the running soft access point
    pub fn soft_ap_ssid(&self) -> Option<String> {
        self.state.lock().soft_ap.clone()
    }

    pub fn has_rx_callback(&self) -> bool {
        self.callback.lock().is_some()
    }
}

impl Default for SimulatedRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SimulatedRadio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedRadio")
            .field("access_points", &self.access_points.len())
            .field("state", &*self.state.lock())
            .field("transmit_attempts", &self.transmit_attempts())
            .finish()
    }
}

impl Radio for SimulatedRadio {
    fn set_promiscuous(&self, enabled: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.promiscuous = enabled;
        state.calls.push(RadioCall::SetPromiscuous(enabled));
        Ok(())
    }

    fn set_promiscuous_filter(&self, filter: PromiscuousFilter) -> Result<()> {
        let mut state = self.state.lock();
        state.filter = filter;
        state.calls.push(RadioCall::SetFilter(filter));
        Ok(())
    }

    fn set_rx_callback(&self, callback: RxCallback) -> Result<()> {
        *self.callback.lock() = Some(callback);
        self.state.lock().calls.push(RadioCall::SetRxCallback);
        Ok(())
    }

    fn set_channel(&self, channel: Channel) -> Result<()> {
        let mut state = self.state.lock();
        state.channel = channel;
        state.calls.push(RadioCall::SetChannel(channel));
        Ok(())
    }

    fn set_mode(&self, mode: RadioMode) -> Result<()> {
        let mut state = self.state.lock();
        state.mode = mode;
        state.calls.push(RadioCall::SetMode(mode));
        Ok(())
    }

    fn access_point(&self, index: usize) -> Option<AccessPointInfo> {
        self.access_points.get(index).cloned()
    }

    fn start_soft_ap(&self, ssid: &str, passphrase: &str, channel: Option<Channel>) -> Result<()> {
        if !passphrase.is_empty() && passphrase.len() < 8 {
            return Err(Error::radio("passphrase must be at least 8 characters"));
        }

        let mut state = self.state.lock();
        if let Some(channel) = channel {
            state.channel = channel;
        }
        if state.mode == RadioMode::Station {
            state.mode = RadioMode::AccessPointStation;
        }
        state.soft_ap = Some(ssid.to_string());
        state.calls.push(RadioCall::StartSoftAp {
            ssid: ssid.to_string(),
            channel,
        });
        Ok(())
    }

    fn stop_soft_ap(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.soft_ap = None;
        state.calls.push(RadioCall::StopSoftAp);
        Ok(())
    }

    fn transmit(&self, interface: RadioInterface, frame: &[u8]) -> Result<()> {
        self.transmit_attempts.fetch_add(1, Ordering::Relaxed);
        if self.reject_transmit.load(Ordering::Relaxed) {
            return Err(Error::radio("transmit rejected"));
        }

        let channel = self.state.lock().channel;
        self.transmissions.lock().push(Transmission {
            interface,
            channel,
            frame: frame.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deauther_core::{FrameCategory, MacAddr};
    use std::sync::Arc;

    #[test]
    fn test_deliver_requires_promiscuous() {
        let radio = SimulatedRadio::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        radio
            .set_rx_callback(Box::new(move |_packet: RxPacket<'_>| {
                counter.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        assert!(!radio.deliver(&[0x80, 0x00]));
        radio.set_promiscuous(true).unwrap();
        assert!(radio.deliver(&[0x80, 0x00]));
        assert_eq!(seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_filter_drops_control_frames() {
        let radio = SimulatedRadio::new();
        radio.set_rx_callback(Box::new(|_packet: RxPacket<'_>| {})).unwrap();
        radio.set_promiscuous(true).unwrap();
        radio.set_promiscuous_filter(PromiscuousFilter::MGMT_DATA).unwrap();

        // 0xB4 is an RTS (control) frame.
        assert!(!radio.deliver(&[0xB4, 0x00]));
        assert!(radio.deliver_packet(RxPacket::new(&[0x08, 0x00], FrameCategory::Data)));
    }

    #[test]
    fn test_records_calls_and_transmissions() {
        let ap = AccessPointInfo {
            ssid: "lab".to_string(),
            bssid: MacAddr([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01]),
            channel: Channel::new(6).unwrap(),
        };
        let radio = SimulatedRadio::new().with_access_point(ap.clone());

        assert_eq!(radio.access_point(0), Some(ap));
        assert_eq!(radio.access_point(1), None);

        radio.start_soft_ap("twin", "", Channel::new(6).ok()).unwrap();
        radio.transmit(RadioInterface::AccessPoint, &[0xC0, 0x00]).unwrap();

        assert_eq!(radio.soft_ap_ssid().as_deref(), Some("twin"));
        assert_eq!(radio.channel().number(), 6);
        let sent = radio.transmissions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel.number(), 6);
        assert_eq!(
            radio.calls(),
            vec![RadioCall::StartSoftAp {
                ssid: "twin".to_string(),
                channel: Channel::new(6).ok(),
            }]
        );
    }

    #[test]
    fn test_short_passphrase_rejected() {
        let radio = SimulatedRadio::new();
        assert!(radio.start_soft_ap("twin", "short", None).is_err());
        assert!(radio.soft_ap_ssid().is_none());
    }
}
