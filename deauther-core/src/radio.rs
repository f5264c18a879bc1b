//! Radio driver boundary
//!
//! Everything the attack core needs from the WiFi driver is expressed by the
//! [`Radio`] trait. Firmware builds implement it on top of the vendor driver;
//! host builds use a simulated radio.
//!
//! # Raw transmit precondition
//!
//! Deauthentication frames are deliberately spoofed management frames. Many
//! vendor stacks validate raw frames before transmission and silently reject
//! exactly these. An implementation of [`Radio::transmit`] must reach the air
//! without that validation (on ESP32 targets this means linking an override
//! of `ieee80211_raw_frame_sanity_check` that always accepts). Without it the
//! injection engine keeps "sending" and nothing is ever transmitted.

use crate::{Channel, FrameCategory, MacAddr, RadioInterface, Result, RxPacket};
use std::fmt;

/// Receive callback installed while promiscuous capture is enabled
///
/// The driver calls it once per received frame, never re-entrantly.
pub type RxCallback = Box<dyn FnMut(RxPacket<'_>) + Send + 'static>;

/// Operating role of the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioMode {
    /// Soft access point only
    AccessPoint,
    /// Unattached station, free to change channel
    Station,
    /// Both roles at once
    AccessPointStation,
}

/// Frame categories delivered to the promiscuous receive callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromiscuousFilter {
    pub management: bool,
    pub control: bool,
    pub data: bool,
}

impl PromiscuousFilter {
    /// Management and data frames, control frames excluded
    pub const MGMT_DATA: Self = Self {
        management: true,
        control: false,
        data: true,
    };

    /// Every category
    pub const ALL: Self = Self {
        management: true,
        control: true,
        data: true,
    };

    /// Check whether a frame of `category` passes this filter
    pub fn accepts(&self, category: FrameCategory) -> bool {
        match category {
            FrameCategory::Management => self.management,
            FrameCategory::Control => self.control,
            FrameCategory::Data => self.data,
            FrameCategory::Misc => false,
        }
    }
}

impl Default for PromiscuousFilter {
    fn default() -> Self {
        Self::MGMT_DATA
    }
}

/// Scan result for one access point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointInfo {
    /// Network name
    pub ssid: String,
    /// Access point hardware address
    pub bssid: MacAddr,
    /// Operating channel
    pub channel: Channel,
}

impl fmt::Display for AccessPointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) on channel {}", self.ssid, self.bssid, self.channel)
    }
}

/// WiFi driver operations consumed by the attack core
pub trait Radio: Send + Sync {
    /// Enable or disable promiscuous capture
    fn set_promiscuous(&self, enabled: bool) -> Result<()>;

    /// Restrict which frame categories reach the receive callback
    fn set_promiscuous_filter(&self, filter: PromiscuousFilter) -> Result<()>;

    /// Install the receive callback, replacing any previous one
    fn set_rx_callback(&self, callback: RxCallback) -> Result<()>;

    /// Tune the radio to `channel`
    fn set_channel(&self, channel: Channel) -> Result<()>;

    /// Switch the radio role
    fn set_mode(&self, mode: RadioMode) -> Result<()>;

    /// Access point at `index` in the most recent scan
    fn access_point(&self, index: usize) -> Option<AccessPointInfo>;

    /// Start a soft access point advertising `ssid` on `channel`
    ///
    /// An empty `passphrase` starts an open network.
    fn start_soft_ap(&self, ssid: &str, passphrase: &str, channel: Option<Channel>) -> Result<()>;

    /// Tear down the soft access point
    fn stop_soft_ap(&self) -> Result<()>;

    /// Transmit a raw 802.11 frame on `interface`
    ///
    /// Called from the receive callback: must not block.
    fn transmit(&self, interface: RadioInterface, frame: &[u8]) -> Result<()>;
}
