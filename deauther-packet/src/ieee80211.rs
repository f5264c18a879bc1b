//! IEEE 802.11 MAC header parsing
//!
//! Only the fixed three-address header is decoded. That is all the receive
//! path needs to route a frame: who sent it, who it is for, and which BSS it
//! belongs to.

use deauther_core::{FrameCategory, MacAddr};

/// Length of the three-address MAC header
pub const MAC_HEADER_LEN: usize = 24;

/// Length of the trailing frame check sequence
pub const FCS_LEN: usize = 4;

/// Management subtypes used by the attack core
pub mod subtype {
    /// Beacon
    pub const BEACON: u8 = 8;
    /// Deauthentication
    pub const DEAUTHENTICATION: u8 = 12;
}

/// First frame-control byte of a beacon (type 0, subtype 8)
pub const BEACON_FC0: u8 = 0x80;

/// First frame-control byte of a deauthentication frame (type 0, subtype 12)
pub const DEAUTH_FC0: u8 = 0xC0;

/// Decoded 802.11 MAC header
///
/// Address roles follow the layout used by frames without the DS bits set:
/// addr1 is the receiver, addr2 the transmitter and addr3 the BSSID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacHeader {
    /// Frame control, as transmitted (little-endian bytes)
    pub frame_control: [u8; 2],
    /// Duration/ID
    pub duration: u16,
    /// Destination (addr1)
    pub dest: MacAddr,
    /// Source (addr2)
    pub src: MacAddr,
    /// BSSID (addr3)
    pub bssid: MacAddr,
    /// Sequence control
    pub sequence_control: u16,
}

impl MacHeader {
    /// Decode the header at the start of `frame`
    ///
    /// Returns `None` when fewer than [`MAC_HEADER_LEN`] bytes are present.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        if frame.len() < MAC_HEADER_LEN {
            return None;
        }

        Some(Self {
            frame_control: [frame[0], frame[1]],
            duration: u16::from_le_bytes([frame[2], frame[3]]),
            dest: MacAddr::from_slice(&frame[4..10])?,
            src: MacAddr::from_slice(&frame[10..16])?,
            bssid: MacAddr::from_slice(&frame[16..22])?,
            sequence_control: u16::from_le_bytes([frame[22], frame[23]]),
        })
    }

    /// Frame type from the frame-control field
    pub fn category(&self) -> FrameCategory {
        FrameCategory::from_frame_control(self.frame_control[0])
    }

    /// Subtype nibble from the frame-control field
    pub fn subtype(&self) -> u8 {
        self.frame_control[0] >> 4
    }

    /// Check for the beacon signature in the first frame-control byte
    pub fn is_beacon(&self) -> bool {
        self.frame_control[0] == BEACON_FC0
    }

    /// Check whether `addr` is the source or the destination
    pub fn involves(&self, addr: &MacAddr) -> bool {
        self.src == *addr || self.dest == *addr
    }
}
