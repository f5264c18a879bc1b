//! EAPOL detection inside 802.11 data frames
//!
//! Data frames carry their payload behind an LLC/SNAP header (RFC 1042
//! encapsulation). A WPA key exchange is recognised by the EtherType 0x888E
//! in that header:
//!
//! ```text
//! AA AA 03 | 00 00 00 | 88 8E | EAPOL header ...
//! DSAP SSAP CTL  OUI    EtherType
//! ```

/// LLC DSAP/SSAP for SNAP encapsulation
pub const LLC_SNAP_SAP: u8 = 0xAA;

/// LLC control field (unnumbered information)
pub const LLC_UI: u8 = 0x03;

/// RFC 1042 OUI
pub const RFC1042_OUI: [u8; 3] = [0x00, 0x00, 0x00];

/// EtherType of EAPOL
pub const EAPOL_ETHERTYPE: u16 = 0x888E;

/// Offset the scan starts at (first byte after the MAC header)
pub const SCAN_START: usize = crate::ieee80211::MAC_HEADER_LEN;

/// Bytes kept clear of the declared end of the frame while scanning
pub const SCAN_TAIL_GUARD: usize = 8;

/// Distance from the EtherType back to the LLC DSAP
const DSAP_DISTANCE: usize = 6;

/// LLC/SNAP header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlcSnapHeader {
    pub dsap: u8,
    pub ssap: u8,
    pub control: u8,
    pub oui: [u8; 3],
    pub ethertype: u16,
}

impl LlcSnapHeader {
    /// Header size in bytes
    pub const SIZE: usize = 8;

    /// RFC 1042 header announcing an EAPOL payload
    pub const fn eapol() -> Self {
        Self {
            dsap: LLC_SNAP_SAP,
            ssap: LLC_SNAP_SAP,
            control: LLC_UI,
            oui: RFC1042_OUI,
            ethertype: EAPOL_ETHERTYPE,
        }
    }

    /// Convert to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let [hi, lo] = self.ethertype.to_be_bytes();
        [
            self.dsap,
            self.ssap,
            self.control,
            self.oui[0],
            self.oui[1],
            self.oui[2],
            hi,
            lo,
        ]
    }

    /// Parse from bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            dsap: data[0],
            ssap: data[1],
            control: data[2],
            oui: [data[3], data[4], data[5]],
            ethertype: u16::from_be_bytes([data[6], data[7]]),
        })
    }
}

/// Find the EAPOL EtherType in `frame`, returning its offset
///
/// Scans from [`SCAN_START`] while the position stays more than
/// [`SCAN_TAIL_GUARD`] bytes before `declared_len`, so a signature sitting in
/// the last bytes of the frame is never inspected. A hit also requires the
/// SNAP DSAP/SSAP pair six bytes before it. `declared_len` is clamped to the
/// slice, and the first match wins.
pub fn find_eapol(frame: &[u8], declared_len: usize) -> Option<usize> {
    let len = declared_len.min(frame.len());
    let end = len.saturating_sub(SCAN_TAIL_GUARD);
    let [sig_hi, sig_lo] = EAPOL_ETHERTYPE.to_be_bytes();

    (SCAN_START..end).find(|&i| {
        frame[i] == sig_hi
            && frame[i + 1] == sig_lo
            && frame[i - DSAP_DISTANCE] == LLC_SNAP_SAP
            && frame[i - DSAP_DISTANCE + 1] == LLC_SNAP_SAP
    })
}

/// Check whether `frame` carries an EAPOL payload
pub fn is_eapol(frame: &[u8], declared_len: usize) -> bool {
    find_eapol(frame, declared_len).is_some()
}
