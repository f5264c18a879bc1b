//! Common types used throughout deauther

use std::fmt;
use std::str::FromStr;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const fn broadcast() -> Self {
        Self([0xff; 6])
    }

    /// Zero MAC address (00:00:00:00:00:00)
    pub const fn zero() -> Self {
        Self([0x00; 6])
    }

    /// Read a MAC address from the first six bytes of `slice`
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 6] = slice.get(..6)?.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Get bytes as slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert to array
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is the broadcast address
    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xff; 6]
    }

    /// Check if the group bit is set
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(crate::Error::InvalidMac(s.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            if part.len() != 2 {
                return Err(crate::Error::InvalidMac(s.to_string()));
            }
            bytes[i] = u8::from_str_radix(part, 16)
                .map_err(|_| crate::Error::InvalidMac(s.to_string()))?;
        }

        Ok(MacAddr(bytes))
    }
}

/// 2.4 GHz channel number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    /// Lowest legal channel
    pub const MIN: u8 = 1;
    /// Highest channel any regulatory domain allows
    pub const MAX: u8 = 14;

    /// Create a channel, rejecting numbers outside 1..=14
    pub fn new(number: u8) -> crate::Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Ok(Self(number))
        } else {
            Err(crate::Error::InvalidChannel(number))
        }
    }

    /// Channel 1
    pub const fn first() -> Self {
        Self(Self::MIN)
    }

    /// Channel number
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Radio frame category as reported by the promiscuous receive path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameCategory {
    /// Management frames (beacons, probes, auth, deauth)
    Management,
    /// Control frames (ACK, RTS, CTS)
    Control,
    /// Data frames
    Data,
    /// Anything the driver cannot place (extension, malformed)
    Misc,
}

impl FrameCategory {
    /// Derive the category from the first frame-control byte
    pub fn from_frame_control(fc0: u8) -> Self {
        match (fc0 >> 2) & 0x03 {
            0 => FrameCategory::Management,
            1 => FrameCategory::Control,
            2 => FrameCategory::Data,
            _ => FrameCategory::Misc,
        }
    }
}

/// Attack mode selected at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttackMode {
    /// Attack the clients of one scanned access point, hosting an evil twin
    #[default]
    SingleTarget,
    /// Attack every station/access point pair observed while hopping channels
    Broad,
}

impl AttackMode {
    /// Short name used on the command line and in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackMode::SingleTarget => "single",
            AttackMode::Broad => "all",
        }
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "single-target" | "0" => Ok(AttackMode::SingleTarget),
            "all" | "broad" | "1" => Ok(AttackMode::Broad),
            other => Err(crate::Error::invalid_parameter(
                "mode",
                format!("unknown attack mode '{}'", other),
            )),
        }
    }
}

/// Logical interface a raw frame is transmitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioInterface {
    /// Soft access point role
    AccessPoint,
    /// Station role
    Station,
}

/// 802.11 deauthentication reason code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReasonCode(pub u16);

impl ReasonCode {
    pub const UNSPECIFIED: Self = Self(1);
    pub const PREV_AUTH_NOT_VALID: Self = Self(2);
    pub const STATION_LEAVING: Self = Self(3);
    pub const INACTIVITY: Self = Self(4);
    pub const AP_OVERLOADED: Self = Self(5);
    pub const CLASS2_FROM_NONAUTH: Self = Self(6);
    pub const CLASS3_FROM_NONASSOC: Self = Self(7);
    pub const LEAVING_BSS: Self = Self(8);

    /// Raw value
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for ReasonCode {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl From<u16> for ReasonCode {
    fn from(value: u16) -> Self {
        ReasonCode(value)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
