//! 802.11 frame handling for deauther
//!
//! This crate decodes just enough of IEEE 802.11 to drive the attack core and
//! builds the one frame it transmits:
//!
//! - [`ieee80211`] - three-address MAC header view and frame-control constants
//! - [`deauth`] - the reusable deauthentication frame template
//! - [`eapol`] - LLC/SNAP signature scan for WPA key exchange frames
//!
//! Nothing here allocates; every function is safe to call from the radio
//! receive callback.
//!
//! # Example
//!
//! ```rust
//! use deauther_core::{MacAddr, ReasonCode};
//! use deauther_packet::DeauthFrame;
//!
//! let ap = MacAddr([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01]);
//! let station = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
//!
//! let mut frame = DeauthFrame::new(ReasonCode::UNSPECIFIED).with_target(ap);
//! frame.address_for_single_target(station);
//!
//! let bytes = frame.to_bytes();
//! assert_eq!(&bytes[4..10], station.as_bytes());
//! ```

pub mod deauth;
pub mod eapol;
pub mod ieee80211;

pub use deauth::{DeauthFrame, DEAUTH_FRAME_LEN};
pub use eapol::{find_eapol, is_eapol, LlcSnapHeader};
pub use ieee80211::{MacHeader, FCS_LEN, MAC_HEADER_LEN};
