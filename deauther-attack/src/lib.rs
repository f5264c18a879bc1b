//! Capture and attack core for deauther
//!
//! This crate holds everything that reacts to sniffed traffic:
//!
//! - `Sniffer`: the receive callback, classifying each frame and deciding
//!   whether to capture it or answer it with a deauthentication burst
//! - `AttackController`: the `Idle -> Armed(mode)` session state machine
//! - `MainLoop`: drains captured frames to storage and hops channels in
//!   broad mode
//! - `SimulatedRadio`: a hardware-free `Radio` for host builds and tests
//!
//! # Example
//!
//! ```
//! use deauther_attack::{AttackController, SimulatedRadio};
//! use deauther_core::{AccessPointInfo, AttackMode, Channel, DeautherConfig, MacAddr, ReasonCode};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> deauther_core::Result<()> {
//! let radio = Arc::new(SimulatedRadio::new().with_access_point(AccessPointInfo {
//!     ssid: "corp".to_string(),
//!     bssid: "aa:bb:cc:00:00:01".parse::<MacAddr>()?,
//!     channel: Channel::new(6)?,
//! }));
//! let controller = AttackController::new(radio, DeautherConfig::default())?;
//!
//! controller
//!     .start(0, AttackMode::SingleTarget, ReasonCode::UNSPECIFIED, "corp")
//!     .await?;
//! controller.stop()?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod controller;
pub mod hopper;
pub mod injector;
pub mod main_loop;
pub mod session;
pub mod sim;
pub mod sniffer;

pub use controller::{AttackController, ControllerState};
pub use hopper::{channels, ChannelHopper};
pub use injector::{BurstReport, Injector};
pub use main_loop::{MainLoop, PollReport};
pub use session::Session;
pub use sim::{RadioCall, SimulatedRadio, Transmission};
pub use sniffer::{FrameVerdict, Sniffer};
