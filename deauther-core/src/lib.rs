//! Deauther Core Library
//!
//! This crate provides the fundamental types, error handling, configuration
//! and the radio driver boundary shared by every other deauther crate.

pub mod config;
pub mod error;
pub mod packet;
pub mod radio;
pub mod types;

// Re-export commonly used types
pub use config::{DeautherConfig, Params};
pub use error::{Error, Result};
pub use packet::{RxPacket, MAX_FRAME_LEN};
pub use radio::{AccessPointInfo, PromiscuousFilter, Radio, RadioMode, RxCallback};
pub use types::*;
