//! CLI interface for deauther
//!
//! This crate provides the command-line interface for deauther, including
//! argument parsing and the offline replay driver.

pub mod args;
pub mod replay;

pub use args::{Cli, Commands};
pub use replay::{first_beacon_sender, replay_dump, replay_frames, ReplayOptions, ReplayReport};
