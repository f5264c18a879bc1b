//! CLI argument parsing
//!
//! Command-line interface for deauther: offline replay of captured frames
//! through the attack core, and channel listing.

use clap::{Parser, Subcommand};
use deauther_core::{AttackMode, MacAddr, Params, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deauther")]
#[command(version, about = "WiFi capture and deauthentication toolkit", long_about = None)]
pub struct Cli {
    /// Verbose output (-v, -vv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a hex dump through the attack core on a simulated radio
    Replay {
        /// Hex dump to replay (text2pcap format)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Attack mode (single, all)
        #[arg(short, long, default_value = "single")]
        mode: AttackMode,

        /// Target access point (defaults to the sender of the first beacon)
        #[arg(short, long, value_name = "MAC")]
        bssid: Option<MacAddr>,

        /// Channel of the target access point
        #[arg(short, long, default_value = "1")]
        channel: u8,

        /// SSID advertised by the rogue access point
        #[arg(short, long)]
        ssid: Option<String>,

        /// Deauthentication reason code
        #[arg(short, long)]
        reason: Option<u16>,

        /// Write captured frames to this hex dump
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Configuration overrides (key=value pairs)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// List the channels the hopper cycles through
    Channels {
        /// Configuration overrides (key=value pairs)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Commands {
    /// Configuration overrides given with `-p`
    pub fn params(&self) -> Result<Params> {
        match self {
            Commands::Replay { params, .. } | Commands::Channels { params } => {
                Params::parse(params.iter())
            }
        }
    }
}
