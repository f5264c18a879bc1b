//! Runtime configuration

use crate::{Error, ReasonCode, Result};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

/// SSID of the open access point advertised while idle
pub const DEFAULT_AP_SSID: &str = "Napoli_Free_WiFi";

/// Highest channel visited by the channel hopper
pub const DEFAULT_CHANNEL_MAX: u8 = 13;

/// Deauthentication frames transmitted per triggering frame
pub const NUM_FRAMES_PER_DEAUTH: usize = 16;

/// Dwell time on each channel while hopping
pub const DEFAULT_CHANNEL_DWELL: Duration = Duration::from_millis(10);

/// Pause between tearing down and restarting the soft access point
pub const DEFAULT_AP_RESTART_DELAY: Duration = Duration::from_millis(100);

/// Longest SSID 802.11 allows
pub const MAX_SSID_LEN: usize = 32;

/// Tunables for an attack session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeautherConfig {
    /// SSID of the idle access point
    pub ap_ssid: String,
    /// Soft access point passphrase (empty = open)
    pub ap_passphrase: String,
    /// Highest legal channel for the hopper
    pub channel_max: u8,
    /// Frames per deauthentication burst
    pub frames_per_burst: usize,
    /// Dwell time per channel while hopping
    pub channel_dwell: Duration,
    /// Delay between soft access point teardown and restart
    pub ap_restart_delay: Duration,
    /// Reason code used when none is given at start
    pub default_reason: ReasonCode,
}

impl Default for DeautherConfig {
    fn default() -> Self {
        Self {
            ap_ssid: DEFAULT_AP_SSID.to_string(),
            ap_passphrase: String::new(),
            channel_max: DEFAULT_CHANNEL_MAX,
            frames_per_burst: NUM_FRAMES_PER_DEAUTH,
            channel_dwell: DEFAULT_CHANNEL_DWELL,
            ap_restart_delay: DEFAULT_AP_RESTART_DELAY,
            default_reason: ReasonCode::UNSPECIFIED,
        }
    }
}

impl DeautherConfig {
    /// Check every field for a usable value
    pub fn validate(&self) -> Result<()> {
        validate_ssid(&self.ap_ssid)?;

        let pass_len = self.ap_passphrase.len();
        if pass_len != 0 && !(8..=63).contains(&pass_len) {
            return Err(Error::invalid_parameter(
                "ap_passphrase",
                "must be empty or 8 to 63 characters",
            ));
        }

        if !(1..=crate::Channel::MAX).contains(&self.channel_max) {
            return Err(Error::InvalidChannel(self.channel_max));
        }

        if self.frames_per_burst == 0 {
            return Err(Error::invalid_parameter(
                "frames_per_burst",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Override fields from `key=value` parameters
    ///
    /// Unknown keys are rejected so typos do not go unnoticed.
    pub fn apply_params(&mut self, params: &Params) -> Result<()> {
        for key in params.keys() {
            match key {
                "ap_ssid" => self.ap_ssid = params.require("ap_ssid")?,
                "ap_passphrase" => self.ap_passphrase = params.require("ap_passphrase")?,
                "channel_max" => self.channel_max = params.require("channel_max")?,
                "frames_per_burst" => self.frames_per_burst = params.require("frames_per_burst")?,
                "channel_dwell_ms" => {
                    self.channel_dwell = Duration::from_millis(params.require("channel_dwell_ms")?)
                }
                "ap_restart_delay_ms" => {
                    self.ap_restart_delay =
                        Duration::from_millis(params.require("ap_restart_delay_ms")?)
                }
                "reason" => self.default_reason = ReasonCode(params.require("reason")?),
                other => {
                    return Err(Error::invalid_parameter(other, "unknown configuration key"));
                }
            }
        }
        self.validate()
    }
}

/// Check an SSID against the 802.11 length limit
pub fn validate_ssid(ssid: &str) -> Result<()> {
    if ssid.is_empty() || ssid.len() > MAX_SSID_LEN {
        return Err(Error::invalid_parameter(
            "ssid",
            format!("must be 1 to {} bytes, got {}", MAX_SSID_LEN, ssid.len()),
        ));
    }
    Ok(())
}

/// `key=value` parameter set
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` strings; entries without `=` are rejected
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| Error::Parse(format!("expected KEY=VALUE, got '{}'", pair)))?;
            params = params.set(key.trim(), value.trim());
        }
        Ok(params)
    }

    /// Set a parameter value
    pub fn set<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a raw parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse a parameter into `T`
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| Error::invalid_parameter(key, format!("cannot parse '{}'", raw))),
            None => Ok(None),
        }
    }

    fn require<T: FromStr>(&self, key: &str) -> Result<T> {
        self.get_parsed(key)?
            .ok_or_else(|| Error::invalid_parameter(key, "missing value"))
    }

    /// Parameter names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
