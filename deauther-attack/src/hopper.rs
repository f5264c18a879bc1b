//! Channel hopping for broad-target sessions

use deauther_core::{Channel, Radio, Result};
use tracing::trace;

/// Cycles the radio across channels `1..=channel_max`
#[derive(Debug, Clone)]
pub struct ChannelHopper {
    next: u8,
    channel_max: u8,
}

impl ChannelHopper {
    /// Create a hopper starting at channel 1
    pub fn new(channel_max: u8) -> Self {
        Self {
            next: Channel::MIN,
            channel_max: channel_max.clamp(Channel::MIN, Channel::MAX),
        }
    }

    pub fn channel_max(&self) -> u8 {
        self.channel_max
    }

    /// Channel the next hop will select, wrapping after `channel_max`
    pub fn peek(&self) -> u8 {
        if self.next > self.channel_max {
            Channel::MIN
        } else {
            self.next
        }
    }

    /// Advance to the next channel without touching the radio
    pub fn advance(&mut self) -> Result<Channel> {
        let channel = Channel::new(self.peek())?;
        self.next = channel.number() + 1;
        Ok(channel)
    }

    /// Tune `radio` to the next channel
    pub fn hop<R: Radio + ?Sized>(&mut self, radio: &R) -> Result<Channel> {
        let channel = self.advance()?;
        radio.set_channel(channel)?;
        trace!(channel = channel.number(), "Channel hop");
        Ok(channel)
    }

    /// Restart from channel 1
    pub fn reset(&mut self) {
        self.next = Channel::MIN;
    }
}

/// Legal channels for a given maximum
pub fn channels(channel_max: u8) -> impl Iterator<Item = Channel> {
    (Channel::MIN..=channel_max.min(Channel::MAX)).filter_map(|n| Channel::new(n).ok())
}
