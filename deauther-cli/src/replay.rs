//! Offline replay of captured frames through the attack core

use deauther_attack::{AttackController, MainLoop, SimulatedRadio};
use deauther_capture::{read_hex_dump, CaptureSink, CaptureStats};
use deauther_core::{
    AccessPointInfo, AttackMode, Channel, DeautherConfig, Error, MacAddr, ReasonCode, Result,
};
use deauther_packet::MacHeader;
use std::fmt;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, info};

/// Session settings for one replay
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub mode: AttackMode,
    /// Target access point; single-target replays fall back to the first beacon's sender
    pub bssid: Option<MacAddr>,
    pub channel: Channel,
    /// Rogue SSID; defaults to the configured access point SSID
    pub ssid: Option<String>,
    /// Reason code; defaults to the configured one
    pub reason: Option<ReasonCode>,
    pub config: DeautherConfig,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            mode: AttackMode::SingleTarget,
            bssid: None,
            channel: Channel::first(),
            ssid: None,
            reason: None,
            config: DeautherConfig::default(),
        }
    }
}

/// Outcome of a replay
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub mode: AttackMode,
    pub target: Option<AccessPointInfo>,
    pub frames_replayed: usize,
    pub frames_delivered: usize,
    pub frames_stored: usize,
    pub beacon_captured: bool,
    pub eliminated_stations: u32,
    pub transmissions: usize,
    pub stats: CaptureStats,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mode: {}", self.mode)?;
        match &self.target {
            Some(target) => writeln!(f, "Target: {}", target)?,
            None => writeln!(f, "Target: any")?,
        }
        writeln!(
            f,
            "Frames: {} replayed, {} delivered, {} stored",
            self.frames_replayed, self.frames_delivered, self.frames_stored
        )?;
        writeln!(
            f,
            "Beacon captured: {}",
            if self.beacon_captured { "yes" } else { "no" }
        )?;
        writeln!(f, "Eliminated stations: {}", self.eliminated_stations)?;
        writeln!(f, "Deauth frames transmitted: {}", self.transmissions)?;
        write!(f, "{}", self.stats.format())
    }
}

/// Sender of the first beacon in `frames`
pub fn first_beacon_sender(frames: &[Vec<u8>]) -> Option<MacAddr> {
    frames
        .iter()
        .filter_map(|frame| MacHeader::parse(frame))
        .find(|header| header.is_beacon())
        .map(|header| header.src)
}

/// Read a hex dump and replay it
pub async fn replay_dump<R, S>(input: R, options: ReplayOptions, sink: S) -> Result<ReplayReport>
where
    R: BufRead,
    S: CaptureSink,
{
    let frames = read_hex_dump(input)?;
    info!(frames = frames.len(), "Hex dump loaded");
    replay_frames(&frames, options, sink).await
}

/// Feed `frames` to a simulated radio running an attack session
///
/// The main loop is polled after every frame so the capture ring drains the
/// way it would on a live device.
pub async fn replay_frames<S: CaptureSink>(
    frames: &[Vec<u8>],
    options: ReplayOptions,
    sink: S,
) -> Result<ReplayReport> {
    let bssid = match (options.mode, options.bssid) {
        (_, Some(bssid)) => Some(bssid),
        (AttackMode::SingleTarget, None) => Some(first_beacon_sender(frames).ok_or_else(|| {
            Error::invalid_parameter("bssid", "no target given and no beacon in the capture")
        })?),
        (AttackMode::Broad, None) => None,
    };

    let spoof_ssid = options
        .ssid
        .clone()
        .unwrap_or_else(|| options.config.ap_ssid.clone());
    let reason = options.reason.unwrap_or(options.config.default_reason);

    let mut radio = SimulatedRadio::new();
    if let Some(bssid) = bssid {
        radio = radio.with_access_point(AccessPointInfo {
            ssid: spoof_ssid.clone(),
            bssid,
            channel: options.channel,
        });
    }
    let radio = Arc::new(radio);

    let controller = Arc::new(AttackController::new(radio.clone(), options.config)?);
    controller.bring_up()?;
    controller.start(0, options.mode, reason, &spoof_ssid).await?;

    let mut main_loop = MainLoop::new(controller.clone(), sink);
    let mut delivered = 0;
    let mut stored = 0;

    for frame in frames {
        if radio.deliver(frame) {
            delivered += 1;
        }
        stored += main_loop.poll_once()?.drained;
    }

    controller.stop()?;
    stored += main_loop.drain().0;
    let mut sink = main_loop.into_sink();
    sink.flush()?;

    debug!(delivered, stored, "Replay finished");

    Ok(ReplayReport {
        mode: controller.mode(),
        target: controller.target(),
        frames_replayed: frames.len(),
        frames_delivered: delivered,
        frames_stored: stored,
        beacon_captured: controller.beacon_captured(),
        eliminated_stations: controller.eliminated_stations(),
        transmissions: radio.transmissions().len(),
        stats: controller.stats(),
    })
}
