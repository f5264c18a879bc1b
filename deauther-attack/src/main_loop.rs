//! Consumer side: drain captured frames and hop channels

use crate::controller::{AttackController, ControllerState};
use crate::hopper::ChannelHopper;
use deauther_capture::CaptureSink;
use deauther_core::{AttackMode, Channel, Radio, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Work done by one [`MainLoop::poll_once`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Frames taken out of the ring
    pub drained: usize,
    /// Frames the sink failed to store
    pub write_failures: usize,
    /// Channel selected by this iteration's hop
    pub hopped_to: Option<Channel>,
}

/// Cooperative consumer loop
///
/// Drains the capture ring into a sink and, while a broad session is armed,
/// moves the radio to the next channel on every iteration.
pub struct MainLoop<R: Radio + ?Sized + 'static, S: CaptureSink> {
    controller: Arc<AttackController<R>>,
    sink: S,
    hopper: ChannelHopper,
}

impl<R: Radio + ?Sized + 'static, S: CaptureSink> MainLoop<R, S> {
    pub fn new(controller: Arc<AttackController<R>>, sink: S) -> Self {
        let hopper = ChannelHopper::new(controller.config().channel_max);
        Self {
            controller,
            sink,
            hopper,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the loop, returning the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Store every pending frame
    ///
    /// A frame the sink rejects is logged and released anyway.
    pub fn drain(&mut self) -> (usize, usize) {
        let sink = &mut self.sink;
        let mut failures = 0;

        let drained = self.controller.session().ring().drain(|record| {
            match sink.write_frame(record.as_bytes()) {
                Ok(()) => debug!(len = record.len(), "Captured frame stored"),
                Err(e) => {
                    failures += 1;
                    warn!(error = %e, len = record.len(), "Failed to store captured frame");
                }
            }
        });

        (drained, failures)
    }

    /// One loop iteration: drain, then hop if a broad session is armed
    pub fn poll_once(&mut self) -> Result<PollReport> {
        let (drained, write_failures) = self.drain();

        let hopped_to = match self.controller.state() {
            ControllerState::Armed(AttackMode::Broad) => {
                Some(self.hopper.hop(&**self.controller.radio())?)
            }
            _ => None,
        };

        Ok(PollReport {
            drained,
            write_failures,
            hopped_to,
        })
    }

    /// Poll until `running` clears, waiting the channel dwell time between iterations
    pub async fn run(&mut self, running: Arc<AtomicBool>) -> Result<()> {
        let dwell = self.controller.config().channel_dwell;
        info!(dwell_ms = dwell.as_millis() as u64, "Main loop started");

        while running.load(Ordering::Relaxed) {
            if let Err(e) = self.poll_once() {
                warn!(error = %e, "Main loop iteration failed");
            }
            sleep(dwell).await;
        }

        // Pick up anything captured after the last iteration.
        self.drain();
        self.sink.flush()?;
        info!("Main loop stopped");
        Ok(())
    }
}
