//! End-to-end session tests: start, deliver frames, drain, stop

use deauther_attack::{AttackController, ControllerState, MainLoop, SimulatedRadio};
use deauther_capture::{read_hex_dump, CaptureRing, CaptureSink, HexDumpWriter, MAX_BUFFER_SIZE};
use deauther_core::{
    AccessPointInfo, AttackMode, Channel, DeautherConfig, MacAddr, RadioInterface, ReasonCode,
};
use deauther_packet::{DeauthFrame, LlcSnapHeader, FCS_LEN};
use std::sync::Arc;
use std::time::Duration;

const TARGET: MacAddr = MacAddr([0x24, 0x0a, 0xc4, 0x10, 0x20, 0x30]);
const NEIGHBOUR: MacAddr = MacAddr([0x24, 0x0a, 0xc4, 0x99, 0x99, 0x99]);
const PHONE: MacAddr = MacAddr([0x3c, 0x22, 0xfb, 0x01, 0x02, 0x03]);
const LAPTOP: MacAddr = MacAddr([0x8c, 0x85, 0x90, 0x04, 0x05, 0x06]);

fn controller() -> Arc<AttackController<SimulatedRadio>> {
    let radio = SimulatedRadio::new()
        .with_access_point(AccessPointInfo {
            ssid: "HomeNet".to_string(),
            bssid: TARGET,
            channel: Channel::new(6).unwrap(),
        })
        .with_access_point(AccessPointInfo {
            ssid: "Neighbour".to_string(),
            bssid: NEIGHBOUR,
            channel: Channel::new(1).unwrap(),
        });
    let config = DeautherConfig {
        ap_restart_delay: Duration::ZERO,
        channel_dwell: Duration::from_millis(1),
        ..DeautherConfig::default()
    };
    Arc::new(AttackController::new(Arc::new(radio), config).unwrap())
}

fn header(fc0: u8, dest: MacAddr, src: MacAddr, bssid: MacAddr) -> Vec<u8> {
    let mut bytes = vec![fc0, 0x00, 0x3a, 0x01];
    bytes.extend_from_slice(dest.as_bytes());
    bytes.extend_from_slice(src.as_bytes());
    bytes.extend_from_slice(bssid.as_bytes());
    bytes.extend_from_slice(&[0x40, 0x1f]);
    bytes
}

fn beacon(bssid: MacAddr) -> Vec<u8> {
    let mut bytes = header(0x80, MacAddr::broadcast(), bssid, bssid);
    bytes.resize(120, 0x00);
    bytes
}

fn data(dest: MacAddr, src: MacAddr, bssid: MacAddr) -> Vec<u8> {
    let mut bytes = header(0x08, dest, src, bssid);
    bytes.resize(90, 0x00);
    bytes
}

fn eapol(dest: MacAddr, src: MacAddr, bssid: MacAddr) -> Vec<u8> {
    let mut bytes = header(0x88, dest, src, bssid);
    bytes.extend_from_slice(&LlcSnapHeader::eapol().to_bytes());
    bytes.extend_from_slice(&[0x01, 0x03, 0x00, 0x75]);
    bytes.resize(133, 0x00);
    bytes
}

fn decoded_transmissions(radio: &SimulatedRadio) -> Vec<DeauthFrame> {
    radio
        .transmissions()
        .iter()
        .map(|tx| DeauthFrame::from_bytes(&tx.frame).unwrap())
        .collect()
}

#[tokio::test]
async fn test_single_target_session() {
    let controller = controller();
    controller
        .start(0, AttackMode::SingleTarget, ReasonCode::CLASS3_FROM_NONASSOC, "HomeNet")
        .await
        .unwrap();
    let radio = controller.radio().clone();

    // Two beacons from the target, one from a neighbour: only the first target beacon is kept.
    radio.deliver(&beacon(TARGET));
    radio.deliver(&beacon(TARGET));
    radio.deliver(&beacon(NEIGHBOUR));
    assert!(controller.beacon_captured());
    assert_eq!(controller.session().ring().len(), 1);

    // Handshake frame from a station to the target: captured and answered.
    radio.deliver(&eapol(TARGET, PHONE, TARGET));
    assert_eq!(controller.session().ring().len(), 2);
    assert_eq!(radio.transmissions().len(), 16);

    // Traffic to the neighbour is ignored.
    radio.deliver(&data(NEIGHBOUR, LAPTOP, NEIGHBOUR));
    assert_eq!(radio.transmissions().len(), 16);

    // A second station talking to the target.
    radio.deliver(&data(TARGET, LAPTOP, TARGET));
    let frames = decoded_transmissions(&radio);
    assert_eq!(frames.len(), 32);
    assert!(frames[..16].iter().all(|f| f.station == PHONE));
    assert!(frames[16..].iter().all(|f| f.station == LAPTOP));
    assert!(frames
        .iter()
        .all(|f| f.sender == TARGET && f.access_point == TARGET));
    assert!(frames
        .iter()
        .all(|f| f.reason == ReasonCode::CLASS3_FROM_NONASSOC));
    assert!(radio
        .transmissions()
        .iter()
        .all(|tx| tx.interface == RadioInterface::AccessPoint && tx.channel.number() == 6));
    assert_eq!(controller.eliminated_stations(), 2);

    // Persist the captures and read them back.
    let mut main_loop = MainLoop::new(controller.clone(), HexDumpWriter::new(Vec::new()));
    let report = main_loop.poll_once().unwrap();
    assert_eq!(report.drained, 2);

    let dump = main_loop.into_sink().into_inner();
    let frames = read_hex_dump(dump.as_slice()).unwrap();
    let target_beacon = beacon(TARGET);
    let handshake = eapol(TARGET, PHONE, TARGET);
    assert_eq!(frames[0], &target_beacon[..target_beacon.len() - FCS_LEN]);
    assert_eq!(frames[1], &handshake[..handshake.len() - FCS_LEN]);

    controller.stop().unwrap();
    assert!(!radio.is_promiscuous());
    assert!(!radio.deliver(&data(TARGET, PHONE, TARGET)));
    assert_eq!(controller.eliminated_stations(), 2);

    let stats = controller.stats();
    assert_eq!(stats.beacons_captured, 1);
    assert_eq!(stats.eapol_captured, 1);
    assert_eq!(stats.bursts, 2);
    assert_eq!(stats.frames_sent, 32);
}

#[tokio::test]
async fn test_broad_session() {
    let controller = controller();
    controller
        .start(0, AttackMode::Broad, ReasonCode::UNSPECIFIED, "")
        .await
        .unwrap();
    let radio = controller.radio().clone();

    radio.deliver(&data(NEIGHBOUR, LAPTOP, NEIGHBOUR));
    radio.deliver(&data(TARGET, PHONE, TARGET));
    // Broadcast and station-to-station traffic never trigger a burst.
    radio.deliver(&data(MacAddr::broadcast(), PHONE, MacAddr::broadcast()));
    radio.deliver(&data(PHONE, LAPTOP, TARGET));
    // Handshakes are not captured in broad mode.
    radio.deliver(&eapol(TARGET, PHONE, TARGET));

    let frames = decoded_transmissions(&radio);
    assert_eq!(frames.len(), 48);
    assert!(frames[..16]
        .iter()
        .all(|f| f.station == LAPTOP && f.sender == NEIGHBOUR && f.access_point == NEIGHBOUR));
    assert!(frames[16..]
        .iter()
        .all(|f| f.station == PHONE && f.sender == TARGET && f.access_point == TARGET));
    assert!(radio
        .transmissions()
        .iter()
        .all(|tx| tx.interface == RadioInterface::Station));
    assert_eq!(controller.stats().eapol_captured, 0);

    let mut main_loop = MainLoop::new(controller.clone(), Vec::<Vec<u8>>::new());
    let first = main_loop.poll_once().unwrap().hopped_to.unwrap();
    let second = main_loop.poll_once().unwrap().hopped_to.unwrap();
    assert_eq!((first.number(), second.number()), (1, 2));
    assert_eq!(radio.channel().number(), 2);
}

#[tokio::test]
async fn test_stop_twice() {
    let controller = controller();
    controller
        .start(0, AttackMode::SingleTarget, ReasonCode::UNSPECIFIED, "HomeNet")
        .await
        .unwrap();
    controller.radio().deliver(&data(TARGET, PHONE, TARGET));

    controller.stop().unwrap();
    let once = (controller.state(), controller.eliminated_stations(), controller.stats());
    controller.stop().unwrap();
    let twice = (controller.state(), controller.eliminated_stations(), controller.stats());

    assert_eq!(once.0, ControllerState::Idle);
    assert_eq!(once.0, twice.0);
    assert_eq!(once.1, twice.1);
    assert_eq!(once.2.bursts, twice.2.bursts);
    assert_eq!(once.2.frames_sent, twice.2.frames_sent);
    assert!(!controller.radio().is_promiscuous());
}

#[tokio::test]
async fn test_full_ring_drops_captures() {
    let controller = controller();
    controller
        .start(0, AttackMode::SingleTarget, ReasonCode::UNSPECIFIED, "HomeNet")
        .await
        .unwrap();
    let radio = controller.radio().clone();

    for _ in 0..12 {
        radio.deliver(&eapol(TARGET, PHONE, TARGET));
    }

    let ring = controller.session().ring();
    assert_eq!(ring.len(), ring.capacity());
    let stats = controller.stats();
    assert_eq!(stats.eapol_captured, ring.capacity() as u64);
    assert_eq!(stats.buffer_full_dropped, 12 - ring.capacity() as u64);
    // Every matching frame is still answered.
    assert_eq!(controller.eliminated_stations(), 12);
}

#[test]
fn test_ring_with_ten_slots_rejects_eleventh_push() {
    let ring: CaptureRing<MAX_BUFFER_SIZE> = CaptureRing::new();
    let accepted = (0..11).filter(|_| ring.try_push(&[0x08; 40])).count();

    assert_eq!(MAX_BUFFER_SIZE, 10);
    assert!(accepted < 11);
    assert_eq!(accepted, ring.capacity());
    assert!(!ring.try_push(&[0x08; 40]));
}

#[test]
fn test_hex_dump_sink_trims_fcs() {
    let mut writer = HexDumpWriter::new(Vec::new());
    writer.write_frame(&data(TARGET, PHONE, TARGET)).unwrap();
    let frames = read_hex_dump(writer.into_inner().as_slice()).unwrap();
    assert_eq!(frames[0].len(), 90 - FCS_LEN);
}
