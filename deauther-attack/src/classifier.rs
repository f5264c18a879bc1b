//! Frame classification predicates
//!
//! These run inside the receive callback. They only ever push into the
//! capture ring; nothing here transmits.

use crate::session::Session;
use deauther_core::{FrameCategory, MacAddr, RxPacket};
use deauther_packet::{find_eapol, MacHeader};
use tracing::debug;

/// Check whether `target` is the frame's source or destination
pub fn involves_target(header: &MacHeader, target: &MacAddr) -> bool {
    header.involves(target)
}

/// Check whether the frame is a beacon sent by `target`
pub fn is_target_beacon(category: FrameCategory, header: &MacHeader, target: &MacAddr) -> bool {
    category == FrameCategory::Management && header.src == *target && header.is_beacon()
}

/// Store the first beacon sent by `target` this session
///
/// Fires at most once per session. The flag is raised only once a beacon is
/// actually stored, so a beacon dropped on a full ring leaves the next one
/// eligible.
pub fn capture_beacon(
    session: &Session,
    packet: &RxPacket<'_>,
    header: &MacHeader,
    target: &MacAddr,
) -> bool {
    if session.beacon_captured() || !is_target_beacon(packet.category, header, target) {
        return false;
    }

    let stored = session.capture(packet.data());
    if stored {
        session.mark_beacon_captured();
        session.counters().record_beacon();
        debug!(bssid = %target, len = packet.len(), "Target beacon captured");
    }
    stored
}

/// Store a data frame carrying an EAPOL key exchange
///
/// Callers restrict this to single-target sessions and frames that involve
/// the target.
pub fn capture_eapol(session: &Session, packet: &RxPacket<'_>) -> bool {
    if packet.category != FrameCategory::Data {
        return false;
    }

    let data = packet.data();
    match find_eapol(data, data.len()) {
        Some(offset) => {
            let stored = session.capture(data);
            if stored {
                session.counters().record_eapol();
                debug!(offset, len = data.len(), "EAPOL frame captured");
            }
            stored
        }
        None => false,
    }
}
