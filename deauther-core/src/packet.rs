//! Received frame types

use crate::FrameCategory;

/// Largest frame (including FCS) the receive path will accept
pub const MAX_FRAME_LEN: usize = 512;

/// A frame delivered by the radio while promiscuous capture is enabled
///
/// Borrowed from the driver's receive buffer for the duration of one
/// callback invocation.
#[derive(Debug, Clone, Copy)]
pub struct RxPacket<'a> {
    /// Raw 802.11 frame starting at the frame-control field
    pub payload: &'a [u8],
    /// Declared length reported by the driver, FCS included
    pub sig_len: u16,
    /// Frame category reported by the driver
    pub category: FrameCategory,
}

impl<'a> RxPacket<'a> {
    /// Create a packet whose declared length equals the payload length
    pub fn new(payload: &'a [u8], category: FrameCategory) -> Self {
        Self {
            payload,
            sig_len: payload.len().min(u16::MAX as usize) as u16,
            category,
        }
    }

    /// Create a packet, deriving the category from the frame-control byte
    pub fn classify(payload: &'a [u8]) -> Self {
        let category = payload
            .first()
            .map(|fc| FrameCategory::from_frame_control(*fc))
            .unwrap_or(FrameCategory::Misc);
        Self::new(payload, category)
    }

    /// Override the declared length
    pub fn with_sig_len(mut self, sig_len: u16) -> Self {
        self.sig_len = sig_len;
        self
    }

    /// Declared length
    pub fn len(&self) -> usize {
        self.sig_len as usize
    }

    /// Check if the declared length is zero
    pub fn is_empty(&self) -> bool {
        self.sig_len == 0
    }

    /// Bytes covered by the declared length
    ///
    /// Never longer than the backing payload, even when the driver declares
    /// more than it delivered.
    pub fn data(&self) -> &'a [u8] {
        let end = self.len().min(self.payload.len());
        &self.payload[..end]
    }

    /// Check the declared length against [`MAX_FRAME_LEN`]
    pub fn is_oversized(&self) -> bool {
        self.len() > MAX_FRAME_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_uses_frame_control() {
        let beacon = [0x80u8, 0x00, 0x00, 0x00];
        let packet = RxPacket::classify(&beacon);
        assert_eq!(packet.category, FrameCategory::Management);
        assert_eq!(packet.len(), 4);

        let empty = RxPacket::classify(&[]);
        assert_eq!(empty.category, FrameCategory::Misc);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_data_clamps_to_payload() {
        let bytes = [0u8; 10];
        let packet = RxPacket::new(&bytes, FrameCategory::Data).with_sig_len(40);
        assert_eq!(packet.len(), 40);
        assert_eq!(packet.data().len(), 10);

        let shorter = RxPacket::new(&bytes, FrameCategory::Data).with_sig_len(4);
        assert_eq!(shorter.data().len(), 4);
    }

    #[test]
    fn test_oversized() {
        let bytes = [0u8; 4];
        let packet = RxPacket::new(&bytes, FrameCategory::Data);
        assert!(!packet.with_sig_len(MAX_FRAME_LEN as u16).is_oversized());
        assert!(packet.with_sig_len(MAX_FRAME_LEN as u16 + 1).is_oversized());
    }
}
