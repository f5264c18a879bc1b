//! Hex-dump export of captured frames
//!
//! Frames are written in the offset/hex layout understood by `text2pcap`:
//!
//! ```text
//! # EAPOL/Beacon frame
//! 000000 88 02 3A 01 ...
//! 000010 ...
//!
//! ```
//!
//! The trailing FCS is dropped before writing.

use deauther_core::{Error, Result};
use deauther_packet::FCS_LEN;
use std::io::{BufRead, Write};
use tracing::trace;

/// Comment line preceding every frame
pub const FRAME_HEADER: &str = "# EAPOL/Beacon frame";

/// Bytes per hex-dump row
pub const BYTES_PER_ROW: usize = 16;

/// Destination for frames drained from the capture ring
pub trait CaptureSink {
    /// Persist one captured frame
    fn write_frame(&mut self, frame: &[u8]) -> Result<()>;

    /// Flush buffered output
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl CaptureSink for Vec<Vec<u8>> {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.push(frame.to_vec());
        Ok(())
    }
}

/// Strip the FCS from a captured frame
///
/// Frames of [`FCS_LEN`] bytes or fewer are returned unchanged.
pub fn strip_fcs(frame: &[u8]) -> &[u8] {
    if frame.len() > FCS_LEN {
        &frame[..frame.len() - FCS_LEN]
    } else {
        frame
    }
}

/// Text hex-dump writer
pub struct HexDumpWriter<W: Write> {
    inner: W,
    frames_written: u64,
}

impl<W: Write> HexDumpWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            frames_written: 0,
        }
    }

    /// Number of frames written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Consume the writer, returning the underlying output
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_record(&mut self, data: &[u8]) -> std::io::Result<()> {
        writeln!(self.inner, "{}", FRAME_HEADER)?;
        for (row, chunk) in data.chunks(BYTES_PER_ROW).enumerate() {
            write!(self.inner, "{:06X} ", row * BYTES_PER_ROW)?;
            for byte in chunk {
                write!(self.inner, "{:02X} ", byte)?;
            }
            writeln!(self.inner)?;
        }
        writeln!(self.inner)
    }
}

impl<W: Write> CaptureSink for HexDumpWriter<W> {
    fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        let data = strip_fcs(frame);
        self.write_record(data)?;
        self.frames_written += 1;
        trace!(len = data.len(), "Frame written to hex dump");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Read frames back from a hex dump
///
/// Comment lines start with `#`. A blank line or a row at offset zero closes
/// the current frame. Each row is an offset followed by hex bytes.
pub fn read_hex_dump<R: BufRead>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut frames = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !current.is_empty() {
                frames.push(std::mem::take(&mut current));
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        let offset = tokens
            .next()
            .map(|t| usize::from_str_radix(t, 16))
            .transpose()
            .map_err(|e| Error::Parse(format!("line {}: bad offset: {}", number + 1, e)))?
            .unwrap_or(0);

        if offset == 0 && !current.is_empty() {
            frames.push(std::mem::take(&mut current));
        }
        if offset != current.len() {
            return Err(Error::Parse(format!(
                "line {}: offset {:06X} does not follow {} bytes",
                number + 1,
                offset,
                current.len()
            )));
        }

        for token in tokens {
            let byte = u8::from_str_radix(token, 16).map_err(|e| {
                Error::Parse(format!("line {}: bad byte '{}': {}", number + 1, token, e))
            })?;
            current.push(byte);
        }
    }

    if !current.is_empty() {
        frames.push(current);
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(frames: &[&[u8]]) -> String {
        let mut writer = HexDumpWriter::new(Vec::new());
        for frame in frames {
            writer.write_frame(frame).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_layout() {
        // 20 bytes minus the FCS leaves exactly one full row.
        let frame: Vec<u8> = (0u8..20).collect();
        let text = dump(&[&frame]);

        assert_eq!(
            text,
            "# EAPOL/Beacon frame\n\
             000000 00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F \n\
             \n"
        );
    }

    #[test]
    fn test_second_row_offset() {
        let frame = [0x11u8; 22];
        let text = dump(&[&frame]);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1].split_whitespace().next(), Some("000000"));
        assert_eq!(rows[2], "000010 11 11 ");
        assert_eq!(rows[3], "");
    }

    #[test]
    fn test_fcs_is_stripped() {
        assert_eq!(strip_fcs(&[1, 2, 3, 4, 5]), &[1]);
        assert_eq!(strip_fcs(&[1, 2, 3, 4]), &[1, 2, 3, 4]);
        assert_eq!(strip_fcs(&[]), &[] as &[u8]);
    }

    #[test]
    fn test_short_frame_is_written_whole() {
        let text = dump(&[&[0xAB, 0xCD]]);
        assert_eq!(text, "# EAPOL/Beacon frame\n000000 AB CD \n\n");
    }

    #[test]
    fn test_frames_written_counter() {
        let mut writer = HexDumpWriter::new(Vec::new());
        writer.write_frame(&[0u8; 40]).unwrap();
        writer.write_frame(&[0u8; 60]).unwrap();
        assert_eq!(writer.frames_written(), 2);
    }

    #[test]
    fn test_read_back() {
        let first: Vec<u8> = (0u8..40).collect();
        let second: Vec<u8> = (100u8..140).collect();
        let text = dump(&[&first, &second]);

        let frames = read_hex_dump(text.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], &first[..36]);
        assert_eq!(frames[1], &second[..36]);
    }

    #[test]
    fn test_read_without_blank_separator() {
        let text = "000000 01 02\n000000 03 04 05\n";
        let frames = read_hex_dump(text.as_bytes()).unwrap();
        assert_eq!(frames, vec![vec![1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_read_rejects_garbage() {
        assert!(matches!(
            read_hex_dump("000000 zz\n".as_bytes()),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            read_hex_dump("000000 01\n000008 02\n".as_bytes()),
            Err(Error::Parse(_))
        ));
    }
}
