// Binary automaton layout: header parsing and writing.
//
// Layout (little-endian):
// - bytes 0..4: magic `MFSA`
// - byte 4: flags (reserved, zero)
// - bytes 5..8: reserved (zero)
// - bytes 8..12: root state (first arc index, u32::MAX for the empty automaton)
// - bytes 12..16: arc count
// - then `arc count` 8-byte arc records

use crate::FsaError;
use crate::transition::Transition;

/// Magic bytes at the start of every serialized automaton.
const MAGIC: [u8; 4] = *b"MFSA";

/// Size of the binary header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Parsed automaton header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsaHeader {
    /// Raw root reference.
    pub root: u32,
    /// Number of arc records following the header.
    pub arc_count: u32,
}

impl FsaHeader {
    /// Total byte length of an automaton with this header.
    pub fn total_len(&self) -> usize {
        HEADER_SIZE + self.arc_count as usize * size_of::<Transition>()
    }
}

/// Parse and validate the 16-byte header.
///
/// Byte-swap detection is not attempted: the layout is always little-endian.
pub fn parse_header(data: &[u8]) -> Result<FsaHeader, FsaError> {
    if data.len() < HEADER_SIZE {
        return Err(FsaError::TooShort {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    if data[..4] != MAGIC {
        return Err(FsaError::InvalidMagic);
    }

    let root = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
    let arc_count = u32::from_le_bytes([data[12], data[13], data[14], data[15]]);

    Ok(FsaHeader { root, arc_count })
}

/// Append the header bytes for `header` to `out`.
pub fn write_header(header: &FsaHeader, out: &mut Vec<u8>) {
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&header.root.to_le_bytes());
    out.extend_from_slice(&header.arc_count.to_le_bytes());
}
