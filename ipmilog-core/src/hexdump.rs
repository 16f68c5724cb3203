//! Hex dump of raw buffers, 16 bytes per row with an ASCII gutter.
//!
//! Each row starts on a new line with an 8-digit offset, then one ` 0xNN`
//! cell per byte. A short final row is padded with blank cells so its gutter
//! lines up with the rows above. An empty buffer renders nothing.
//!
//! ```text
//! 0x00000000 0x48 0x65 0x6c 0x6c 0x6f 0x00 ...    Hello.
//! ```

use std::fmt;

pub const BYTES_PER_ROW: usize = 16;

const BLANK_CELL: &str = "     ";
const GUTTER_SEPARATOR: &str = "    ";

/// Displays a byte slice as hex dump rows.
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.0.chunks(BYTES_PER_ROW).enumerate() {
            write!(f, "\n0x{:08x}", row * BYTES_PER_ROW)?;
            for byte in chunk {
                write!(f, " 0x{byte:02x}")?;
            }
            for _ in chunk.len()..BYTES_PER_ROW {
                f.write_str(BLANK_CELL)?;
            }
            f.write_str(GUTTER_SEPARATOR)?;
            for &byte in chunk {
                write!(f, "{}", gutter_char(byte))?;
            }
        }
        Ok(())
    }
}

/// Printable ASCII renders as itself, everything else as `.`.
pub fn gutter_char(byte: u8) -> char {
    if (b' '..=b'~').contains(&byte) {
        byte as char
    } else {
        '.'
    }
}
