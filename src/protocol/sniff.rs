//! First-byte format detection for untyped input.
//!
//! HAL documents arriving without a declared content type are routed by their
//! first significant byte:
//!
//! | First non-whitespace byte | Format |
//! |---------------------------|--------|
//! | `{` | HAL+JSON |
//! | `<` | HAL+XML |
//! | anything else, or end of input | unrecognized |

use super::constants::content_types;
use std::io::{self, BufRead};

/// Wire format recognized by sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `application/hal+json`
    Json,
    /// `application/hal+xml`
    Xml,
}

impl Format {
    /// The content type whose registered reader handles this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Json => content_types::HAL_JSON,
            Format::Xml => content_types::HAL_XML,
        }
    }
}

/// Map a leading byte to the format it announces.
///
/// # Examples
///
/// ```
/// use halbuilder::protocol::{sniff_format, Format};
///
/// assert_eq!(sniff_format(b'{'), Some(Format::Json));
/// assert_eq!(sniff_format(b'<'), Some(Format::Xml));
/// assert_eq!(sniff_format(b'1'), None);
/// ```
#[inline]
pub fn sniff_format(byte: u8) -> Option<Format> {
    match byte {
        b'{' => Some(Format::Json),
        b'<' => Some(Format::Xml),
        _ => None,
    }
}

/// Return the first non-whitespace byte of `reader` without consuming it.
///
/// Leading ASCII whitespace is discarded; the returned byte stays in the
/// buffer so the selected reader sees the document from its first
/// significant byte. Returns `None` at end of input.
///
/// # Examples
///
/// ```
/// use halbuilder::protocol::peek_first_byte;
/// use std::io::{BufRead, BufReader};
///
/// let mut reader = BufReader::new(&b"  \n{\"a\":1}"[..]);
/// assert_eq!(peek_first_byte(&mut reader).unwrap(), Some(b'{'));
/// assert_eq!(reader.fill_buf().unwrap()[0], b'{');
/// ```
pub fn peek_first_byte<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        let (skip, first) = {
            let buf = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(None);
            }
            let skip = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            (skip, buf.get(skip).copied())
        };
        reader.consume(skip);
        if first.is_some() {
            return Ok(first);
        }
    }
}
