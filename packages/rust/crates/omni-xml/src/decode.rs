//! Byte-to-text decoding of XML documents.
//!
//! The encoding is taken from a byte order mark when present, otherwise from
//! the `encoding` pseudo-attribute of the XML declaration, otherwise UTF-8.

use encoding_rs::{Encoding, UTF_8};

use crate::error::DecodeError;

/// Bytes scanned for the XML declaration.
const DECLARATION_SCAN_LIMIT: usize = 1024;

/// Decode a document buffer into text using its declared encoding.
///
/// # Errors
/// Returns `DecodeError::UnknownEncoding` when the declaration names an
/// encoding that is not recognized, and `DecodeError::Malformed` when the
/// bytes are not valid in the selected encoding.
pub fn decode_document(buffer: &[u8]) -> Result<String, DecodeError> {
    let (encoding, body) = match Encoding::for_bom(buffer) {
        Some((encoding, bom_len)) => (encoding, &buffer[bom_len..]),
        None => match declared_encoding(buffer) {
            Some(label) => {
                let encoding = Encoding::for_label(label.as_bytes())
                    .ok_or_else(|| DecodeError::UnknownEncoding(label.to_string()))?;
                (encoding, buffer)
            }
            None => (UTF_8, buffer),
        },
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(std::borrow::Cow::into_owned)
        .ok_or(DecodeError::Malformed {
            encoding: encoding.name(),
        })
}

/// Label from `<?xml ... encoding="..."?>`, if the buffer starts with one.
fn declared_encoding(buffer: &[u8]) -> Option<&str> {
    if !buffer.starts_with(b"<?xml") {
        return None;
    }
    let head = &buffer[..buffer.len().min(DECLARATION_SCAN_LIMIT)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    // Declarations are ASCII in every ASCII-compatible encoding.
    let declaration = std::str::from_utf8(&head[..end]).ok()?;

    let rest = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    value.find(quote).map(|close| &value[..close])
}
