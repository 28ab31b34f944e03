//! Minimal PNG reader for dimensions and embedded text.
//!
//! One pass over the chunk stream collects the `IHDR` dimensions and every
//! `tEXt`/`iTXt` keyword/text pair. The framing is the bit-exact PNG
//! contract: 8-byte signature, then chunks of 4-byte big-endian length,
//! 4-byte type tag, payload, 4-byte CRC. The CRC is skipped, never
//! validated. Reading stops at `IEND` or end-of-stream.
//!
//! Failure policy: a file that cannot be opened or lacks the signature
//! yields `None`; the caller treats that as "no metadata", not an error.
//! A malformed individual chunk is skipped; a truncated stream terminates
//! the scan with whatever was collected so far.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use memchr::memchr;

/// Fixed 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Refuse to buffer text/header chunks larger than this; the chunk is
/// skipped instead. Protects against corrupted length words.
const MAX_BUFFERED_CHUNK: u32 = 1 << 24;

/// Everything one pass over a PNG yields.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PngInfo {
    pub width: u32,
    pub height: u32,
    /// Decoded keyword → text pairs; the last occurrence of a keyword wins.
    pub texts: BTreeMap<String, String>,
}

/// Reads dimensions and text chunks from the file at `path`.
///
/// Returns `None` if the file cannot be opened or is not a PNG.
pub fn read_png_info(path: &Path) -> Option<PngInfo> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);

    let mut signature = [0u8; 8];
    if reader.read_exact(&mut signature).is_err() || signature != PNG_SIGNATURE {
        return None;
    }

    let mut info = PngInfo::default();
    loop {
        let mut word = [0u8; 4];
        if reader.read_exact(&mut word).is_err() {
            // End of stream without IEND; keep what we have.
            break;
        }
        let length = u32::from_be_bytes(word);

        let mut tag = [0u8; 4];
        if reader.read_exact(&mut tag).is_err() {
            break;
        }
        if &tag == b"IEND" {
            break;
        }

        let wants_payload = matches!(&tag, b"IHDR" | b"tEXt" | b"iTXt");
        if wants_payload && length <= MAX_BUFFERED_CHUNK {
            let mut payload = vec![0u8; length as usize];
            if reader.read_exact(&mut payload).is_err() {
                break;
            }
            collect_chunk(&tag, &payload, &mut info);
        } else if !skip_bytes(&mut reader, u64::from(length)) {
            break;
        }

        // CRC: skipped, not validated.
        if !skip_bytes(&mut reader, 4) {
            break;
        }
    }

    Some(info)
}

/// Folds one buffered chunk into the collected info.
fn collect_chunk(tag: &[u8; 4], payload: &[u8], info: &mut PngInfo) {
    match tag {
        b"IHDR" if payload.len() >= 8 => {
            info.width = be_u32(&payload[0..4]);
            info.height = be_u32(&payload[4..8]);
        }
        b"tEXt" => {
            if let Some((keyword, text)) = parse_text(payload) {
                info.texts.insert(keyword, text);
            }
        }
        b"iTXt" => {
            if let Some((keyword, text)) = parse_international_text(payload) {
                info.texts.insert(keyword, text);
            }
        }
        _ => {}
    }
}

fn be_u32(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[..4]);
    u32::from_be_bytes(word)
}

/// `tEXt` payload: `keyword\0text`, both Latin-1.
///
/// A payload without the NUL separator is malformed; the chunk is dropped.
fn parse_text(payload: &[u8]) -> Option<(String, String)> {
    let nul = memchr(0, payload)?;
    let keyword = latin1(&payload[..nul]);
    let text = latin1(&payload[nul + 1..]);
    Some((keyword, text))
}

/// `iTXt` payload: keyword NUL, compression flag, compression method,
/// language tag NUL, translated keyword NUL, UTF-8 text.
///
/// A nonzero compression flag means the text is deflated; decompression is
/// out of scope, so the chunk is dropped.
fn parse_international_text(payload: &[u8]) -> Option<(String, String)> {
    let nul = memchr(0, payload)?;
    let keyword = latin1(&payload[..nul]);

    let rest = payload.get(nul + 1..)?;
    let (&compression_flag, rest) = rest.split_first()?;
    let (_, rest) = rest.split_first()?; // compression method

    let language_end = memchr(0, rest)?;
    let rest = &rest[language_end + 1..];
    let translated_end = memchr(0, rest)?;
    let text_bytes = &rest[translated_end + 1..];

    if compression_flag != 0 {
        return None;
    }
    Some((keyword, String::from_utf8_lossy(text_bytes).into_owned()))
}

/// Latin-1 decoding cannot fail: every byte maps to the code point of the
/// same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Discards `n` bytes; false if the stream ended early.
fn skip_bytes<R: Read>(reader: &mut R, n: u64) -> bool {
    matches!(io::copy(&mut reader.by_ref().take(n), &mut io::sink()), Ok(copied) if copied == n)
}
