//! Encoding detection and transcoding module
//!
//! Stdin arrives as raw bytes. This module turns them into text before
//! cleaning, so UTF-16 or legacy single-byte input still yields its letters.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::io::Read;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a byte buffer
pub fn detect_encoding(content: &[u8]) -> EncodingInfo {
    if content.is_empty() {
        return EncodingInfo::default();
    }

    // Check for BOM first
    if let Some(encoding) = detect_bom(content) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    if std::str::from_utf8(content).is_ok() {
        return EncodingInfo::default();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(content, true);
    let encoding = detector.guess(None, true);

    EncodingInfo {
        name: encoding.name(),
        confidence: if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 },
        encoding,
    }
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    if content.len() >= 3 && content[0..3] == [0xEF, 0xBB, 0xBF] {
        return Some(encoding_rs::UTF_8);
    }
    if content.len() >= 2 {
        if content[0..2] == [0xFE, 0xFF] {
            return Some(encoding_rs::UTF_16BE);
        }
        if content[0..2] == [0xFF, 0xFE] {
            return Some(encoding_rs::UTF_16LE);
        }
    }
    None
}

/// Decode bytes to a `String` using the detected encoding
pub fn decode_bytes(content: &[u8]) -> (String, EncodingInfo) {
    let info = detect_encoding(content);

    // `decode` strips a BOM and falls back to replacement characters
    let (decoded, _, had_errors) = info.encoding.decode(content);
    if had_errors {
        log::warn!("Encoding errors in input ({}), using lossy conversion", info.name);
    }

    (decoded.into_owned(), info)
}

/// Read everything from `reader` and decode it
pub fn read_to_string_detected<R: Read>(
    mut reader: R,
) -> std::io::Result<(String, EncodingInfo, usize)> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    let (text, info) = decode_bytes(&content);
    Ok((text, info, content.len()))
}
