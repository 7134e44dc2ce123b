use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

/// The encoding a script was decoded with. Detection follows spec.md §4.1's
/// ordered procedure and never second-guesses a successful strict UTF-8
/// decode, even for legacy files that are valid UTF-8 by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Cp1252,
    Latin1,
}

pub fn decode(bytes: &[u8]) -> Option<(Encoding, String)> {
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE, 0x00, 0x00]) {
        return Some((Encoding::Utf32Le, decode_utf32le(rest)));
    }
    if let Some(rest) = bytes.strip_prefix(&[0x00, 0x00, 0xFE, 0xFF]) {
        return Some((Encoding::Utf32Be, decode_utf32be(rest)));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return std::str::from_utf8(rest)
            .ok()
            .map(|s| (Encoding::Utf8Bom, s.to_string()));
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let (text, _, had_errors) = UTF_16LE.decode(rest);
        if !had_errors {
            return Some((Encoding::Utf16Le, text.into_owned()));
        }
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (text, _, had_errors) = UTF_16BE.decode(rest);
        if !had_errors {
            return Some((Encoding::Utf16Be, text.into_owned()));
        }
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return Some((Encoding::Utf8, s.to_string()));
    }

    if bytes.len() % 2 == 0 && !bytes.is_empty() {
        if looks_like_utf16(bytes, true) {
            let (text, _, had_errors) = UTF_16LE.decode(bytes);
            if !had_errors {
                return Some((Encoding::Utf16Le, text.into_owned()));
            }
        }
        if looks_like_utf16(bytes, false) {
            let (text, _, had_errors) = UTF_16BE.decode(bytes);
            if !had_errors {
                return Some((Encoding::Utf16Be, text.into_owned()));
            }
        }
    }

    let (text, _, had_errors) = WINDOWS_1252.decode(bytes);
    if !had_errors {
        return Some((Encoding::Cp1252, text.into_owned()));
    }

    // Latin-1 (ISO-8859-1) maps every byte to a codepoint, so it never fails
    // to decode; it is the lossless last resort named in spec.md §4.1.
    Some((Encoding::Latin1, bytes.iter().map(|&b| b as char).collect()))
}

/// Heuristic used only when there is no BOM: even byte count and a majority
/// of ASCII values in the position that would hold the low byte of a
/// 2-byte-per-char ASCII-heavy script.
fn looks_like_utf16(bytes: &[u8], little_endian: bool) -> bool {
    let mut ascii_positions = 0usize;
    let mut total_positions = 0usize;
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        let (low, high) = if little_endian {
            (bytes[i], bytes[i + 1])
        } else {
            (bytes[i + 1], bytes[i])
        };
        total_positions += 1;
        if high == 0 && (low.is_ascii_graphic() || low == b' ' || low == b'\r' || low == b'\n') {
            ascii_positions += 1;
        }
        i += 2;
    }
    total_positions > 0 && (ascii_positions as f64) / (total_positions as f64) > 0.7
}

fn decode_utf32le(bytes: &[u8]) -> String {
    bytes
        .chunks_exact(4)
        .filter_map(|c| {
            let v = u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
            char::from_u32(v)
        })
        .collect()
}

fn decode_utf32be(bytes: &[u8]) -> String {
    bytes
        .chunks_exact(4)
        .filter_map(|c| {
            let v = u32::from_be_bytes([c[0], c[1], c[2], c[3]]);
            char::from_u32(v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_is_utf8() {
        let (enc, text) = decode(b"@echo off\r\n").unwrap();
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "@echo off\r\n");
    }

    #[test]
    fn utf8_bom_detected() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"@echo off\r\n");
        let (enc, text) = decode(&bytes).unwrap();
        assert_eq!(enc, Encoding::Utf8Bom);
        assert_eq!(text, "@echo off\r\n");
    }

    #[test]
    fn utf16_le_bom_detected() {
        let mut bytes = vec![0xFF, 0xFE];
        for c in "echo hi".encode_utf16() {
            bytes.extend_from_slice(&c.to_le_bytes());
        }
        let (enc, text) = decode(&bytes).unwrap();
        assert_eq!(enc, Encoding::Utf16Le);
        assert_eq!(text, "echo hi");
    }

    #[test]
    fn legacy_accidental_utf8_stays_utf8() {
        // Valid UTF-8 bytes that happen to also be valid Latin-1; the
        // strict-UTF-8 pass must win and never be second-guessed.
        let bytes = "café".as_bytes();
        let (enc, text) = decode(bytes).unwrap();
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "café");
    }

    #[test]
    fn cp1252_fallback_for_invalid_utf8() {
        // 0x93/0x94 are CP1252 smart quotes, invalid as UTF-8 continuation bytes.
        let bytes = vec![b'"', 0x93, b'h', b'i', 0x94];
        let (enc, _text) = decode(&bytes).unwrap();
        assert_eq!(enc, Encoding::Cp1252);
    }

    #[test]
    fn empty_bytes_decode_as_utf8() {
        let (enc, text) = decode(&[]).unwrap();
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "");
    }
}
