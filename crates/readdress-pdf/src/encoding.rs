//! PDF string decoding and encoding.
//!
//! Shown strings arrive either as UTF-16BE (marked with a BOM) or as
//! single-byte WinAnsi text. Replacement text written back into content
//! streams is encoded as WinAnsi, which is what the registered cover font
//! declares.

/// WinAnsi (CP1252) mappings for the 0x80–0x9F range, where it differs from
/// Latin-1. Unassigned slots map to U+FFFD.
const WINANSI_HIGH: [char; 32] = [
    '\u{20AC}', '\u{FFFD}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{FFFD}', '\u{017D}', '\u{FFFD}',
    '\u{FFFD}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{FFFD}', '\u{017E}', '\u{0178}',
];

/// Decode the bytes of a shown string into text.
///
/// A leading UTF-16BE byte-order mark selects UTF-16 decoding; everything
/// else is treated as WinAnsi. This covers the two encodings simple fonts
/// actually produce; CID-keyed fonts are out of scope for this tool.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let (text, _, _) = encoding_rs::UTF_16BE.decode(&bytes[2..]);
        return text.into_owned();
    }
    bytes.iter().map(|&b| winansi_to_char(b)).collect()
}

/// The Unicode character for a WinAnsi byte.
pub fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80..=0x9F => WINANSI_HIGH[(byte - 0x80) as usize],
        _ => byte as char,
    }
}

/// The WinAnsi byte for a Unicode character, if one exists.
pub fn char_to_winansi(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        // Latin-1 range minus the C1 slots WinAnsi reassigns
        0x00..=0x7F | 0xA0..=0xFF => Some(code as u8),
        _ => WINANSI_HIGH
            .iter()
            .position(|&c| c == ch && c != '\u{FFFD}')
            .map(|i| (i + 0x80) as u8),
    }
}

/// Encode text as WinAnsi bytes, substituting `?` for characters outside
/// the encoding.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| char_to_winansi(ch).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(decode_pdf_string(b"123 Old Street"), "123 Old Street");
        assert_eq!(encode_winansi("123 Old Street"), b"123 Old Street");
    }

    #[test]
    fn winansi_dashes_decode_to_unicode() {
        assert_eq!(decode_pdf_string(&[b'a', 0x96, b'b']), "a\u{2013}b");
        assert_eq!(decode_pdf_string(&[b'a', 0x97, b'b']), "a\u{2014}b");
    }

    #[test]
    fn utf16be_bom_selects_utf16_decoding() {
        // "Hi" as UTF-16BE with BOM
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn latin1_high_range_round_trips() {
        let bytes: Vec<u8> = vec![0xE9, 0xFC]; // é ü
        let text = decode_pdf_string(&bytes);
        assert_eq!(text, "\u{E9}\u{FC}");
        assert_eq!(encode_winansi(&text), bytes);
    }

    #[test]
    fn winansi_punctuation_round_trips() {
        for byte in [0x80u8, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x99] {
            let ch = winansi_to_char(byte);
            assert_ne!(ch, '\u{FFFD}');
            assert_eq!(char_to_winansi(ch), Some(byte), "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(encode_winansi("\u{4E2D}"), b"?");
    }
}
