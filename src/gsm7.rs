// ABOUTME: GSM 03.38 default alphabet tables and septet packing/unpacking
// ABOUTME: Packs 7-bit codes LSB-first across octets and zero-fills the final partial octet

use crate::datatypes::Alphabet;
use crate::error::{EncodingError, EncodingResult};

/// Escape to the extension table
pub const ESCAPE: u8 = 0x1B;

/// GSM 7-bit default alphabet, indexed by septet value
///
/// Position 0x1B is the escape code and never matches a character.
const DEFAULT_ALPHABET: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', '\u{1b}', 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

/// Extension table reached through [`ESCAPE`]
const EXTENSION_TABLE: [(u8, char); 10] = [
    (0x0A, '\u{0c}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

fn default_code(ch: char) -> Option<u8> {
    if ch == '\u{1b}' {
        return None;
    }
    DEFAULT_ALPHABET
        .iter()
        .position(|&c| c == ch)
        .map(|pos| pos as u8)
}

fn extension_code(ch: char) -> Option<u8> {
    EXTENSION_TABLE
        .iter()
        .find(|&&(_, c)| c == ch)
        .map(|&(code, _)| code)
}

/// Returns true if every character has a default or extension table mapping
pub fn is_gsm7_compatible(text: &str) -> bool {
    text.chars()
        .all(|ch| default_code(ch).is_some() || extension_code(ch).is_some())
}

/// Maps text to septet values, extension characters as `ESC, code`
pub fn to_septets(text: &str) -> EncodingResult<Vec<u8>> {
    let mut septets = Vec::with_capacity(text.len());

    for ch in text.chars() {
        if let Some(code) = default_code(ch) {
            septets.push(code);
        } else if let Some(code) = extension_code(ch) {
            septets.push(ESCAPE);
            septets.push(code);
        } else {
            return Err(EncodingError::UnsupportedCharacter {
                character: ch,
                alphabet: Alphabet::Gsm7Bit,
            });
        }
    }

    Ok(septets)
}

/// Maps septet values back to text
///
/// An escape followed by an unknown code, or trailing alone, decodes as a
/// space per 3GPP TS 23.038.
pub fn septets_to_string(septets: &[u8]) -> String {
    let mut text = String::with_capacity(septets.len());
    let mut iter = septets.iter();

    while let Some(&septet) = iter.next() {
        if septet == ESCAPE {
            let ch = iter
                .next()
                .and_then(|&code| EXTENSION_TABLE.iter().find(|&&(c, _)| c == code))
                .map(|&(_, ch)| ch)
                .unwrap_or(' ');
            text.push(ch);
        } else {
            text.push(DEFAULT_ALPHABET[(septet & 0x7F) as usize]);
        }
    }

    text
}

/// Packs septets LSB-first into octets
///
/// Unused high-order bits of the final octet are zero.
pub fn pack_septets(septets: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity((septets.len() * 7).div_ceil(8));
    let mut pending: u16 = 0;
    let mut pending_bits: u8 = 0;

    for &septet in septets {
        pending |= ((septet & 0x7F) as u16) << pending_bits;
        pending_bits += 7;

        while pending_bits >= 8 {
            packed.push((pending & 0xFF) as u8);
            pending >>= 8;
            pending_bits -= 8;
        }
    }

    if pending_bits > 0 {
        packed.push((pending & 0xFF) as u8);
    }

    packed
}

/// Unpacks `septet_count` septets from packed octets
///
/// The count is needed because seven fill bits in the last octet are
/// indistinguishable from a trailing `@`.
pub fn unpack_septets(packed: &[u8], septet_count: usize) -> Vec<u8> {
    let mut septets = Vec::with_capacity(septet_count);
    let mut pending: u16 = 0;
    let mut pending_bits: u8 = 0;

    for &octet in packed {
        if septets.len() == septet_count {
            break;
        }
        pending |= (octet as u16) << pending_bits;
        pending_bits += 8;

        while pending_bits >= 7 && septets.len() < septet_count {
            septets.push((pending & 0x7F) as u8);
            pending >>= 7;
            pending_bits -= 7;
        }
    }

    septets
}

/// Number of packed octets for a septet count
pub fn packed_len(septet_count: usize) -> usize {
    (septet_count * 7).div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_septets_default_table() {
        assert_eq!(to_septets("@A a").unwrap(), vec![0x00, 0x41, 0x20, 0x61]);
        assert_eq!(to_septets("£¥").unwrap(), vec![0x01, 0x03]);
    }

    #[test]
    fn test_to_septets_extension_table() {
        assert_eq!(to_septets("€").unwrap(), vec![ESCAPE, 0x65]);
        assert_eq!(to_septets("{x}").unwrap(), vec![ESCAPE, 0x28, 0x78, ESCAPE, 0x29]);
    }

    #[test]
    fn test_to_septets_rejects_unmapped() {
        assert_eq!(
            to_septets("ok 世"),
            Err(EncodingError::UnsupportedCharacter {
                character: '世',
                alphabet: Alphabet::Gsm7Bit
            })
        );
        assert!(to_septets("\u{1b}").is_err());
    }

    #[test]
    fn test_pack_hello() {
        // Classic 3GPP example: "hellohello"
        let septets = to_septets("hellohello").unwrap();
        assert_eq!(
            pack_septets(&septets),
            vec![0xE8, 0x32, 0x9B, 0xFD, 0x46, 0x97, 0xD9, 0xEC, 0x37]
        );
    }

    #[test]
    fn test_pack_zero_fills_last_octet() {
        // 'A' = 0x41 occupies bits 0-6, bit 7 is fill
        assert_eq!(pack_septets(&[0x41]), vec![0x41]);

        // Two septets use 14 bits; the top two bits of octet 2 are zero
        let packed = pack_septets(&[0x7F, 0x7F]);
        assert_eq!(packed, vec![0xFF, 0x3F]);
        assert_eq!(packed[1] & 0xC0, 0);

        // Seven septets of 0x7F leave exactly 7 fill bits
        let packed = pack_septets(&[0x7F; 7]);
        assert_eq!(packed.len(), 7);
        assert_eq!(packed[6], 0x01);
    }

    #[test]
    fn test_pack_eight_septets_fill_seven_octets() {
        let packed = pack_septets(&[0x7F; 8]);
        assert_eq!(packed, vec![0xFF; 7]);
    }

    #[test]
    fn test_unpack_respects_count() {
        let septets = to_septets("abcdefg").unwrap();
        let packed = pack_septets(&septets);
        assert_eq!(packed.len(), 7);
        // Fill bits would otherwise read as a trailing '@'
        assert_eq!(unpack_septets(&packed, 7), septets);
        assert_eq!(unpack_septets(&packed, 8).len(), 8);
    }

    #[test]
    fn test_round_trip_full_default_table() {
        let text: String = DEFAULT_ALPHABET
            .iter()
            .filter(|&&c| c != '\u{1b}')
            .chain(EXTENSION_TABLE.iter().map(|(_, c)| c))
            .collect();
        let septets = to_septets(&text).unwrap();
        let packed = pack_septets(&septets);
        assert_eq!(packed.len(), packed_len(septets.len()));
        let unpacked = unpack_septets(&packed, septets.len());
        assert_eq!(septets_to_string(&unpacked), text);
    }

    #[test]
    fn test_septets_to_string_bad_escape() {
        assert_eq!(septets_to_string(&[0x41, ESCAPE, 0x00]), "A ");
        assert_eq!(septets_to_string(&[0x41, ESCAPE]), "A ");
    }

    #[test]
    fn test_compatibility() {
        assert!(is_gsm7_compatible("Hello [world] €10"));
        assert!(!is_gsm7_compatible("naïve"));
    }
}
