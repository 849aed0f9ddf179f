// Alphabet codec - turns text into packed SMS user data
//
// Each alphabet implements the same Encodable/Decodable-style contract:
// text in, payload octets plus an alphabet-native unit count out. Unit
// counts are what handsets size their buffers by, so they are never the
// octet count for septets or UCS-2.

use crate::datatypes::Alphabet;
use crate::error::{EncodingError, EncodingResult};
use crate::gsm7;
use bytes::{BufMut, Bytes, BytesMut};

/// Text encoded in one alphabet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedText {
    alphabet: Alphabet,
    payload: Bytes,
    unit_count: usize,
    septets: Option<Vec<u8>>,
}

impl EncodedText {
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Packed payload of the whole text
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Alphabet-native units (septets, octets or UCS-2 code units)
    pub fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// Unpacked septet values, GSM 7-bit only
    pub fn septets(&self) -> Option<&[u8]> {
        self.septets.as_deref()
    }

    /// Packed payload for the unit range `start..start + len`
    ///
    /// Septet ranges are re-packed from the unpacked values so each slice
    /// starts on an octet boundary of its own.
    pub(crate) fn slice_units(&self, start: usize, len: usize) -> Bytes {
        match (&self.septets, self.alphabet) {
            (Some(septets), _) => Bytes::from(gsm7::pack_septets(&septets[start..start + len])),
            (None, Alphabet::Ucs2) => self.payload.slice(start * 2..(start + len) * 2),
            (None, _) => self.payload.slice(start..start + len),
        }
    }
}

/// Encoding contract shared by every alphabet
pub trait AlphabetCodec {
    /// Encodes text, failing on the first unrepresentable character
    fn encode(&self, text: &str) -> EncodingResult<EncodedText>;

    /// Decodes `unit_count` units of payload back to text
    fn decode(&self, payload: &[u8], unit_count: usize) -> EncodingResult<String>;
}

impl AlphabetCodec for Alphabet {
    fn encode(&self, text: &str) -> EncodingResult<EncodedText> {
        match self {
            Alphabet::Gsm7Bit => encode_gsm7(text),
            Alphabet::Binary8Bit => encode_latin1(text),
            Alphabet::Ucs2 => encode_ucs2(text),
        }
    }

    fn decode(&self, payload: &[u8], unit_count: usize) -> EncodingResult<String> {
        match self {
            Alphabet::Gsm7Bit => {
                let septets = gsm7::unpack_septets(payload, unit_count);
                Ok(gsm7::septets_to_string(&septets))
            }
            Alphabet::Binary8Bit => Ok(payload
                .iter()
                .take(unit_count)
                .map(|&octet| octet as char)
                .collect()),
            Alphabet::Ucs2 => {
                let units = payload
                    .chunks_exact(2)
                    .take(unit_count)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
                // Surrogates are not UCS-2; substitute rather than fail
                Ok(char::decode_utf16(units)
                    .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect())
            }
        }
    }
}

/// Encodes text in the given alphabet
pub fn encode(text: &str, alphabet: Alphabet) -> EncodingResult<EncodedText> {
    alphabet.encode(text)
}

/// Decodes a payload in the given alphabet
pub fn decode(payload: &[u8], unit_count: usize, alphabet: Alphabet) -> EncodingResult<String> {
    alphabet.decode(payload, unit_count)
}

/// Wraps raw octets as an 8-bit payload
pub fn encode_octets(data: impl Into<Bytes>) -> EncodedText {
    let payload = data.into();
    EncodedText {
        alphabet: Alphabet::Binary8Bit,
        unit_count: payload.len(),
        payload,
        septets: None,
    }
}

fn encode_gsm7(text: &str) -> EncodingResult<EncodedText> {
    let septets = gsm7::to_septets(text)?;
    Ok(EncodedText {
        alphabet: Alphabet::Gsm7Bit,
        payload: Bytes::from(gsm7::pack_septets(&septets)),
        unit_count: septets.len(),
        septets: Some(septets),
    })
}

fn encode_latin1(text: &str) -> EncodingResult<EncodedText> {
    let mut buf = BytesMut::with_capacity(text.len());
    for ch in text.chars() {
        let octet = u8::try_from(ch).map_err(|_| EncodingError::UnsupportedCharacter {
            character: ch,
            alphabet: Alphabet::Binary8Bit,
        })?;
        buf.put_u8(octet);
    }

    Ok(EncodedText {
        alphabet: Alphabet::Binary8Bit,
        unit_count: buf.len(),
        payload: buf.freeze(),
        septets: None,
    })
}

fn encode_ucs2(text: &str) -> EncodingResult<EncodedText> {
    let mut buf = BytesMut::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let unit = u16::try_from(ch as u32).map_err(|_| EncodingError::UnsupportedCharacter {
            character: ch,
            alphabet: Alphabet::Ucs2,
        })?;
        buf.put_u16(unit);
    }

    Ok(EncodedText {
        alphabet: Alphabet::Ucs2,
        unit_count: buf.len() / 2,
        payload: buf.freeze(),
        septets: None,
    })
}
