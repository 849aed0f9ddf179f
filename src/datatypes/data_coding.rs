// ABOUTME: Single-octet data coding scheme built from alphabet, message class and compression flag
// ABOUTME: Uses the GSM 03.38 general data coding group so the same triple always yields the same octet

use super::{Alphabet, MessageClass};
use crate::error::{EncodingError, EncodingResult};
use std::fmt;

const GROUP_MASK: u8 = 0b1100_0000;
const COMPRESSED_BIT: u8 = 0b0010_0000;
const CLASS_PRESENT_BIT: u8 = 0b0001_0000;
const ALPHABET_SHIFT: u8 = 2;

/// Data coding scheme of a short message
///
/// Bit layout (general data coding group):
///
/// | 7-6 | 5 | 4 | 3-2 | 1-0 |
/// |-----|---|---|-----|-----|
/// | `00` | compressed | class present | alphabet | class |
///
/// Only [`DataCodingScheme::build`] and [`DataCodingScheme::from_byte`]
/// create values, so the octet always agrees with its parts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataCodingScheme {
    alphabet: Alphabet,
    message_class: MessageClass,
    compressed: bool,
}

impl DataCodingScheme {
    /// Composes the scheme for an alphabet, optional class and compression flag
    pub fn build(alphabet: Alphabet, message_class: MessageClass, compressed: bool) -> Self {
        Self {
            alphabet,
            message_class,
            compressed,
        }
    }

    /// Uncompressed scheme without message class
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        Self::build(alphabet, MessageClass::None, false)
    }

    /// Decodes a general data coding group octet
    pub fn from_byte(value: u8) -> EncodingResult<Self> {
        if value & GROUP_MASK != 0 {
            return Err(EncodingError::InvalidDataCoding(value));
        }

        let alphabet = Alphabet::try_from((value >> ALPHABET_SHIFT) & 0x03)
            .map_err(|_| EncodingError::InvalidDataCoding(value))?;

        let message_class = if value & CLASS_PRESENT_BIT != 0 {
            MessageClass::from_bits(value)
        } else {
            MessageClass::None
        };

        Ok(Self {
            alphabet,
            message_class,
            compressed: value & COMPRESSED_BIT != 0,
        })
    }

    /// Returns the raw octet for the wire
    pub fn to_byte(&self) -> u8 {
        let mut value = (self.alphabet as u8) << ALPHABET_SHIFT;
        if self.compressed {
            value |= COMPRESSED_BIT;
        }
        if let Some(class_bits) = self.message_class.to_bits() {
            value |= CLASS_PRESENT_BIT | class_bits;
        }
        value
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn message_class(&self) -> MessageClass {
        self.message_class
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Returns true if the class-present bit is set
    pub fn has_message_class(&self) -> bool {
        self.message_class != MessageClass::None
    }
}

impl Default for DataCodingScheme {
    fn default() -> Self {
        Self::for_alphabet(Alphabet::Gsm7Bit)
    }
}

impl fmt::Display for DataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alphabet)?;
        if self.has_message_class() {
            write!(f, " ({})", self.message_class.description())?;
        }
        if self.compressed {
            write!(f, " compressed")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DataCodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataCodingScheme({:?}, {:?}, compressed={}) (0x{:02X})",
            self.alphabet,
            self.message_class,
            self.compressed,
            self.to_byte()
        )
    }
}

impl From<DataCodingScheme> for u8 {
    fn from(dcs: DataCodingScheme) -> Self {
        dcs.to_byte()
    }
}

impl TryFrom<u8> for DataCodingScheme {
    type Error = EncodingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabets() {
        assert_eq!(DataCodingScheme::for_alphabet(Alphabet::Gsm7Bit).to_byte(), 0x00);
        assert_eq!(DataCodingScheme::for_alphabet(Alphabet::Binary8Bit).to_byte(), 0x04);
        assert_eq!(DataCodingScheme::for_alphabet(Alphabet::Ucs2).to_byte(), 0x08);
    }

    #[test]
    fn test_flash_gsm_is_stable() {
        let first = DataCodingScheme::build(Alphabet::Gsm7Bit, MessageClass::Class0, false);
        for _ in 0..10 {
            let again = DataCodingScheme::build(Alphabet::Gsm7Bit, MessageClass::Class0, false);
            assert_eq!(again.to_byte(), first.to_byte());
        }
        assert_eq!(first.to_byte(), 0x10);
    }

    #[test]
    fn test_class_bits() {
        let dcs = DataCodingScheme::build(Alphabet::Ucs2, MessageClass::Class2, false);
        assert_eq!(dcs.to_byte(), 0x1A);

        let dcs = DataCodingScheme::build(Alphabet::Binary8Bit, MessageClass::Class1, false);
        assert_eq!(dcs.to_byte(), 0x15);
    }

    #[test]
    fn test_no_class_clears_flag() {
        let dcs = DataCodingScheme::build(Alphabet::Ucs2, MessageClass::None, false);
        assert_eq!(dcs.to_byte() & CLASS_PRESENT_BIT, 0);
        assert_eq!(dcs.to_byte() & 0x03, 0);
        assert!(!dcs.has_message_class());
    }

    #[test]
    fn test_compressed_flag() {
        let dcs = DataCodingScheme::build(Alphabet::Gsm7Bit, MessageClass::Class3, true);
        assert_eq!(dcs.to_byte(), 0x33);
        assert!(dcs.is_compressed());
    }

    #[test]
    fn test_from_byte() {
        let dcs = DataCodingScheme::from_byte(0x18).unwrap();
        assert_eq!(dcs.alphabet(), Alphabet::Ucs2);
        assert_eq!(dcs.message_class(), MessageClass::Class0);
        assert!(!dcs.is_compressed());

        let dcs = DataCodingScheme::from_byte(0x04).unwrap();
        assert_eq!(dcs.alphabet(), Alphabet::Binary8Bit);
        assert_eq!(dcs.message_class(), MessageClass::None);
    }

    #[test]
    fn test_from_byte_rejects_other_groups() {
        assert_eq!(
            DataCodingScheme::from_byte(0xF0),
            Err(EncodingError::InvalidDataCoding(0xF0))
        );
        assert_eq!(
            DataCodingScheme::from_byte(0x0C),
            Err(EncodingError::InvalidDataCoding(0x0C))
        );
    }

    #[test]
    fn test_u8_conversions() {
        let dcs = DataCodingScheme::build(Alphabet::Ucs2, MessageClass::Class1, false);
        let byte_val: u8 = dcs.into();
        assert_eq!(DataCodingScheme::try_from(byte_val).unwrap(), dcs);
    }

    #[test]
    fn test_display() {
        let dcs = DataCodingScheme::build(Alphabet::Gsm7Bit, MessageClass::Class0, false);
        assert_eq!(format!("{dcs}"), "GSM 7-bit (Flash SMS (immediate display))");
        assert_eq!(format!("{}", DataCodingScheme::for_alphabet(Alphabet::Ucs2)), "UCS-2");
    }
}
