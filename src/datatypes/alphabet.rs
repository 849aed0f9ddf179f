// ABOUTME: SMS character alphabets with their packing width and per-segment capacities
// ABOUTME: Wire values match the alphabet bits (3-2) of a general data coding scheme

use crate::gsm7;
use num_enum::TryFromPrimitive;
use std::fmt;

/// Octets available for user data in one SMS, header included
pub const MAX_USER_DATA_OCTETS: usize = 140;

/// Alphabet used to encode the user data of a short message
///
/// The discriminant is the 2-bit alphabet field of the DCS; `0b11` is
/// reserved and has no variant.
#[derive(TryFromPrimitive)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alphabet {
    /// GSM 03.38 default alphabet, 7-bit septets packed across octets
    #[default]
    Gsm7Bit = 0b00,
    /// Raw 8-bit data (Latin-1 text or binary)
    Binary8Bit = 0b01,
    /// UCS-2, 16-bit big-endian code units
    Ucs2 = 0b10,
}

impl Alphabet {
    /// Bits per alphabet-native unit
    pub fn unit_bits(&self) -> usize {
        match self {
            Alphabet::Gsm7Bit => 7,
            Alphabet::Binary8Bit => 8,
            Alphabet::Ucs2 => 16,
        }
    }

    /// Units that fit in a segment without a user data header
    pub fn capacity(&self) -> usize {
        MAX_USER_DATA_OCTETS * 8 / self.unit_bits()
    }

    /// Units that fit in a segment carrying a header of `udh_octets` octets
    /// (length byte included)
    ///
    /// For septets the header is padded up to the next septet boundary.
    pub fn capacity_with_header(&self, udh_octets: usize) -> usize {
        let available_bits = MAX_USER_DATA_OCTETS * 8;
        let header_bits = match self {
            Alphabet::Gsm7Bit => (udh_octets * 8).div_ceil(7) * 7,
            _ => udh_octets * 8,
        };
        available_bits.saturating_sub(header_bits) / self.unit_bits()
    }

    /// Picks the narrowest alphabet able to carry `text`
    pub fn detect(text: &str) -> Alphabet {
        if gsm7::is_gsm7_compatible(text) {
            Alphabet::Gsm7Bit
        } else {
            Alphabet::Ucs2
        }
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            Alphabet::Gsm7Bit => "GSM 7-bit",
            Alphabet::Binary8Bit => "8-bit",
            Alphabet::Ucs2 => "UCS-2",
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
