// ABOUTME: Error types for text encoding, data coding and segmentation failures
// ABOUTME: Every failure is returned as a typed result, never as a partial or corrupt PDU

use crate::datatypes::Alphabet;
use thiserror::Error;

/// Error type for all encoding operations
///
/// `UnsupportedCharacter` is recoverable by choosing a wider alphabet,
/// `MessageTooLong` only by truncating the input. `InvalidSegmentIndex`
/// indicates a segmentation defect and should never reach a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Character cannot be represented in the requested alphabet
    #[error("Unsupported character {character:?} for {alphabet:?}")]
    UnsupportedCharacter { character: char, alphabet: Alphabet },

    /// Payload needs more segments than a concatenation header can number
    #[error("Message too long: needs {parts} segments, maximum is {max}")]
    MessageTooLong { parts: usize, max: usize },

    /// Concatenation header requested with an out-of-range part number
    #[error("Invalid segment index: part {part_number} of {total_parts}")]
    InvalidSegmentIndex { part_number: u8, total_parts: u8 },

    /// Segment list is empty, has gaps or does not cover the payload
    #[error("Invalid segmentation: {0}")]
    InvalidSegmentation(String),

    /// Octet is not a general data coding group DCS
    #[error("Invalid data coding scheme: {0:#04x}")]
    InvalidDataCoding(u8),

    /// Information element or header too long for its length byte
    #[error("Header too long: {length} octets, maximum is {max}")]
    HeaderTooLong { length: usize, max: usize },

    /// User data header octets could not be parsed
    #[error("Malformed user data header: {0}")]
    MalformedHeader(String),
}

/// Result type alias for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;
