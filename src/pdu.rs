// ABOUTME: Immutable SMS PDU records and the assembler that builds them from segments
// ABOUTME: Attaches one shared DCS to every part and a concatenation UDH when there are several

use crate::codec::EncodedText;
use crate::datatypes::{Alphabet, DataCodingScheme, UserDataHeader};
use crate::error::{EncodingError, EncodingResult};
use crate::segment::Segment;
use bytes::Bytes;
use tracing::trace;

/// One transmittable SMS payload plus its metadata
///
/// `user_data` is the packed payload alone. Transports prepend the
/// serialized header themselves, per their own framing.
///
/// GSM 7-bit payloads are packed from bit 0 of their first octet. A
/// transport that sends header and payload in one user data field must
/// insert [`SmsPdu::udh_fill_bits`] zero bits between them so the first
/// septet starts on a septet boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmsPdu {
    dcs: DataCodingScheme,
    udh: Option<UserDataHeader>,
    user_data: Bytes,
    user_data_unit_count: usize,
}

impl SmsPdu {
    pub fn new(
        dcs: DataCodingScheme,
        udh: Option<UserDataHeader>,
        user_data: Bytes,
        user_data_unit_count: usize,
    ) -> Self {
        Self {
            dcs,
            udh,
            user_data,
            user_data_unit_count,
        }
    }

    pub fn dcs(&self) -> DataCodingScheme {
        self.dcs
    }

    pub fn udh(&self) -> Option<&UserDataHeader> {
        self.udh.as_ref()
    }

    /// Serialized header, ready to prepend to the payload
    pub fn udh_bytes(&self) -> Option<Bytes> {
        self.udh.as_ref().map(UserDataHeader::to_bytes)
    }

    pub fn has_udh(&self) -> bool {
        self.udh.is_some()
    }

    pub fn user_data(&self) -> &Bytes {
        &self.user_data
    }

    /// Payload length in alphabet-native units
    pub fn user_data_unit_count(&self) -> usize {
        self.user_data_unit_count
    }

    /// Fill bits between the header and a GSM 7-bit payload
    ///
    /// Zero for other alphabets and for PDUs without a header.
    pub fn udh_fill_bits(&self) -> usize {
        match (&self.udh, self.dcs.alphabet()) {
            (Some(udh), Alphabet::Gsm7Bit) => udh.septet_len() * 7 - udh.encoded_len() * 8,
            _ => 0,
        }
    }

    /// Upper-case hex rendering of the payload
    pub fn user_data_hex(&self) -> String {
        hex::encode_upper(&self.user_data)
    }

    /// Upper-case hex rendering of the serialized header
    pub fn udh_hex(&self) -> Option<String> {
        self.udh_bytes().map(hex::encode_upper)
    }
}

/// Builds the ordered PDU list of one message
pub struct PduAssembler;

impl PduAssembler {
    /// Assembles one PDU per segment
    ///
    /// Every PDU shares `dcs`. With more than one segment each PDU gets a
    /// concatenation header numbered from 1 under the shared `reference`.
    ///
    /// `segments` must be non-empty, start at unit 0, be contiguous and end
    /// at `encoded.unit_count()`.
    pub fn assemble(
        encoded: &EncodedText,
        segments: &[Segment],
        dcs: DataCodingScheme,
        reference: u8,
    ) -> EncodingResult<Vec<SmsPdu>> {
        validate_segments(segments, encoded.unit_count())?;

        let total_parts =
            u8::try_from(segments.len()).map_err(|_| EncodingError::MessageTooLong {
                parts: segments.len(),
                max: u8::MAX as usize,
            })?;

        segments
            .iter()
            .zip(1..=total_parts)
            .map(|(segment, part_number)| -> EncodingResult<SmsPdu> {
                let udh = if total_parts > 1 {
                    Some(UserDataHeader::concatenation(
                        reference,
                        total_parts,
                        part_number,
                    )?)
                } else {
                    None
                };

                trace!(
                    "Assembled part {}/{} ({} units from {})",
                    part_number, total_parts, segment.length, segment.start
                );

                Ok(SmsPdu::new(
                    dcs,
                    udh,
                    encoded.slice_units(segment.start, segment.length),
                    segment.length,
                ))
            })
            .collect()
    }
}

fn validate_segments(segments: &[Segment], unit_count: usize) -> EncodingResult<()> {
    if segments.is_empty() {
        return Err(EncodingError::InvalidSegmentation("no segments".to_string()));
    }

    let mut expected_start = 0;
    for segment in segments {
        if segment.start != expected_start {
            return Err(EncodingError::InvalidSegmentation(format!(
                "segment starts at unit {}, expected {}",
                segment.start, expected_start
            )));
        }
        expected_start = segment.end();
    }

    if expected_start != unit_count {
        return Err(EncodingError::InvalidSegmentation(format!(
            "segments end at unit {expected_start}, payload has {unit_count}"
        )));
    }
    Ok(())
}
