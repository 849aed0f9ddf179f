// ABOUTME: Splits an encoded payload into ordered, contiguous segments sized for one SMS each
// ABOUTME: Single segments carry no header; multipart segments reserve room for the concatenation UDH

use crate::datatypes::{Alphabet, CONCATENATION_UDH_LEN, MAX_PARTS};
use crate::error::{EncodingError, EncodingResult};
use crate::gsm7::ESCAPE;
use tracing::{debug, warn};

/// Contiguous range of alphabet-native units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub length: usize,
}

impl Segment {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Divides payloads into segments
pub struct Segmenter;

impl Segmenter {
    /// Units per segment, with or without a concatenation header
    pub fn capacity(alphabet: Alphabet, has_udh: bool) -> usize {
        if has_udh {
            alphabet.capacity_with_header(CONCATENATION_UDH_LEN)
        } else {
            alphabet.capacity()
        }
    }

    /// Segments `unit_count` units of `alphabet`
    ///
    /// A payload that fits one SMS becomes one segment, an empty payload
    /// included. Longer payloads are cut at the with-header capacity.
    ///
    /// `has_udh` means every segment will carry a header regardless of the
    /// part count, so the with-header capacity applies from the first unit.
    pub fn segment(
        unit_count: usize,
        alphabet: Alphabet,
        has_udh: bool,
    ) -> EncodingResult<Vec<Segment>> {
        if unit_count <= Self::capacity(alphabet, has_udh) {
            return Ok(vec![Segment {
                start: 0,
                length: unit_count,
            }]);
        }

        let capacity = Self::capacity(alphabet, true);
        check_part_count(unit_count.div_ceil(capacity))?;

        let segments: Vec<Segment> = (0..unit_count)
            .step_by(capacity)
            .map(|start| Segment {
                start,
                length: capacity.min(unit_count - start),
            })
            .collect();

        debug!(
            "Segmented {} {} units into {} parts",
            unit_count,
            alphabet,
            segments.len()
        );
        Ok(segments)
    }

    /// Segments GSM septets without splitting an escape from its code
    ///
    /// A cut that would leave an escape at the end of a segment moves back
    /// by one septet, so the pair travels in the next segment.
    pub fn segment_septets(septets: &[u8]) -> EncodingResult<Vec<Segment>> {
        let unit_count = septets.len();
        if unit_count <= Self::capacity(Alphabet::Gsm7Bit, false) {
            return Self::segment(unit_count, Alphabet::Gsm7Bit, false);
        }

        let escape_leads = escape_leads(septets);
        let capacity = Self::capacity(Alphabet::Gsm7Bit, true);
        let mut segments = Vec::new();
        let mut start = 0;

        while start < unit_count {
            let mut end = (start + capacity).min(unit_count);
            if end < unit_count && escape_leads[end - 1] {
                warn!("Moving segment boundary at septet {} to keep escape pair", end);
                end -= 1;
            }
            segments.push(Segment {
                start,
                length: end - start,
            });
            check_part_count(segments.len())?;
            start = end;
        }

        debug!(
            "Segmented {} septets into {} parts",
            unit_count,
            segments.len()
        );
        Ok(segments)
    }
}

fn check_part_count(parts: usize) -> EncodingResult<()> {
    if parts > MAX_PARTS {
        return Err(EncodingError::MessageTooLong {
            parts,
            max: MAX_PARTS,
        });
    }
    Ok(())
}

/// Marks septets that open an extension pair
fn escape_leads(septets: &[u8]) -> Vec<bool> {
    let mut leads = vec![false; septets.len()];
    let mut i = 0;
    while i < septets.len() {
        if septets[i] == ESCAPE {
            leads[i] = true;
            i += 2;
        } else {
            i += 1;
        }
    }
    leads
}
