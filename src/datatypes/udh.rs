// ABOUTME: User data header made of information elements, including the 8-bit concatenation element
// ABOUTME: Serializes as [total_length][id][len][data]... ready to prepend to a segment payload

use super::MAX_USER_DATA_OCTETS;
use crate::error::{EncodingError, EncodingResult};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Information element identifier of the 8-bit reference concatenation element
pub const IEI_CONCATENATION: u8 = 0x00;

/// Octets of a concatenation-only header, its length byte included
pub const CONCATENATION_UDH_LEN: usize = 6;

/// Highest part count an 8-bit concatenation element can express
pub const MAX_PARTS: usize = 255;

/// Longest element data a length byte can describe inside a header
pub const MAX_ELEMENT_DATA_LEN: usize = 253;

/// Longest header body (length byte excluded) that fits one PDU's user data
pub const MAX_HEADER_LENGTH: usize = MAX_USER_DATA_OCTETS - 1;

/// Generic user data header payload unit
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InformationElement {
    id: u8,
    data: Bytes,
}

impl InformationElement {
    /// Creates an element, rejecting data its length byte cannot describe
    pub fn new(id: u8, data: impl Into<Bytes>) -> EncodingResult<Self> {
        let data = data.into();
        if data.len() > MAX_ELEMENT_DATA_LEN {
            return Err(EncodingError::HeaderTooLong {
                length: data.len(),
                max: MAX_ELEMENT_DATA_LEN,
            });
        }
        Ok(Self { id, data })
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Octets this element occupies: id, length byte and data
    pub fn encoded_len(&self) -> usize {
        2 + self.data.len()
    }
}

/// Ordered sequence of information elements
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct UserDataHeader {
    elements: Vec<InformationElement>,
}

impl UserDataHeader {
    /// Creates a header, rejecting one too long for a single PDU
    pub fn new(elements: Vec<InformationElement>) -> EncodingResult<Self> {
        let header = Self { elements };
        if header.header_length() > MAX_HEADER_LENGTH {
            return Err(EncodingError::HeaderTooLong {
                length: header.header_length(),
                max: MAX_HEADER_LENGTH,
            });
        }
        Ok(header)
    }

    /// Builds the header for one part of a concatenated message
    ///
    /// Requires `1 <= part_number <= total_parts`. A violation means the
    /// segmenter produced a bad index, not that the caller's input was wrong.
    pub fn concatenation(
        reference: u8,
        total_parts: u8,
        part_number: u8,
    ) -> EncodingResult<Self> {
        if part_number == 0 || part_number > total_parts {
            return Err(EncodingError::InvalidSegmentIndex {
                part_number,
                total_parts,
            });
        }

        Self::new(vec![InformationElement::new(
            IEI_CONCATENATION,
            vec![reference, total_parts, part_number],
        )?])
    }

    pub fn elements(&self) -> &[InformationElement] {
        &self.elements
    }

    /// Value of the leading length byte
    pub fn header_length(&self) -> usize {
        self.elements.iter().map(InformationElement::encoded_len).sum()
    }

    /// Serialized size, length byte included
    pub fn encoded_len(&self) -> usize {
        1 + self.header_length()
    }

    /// Serialized size in septets once padded to a septet boundary
    pub fn septet_len(&self) -> usize {
        (self.encoded_len() * 8).div_ceil(7)
    }

    /// Returns `(reference, total_parts, part_number)` of the concatenation element
    pub fn concatenation_info(&self) -> Option<(u8, u8, u8)> {
        self.elements
            .iter()
            .find(|ie| ie.id == IEI_CONCATENATION && ie.data.len() == 3)
            .map(|ie| (ie.data[0], ie.data[1], ie.data[2]))
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        // Both lengths are bounded by the constructors
        buf.put_u8(self.header_length() as u8);
        for ie in &self.elements {
            buf.put_u8(ie.id);
            buf.put_u8(ie.data.len() as u8);
            buf.put_slice(&ie.data);
        }
    }

    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parses a serialized header, length byte included
    pub fn from_bytes(data: &[u8]) -> EncodingResult<Self> {
        let mut buf = data;
        if !buf.has_remaining() {
            return Err(EncodingError::MalformedHeader("empty header".to_string()));
        }

        let header_length = buf.get_u8() as usize;
        if buf.remaining() < header_length {
            return Err(EncodingError::MalformedHeader(format!(
                "length byte says {header_length} octets, {} available",
                buf.remaining()
            )));
        }

        let mut body = &buf[..header_length];
        let mut elements = Vec::new();
        while body.has_remaining() {
            if body.remaining() < 2 {
                return Err(EncodingError::MalformedHeader(
                    "truncated information element".to_string(),
                ));
            }
            let id = body.get_u8();
            let len = body.get_u8() as usize;
            if body.remaining() < len {
                return Err(EncodingError::MalformedHeader(format!(
                    "element {id:#04x} claims {len} octets, {} available",
                    body.remaining()
                )));
            }
            elements.push(InformationElement::new(id, body.copy_to_bytes(len))?);
        }

        Self::new(elements)
    }
}
