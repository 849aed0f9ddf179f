// ABOUTME: Caller-facing entry point turning text into a single PDU or a concatenated PDU sequence
// ABOUTME: Exposes both variants to transports through the PduSource capability trait

use crate::codec::{self, AlphabetCodec, EncodedText};
use crate::datatypes::{Alphabet, DataCodingScheme, MessageClass};
use crate::error::EncodingResult;
use crate::pdu::{PduAssembler, SmsPdu};
use crate::segment::{Segment, Segmenter};
use bytes::Bytes;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::debug;

/// What transports need from an encoded message
pub trait PduSource {
    /// PDUs in transmission order
    fn pdus(&self) -> &[SmsPdu];

    /// Data coding scheme shared by every PDU
    fn dcs(&self) -> DataCodingScheme;
}

impl PduSource for SmsPdu {
    fn pdus(&self) -> &[SmsPdu] {
        std::slice::from_ref(self)
    }

    fn dcs(&self) -> DataCodingScheme {
        SmsPdu::dcs(self)
    }
}

/// Multipart message whose segments share one reference number
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConcatenatedMessage {
    dcs: DataCodingScheme,
    reference_number: u8,
    segments: Vec<SmsPdu>,
}

impl ConcatenatedMessage {
    pub fn reference_number(&self) -> u8 {
        self.reference_number
    }

    pub fn segments(&self) -> &[SmsPdu] {
        &self.segments
    }

    pub fn total_parts(&self) -> usize {
        self.segments.len()
    }
}

impl PduSource for ConcatenatedMessage {
    fn pdus(&self) -> &[SmsPdu] {
        &self.segments
    }

    fn dcs(&self) -> DataCodingScheme {
        self.dcs
    }
}

/// Encoded message, one PDU or several
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Single(SmsPdu),
    Concatenated(ConcatenatedMessage),
}

impl Message {
    pub fn is_concatenated(&self) -> bool {
        matches!(self, Message::Concatenated(_))
    }

    /// Returns true for class 0 messages, which transports flag as flash
    pub fn is_flash(&self) -> bool {
        self.dcs().message_class().is_flash()
    }

    /// Concatenation reference, `None` for single-part messages
    pub fn reference_number(&self) -> Option<u8> {
        match self {
            Message::Single(_) => None,
            Message::Concatenated(concat) => Some(concat.reference_number),
        }
    }
}

impl PduSource for Message {
    fn pdus(&self) -> &[SmsPdu] {
        match self {
            Message::Single(pdu) => pdu.pdus(),
            Message::Concatenated(concat) => concat.pdus(),
        }
    }

    fn dcs(&self) -> DataCodingScheme {
        match self {
            Message::Single(pdu) => pdu.dcs(),
            Message::Concatenated(concat) => concat.dcs,
        }
    }
}

/// Source of concatenation reference numbers
///
/// A wrapping process-wide counter. References are advisory framing
/// metadata, so wrap-around collisions after 256 messages are tolerated.
pub struct ReferenceSource;

static NEXT_REFERENCE: AtomicU8 = AtomicU8::new(0);

impl ReferenceSource {
    pub fn next() -> u8 {
        NEXT_REFERENCE.fetch_add(1, Ordering::Relaxed)
    }
}

/// Entry point for encoding text messages
///
/// Provides sensible defaults (GSM 7-bit, no class, no compression) and a
/// builder for the rest.
pub struct SmsMessage;

impl SmsMessage {
    /// Encodes `text` with a reference number from [`ReferenceSource`]
    pub fn encode(
        text: &str,
        alphabet: Alphabet,
        message_class: MessageClass,
    ) -> EncodingResult<Message> {
        Self::builder()
            .text(text)
            .alphabet(alphabet)
            .message_class(message_class)
            .build()
    }

    pub fn builder() -> SmsMessageBuilder {
        SmsMessageBuilder::new()
    }
}

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Octets(Bytes),
}

/// Builder for encoded messages
///
/// With an explicit reference number the output depends only on the
/// builder's inputs, so a transport can rebuild identical PDUs on resend.
#[derive(Debug, Clone)]
pub struct SmsMessageBuilder {
    content: Content,
    alphabet: Alphabet,
    message_class: MessageClass,
    compressed: bool,
    reference: Option<u8>,
}

impl SmsMessageBuilder {
    pub fn new() -> Self {
        Self {
            content: Content::Text(String::new()),
            alphabet: Alphabet::default(),
            message_class: MessageClass::None,
            compressed: false,
            reference: None,
        }
    }

    /// Set message text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// Set raw octets as the payload; forces the 8-bit alphabet
    pub fn octets(mut self, data: impl Into<Bytes>) -> Self {
        self.content = Content::Octets(data.into());
        self.alphabet = Alphabet::Binary8Bit;
        self
    }

    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Choose GSM 7-bit when the text allows it, UCS-2 otherwise
    pub fn detect_alphabet(mut self) -> Self {
        if let Content::Text(text) = &self.content {
            self.alphabet = Alphabet::detect(text);
        }
        self
    }

    pub fn message_class(mut self, message_class: MessageClass) -> Self {
        self.message_class = message_class;
        self
    }

    /// Mark the payload as compressed in the DCS
    ///
    /// The payload is not compressed here; the caller supplies compressed data.
    pub fn compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Use a fixed concatenation reference number
    pub fn reference(mut self, reference: u8) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn build(self) -> EncodingResult<Message> {
        let encoded = match &self.content {
            Content::Text(text) => self.alphabet.encode(text)?,
            Content::Octets(data) => codec::encode_octets(data.clone()),
        };
        let alphabet = encoded.alphabet();
        let dcs = DataCodingScheme::build(alphabet, self.message_class, self.compressed);
        let segments = segment(&encoded)?;

        if segments.len() == 1 {
            let mut pdus = PduAssembler::assemble(&encoded, &segments, dcs, 0)?;
            return Ok(Message::Single(pdus.remove(0)));
        }

        let reference_number = self.reference.unwrap_or_else(ReferenceSource::next);
        debug!(
            "Encoded {} message as {} parts with reference {}",
            alphabet,
            segments.len(),
            reference_number
        );

        Ok(Message::Concatenated(ConcatenatedMessage {
            dcs,
            reference_number,
            segments: PduAssembler::assemble(&encoded, &segments, dcs, reference_number)?,
        }))
    }
}

impl Default for SmsMessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn segment(encoded: &EncodedText) -> EncodingResult<Vec<Segment>> {
    match encoded.septets() {
        Some(septets) => Segmenter::segment_septets(septets),
        None => Segmenter::segment(encoded.unit_count(), encoded.alphabet(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single() {
        let message = SmsMessage::encode("Hello", Alphabet::Gsm7Bit, MessageClass::None).unwrap();
        assert!(!message.is_concatenated());
        assert_eq!(message.reference_number(), None);
        assert_eq!(message.pdus().len(), 1);
        assert_eq!(message.dcs().to_byte(), 0x00);
    }

    #[test]
    fn test_long_text_is_concatenated() {
        let message = SmsMessage::builder()
            .text("y".repeat(400))
            .reference(0x10)
            .build()
            .unwrap();

        let Message::Concatenated(concat) = &message else {
            panic!("expected concatenated message");
        };
        assert_eq!(concat.reference_number(), 0x10);
        assert_eq!(concat.total_parts(), 3);
        assert_eq!(message.reference_number(), Some(0x10));
    }

    #[test]
    fn test_flash_message() {
        let message = SmsMessage::encode("Alert", Alphabet::Ucs2, MessageClass::Class0).unwrap();
        assert!(message.is_flash());
        assert_eq!(message.dcs().to_byte(), 0x18);
    }

    #[test]
    fn test_octets_force_binary() {
        let message = SmsMessage::builder()
            .alphabet(Alphabet::Ucs2)
            .octets(vec![0x01, 0x02, 0x03])
            .build()
            .unwrap();
        assert_eq!(message.dcs().alphabet(), Alphabet::Binary8Bit);
        assert_eq!(message.pdus()[0].user_data_unit_count(), 3);
    }

    #[test]
    fn test_detect_alphabet() {
        let message = SmsMessage::builder()
            .text("Ελλάδα")
            .detect_alphabet()
            .build()
            .unwrap();
        assert_eq!(message.dcs().alphabet(), Alphabet::Ucs2);
    }

    #[test]
    fn test_reference_source_advances() {
        let first = ReferenceSource::next();
        let second = ReferenceSource::next();
        assert_ne!(first, second);
    }

    #[test]
    fn test_single_pdu_as_source() {
        let message = SmsMessage::encode("Hi", Alphabet::Binary8Bit, MessageClass::None).unwrap();
        let Message::Single(pdu) = message else {
            panic!("expected single message");
        };
        assert_eq!(pdu.pdus().len(), 1);
        assert_eq!(PduSource::dcs(&pdu).to_byte(), 0x04);
    }
}
