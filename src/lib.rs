pub mod codec;
pub mod datatypes;
pub mod error;
pub mod gsm7;
pub mod message;
pub mod pdu;
pub mod segment;


// Re-export the building blocks for transports that drive them directly
pub use codec::{AlphabetCodec, EncodedText};
pub use datatypes::{Alphabet, DataCodingScheme, InformationElement, MessageClass, UserDataHeader};
pub use pdu::{PduAssembler, SmsPdu};
pub use segment::{Segment, Segmenter};

// Re-export the main entry point for easy access
pub use message::{ConcatenatedMessage, Message, PduSource, SmsMessage, SmsMessageBuilder};

/// Error returned by every fallible operation in this crate.
pub use error::{EncodingError, EncodingResult};

/// A specialized `Result` type for encoding operations.
///
/// This is defined as a convenience.
///
/// # Examples
///
/// ## Encoding a short text
///
/// ```rust
/// use sms_codec::{Alphabet, MessageClass, PduSource, SmsMessage};
///
/// let message = SmsMessage::encode("Hello, World!", Alphabet::Gsm7Bit, MessageClass::None)?;
/// assert_eq!(message.pdus().len(), 1);
/// assert_eq!(message.pdus()[0].user_data_unit_count(), 13);
/// # Ok::<(), sms_codec::EncodingError>(())
/// ```
///
/// ## Splitting a long text
///
/// Each part carries a concatenation header with the same reference number.
/// A fixed reference makes the output reproducible for resends.
///
/// ```rust
/// use sms_codec::{Alphabet, PduSource, SmsMessage};
///
/// let message = SmsMessage::builder()
///     .text("a".repeat(200))
///     .alphabet(Alphabet::Gsm7Bit)
///     .reference(42)
///     .build()?;
///
/// for pdu in message.pdus() {
///     let (reference, total, _part) = pdu.udh().and_then(|udh| udh.concatenation_info()).unwrap();
///     assert_eq!((reference, total), (42, 2));
/// }
/// # Ok::<(), sms_codec::EncodingError>(())
/// ```
pub type Result<T> = EncodingResult<T>;
