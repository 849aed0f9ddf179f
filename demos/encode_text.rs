// ABOUTME: Command-line demo that encodes a text and prints each PDU as hex
// ABOUTME: Shows alphabet selection, message class and concatenation headers

use argh::FromArgs;
use sms_codec::{Alphabet, MessageClass, PduSource, SmsMessage};
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Encode a text message into SMS PDUs
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// alphabet: gsm, 8bit, ucs2 or auto (default: auto)
    #[argh(option, short = 'a')]
    alphabet: Option<String>,

    /// message class 0-3 (default: none)
    #[argh(option, short = 'c')]
    class: Option<u8>,

    /// concatenation reference number (default: generated)
    #[argh(option, short = 'r')]
    reference: Option<u8>,

    /// the message text
    #[argh(positional)]
    message: String,
}

fn parse_class(class: Option<u8>) -> Result<MessageClass, Box<dyn Error>> {
    Ok(match class {
        None => MessageClass::None,
        Some(0) => MessageClass::Class0,
        Some(1) => MessageClass::Class1,
        Some(2) => MessageClass::Class2,
        Some(3) => MessageClass::Class3,
        Some(other) => return Err(format!("invalid message class: {other}").into()),
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let level = if cli_args.debugging {
        Level::TRACE
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut builder = SmsMessage::builder()
        .text(cli_args.message)
        .message_class(parse_class(cli_args.class)?);

    builder = match cli_args.alphabet.as_deref().unwrap_or("auto") {
        "gsm" => builder.alphabet(Alphabet::Gsm7Bit),
        "8bit" => builder.alphabet(Alphabet::Binary8Bit),
        "ucs2" => builder.alphabet(Alphabet::Ucs2),
        "auto" => builder.detect_alphabet(),
        other => return Err(format!("unknown alphabet: {other}").into()),
    };

    if let Some(reference) = cli_args.reference {
        builder = builder.reference(reference);
    }

    let message = builder.build()?;

    println!("DCS: 0x{:02X} ({})", message.dcs().to_byte(), message.dcs());
    for (index, pdu) in message.pdus().iter().enumerate() {
        println!(
            "PDU {}: units={} udh={} ud={}",
            index + 1,
            pdu.user_data_unit_count(),
            pdu.udh_hex().unwrap_or_else(|| "-".to_string()),
            pdu.user_data_hex()
        );
    }

    Ok(())
}
