// ABOUTME: SMS message class carried in the low bits of the data coding scheme
// ABOUTME: Orthogonal to the alphabet, it tells the handset where to store the message

/// Message class for SMS delivery
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum MessageClass {
    /// No class, class bits cleared
    #[default]
    None,
    /// Flash SMS (displayed immediately, not stored)
    Class0,
    /// Mobile Equipment specific
    Class1,
    /// SIM specific (stored on SIM card)
    Class2,
    /// Terminal Equipment specific
    Class3,
}

impl MessageClass {
    /// DCS class bits, `None` when no class is present
    pub fn to_bits(&self) -> Option<u8> {
        match self {
            MessageClass::None => None,
            MessageClass::Class0 => Some(0b00),
            MessageClass::Class1 => Some(0b01),
            MessageClass::Class2 => Some(0b10),
            MessageClass::Class3 => Some(0b11),
        }
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => MessageClass::Class0,
            0b01 => MessageClass::Class1,
            0b10 => MessageClass::Class2,
            _ => MessageClass::Class3,
        }
    }

    /// Returns true for class 0 ("flash") messages
    pub fn is_flash(&self) -> bool {
        matches!(self, MessageClass::Class0)
    }

    /// Returns a human-readable description of the message class
    pub fn description(&self) -> &'static str {
        match self {
            MessageClass::None => "No message class",
            MessageClass::Class0 => "Flash SMS (immediate display)",
            MessageClass::Class1 => "Mobile Equipment specific",
            MessageClass::Class2 => "SIM card storage",
            MessageClass::Class3 => "Terminal Equipment specific",
        }
    }
}
