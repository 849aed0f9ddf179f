mod alphabet;
mod data_coding;
mod message_class;
mod udh;

pub use alphabet::{Alphabet, MAX_USER_DATA_OCTETS};
pub use data_coding::DataCodingScheme;
pub use message_class::MessageClass;
pub use udh::{
    CONCATENATION_UDH_LEN, IEI_CONCATENATION, InformationElement, MAX_PARTS, UserDataHeader,
};
