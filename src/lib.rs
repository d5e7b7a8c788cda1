//! Zero-copy FIX 4.4 message decoding and encoding for the low-latency
//! front of a trading stack.
//!
//! The crate is five cooperating pieces: a static [`dictionary::Dictionary`]
//! of FIX 4.4 message types and field shapes, a lazily-decoding
//! [`field::FieldView`], an immutable [`message::Message`] addressed over a
//! caller-owned byte region, a [`decoder::Decoder`] that locates message
//! boundaries and scans fields without allocating, and an [`encoder::Encoder`]
//! that serializes a field set into a correctly framed and checksummed wire
//! message.
//!
//! Repeating groups, FIXT.1.1, and FIX versions other than 4.4 are out of
//! scope — see `DESIGN.md` for the full list of non-goals.

mod checksum;
pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod field;
pub mod message;
pub mod tag;

pub use decoder::{Decoder, DecoderOptions, Messages};
pub use dictionary::{Dictionary, FieldDef, MsgType, TypeClass};
pub use encoder::{Clock, EncodeParams, Encoder, FrozenClock, SystemClock};
pub use error::{DecodeError, EncodeError};
pub use field::FieldView;
pub use message::Message;
pub use tag::Tag;
