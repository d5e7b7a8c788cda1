use smallvec::SmallVec;

use crate::checksum::compute_checksum;
use crate::error::EncodeError;
use crate::field::FIELD_SEPARATOR;
use crate::tag::{self, Tag};

/// Default inline capacity for the body buffer (bytes). Covers the body of
/// most FIX messages without spilling to the heap.
const DEFAULT_CAPACITY: usize = 512;

const BEGIN_STRING_VALUE: &[u8] = b"FIX.4.4";

const RESERVED_TAGS: [Tag; 8] = [
    tag::BEGIN_STRING,
    tag::BODY_LENGTH,
    tag::MSG_TYPE,
    tag::SENDER_COMP_ID,
    tag::TARGET_COMP_ID,
    tag::MSG_SEQ_NUM,
    tag::SENDING_TIME,
    tag::CHECK_SUM,
];

/// A source of the current time, in FIX `UTCTIMESTAMP` form
/// (`YYYYMMDD-HH:MM:SS.sss`).
///
/// Injected rather than a process-wide singleton, so tests can supply a
/// deterministic value.
pub trait Clock {
    fn now(&self) -> String;
}

/// The default [`Clock`]: the real wall clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        chrono::Utc::now().format("%Y%m%d-%H:%M:%S%.3f").to_string()
    }
}

/// A fixed [`Clock`] for tests: always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FrozenClock(pub String);

impl Clock for FrozenClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// The fields a caller supplies to build one outbound message.
///
/// `body_fields` are emitted in the order given; duplicate tags are
/// permitted and preserved, matching the FIX wire format itself.
pub struct EncodeParams<'a> {
    pub sender: &'a str,
    pub target: &'a str,
    pub msg_type: &'a str,
    pub seq_num: u64,
    /// Supplied explicitly, or filled from the encoder's clock when `None`.
    pub sending_time: Option<&'a str>,
    pub body_fields: &'a [(Tag, &'a [u8])],
}

/// A reusable FIX message encoder.
///
/// Owns a body buffer that is allocated once and reused across every
/// `build` call — zero allocation for the body assembly step on the hot
/// path after the first call.
///
/// # Example
/// ```ignore
/// let mut enc = Encoder::new();
/// let bytes = enc.build(&params)?;
/// ```
pub struct Encoder<C: Clock = SystemClock> {
    body: SmallVec<[u8; DEFAULT_CAPACITY]>,
    clock: C,
}

impl Default for Encoder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<SystemClock> {
    /// Create an encoder backed by the real wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> Encoder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            body: SmallVec::new(),
            clock,
        }
    }

    /// Build a complete, framed, checksummed FIX message, allocating a
    /// fresh `Vec` for the result.
    pub fn build(&mut self, params: &EncodeParams<'_>) -> Result<Vec<u8>, EncodeError> {
        if params.msg_type.is_empty() {
            return Err(EncodeError::MissingMsgType);
        }
        for &(tag, _) in params.body_fields {
            if RESERVED_TAGS.contains(&tag) {
                return Err(EncodeError::ReservedTagInBody { tag });
            }
        }

        let sending_time = match params.sending_time {
            Some(t) => t.to_string(),
            None => self.clock.now(),
        };

        // clear() keeps existing capacity — no allocator call on the hot path.
        self.body.clear();
        self.body.extend_from_slice(format!("35={}\x01", params.msg_type).as_bytes());
        self.body.extend_from_slice(format!("49={}\x01", params.sender).as_bytes());
        self.body.extend_from_slice(format!("56={}\x01", params.target).as_bytes());
        self.body.extend_from_slice(format!("34={}\x01", params.seq_num).as_bytes());
        self.body.extend_from_slice(format!("52={}\x01", sending_time).as_bytes());
        for &(tag, value) in params.body_fields {
            self.body.extend_from_slice(tag.to_string().as_bytes());
            self.body.push(b'=');
            self.body.extend_from_slice(value);
            self.body.push(FIELD_SEPARATOR);
        }

        let mut out = Vec::with_capacity(self.body.len() + 32);
        out.extend_from_slice(b"8=");
        out.extend_from_slice(BEGIN_STRING_VALUE);
        out.push(FIELD_SEPARATOR);

        out.extend_from_slice(b"9=");
        out.extend_from_slice(self.body.len().to_string().as_bytes());
        out.push(FIELD_SEPARATOR);

        out.extend_from_slice(&self.body);

        let checksum = compute_checksum(&out);
        out.extend_from_slice(b"10=");
        out.extend_from_slice(format!("{checksum:03}").as_bytes());
        out.push(FIELD_SEPARATOR);

        Ok(out)
    }

    /// Build into a caller-owned, fixed-size buffer instead of allocating.
    /// Returns the number of bytes written, or `BufferTooSmall` if `out` is
    /// not large enough to hold the encoded message.
    pub fn build_into(&mut self, params: &EncodeParams<'_>, out: &mut [u8]) -> Result<usize, EncodeError> {
        let encoded = self.build(params)?;
        if encoded.len() > out.len() {
            return Err(EncodeError::BufferTooSmall {
                needed: encoded.len(),
                available: out.len(),
            });
        }
        out[..encoded.len()].copy_from_slice(&encoded);
        Ok(encoded.len())
    }
}
