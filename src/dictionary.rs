//! Static FIX 4.4 message-type and field tables.
//!
//! The dictionary is process-lifetime and immutable: there is exactly one
//! shape of it (this profile only ever describes FIX.4.4), so it is modeled
//! as a zero-sized, `Copy` type whose methods are plain match expressions —
//! no `HashMap`/`phf` lookup table.

use crate::tag::{self, Tag};

/// The broad value-shape a field's bytes must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Non-empty string, any bytes.
    Text,
    /// Exactly one byte.
    Char,
    /// Signed base-10 integer.
    Int,
    /// Fixed-point decimal (FIX `QTY`-shaped fields).
    Qty,
    /// Non-negative integer.
    Length,
    /// Positive integer.
    SeqNum,
    /// `YYYYMMDD-HH:MM:SS[.sss]`.
    UtcTimestamp,
}

/// Does `s` match `YYYYMMDD-HH:MM:SS` with an optional `.sss` suffix?
fn is_utc_timestamp(s: &str) -> bool {
    let b = s.as_bytes();
    let digits = |r: std::ops::Range<usize>| r.end <= b.len() && b[r].iter().all(u8::is_ascii_digit);

    let base_shape = b.len() == 17
        && digits(0..8)
        && b[8] == b'-'
        && digits(9..11)
        && b[11] == b':'
        && digits(12..14)
        && b[14] == b':'
        && digits(15..17);
    if !base_shape {
        return false;
    }
    b.len() == 17 || (b.len() == 21 && b[17] == b'.' && digits(18..21))
}

/// A field's expected shape, for dictionary-driven value validation.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub tag: Tag,
    pub class: TypeClass,
}

impl FieldDef {
    /// Does `value` satisfy this field's declared type class?
    pub fn validate(&self, value: &[u8]) -> bool {
        if value.is_empty() {
            return false;
        }
        match self.class {
            TypeClass::Text => true,
            TypeClass::Char => value.len() == 1,
            TypeClass::Int => std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .is_some(),
            TypeClass::Qty => std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.parse::<rust_decimal::Decimal>().ok())
                .is_some(),
            TypeClass::Length => std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .is_some_and(|n| n >= 0),
            TypeClass::SeqNum => std::str::from_utf8(value)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .is_some_and(|n| n > 0),
            TypeClass::UtcTimestamp => std::str::from_utf8(value).is_ok_and(is_utc_timestamp),
        }
    }
}

/// The FIX.4.4 message types this dictionary recognizes.
///
/// Only a subset carry additional-required-tag behavior beyond the shared
/// header/trailer fields; the rest are recognized (accepted by
/// [`Dictionary::is_valid_msg_type`]) but require nothing extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    Heartbeat,
    TestRequest,
    ResendRequest,
    Reject,
    SequenceReset,
    Logout,
    Logon,
    NewOrderSingle,
    NewOrderList,
    OrderCancelRequest,
    OrderCancelReplaceRequest,
    OrderStatusRequest,
    ExecutionReport,
    OrderCancelReject,
    MarketDataRequest,
    MarketDataSnapshotFullRefresh,
    MarketDataIncrementalRefresh,
    MarketDataRequestReject,
    News,
    Email,
    IndicationOfInterest,
    Advertisement,
    AllocationInstruction,
    ListCancelRequest,
    ListExecute,
    ListStatusRequest,
    ListStatus,
    ListStrikePrice,
    DontKnowTrade,
    QuoteRequest,
    Quote,
    SettlementInstructions,
    QuoteResponse,
    QuoteCancel,
    QuoteStatusRequest,
}

impl MsgType {
    /// The raw tag-35 value this message type is encoded/decoded as.
    pub fn wire_value(&self) -> &'static str {
        match self {
            MsgType::Heartbeat => "0",
            MsgType::TestRequest => "1",
            MsgType::ResendRequest => "2",
            MsgType::Reject => "3",
            MsgType::SequenceReset => "4",
            MsgType::Logout => "5",
            MsgType::IndicationOfInterest => "6",
            MsgType::Advertisement => "7",
            MsgType::ExecutionReport => "8",
            MsgType::OrderCancelReject => "9",
            MsgType::Logon => "A",
            MsgType::News => "B",
            MsgType::Email => "C",
            MsgType::NewOrderSingle => "D",
            MsgType::NewOrderList => "E",
            MsgType::OrderCancelRequest => "F",
            MsgType::OrderCancelReplaceRequest => "G",
            MsgType::OrderStatusRequest => "H",
            MsgType::QuoteStatusRequest => "I",
            MsgType::AllocationInstruction => "J",
            MsgType::ListCancelRequest => "K",
            MsgType::ListExecute => "L",
            MsgType::ListStatusRequest => "M",
            MsgType::ListStatus => "N",
            MsgType::ListStrikePrice => "P",
            MsgType::DontKnowTrade => "Q",
            MsgType::QuoteRequest => "R",
            MsgType::Quote => "S",
            MsgType::SettlementInstructions => "T",
            MsgType::QuoteResponse => "U",
            MsgType::MarketDataRequest => "V",
            MsgType::MarketDataSnapshotFullRefresh => "W",
            MsgType::MarketDataIncrementalRefresh => "X",
            MsgType::MarketDataRequestReject => "Y",
            MsgType::QuoteCancel => "Z",
        }
    }

    fn from_wire_value(value: &str) -> Option<MsgType> {
        Some(match value {
            "0" => MsgType::Heartbeat,
            "1" => MsgType::TestRequest,
            "2" => MsgType::ResendRequest,
            "3" => MsgType::Reject,
            "4" => MsgType::SequenceReset,
            "5" => MsgType::Logout,
            "6" => MsgType::IndicationOfInterest,
            "7" => MsgType::Advertisement,
            "8" => MsgType::ExecutionReport,
            "9" => MsgType::OrderCancelReject,
            "A" => MsgType::Logon,
            "B" => MsgType::News,
            "C" => MsgType::Email,
            "D" => MsgType::NewOrderSingle,
            "E" => MsgType::NewOrderList,
            "F" => MsgType::OrderCancelRequest,
            "G" => MsgType::OrderCancelReplaceRequest,
            "H" => MsgType::OrderStatusRequest,
            "I" => MsgType::QuoteStatusRequest,
            "J" => MsgType::AllocationInstruction,
            "K" => MsgType::ListCancelRequest,
            "L" => MsgType::ListExecute,
            "M" => MsgType::ListStatusRequest,
            "N" => MsgType::ListStatus,
            "P" => MsgType::ListStrikePrice,
            "Q" => MsgType::DontKnowTrade,
            "R" => MsgType::QuoteRequest,
            "S" => MsgType::Quote,
            "T" => MsgType::SettlementInstructions,
            "U" => MsgType::QuoteResponse,
            "V" => MsgType::MarketDataRequest,
            "W" => MsgType::MarketDataSnapshotFullRefresh,
            "X" => MsgType::MarketDataIncrementalRefresh,
            "Y" => MsgType::MarketDataRequestReject,
            "Z" => MsgType::QuoteCancel,
            _ => return None,
        })
    }

    /// The fields required on this message type beyond [`tag::SHARED_REQUIRED`].
    /// Types with no entry below require nothing extra.
    fn required_fields(&self) -> &'static [Tag] {
        match self {
            MsgType::TestRequest => &[tag::TEST_REQ_ID],
            MsgType::ResendRequest => &[tag::BEGIN_SEQ_NO, tag::END_SEQ_NO],
            MsgType::Reject => &[tag::REF_SEQ_NUM, tag::TEXT],
            MsgType::SequenceReset => &[tag::NEW_SEQ_NO],
            MsgType::NewOrderSingle => &[
                tag::CL_ORD_ID,
                tag::HANDL_INST,
                tag::SYMBOL,
                tag::SIDE,
                tag::TRANSACT_TIME,
            ],
            MsgType::OrderCancelRequest | MsgType::OrderCancelReplaceRequest => &[
                tag::CL_ORD_ID,
                tag::HANDL_INST,
                tag::ORIG_CL_ORD_ID,
                tag::SYMBOL,
                tag::SIDE,
                tag::TRANSACT_TIME,
            ],
            MsgType::OrderStatusRequest => &[
                tag::CL_ORD_ID,
                tag::HANDL_INST,
                tag::SYMBOL,
                tag::SIDE,
                tag::TRANSACT_TIME,
            ],
            MsgType::ExecutionReport => &[
                tag::AVG_PX,
                tag::CL_ORD_ID,
                tag::CUM_QTY,
                tag::EXEC_ID,
                tag::EXEC_TRANS_TYPE,
                tag::LAST_PX,
                tag::LAST_SHARES,
                tag::ORDER_ID,
                tag::ORDER_QTY,
                tag::ORD_STATUS,
                tag::ORD_TYPE,
                tag::SIDE,
                tag::SYMBOL,
                tag::TRANSACT_TIME,
            ],
            MsgType::OrderCancelReject => {
                &[tag::CL_ORD_ID, tag::ORDER_ID, tag::ORD_STATUS, tag::CXL_REJ_RESPONSE_TO]
            }
            MsgType::MarketDataRequest => &[
                tag::MD_REQ_ID,
                tag::SUBSCRIPTION_REQUEST_TYPE,
                tag::MARKET_DEPTH,
                tag::MD_UPDATE_TYPE,
                tag::NO_MD_ENTRY_TYPES,
                tag::MD_ENTRY_TYPE,
            ],
            MsgType::MarketDataSnapshotFullRefresh | MsgType::MarketDataIncrementalRefresh => {
                &[tag::MD_REQ_ID, tag::NO_MD_ENTRIES]
            }
            MsgType::MarketDataRequestReject => &[tag::MD_REQ_ID, tag::TEXT],
            _ => &[],
        }
    }

    /// Field definitions (for value-shape validation) for fields this
    /// message type requires.
    fn field_defs(&self) -> &'static [FieldDef] {
        const fn f(tag: Tag, class: TypeClass) -> FieldDef {
            FieldDef { tag, class }
        }
        match self {
            MsgType::NewOrderSingle | MsgType::OrderCancelRequest | MsgType::OrderCancelReplaceRequest => {
                const DEFS: &[FieldDef] = &[
                    f(tag::CL_ORD_ID, TypeClass::Text),
                    f(tag::HANDL_INST, TypeClass::Char),
                    f(tag::SYMBOL, TypeClass::Text),
                    f(tag::SIDE, TypeClass::Char),
                    f(tag::TRANSACT_TIME, TypeClass::UtcTimestamp),
                ];
                DEFS
            }
            MsgType::OrderStatusRequest => {
                const DEFS: &[FieldDef] = &[f(tag::TRANSACT_TIME, TypeClass::UtcTimestamp)];
                DEFS
            }
            MsgType::ExecutionReport => {
                const DEFS: &[FieldDef] = &[
                    f(tag::ORDER_ID, TypeClass::Text),
                    f(tag::EXEC_ID, TypeClass::Text),
                    f(tag::ORD_STATUS, TypeClass::Char),
                    f(tag::ORDER_QTY, TypeClass::Qty),
                    f(tag::LAST_SHARES, TypeClass::Qty),
                    f(tag::LAST_PX, TypeClass::Qty),
                    f(tag::CUM_QTY, TypeClass::Qty),
                    f(tag::AVG_PX, TypeClass::Qty),
                    f(tag::TRANSACT_TIME, TypeClass::UtcTimestamp),
                ];
                DEFS
            }
            MsgType::MarketDataRequest => {
                const DEFS: &[FieldDef] = &[
                    f(tag::MARKET_DEPTH, TypeClass::Length),
                    f(tag::NO_MD_ENTRY_TYPES, TypeClass::Length),
                ];
                DEFS
            }
            _ => &[],
        }
    }
}

/// A stateless handle to the FIX.4.4 field and message-type tables.
///
/// `Dictionary` carries no data of its own — every instance is equivalent —
/// so it is `Copy` and trivially shared across threads without an `Arc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dictionary;

impl Dictionary {
    pub fn new() -> Self {
        Dictionary
    }

    /// Resolve a raw tag-35 value to a recognized [`MsgType`].
    pub fn msg_type(&self, wire_value: &str) -> Option<MsgType> {
        MsgType::from_wire_value(wire_value)
    }

    /// Is `wire_value` a message type this dictionary recognizes?
    pub fn is_valid_msg_type(&self, wire_value: &str) -> bool {
        self.msg_type(wire_value).is_some()
    }

    /// All tags required on a message of this type: the shared header/
    /// trailer tags plus the type's own required tags.
    pub fn required_fields(&self, msg_type: MsgType) -> Vec<Tag> {
        let mut fields: Vec<Tag> = tag::SHARED_REQUIRED.to_vec();
        fields.extend_from_slice(msg_type.required_fields());
        fields
    }

    /// Look up the declared shape of `tag` for `msg_type`, if this
    /// dictionary has an opinion about it.
    ///
    /// `SendingTime` (52) is shared across every message type, so its shape
    /// is checked independent of `msg_type.field_defs()`.
    pub fn field_def(&self, msg_type: MsgType, tag: Tag) -> Option<FieldDef> {
        if tag == tag::SENDING_TIME {
            return Some(FieldDef {
                tag,
                class: TypeClass::UtcTimestamp,
            });
        }
        msg_type.field_defs().iter().copied().find(|d| d.tag == tag)
    }

    /// Validate `value` against the declared type class for `tag` under
    /// `msg_type`. Returns `true` if the dictionary has no opinion — unknown
    /// fields are permitted by FIX.
    pub fn validate_value(&self, msg_type: MsgType, tag: Tag, value: &[u8]) -> bool {
        match self.field_def(msg_type, tag) {
            Some(def) => def.validate(value),
            None => true,
        }
    }
}
