//! Binary codec for foreign-chain event logs and proof envelopes
//!
//! The foreign chain serializes its bridge events with a fixed, Borsh-style
//! layout. Every record starts with a one-byte flag (the schema version,
//! currently 0) followed by its fields in a fixed order:
//!
//! ```text
//! Locked      | flag u8 | recipient [20] | collection_id str | token_id str | token_uri str |
//! Withdraw    | flag u8 | token [20]     | recipient [20]    | token_id str |
//! MetadataLog | flag u8 | collection_id str | name str | symbol str | icon str | base_uri str |
//! ```
//!
//! `str` is a u32 little-endian byte length followed by that many raw bytes.
//! A record must be consumed exactly: missing bytes and trailing bytes are both
//! decode failures.
//!
//! The proof envelope submitted by relayers uses the same primitives:
//!
//! ```text
//! | flag u8 | block_height u64 | log_index u32 | emitter str | log bytes | proof bytes |
//! ```

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint256;
use thiserror::Error;

/// Current schema version, carried in the first byte of every record
pub const SCHEMA_VERSION: u8 = 0;

/// Length of a foreign-chain address field
pub const ADDRESS_LEN: usize = 20;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("{0} trailing bytes after the last field")]
    TrailingBytes(usize),

    #[error("unsupported schema flag {0}")]
    UnsupportedFlag(u8),

    #[error("token id is empty")]
    EmptyTokenId,

    #[error("token id contains non-digit byte 0x{0:02x}")]
    InvalidDigit(u8),

    #[error("token id does not fit in 256 bits")]
    TokenIdOverflow,

    #[error("field {0} is not valid utf-8")]
    InvalidUtf8(&'static str),
}

// ============================================================================
// Event Types
// ============================================================================

/// Which event layout a log is decoded with
#[cw_serde]
#[derive(Copy, Eq)]
pub enum EventSchema {
    Locked,
    Withdraw,
    MetadataLog,
}

impl EventSchema {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSchema::Locked => "locked",
            EventSchema::Withdraw => "withdraw",
            EventSchema::MetadataLog => "metadata_log",
        }
    }
}

/// A foreign collection token was locked; mint its representation here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedEvent {
    pub recipient: [u8; ADDRESS_LEN],
    pub collection_id: String,
    pub token_id: Uint256,
    pub token_uri: String,
}

/// A foreign representation of a home token was burned; release the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawEvent {
    /// Home-token key of the home collection
    pub token: [u8; ADDRESS_LEN],
    pub recipient: [u8; ADDRESS_LEN],
    pub token_id: Uint256,
}

/// Display metadata of a foreign collection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLogEvent {
    pub collection_id: String,
    pub name: String,
    pub symbol: String,
    pub icon: String,
    pub base_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    Locked(LockedEvent),
    Withdraw(WithdrawEvent),
    MetadataLog(MetadataLogEvent),
}

impl DecodedEvent {
    pub fn schema(&self) -> EventSchema {
        match self {
            DecodedEvent::Locked(_) => EventSchema::Locked,
            DecodedEvent::Withdraw(_) => EventSchema::Withdraw,
            DecodedEvent::MetadataLog(_) => EventSchema::MetadataLog,
        }
    }
}

/// Proof blob submitted by relayers.
///
/// `log` is the raw event record and `proof` the opaque light-client proof
/// that the external prover checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofEnvelope {
    pub block_height: u64,
    pub log_index: u32,
    pub emitter: String,
    pub log: Vec<u8>,
    pub proof: Vec<u8>,
}

// ============================================================================
// Reader
// ============================================================================

/// Cursor over a byte slice that never reads past the end.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(DecodeError::UnexpectedEof { needed, remaining });
        }
        let slice = &self.data[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    /// Length-prefixed raw bytes. The declared length is checked against the
    /// remaining input before anything is copied.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u32()? as usize;
        self.take(len)
    }

    pub fn read_string(&mut self, field: &'static str) -> Result<String, DecodeError> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8(field))
    }

    pub fn read_flag(&mut self) -> Result<(), DecodeError> {
        let flag = self.read_u8()?;
        if flag != SCHEMA_VERSION {
            return Err(DecodeError::UnsupportedFlag(flag));
        }
        Ok(())
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(self) -> Result<(), DecodeError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(DecodeError::TrailingBytes(n)),
        }
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Encoder for the same layout, used by relayers and tests.
#[derive(Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn put_u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_u64(&mut self, v: u64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_fixed(&mut self, v: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(v);
        self
    }

    pub fn put_bytes(&mut self, v: &[u8]) -> &mut Self {
        self.put_u32(v.len() as u32);
        self.buf.extend_from_slice(v);
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// Token Id Parsing
// ============================================================================

/// Parse a decimal token id into a 256-bit integer.
///
/// Overflow is detected before each multiply-add: the step
/// `acc * 10 + digit` is only taken when it cannot exceed `Uint256::MAX`,
/// so a wrapped value is never produced.
pub fn parse_token_id(digits: &[u8]) -> Result<Uint256, DecodeError> {
    if digits.is_empty() {
        return Err(DecodeError::EmptyTokenId);
    }

    let ten = Uint256::from(10u8);
    let max_before_last = Uint256::MAX / ten;
    let max_last_digit = Uint256::MAX % ten;

    let mut acc = Uint256::zero();
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(DecodeError::InvalidDigit(byte));
        }
        let digit = Uint256::from(byte - b'0');
        if acc > max_before_last || (acc == max_before_last && digit > max_last_digit) {
            return Err(DecodeError::TokenIdOverflow);
        }
        acc = acc * ten + digit;
    }
    Ok(acc)
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode an event log with the given schema.
pub fn decode_event(bytes: &[u8], schema: EventSchema) -> Result<DecodedEvent, DecodeError> {
    let mut reader = Reader::new(bytes);
    reader.read_flag()?;

    let event = match schema {
        EventSchema::Locked => {
            let recipient = reader.read_fixed::<ADDRESS_LEN>()?;
            let collection_id = reader.read_string("collection_id")?;
            let token_id = parse_token_id(reader.read_bytes()?)?;
            let token_uri = reader.read_string("token_uri")?;
            DecodedEvent::Locked(LockedEvent {
                recipient,
                collection_id,
                token_id,
                token_uri,
            })
        }
        EventSchema::Withdraw => {
            let token = reader.read_fixed::<ADDRESS_LEN>()?;
            let recipient = reader.read_fixed::<ADDRESS_LEN>()?;
            let token_id = parse_token_id(reader.read_bytes()?)?;
            DecodedEvent::Withdraw(WithdrawEvent {
                token,
                recipient,
                token_id,
            })
        }
        EventSchema::MetadataLog => DecodedEvent::MetadataLog(MetadataLogEvent {
            collection_id: reader.read_string("collection_id")?,
            name: reader.read_string("name")?,
            symbol: reader.read_string("symbol")?,
            icon: reader.read_string("icon")?,
            base_uri: reader.read_string("base_uri")?,
        }),
    };

    reader.finish()?;
    Ok(event)
}

/// Encode an event in the foreign chain's layout.
pub fn encode_event(event: &DecodedEvent) -> Vec<u8> {
    let mut w = Writer::new();
    w.put_u8(SCHEMA_VERSION);
    match event {
        DecodedEvent::Locked(e) => {
            w.put_fixed(&e.recipient)
                .put_bytes(e.collection_id.as_bytes())
                .put_bytes(e.token_id.to_string().as_bytes())
                .put_bytes(e.token_uri.as_bytes());
        }
        DecodedEvent::Withdraw(e) => {
            w.put_fixed(&e.token)
                .put_fixed(&e.recipient)
                .put_bytes(e.token_id.to_string().as_bytes());
        }
        DecodedEvent::MetadataLog(e) => {
            w.put_bytes(e.collection_id.as_bytes())
                .put_bytes(e.name.as_bytes())
                .put_bytes(e.symbol.as_bytes())
                .put_bytes(e.icon.as_bytes())
                .put_bytes(e.base_uri.as_bytes());
        }
    }
    w.into_bytes()
}

impl ProofEnvelope {
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);
        reader.read_flag()?;
        let envelope = ProofEnvelope {
            block_height: reader.read_u64()?,
            log_index: reader.read_u32()?,
            emitter: reader.read_string("emitter")?,
            log: reader.read_bytes()?.to_vec(),
            proof: reader.read_bytes()?.to_vec(),
        };
        reader.finish()?;
        Ok(envelope)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.put_u8(SCHEMA_VERSION)
            .put_u64(self.block_height)
            .put_u32(self.log_index)
            .put_bytes(self.emitter.as_bytes())
            .put_bytes(&self.log)
            .put_bytes(&self.proof);
        w.into_bytes()
    }
}
