//! Protobuf-compatible wire primitives.
//!
//! A message is a sequence of `(key, value)` records where the key packs the
//! field number and wire type as `field << 3 | wire`. Scalars use proto3
//! semantics: zero values, empty strings and `false` are not written, and an
//! absent field decodes to its zero value.

use crate::error::DecodeError;

/// Longest legal varint.
const MAX_VARINT_LEN: usize = 10;

/// Largest field number protobuf allows.
const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How a value is laid out on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireType {
    Varint,
    Fixed64,
    Len,
    StartGroup,
    EndGroup,
    Fixed32,
}

impl WireType {
    fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Self::Varint,
            1 => Self::Fixed64,
            2 => Self::Len,
            3 => Self::StartGroup,
            4 => Self::EndGroup,
            5 => Self::Fixed32,
            _ => return None,
        })
    }

    const fn bits(self) -> u64 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::Len => 2,
            Self::StartGroup => 3,
            Self::EndGroup => 4,
            Self::Fixed32 => 5,
        }
    }
}

/// A decoded record key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub field: u32,
    pub wire: WireType,
}

/// A type with a fixed field-number layout.
pub trait Message: Sized {
    /// Schema name, used in decode errors.
    const NAME: &'static str;

    fn encode_fields(&self, writer: &mut Writer);

    /// Reads every record of one message.
    fn decode_fields(reader: &mut Reader<'_>) -> Result<Self, DecodeError>;

    fn encode(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        self.encode_fields(&mut writer);
        writer.into_bytes()
    }

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_fields(&mut Reader::new(Self::NAME, bytes))
    }
}

// ============================================================================
// Writer
// ============================================================================

#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    fn key(&mut self, field: u32, wire: WireType) {
        self.varint((u64::from(field) << 3) | wire.bits());
    }

    fn len_prefixed(&mut self, field: u32, bytes: &[u8]) {
        self.key(field, WireType::Len);
        self.varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn bool(&mut self, field: u32, value: bool) {
        if value {
            self.key(field, WireType::Varint);
            self.varint(1);
        }
    }

    /// `int32`: negative values are sign-extended to ten bytes.
    pub fn int32(&mut self, field: u32, value: i32) {
        if value != 0 {
            self.key(field, WireType::Varint);
            self.varint(i64::from(value) as u64);
        }
    }

    /// `double`. Only positive zero is elided so `-0.0` survives.
    pub fn double(&mut self, field: u32, value: f64) {
        if value.to_bits() != 0 {
            self.key(field, WireType::Fixed64);
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    pub fn string(&mut self, field: u32, value: &str) {
        if !value.is_empty() {
            self.len_prefixed(field, value.as_bytes());
        }
    }

    /// Repeated string; every element is written, empty ones included.
    pub fn strings<S: AsRef<str>>(&mut self, field: u32, values: &[S]) {
        for value in values {
            self.len_prefixed(field, value.as_ref().as_bytes());
        }
    }

    /// Packed repeated `double`.
    pub fn doubles(&mut self, field: u32, values: &[f64]) {
        if values.is_empty() {
            return;
        }
        let mut packed = Vec::with_capacity(values.len() * 8);
        for value in values {
            packed.extend_from_slice(&value.to_le_bytes());
        }
        self.len_prefixed(field, &packed);
    }

    /// Embedded message. Always written, so presence survives.
    pub fn message<M: Message>(&mut self, field: u32, value: &M) {
        let bytes = value.encode();
        self.len_prefixed(field, &bytes);
    }

    pub fn optional<M: Message>(&mut self, field: u32, value: Option<&M>) {
        if let Some(value) = value {
            self.message(field, value);
        }
    }

    pub fn messages<M: Message>(&mut self, field: u32, values: &[M]) {
        for value in values {
            self.message(field, value);
        }
    }

    /// Map entry as an embedded message with key in field 1 and value in 2.
    pub fn entry(&mut self, field: u32, encode: impl FnOnce(&mut Writer)) {
        let mut entry = Writer::new();
        encode(&mut entry);
        self.len_prefixed(field, &entry.buf);
    }
}

// ============================================================================
// Reader
// ============================================================================

#[derive(Debug)]
pub struct Reader<'a> {
    message: &'static str,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(message: &'static str, buf: &'a [u8]) -> Self {
        Self {
            message,
            buf,
            pos: 0,
        }
    }

    pub fn message_name(&self) -> &'static str {
        self.message
    }

    fn truncated(&self) -> DecodeError {
        DecodeError::Truncated {
            message: self.message,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| self.truncated())?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn varint(&mut self) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_LEN {
            let byte = *self.take(1)?.first().ok_or_else(|| self.truncated())?;
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintOverflow {
            message: self.message,
        })
    }

    fn fixed64(&mut self) -> Result<[u8; 8], DecodeError> {
        let bytes = self.take(8)?;
        let mut out = [0u8; 8];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn len_delimited(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = usize::try_from(self.varint()?).map_err(|_| self.truncated())?;
        self.take(len)
    }

    fn expect(&self, key: Key, expected: WireType) -> Result<(), DecodeError> {
        if key.wire == expected {
            Ok(())
        } else {
            Err(DecodeError::WrongWireType {
                message: self.message,
                field: key.field,
                expected,
                actual: key.wire,
            })
        }
    }

    /// Next record key, `None` at the end of the message.
    pub fn next_key(&mut self) -> Result<Option<Key>, DecodeError> {
        if self.pos == self.buf.len() {
            return Ok(None);
        }
        let raw = self.varint()?;
        let bits = (raw & 0x7) as u8;
        let wire = WireType::from_bits(bits).ok_or(DecodeError::InvalidWireType {
            message: self.message,
            wire: bits,
        })?;
        let field = u32::try_from(raw >> 3)
            .ok()
            .filter(|&field| (1..=MAX_FIELD_NUMBER).contains(&field))
            .ok_or(DecodeError::InvalidFieldNumber {
                message: self.message,
                field: raw >> 3,
            })?;
        if matches!(wire, WireType::StartGroup | WireType::EndGroup) {
            return Err(DecodeError::Group {
                message: self.message,
                field,
            });
        }
        Ok(Some(Key { field, wire }))
    }

    /// Skips the value of an unrecognised field.
    pub fn skip(&mut self, key: Key) -> Result<(), DecodeError> {
        match key.wire {
            WireType::Varint => self.varint().map(drop),
            WireType::Fixed64 => self.take(8).map(drop),
            WireType::Fixed32 => self.take(4).map(drop),
            WireType::Len => self.len_delimited().map(drop),
            WireType::StartGroup | WireType::EndGroup => Err(DecodeError::Group {
                message: self.message,
                field: key.field,
            }),
        }
    }

    pub fn bool(&mut self, key: Key) -> Result<bool, DecodeError> {
        self.expect(key, WireType::Varint)?;
        Ok(self.varint()? != 0)
    }

    /// `int32`; values wider than 32 bits are truncated as protobuf does.
    pub fn int32(&mut self, key: Key) -> Result<i32, DecodeError> {
        self.expect(key, WireType::Varint)?;
        Ok(self.varint()? as i64 as i32)
    }

    pub fn double(&mut self, key: Key) -> Result<f64, DecodeError> {
        self.expect(key, WireType::Fixed64)?;
        Ok(f64::from_le_bytes(self.fixed64()?))
    }

    pub fn string(&mut self, key: Key) -> Result<String, DecodeError> {
        self.expect(key, WireType::Len)?;
        let bytes = self.len_delimited()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 {
            message: self.message,
            field: key.field,
        })
    }

    /// One element of a repeated `double`, packed or not.
    pub fn doubles(&mut self, key: Key, out: &mut Vec<f64>) -> Result<(), DecodeError> {
        match key.wire {
            WireType::Fixed64 => {
                out.push(f64::from_le_bytes(self.fixed64()?));
                Ok(())
            }
            WireType::Len => {
                let mut packed = Reader::new(self.message, self.len_delimited()?);
                while packed.pos < packed.buf.len() {
                    out.push(f64::from_le_bytes(packed.fixed64()?));
                }
                Ok(())
            }
            _ => self.expect(key, WireType::Len),
        }
    }

    pub fn message<M: Message>(&mut self, key: Key) -> Result<M, DecodeError> {
        self.expect(key, WireType::Len)?;
        let bytes = self.len_delimited()?;
        M::decode(bytes)
    }

    /// Embedded map entry; hands the entry's own reader to `decode`.
    pub fn entry<T>(
        &mut self,
        key: Key,
        decode: impl FnOnce(&mut Reader<'a>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        self.expect(key, WireType::Len)?;
        let bytes = self.len_delimited()?;
        decode(&mut Reader::new(self.message, bytes))
    }

    pub fn invalid(&self, key: Key, value: impl Into<String>) -> DecodeError {
        DecodeError::InvalidValue {
            message: self.message,
            field: key.field,
            value: value.into(),
        }
    }
}
