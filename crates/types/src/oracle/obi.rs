// Path: crates/types/src/oracle/obi.rs

//! The oracle binary interface (OBI) used by oracle scripts.
//!
//! A `string` is its UTF-8 length as a big-endian `u32` followed by the bytes,
//! integers are big-endian and a struct is its fields concatenated in
//! declaration order. Decoding must consume the whole input.

use thiserror::Error;

/// Errors raised while decoding OBI bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObiError {
    /// The input ended before a value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes required by the next value.
        needed: usize,
        /// Bytes left in the input.
        remaining: usize,
    },
    /// A string field is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    /// Bytes were left after the value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

/// A value with an OBI encoding.
pub trait ObiEncode {
    /// Appends the encoding of `self` to `out`.
    fn obi_encode_to(&self, out: &mut Vec<u8>);
}

/// A value that can be read from OBI bytes.
pub trait ObiDecode: Sized {
    /// Reads one value from the front of `input`, advancing it.
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError>;
}

/// Encodes a value into a fresh buffer.
pub fn encode<T: ObiEncode>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.obi_encode_to(&mut out);
    out
}

/// Decodes a value, rejecting trailing bytes.
pub fn decode<T: ObiDecode>(mut bytes: &[u8]) -> Result<T, ObiError> {
    let value = T::obi_decode_from(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(ObiError::TrailingBytes(bytes.len()));
    }
    Ok(value)
}

fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], ObiError> {
    if input.len() < n {
        return Err(ObiError::UnexpectedEof {
            needed: n,
            remaining: input.len(),
        });
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

impl ObiEncode for u32 {
    fn obi_encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl ObiDecode for u32 {
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(take(input, 4)?);
        Ok(u32::from_be_bytes(buf))
    }
}

impl ObiEncode for u64 {
    fn obi_encode_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }
}

impl ObiDecode for u64 {
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(take(input, 8)?);
        Ok(u64::from_be_bytes(buf))
    }
}

impl ObiEncode for String {
    fn obi_encode_to(&self, out: &mut Vec<u8>) {
        // Packet payloads are capped far below u32::MAX.
        (self.len() as u32).obi_encode_to(out);
        out.extend_from_slice(self.as_bytes());
    }
}

impl ObiDecode for String {
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError> {
        let len = u32::obi_decode_from(input)? as usize;
        let bytes = take(input, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ObiError::InvalidUtf8)
    }
}

/// The input of the application-verification oracle script.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OracleScriptCallData {
    /// Lowercase application name.
    pub application: String,
    /// Hex-encoded, application-specific call data.
    pub call_data: String,
}

impl ObiEncode for OracleScriptCallData {
    fn obi_encode_to(&self, out: &mut Vec<u8>) {
        self.application.obi_encode_to(out);
        self.call_data.obi_encode_to(out);
    }
}

impl ObiDecode for OracleScriptCallData {
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError> {
        Ok(Self {
            application: String::obi_decode_from(input)?,
            call_data: String::obi_decode_from(input)?,
        })
    }
}

/// The output of the application-verification oracle script.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OracleScriptResult {
    /// Hex-encoded signature over the value.
    pub signature: String,
    /// Hex-encoded value that was signed.
    pub value: String,
    /// The username found on the application.
    pub username: String,
}

impl ObiEncode for OracleScriptResult {
    fn obi_encode_to(&self, out: &mut Vec<u8>) {
        self.signature.obi_encode_to(out);
        self.value.obi_encode_to(out);
        self.username.obi_encode_to(out);
    }
}

impl ObiDecode for OracleScriptResult {
    fn obi_decode_from(input: &mut &[u8]) -> Result<Self, ObiError> {
        Ok(Self {
            signature: String::obi_decode_from(input)?,
            value: String::obi_decode_from(input)?,
            username: String::obi_decode_from(input)?,
        })
    }
}
