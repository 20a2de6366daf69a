use std::fmt;

use super::OptNumber;

/// The kind of value an option carries, which fixes how the
/// value is represented on the wire.
///
/// See [RFC7252 Section 3.2 Option Value Formats](https://datatracker.ietf.org/doc/html/rfc7252#section-3.2)
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ValueKind {
  /// A zero-length sequence of bytes.
  Empty,
  /// An opaque sequence of bytes.
  Opaque,
  /// A non-negative integer that is represented in network byte
  /// order using the number of bytes given by the Option Length
  /// field.
  ///
  /// Leading zero bytes are stripped, so `0` is encoded as zero bytes.
  UInt,
  /// A Unicode string that is encoded using UTF-8.
  String,
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      | ValueKind::Empty => "empty",
      | ValueKind::Opaque => "opaque",
      | ValueKind::UInt => "uint",
      | ValueKind::String => "string",
    };

    f.write_str(s)
  }
}

/// A bytestring was not a valid encoding of a value kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum ValueError {
  /// Empty options never carry data
  #[error("empty option value must not carry data (got {0} bytes)")]
  EmptyNotEmpty(usize),
  /// UInt options are at most 4 bytes wide
  #[error("uint option value must be at most 4 bytes (got {0} bytes)")]
  UIntTooLong(usize),
  /// String options must be valid UTF-8
  #[error("string option value is not valid utf-8")]
  InvalidUtf8,
}

/// An option value was used as the wrong kind,
/// or was constructed with a length its option does not allow.
///
/// This always indicates a programming mistake rather than
/// a malformed message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum ValueCastError {
  /// Tried to read or store a value as a kind it is not
  #[error("expected a {expected} option value, found {actual}")]
  WrongKind {
    /// The kind that was asked for
    expected: ValueKind,
    /// The kind that is actually stored
    actual: ValueKind,
  },
  /// The encoded value length is outside of `[min, max]`
  #[error("option {number} value is {len} bytes, must be within {min}..={max}")]
  LengthOutOfBounds {
    /// The option
    number: OptNumber,
    /// Encoded length of the rejected value
    len: usize,
    /// Minimum length allowed by the option
    min: u16,
    /// Maximum length allowed by the option
    max: u16,
  },
}

/// The value of a CoAP Option
///
/// ```
/// use coap_msg::{OptValue, ValueKind};
///
/// let v = OptValue::UInt(300);
/// assert_eq!(v.to_bytes(), vec![0x01, 0x2C]);
/// assert_eq!(OptValue::decode(ValueKind::UInt, &[0x01, 0x2C]), Ok(v));
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub enum OptValue {
  /// See [`ValueKind::Empty`]
  Empty,
  /// See [`ValueKind::Opaque`]
  Opaque(Vec<u8>),
  /// See [`ValueKind::UInt`]
  UInt(u32),
  /// See [`ValueKind::String`]
  String(String),
}

impl OptValue {
  /// The kind of this value
  pub fn kind(&self) -> ValueKind {
    match self {
      | OptValue::Empty => ValueKind::Empty,
      | OptValue::Opaque(_) => ValueKind::Opaque,
      | OptValue::UInt(_) => ValueKind::UInt,
      | OptValue::String(_) => ValueKind::String,
    }
  }

  /// Number of bytes this value occupies on the wire
  pub fn len(&self) -> usize {
    match self {
      | OptValue::Empty => 0,
      | OptValue::Opaque(bytes) => bytes.len(),
      | OptValue::UInt(n) => uint_len(*n),
      | OptValue::String(s) => s.len(),
    }
  }

  /// Whether this value encodes to zero bytes
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Encode this value to its canonical bytes
  pub fn to_bytes(&self) -> Vec<u8> {
    match self {
      | OptValue::Empty => Vec::new(),
      | OptValue::Opaque(bytes) => bytes.clone(),
      | OptValue::UInt(n) => {
        let len = uint_len(*n);
        n.to_be_bytes()[4 - len..].to_vec()
      },
      | OptValue::String(s) => s.as_bytes().to_vec(),
    }
  }

  /// Decode bytes as a value of kind `kind`
  pub fn decode(kind: ValueKind, bytes: &[u8]) -> Result<Self, ValueError> {
    match kind {
      | ValueKind::Empty if bytes.is_empty() => Ok(OptValue::Empty),
      | ValueKind::Empty => Err(ValueError::EmptyNotEmpty(bytes.len())),
      | ValueKind::Opaque => Ok(OptValue::Opaque(bytes.to_vec())),
      | ValueKind::UInt if bytes.len() > 4 => Err(ValueError::UIntTooLong(bytes.len())),
      | ValueKind::UInt => Ok(OptValue::UInt(bytes.iter()
                                                  .fold(0u32, |n, b| (n << 8) | u32::from(*b)))),
      | ValueKind::String => core::str::from_utf8(bytes).map(|s| OptValue::String(s.to_string()))
                                                       .map_err(|_| ValueError::InvalidUtf8),
    }
  }

  fn cast_err(&self, expected: ValueKind) -> ValueCastError {
    ValueCastError::WrongKind { expected,
                                actual: self.kind() }
  }

  /// Get the value of an [`ValueKind::Empty`] option
  pub fn as_empty(&self) -> Result<(), ValueCastError> {
    match self {
      | OptValue::Empty => Ok(()),
      | _ => Err(self.cast_err(ValueKind::Empty)),
    }
  }

  /// Get the value of an [`ValueKind::Opaque`] option
  pub fn as_opaque(&self) -> Result<&[u8], ValueCastError> {
    match self {
      | OptValue::Opaque(bytes) => Ok(bytes),
      | _ => Err(self.cast_err(ValueKind::Opaque)),
    }
  }

  /// Get the value of a [`ValueKind::UInt`] option
  pub fn as_uint(&self) -> Result<u32, ValueCastError> {
    match self {
      | OptValue::UInt(n) => Ok(*n),
      | _ => Err(self.cast_err(ValueKind::UInt)),
    }
  }

  /// Get the value of a [`ValueKind::String`] option
  pub fn as_str(&self) -> Result<&str, ValueCastError> {
    match self {
      | OptValue::String(s) => Ok(s),
      | _ => Err(self.cast_err(ValueKind::String)),
    }
  }
}

impl fmt::Display for OptValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | OptValue::Empty => f.write_str("(empty)"),
      | OptValue::Opaque(bytes) => write!(f, "({} bytes)", bytes.len()),
      | OptValue::UInt(n) => write!(f, "{}", n),
      | OptValue::String(s) => write!(f, "{:?}", s),
    }
  }
}

impl From<()> for OptValue {
  fn from(_: ()) -> Self {
    OptValue::Empty
  }
}

impl From<u32> for OptValue {
  fn from(n: u32) -> Self {
    OptValue::UInt(n)
  }
}

impl From<u16> for OptValue {
  fn from(n: u16) -> Self {
    OptValue::UInt(n.into())
  }
}

impl From<Vec<u8>> for OptValue {
  fn from(bytes: Vec<u8>) -> Self {
    OptValue::Opaque(bytes)
  }
}

impl<'a> From<&'a [u8]> for OptValue {
  fn from(bytes: &'a [u8]) -> Self {
    OptValue::Opaque(bytes.to_vec())
  }
}

impl From<String> for OptValue {
  fn from(s: String) -> Self {
    OptValue::String(s)
  }
}

impl<'a> From<&'a str> for OptValue {
  fn from(s: &'a str) -> Self {
    OptValue::String(s.to_string())
  }
}

/// Default value of an option, used when the option is absent from a message.
///
/// Unlike [`OptValue`] this borrows `'static` data so that option definitions
/// can be `const`.
#[derive(Copy, Clone, Hash, PartialEq, Eq, Debug)]
pub enum DefaultValue {
  /// Default of an opaque option
  Opaque(&'static [u8]),
  /// Default of a uint option
  UInt(u32),
  /// Default of a string option
  String(&'static str),
}

impl DefaultValue {
  /// The kind of this value
  pub fn kind(&self) -> ValueKind {
    match self {
      | DefaultValue::Opaque(_) => ValueKind::Opaque,
      | DefaultValue::UInt(_) => ValueKind::UInt,
      | DefaultValue::String(_) => ValueKind::String,
    }
  }
}

impl From<DefaultValue> for OptValue {
  fn from(d: DefaultValue) -> Self {
    match d {
      | DefaultValue::Opaque(bytes) => OptValue::Opaque(bytes.to_vec()),
      | DefaultValue::UInt(n) => OptValue::UInt(n),
      | DefaultValue::String(s) => OptValue::String(s.to_string()),
    }
  }
}

pub(crate) fn uint_len(n: u32) -> usize {
  match n {
    | 0 => 0,
    | n if n <= 0xFF => 1,
    | n if n <= 0xFFFF => 2,
    | n if n <= 0xFF_FFFF => 3,
    | _ => 4,
  }
}
