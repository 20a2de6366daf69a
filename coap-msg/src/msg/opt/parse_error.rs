use super::{OptNumber, ValueError};

/// Errors encounterable while parsing an option header from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, thiserror::Error)]
pub enum OptParseError {
  /// Reached end of stream before parsing was finished
  #[error("reached end of stream while parsing an option")]
  UnexpectedEndOfStream,

  /// Option Delta was set to 15, which is reserved for the payload marker.
  #[error("option delta nibble was set to reserved value {0}")]
  OptionDeltaReservedValue(u8),

  /// Value Length was set to 15, which is reserved for the payload marker.
  #[error("option length nibble was set to reserved value {0}")]
  ValueLengthReservedValue(u8),

  /// The running sum of option deltas exceeded the largest option number (65535)
  #[error("option number {0} is larger than 65535")]
  OptionNumberOverflow(u32),
}

impl OptParseError {
  /// Shorthand for [`OptParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

/// Why an option was rejected
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum OptionErrorKind {
  /// The option number is critical and is not known to the registry
  #[error("unrecognized critical option")]
  UnrecognizedCritical,
  /// The option is critical, not repeatable, and occurred more than once
  #[error("critical option may not be repeated")]
  RepeatedCritical,
  /// The value length is outside of what the option allows
  #[error("value is {len} bytes, must be within {min}..={max}")]
  LengthOutOfBounds {
    /// Length of the value on the wire
    len: usize,
    /// Minimum length allowed by the option
    min: u16,
    /// Maximum length allowed by the option
    max: u16,
  },
  /// The value bytes are not a valid encoding of the option's value kind
  #[error(transparent)]
  InvalidValue(#[from] ValueError),
}

/// An option in a message could not be accepted.
///
/// A server receiving a request that yields this error should respond
/// with `4.02 Bad Option` (see [`crate::Code::BAD_OPTION`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
#[error("bad option {number}: {kind}")]
pub struct OptionError {
  /// The offending option
  pub number: OptNumber,
  /// What was wrong with it
  pub kind: OptionErrorKind,
}

impl OptionError {
  /// Create a new `OptionError`
  pub fn new(number: OptNumber, kind: impl Into<OptionErrorKind>) -> Self {
    Self { number,
           kind: kind.into() }
  }
}
