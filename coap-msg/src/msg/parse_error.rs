use super::opt::{OptParseError, OptionError};
use super::{Code, Id};

/// What went wrong while parsing a message from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, thiserror::Error)]
pub enum MessageParseErrorKind {
  /// Reached end of stream before parsing was finished
  #[error("reached end of stream before the message was fully parsed")]
  UnexpectedEndOfStream,

  /// The version was not 1
  #[error("unsupported CoAP version {0}")]
  InvalidVersion(u8),

  /// Token length was > 8
  #[error("token length {0} is reserved")]
  InvalidTokenLength(u8),

  /// The code class was not one of 0, 2, 4 or 5
  #[error("code class {0} is reserved")]
  InvalidCodeClass(u8),

  /// The message had code 0.00 but carried a token, options or a payload
  #[error("empty message must not carry a token, options or payload")]
  EmptyMessageNotEmpty,

  /// The payload marker was the last byte of the message
  #[error("payload marker present but no payload")]
  PayloadMarkerWithoutPayload,

  /// Error parsing an option header
  #[error(transparent)]
  OptParseError(#[from] OptParseError),

  /// An option was unrecognized-and-critical or had an invalid value
  #[error(transparent)]
  BadOption(#[from] OptionError),
}

/// Errors encounterable while parsing a message from bytes
///
/// Parsing never yields a partially decoded message, but the
/// message [`Id`] is reported alongside the error whenever the
/// first 4 bytes could be read so that the failure can be attributed
/// (and e.g. answered with a Reset) by the caller.
///
/// ```
/// use coap_msg::{Id, Message, MessageParseErrorKind, TryFromBytes};
///
/// // Empty message (code 0.00) with a payload
/// let err = Message::try_from_bytes([0x40, 0x00, 0x10, 0x00, 0xFF, 0x12, 0x34]).unwrap_err();
/// assert_eq!(err.id, Some(Id(0x1000)));
/// assert_eq!(err.kind, MessageParseErrorKind::EmptyMessageNotEmpty);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord, thiserror::Error)]
#[error("failed to parse message (id {id:?}): {kind}")]
pub struct MessageParseError {
  /// The id of the message, if at least 4 bytes were present
  pub id: Option<Id>,
  /// What happened?
  pub kind: MessageParseErrorKind,
}

impl MessageParseError {
  /// Shorthand for an [`MessageParseErrorKind::UnexpectedEndOfStream`] without a message id
  pub fn eof() -> Self {
    Self { id: None,
           kind: MessageParseErrorKind::UnexpectedEndOfStream }
  }

  /// If this error is caused by a bad option, get it
  pub fn bad_option(&self) -> Option<&OptionError> {
    match self.kind {
      | MessageParseErrorKind::BadOption(ref e) => Some(e),
      | _ => None,
    }
  }

  /// The response code a server should reply with when a request fails to parse
  ///
  /// Bad options yield `4.02 Bad Option`, everything else `4.00 Bad Request`.
  pub fn response_code(&self) -> Code {
    match self.kind {
      | MessageParseErrorKind::BadOption(_) => Code::BAD_OPTION,
      | _ => Code::BAD_REQUEST,
    }
  }
}

impl MessageParseErrorKind {
  /// Attach the (possibly unknown) id of the message being parsed
  pub fn with_id(self, id: Option<Id>) -> MessageParseError {
    MessageParseError { id, kind: self }
  }
}
