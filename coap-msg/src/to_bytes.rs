use tinyvec::ArrayVec;

use crate::*;

/// Trait allowing fallible conversion into bytes
pub trait TryIntoBytes {
  /// Error yielded when the value can't be serialized
  type Error;

  /// Try to convert into a collection of bytes
  ///
  /// ```
  /// use coap_msg::{Code, Id, Message, Opt, Token, TryIntoBytes, Type};
  ///
  /// let mut msg = Message::new(Type::Con,
  ///                            Code::GET,
  ///                            Id(16962),
  ///                            Token::try_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap());
  /// msg.add_opt(Opt::uri_path(".well-known").unwrap());
  /// msg.add_opt(Opt::uri_path("core").unwrap());
  ///
  /// let bytes: Vec<u8> = msg.try_into_bytes().unwrap();
  /// assert_eq!(&bytes[..4], &[0x44, 0x01, 0x42, 0x42]);
  /// ```
  fn try_into_bytes<C: Default + Extend<u8>>(self) -> Result<C, Self::Error>;
}

/// Errors encounterable serializing to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum MessageToBytesError {
  /// The message version was not 1
  #[error("unsupported version {0}")]
  InvalidVersion(u8),

  /// The code class was not one of 0, 2, 4 or 5
  #[error("code class {0} is reserved")]
  InvalidCodeClass(u8),

  /// The code detail does not fit in 5 bits
  #[error("code detail {0} is larger than 31")]
  InvalidCodeDetail(u8),

  /// The message had code 0.00 but carried a token, options or a payload
  #[error("empty message must not carry a token, options or payload")]
  EmptyMessageNotEmpty,
}

impl<'a> TryIntoBytes for &'a Message {
  type Error = MessageToBytesError;

  fn try_into_bytes<C: Default + Extend<u8>>(self) -> Result<C, Self::Error> {
    if self.ver != Version(1) {
      return Err(MessageToBytesError::InvalidVersion(self.ver.0));
    }

    if !self.code.class_is_valid() {
      return Err(MessageToBytesError::InvalidCodeClass(self.code.class));
    }

    if self.code.detail > 0b0001_1111 {
      return Err(MessageToBytesError::InvalidCodeDetail(self.code.detail));
    }

    if self.is_empty()
       && !(self.token.is_empty() && self.opts().is_empty() && self.payload.0.is_empty())
    {
      return Err(MessageToBytesError::EmptyMessageNotEmpty);
    }

    let mut bytes = C::default();

    let byte1: u8 = Byte1 { tkl: self.token.len() as u8,
                            ver: self.ver,
                            ty: self.ty }.into();
    let code: u8 = self.code.into();
    let id: [u8; 2] = self.id.into();

    bytes.extend(Some(byte1));
    bytes.extend(Some(code));
    bytes.extend(id);
    bytes.extend(self.token.as_bytes().iter().copied());

    // options are kept sorted, so deltas are never negative
    let mut prev = OptNumber(0);
    for opt in self.opts() {
      opt.extend_bytes(OptDelta(u32::from(opt.number().0 - prev.0)), &mut bytes);
      prev = opt.number();
    }

    if !self.payload.0.is_empty() {
      bytes.extend(Some(PAYLOAD_MARKER));
      bytes.extend(self.payload.0.iter().copied());
    }

    log::trace!("serialized {}", crate::logging::msg_summary(self));

    Ok(bytes)
  }
}

impl TryIntoBytes for Message {
  type Error = MessageToBytesError;

  fn try_into_bytes<C: Default + Extend<u8>>(self) -> Result<C, Self::Error> {
    (&self).try_into_bytes()
  }
}

impl Opt {
  /// Write this option's header, extensions and value
  pub(crate) fn extend_bytes(&self, delta: OptDelta, bytes: &mut impl Extend<u8>) {
    let value = self.value_bytes();

    // value lengths are bounded by `OptionDef::max_len`
    let (del, del_bytes) = opt_len_or_delta(delta.0);
    let (len, len_bytes) = opt_len_or_delta(value.len() as u32);

    bytes.extend(Some(del << 4 | len));

    if let Some(bs) = del_bytes {
      bytes.extend(bs);
    }

    if let Some(bs) = len_bytes {
      bytes.extend(bs);
    }

    bytes.extend(value);
  }
}

/// Split a delta or length into its header nibble and extension bytes
pub(crate) fn opt_len_or_delta(val: u32) -> (u8, Option<ArrayVec<[u8; 2]>>) {
  match val {
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend(((n - 269) as u16).to_be_bytes());
      (14, Some(bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      (13, Some(bytes))
    },
    | n => (n as u8, None),
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = (b.ver.0 & 0b11) << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl;

    ver | ty | tkl
  }
}
