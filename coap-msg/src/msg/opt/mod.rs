use core::fmt;

use coap_cursor::Cursor;
use toad_macros::rfc_7252_doc;

use crate::from_bytes::TryConsumeBytes;

/// Option definitions & instances
pub mod def;
pub use def::*;

/// Option parsing errors
pub mod parse_error;
pub use parse_error::*;

/// Option values
pub mod value;
pub use value::*;

/// Options defined in RFC7252
pub mod known;
pub use known::*;

/// Resolve the extended form of an option header nibble.
///
/// `13` and `14` mean the actual value follows the header in
/// 1 or 2 extra bytes, `15` is reserved for the payload marker.
pub(crate) fn parse_opt_len_or_delta<A: AsRef<[u8]>>(head: u8,
                                                     bytes: &mut Cursor<A>,
                                                     reserved_err: OptParseError)
                                                     -> Result<u32, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(OptParseError::eof)?;
      Ok(u32::from(n) + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u32::from(u16::from_be_bytes([a, b])) + 269),
      | _ => Err(OptParseError::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head.into()),
  }
}

/// The "Option Delta" is the difference between this Option's Number
/// and the previous Option's number.
///
/// On the wire a delta may be as large as `65804`, which is why this is
/// wider than [`OptNumber`].
///
/// # Related
/// - [RFC7252#section-3.1 Option Format](https://datatracker.ietf.org/doc/html/rfc7252#section-3.1)
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptDelta(pub u32);

#[doc = rfc_7252_doc!("5.4.6")]
/// <details><summary><b>RFC7252 Section 12.2 Core CoAP Option Numbers</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.2"))]
/// </details>
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u16);

impl fmt::Display for OptNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[doc = rfc_7252_doc!("5.4.1")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptionMustBeProcessed {
  /// This option must be processed,
  /// and a response that ignores it
  /// will be rejected.
  ///
  /// Corresponds to the option being "critical"
  /// in strict CoAP terms
  Yes,
  /// This option does not _need_ to
  /// be processed,
  /// and a response that ignores it
  /// will be processed anyway.
  ///
  /// Corresponds to the option being "elective"
  /// in strict CoAP terms
  No,
}

#[doc = rfc_7252_doc!("5.4.2")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionUnsupportedByProxy {
  /// This option /must be/ processed & understood by proxies
  /// and may not be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "UnSafe" to forward
  /// in strict CoAP terms
  Error,
  /// This option may not be processed & understood by proxies
  /// and may be forwarded blindly to their destination.
  ///
  /// Corresponds to the option being "SafeToForward"
  /// in strict CoAP terms
  Forward,
}

#[doc = rfc_7252_doc!("5.4.2")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WhenOptionChanges {
  /// If this option is safe to forward
  /// but unknown to a proxy, it should be included in the proxy's
  /// cache key for this message.
  ///
  /// Corresponds to the option being not "NoCacheKey"
  /// in strict CoAP terms
  ResponseChanges,
  /// If this option is safe to forward
  /// but unknown to a proxy, it should not be included in the proxy's
  /// cache key for this message, and different values for this option
  /// should yield the cached response.
  ///
  /// Corresponds to the option being "NoCacheKey"
  /// in strict CoAP terms
  ResponseDoesNotChange,
}

impl OptNumber {
  /// Whether a receiver that does not recognize this option must reject the message (bit 0)
  pub const fn is_critical(&self) -> bool {
    self.0 & 0b1 == 0b1
  }

  /// Whether a proxy that does not recognize this option must not forward it (bit 1)
  pub const fn is_unsafe(&self) -> bool {
    self.0 & 0b10 == 0b10
  }

  /// Whether this option is excluded from the cache key (bits 1-4 are `1110`)
  pub const fn no_cache_key(&self) -> bool {
    self.0 & 0x1E == 0x1C
  }

  /// Whether or not this option should be included in a message's cache key
  pub const fn include_in_cache_key(&self) -> bool {
    !self.no_cache_key()
  }

  /// Whether or not this option may be ignored by a server
  pub fn must_be_processed(&self) -> OptionMustBeProcessed {
    if self.is_critical() {
      OptionMustBeProcessed::Yes
    } else {
      OptionMustBeProcessed::No
    }
  }

  /// Whether or not this option may be forwarded blindly by
  /// a proxy that does not support processing it
  pub fn when_unsupported_by_proxy(&self) -> WhenOptionUnsupportedByProxy {
    if self.is_unsafe() {
      WhenOptionUnsupportedByProxy::Error
    } else {
      WhenOptionUnsupportedByProxy::Forward
    }
  }

  /// Whether or not different values for this option should
  /// yield proxies' cached response
  ///
  /// _(when the proxy does not support processing it and
  /// the option is safe to forward)_
  pub fn when_option_changes(&self) -> WhenOptionChanges {
    if self.no_cache_key() {
      WhenOptionChanges::ResponseDoesNotChange
    } else {
      WhenOptionChanges::ResponseChanges
    }
  }
}

/// An option as it appears on the wire; a delta and the raw value bytes.
///
/// The option number and the meaning of the value are only known
/// once the preceding options have been read and the number has been
/// looked up in a [`crate::Registry`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub(crate) struct RawOpt {
  pub(crate) delta: OptDelta,
  pub(crate) value: Vec<u8>,
}

impl<Bytes: AsRef<[u8]>> TryConsumeBytes<Bytes> for RawOpt {
  type Error = OptParseError;

  /// Expects the caller to have checked that the next byte is not the payload marker.
  fn try_consume_bytes(bytes: &mut Cursor<Bytes>) -> Result<Self, Self::Error> {
    let byte1 = bytes.next().ok_or_else(OptParseError::eof)?;

    // delta extension bytes come before length extension bytes
    let delta = parse_opt_len_or_delta(byte1 >> 4,
                                       bytes,
                                       OptParseError::OptionDeltaReservedValue(15))?;

    let len = parse_opt_len_or_delta(byte1 & 0b0000_1111,
                                     bytes,
                                     OptParseError::ValueLengthReservedValue(15))?
              as usize;

    let value = bytes.take_exact(len)
                     .ok_or_else(OptParseError::eof)?
                     .to_vec();

    Ok(RawOpt { delta: OptDelta(delta),
                value })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_opt() {
    let mut opt_bytes = Cursor::new([0b00010001, 0b00000001]);
    let opt = RawOpt::try_consume_bytes(&mut opt_bytes).unwrap();
    assert_eq!(opt,
               RawOpt { delta: OptDelta(1),
                        value: vec![1] });

    let mut opt_bytes = Cursor::new([0b11010001, 0b00000001, 0b00000001]);
    let opt = RawOpt::try_consume_bytes(&mut opt_bytes).unwrap();
    assert_eq!(opt,
               RawOpt { delta: OptDelta(14),
                        value: vec![1] });

    let mut opt_bytes = Cursor::new([0b11100001, 0b00000000, 0b00000001, 0b00000001]);
    let opt = RawOpt::try_consume_bytes(&mut opt_bytes).unwrap();
    assert_eq!(opt,
               RawOpt { delta: OptDelta(270),
                        value: vec![1] });

    let mut opt_bytes = Cursor::new([0b00000001, 0b00000001]);
    let opt = RawOpt::try_consume_bytes(&mut opt_bytes).unwrap();
    assert_eq!(opt,
               RawOpt { delta: OptDelta(0),
                        value: vec![1] });
  }

  #[test]
  fn parse_opt_extended_boundaries() {
    let mut opt_bytes = Cursor::new([0b1101_0000, 0]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes).unwrap().delta,
               OptDelta(13));

    let mut opt_bytes = Cursor::new([0b1101_0000, 255]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes).unwrap().delta,
               OptDelta(268));

    let mut opt_bytes = Cursor::new([0b1110_0000, 0, 0]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes).unwrap().delta,
               OptDelta(269));

    let mut opt_bytes = Cursor::new([0b1110_0000, 0xFF, 0xFF]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes).unwrap().delta,
               OptDelta(65804));
  }

  #[test]
  fn parse_opt_delta_then_length_extensions() {
    // delta 13+2, length 13+0
    let mut value = vec![0b1101_1101, 2, 0];
    value.extend(core::iter::repeat(7).take(13));
    let opt = RawOpt::try_consume_bytes(&mut Cursor::new(value)).unwrap();
    assert_eq!(opt.delta, OptDelta(15));
    assert_eq!(opt.value, vec![7; 13]);
  }

  #[test]
  fn parse_opt_reserved_nibbles() {
    let mut opt_bytes = Cursor::new([0b1111_0001, 1]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes),
               Err(OptParseError::OptionDeltaReservedValue(15)));

    let mut opt_bytes = Cursor::new([0b0001_1111, 1]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes),
               Err(OptParseError::ValueLengthReservedValue(15)));
  }

  #[test]
  fn parse_opt_truncated() {
    let mut opt_bytes = Cursor::new([0b0001_0011, 1]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes),
               Err(OptParseError::UnexpectedEndOfStream));

    let mut opt_bytes = Cursor::new([0b1110_0001, 0]);
    assert_eq!(RawOpt::try_consume_bytes(&mut opt_bytes),
               Err(OptParseError::UnexpectedEndOfStream));
  }

  #[test]
  fn opt_number_qualities() {
    // critical, safe-to-fwd, cache-key
    let if_match = OptNumber(1);

    // critical, unsafe-to-fwd, cache-key
    let uri_host = OptNumber(3);

    // elective, safe-to-fwd, cache-key
    let etag = OptNumber(4);

    // elective, safe-to-fwd, no-cache-key
    let size1 = OptNumber(60);

    [&if_match, &uri_host].into_iter()
                          .for_each(|num| {
                            assert!(num.is_critical());
                            assert_eq!(num.must_be_processed(), OptionMustBeProcessed::Yes);
                          });

    [&etag, &size1].into_iter().for_each(|num| {
                                 assert!(!num.is_critical());
                                 assert_eq!(num.must_be_processed(), OptionMustBeProcessed::No);
                               });

    [&if_match, &etag, &size1].into_iter().for_each(|num| {
                                            assert!(!num.is_unsafe());
                                            assert_eq!(num.when_unsupported_by_proxy(),
                                                       WhenOptionUnsupportedByProxy::Forward);
                                          });

    assert!(uri_host.is_unsafe());
    assert_eq!(uri_host.when_unsupported_by_proxy(),
               WhenOptionUnsupportedByProxy::Error);

    [&if_match, &uri_host, &etag].into_iter().for_each(|num| {
                                               assert!(num.include_in_cache_key());
                                               assert_eq!(num.when_option_changes(),
                                                          WhenOptionChanges::ResponseChanges);
                                             });

    assert!(size1.no_cache_key());
    assert_eq!(size1.when_option_changes(),
               WhenOptionChanges::ResponseDoesNotChange);
  }
}
