//! Low-level representation of CoAP messages.
//!
//! The most notable item in `coap_msg` is [`Message`];
//! a CoAP message very close to the actual byte layout.
//!
//! ## Options
//! CoAP options are typed: every option number that a decoder understands has an
//! [`OptionDef`] describing how its value is encoded (empty, opaque, uint or string),
//! how long the value may be and whether the option may repeat.
//!
//! When decoding, option definitions are looked up in a [`Registry`]. The
//! [global registry](Registry::global) knows every option in RFC7252;
//! options it doesn't know are dropped if elective and rejected if critical.
//!
//! ```
//! use coap_msg::*;
//!
//! let mut req = Message::new(Type::Con, Code::GET, Id(1), Token::opaque(b"req"));
//! req.set_uri("coap://example.net/.well-known/core").unwrap();
//! req.add_opt(Opt::accept(ContentFormat::LinkFormat).unwrap());
//!
//! let bytes: Vec<u8> = (&req).try_into_bytes().unwrap();
//! let parsed = Message::try_from_bytes(&bytes).unwrap();
//!
//! assert_eq!(parsed, req);
//! assert_eq!(parsed.uri().unwrap(), "coap://example.net/.well-known/core");
//! ```
//!
//! ## URIs
//! [`uri`] converts between `coap://` URIs and the Uri-Host, Uri-Port, Uri-Path and
//! Uri-Query options.
//!
//! ## Performance
//! This crate uses `criterion` to measure serializing and deserializing messages
//! of varying size; see `benches/`.

#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![deny(missing_docs)]

/// Message cache keys
pub mod cache_key;

#[doc(hidden)]
pub mod from_bytes;

pub(crate) mod logging;

/// Message structs
pub mod msg;

/// Option registry
pub mod registry;

#[doc(hidden)]
pub mod to_bytes;

pub mod uri;

#[doc(inline)]
pub use cache_key::*;
#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use registry::*;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes};
#[doc(inline)]
pub use uri::{UriError, DEFAULT_PORT, DEFAULT_SECURE_PORT};

#[cfg(test)]
pub(crate) fn test_msg() -> (Message, Vec<u8>) {
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let options: [&[u8]; 2] = [&[0b_1100_0001u8, 50], &[0b_0010_0001u8, 30]];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let mut msg = Message::new(Type::Con,
                             Code { class: 2,
                                    detail: 5 },
                             Id(1),
                             Token(tinyvec::array_vec!([u8; 8] => 254)));
  msg.add_opt(Opt::max_age(30).unwrap());
  msg.add_opt(Opt::content_format(ContentFormat::Json).unwrap());
  msg.payload = Payload(b"hello, world!".to_vec());

  (msg, bytes)
}

#[cfg(test)]
pub(crate) mod tests {
  /// Assert two values are equal, printing them in binary on failure
  #[macro_export]
  macro_rules! assert_eqb {
    ($actual:expr, $expected:expr) => {
      if $actual != $expected {
        panic!("expected {:08b} to equal {:08b}", $actual, $expected)
      }
    };
  }

  /// Assert two byte iterables are equal, printing them in binary on failure
  #[macro_export]
  macro_rules! assert_eqb_iter {
    ($actual:expr, $expected:expr) => {
      if $actual.iter().ne($expected.iter()) {
        panic!("expected {:?} to equal {:?}",
               $actual.into_iter()
                      .map(|b| format!("{:08b}", b))
                      .collect::<Vec<_>>(),
               $expected.into_iter()
                        .map(|b| format!("{:08b}", b))
                        .collect::<Vec<_>>())
      }
    };
  }
}
