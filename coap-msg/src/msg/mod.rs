use coap_cursor::Cursor;
use toad_macros::rfc_7252_doc;

/// Message Code
pub mod code;

/// Message parsing errors
pub mod parse_error;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message Type
pub mod ty;

/// Message Token
pub mod token;

/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

use crate::from_bytes::TryConsumeBytes;
use crate::{Registry, TryFromBytes};

/// The byte separating a message's options from its payload
pub const PAYLOAD_MARKER: u8 = 0b1111_1111;

#[doc = rfc_7252_doc!("5.5")]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Payload(pub Vec<u8>);

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (request, response, empty)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl From<u8> for Byte1 {
  fn from(b: u8) -> Self {
    let ver = b >> 6; // bits 0 & 1
    let ty = b >> 4 & 0b11; // bits 2 & 3
    let tkl = b & 0b1111u8; // last 4 bits

    Byte1 { ver: Version(ver),
            ty: Type::from_bits(ty),
            tkl }
  }
}

/// # `Message` struct
/// Low-level representation of a CoAP message, very close to the binary format.
///
/// Messages support both serializing to bytes and from bytes, by using the provided [`TryFromBytes`] and [`crate::TryIntoBytes`] traits.
///
/// ## Options
/// Options are always stored sorted by their [`OptNumber`], the order in which they must
/// appear on the wire. Options with the same number keep the order they were added in.
///
/// This means that the order options are added in does not affect equality of messages
/// or the bytes a message serializes to.
///
/// <details>
/// <summary><b>RFC7252 - CoAP Messaging Model</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("2.1"))]
/// </details>
/// <details>
/// <summary><b>RFC7252 - CoAP Message Binary Format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3"))]
/// </details>
///
/// ```
/// use coap_msg::*;
///
/// let packet: Vec<u8> = vec![0x44, 0x01, 0x42, 0x42, 0xDE, 0xAD, 0xBE, 0xEF, 0xBB, 0x2E, 0x77, 0x65, 0x6C, 0x6C, 0x2D,
///                            0x6B, 0x6E, 0x6F, 0x77, 0x6E, 0x04, 0x63, 0x6F, 0x72, 0x65];
///
/// let msg = Message::try_from_bytes(&packet).unwrap();
///
/// let mut expected = Message::new(Type::Con,
///                                 Code::GET,
///                                 Id(16962),
///                                 Token::try_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap());
/// expected.add_opt(Opt::uri_path(".well-known").unwrap());
/// expected.add_opt(Opt::uri_path("core").unwrap());
///
/// assert_eq!(msg, expected);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Message {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  opts: Vec<Opt>,
  /// see [`Payload`]
  pub payload: Payload,
}

impl Message {
  /// Create a new message without options or payload
  pub fn new(ty: Type, code: Code, id: Id, token: Token) -> Self {
    Self { id,
           ty,
           ver: Version::default(),
           token,
           code,
           opts: Vec::new(),
           payload: Payload(Vec::new()) }
  }

  /// Create a new message that ACKs this one.
  ///
  /// This needs an [`Id`] to assign to the newly created message.
  ///
  /// The ACK is an empty message, so it carries no token, options or payload.
  ///
  /// ```
  /// use coap_msg::{Code, Id, Message, Token, Type};
  ///
  /// let req = Message::new(Type::Con, Code::GET, Id(1), Token::opaque(b"req"));
  /// let ack = req.ack(req.id);
  ///
  /// assert_eq!(ack.ty, Type::Ack);
  /// assert_eq!(ack.code, Code::EMPTY);
  /// assert!(ack.token.is_empty());
  /// ```
  pub fn ack(&self, id: Id) -> Self {
    Self::new(Type::Ack, Code::EMPTY, id, Token::default())
  }

  /// Create an empty Reset message rejecting this one
  pub fn reset(&self) -> Self {
    Self::new(Type::Reset, Code::EMPTY, self.id, Token::default())
  }

  /// Whether this is an empty message (code 0.00)
  pub fn is_empty(&self) -> bool {
    self.code.kind() == CodeKind::Empty
  }

  /// The options in this message, sorted by option number
  pub fn opts(&self) -> &[Opt] {
    &self.opts
  }

  /// Add an option, after any options already in the message with the same number
  ///
  /// ```
  /// use coap_msg::*;
  ///
  /// let mut msg = Message::new(Type::Con, Code::GET, Id(1), Token::default());
  /// msg.add_opt(Opt::accept(ContentFormat::Json).unwrap());
  /// msg.add_opt(Opt::uri_path("a").unwrap());
  /// msg.add_opt(Opt::uri_host("example.net").unwrap());
  /// msg.add_opt(Opt::uri_path("b").unwrap());
  ///
  /// let names = msg.opts().iter().map(|o| o.to_string()).collect::<Vec<_>>();
  /// assert_eq!(names,
  ///            vec!["Uri-Host \"example.net\"",
  ///                 "Uri-Path \"a\"",
  ///                 "Uri-Path \"b\"",
  ///                 "Accept 50"]);
  /// ```
  pub fn add_opt(&mut self, opt: Opt) {
    let ix = self.opts.partition_point(|o| o.number() <= opt.number());
    self.opts.insert(ix, opt);
  }

  /// Replace all options in this message
  pub fn set_opts(&mut self, opts: impl IntoIterator<Item = Opt>) {
    let mut opts = opts.into_iter().collect::<Vec<_>>();
    opts.sort_by_key(|o| o.number());
    self.opts = opts;
  }

  /// Get the first option with number `n`
  pub fn get(&self, n: OptNumber) -> Option<&Opt> {
    self.opts.iter().find(|o| o.number() == n)
  }

  /// Get all options with number `n`, in the order they were added
  pub fn get_all(&self, n: OptNumber) -> impl Iterator<Item = &Opt> {
    self.opts.iter().filter(move |o| o.number() == n)
  }

  /// Remove all options with number `n`, yielding the removed options
  pub fn remove(&mut self, n: OptNumber) -> Vec<Opt> {
    let (removed, kept): (Vec<Opt>, Vec<Opt>) =
      core::mem::take(&mut self.opts).into_iter()
                                     .partition(|o| o.number() == n);
    self.opts = kept;
    removed
  }

  /// Parse a message, looking up options in `registry`
  /// rather than [`Registry::global`].
  ///
  /// ```
  /// use coap_msg::*;
  ///
  /// let observe = OptionDef::new(OptNumber(6), "Observe", ValueKind::UInt, 0, 3);
  /// let mut registry = Registry::rfc7252();
  /// registry.register(observe).unwrap();
  ///
  /// //                   Con GET   id=1       delta=6 len=1
  /// let bytes: &[u8] = &[0x40, 0x01, 0x00, 0x01, 0x61, 0x00];
  ///
  /// let msg = Message::try_from_bytes_with(bytes, &registry).unwrap();
  /// assert_eq!(msg.get(OptNumber(6)).unwrap().value(), &OptValue::UInt(0));
  ///
  /// // Observe is elective, so without registering it it's dropped
  /// let msg = Message::try_from_bytes(bytes).unwrap();
  /// assert!(msg.opts().is_empty());
  /// ```
  pub fn try_from_bytes_with<Bytes: AsRef<[u8]>>(bytes: Bytes,
                                                 registry: &Registry)
                                                 -> Result<Self, MessageParseError> {
    let mut bytes = Cursor::new(bytes);

    let byte1 = bytes.next().ok_or_else(MessageParseError::eof)?;
    let code = bytes.next().ok_or_else(MessageParseError::eof)?;
    let id = Id::try_consume_bytes(&mut bytes).map_err(|e| e.with_id(None))?;

    // the id is known from here on; every error carries it
    let fail = |kind: MessageParseErrorKind| kind.with_id(Some(id));

    let Byte1 { tkl, ty, ver } = Byte1::from(byte1);
    let code = Code::from(code);

    if ver != Version(1) {
      return Err(fail(MessageParseErrorKind::InvalidVersion(ver.0)));
    }

    if tkl > 8 {
      return Err(fail(MessageParseErrorKind::InvalidTokenLength(tkl)));
    }

    if !code.class_is_valid() {
      return Err(fail(MessageParseErrorKind::InvalidCodeClass(code.class)));
    }

    if code.kind() == CodeKind::Empty && (tkl > 0 || !bytes.is_exhausted()) {
      return Err(fail(MessageParseErrorKind::EmptyMessageNotEmpty));
    }

    let token = bytes.take_exact(tkl as usize)
                     .and_then(Token::try_from_slice)
                     .ok_or_else(|| fail(MessageParseErrorKind::UnexpectedEndOfStream))?;

    let opts = parse_opts(&mut bytes, registry).map_err(fail)?;

    let payload = match bytes.next() {
      | None => Vec::new(),
      | Some(PAYLOAD_MARKER) if bytes.is_exhausted() => {
        return Err(fail(MessageParseErrorKind::PayloadMarkerWithoutPayload))
      },
      | Some(_) => bytes.take_until_end().to_vec(),
    };

    let msg = Message { id,
                        ty,
                        ver,
                        code,
                        token,
                        opts,
                        payload: Payload(payload) };

    log::trace!("parsed {}", crate::logging::msg_summary(&msg));

    Ok(msg)
  }
}

/// Parse options until the end of the buffer or the payload marker,
/// leaving the cursor pointing at the payload marker (if any).
fn parse_opts<Bytes: AsRef<[u8]>>(bytes: &mut Cursor<Bytes>,
                                  registry: &Registry)
                                  -> Result<Vec<Opt>, MessageParseErrorKind> {
  let mut opts: Vec<Opt> = Vec::new();
  let mut number = 0u32;

  while bytes.peek().map(|b| b != PAYLOAD_MARKER).unwrap_or(false) {
    let RawOpt { delta, value } = RawOpt::try_consume_bytes(bytes)?;

    number += delta.0;
    let num = u16::try_from(number).map(OptNumber)
                                   .map_err(|_| OptParseError::OptionNumberOverflow(number))?;

    let repeated = opts.last().map(|o| o.number() == num).unwrap_or(false);
    let repeatable = registry.get(num).map(|def| def.repeatable).unwrap_or(true);

    if repeated && !repeatable {
      if num.is_critical() {
        return Err(OptionError::new(num, OptionErrorKind::RepeatedCritical).into());
      }

      log::trace!("ignoring repeated occurrence of non-repeatable elective option {}",
                  num);
      continue;
    }

    match registry.create(num, &value)? {
      | Some(opt) => opts.push(opt),
      | None => log::trace!("ignoring unrecognized elective option {}", num),
    }
  }

  Ok(opts)
}

impl<Bytes: AsRef<[u8]>> TryFromBytes<Bytes> for Message {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: Bytes) -> Result<Self, Self::Error> {
    Message::try_from_bytes_with(bytes, Registry::global())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(bytes: &[u8]) -> Result<Message, MessageParseError> {
    Message::try_from_bytes(bytes)
  }

  #[test]
  fn parse_msg() {
    let (expect, msg) = crate::test_msg();
    assert_eq!(parse(&msg).unwrap(), expect)
  }

  #[test]
  fn parse_byte1() {
    let byte = 0b_01_10_0011u8;
    let byte = Byte1::from(byte);
    assert_eq!(byte,
               Byte1 { ver: Version(1),
                       ty: Type::Ack,
                       tkl: 3 })
  }

  #[test]
  fn parse_id() {
    let mut id_bytes = Cursor::new(34u16.to_be_bytes());
    let id = Id::try_consume_bytes(&mut id_bytes).unwrap();
    assert_eq!(id, Id(34));
  }

  #[test]
  fn parse_empty() {
    let msg = parse(&[0x40, 0x00, 0x04, 0xD2]).unwrap();
    assert_eq!(msg, Message::new(Type::Con, Code::EMPTY, Id(1234), Token::default()));
  }

  #[test]
  fn short_header_has_no_id() {
    assert_eq!(parse(&[]), Err(MessageParseError::eof()));
    assert_eq!(parse(&[0x40, 0x01, 0x00]), Err(MessageParseError::eof()));
  }

  #[test]
  fn empty_message_must_be_empty() {
    let cases: [(&[u8], Id); 3] = [(&[0x40, 0x00, 0x10, 0x00, 0xFF, 0x12, 0x34], Id(0x1000)),
                                   (&[0x52, 0x00, 0xAA, 0x55, 0x12, 0x34], Id(0xAA55)),
                                   (&[0x60, 0x00, 0xC3, 0x3C, 0xC1, 0x28], Id(0xC33C))];

    cases.into_iter().for_each(|(bytes, id)| {
                       assert_eq!(parse(bytes),
                                  Err(MessageParseError { id: Some(id),
                                                          kind:
                                                            MessageParseErrorKind::EmptyMessageNotEmpty }))
                     });
  }

  #[test]
  fn empty_message_with_token_length_but_no_token() {
    assert_eq!(parse(&[0x42, 0x00, 0x00, 0x01]).map_err(|e| e.kind),
               Err(MessageParseErrorKind::EmptyMessageNotEmpty));
  }

  #[test]
  fn reserved_code_class() {
    assert_eq!(parse(&[0x40, 0x20, 0x12, 0x34, 0xC1, 0x28]),
               Err(MessageParseError { id: Some(Id(0x1234)),
                                       kind: MessageParseErrorKind::InvalidCodeClass(1) }));
  }

  #[test]
  fn bad_version() {
    assert_eq!(parse(&[0x80, 0x01, 0x00, 0x07]),
               Err(MessageParseError { id: Some(Id(7)),
                                       kind: MessageParseErrorKind::InvalidVersion(2) }));
  }

  #[test]
  fn reserved_token_length() {
    assert_eq!(parse(&[0x49, 0x01, 0x00, 0x07, 0, 0, 0, 0, 0, 0, 0, 0, 0]).map_err(|e| e.kind),
               Err(MessageParseErrorKind::InvalidTokenLength(9)));
  }

  #[test]
  fn truncated_token() {
    assert_eq!(parse(&[0x44, 0x01, 0x00, 0x07, 0xDE, 0xAD]),
               Err(MessageParseError { id: Some(Id(7)),
                                       kind: MessageParseErrorKind::UnexpectedEndOfStream }));
  }

  #[test]
  fn payload_marker_without_payload() {
    assert_eq!(parse(&[0x40, 0x01, 0x00, 0x07, 0xFF]),
               Err(MessageParseError { id: Some(Id(7)),
                                       kind: MessageParseErrorKind::PayloadMarkerWithoutPayload }));

    // after an option
    assert_eq!(parse(&[0x40, 0x01, 0x00, 0x07, 0xB1, b'a', 0xFF]).map_err(|e| e.kind),
               Err(MessageParseErrorKind::PayloadMarkerWithoutPayload));
  }

  #[test]
  fn payload_without_options() {
    let msg = parse(&[0x50, 0x45, 0x00, 0x07, 0xFF, 1, 2, 3]).unwrap();
    assert_eq!(msg.ty, Type::Non);
    assert_eq!(msg.code, Code::CONTENT);
    assert!(msg.opts().is_empty());
    assert_eq!(msg.payload, Payload(vec![1, 2, 3]));
  }

  #[test]
  fn unrecognized_critical_option() {
    // option 9 (delta 9, len 0)
    let err = parse(&[0x40, 0x01, 0x00, 0x07, 0x90]).unwrap_err();
    assert_eq!(err.id, Some(Id(7)));
    assert_eq!(err.bad_option(),
               Some(&OptionError::new(OptNumber(9), OptionErrorKind::UnrecognizedCritical)));
    assert_eq!(err.response_code(), Code::BAD_OPTION);
  }

  #[test]
  fn unrecognized_elective_option_is_dropped() {
    // Uri-Path "a", option 16 (delta 5, len 1), Accept 0 (delta 1, len 0)
    let msg = parse(&[0x40, 0x01, 0x00, 0x07, 0xB1, b'a', 0x51, 0x00, 0x10]).unwrap();
    assert_eq!(msg.opts(),
               &[Opt::uri_path("a").unwrap(),
                 Opt::accept(ContentFormat::Text).unwrap()]);
  }

  #[test]
  fn option_length_out_of_bounds() {
    // Uri-Port with 3 bytes
    let err = parse(&[0x40, 0x01, 0x00, 0x07, 0x73, 1, 2, 3]).unwrap_err();
    assert_eq!(err.bad_option().map(|e| e.kind),
               Some(OptionErrorKind::LengthOutOfBounds { len: 3,
                                                         min: 0,
                                                         max: 2 }));
  }

  #[test]
  fn uint_option_with_leading_zeros() {
    // Uri-Port 5683 sent as 3 bytes
    let msg = parse(&[0x40, 0x01, 0x00, 0x01, 0x73, 0x00, 0x16, 0x33]).unwrap();
    assert_eq!(msg.opts(), &[Opt::uri_port(5683).unwrap()]);
  }

  #[test]
  fn repeated_non_repeatable_options() {
    // Uri-Host twice; critical
    let err = parse(&[0x40, 0x01, 0x00, 0x07, 0x31, b'a', 0x01, b'b']).unwrap_err();
    assert_eq!(err.bad_option(),
               Some(&OptionError::new(OptNumber(3), OptionErrorKind::RepeatedCritical)));

    // Size1 twice; elective, second is dropped
    let msg = parse(&[0x40, 0x01, 0x00, 0x07, 0xD1, 47, 1, 0x01, 2]).unwrap();
    assert_eq!(msg.opts(), &[Opt::size1(1).unwrap()]);
  }

  #[test]
  fn option_number_overflow() {
    // delta 65804
    let err = parse(&[0x40, 0x01, 0x00, 0x07, 0xE0, 0xFF, 0xFF]).unwrap_err();
    assert_eq!(err.kind,
               MessageParseErrorKind::OptParseError(OptParseError::OptionNumberOverflow(65804)));
  }

  #[test]
  fn reserved_option_nibbles() {
    assert_eq!(parse(&[0x40, 0x01, 0x00, 0x07, 0xF1, 0x00]).map_err(|e| e.kind),
               Err(OptParseError::OptionDeltaReservedValue(15).into()));
    assert_eq!(parse(&[0x40, 0x01, 0x00, 0x07, 0x1F, 0x00]).map_err(|e| e.kind),
               Err(OptParseError::ValueLengthReservedValue(15).into()));
  }

  #[test]
  fn add_opt_is_stable() {
    let mut msg = Message::new(Type::Con, Code::GET, Id(1), Token::default());
    msg.add_opt(Opt::uri_query("b=2").unwrap());
    msg.add_opt(Opt::uri_path("x").unwrap());
    msg.add_opt(Opt::uri_query("a=1").unwrap());

    let queries = msg.get_all(known::repeat::QUERY)
                     .map(|o| o.value().as_str().unwrap())
                     .collect::<Vec<_>>();
    assert_eq!(queries, vec!["b=2", "a=1"]);
    assert_eq!(msg.opts()[0].number(), known::repeat::PATH);

    let removed = msg.remove(known::repeat::QUERY);
    assert_eq!(removed.len(), 2);
    assert_eq!(msg.opts().len(), 1);
  }
}
