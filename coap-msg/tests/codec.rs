use coap_msg::*;

fn init_logger() {
  simple_logger::init_with_level(log::Level::Trace).ok();
}

fn well_known_core() -> Message {
  let mut msg = Message::new(Type::Con,
                             Code::GET,
                             Id(16962),
                             Token::try_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap());
  msg.add_opt(Opt::uri_path(".well-known").unwrap());
  msg.add_opt(Opt::uri_path("core").unwrap());
  msg
}

const WELL_KNOWN_CORE: [u8; 25] = [0x44, 0x01, 0x42, 0x42, 0xDE, 0xAD, 0xBE, 0xEF, 0xBB, 0x2E,
                                   0x77, 0x65, 0x6C, 0x6C, 0x2D, 0x6B, 0x6E, 0x6F, 0x77, 0x6E,
                                   0x04, 0x63, 0x6F, 0x72, 0x65];

#[test]
fn encode_request() {
  init_logger();
  let bytes: Vec<u8> = well_known_core().try_into_bytes().unwrap();
  assert_eq!(bytes, WELL_KNOWN_CORE);
}

#[test]
fn decode_request() {
  init_logger();
  let msg = Message::try_from_bytes(WELL_KNOWN_CORE).unwrap();

  assert_eq!(msg, well_known_core());
  assert_eq!(msg.code.kind(), CodeKind::Request);
  assert_eq!(msg.get_all(known::repeat::PATH)
                .map(|o| o.value().as_str().unwrap())
                .collect::<Vec<_>>(),
             vec![".well-known", "core"]);
}

#[test]
fn decode_response() {
  init_logger();
  let payload = b"</sensors/temp>;rt=\"temperature-c\";if=\"sensor\"";
  let bytes = [[0x64, 0x45, 0x42, 0x42, 0xDE, 0xAD, 0xBE, 0xEF, 0xC1, 0x28, 0xFF].as_ref(),
               payload.as_ref()].concat();

  let msg = Message::try_from_bytes(&bytes).unwrap();
  assert_eq!(msg.ty, Type::Ack);
  assert_eq!(msg.code, Code::CONTENT);
  assert_eq!(msg.id, Id(0x4242));
  assert_eq!(msg.token.as_bytes(), &[0xDE, 0xAD, 0xBE, 0xEF]);
  assert_eq!(msg.get(known::no_repeat::CONTENT_FORMAT)
                .map(|o| ContentFormat::from(o.value().as_uint().unwrap() as u16)),
             Some(ContentFormat::LinkFormat));
  assert_eq!(msg.payload.0, payload.to_vec());

  let reencoded: Vec<u8> = msg.try_into_bytes().unwrap();
  assert_eq!(reencoded, bytes);
}

#[test]
fn options_are_canonically_ordered() {
  let mut a = Message::new(Type::Con, Code::GET, Id(1), Token::default());
  a.add_opt(Opt::accept(ContentFormat::LinkFormat).unwrap());
  a.add_opt(Opt::uri_path(".well-known").unwrap());
  a.add_opt(Opt::uri_host("example.net").unwrap());
  a.add_opt(Opt::uri_path("core").unwrap());

  let mut b = Message::new(Type::Con, Code::GET, Id(1), Token::default());
  b.set_opts([Opt::uri_host("example.net").unwrap(),
              Opt::uri_path(".well-known").unwrap(),
              Opt::uri_path("core").unwrap(),
              Opt::accept(ContentFormat::LinkFormat).unwrap()]);

  assert_eq!(a, b);
  assert_eq!((&a).try_into_bytes::<Vec<u8>>(), (&b).try_into_bytes::<Vec<u8>>());
}

#[test]
fn delta_boundaries() {
  let mut registry = Registry::rfc7252();
  [13u16, 268, 269, 538].into_iter().for_each(|n| {
                                     registry.register(OptionDef::new(OptNumber(n),
                                                                      "Test",
                                                                      ValueKind::Opaque,
                                                                      0,
                                                                      8))
                                             .unwrap()
                                   });

  let cases: [(u16, &[u8]); 4] = [(13, &[0xD0, 0x00]),
                                  (268, &[0xD0, 0xFF]),
                                  (269, &[0xE0, 0x00, 0x00]),
                                  (538, &[0xE0, 0x01, 0x0D])];

  for (n, opt_bytes) in cases {
    let mut msg = Message::new(Type::Non, Code::POST, Id(9), Token::default());
    msg.add_opt(Opt::new(*registry.get(OptNumber(n)).unwrap(), Vec::<u8>::new()).unwrap());

    let bytes: Vec<u8> = (&msg).try_into_bytes().unwrap();
    assert_eq!(&bytes[4..], opt_bytes, "option {}", n);

    assert_eq!(Message::try_from_bytes_with(&bytes, &registry).unwrap(), msg);
  }
}

#[test]
fn errors_carry_id() {
  init_logger();
  let cases: [(&[u8], Option<Id>, MessageParseErrorKind); 6] =
    [(&[0x40, 0x01], None, MessageParseErrorKind::UnexpectedEndOfStream),
     (&[0x40, 0x00, 0x10, 0x00, 0xFF, 0x12, 0x34],
      Some(Id(0x1000)),
      MessageParseErrorKind::EmptyMessageNotEmpty),
     (&[0x40, 0x01, 0x10, 0x01, 0xFF], Some(Id(0x1001)), MessageParseErrorKind::PayloadMarkerWithoutPayload),
     (&[0x40, 0xC1, 0x10, 0x02], Some(Id(0x1002)), MessageParseErrorKind::InvalidCodeClass(6)),
     (&[0x4A, 0x01, 0x10, 0x03], Some(Id(0x1003)), MessageParseErrorKind::InvalidTokenLength(10)),
     (&[0x40, 0x01, 0x10, 0x04, 0xBD],
      Some(Id(0x1004)),
      OptParseError::UnexpectedEndOfStream.into())];

  for (bytes, id, kind) in cases {
    assert_eq!(Message::try_from_bytes(bytes), Err(MessageParseError { id, kind }));
  }
}

#[test]
fn unrecognized_options() {
  init_logger();

  // Uri-Path "a", unknown critical option 2049
  let critical = [0x40, 0x01, 0x00, 0x01, 0xB1, b'a', 0xE0, 0x06, 0xE9];
  let err = Message::try_from_bytes(critical).unwrap_err();
  assert_eq!(err.id, Some(Id(1)));
  assert_eq!(err.bad_option().map(|e| e.number), Some(OptNumber(2049)));
  assert_eq!(err.response_code(), Code::BAD_OPTION);

  // Uri-Path "a", Size1 1, unknown elective option 2048
  let elective = [0x40, 0x01, 0x00, 0x01, 0xB1, b'a', 0xD1, 36, 1, 0xE0, 0x06, 0xB7];
  let msg = Message::try_from_bytes(elective).unwrap();
  assert_eq!(msg.opts(),
             &[Opt::uri_path("a").unwrap(), Opt::size1(1).unwrap()]);
}

#[test]
fn ack_and_reset() {
  let req = well_known_core();

  let ack: Vec<u8> = req.ack(req.id).try_into_bytes().unwrap();
  assert_eq!(ack, vec![0x60, 0x00, 0x42, 0x42]);

  let rst: Vec<u8> = req.reset().try_into_bytes().unwrap();
  assert_eq!(rst, vec![0x70, 0x00, 0x42, 0x42]);
}
