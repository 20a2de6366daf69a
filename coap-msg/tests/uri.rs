use coap_msg::uri::{opts_from_uri, uri_from_opts};
use coap_msg::*;

#[test]
fn from_uri() {
  let msg = Message::from_uri(Type::Con,
                              Code::GET,
                              Id(1),
                              Token::default(),
                              "coap://example.net/.well-known/core").unwrap();

  assert_eq!(msg.opts(),
             &[Opt::uri_host("example.net").unwrap(),
               Opt::uri_path(".well-known").unwrap(),
               Opt::uri_path("core").unwrap()]);
}

#[test]
fn from_uri_ipv4() {
  let opts = opts_from_uri("coap://198.51.100.1:61616//%2F//?%2F%2F&?%26").unwrap();

  assert_eq!(opts,
             vec![Opt::uri_host("198.51.100.1").unwrap(),
                  Opt::uri_port(61616).unwrap(),
                  Opt::uri_path("").unwrap(),
                  Opt::uri_path("/").unwrap(),
                  Opt::uri_path("").unwrap(),
                  Opt::uri_path("").unwrap(),
                  Opt::uri_query("//").unwrap(),
                  Opt::uri_query("?&").unwrap()]);
}

#[test]
fn from_uri_special_chars() {
  let opts = opts_from_uri("coap://\u{307B}\u{3052}.example/%E3%81%93%E3%82%93%E3%81%AB%E3%81%A1%E3%81%AF").unwrap();

  assert_eq!(opts,
             vec![Opt::uri_host("xn--18j4d.example").unwrap(),
                  Opt::uri_path("\u{3053}\u{3093}\u{306b}\u{3061}\u{306f}").unwrap()]);
}

#[test]
fn to_uri() {
  let host = Opt::uri_host("example.net").unwrap();
  let path = [Opt::uri_path(".well-known").unwrap(), Opt::uri_path("core").unwrap()];

  let with_port = |port: Option<u16>| {
    let mut opts = vec![host.clone()];
    opts.extend(port.map(|p| Opt::uri_port(p).unwrap()));
    opts.extend(path.iter().cloned());
    uri_from_opts(&opts).unwrap()
  };

  assert_eq!(with_port(None), "coap://example.net/.well-known/core");
  assert_eq!(with_port(Some(DEFAULT_SECURE_PORT)),
             "coaps://example.net/.well-known/core");
  assert_eq!(with_port(Some(1234)), "coap://example.net:1234/.well-known/core");
}

#[test]
fn uri_survives_the_wire() {
  let uri = "coap://[2001:db8::1]:61616/a%20b/c?x=1&y";
  let msg = Message::from_uri(Type::Non, Code::PUT, Id(7), Token::opaque(b"t"), uri).unwrap();

  let bytes: Vec<u8> = (&msg).try_into_bytes().unwrap();
  let parsed = Message::try_from_bytes(&bytes).unwrap();

  assert_eq!(parsed, msg);
  assert_eq!(parsed.uri().unwrap(), "coap://[2001:db8::1]:61616/a%20b/c?x%3D1&y");
}

#[test]
fn uri_errors() {
  assert_eq!(opts_from_uri("https://example.net"),
             Err(UriError::UnsupportedScheme("https".into())));
  assert_eq!(uri_from_opts(&[Opt::uri_path("a").unwrap()]),
             Err(UriError::MissingHost));
}
