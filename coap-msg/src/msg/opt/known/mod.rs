use crate::{Opt, OptValue, ValueCastError};

/// Content-Format values
pub mod content_format;
pub use content_format::*;

macro_rules! opt {
  (rfc7252($section:literal) $name:ident = $n:literal) => {
    #[doc = ::toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
  (#[doc = $doc:expr] $name:ident = $n:literal) => {
    #[doc = $doc]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
}

pub(crate) use opt;

/// Non-repeatable options
pub mod no_repeat {
  use super::opt;

  opt!(rfc7252("5.10.1") HOST = 3);
  opt!(rfc7252("5.10.8.2") IF_NONE_MATCH = 5);
  opt!(#[doc = "See [`HOST`]"]
       PORT = 7);
  opt!(rfc7252("5.10.3") CONTENT_FORMAT = 12);
  opt!(rfc7252("5.10.5") MAX_AGE = 14);
  opt!(rfc7252("5.10.4") ACCEPT = 17);
  opt!(rfc7252("5.10.2") PROXY_URI = 35);
  opt!(#[doc = "See [`PROXY_URI`]"]
       PROXY_SCHEME = 39);
  opt!(rfc7252("5.10.9") SIZE1 = 60);
}

/// Repeatable options
pub mod repeat {
  use super::opt;

  opt!(rfc7252("5.10.8.1") IF_MATCH = 1);
  opt!(rfc7252("5.10.7") LOCATION_PATH = 8);
  opt!(#[doc = "See [`super::no_repeat::HOST`]"]
       PATH = 11);
  opt!(#[doc = "See [`super::no_repeat::HOST`]"]
       QUERY = 15);
  opt!(#[doc = "See [`LOCATION_PATH`]"]
       LOCATION_QUERY = 20);
  opt!(#[doc = concat!(
                toad_macros::rfc_7252_doc!("5.10.6"),
                "\n<details><summary>ETag as a Request Option</summary>\n\n",
                toad_macros::rfc_7252_doc!("5.10.6.2"),
                "\n</details><details><summary>ETag as a Response Option</summary>\n\n",
                toad_macros::rfc_7252_doc!("5.10.6.1"),
                "</details>"
      )]
       ETAG = 4);
}

/// Definitions of every option in RFC7252 Section 5.10
///
/// | No. | Name           | Format | Length | Repeatable | Default |
/// |-----|----------------|--------|--------|------------|---------|
/// |   1 | If-Match       | opaque | 0-8    | yes        |         |
/// |   3 | Uri-Host       | string | 1-255  |            |         |
/// |   4 | ETag           | opaque | 1-8    | yes        |         |
/// |   5 | If-None-Match  | empty  | 0      |            |         |
/// |   7 | Uri-Port       | uint   | 0-2    |            |         |
/// |   8 | Location-Path  | string | 0-255  | yes        |         |
/// |  11 | Uri-Path       | string | 0-255  | yes        |         |
/// |  12 | Content-Format | uint   | 0-2    |            |         |
/// |  14 | Max-Age        | uint   | 0-4    |            | 60      |
/// |  15 | Uri-Query      | string | 0-255  | yes        |         |
/// |  17 | Accept         | uint   | 0-2    |            |         |
/// |  20 | Location-Query | string | 0-255  | yes        |         |
/// |  35 | Proxy-Uri      | string | 1-1034 |            |         |
/// |  39 | Proxy-Scheme   | string | 1-255  |            |         |
/// |  60 | Size1          | uint   | 0-4    |            |         |
pub mod defs {
  use super::{no_repeat, repeat};
  use crate::{DefaultValue, OptionDef, ValueKind};

  #[allow(missing_docs)]
  pub const IF_MATCH: OptionDef =
    OptionDef::new(repeat::IF_MATCH, "If-Match", ValueKind::Opaque, 0, 8).repeatable();
  #[allow(missing_docs)]
  pub const URI_HOST: OptionDef =
    OptionDef::new(no_repeat::HOST, "Uri-Host", ValueKind::String, 1, 255);
  #[allow(missing_docs)]
  pub const ETAG: OptionDef =
    OptionDef::new(repeat::ETAG, "ETag", ValueKind::Opaque, 1, 8).repeatable();
  #[allow(missing_docs)]
  pub const IF_NONE_MATCH: OptionDef =
    OptionDef::new(no_repeat::IF_NONE_MATCH, "If-None-Match", ValueKind::Empty, 0, 0);
  #[allow(missing_docs)]
  pub const URI_PORT: OptionDef =
    OptionDef::new(no_repeat::PORT, "Uri-Port", ValueKind::UInt, 0, 2);
  #[allow(missing_docs)]
  pub const LOCATION_PATH: OptionDef =
    OptionDef::new(repeat::LOCATION_PATH, "Location-Path", ValueKind::String, 0, 255).repeatable();
  #[allow(missing_docs)]
  pub const URI_PATH: OptionDef =
    OptionDef::new(repeat::PATH, "Uri-Path", ValueKind::String, 0, 255).repeatable();
  #[allow(missing_docs)]
  pub const CONTENT_FORMAT: OptionDef =
    OptionDef::new(no_repeat::CONTENT_FORMAT, "Content-Format", ValueKind::UInt, 0, 2);
  #[allow(missing_docs)]
  pub const MAX_AGE: OptionDef =
    OptionDef::new(no_repeat::MAX_AGE, "Max-Age", ValueKind::UInt, 0, 4)
      .with_default(DefaultValue::UInt(60));
  #[allow(missing_docs)]
  pub const URI_QUERY: OptionDef =
    OptionDef::new(repeat::QUERY, "Uri-Query", ValueKind::String, 0, 255).repeatable();
  #[allow(missing_docs)]
  pub const ACCEPT: OptionDef =
    OptionDef::new(no_repeat::ACCEPT, "Accept", ValueKind::UInt, 0, 2);
  #[allow(missing_docs)]
  pub const LOCATION_QUERY: OptionDef =
    OptionDef::new(repeat::LOCATION_QUERY, "Location-Query", ValueKind::String, 0, 255).repeatable();
  #[allow(missing_docs)]
  pub const PROXY_URI: OptionDef =
    OptionDef::new(no_repeat::PROXY_URI, "Proxy-Uri", ValueKind::String, 1, 1034);
  #[allow(missing_docs)]
  pub const PROXY_SCHEME: OptionDef =
    OptionDef::new(no_repeat::PROXY_SCHEME, "Proxy-Scheme", ValueKind::String, 1, 255);
  #[allow(missing_docs)]
  pub const SIZE1: OptionDef = OptionDef::new(no_repeat::SIZE1, "Size1", ValueKind::UInt, 0, 4);

  /// All of the above, in ascending option number order
  pub const ALL: [OptionDef; 15] = [IF_MATCH,
                                    URI_HOST,
                                    ETAG,
                                    IF_NONE_MATCH,
                                    URI_PORT,
                                    LOCATION_PATH,
                                    URI_PATH,
                                    CONTENT_FORMAT,
                                    MAX_AGE,
                                    URI_QUERY,
                                    ACCEPT,
                                    LOCATION_QUERY,
                                    PROXY_URI,
                                    PROXY_SCHEME,
                                    SIZE1];
}

macro_rules! ctor {
  ($(#[doc = $doc:expr])* fn $name:ident($arg:ident: $t:ty) => $def:ident) => {
    $(#[doc = $doc])*
    pub fn $name($arg: $t) -> Result<Opt, ValueCastError> {
      Opt::new(defs::$def, $arg)
    }
  };
}

impl Opt {
  ctor!(#[doc = "Create an If-Match option (see [`repeat::IF_MATCH`])"]
        fn if_match(etag: &[u8]) => IF_MATCH);
  ctor!(#[doc = "Create a Uri-Host option (see [`no_repeat::HOST`])"]
        fn uri_host(host: &str) => URI_HOST);
  ctor!(#[doc = "Create an ETag option (see [`repeat::ETAG`])"]
        fn etag(etag: &[u8]) => ETAG);
  ctor!(#[doc = "Create a Uri-Port option (see [`no_repeat::PORT`])"]
        fn uri_port(port: u16) => URI_PORT);
  ctor!(#[doc = "Create a Location-Path option (see [`repeat::LOCATION_PATH`])"]
        fn location_path(segment: &str) => LOCATION_PATH);
  ctor!(#[doc = "Create a Uri-Path option (see [`repeat::PATH`])"]
        fn uri_path(segment: &str) => URI_PATH);
  ctor!(#[doc = "Create a Content-Format option (see [`no_repeat::CONTENT_FORMAT`])"]
        fn content_format(format: ContentFormat) => CONTENT_FORMAT);
  ctor!(#[doc = "Create a Max-Age option (see [`no_repeat::MAX_AGE`])"]
        fn max_age(seconds: u32) => MAX_AGE);
  ctor!(#[doc = "Create a Uri-Query option (see [`repeat::QUERY`])"]
        fn uri_query(param: &str) => URI_QUERY);
  ctor!(#[doc = "Create an Accept option (see [`no_repeat::ACCEPT`])"]
        fn accept(format: ContentFormat) => ACCEPT);
  ctor!(#[doc = "Create a Location-Query option (see [`repeat::LOCATION_QUERY`])"]
        fn location_query(param: &str) => LOCATION_QUERY);
  ctor!(#[doc = "Create a Proxy-Uri option (see [`no_repeat::PROXY_URI`])"]
        fn proxy_uri(uri: &str) => PROXY_URI);
  ctor!(#[doc = "Create a Proxy-Scheme option (see [`no_repeat::PROXY_SCHEME`])"]
        fn proxy_scheme(scheme: &str) => PROXY_SCHEME);
  ctor!(#[doc = "Create a Size1 option (see [`no_repeat::SIZE1`])"]
        fn size1(size: u32) => SIZE1);

  /// Create an If-None-Match option (see [`no_repeat::IF_NONE_MATCH`])
  pub fn if_none_match() -> Opt {
    Opt { def: defs::IF_NONE_MATCH,
          value: OptValue::Empty }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{OptNumber, Registry};

  #[test]
  fn builtin_defs_are_valid_and_sorted() {
    let mut reg = Registry::empty();
    defs::ALL.iter()
             .try_for_each(|def| reg.register(*def))
             .unwrap();

    assert!(defs::ALL.windows(2).all(|w| w[0].number < w[1].number));
  }

  #[test]
  fn repeatable_matches_module() {
    [defs::IF_MATCH,
     defs::ETAG,
     defs::LOCATION_PATH,
     defs::URI_PATH,
     defs::URI_QUERY,
     defs::LOCATION_QUERY].into_iter()
                          .for_each(|def| assert!(def.repeatable, "{}", def.name));

    assert_eq!(defs::ALL.iter().filter(|d| d.repeatable).count(), 6);
  }

  #[test]
  fn constructors() {
    assert_eq!(Opt::content_format(ContentFormat::LinkFormat).unwrap()
                                                              .value_bytes(),
               vec![40]);
    assert_eq!(Opt::accept(ContentFormat::Other(11542)).unwrap()
                                                        .value(),
               &OptValue::UInt(11542));
    assert_eq!(Opt::if_none_match().number(), OptNumber(5));
    assert!(Opt::etag(&[]).is_err());
    assert!(Opt::etag(&[0; 9]).is_err());
    assert!(Opt::if_match(&[]).is_ok());
    assert!(Opt::proxy_uri(&"a".repeat(1034)).is_ok());
    assert!(Opt::proxy_uri(&"a".repeat(1035)).is_err());
  }
}
