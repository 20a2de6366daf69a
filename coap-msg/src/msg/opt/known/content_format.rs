use crate::OptValue;

/// Content-Format
///
/// Used as the value of the Content-Format and Accept options.
///
/// ```
/// use coap_msg::ContentFormat;
///
/// assert_eq!(u16::from(&ContentFormat::LinkFormat), 40);
/// assert_eq!(ContentFormat::from(50), ContentFormat::Json);
/// assert_eq!(ContentFormat::from(11542), ContentFormat::Other(11542));
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFormat {
  /// `text/plain; charset=utf-8`
  Text,
  /// `application/link-format`
  LinkFormat,
  /// `application/xml`
  Xml,
  /// `application/octet-stream`
  OctetStream,
  /// `application/exi`
  Exi,
  /// `application/json`
  Json,
  /// Another content format
  Other(u16),
}

impl ContentFormat {
  /// The media type string registered for this format, if it is one of the RFC7252 formats
  pub fn media_type(&self) -> Option<&'static str> {
    use ContentFormat::*;
    match self {
      | Text => Some("text/plain; charset=utf-8"),
      | LinkFormat => Some("application/link-format"),
      | Xml => Some("application/xml"),
      | OctetStream => Some("application/octet-stream"),
      | Exi => Some("application/exi"),
      | Json => Some("application/json"),
      | Other(_) => None,
    }
  }
}

impl<'a> From<&'a ContentFormat> for u16 {
  fn from(f: &'a ContentFormat) -> Self {
    use ContentFormat::*;
    match *f {
      | Text => 0,
      | LinkFormat => 40,
      | Xml => 41,
      | OctetStream => 42,
      | Exi => 47,
      | Json => 50,
      | Other(n) => n,
    }
  }
}

impl From<ContentFormat> for u16 {
  fn from(f: ContentFormat) -> Self {
    u16::from(&f)
  }
}

impl From<u16> for ContentFormat {
  fn from(n: u16) -> Self {
    use ContentFormat::*;
    match n {
      | 0 => Text,
      | 40 => LinkFormat,
      | 41 => Xml,
      | 42 => OctetStream,
      | 47 => Exi,
      | 50 => Json,
      | n => Other(n),
    }
  }
}

impl From<ContentFormat> for OptValue {
  fn from(f: ContentFormat) -> Self {
    OptValue::UInt(u16::from(f).into())
  }
}
