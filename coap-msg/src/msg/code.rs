use core::fmt;

use toad_macros::rfc_7252_doc;

/// Whether a code is for a request, response, or empty message
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CodeKind {
  /// A request code (0.xx)
  Request,
  /// A response code ([2-5].xx)
  Response,
  /// EMPTY (0.00)
  Empty,
  /// A class that RFC7252 reserves (1, 6 and 7)
  Reserved,
}

#[doc = rfc_7252_doc!("12.1")]
/// <details><summary><b>RFC7252 Section 12.1.1 Method Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.1"))]
/// </details>
/// <details><summary><b>RFC7252 Section 12.1.2 Response Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.2"))]
/// </details>
///
/// # Examples
/// ```
/// use coap_msg::Code;
/// assert_eq!(Code { class: 2, detail: 5 }.to_string(), "2.05".to_string())
/// ```
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Code {
  /// The "class" of message codes identify it as a request or response, and provides the class of response status:
  ///
  /// |class|meaning|
  /// |---|---|
  /// |`0`|Message is a request|
  /// |`2`|Message is a success response|
  /// |`4`|Message is a client error response|
  /// |`5`|Message is a server error response|
  pub class: u8,

  /// 2-digit integer (range `[0, 32)`) that provides granular information about the response status.
  ///
  /// Will always be `0` for requests.
  pub detail: u8,
}

impl Code {
  /// Create a new Code
  ///
  /// ```
  /// use coap_msg::Code;
  ///
  /// let content = Code::new(2, 05);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Self {
    Self { class, detail }
  }

  /// Get the human string representation of a message code
  ///
  /// # Returns
  /// A `char` array
  ///
  /// This is to avoid unnecessary heap allocation,
  /// you can create a `String` with `FromIterator::<String>::from_iter`,
  /// or use the [`fmt::Display`] implementation.
  /// ```
  /// use coap_msg::Code;
  ///
  /// let code = Code { class: 2, detail: 5 };
  /// let chars = code.to_human();
  /// let string = String::from_iter(chars);
  /// assert_eq!(string, "2.05".to_string());
  /// ```
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| char::from(b'0' + d % 10);
    [to_char(self.class),
     '.',
     to_char(self.detail / 10),
     to_char(self.detail % 10)]
  }

  /// Whether the class of this code is one RFC7252 assigns meaning to (0, 2, 4 or 5)
  pub const fn class_is_valid(&self) -> bool {
    matches!(self.class, 0 | 2 | 4 | 5)
  }

  /// Get whether this code is for a request, response, or empty message
  ///
  /// ```
  /// use coap_msg::{Code, CodeKind};
  ///
  /// let empty: Code = Code::new(0, 0);
  /// assert_eq!(empty.kind(), CodeKind::Empty);
  ///
  /// let req = Code::GET;
  /// assert_eq!(req.kind(), CodeKind::Request);
  ///
  /// let resp = Code::CONTENT;
  /// assert_eq!(resp.kind(), CodeKind::Response);
  /// ```
  pub fn kind(&self) -> CodeKind {
    match (self.class, self.detail) {
      | (0, 0) => CodeKind::Empty,
      | (0, _) => CodeKind::Request,
      | (2 | 4 | 5, _) => CodeKind::Response,
      | _ => CodeKind::Reserved,
    }
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.class, self.detail)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Self {
    let class = b >> 5;
    let detail = b & 0b0001_1111;

    Code { class, detail }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    let class = code.class << 5;
    let detail = code.detail & 0b0001_1111;

    class | detail
  }
}

macro_rules! code {
  (rfc7252($section:literal) $name:ident = $c:literal.$d:literal) => {
    #[doc = toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: Code = Code::new($c, $d);
  };
  (#[doc = $docstring:expr] $name:ident = $c:literal.$d:literal) => {
    #[doc = $docstring]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: Code = Code::new($c, $d);
  };
}

impl Code {
  code!(#[doc = "Empty message; used for pings, empty ACKs and resets"]
        EMPTY = 0 . 00);
  code!(rfc7252("5.8.1") GET = 0 . 01);
  code!(rfc7252("5.8.2") POST = 0 . 02);
  code!(rfc7252("5.8.3") PUT = 0 . 03);
  code!(rfc7252("5.8.4") DELETE = 0 . 04);

  code!(rfc7252("5.9.1.1") CREATED = 2 . 01);
  code!(rfc7252("5.9.1.2") DELETED = 2 . 02);
  code!(rfc7252("5.9.1.3") VALID = 2 . 03);
  code!(rfc7252("5.9.1.4") CHANGED = 2 . 04);
  code!(rfc7252("5.9.1.5") CONTENT = 2 . 05);

  code!(rfc7252("5.9.2.1") BAD_REQUEST = 4 . 00);
  code!(rfc7252("5.9.2.2") UNAUTHORIZED = 4 . 01);
  code!(rfc7252("5.9.2.3") BAD_OPTION = 4 . 02);
  code!(rfc7252("5.9.2.4") FORBIDDEN = 4 . 03);
  code!(rfc7252("5.9.2.5") NOT_FOUND = 4 . 04);
  code!(rfc7252("5.9.2.6") METHOD_NOT_ALLOWED = 4 . 05);
  code!(rfc7252("5.9.2.7") NOT_ACCEPTABLE = 4 . 06);
  code!(rfc7252("5.9.2.8") PRECONDITION_FAILED = 4 . 12);
  code!(rfc7252("5.9.2.9") REQUEST_ENTITY_TOO_LARGE = 4 . 13);
  code!(rfc7252("5.9.2.10") UNSUPPORTED_CONTENT_FORMAT = 4 . 15);

  code!(rfc7252("5.9.3.1") INTERNAL_SERVER_ERROR = 5 . 00);
  code!(rfc7252("5.9.3.2") NOT_IMPLEMENTED = 5 . 01);
  code!(rfc7252("5.9.3.3") BAD_GATEWAY = 5 . 02);
  code!(rfc7252("5.9.3.4") SERVICE_UNAVAILABLE = 5 . 03);
  code!(rfc7252("5.9.3.5") GATEWAY_TIMEOUT = 5 . 04);
  code!(rfc7252("5.9.3.6") PROXYING_NOT_SUPPORTED = 5 . 05);
}
