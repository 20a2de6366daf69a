//! Mapping between `coap://` / `coaps://` URIs and the
//! Uri-Host, Uri-Port, Uri-Path and Uri-Query options
//! ([RFC7252 Section 6.4 & 6.5](https://datatracker.ietf.org/doc/html/rfc7252#section-6.4)).

use crate::known::{no_repeat, repeat};
use crate::{Code, Id, Message, Opt, Token, Type, ValueCastError};

/// Port used by `coap://` URIs that don't name one
pub const DEFAULT_PORT: u16 = 5683;

/// Port used by `coaps://` URIs that don't name one
pub const DEFAULT_SECURE_PORT: u16 = 5684;

/// Errors encounterable converting between URIs and options
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
  /// The scheme was neither `coap` nor `coaps`
  #[error("unsupported URI scheme {0:?}")]
  UnsupportedScheme(String),
  /// The URI didn't start with `scheme:`
  #[error("URI has no scheme")]
  MissingScheme,
  /// The URI had no authority, or there was no Uri-Host option
  #[error("URI has no host")]
  MissingHost,
  /// The URI contained `user@`
  #[error("CoAP URIs may not contain user information")]
  UserInfo,
  /// The URI contained `#fragment`
  #[error("CoAP URIs may not contain a fragment")]
  Fragment,
  /// The port was not a 16-bit decimal integer
  #[error("invalid port {0:?}")]
  InvalidPort(String),
  /// A path segment or query parameter didn't decode to UTF-8
  #[error("{0:?} does not percent-decode to valid UTF-8")]
  InvalidPercentEncoding(String),
  /// The host could not be converted to ASCII
  #[error("invalid internationalized host {0:?}")]
  Idna(String),
  /// A URI component can't be represented as an option value
  #[error(transparent)]
  InvalidOption(#[from] ValueCastError),
}

struct Authority<'a> {
  host: &'a str,
  port: Option<&'a str>,
}

fn split_authority(authority: &str) -> Result<Authority<'_>, UriError> {
  if authority.contains('@') {
    return Err(UriError::UserInfo);
  }

  let (host, port) = match authority.strip_prefix('[') {
    | Some(ip_literal) => {
      let (host, rest) = ip_literal.split_once(']').ok_or(UriError::MissingHost)?;
      match rest {
        | "" => (host, None),
        | rest => {
          let port = rest.strip_prefix(':')
                         .ok_or_else(|| UriError::InvalidPort(rest.to_string()))?;
          (host, Some(port))
        },
      }
    },
    | None => match authority.split_once(':') {
      | Some((host, port)) => (host, Some(port)),
      | None => (authority, None),
    },
  };

  Ok(Authority { host, port })
}

fn decode(component: &str) -> Result<String, UriError> {
  urlencoding::decode(component).map(|s| s.into_owned())
                                .map_err(|_| UriError::InvalidPercentEncoding(component.to_string()))
}

/// Decompose a URI into Uri-Host, Uri-Port, Uri-Path and Uri-Query options.
///
/// Uri-Port is only present when the port isn't the scheme's default, and
/// non-ASCII hosts are converted to punycode.
///
/// ```
/// use coap_msg::uri::opts_from_uri;
/// use coap_msg::Opt;
///
/// let opts = opts_from_uri("coap://example.net:1234/.well-known/core?rt=temp").unwrap();
/// assert_eq!(opts,
///            vec![Opt::uri_host("example.net").unwrap(),
///                 Opt::uri_port(1234).unwrap(),
///                 Opt::uri_path(".well-known").unwrap(),
///                 Opt::uri_path("core").unwrap(),
///                 Opt::uri_query("rt=temp").unwrap()]);
/// ```
pub fn opts_from_uri(uri: &str) -> Result<Vec<Opt>, UriError> {
  let (scheme, rest) = uri.split_once(':').ok_or(UriError::MissingScheme)?;

  let default_port = match scheme.to_ascii_lowercase().as_str() {
    | "coap" => DEFAULT_PORT,
    | "coaps" => DEFAULT_SECURE_PORT,
    | "" => return Err(UriError::MissingScheme),
    | _ => return Err(UriError::UnsupportedScheme(scheme.to_string())),
  };

  if rest.contains('#') {
    return Err(UriError::Fragment);
  }

  let rest = rest.strip_prefix("//").ok_or(UriError::MissingHost)?;
  let authority_end = rest.find(|c: char| c == '/' || c == '?').unwrap_or(rest.len());
  let (authority, rest) = rest.split_at(authority_end);
  let (path, query) = match rest.split_once('?') {
    | Some((path, query)) => (path, Some(query)),
    | None => (rest, None),
  };

  let Authority { host, port } = split_authority(authority)?;

  let port = match port {
    | None | Some("") => default_port,
    | Some(port) => port.parse::<u16>()
                        .map_err(|_| UriError::InvalidPort(port.to_string()))?,
  };

  let mut opts = Vec::new();

  if !host.is_empty() {
    let host = if host.is_ascii() {
      host.to_string()
    } else {
      idna::domain_to_ascii(host).map_err(|_| UriError::Idna(host.to_string()))?
    };

    opts.push(Opt::uri_host(&host)?);
  }

  if port != default_port {
    opts.push(Opt::uri_port(port)?);
  }

  let path = path.strip_prefix('/').unwrap_or(path);
  if !path.is_empty() {
    for segment in path.split('/') {
      opts.push(Opt::uri_path(&decode(segment)?)?);
    }
  }

  if let Some(query) = query.filter(|q| !q.is_empty()) {
    for param in query.split('&') {
      opts.push(Opt::uri_query(&decode(param)?)?);
    }
  }

  Ok(opts)
}

/// Build a URI from the Uri-Host, Uri-Port, Uri-Path and Uri-Query options in `opts`.
///
/// The scheme is `coaps` when the port is [`DEFAULT_SECURE_PORT`], `coap` otherwise.
///
/// A lone empty Uri-Path renders as `coap://host/`, which [`opts_from_uri`]
/// reads back with no Uri-Path options at all.
///
/// ```
/// use coap_msg::uri::uri_from_opts;
/// use coap_msg::Opt;
///
/// let opts = [Opt::uri_host("example.net").unwrap(),
///             Opt::uri_port(5684).unwrap(),
///             Opt::uri_path(".well-known").unwrap(),
///             Opt::uri_path("core").unwrap()];
///
/// assert_eq!(uri_from_opts(&opts).unwrap(), "coaps://example.net/.well-known/core");
/// ```
pub fn uri_from_opts<'a>(opts: impl IntoIterator<Item = &'a Opt>) -> Result<String, UriError> {
  let mut host = None;
  let mut port = None;
  let mut path = Vec::new();
  let mut query = Vec::new();

  for opt in opts {
    match opt.number() {
      | no_repeat::HOST => host = Some(opt.value().as_str()?),
      | no_repeat::PORT => port = Some(opt.value().as_uint()?),
      | repeat::PATH => path.push(urlencoding::encode(opt.value().as_str()?)),
      | repeat::QUERY => query.push(urlencoding::encode(opt.value().as_str()?)),
      | _ => (),
    }
  }

  let host = host.ok_or(UriError::MissingHost)?;
  let port = match port {
    | None => DEFAULT_PORT,
    | Some(port) => u16::try_from(port).map_err(|_| UriError::InvalidPort(port.to_string()))?,
  };

  let mut uri = String::from(if port == DEFAULT_SECURE_PORT {
                               "coaps://"
                             } else {
                               "coap://"
                             });

  if host.contains(':') {
    uri.push('[');
    uri.push_str(host);
    uri.push(']');
  } else {
    uri.push_str(host);
  }

  if port != DEFAULT_PORT && port != DEFAULT_SECURE_PORT {
    uri.push(':');
    uri.push_str(&port.to_string());
  }

  uri.push('/');
  uri.push_str(&path.join("/"));

  if !query.is_empty() {
    uri.push('?');
    uri.push_str(&query.join("&"));
  }

  Ok(uri)
}

impl Message {
  /// Create a message addressed to `uri`
  ///
  /// ```
  /// use coap_msg::{known, Code, Id, Message, Token, Type};
  ///
  /// let msg = Message::from_uri(Type::Con,
  ///                             Code::GET,
  ///                             Id(1),
  ///                             Token::default(),
  ///                             "coap://example.net/.well-known/core").unwrap();
  ///
  /// assert_eq!(msg.get_all(known::repeat::PATH).count(), 2);
  /// assert_eq!(msg.uri().unwrap(), "coap://example.net/.well-known/core");
  /// ```
  pub fn from_uri(ty: Type, code: Code, id: Id, token: Token, uri: &str) -> Result<Self, UriError> {
    let mut msg = Self::new(ty, code, id, token);
    msg.set_uri(uri)?;
    Ok(msg)
  }

  /// Replace the Uri-Host, Uri-Port, Uri-Path and Uri-Query options of this message
  /// with those describing `uri`.
  ///
  /// If `uri` is invalid the message is left unchanged.
  pub fn set_uri(&mut self, uri: &str) -> Result<(), UriError> {
    let opts = opts_from_uri(uri)?;

    for n in [no_repeat::HOST, no_repeat::PORT, repeat::PATH, repeat::QUERY] {
      self.remove(n);
    }

    opts.into_iter().for_each(|o| self.add_opt(o));

    Ok(())
  }

  /// The URI this message is addressed to
  pub fn uri(&self) -> Result<String, UriError> {
    uri_from_opts(self.opts())
  }
}
