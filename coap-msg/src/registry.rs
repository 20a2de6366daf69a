use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::known::defs;
use crate::{Opt, OptNumber, OptionDef, OptionError, OptionErrorKind, ValueKind};

/// Errors encounterable registering an [`OptionDef`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
  /// `min_len` is larger than `max_len`
  #[error("option {number}: min length {min} is larger than max length {max}")]
  InvalidBounds {
    #[allow(missing_docs)]
    number: OptNumber,
    #[allow(missing_docs)]
    min: u16,
    #[allow(missing_docs)]
    max: u16,
  },
  /// A value of this kind can never be `max_len` bytes long
  /// (empty options must have length 0, uint options at most 4)
  #[error("option {number}: a {kind} value can't be {max} bytes long")]
  MaxLenTooLarge {
    #[allow(missing_docs)]
    number: OptNumber,
    #[allow(missing_docs)]
    kind: ValueKind,
    #[allow(missing_docs)]
    max: u16,
  },
  /// The default value is not of the option's kind
  #[error("option {number}: default value must be {expected}, got {actual}")]
  DefaultWrongKind {
    #[allow(missing_docs)]
    number: OptNumber,
    #[allow(missing_docs)]
    expected: ValueKind,
    #[allow(missing_docs)]
    actual: ValueKind,
  },
}

/// A table of the option definitions a decoder knows about.
///
/// Decoding a message looks up each option number in a registry:
/// - numbers with a definition are decoded into an [`Opt`] of that definition
/// - unknown critical (odd) numbers make the message invalid
/// - unknown elective (even) numbers are skipped
///
/// [`Registry::global`] holds the options defined in RFC7252 and is what
/// [`crate::TryFromBytes`] uses. To understand extension options, build your own
/// registry and decode with [`crate::Message::try_from_bytes_with`].
///
/// ```
/// use coap_msg::{OptNumber, OptionDef, Registry, ValueKind};
///
/// let mut reg = Registry::rfc7252();
/// assert!(reg.get(OptNumber(6)).is_none());
///
/// reg.register(OptionDef::new(OptNumber(6), "Observe", ValueKind::UInt, 0, 3)).unwrap();
/// assert_eq!(reg.get(OptNumber(6)).map(|d| d.name), Some("Observe"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
  defs: BTreeMap<OptNumber, OptionDef>,
}

impl Registry {
  /// A registry that knows no options
  pub fn empty() -> Self {
    Self::default()
  }

  /// A registry containing every option defined in RFC7252
  pub fn rfc7252() -> Self {
    Self { defs: defs::ALL.iter().map(|def| (def.number, *def)).collect() }
  }

  /// The process-wide RFC7252 registry
  pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::rfc7252)
  }

  /// Add an option definition, replacing the existing definition with the same number.
  ///
  /// ```
  /// use coap_msg::{OptNumber, OptionDef, Registry, RegisterError, ValueKind};
  ///
  /// let mut reg = Registry::empty();
  /// let bad = OptionDef::new(OptNumber(6), "Observe", ValueKind::UInt, 0, 8);
  ///
  /// assert_eq!(reg.register(bad),
  ///            Err(RegisterError::MaxLenTooLarge { number: OptNumber(6),
  ///                                                kind: ValueKind::UInt,
  ///                                                max: 8 }));
  /// ```
  pub fn register(&mut self, def: OptionDef) -> Result<(), RegisterError> {
    Self::validate(&def)?;

    match self.defs.insert(def.number, def) {
      | Some(prev) if prev != def => {
        log::debug!("option {} ({}) replaced by {}", def.number, prev.name, def.name)
      },
      | Some(_) => (),
      | None => log::debug!("option {} ({}) registered", def.number, def.name),
    }

    Ok(())
  }

  fn validate(def: &OptionDef) -> Result<(), RegisterError> {
    if def.min_len > def.max_len {
      return Err(RegisterError::InvalidBounds { number: def.number,
                                                min: def.min_len,
                                                max: def.max_len });
    }

    let max_possible = match def.kind {
      | ValueKind::Empty => Some(0),
      | ValueKind::UInt => Some(4),
      | ValueKind::Opaque | ValueKind::String => None,
    };

    if max_possible.map(|max| def.max_len > max).unwrap_or(false) {
      return Err(RegisterError::MaxLenTooLarge { number: def.number,
                                                 kind: def.kind,
                                                 max: def.max_len });
    }

    match def.default.map(|d| d.kind()) {
      | Some(actual) if actual != def.kind => {
        Err(RegisterError::DefaultWrongKind { number: def.number,
                                              expected: def.kind,
                                              actual })
      },
      | _ => Ok(()),
    }
  }

  /// Look up the definition of an option
  pub fn get(&self, number: OptNumber) -> Option<&OptionDef> {
    self.defs.get(&number)
  }

  /// Iterate over all registered definitions, in ascending option number order
  pub fn defs(&self) -> impl Iterator<Item = &OptionDef> {
    self.defs.values()
  }

  /// Decode an option's value bytes using its registered definition.
  ///
  /// Yields `Ok(None)` when the option is unknown and elective (safe to ignore).
  ///
  /// ```
  /// use coap_msg::{OptNumber, OptValue, OptionErrorKind, Registry};
  ///
  /// let reg = Registry::global();
  ///
  /// let path = reg.create(OptNumber(11), b"core").unwrap().unwrap();
  /// assert_eq!(path.value(), &OptValue::String("core".into()));
  ///
  /// assert_eq!(reg.create(OptNumber(16), &[]), Ok(None));
  /// assert_eq!(reg.create(OptNumber(9), &[]).unwrap_err().kind,
  ///            OptionErrorKind::UnrecognizedCritical);
  /// ```
  pub fn create(&self, number: OptNumber, data: &[u8]) -> Result<Option<Opt>, OptionError> {
    match self.get(number) {
      | Some(def) => Opt::decode(*def, data).map(Some),
      | None if number.is_critical() => {
        Err(OptionError::new(number, OptionErrorKind::UnrecognizedCritical))
      },
      | None => Ok(None),
    }
  }
}
