use core::fmt;
use core::hash::{Hash, Hasher};

use super::*;

/// Describes a kind of option: its number, how its value is encoded,
/// the lengths its value may have and whether it may be repeated.
///
/// Every option defined in RFC7252 has a definition in [`crate::known::defs`],
/// and definitions for other options (e.g. from CoAP extensions) can be
/// registered with a [`crate::Registry`].
///
/// Properties that are derived from the option number (critical, unsafe,
/// no-cache-key) are not stored; see [`OptNumber`].
///
/// ```
/// use coap_msg::{OptionDef, OptNumber, ValueKind, DefaultValue};
///
/// const OBSERVE: OptionDef = OptionDef::new(OptNumber(6), "Observe", ValueKind::UInt, 0, 3);
/// const MAX_AGE: OptionDef =
///   OptionDef::new(OptNumber(14), "Max-Age", ValueKind::UInt, 0, 4).with_default(DefaultValue::UInt(60));
///
/// assert!(!OBSERVE.repeatable);
/// assert_eq!(MAX_AGE.default, Some(DefaultValue::UInt(60)));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct OptionDef {
  /// The option number this definition applies to
  pub number: OptNumber,
  /// Human-readable name, e.g. `"Uri-Path"`
  pub name: &'static str,
  /// How the value is encoded
  pub kind: ValueKind,
  /// Minimum encoded length of the value, in bytes
  pub min_len: u16,
  /// Maximum encoded length of the value, in bytes
  pub max_len: u16,
  /// Whether the option may occur more than once in a message
  pub repeatable: bool,
  /// Value assumed when the option is absent
  pub default: Option<DefaultValue>,
}

impl OptionDef {
  /// Define a non-repeatable option without a default value
  pub const fn new(number: OptNumber,
                   name: &'static str,
                   kind: ValueKind,
                   min_len: u16,
                   max_len: u16)
                   -> Self {
    Self { number,
           name,
           kind,
           min_len,
           max_len,
           repeatable: false,
           default: None }
  }

  /// Allow the option to be repeated
  pub const fn repeatable(mut self) -> Self {
    self.repeatable = true;
    self
  }

  /// Give the option a default value
  pub const fn with_default(mut self, default: DefaultValue) -> Self {
    self.default = Some(default);
    self
  }

  /// Whether a value `len` bytes long is acceptable for this option
  pub fn len_in_bounds(&self, len: usize) -> bool {
    (usize::from(self.min_len)..=usize::from(self.max_len)).contains(&len)
  }
}

/// # `Opt` struct
/// A CoAP Option; an [`OptionDef`] paired with a value of the kind the definition requires.
///
/// `Opt`s can only be created with a value of the right kind and length,
/// either with [`Opt::new`], one of the constructors for known options
/// (e.g. [`Opt::uri_path`]) or by decoding bytes with [`Opt::decode`].
///
/// Two `Opt`s are equal when their numbers and values are equal.
///
/// ```
/// use coap_msg::{known, Opt, OptValue};
///
/// let path = Opt::uri_path("core").unwrap();
/// assert_eq!(path.number(), known::repeat::PATH);
/// assert_eq!(path.value(), &OptValue::String("core".into()));
/// assert_eq!(path, Opt::new(known::defs::URI_PATH, "core").unwrap());
///
/// // Uri-Port is a uint option
/// assert!(Opt::new(known::defs::URI_PORT, "core").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Opt {
  pub(crate) def: OptionDef,
  pub(crate) value: OptValue,
}

impl Opt {
  fn check(def: &OptionDef, value: &OptValue) -> Result<(), ValueCastError> {
    if value.kind() != def.kind {
      return Err(ValueCastError::WrongKind { expected: def.kind,
                                             actual: value.kind() });
    }

    if !def.len_in_bounds(value.len()) {
      return Err(ValueCastError::LengthOutOfBounds { number: def.number,
                                                     len: value.len(),
                                                     min: def.min_len,
                                                     max: def.max_len });
    }

    Ok(())
  }

  /// Create an option from a definition and a value
  pub fn new(def: OptionDef, value: impl Into<OptValue>) -> Result<Self, ValueCastError> {
    let value = value.into();
    Self::check(&def, &value)?;
    Ok(Self { def, value })
  }

  /// Decode the bytes of an option value from the wire
  ///
  /// UInt values may arrive with leading zero bytes; their length
  /// is checked after those are stripped.
  pub fn decode(def: OptionDef, bytes: &[u8]) -> Result<Self, OptionError> {
    let out_of_bounds = |len: usize| {
      OptionError::new(def.number,
                       OptionErrorKind::LengthOutOfBounds { len,
                                                            min: def.min_len,
                                                            max: def.max_len })
    };

    if def.kind != ValueKind::UInt && !def.len_in_bounds(bytes.len()) {
      return Err(out_of_bounds(bytes.len()));
    }

    let value =
      OptValue::decode(def.kind, bytes).map_err(|e| OptionError::new(def.number, e))?;

    match value.len() {
      | len if def.kind == ValueKind::UInt && !def.len_in_bounds(len) => Err(out_of_bounds(len)),
      | _ => Ok(Self { def, value }),
    }
  }

  /// The definition of this option
  pub fn def(&self) -> &OptionDef {
    &self.def
  }

  /// The option number
  pub fn number(&self) -> OptNumber {
    self.def.number
  }

  /// The option value
  pub fn value(&self) -> &OptValue {
    &self.value
  }

  /// Unwrap the option into its value
  pub fn into_value(self) -> OptValue {
    self.value
  }

  /// Replace the value of this option
  pub fn set_value(&mut self, value: impl Into<OptValue>) -> Result<(), ValueCastError> {
    let value = value.into();
    Self::check(&self.def, &value)?;
    self.value = value;
    Ok(())
  }

  /// The default value of this option, if its definition has one
  pub fn default_value(&self) -> Option<OptValue> {
    self.def.default.map(OptValue::from)
  }

  /// Number of bytes the value occupies on the wire
  pub fn len(&self) -> usize {
    self.value.len()
  }

  /// Whether the value is zero bytes long on the wire
  pub fn is_empty(&self) -> bool {
    self.value.is_empty()
  }

  /// Encode the value of this option
  pub fn value_bytes(&self) -> Vec<u8> {
    self.value.to_bytes()
  }
}

impl PartialEq for Opt {
  fn eq(&self, other: &Self) -> bool {
    self.number() == other.number() && self.value == other.value
  }
}

impl Eq for Opt {}

impl Hash for Opt {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.number().hash(state);
    self.value.hash(state);
  }
}

impl fmt::Display for Opt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.def.name, self.value)
  }
}
