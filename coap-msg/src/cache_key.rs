use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use toad_hash::Blake2Hasher;

use crate::Message;

/// Default hasher used for [`CacheKey`]
///
/// Hashes:
///  - [Message Code](crate::Message::code)
///  - every option that is part of the cache key (see [`crate::OptNumber::include_in_cache_key`])
#[derive(Debug, Clone, Default)]
pub struct DefaultCacheKey(Blake2Hasher);

impl DefaultCacheKey {
  /// Create a new `DefaultCacheKey`
  pub fn new() -> Self {
    Self::default()
  }
}

impl CacheKey for DefaultCacheKey {
  type Hasher = Blake2Hasher;

  fn hasher(&mut self) -> &mut Self::Hasher {
    &mut self.0
  }

  fn add_cache_key(&mut self, msg: &Message) {
    msg.code.hash(&mut self.0);
    msg.opts()
       .iter()
       .filter(|opt| opt.number().include_in_cache_key())
       .for_each(|opt| opt.hash(&mut self.0));
  }
}

/// The cache key can be used to compare messages for representing
/// the same action against the same resource; for example requests
/// with different IDs but the same method and cache-key affecting options
/// (ex. path, query parameters) will yield the same cache-key.
///
/// Extends [`core::hash::Hash`] with the ability to build a cache-key of a message
/// in the hasher's state.
///
/// [`DefaultCacheKey`] Provides a default implementation.
pub trait CacheKey
  where Self: Sized + Debug
{
  /// Type used to generate hashes
  type Hasher: Hasher;

  #[allow(missing_docs)]
  fn hasher(&mut self) -> &mut Self::Hasher;

  /// Add this message's cache key to the hasher's internal state.
  ///
  /// After invoking this, to get the [`u64`] hash use [`Hasher::finish`].
  ///
  /// Alternately, use [`CacheKey::cache_key`] to go directly to the [`u64`] hash.
  fn add_cache_key(&mut self, msg: &Message);

  /// Add this message's cache key to the hasher's internal state and yield the [`u64`] hash.
  ///
  /// ```
  /// use coap_msg::Type::Con;
  /// use coap_msg::{CacheKey, Code, DefaultCacheKey, Id, Message, Opt, Token};
  ///
  /// let mut msg_a = Message::new(Con, Code::GET, Id(1), Token::opaque(b"a"));
  /// msg_a.add_opt(Opt::uri_path("temp").unwrap());
  ///
  /// let mut msg_b = Message::new(Con, Code::GET, Id(2), Token::opaque(b"b"));
  /// msg_b.add_opt(Opt::uri_path("temp").unwrap());
  ///
  /// assert_eq!(DefaultCacheKey::new().cache_key(&msg_a),
  ///            DefaultCacheKey::new().cache_key(&msg_b));
  /// ```
  fn cache_key(&mut self, msg: &Message) -> u64 {
    self.add_cache_key(msg);
    self.hasher().finish()
  }
}

impl<T> CacheKey for &mut T where T: CacheKey
{
  type Hasher = T::Hasher;

  fn hasher(&mut self) -> &mut Self::Hasher {
    <T as CacheKey>::hasher(self)
  }

  fn add_cache_key(&mut self, msg: &Message) {
    <T as CacheKey>::add_cache_key(self, msg)
  }
}
