use toad_macros::rfc_7252_doc;

#[doc = rfc_7252_doc!("5.3.1")]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Token(pub tinyvec::ArrayVec<[u8; 8]>);

impl Token {
  /// Take an arbitrary-length sequence of bytes and turn it into an opaque message token
  ///
  /// Currently uses the BLAKE2 hashing algorithm, but this may change in the future.
  ///
  /// ```
  /// use coap_msg::Token;
  ///
  /// let my_token = Token::opaque(&[0, 1, 2]);
  /// assert_eq!(my_token.len(), 8);
  /// ```
  pub fn opaque(data: &[u8]) -> Token {
    use blake2::digest::consts::U8;
    use blake2::{Blake2b, Digest};

    let mut digest = Blake2b::<U8>::new();
    digest.update(data);
    Token(Into::<[u8; 8]>::into(digest.finalize()).into())
  }

  /// Copy up to 8 bytes into a token, yielding `None` if there are more than 8.
  ///
  /// ```
  /// use coap_msg::Token;
  ///
  /// assert!(Token::try_from_slice(&[0xde, 0xad, 0xbe, 0xef]).is_some());
  /// assert!(Token::try_from_slice(&[0; 9]).is_none());
  /// ```
  pub fn try_from_slice(bytes: &[u8]) -> Option<Token> {
    tinyvec::ArrayVec::try_from(bytes).ok().map(Token)
  }

  /// The token's bytes
  pub fn as_bytes(&self) -> &[u8] {
    self.0.as_slice()
  }

  /// Token length (0-8)
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the token is zero-length
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
