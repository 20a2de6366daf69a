//! # coap-cursor
//!
//! This microcrate provides [`Cursor`], a reader over a byte buffer
//! that tracks how far into the buffer it has read.
//!
//! It is the moral equivalent of [`std::io::Cursor`] with
//! an API shaped for protocol decoders; reads never fail with an io error,
//! they either yield the bytes asked for or `None`.

// docs
#![doc(html_root_url = "https://docs.rs/coap-cursor/0.1.0")]
// -
// style
#![allow(clippy::unused_unit)]
// -
// deny
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(missing_copy_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
// -
// warnings
#![cfg_attr(not(test), warn(unreachable_pub))]

/// A cursor over a byte array
///
/// ```
/// use coap_cursor::Cursor;
///
/// let mut cur = Cursor::new([0x44u8, 0x01, 0x42, 0x42]);
/// assert_eq!(cur.next(), Some(0x44));
/// assert_eq!(cur.take_exact(2), Some(&[0x01u8, 0x42][..]));
/// assert_eq!(cur.remaining(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor<T> {
  t: T,
  cursor: usize,
}

impl<T: AsRef<[u8]>> Cursor<T> {
  /// Creates a new cursor pointing at the start of `t`
  pub fn new(t: T) -> Cursor<T> {
    Cursor { t, cursor: 0 }
  }

  /// Unwraps the cursor, discarding its internal position
  pub fn into_inner(self) -> T {
    self.t
  }

  fn len(&self) -> usize {
    self.t.as_ref().len()
  }

  /// Take the next byte in the cursor, returning None
  /// if the cursor is exhausted.
  pub fn next(&mut self) -> Option<u8> {
    let b = self.peek()?;
    self.cursor += 1;
    Some(b)
  }

  /// Look at the next byte without advancing the position.
  pub fn peek(&self) -> Option<u8> {
    self.t.as_ref().get(self.cursor).copied()
  }

  /// Take `n` bytes from the cursor, returning None if
  /// there are less than `n` bytes remaining.
  ///
  /// When `None` is returned the position is left untouched.
  pub fn take_exact(&mut self, n: usize) -> Option<&[u8]> {
    if n > self.remaining() {
      return None;
    }

    let start = self.cursor;
    self.cursor += n;
    Some(&self.t.as_ref()[start..start + n])
  }

  /// Consume and yield all remaining bytes
  pub fn take_until_end(&mut self) -> &[u8] {
    let start = self.cursor;
    self.cursor = self.len();
    &self.t.as_ref()[start..]
  }

  /// Number of bytes that have not been consumed yet
  pub fn remaining(&self) -> usize {
    self.len() - self.cursor
  }

  /// Whether every byte in the buffer has been consumed.
  pub fn is_exhausted(&self) -> bool {
    self.remaining() == 0
  }

  /// Get the position the cursor points to within
  /// the buffer
  pub fn position(&self) -> usize {
    self.cursor
  }
}
