use crate::Message;

/// One-line description of a message for trace logs,
/// e.g. `Request: Con 0.01 (id 0x0001, 2 options) with 0 byte payload`
pub(crate) fn msg_summary(msg: &Message) -> String {
  format!("{:?}: {:?} {} (id {}, {} options) with {} byte payload",
          msg.code.kind(),
          msg.ty,
          msg.code,
          msg.id,
          msg.opts().len(),
          msg.payload.0.len())
}
