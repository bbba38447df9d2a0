/// Maximum depth of open containers a message may nest.
///
/// Both the binary parser and the JSON tokeniser read recursively, so the
/// limit also bounds their call-stack usage: each open container costs O(1)
/// stack. A message nesting exactly this deep is accepted; one container
/// deeper reports [`StackLimitExceeded`] / [`JsonStackLimitExceeded`] at the
/// first value that would open too deep.
///
/// [`StackLimitExceeded`]: crate::ErrorCode::StackLimitExceeded
/// [`JsonStackLimitExceeded`]: crate::ErrorCode::JsonStackLimitExceeded
pub const STACK_LIMIT: usize = 1000;
