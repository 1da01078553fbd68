pub(crate) mod handle_comment_hook;

pub use handle_comment_hook::HandleCommentHookInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::handle_comment_hook::MockHandleCommentHookInterface;
