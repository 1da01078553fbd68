pub(crate) mod handle_push_hook;

pub use handle_push_hook::{HandlePushHookInterface, PushReport};

#[cfg(any(test, feature = "testkit"))]
pub use self::handle_push_hook::MockHandlePushHookInterface;
