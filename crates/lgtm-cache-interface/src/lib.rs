//! Cache interface

#![warn(missing_docs)]
#![warn(clippy::all)]

mod errors;
mod interface;

pub use errors::CacheError;
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockCacheService;
pub use interface::CacheService;
