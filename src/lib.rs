// asyncio_token
//
// The software is released under the MIT license. see LICENSE.txt
// https://github.com/harre-orz/rust_asio/blob/master/LICENSE.txt

//! Completion tokens for asynchronous initiating functions.
//!
//! An initiating function is written once against a completion token `T` and
//! a completion signature `S`. The caller's token decides how the outcome is
//! delivered and what the initiating function returns.
//!
//! - `CompletionToken` and `Resolve` turn a token into its handler type.
//! - `AsyncResult` binds the handler to the initiating function's return value.
//! - `AsyncCompletion` and `async_initiate` do both for one call.
//! - `ContinuationOf` chains a callable with a continuation of its result.

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

mod signature;
pub use self::signature::{ArgsOf, Signature};

mod async_result;
pub use self::async_result::{AsyncResult, NullAsyncResult};

mod handler;
pub use self::handler::*;

mod async_completion;
pub use self::async_completion::{async_initiate, AsyncCompletion};

mod continuation;
pub use self::continuation::*;

pub mod prelude;
