//! The traits needed to write and call initiating functions.
//!
//! ```
//! use asyncio_token::prelude::*;
//! ```

pub use crate::async_result::AsyncResult;
pub use crate::continuation::{Callable, Continuable, ContinuationOf, Outcome};
pub use crate::handler::{CompletionToken, Handler, Resolve};
pub use crate::signature::Signature;
