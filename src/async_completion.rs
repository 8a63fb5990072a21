use crate::async_result::AsyncResult;
use crate::handler::{Handler, HandlerType, OutputType, Resolve, MAX_RESOLUTION_DEPTH};
use crate::signature::Signature;

use std::any;
use std::fmt;

type ResultOf<T, S> = <HandlerType<T, S> as Handler<S>>::AsyncResult;

fn resolve<T, S>(token: T) -> HandlerType<T, S>
where
    T: Resolve<S>,
    S: Signature,
{
    const {
        assert!(
            <T as Resolve<S>>::DEPTH <= MAX_RESOLUTION_DEPTH,
            "completion token normalization chain is too deep"
        )
    };
    trace!(
        token = any::type_name::<T>(),
        handler = any::type_name::<T::Handler>(),
        depth = T::DEPTH,
        "resolved completion token"
    );
    token.into_handler()
}

/// The handler and result object of one initiating function call.
///
/// Acquire it at the top of the initiating function, hand the handler to the
/// operation, and return `get()` of the result object as the tail expression:
///
/// ```
/// use asyncio_token::prelude::*;
/// use asyncio_token::{AsyncCompletion, OutputType};
///
/// fn async_answer<T: Resolve<fn(i32)>>(token: T) -> OutputType<T, fn(i32)> {
///     let (result, handler) = AsyncCompletion::new(token).into_parts();
///     launch(handler);
///     result.get()
/// }
/// # fn launch<H>(_: H) {}
/// ```
///
/// A token that already is its handler type is adopted as it is; any other token
/// is converted along its normalization chain. The result object is bound after
/// the handler exists and is dropped before it.
pub struct AsyncCompletion<T, S>
where
    T: Resolve<S>,
    S: Signature,
{
    result: ResultOf<T, S>,
    handler: HandlerType<T, S>,
}

impl<T, S> AsyncCompletion<T, S>
where
    T: Resolve<S>,
    S: Signature,
{
    pub fn new(token: T) -> Self {
        let mut handler = resolve::<T, S>(token);
        let result = <ResultOf<T, S> as AsyncResult<HandlerType<T, S>>>::new(&mut handler);
        AsyncCompletion {
            result: result,
            handler: handler,
        }
    }

    pub fn handler(&self) -> &HandlerType<T, S> {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut HandlerType<T, S> {
        &mut self.handler
    }

    pub fn result(&self) -> &ResultOf<T, S> {
        &self.result
    }

    /// Splits into the result object, whose `get()` is the initiating function's
    /// return value, and the handler, to be moved into the operation.
    ///
    /// The pair keeps the drop order of the façade: result first, then handler.
    pub fn into_parts(self) -> (ResultOf<T, S>, HandlerType<T, S>) {
        let AsyncCompletion { result, handler } = self;
        (result, handler)
    }

    /// Hands the handler to `launch` and returns the result object's value.
    pub fn complete_with<F>(self, launch: F) -> OutputType<T, S>
    where
        F: FnOnce(HandlerType<T, S>),
    {
        let (result, handler) = self.into_parts();
        launch(handler);
        result.get()
    }
}

impl<T, S> fmt::Debug for AsyncCompletion<T, S>
where
    T: Resolve<S>,
    S: Signature,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AsyncCompletion")
            .field("handler", &any::type_name::<HandlerType<T, S>>())
            .field("result", &any::type_name::<ResultOf<T, S>>())
            .finish()
    }
}

/// Resolves `token` and starts the operation by passing its handler to
/// `initiation`.
///
/// The handler's result object decides whether `initiation` runs right away; the
/// default result object runs it immediately and returns `()`.
pub fn async_initiate<S, T, F>(token: T, initiation: F) -> OutputType<T, S>
where
    T: Resolve<S>,
    S: Signature,
    F: FnOnce(HandlerType<T, S>),
{
    <ResultOf<T, S> as AsyncResult<HandlerType<T, S>>>::initiate(resolve::<T, S>(token), initiation)
}
