use crate::async_result::AsyncResult;
use crate::signature::Signature;

/// Upper bound on the number of normalization steps a completion token may take
/// before reaching its handler type.
///
/// Longer chains are rejected when the initiating function is compiled. Cyclic
/// chains never get that far: the trait solver reports them as an overflow.
///
/// ```compile_fail
/// use asyncio_token::{CompletionToken, Decays, Resolve};
///
/// struct Ping;
/// struct Pong;
///
/// impl CompletionToken<fn()> for Ping {
///     type Decayed = Pong;
///     type Form = Decays;
///     fn decay(self) -> Pong { Pong }
/// }
///
/// impl CompletionToken<fn()> for Pong {
///     type Decayed = Ping;
///     type Form = Decays;
///     fn decay(self) -> Ping { Ping }
/// }
///
/// let _ = <Ping as Resolve<fn()>>::DEPTH;
/// ```
///
/// Every `Box` around a token is one step, so 33 of them are one too many:
///
/// ```compile_fail
/// use asyncio_token::{AsyncCompletion, Canonical, CompletionToken, Handler, NullAsyncResult};
///
/// struct Sink;
///
/// impl Handler<fn()> for Sink {
///     type AsyncResult = NullAsyncResult;
///     fn complete(self, _: ()) {}
/// }
///
/// impl CompletionToken<fn()> for Sink {
///     type Decayed = Self;
///     type Form = Canonical;
///     fn decay(self) -> Self { self }
/// }
///
/// fn b4<T>(t: T) -> Box<Box<Box<Box<T>>>> {
///     Box::new(Box::new(Box::new(Box::new(t))))
/// }
///
/// let token = Box::new(b4(b4(b4(b4(b4(b4(b4(b4(Sink)))))))));
/// let comp: AsyncCompletion<_, fn()> = AsyncCompletion::new(token);
/// comp.complete_with(|handler| handler.complete(()));
/// ```
pub const MAX_RESOLUTION_DEPTH: usize = 32;

/// A function object that receives the outcome of an asynchronous operation.
///
/// A handler is moved into the operation and consumed by exactly one call to
/// `complete`. `AsyncResult` selects what an initiating function returns when it
/// is given this handler; handlers that return nothing use `NullAsyncResult`.
pub trait Handler<S: Signature>: Sized {
    type AsyncResult: AsyncResult<Self>;

    fn complete(self, args: S::Args);
}

/// Marks a completion token that is already a handler for its signature.
#[derive(Debug)]
pub enum Canonical {}

/// Marks a type that normalizes into another type before resolution continues.
#[derive(Debug)]
pub enum Decays {}

/// The normalization rule of a completion token for the signature `S`.
///
/// A canonical handler declares itself as its own normalized form:
///
/// ```
/// use asyncio_token::{Canonical, CompletionToken, Handler, NullAsyncResult};
///
/// struct Print;
///
/// impl Handler<fn(i32)> for Print {
///     type AsyncResult = NullAsyncResult;
///
///     fn complete(self, (n,): (i32,)) {
///         println!("{}", n)
///     }
/// }
///
/// impl CompletionToken<fn(i32)> for Print {
///     type Decayed = Self;
///     type Form = Canonical;
///
///     fn decay(self) -> Self {
///         self
///     }
/// }
/// ```
///
/// Any other token names the type it turns into with `Form = Decays`; `decay`
/// is the conversion, and resolution continues from `Decayed`.
///
/// A type declared canonical must be a handler of the signature:
///
/// ```compile_fail
/// use asyncio_token::{Canonical, CompletionToken};
///
/// struct NotAHandler;
///
/// impl CompletionToken<fn(i32)> for NotAHandler {
///     type Decayed = Self;
///     type Form = Canonical;
///     fn decay(self) -> Self { self }
/// }
/// ```
pub trait CompletionToken<S: Signature>: Sized {
    type Decayed: CompletionToken<S>;

    type Form: Resolution<Self, S>;

    fn decay(self) -> Self::Decayed;
}

/// One step of token resolution, selected by `CompletionToken::Form`.
pub trait Resolution<T, S: Signature> {
    type Handler: Handler<S>;

    /// Normalization steps between `T` and `Handler`.
    const DEPTH: usize;

    fn resolve(token: T) -> Self::Handler;
}

impl<T, S> Resolution<T, S> for Canonical
where
    T: CompletionToken<S, Decayed = T> + Handler<S>,
    S: Signature,
{
    type Handler = T;

    const DEPTH: usize = 0;

    fn resolve(token: T) -> T {
        token
    }
}

impl<T, S> Resolution<T, S> for Decays
where
    T: CompletionToken<S>,
    <T::Decayed as CompletionToken<S>>::Form: Resolution<T::Decayed, S>,
    S: Signature,
{
    type Handler = <<T::Decayed as CompletionToken<S>>::Form as Resolution<T::Decayed, S>>::Handler;

    const DEPTH: usize =
        1 + <<T::Decayed as CompletionToken<S>>::Form as Resolution<T::Decayed, S>>::DEPTH;

    fn resolve(token: T) -> Self::Handler {
        <<T::Decayed as CompletionToken<S>>::Form as Resolution<T::Decayed, S>>::resolve(token.decay())
    }
}

/// Maps a completion token to its handler type for the signature `S`.
///
/// Implemented for every token whose normalization chain ends in a handler.
pub trait Resolve<S: Signature>: CompletionToken<S> {
    type Handler: Handler<S>;

    const DEPTH: usize;

    fn into_handler(self) -> Self::Handler;
}

impl<T, S> Resolve<S> for T
where
    T: CompletionToken<S>,
    T::Form: Resolution<T, S>,
    S: Signature,
{
    type Handler = <T::Form as Resolution<T, S>>::Handler;

    const DEPTH: usize = <T::Form as Resolution<T, S>>::DEPTH;

    fn into_handler(self) -> Self::Handler {
        <T::Form as Resolution<T, S>>::resolve(self)
    }
}

/// The handler type a token of type `T` resolves to for the signature `S`.
pub type HandlerType<T, S> = <T as Resolve<S>>::Handler;

/// What an initiating function returns when called with a token of type `T`.
pub type OutputType<T, S> =
    <<HandlerType<T, S> as Handler<S>>::AsyncResult as AsyncResult<HandlerType<T, S>>>::Output;

impl<'a, T, S> CompletionToken<S> for &'a T
where
    T: CompletionToken<S> + Clone,
    S: Signature,
{
    type Decayed = T;

    type Form = Decays;

    fn decay(self) -> T {
        self.clone()
    }
}

impl<'a, T, S> CompletionToken<S> for &'a mut T
where
    T: CompletionToken<S> + Clone,
    S: Signature,
{
    type Decayed = T;

    type Form = Decays;

    fn decay(self) -> T {
        self.clone()
    }
}

impl<T, S> CompletionToken<S> for Box<T>
where
    T: CompletionToken<S>,
    S: Signature,
{
    type Decayed = T;

    type Form = Decays;

    fn decay(self) -> T {
        *self
    }
}

#[cfg(test)]
struct Sink;

#[cfg(test)]
impl Handler<fn(i32)> for Sink {
    type AsyncResult = crate::async_result::NullAsyncResult;

    fn complete(self, _: (i32,)) {}
}

#[cfg(test)]
impl CompletionToken<fn(i32)> for Sink {
    type Decayed = Self;

    type Form = Canonical;

    fn decay(self) -> Self {
        self
    }
}

#[test]
fn test_canonical_depth() {
    assert_eq!(<Sink as Resolve<fn(i32)>>::DEPTH, 0);
    let _: HandlerType<Sink, fn(i32)> = Sink.into_handler();
}

#[test]
fn test_reference_decay() {
    #[derive(Clone, Debug, PartialEq)]
    struct Tagged(u8);

    impl Handler<fn(i32)> for Tagged {
        type AsyncResult = crate::async_result::NullAsyncResult;

        fn complete(self, _: (i32,)) {}
    }

    impl CompletionToken<fn(i32)> for Tagged {
        type Decayed = Self;

        type Form = Canonical;

        fn decay(self) -> Self {
            self
        }
    }

    let mut token = Tagged(7);
    assert_eq!(<&Tagged as Resolve<fn(i32)>>::DEPTH, 1);
    assert_eq!(<&Box<Tagged> as Resolve<fn(i32)>>::DEPTH, 2);
    assert_eq!(<Box<&Tagged> as Resolve<fn(i32)>>::DEPTH, 2);

    let h: Tagged = Resolve::<fn(i32)>::into_handler(&token);
    assert_eq!(h, Tagged(7));
    let h: Tagged = Resolve::<fn(i32)>::into_handler(&mut token);
    assert_eq!(h, token);
}
