use crate::async_result::NullAsyncResult;
use crate::handler::{Canonical, CompletionToken, Decays, Handler};
use crate::signature::{ArgsOf, Signature};

use std::borrow::Cow;
use std::cmp::{self, Reverse};
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::{CString, OsString};
use std::fs::{DirEntry, File, FileType, Metadata, Permissions, ReadDir};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, SocketAddrV4, SocketAddrV6, TcpListener, TcpStream, UdpSocket};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// A function object invoked once with the argument tuple `Args`.
pub trait Callable<Args>: Sized {
    type Output;

    fn call(self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($a:ident: $t:ident),*) => {
        impl<Func, Ret, $($t),*> Callable<($($t,)*)> for Func
        where
            Func: FnOnce($($t),*) -> Ret,
        {
            type Output = Ret;

            fn call(self, ($($a,)*): ($($t,)*)) -> Ret {
                self($($a),*)
            }
        }

        impl<Func, Ret, $($t),*> Continuable<($($t,)*)> for Func
        where
            Func: FnOnce($($t),*) -> Ret,
        {
            type Normalized = Func;

            type Form = Canonical;

            fn normalize(self) -> Func {
                self
            }
        }
    };
}

impl_callable!();
impl_callable!(a: A);
impl_callable!(a: A, b: B);
impl_callable!(a: A, b: B, c: C);
impl_callable!(a: A, b: B, c: C, d: D);
impl_callable!(a: A, b: B, c: C, d: D, e: E);
impl_callable!(a: A, b: B, c: C, d: D, e: E, f: F);

/// How the return value of a callable is passed on to a continuation.
///
/// `()` is forwarded as no arguments at all, so the continuation of a callable
/// returning nothing takes no arguments. Every other value is forwarded as the
/// single argument of the continuation.
///
/// A callable returning a type without an `Outcome` has no continuation
/// signature and cannot be chained:
///
/// ```compile_fail
/// use asyncio_token::{Callable, ContinuationOf};
///
/// struct Opaque;
///
/// let chained = (|| Opaque).chain(|_: Opaque| ());
/// chained.call(());
/// ```
pub trait Outcome: Sized {
    type Signature: Signature;

    fn into_args(self) -> ArgsOf<Self::Signature>;
}

impl Outcome for () {
    type Signature = fn();

    fn into_args(self) {}
}

/// Forwards values of the given types to continuations as one argument.
///
/// ```
/// # #[macro_use] extern crate asyncio_token;
/// struct Reply(u16);
///
/// value_outcome!(Reply);
///
/// // Generic types list their parameters in brackets.
/// struct Frame<T>(T);
///
/// value_outcome!(impl[T] Frame<T>);
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! value_outcome {
    (impl[$($g:tt)*] $t:ty) => {
        impl<$($g)*> $crate::Outcome for $t {
            type Signature = fn($t);

            fn into_args(self) -> ($t,) {
                (self,)
            }
        }
    };
    ($($t:ty),+ $(,)?) => {
        $(
            $crate::value_outcome!(impl[] $t);
        )+
    };
}

value_outcome!(bool, char, i8, i16, i32, i64, i128, isize);
value_outcome!(u8, u16, u32, u64, u128, usize, f32, f64);
value_outcome!(String, io::Error, io::ErrorKind, cmp::Ordering);
value_outcome!(Duration, Instant, SystemTime);
value_outcome!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6, Shutdown);
value_outcome!(TcpStream, TcpListener, UdpSocket);
value_outcome!(File, Metadata, Permissions, FileType, DirEntry, ReadDir, PathBuf);
value_outcome!(OsString, CString);
value_outcome!(impl['a, T: ?Sized] &'a T);
value_outcome!(impl['a, T: ?Sized] &'a mut T);
value_outcome!(impl['a, B: ?Sized + ToOwned] Cow<'a, B>);
value_outcome!(impl[T] Option<T>);
value_outcome!(impl[T, E] Result<T, E>);
value_outcome!(impl[T] Vec<T>);
value_outcome!(impl[T] VecDeque<T>);
value_outcome!(impl[K, V] HashMap<K, V>);
value_outcome!(impl[K, V] BTreeMap<K, V>);
value_outcome!(impl[T] HashSet<T>);
value_outcome!(impl[T] BTreeSet<T>);
value_outcome!(impl[T] BinaryHeap<T>);
value_outcome!(impl[T] LinkedList<T>);
value_outcome!(impl[T] Reverse<T>);
value_outcome!(impl[T: ?Sized] Box<T>);
value_outcome!(impl[T: ?Sized] Rc<T>);
value_outcome!(impl[T: ?Sized] Arc<T>);
value_outcome!(impl[A] (A,));
value_outcome!(impl[A, B] (A, B));
value_outcome!(impl[A, B, C] (A, B, C));
value_outcome!(impl[A, B, C, D] (A, B, C, D));
value_outcome!(impl[A, B, C, D, E] (A, B, C, D, E));
value_outcome!(impl[A, B, C, D, E, F] (A, B, C, D, E, F));

/// Passes a value of any type on to a continuation.
///
/// Types of other crates cannot be given an `Outcome` downstream. Return them
/// wrapped in `Value` instead; the continuation receives the unwrapped value.
///
/// ```
/// use asyncio_token::prelude::*;
/// use asyncio_token::Value;
///
/// struct Foreign(u8);
///
/// let chained = (|| Value(Foreign(7))).chain(|f: Foreign| f.0 * 2);
/// assert_eq!(chained.call(()), 14);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Value<T>(pub T);

impl<T> Value<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Outcome for Value<T> {
    type Signature = fn(T);

    fn into_args(self) -> (T,) {
        (self.0,)
    }
}

/// The normalization rule of a callable that is to be chained with a
/// continuation.
///
/// Closures and `Chain` are canonical. A type wrapping another callable, a
/// handle to a still pending operation for example, declares `Form = Decays`
/// and unwraps itself in `normalize`; composition then works on the unwrapped
/// callable.
pub trait Continuable<Args>: Sized {
    type Normalized: Continuable<Args>;

    type Form: Normalization<Self, Args>;

    fn normalize(self) -> Self::Normalized;
}

/// One step of continuation normalization, selected by `Continuable::Form`.
pub trait Normalization<F, Args> {
    type Target: Callable<Args>;

    const DEPTH: usize;

    fn canonicalize(func: F) -> Self::Target;
}

impl<F, Args> Normalization<F, Args> for Canonical
where
    F: Continuable<Args, Normalized = F> + Callable<Args>,
{
    type Target = F;

    const DEPTH: usize = 0;

    fn canonicalize(func: F) -> F {
        func
    }
}

impl<F, Args> Normalization<F, Args> for Decays
where
    F: Continuable<Args>,
    <F::Normalized as Continuable<Args>>::Form: Normalization<F::Normalized, Args>,
{
    type Target = <<F::Normalized as Continuable<Args>>::Form as Normalization<F::Normalized, Args>>::Target;

    const DEPTH: usize =
        1 + <<F::Normalized as Continuable<Args>>::Form as Normalization<F::Normalized, Args>>::DEPTH;

    fn canonicalize(func: F) -> Self::Target {
        <<F::Normalized as Continuable<Args>>::Form as Normalization<F::Normalized, Args>>::canonicalize(func.normalize())
    }
}

/// The canonical callable of `F` when invoked with `Args`.
pub type TargetOf<F, Args> = <<F as Continuable<Args>>::Form as Normalization<F, Args>>::Target;

/// Describes the continuations of a callable invoked with `Args`.
///
/// `Signature` is what a continuation must accept to receive the callable's
/// result: `fn()` if it returns `()`, `fn(R)` if it returns `R`.
pub trait ContinuationOf<Args>: Continuable<Args> {
    type Target: Callable<Args, Output = Self::Output>;

    type Output: Outcome<Signature = Self::Signature>;

    type Signature: Signature;

    /// Normalization steps between the callable and `Target`.
    const DEPTH: usize;

    fn into_target(self) -> Self::Target;

    /// Returns a callable that invokes `self` with its arguments and passes the
    /// result on to `cont`.
    fn chain<C>(self, cont: C) -> Chain<Self::Target, C>
    where
        C: Callable<ArgsOf<Self::Signature>>,
    {
        Chain {
            func: self.into_target(),
            cont: cont,
        }
    }
}

impl<F, Args> ContinuationOf<Args> for F
where
    F: Continuable<Args>,
    F::Form: Normalization<F, Args>,
    <TargetOf<F, Args> as Callable<Args>>::Output: Outcome,
{
    type Target = TargetOf<F, Args>;

    type Output = <TargetOf<F, Args> as Callable<Args>>::Output;

    type Signature = <<TargetOf<F, Args> as Callable<Args>>::Output as Outcome>::Signature;

    const DEPTH: usize = <F::Form as Normalization<F, Args>>::DEPTH;

    fn into_target(self) -> TargetOf<F, Args> {
        <F::Form as Normalization<F, Args>>::canonicalize(self)
    }
}

/// The signature continuations of `F` must have when `F` is invoked with `Args`.
pub type ContinuationSignature<F, Args> = <F as ContinuationOf<Args>>::Signature;

/// Chains `cont` after `func`. Same as `ContinuationOf::chain`.
pub fn chain<F, C, Args>(func: F, cont: C) -> Chain<<F as ContinuationOf<Args>>::Target, C>
where
    F: ContinuationOf<Args>,
    C: Callable<ArgsOf<F::Signature>>,
{
    <F as ContinuationOf<Args>>::chain(func, cont)
}

/// A callable followed by a continuation of its result.
///
/// `Chain<F, C>` accepts exactly the arguments `F` accepts, so it can be chained
/// again or used as the handler of an initiating function whose signature has
/// those arguments.
pub struct Chain<F, C> {
    func: F,
    cont: C,
}

impl<F, C> Chain<F, C> {
    pub fn into_inner(self) -> (F, C) {
        (self.func, self.cont)
    }
}

impl<F, C, Args> Callable<Args> for Chain<F, C>
where
    F: Callable<Args>,
    F::Output: Outcome,
    C: Callable<ArgsOf<<F::Output as Outcome>::Signature>>,
{
    type Output = C::Output;

    fn call(self, args: Args) -> C::Output {
        let Chain { func, cont } = self;
        let res = <F as Callable<Args>>::call(func, args);
        trace!(
            continuation = std::any::type_name::<C>(),
            arity = <<F::Output as Outcome>::Signature as Signature>::ARITY,
            "forwarding to continuation"
        );
        cont.call(res.into_args())
    }
}

impl<F, C, Args> Continuable<Args> for Chain<F, C>
where
    Chain<F, C>: Callable<Args>,
{
    type Normalized = Self;

    type Form = Canonical;

    fn normalize(self) -> Self {
        self
    }
}

/// A chain completes as a handler by running through to its last continuation.
/// Whatever that continuation returns is dropped; the initiating function's
/// return value comes from `NullAsyncResult` and is always `()`.
impl<F, C, S> Handler<S> for Chain<F, C>
where
    S: Signature,
    Chain<F, C>: Callable<S::Args>,
{
    type AsyncResult = NullAsyncResult;

    fn complete(self, args: S::Args) {
        let _ = <Self as Callable<S::Args>>::call(self, args);
    }
}

impl<F, C, S> CompletionToken<S> for Chain<F, C>
where
    S: Signature,
    Chain<F, C>: Callable<S::Args>,
{
    type Decayed = Self;

    type Form = Canonical;

    fn decay(self) -> Self {
        self
    }
}

#[test]
fn test_callable_arity() {
    assert_eq!(Callable::call(|| 1, ()), 1);
    assert_eq!(Callable::call(|a: i32| a + 1, (1,)), 2);
    assert_eq!(Callable::call(|a: i32, b: &str| a as usize + b.len(), (1, "ab")), 3);
}

#[test]
fn test_outcome_args() {
    let () = ().into_args();
    assert_eq!(5i32.into_args(), (5,));
    assert_eq!(Some("a").into_args(), (Some("a"),));
    assert_eq!((1, 2).into_args(), ((1, 2),));
    assert_eq!(<<() as Outcome>::Signature as Signature>::ARITY, 0);
    assert_eq!(<<Result<usize, io::Error> as Outcome>::Signature as Signature>::ARITY, 1);
}

#[test]
fn test_value_outcome_unwraps() {
    assert_eq!(Value("a").into_args(), ("a",));
    assert_eq!(Value(Value(1)).into_inner().into_args(), (1,));
    assert_eq!(<<Value<u8> as Outcome>::Signature as Signature>::ARITY, 1);
}
