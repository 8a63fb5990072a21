extern crate asyncio_token;

use std::any::TypeId;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::rc::Rc;
use asyncio_token::*;

fn signature_of<F, Args>(_: &F) -> TypeId
where
    F: ContinuationOf<Args>,
    F::Signature: 'static,
{
    TypeId::of::<F::Signature>()
}

/// Completes immediately with `n * 2`.
fn async_double<T>(n: i32, token: T) -> OutputType<T, fn(i32)>
where
    T: Resolve<fn(i32)>,
{
    let (result, handler) = AsyncCompletion::new(token).into_parts();
    handler.complete((n * 2,));
    result.get()
}

/// A callable still waiting for its operation; unwraps into the callable.
struct Pending<F>(F);

impl<F> Continuable<(i32,)> for Pending<F>
where
    F: FnOnce(i32) -> i32,
{
    type Normalized = F;

    type Form = Decays;

    fn normalize(self) -> F {
        self.0
    }
}

/// Wraps a `Pending`, one more step away from the callable.
struct Queued<F>(Pending<F>);

impl<F> Continuable<(i32,)> for Queued<F>
where
    F: FnOnce(i32) -> i32,
{
    type Normalized = Pending<F>;

    type Form = Decays;

    fn normalize(self) -> Pending<F> {
        self.0
    }
}

#[derive(Debug, PartialEq)]
struct Reply(u16);

value_outcome!(Reply);

#[test]
fn test_derived_signature() {
    assert_eq!(signature_of::<_, (i32,)>(&|n: i32| n * 2), TypeId::of::<fn(i32)>());
    assert_eq!(signature_of::<_, (i32,)>(&|_: i32| {}), TypeId::of::<fn()>());
    assert_eq!(signature_of::<_, ()>(&|| "text".to_string()), TypeId::of::<fn(String)>());
    assert_eq!(
        signature_of::<_, (u8, u8)>(&|a: u8, b: u8| Ok::<_, ()>(a + b)),
        TypeId::of::<fn(Result<u8, ()>)>()
    );
    assert_eq!(signature_of::<_, ()>(&|| Reply(200)), TypeId::of::<fn(Reply)>());
}

#[test]
fn test_void_result_chain() {
    let log = RefCell::new(Vec::new());
    let chained = (|n: i32| log.borrow_mut().push(format!("f {}", n)))
        .chain(|| log.borrow_mut().push("c".to_string()));

    assert!(log.borrow().is_empty());
    chained.call((3,));
    assert_eq!(*log.borrow(), ["f 3", "c"]);
}

#[test]
fn test_value_result_chain() {
    let chained = (|a: i32, b: i32| a + b).chain(|sum: i32| sum * 10);
    assert_eq!(chained.call((2, 3)), 50);

    let reply = chain(|| Reply(404), |reply: Reply| reply.0 + 1);
    assert_eq!(reply.call(()), 405);
}

#[test]
fn test_nested_chain() {
    let first = (|n: i32| n + 1).chain(|n: i32| n * 10);
    let second = chain::<_, _, (i32,)>(first, |n: i32| format!("<{}>", n));
    let third = chain::<_, _, (i32,)>(second, |s: String| s.len());

    assert_eq!(signature_of::<_, (i32,)>(&third), TypeId::of::<fn(usize)>());
    assert_eq!(<Chain<fn(i32) -> i32, fn(i32) -> i32> as ContinuationOf<(i32,)>>::DEPTH, 0);
    assert_eq!(third.call((4,)), 4);
}

#[test]
fn test_normalized_callable() {
    assert_eq!(<Pending<fn(i32) -> i32> as ContinuationOf<(i32,)>>::DEPTH, 1);
    assert_eq!(<Queued<fn(i32) -> i32> as ContinuationOf<(i32,)>>::DEPTH, 2);

    let chained = Pending(|n: i32| n + 1).chain(|n: i32| n * 3);
    assert_eq!(chained.call((1,)), 6);

    let chained = Queued(Pending(|n: i32| n - 1)).chain(|n: i32| n == 0);
    assert!(chained.call((1,)));
}

#[test]
fn test_chain_as_completion_token() {
    let out = Rc::new(Cell::new(0));
    let sink = out.clone();
    let token = (|n: i32| n + 1).chain(move |n: i32| sink.set(n));

    assert_eq!(<Chain<fn(i32) -> i32, fn(i32)> as Resolve<fn(i32)>>::DEPTH, 0);
    let () = async_double(5, token);
    assert_eq!(out.get(), 11);

    let sink = out.clone();
    let () = async_double(2, (|n: i32| n + 1).chain(move |n: i32| {
        sink.set(n);
        n * 100
    }));
    assert_eq!(out.get(), 5);
}

#[test]
fn test_into_inner() {
    let (f, c) = (|n: i32| n).chain(|n: i32| n).into_inner();
    assert_eq!(f(1) + c(2), 3);
}

#[test]
fn test_std_io_results_chain() {
    let port = (|| SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 80)).chain(|addr: SocketAddr| addr.port());
    assert_eq!(port.call(()), 80);

    let name = (|dir: String| PathBuf::from(dir).join("asio.txt"))
        .chain(|path: PathBuf| path.file_name().map(|s| s.len()));
    assert_eq!(name.call(("/tmp".to_string(),)), Some(8));

    let unique = (|| [1, 2, 2].iter().cloned().collect::<HashSet<i32>>()).chain(|set: HashSet<i32>| set.len());
    assert_eq!(unique.call(()), 2);
}

/// Stands in for a type of another crate that has no `Outcome`.
struct Opaque(i32);

#[test]
fn test_value_wraps_foreign_result() {
    assert_eq!(signature_of::<_, (i32,)>(&|n: i32| Value(Opaque(n))), TypeId::of::<fn(Opaque)>());

    let chained = (|n: i32| Value(Opaque(n + 1))).chain(|o: Opaque| o.0 * 2);
    assert_eq!(chained.call((1,)), 4);

    let out = Rc::new(Cell::new(0));
    let sink = out.clone();
    let () = async_double(3, (|n: i32| Value(Opaque(n))).chain(move |o: Opaque| sink.set(o.0)));
    assert_eq!(out.get(), 6);
}
