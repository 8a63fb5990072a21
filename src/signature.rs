/// The completion signature of an asynchronous operation.
///
/// Signatures are written as function pointer types, `fn(io::Result<usize>)` for
/// example, and only ever used at the type level. `Args` is the tuple of
/// arguments a handler receives when the operation completes.
///
/// Lifetimes in argument types must be named: `fn(&str)` is higher-ranked and
/// is not a signature, `fn(&'static str)` is.
pub trait Signature {
    type Args;

    /// The number of completion arguments.
    const ARITY: usize;
}

macro_rules! impl_signature {
    ($n:expr; $($t:ident),*) => {
        impl<$($t),*> Signature for fn($($t),*) {
            type Args = ($($t,)*);

            const ARITY: usize = $n;
        }
    };
}

impl_signature!(0;);
impl_signature!(1; A);
impl_signature!(2; A, B);
impl_signature!(3; A, B, C);
impl_signature!(4; A, B, C, D);
impl_signature!(5; A, B, C, D, E);
impl_signature!(6; A, B, C, D, E, F);

/// Argument tuple of the signature `S`.
pub type ArgsOf<S> = <S as Signature>::Args;

#[test]
fn test_arity() {
    use std::io;

    assert_eq!(<fn() as Signature>::ARITY, 0);
    assert_eq!(<fn(i32) as Signature>::ARITY, 1);
    assert_eq!(<fn(io::Result<usize>, String) as Signature>::ARITY, 2);
}

#[test]
fn test_args() {
    let args: ArgsOf<fn(i32, &'static str)> = (1, "a");
    assert_eq!(args, (1, "a"));

    let _: ArgsOf<fn()> = ();
}
