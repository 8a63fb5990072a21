/// Decides what an initiating function returns to its caller.
///
/// A result object is created from the handler right before the operation is
/// launched, and `get` is evaluated once as the initiating function's return
/// expression, after the handler has been handed to the operation.
///
/// `new` receives the handler mutably and must not invoke it. It may take state
/// out of the handler (the receiving half of a channel, for example) but keeps no
/// borrow, so the handler can still be moved into the operation afterwards.
pub trait AsyncResult<H>: Sized {
    type Output;

    fn new(handler: &mut H) -> Self;

    fn get(self) -> Self::Output;

    /// Binds a result object to `handler`, launches the operation with it and
    /// returns `get()`.
    ///
    /// Override this for tokens that must control when the operation starts.
    fn initiate<F>(mut handler: H, initiation: F) -> Self::Output
    where
        F: FnOnce(H),
    {
        let res = Self::new(&mut handler);
        initiation(handler);
        res.get()
    }
}

/// The result object of handlers that return nothing to the initiating function.
#[derive(Debug)]
pub struct NullAsyncResult;

impl<H> AsyncResult<H> for NullAsyncResult {
    type Output = ();

    fn new(_: &mut H) -> Self {
        NullAsyncResult
    }

    fn get(self) {}
}

#[test]
fn test_null_async_result() {
    let mut handler = 0;
    let res = <NullAsyncResult as AsyncResult<i32>>::new(&mut handler);
    let () = <NullAsyncResult as AsyncResult<i32>>::get(res);
    assert_eq!(handler, 0);
    assert_eq!(std::mem::size_of::<NullAsyncResult>(), 0);
}

#[test]
fn test_initiate_order() {
    use std::cell::RefCell;

    struct Logged<'a>(&'a RefCell<Vec<&'static str>>);

    impl<'a> AsyncResult<&'a RefCell<Vec<&'static str>>> for Logged<'a> {
        type Output = usize;

        fn new(handler: &mut &'a RefCell<Vec<&'static str>>) -> Self {
            handler.borrow_mut().push("new");
            Logged(*handler)
        }

        fn get(self) -> usize {
            self.0.borrow_mut().push("get");
            self.0.borrow().len()
        }
    }

    let log = RefCell::new(Vec::new());
    let len = Logged::initiate(&log, |h| h.borrow_mut().push("launch"));
    assert_eq!(len, 3);
    assert_eq!(*log.borrow(), ["new", "launch", "get"]);
}
