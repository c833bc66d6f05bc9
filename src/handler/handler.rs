use crate::error::Result;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type HandlerFn<E> = dyn Fn(&E) -> Result<()> + Send + Sync;

/// A shareable event handler receiving events of type `E`.
///
/// Handlers may fail; the error propagates to whoever invoked the handler.
pub struct Handler<E = ()> {
    f: Arc<HandlerFn<E>>,
}

impl<E> Handler<E> {
    /// Wrap an infallible callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(move |event: &E| {
                f(event);
                Ok(())
            }),
        }
    }

    /// Wrap a callback that can fail.
    pub fn try_new<F>(f: F) -> Self
    where
        F: Fn(&E) -> Result<()> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invoke the handler.
    pub fn call(&self, event: &E) -> Result<()> {
        (self.f)(event)
    }
}

impl<E> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<E> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

/// Combine optional handlers into one that calls each of them in order.
///
/// Absent handlers are skipped. Every present handler is invoked with the
/// same event even if an earlier one fails or panics: the first error is
/// returned once all have run, and the first panic is resumed after that.
///
/// # Examples
///
/// ```
/// use flipswitch::{call_all, Handler};
/// use std::sync::{Arc, Mutex};
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let first = {
///     let log = log.clone();
///     Handler::new(move |n: &i32| log.lock().unwrap().push(("first", *n)))
/// };
/// let second = {
///     let log = log.clone();
///     Handler::new(move |n: &i32| log.lock().unwrap().push(("second", *n)))
/// };
///
/// let both = call_all([Some(first), None, Some(second)]);
/// both.call(&7).unwrap();
/// assert_eq!(*log.lock().unwrap(), vec![("first", 7), ("second", 7)]);
/// ```
pub fn call_all<E, I>(handlers: I) -> Handler<E>
where
    E: 'static,
    I: IntoIterator<Item = Option<Handler<E>>>,
{
    let handlers: Vec<Handler<E>> = handlers.into_iter().flatten().collect();
    tracing::trace!(count = handlers.len(), "combining handlers");

    Handler::try_new(move |event: &E| {
        let mut first_err = None;
        let mut first_panic = None;

        for handler in &handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler.call(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_err.get_or_insert(err);
                }
                Err(payload) => {
                    first_panic.get_or_insert(payload);
                }
            }
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
        first_err.map_or(Ok(()), Err)
    })
}
