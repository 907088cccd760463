use std::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicUsize, Ordering},
    task::{Context, Poll},
};

use futures::executor::block_on;
use once_cell::sync::OnceCell;
use tokio::{runtime::Runtime, sync::oneshot};

use crate::{
    api_vcx::api_global::settings::DEFAULT_THREADPOOL_SIZE, errors::error::prelude::*,
};

struct VcxRuntime {
    runtime: Runtime,
    num_threads: usize,
}

static RUNTIME: OnceCell<VcxRuntime> = OnceCell::new();

fn zero_threads_error() -> LibvcxError {
    LibvcxError::from_msg(
        LibvcxErrorKind::InvalidConfiguration,
        "threadpool_size must be greater than 0",
    )
}

fn build_runtime(num_threads: usize) -> LibvcxResult<VcxRuntime> {
    if num_threads == 0 {
        return Err(zero_threads_error());
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name_fn(|| {
            static ATOMIC_ID: AtomicUsize = AtomicUsize::new(0);
            let id = ATOMIC_ID.fetch_add(1, Ordering::SeqCst);
            format!("tokio-worker-credex-{}", id)
        })
        .on_thread_start(|| debug!("Starting tokio runtime worker thread for credex."))
        .worker_threads(num_threads)
        .enable_time()
        .build()
        .map_err(|err| {
            LibvcxError::from_msg(
                LibvcxErrorKind::UnknownError,
                format!("Cannot build tokio runtime: {err}"),
            )
        })?;
    info!(
        "Tokio runtime with threaded scheduler has been created, using {} threads.",
        num_threads
    );
    Ok(VcxRuntime {
        runtime,
        num_threads,
    })
}

/// Creates the process wide runtime. Only the first call builds it; later calls asking for a
/// different size keep the existing runtime.
pub fn init_runtime(num_threads: usize) -> LibvcxResult<()> {
    trace!("init_runtime >>> num_threads: {}", num_threads);
    if num_threads == 0 {
        return Err(zero_threads_error());
    }
    let runtime = RUNTIME.get_or_try_init(|| build_runtime(num_threads))?;
    if runtime.num_threads != num_threads {
        warn!(
            "init_runtime >>> runtime already running with {} threads, ignoring requested size {}",
            runtime.num_threads, num_threads
        );
    }
    Ok(())
}

fn runtime() -> LibvcxResult<&'static VcxRuntime> {
    RUNTIME.get_or_try_init(|| build_runtime(DEFAULT_THREADPOOL_SIZE))
}

/// Single-fire handle on the outcome of an operation scheduled with [`execute_async`].
#[derive(Debug)]
pub struct Completion<T> {
    receiver: oneshot::Receiver<LibvcxResult<T>>,
}

impl<T> Future for Completion<T> {
    type Output = LibvcxResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.map_err(LibvcxError::from).and_then(|result| result))
    }
}

impl<T: Send + 'static> Completion<T> {
    fn failed(err: LibvcxError) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(Err(err));
        Completion { receiver }
    }

    /// Blocks the calling thread until the result is available. Must not be called from a
    /// runtime worker thread.
    pub fn wait(self) -> LibvcxResult<T> {
        block_on(self)
    }

    /// Hands the result to `callback` on a runtime worker once it is available.
    pub fn on_complete<F>(self, callback: F)
    where
        F: FnOnce(LibvcxResult<T>) + Send + 'static,
    {
        match runtime() {
            Ok(runtime) => {
                runtime.runtime.spawn(async move { callback(self.await) });
            }
            Err(err) => callback(Err(err)),
        }
    }
}

/// Schedules `future` on the process wide runtime.
pub fn execute_async<F, T>(future: F) -> Completion<T>
where
    F: Future<Output = LibvcxResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => return Completion::failed(err),
    };
    let (sender, receiver) = oneshot::channel();
    runtime.runtime.spawn(async move {
        if sender.send(future.await).is_err() {
            debug!("execute_async >>> completion dropped before the result was delivered");
        }
    });
    Completion { receiver }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_execute_async_wait() {
        init_runtime(2).unwrap();
        let result = execute_async(async { Ok(21 * 2) }).wait().unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_execute_async_propagates_error() {
        let err = execute_async::<_, ()>(async {
            Err(LibvcxError::from_msg(LibvcxErrorKind::InvalidState, "nope"))
        })
        .wait()
        .unwrap_err();
        assert_eq!(err.kind(), LibvcxErrorKind::InvalidState);
    }

    #[test]
    fn test_on_complete_callback() {
        let (sender, receiver) = mpsc::channel();
        execute_async(async { Ok("done".to_string()) }).on_complete(move |result| {
            sender.send(result).unwrap();
        });
        assert_eq!(receiver.recv().unwrap().unwrap(), "done");
    }

    #[test]
    fn test_init_runtime_rejects_zero_threads() {
        assert_eq!(
            init_runtime(0).unwrap_err().kind(),
            LibvcxErrorKind::InvalidConfiguration
        );
    }

    #[test]
    fn test_init_runtime_twice_keeps_first() {
        init_runtime(2).unwrap();
        init_runtime(6).unwrap();
        assert!(runtime().is_ok());
    }

    #[tokio::test]
    async fn test_completion_is_awaitable() {
        let value = execute_async(async { Ok(7u32) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
