use futures::stream::{self, Stream};
use futures::StreamExt;
use std::future::{ready, Future};

/// The three-state outcome of one asynchronous attempt.
///
/// Every subscription started through [`Scope::subscribe`](crate::Scope::subscribe)
/// observes its underlying producer through this wrapper: `Pending` is always
/// the first outcome, followed by `Success` per emitted value, and at most one
/// terminal `Failure` if the producer errors.
///
/// There are no intermediate progress states — a producer either delivers
/// values or fails, and the wrapper never retries on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncResult<T, E> {
    /// The attempt has started but nothing has been produced yet.
    Pending,
    /// The producer emitted a value.
    Success(T),
    /// The producer failed. Terminal for this attempt.
    Failure(E),
}

impl<T, E> AsyncResult<T, E> {
    /// Returns `true` for the `Pending` variant.
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncResult::Pending)
    }

    /// Returns `true` for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, AsyncResult::Success(_))
    }

    /// Returns `true` for the `Failure` variant.
    pub fn is_failure(&self) -> bool {
        matches!(self, AsyncResult::Failure(_))
    }

    /// The success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            AsyncResult::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The failure value, if any.
    pub fn failure(self) -> Option<E> {
        match self {
            AsyncResult::Failure(error) => Some(error),
            _ => None,
        }
    }

    /// Transform the success value, leaving `Pending` and `Failure` as-is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncResult<U, E> {
        match self {
            AsyncResult::Pending => AsyncResult::Pending,
            AsyncResult::Success(value) => AsyncResult::Success(f(value)),
            AsyncResult::Failure(error) => AsyncResult::Failure(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for AsyncResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => AsyncResult::Success(value),
            Err(error) => AsyncResult::Failure(error),
        }
    }
}

/// Adapt a fallible producer stream into a stream of [`AsyncResult`] outcomes.
///
/// The derived stream yields `Pending` immediately upon subscription, before
/// the producer has run at all. Each `Ok(v)` becomes `Success(v)`; the first
/// `Err(e)` becomes `Failure(e)` and ends the derived stream without
/// propagating the error as a fault. A producer that never emits leaves the
/// derived stream parked after `Pending` — timeouts belong to the producer,
/// not to this layer.
///
/// Wrapping is restartable in the call-again sense: each `wrap` of a freshly
/// built producer stream re-runs it from scratch and re-emits `Pending`.
pub fn wrap<S, T, E>(source: S) -> impl Stream<Item = AsyncResult<T, E>> + Send
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    stream::once(ready(AsyncResult::Pending)).chain(source.map(AsyncResult::from).scan(
        false,
        |failed, outcome| {
            if *failed {
                return ready(None);
            }
            *failed = outcome.is_failure();
            ready(Some(outcome))
        },
    ))
}

/// Adapt a single fallible future into `[Pending, Success(v) | Failure(e)]`.
pub fn wrap_future<F, T, E>(attempt: F) -> impl Stream<Item = AsyncResult<T, E>> + Send
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    wrap(stream::once(attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn pending_is_always_first() {
        let outcomes: Vec<AsyncResult<i32, &str>> =
            wrap(stream::iter(vec![Ok(1), Ok(2)])).collect().await;
        assert_eq!(outcomes[0], AsyncResult::Pending);
    }

    #[tokio::test]
    async fn single_value_yields_pending_then_success() {
        let outcomes: Vec<AsyncResult<i32, &str>> =
            wrap(stream::iter(vec![Ok(7)])).collect().await;
        assert_eq!(outcomes, vec![AsyncResult::Pending, AsyncResult::Success(7)]);
    }

    #[tokio::test]
    async fn immediate_error_yields_pending_then_failure() {
        let outcomes: Vec<AsyncResult<i32, &str>> =
            wrap(stream::iter(vec![Err("boom")])).collect().await;
        assert_eq!(
            outcomes,
            vec![AsyncResult::Pending, AsyncResult::Failure("boom")]
        );
    }

    #[tokio::test]
    async fn failure_ends_the_stream() {
        let outcomes: Vec<AsyncResult<i32, &str>> =
            wrap(stream::iter(vec![Ok(1), Err("boom"), Ok(2)])).collect().await;
        assert_eq!(
            outcomes,
            vec![
                AsyncResult::Pending,
                AsyncResult::Success(1),
                AsyncResult::Failure("boom"),
            ]
        );
    }

    #[tokio::test]
    async fn rewrapping_reruns_the_producer() {
        let make = || stream::iter(vec![Ok::<_, &str>(1)]);

        let first: Vec<_> = wrap(make()).collect().await;
        let second: Vec<_> = wrap(make()).collect().await;
        assert_eq!(first, second);
        assert_eq!(first[0], AsyncResult::Pending);
    }

    #[tokio::test]
    async fn silent_producer_parks_after_pending() {
        let source: stream::Pending<Result<i32, &str>> = stream::pending();
        let wrapped = wrap(source);
        futures::pin_mut!(wrapped);

        assert_eq!(wrapped.next().await, Some(AsyncResult::Pending));
        let parked = tokio::time::timeout(Duration::from_millis(20), wrapped.next()).await;
        assert!(parked.is_err(), "stream should stay parked at Pending");
    }

    #[tokio::test]
    async fn wrap_future_success() {
        let outcomes: Vec<AsyncResult<i32, &str>> =
            wrap_future(async { Ok(24) }).collect().await;
        assert_eq!(outcomes, vec![AsyncResult::Pending, AsyncResult::Success(24)]);
    }

    #[test]
    fn map_transforms_success_only() {
        let ok: AsyncResult<i32, &str> = AsyncResult::Success(2);
        assert_eq!(ok.map(|n| n * 10), AsyncResult::Success(20));

        let err: AsyncResult<i32, &str> = AsyncResult::Failure("boom");
        assert_eq!(err.map(|n| n * 10), AsyncResult::Failure("boom"));

        let pending: AsyncResult<i32, &str> = AsyncResult::Pending;
        assert!(pending.map(|n| n * 10).is_pending());
    }
}
