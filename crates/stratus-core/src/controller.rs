use crate::async_result::{wrap, AsyncResult};
use crate::screen::Screen;
use futures::{Stream, StreamExt};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

/// Configuration for a [`Controller`].
///
/// # Example
///
/// ```rust,ignore
/// use stratus_core::{Controller, ControllerOptions};
///
/// let controller = Controller::with_options(
///     MyScreen::new(),
///     ControllerOptions { effect_capacity: Some(64) },
/// );
/// ```
#[derive(Default)]
pub struct ControllerOptions {
    /// Effect queue capacity. `None` (the default) keeps the queue unbounded;
    /// with a bound, an effect that does not fit is dropped and logged.
    ///
    /// An unbounded queue never drops, but producers must not emit effects
    /// faster than the binding consumes them.
    pub effect_capacity: Option<usize>,
}

enum EffectTx<E> {
    Unbounded(mpsc::UnboundedSender<E>),
    Bounded(mpsc::Sender<E>),
}

impl<E> Clone for EffectTx<E> {
    fn clone(&self) -> Self {
        match self {
            EffectTx::Unbounded(tx) => EffectTx::Unbounded(tx.clone()),
            EffectTx::Bounded(tx) => EffectTx::Bounded(tx.clone()),
        }
    }
}

impl<E> EffectTx<E> {
    fn send(&self, effect: E) {
        match self {
            EffectTx::Unbounded(tx) => {
                let _ = tx.send(effect);
            }
            EffectTx::Bounded(tx) => {
                if let Err(mpsc::error::TrySendError::Full(_)) = tx.try_send(effect) {
                    tracing::warn!(
                        effect = std::any::type_name::<E>(),
                        "effect queue full, dropping effect"
                    );
                }
            }
        }
    }
}

enum EffectRx<E> {
    Unbounded(mpsc::UnboundedReceiver<E>),
    Bounded(mpsc::Receiver<E>),
}

/// The receiving half of a controller's effect queue.
///
/// Obtained exactly once per controller via [`Controller::effects`]. Effects
/// emitted while nothing is receiving are queued, not dropped, and each effect
/// is delivered at most once.
pub struct Effects<E> {
    rx: EffectRx<E>,
}

impl<E> Effects<E> {
    /// Receive the next effect, waiting until one is emitted. Returns `None`
    /// once the controller has been dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<E> {
        match &mut self.rx {
            EffectRx::Unbounded(rx) => rx.recv().await,
            EffectRx::Bounded(rx) => rx.recv().await,
        }
    }

    /// Take the next queued effect without waiting.
    pub fn try_recv(&mut self) -> Option<E> {
        match &mut self.rx {
            EffectRx::Unbounded(rx) => rx.try_recv().ok(),
            EffectRx::Bounded(rx) => rx.try_recv().ok(),
        }
    }
}

struct Shared<SC: Screen> {
    state_tx: watch::Sender<SC::State>,
    effect_tx: EffectTx<SC::Effect>,
    cancel: CancellationToken,
}

/// The per-screen owner of state and effect delivery.
///
/// A `Controller` holds exactly one live [`State`](crate::State) value in a
/// latest-wins cell and one effect queue. All external stimuli enter through
/// [`dispatch`](Controller::dispatch); the rendering layer holds only the
/// read-only observation handles returned by [`observe`](Controller::observe)
/// and [`effects`](Controller::effects), never a mutable reference.
///
/// # Lifecycle
///
/// A controller is **Active** from construction until
/// [`destroy`](Controller::destroy) (or drop), and **Destroyed** afterwards —
/// a terminal state in which every in-flight subscription is cancelled and
/// further dispatches are ignored. The transition happens exactly once.
pub struct Controller<SC: Screen> {
    screen: Arc<SC>,
    shared: Arc<Shared<SC>>,
    effect_rx: Mutex<Option<Effects<SC::Effect>>>,
}

impl<SC: Screen> Controller<SC> {
    /// Create a controller with default options.
    pub fn new(screen: SC) -> Self {
        Self::with_options(screen, ControllerOptions::default())
    }

    /// Create a controller with custom options.
    pub fn with_options(screen: SC, options: ControllerOptions) -> Self {
        let screen = Arc::new(screen);
        let (state_tx, _) = watch::channel(screen.initial_state());
        let (effect_tx, effect_rx) = match options.effect_capacity {
            None => {
                let (tx, rx) = mpsc::unbounded_channel();
                (EffectTx::Unbounded(tx), EffectRx::Unbounded(rx))
            }
            Some(capacity) => {
                let (tx, rx) = mpsc::channel(capacity);
                (EffectTx::Bounded(tx), EffectRx::Bounded(rx))
            }
        };

        Self {
            screen,
            shared: Arc::new(Shared {
                state_tx,
                effect_tx,
                cancel: CancellationToken::new(),
            }),
            effect_rx: Mutex::new(Some(Effects { rx: effect_rx })),
        }
    }

    /// Entry point for all external stimuli.
    ///
    /// Applies the screen's configured reducer first (atomically, against the
    /// latest state), then always runs the screen's intent handler. A
    /// destroyed controller ignores dispatches.
    pub fn dispatch(&self, intent: SC::Intent) {
        dispatch_on(&self.screen, &self.shared, intent);
    }

    /// A clone of the current state.
    pub fn state(&self) -> SC::State {
        self.shared.state_tx.borrow().clone()
    }

    /// A read-only, continuously updated view of the state cell.
    ///
    /// Observers always see the latest state; intermediate states between two
    /// reads may be skipped (latest wins).
    pub fn observe(&self) -> watch::Receiver<SC::State> {
        self.shared.state_tx.subscribe()
    }

    /// The state observation as a `Stream`, yielding the current snapshot
    /// first and then every subsequently observed state.
    pub fn observe_stream(&self) -> WatchStream<SC::State> {
        WatchStream::new(self.observe())
    }

    /// Take the effect receiving half. Returns `Some` exactly once per
    /// controller instance; a binding that subscribes twice gets `None`.
    pub fn effects(&self) -> Option<Effects<SC::Effect>> {
        let mut slot = match self.effect_rx.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.take()
    }

    /// A [`Scope`] for this controller, as handed to intent handlers.
    ///
    /// Mostly useful in tests that want to drive state or subscriptions
    /// without going through an intent.
    pub fn scope(&self) -> Scope<SC> {
        Scope {
            screen: self.screen.clone(),
            shared: self.shared.clone(),
        }
    }

    /// Tear the controller down: cancel every subscription it started and
    /// ignore all further dispatches. Idempotent; also runs on drop.
    pub fn destroy(&self) {
        if !self.shared.cancel.is_cancelled() {
            tracing::debug!(screen = std::any::type_name::<SC>(), "controller destroyed");
            self.shared.cancel.cancel();
        }
    }

    /// `true` once [`destroy`](Controller::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    pub(crate) async fn cancelled(&self) {
        self.shared.cancel.cancelled().await;
    }
}

impl<SC: Screen> Drop for Controller<SC> {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

fn dispatch_on<SC: Screen>(screen: &Arc<SC>, shared: &Arc<Shared<SC>>, intent: SC::Intent) {
    if shared.cancel.is_cancelled() {
        tracing::debug!(
            screen = std::any::type_name::<SC>(),
            "dispatch on destroyed controller ignored"
        );
        return;
    }

    if let Some(reducer) = screen.reducer() {
        shared
            .state_tx
            .send_modify(|state| *state = reducer.reduce(state, &intent));
    }

    let scope = Scope {
        screen: screen.clone(),
        shared: shared.clone(),
    };
    screen.handle(intent, &scope);
}

/// A handler's capability to act on its controller.
///
/// Handed to [`Screen::handle`](crate::Screen::handle) and to subscription
/// callbacks. Cheap to clone; every clone acts on the same controller and is
/// subject to the same cancellation.
pub struct Scope<SC: Screen> {
    screen: Arc<SC>,
    shared: Arc<Shared<SC>>,
}

impl<SC: Screen> Clone for Scope<SC> {
    fn clone(&self) -> Self {
        Self {
            screen: self.screen.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<SC: Screen> Scope<SC> {
    /// Atomically replace the current state with `transform(current)`.
    ///
    /// The transform runs against the latest state at the time it runs, under
    /// the cell's write lock — concurrent calls from parallel subscriptions
    /// are serialized and never lose updates. No-op once destroyed.
    pub fn update_state(&self, transform: impl FnOnce(SC::State) -> SC::State) {
        if self.shared.cancel.is_cancelled() {
            return;
        }
        self.shared
            .state_tx
            .send_modify(|state| *state = transform(state.clone()));
    }

    /// A clone of the current state, for handlers that need to read before
    /// deciding what to do.
    pub fn state(&self) -> SC::State {
        self.shared.state_tx.borrow().clone()
    }

    /// Enqueue a one-shot effect for the binding to consume.
    pub fn emit(&self, effect: SC::Effect) {
        if self.shared.cancel.is_cancelled() {
            return;
        }
        self.shared.effect_tx.send(effect);
    }

    /// Re-dispatch an intent on the same controller, e.g. for a handler-level
    /// retry.
    pub fn dispatch(&self, intent: SC::Intent) {
        dispatch_on(&self.screen, &self.shared, intent);
    }

    /// The canonical pattern for one asynchronous operation inside a handler.
    ///
    /// Wraps `producer` per [`wrap`] and folds every
    /// [`AsyncResult`] outcome into `apply`, which is expected to call
    /// [`update_state`](Scope::update_state) / [`emit`](Scope::emit). The
    /// subscription runs on its own task, scoped to the controller's
    /// lifetime: destroying the controller cancels it and no further outcome
    /// is delivered.
    ///
    /// Outcomes of one subscription arrive in order and never interleave with
    /// themselves; nothing is guaranteed between independent subscriptions.
    pub fn subscribe<P, T, E, F>(&self, producer: P, mut apply: F)
    where
        P: Stream<Item = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        F: FnMut(&Scope<SC>, AsyncResult<T, E>) + Send + 'static,
    {
        if self.shared.cancel.is_cancelled() {
            return;
        }

        let scope = self.clone();
        let cancel = self.shared.cancel.clone();
        tokio::spawn(async move {
            let outcomes = wrap(producer);
            futures::pin_mut!(outcomes);
            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => break,

                    next = outcomes.next() => match next {
                        Some(outcome) => apply(&scope, outcome),
                        None => break,
                    },
                }
            }
        });
    }

    /// [`subscribe`](Scope::subscribe) for the common single-attempt case.
    pub fn subscribe_future<Fut, T, E, F>(&self, attempt: Fut, apply: F)
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        F: FnMut(&Scope<SC>, AsyncResult<T, E>) + Send + 'static,
    {
        self.subscribe(futures::stream::once(attempt), apply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::Reducer;
    use crate::screen::{Effect, Intent, Screen, State};
    use std::time::Duration;
    use tokio_stream::wrappers::UnboundedReceiverStream;

    #[derive(Clone, Debug, PartialEq, Eq, Default)]
    struct PairState {
        left: Option<u32>,
        right: Option<u32>,
        error: Option<String>,
    }
    impl State for PairState {}

    enum PairIntent {
        Left(UnboundedReceiverStream<Result<u32, String>>),
        Right(UnboundedReceiverStream<Result<u32, String>>),
        Note(String),
    }
    impl Intent for PairIntent {}

    #[derive(Debug, PartialEq, Eq)]
    enum PairEffect {
        Noted(String),
    }
    impl Effect for PairEffect {}

    struct PairScreen;

    impl Screen for PairScreen {
        type State = PairState;
        type Intent = PairIntent;
        type Effect = PairEffect;

        fn initial_state(&self) -> PairState {
            PairState::default()
        }

        fn handle(&self, intent: PairIntent, scope: &Scope<Self>) {
            match intent {
                PairIntent::Left(source) => scope.subscribe(source, |scope, outcome| {
                    match outcome {
                        AsyncResult::Pending => {}
                        AsyncResult::Success(v) => scope.update_state(|s| PairState {
                            left: Some(v),
                            ..s
                        }),
                        AsyncResult::Failure(e) => scope.update_state(|s| PairState {
                            error: Some(e),
                            ..s
                        }),
                    }
                }),
                PairIntent::Right(source) => scope.subscribe(source, |scope, outcome| {
                    if let AsyncResult::Success(v) = outcome {
                        scope.update_state(|s| PairState {
                            right: Some(v),
                            ..s
                        });
                    }
                }),
                PairIntent::Note(text) => scope.emit(PairEffect::Noted(text)),
            }
        }
    }

    fn feed() -> (
        mpsc::UnboundedSender<Result<u32, String>>,
        UnboundedReceiverStream<Result<u32, String>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, UnboundedReceiverStream::new(rx))
    }

    async fn wait_for(
        rx: &mut watch::Receiver<PairState>,
        pred: impl FnMut(&PairState) -> bool,
    ) -> PairState {
        tokio::time::timeout(Duration::from_secs(1), rx.wait_for(pred))
            .await
            .expect("timed out waiting for state")
            .expect("controller dropped")
            .clone()
    }

    #[tokio::test]
    async fn concurrent_subscriptions_do_not_lose_updates() {
        let controller = Controller::new(PairScreen);
        let mut state = controller.observe();

        let (left_tx, left_rx) = feed();
        let (right_tx, right_rx) = feed();
        controller.dispatch(PairIntent::Left(left_rx));
        controller.dispatch(PairIntent::Right(right_rx));

        // Complete in "wrong" order relative to dispatch.
        right_tx.send(Ok(2)).unwrap();
        left_tx.send(Ok(1)).unwrap();

        let settled =
            wait_for(&mut state, |s| s.left.is_some() && s.right.is_some()).await;
        assert_eq!(settled.left, Some(1));
        assert_eq!(settled.right, Some(2));
    }

    #[tokio::test]
    async fn destroy_cancels_outstanding_subscriptions() {
        let controller = Controller::new(PairScreen);
        let (left_tx, left_rx) = feed();
        controller.dispatch(PairIntent::Left(left_rx));
        tokio::task::yield_now().await;

        controller.destroy();
        assert!(controller.is_destroyed());

        // Force completion after destruction; the outcome must not land.
        let _ = left_tx.send(Ok(99));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(controller.state(), PairState::default());
    }

    #[tokio::test]
    async fn dispatch_after_destroy_is_ignored() {
        let controller = Controller::new(PairScreen);
        controller.destroy();
        controller.destroy(); // idempotent

        controller.dispatch(PairIntent::Note("late".into()));
        let mut effects = controller.effects().expect("first take");
        assert!(effects.try_recv().is_none());
    }

    #[tokio::test]
    async fn subscription_failure_is_folded_not_fatal() {
        let controller = Controller::new(PairScreen);
        let mut state = controller.observe();

        let (left_tx, left_rx) = feed();
        controller.dispatch(PairIntent::Left(left_rx));
        left_tx.send(Err("network unreachable".into())).unwrap();

        let settled = wait_for(&mut state, |s| s.error.is_some()).await;
        assert_eq!(settled.error.as_deref(), Some("network unreachable"));
        assert_eq!(settled.left, None);
    }

    #[tokio::test]
    async fn effect_emitted_without_observer_is_queued_once() {
        let controller = Controller::new(PairScreen);
        controller.dispatch(PairIntent::Note("hello".into()));

        let mut effects = controller.effects().expect("first take");
        assert_eq!(effects.recv().await, Some(PairEffect::Noted("hello".into())));
        // Delivered exactly once.
        assert!(effects.try_recv().is_none());
        // And the receiving half can only be taken once.
        assert!(controller.effects().is_none());
    }

    #[tokio::test]
    async fn bounded_effect_queue_drops_overflow() {
        let controller = Controller::with_options(
            PairScreen,
            ControllerOptions {
                effect_capacity: Some(1),
            },
        );
        controller.dispatch(PairIntent::Note("kept".into()));
        controller.dispatch(PairIntent::Note("dropped".into()));

        let mut effects = controller.effects().expect("first take");
        assert_eq!(effects.try_recv(), Some(PairEffect::Noted("kept".into())));
        assert_eq!(effects.try_recv(), None);
    }

    #[tokio::test]
    async fn observe_stream_yields_current_then_updates() {
        let controller = Controller::new(PairScreen);
        let mut states = controller.observe_stream();

        assert_eq!(states.next().await, Some(PairState::default()));

        controller.scope().update_state(|s| PairState {
            left: Some(5),
            ..s
        });
        let next = states.next().await.expect("stream alive");
        assert_eq!(next.left, Some(5));
    }

    // Reducer-then-handler composition.

    #[derive(Clone, Debug, PartialEq, Eq, Default)]
    struct CountState {
        count: u32,
        seen_by_handler: u32,
    }
    impl State for CountState {}

    enum CountIntent {
        Bump,
    }
    impl Intent for CountIntent {}

    enum NoEffect {}
    impl Effect for NoEffect {}

    fn bump(state: &CountState, _: &CountIntent) -> CountState {
        CountState {
            count: state.count + 1,
            ..state.clone()
        }
    }

    static BUMP: fn(&CountState, &CountIntent) -> CountState = bump;

    struct CountScreen;

    impl Screen for CountScreen {
        type State = CountState;
        type Intent = CountIntent;
        type Effect = NoEffect;

        fn initial_state(&self) -> CountState {
            CountState::default()
        }

        fn reducer(&self) -> Option<&dyn Reducer<CountState, CountIntent>> {
            Some(&BUMP)
        }

        fn handle(&self, _intent: CountIntent, scope: &Scope<Self>) {
            // Record the state the handler observed; proves the reducer ran
            // first and that the handler's write lands on top.
            scope.update_state(|s| CountState {
                seen_by_handler: s.count,
                ..s
            });
        }
    }

    #[tokio::test]
    async fn reducer_runs_before_handler_and_handler_wins() {
        let controller = Controller::new(CountScreen);
        controller.dispatch(CountIntent::Bump);
        controller.dispatch(CountIntent::Bump);

        let state = controller.state();
        assert_eq!(state.count, 2);
        assert_eq!(state.seen_by_handler, 2);
    }
}
