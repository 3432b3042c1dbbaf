use crate::controller::Scope;
use crate::reducer::Reducer;

/// The immutable rendering snapshot for one screen at one instant.
///
/// A screen's rendered output must be a pure function of the latest state
/// value only, never of history. Implementors are plain data aggregates;
/// derived getters are fine, behavior is not.
pub trait State: Clone + Send + Sync + 'static {}

/// A discrete, named action request submitted to a screen's controller.
///
/// Each screen defines a closed enum of intents; every variant carries exactly
/// the data needed to execute that action and nothing else.
pub trait Intent: Send + 'static {}

/// A one-shot, non-rendered notification emitted by a controller — navigation
/// requests, toasts, and the like. Delivered at most once, never replayed.
pub trait Effect: Send + 'static {}

/// One screen's logic: its three type roles plus the intent handler.
///
/// A `Screen` is stateless — the live state lives in the
/// [`Controller`](crate::Controller)'s cell, and the screen only describes how
/// intents transform it. Screens whose transitions need no async work can
/// configure a pure [`Reducer`]; screens with async work do their state
/// updates from inside [`handle`](Screen::handle) through the [`Scope`].
pub trait Screen: Send + Sync + Sized + 'static {
    /// The screen's rendering snapshot type.
    type State: State;
    /// The closed set of actions this screen accepts.
    type Intent: Intent;
    /// The closed set of one-shot notifications this screen emits.
    type Effect: Effect;

    /// The state a fresh controller for this screen starts from.
    fn initial_state(&self) -> Self::State;

    /// Optional pure reducer, applied before every [`handle`](Screen::handle)
    /// call. Returns `None` (the default) when the screen has no synchronous
    /// transitions worth expressing this way.
    fn reducer(&self) -> Option<&dyn Reducer<Self::State, Self::Intent>> {
        None
    }

    /// The screen-specific intent handler. Always runs, after the reducer if
    /// one is configured, so within one dispatch the handler's writes land on
    /// top of the reducer's — the handler wins on conflict.
    ///
    /// Handlers may update state, emit effects, and start async subscriptions
    /// through the [`Scope`]; they must not block.
    fn handle(&self, intent: Self::Intent, scope: &Scope<Self>);
}
