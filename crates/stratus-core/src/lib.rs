//! Core runtime for **stratus** — an MVI (Model-View-Intent) state-management
//! runtime for screen-oriented clients.
//!
//! `stratus-core` provides the types and controller that every screen is
//! built on: a unidirectional mechanism for turning asynchronous, possibly
//! concurrent, possibly failing data operations into a single consistent,
//! observable state object per screen, plus a decoupled one-shot effect
//! channel for navigation/toast-style events.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`State`] / [`Intent`] / [`Effect`] | The three type roles every screen defines |
//! | [`Screen`] | One screen's logic: initial state, optional reducer, intent handler |
//! | [`Reducer`] | Pure `(state, intent) -> state` transition for synchronous screens |
//! | [`AsyncResult`] | Pending / Success / Failure wrapper around one async attempt |
//! | [`Controller`] | Per-screen owner of the state cell and effect queue |
//! | [`Scope`] | A handler's capability to update state, emit effects, subscribe |
//! | [`bind`] | Glue that drives a rendering layer from a controller |
//! | [`Harness`](testing::Harness) | Headless harness for testing screens without a view |
//!
//! # Architecture
//!
//! 1. **dispatch** — The rendering layer submits an [`Intent`] to the screen's
//!    [`Controller`].
//! 2. **reduce** — If the screen configures a [`Reducer`], it runs first,
//!    atomically, against the latest state.
//! 3. **handle** — The screen's intent handler always runs next. It may start
//!    any number of async subscriptions, each observed as a stream of
//!    [`AsyncResult`] outcomes (`Pending` first, then `Success` per value or
//!    one terminal `Failure`).
//! 4. **fold** — Each outcome updates the state cell atomically; independent
//!    subscriptions complete in any order and never lose each other's
//!    updates.
//! 5. **render** — The rendering layer re-renders from the latest state;
//!    one-shot [`Effect`]s are delivered on the side, each at most once.
//!
//! Destroying a controller cancels every subscription it started; a cancelled
//! subscription delivers nothing further.
//!
//! # Quick example
//!
//! ```ignore
//! use stratus_core::{AsyncResult, Controller, Scope, Screen};
//!
//! #[derive(Clone, Default)]
//! struct CounterState { count: i64 }
//! impl stratus_core::State for CounterState {}
//!
//! enum CounterIntent { Add(i64) }
//! impl stratus_core::Intent for CounterIntent {}
//!
//! enum CounterEffect {}
//! impl stratus_core::Effect for CounterEffect {}
//!
//! struct CounterScreen;
//!
//! impl Screen for CounterScreen {
//!     type State = CounterState;
//!     type Intent = CounterIntent;
//!     type Effect = CounterEffect;
//!
//!     fn initial_state(&self) -> CounterState { CounterState::default() }
//!
//!     fn handle(&self, intent: CounterIntent, scope: &Scope<Self>) {
//!         match intent {
//!             CounterIntent::Add(n) => {
//!                 scope.update_state(|s| CounterState { count: s.count + n })
//!             }
//!         }
//!     }
//! }
//!
//! let controller = Controller::new(CounterScreen);
//! controller.dispatch(CounterIntent::Add(2));
//! assert_eq!(controller.state().count, 2);
//! ```

pub mod async_result;
pub mod binding;
pub mod controller;
pub mod reducer;
pub mod screen;
pub mod testing;

pub use async_result::{wrap, wrap_future, AsyncResult};
pub use binding::{bind, BindError};
pub use controller::{Controller, ControllerOptions, Effects, Scope};
pub use reducer::Reducer;
pub use screen::{Effect, Intent, Screen, State};
