//! Headless test harness for screens.
//!
//! [`Harness`] stands in for the rendering layer: it owns a controller, the
//! state observation handle, and the effect stream, so a plain
//! `#[tokio::test]` can dispatch intents and assert on the resulting states
//! and effects without any view code.

use crate::controller::{Controller, ControllerOptions, Effects};
use crate::screen::Screen;
use std::time::Duration;
use tokio::sync::watch;

const WAIT_BUDGET: Duration = Duration::from_secs(1);

/// Drives a [`Screen`] through its controller in tests.
///
/// # Example
///
/// ```rust,ignore
/// let mut harness = Harness::new(WeatherScreen::new(weather, geocoding, insight));
/// harness.dispatch(WeatherIntent::Load(home));
/// let state = harness.wait_for(|s| !s.is_loading).await;
/// assert!(state.current.is_some());
/// ```
pub struct Harness<SC: Screen> {
    controller: Controller<SC>,
    state: watch::Receiver<SC::State>,
    effects: Effects<SC::Effect>,
}

impl<SC: Screen> Harness<SC> {
    /// Harness a screen with default controller options.
    pub fn new(screen: SC) -> Self {
        Self::with_options(screen, ControllerOptions::default())
    }

    /// Harness a screen with custom controller options.
    pub fn with_options(screen: SC, options: ControllerOptions) -> Self {
        let controller = Controller::with_options(screen, options);
        let state = controller.observe();
        let effects = controller
            .effects()
            .expect("fresh controller has an unclaimed effect stream");
        Self {
            controller,
            state,
            effects,
        }
    }

    /// The controller under test.
    pub fn controller(&self) -> &Controller<SC> {
        &self.controller
    }

    /// Dispatch an intent.
    pub fn dispatch(&self, intent: SC::Intent) {
        self.controller.dispatch(intent);
    }

    /// A clone of the current state.
    pub fn state(&self) -> SC::State {
        self.controller.state()
    }

    /// Wait until the observed state satisfies `pred` and return it.
    ///
    /// Panics after one second — a stuck condition is a test failure, not
    /// something to await forever.
    pub async fn wait_for(&mut self, pred: impl FnMut(&SC::State) -> bool) -> SC::State {
        match tokio::time::timeout(WAIT_BUDGET, self.state.wait_for(pred)).await {
            Ok(Ok(state)) => state.clone(),
            Ok(Err(_)) => panic!("controller dropped while waiting for state"),
            Err(_) => panic!("timed out waiting for state condition"),
        }
    }

    /// Wait for the next effect. Panics after one second.
    pub async fn next_effect(&mut self) -> SC::Effect {
        match tokio::time::timeout(WAIT_BUDGET, self.effects.recv()).await {
            Ok(Some(effect)) => effect,
            Ok(None) => panic!("effect stream closed"),
            Err(_) => panic!("timed out waiting for effect"),
        }
    }

    /// Take the next queued effect without waiting, if any.
    pub fn try_effect(&mut self) -> Option<SC::Effect> {
        self.effects.try_recv()
    }

    /// Destroy the controller under test.
    pub fn destroy(&self) {
        self.controller.destroy();
    }
}
