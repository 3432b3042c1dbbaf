//! The settings screen: theme selection and back navigation.
//!
//! Its transitions are simple enough for the pure reducer path — the reducer
//! flips the theme in state, and the handler's only jobs are persisting the
//! flip to the [`ThemeStore`] and emitting the back-navigation effect.

use crate::api::ThemeStore;
use crate::model::Theme;
use std::sync::{Arc, Mutex};
use stratus_core::{Reducer, Scope, Screen};

/// Rendering snapshot for the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsState {
    pub theme: Theme,
}

impl stratus_core::State for SettingsState {}

/// Actions the settings screen accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsIntent {
    ToggleTheme,
    Back,
}

impl stratus_core::Intent for SettingsIntent {}

/// One-shot notifications from the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEffect {
    NavigateBack,
}

impl stratus_core::Effect for SettingsEffect {}

fn reduce_settings(state: &SettingsState, intent: &SettingsIntent) -> SettingsState {
    match intent {
        SettingsIntent::ToggleTheme => SettingsState {
            theme: state.theme.toggled(),
        },
        SettingsIntent::Back => *state,
    }
}

static SETTINGS_REDUCER: fn(&SettingsState, &SettingsIntent) -> SettingsState = reduce_settings;

/// The settings screen's logic.
pub struct SettingsScreen {
    store: Arc<dyn ThemeStore>,
}

impl SettingsScreen {
    pub fn new(store: Arc<dyn ThemeStore>) -> Self {
        Self { store }
    }
}

impl Screen for SettingsScreen {
    type State = SettingsState;
    type Intent = SettingsIntent;
    type Effect = SettingsEffect;

    fn initial_state(&self) -> SettingsState {
        SettingsState {
            theme: self.store.theme(),
        }
    }

    fn reducer(&self) -> Option<&dyn Reducer<SettingsState, SettingsIntent>> {
        Some(&SETTINGS_REDUCER)
    }

    fn handle(&self, intent: SettingsIntent, scope: &Scope<Self>) {
        match intent {
            // State was already flipped by the reducer; persist the flip.
            SettingsIntent::ToggleTheme => {
                self.store.toggle();
            }
            SettingsIntent::Back => scope.emit(SettingsEffect::NavigateBack),
        }
    }
}

/// In-memory [`ThemeStore`], for hosts without real persistence and for
/// tests.
#[derive(Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Theme>,
}

impl MemoryThemeStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(theme),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Theme> {
        match self.theme.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn theme(&self) -> Theme {
        *self.lock()
    }

    fn toggle(&self) -> Theme {
        let mut guard = self.lock();
        *guard = guard.toggled();
        *guard
    }
}
