//! Reference screens for the **stratus** MVI runtime, plus the collaborator
//! interfaces they consume.
//!
//! The two screens here are the canonical consumers of
//! [`stratus-core`](stratus_core): the [`weather`] screen exercises the
//! concurrent-subscription path (three independent fetches merged into one
//! state), and the [`settings`] screen exercises the pure reducer path.
//!
//! External services — the weather, geocoding, and AI-insight providers and
//! the persistent theme holder — are specified only at their interface
//! boundary in [`api`]; concrete HTTP implementations belong to the host
//! application.

pub mod api;
pub mod model;
pub mod settings;
pub mod weather;

pub use api::{ApiError, GeocodingApi, InsightApi, ThemeStore, WeatherApi};
pub use model::{Coordinates, CurrentConditions, Forecast, ForecastDay, Place, Theme};
pub use settings::{
    MemoryThemeStore, SettingsEffect, SettingsIntent, SettingsScreen, SettingsState,
};
pub use weather::{WeatherEffect, WeatherIntent, WeatherScreen, WeatherState};
