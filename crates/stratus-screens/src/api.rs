//! Collaborator interfaces, specified at their boundary only.
//!
//! The screens talk to the outside world exclusively through these traits.
//! Concrete HTTP implementations live with the host application; tests use
//! in-memory stubs. Timeouts and retries belong behind these interfaces, not
//! in the screens.

use crate::model::{Coordinates, CurrentConditions, Forecast, Place, Theme};
use async_trait::async_trait;

/// A failure from an asynchronous collaborator.
///
/// Always convertible to a user-facing message via `Display` — that is the
/// form in which failures are folded into screen state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
    /// The response arrived but could not be understood.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Weather data provider.
#[async_trait]
pub trait WeatherApi: Send + Sync + 'static {
    /// Current conditions at the given position.
    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, ApiError>;

    /// Extended forecast at the given position.
    async fn forecast(&self, at: Coordinates) -> Result<Forecast, ApiError>;
}

/// Reverse-geocoding provider.
#[async_trait]
pub trait GeocodingApi: Send + Sync + 'static {
    /// Resolve a position to a place. `Ok(None)` when nothing matches —
    /// absent data, not an error.
    async fn reverse(&self, at: Coordinates) -> Result<Option<Place>, ApiError>;
}

/// AI insight generation provider.
#[async_trait]
pub trait InsightApi: Send + Sync + 'static {
    /// Generate a short narrative for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Persistent theme holder, consumed synchronously by the settings screen.
pub trait ThemeStore: Send + Sync + 'static {
    /// The currently persisted theme.
    fn theme(&self) -> Theme;

    /// Flip and persist the theme, returning the new value.
    fn toggle(&self) -> Theme;
}
