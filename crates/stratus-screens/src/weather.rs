//! The weather screen: current conditions, extended forecast, reverse-geocoded
//! place name, and an optional AI-generated insight.
//!
//! One `Load` intent fires three independent fetches; their results merge into
//! one state in whatever order they complete. Failures fold into the `error`
//! field and a [`WeatherEffect::ShowError`] toast while previously successful
//! fields stay intact.

use crate::api::{GeocodingApi, InsightApi, WeatherApi};
use crate::model::{Coordinates, CurrentConditions, Forecast, Place};
use std::sync::Arc;
use stratus_core::{AsyncResult, Scope, Screen};

/// Rendering snapshot for the weather screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherState {
    /// Whether the current-conditions fetch is in flight.
    pub is_loading: bool,
    pub current: Option<CurrentConditions>,
    pub forecast: Option<Forecast>,
    /// Reverse-geocoded place. `None` either before geocoding completes or
    /// when nothing matched the coordinates.
    pub place: Option<Place>,
    pub insight: Option<String>,
    pub insight_loading: bool,
    /// Latest fetch failure, as a user-facing message.
    pub error: Option<String>,
}

impl stratus_core::State for WeatherState {}

/// Actions the weather screen accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherIntent {
    /// Fetch conditions, forecast, and place name for a position.
    Load(Coordinates),
    /// Generate an AI narrative from the currently loaded conditions.
    GenerateInsight,
    /// Navigate to the settings screen.
    OpenSettings,
}

impl stratus_core::Intent for WeatherIntent {}

/// One-shot notifications from the weather screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherEffect {
    ShowError(String),
    NavigateToSettings,
}

impl stratus_core::Effect for WeatherEffect {}

/// The weather screen's logic. Stateless; everything lives in the
/// controller's state cell.
pub struct WeatherScreen {
    weather: Arc<dyn WeatherApi>,
    geocoding: Arc<dyn GeocodingApi>,
    insight: Arc<dyn InsightApi>,
}

impl WeatherScreen {
    pub fn new(
        weather: Arc<dyn WeatherApi>,
        geocoding: Arc<dyn GeocodingApi>,
        insight: Arc<dyn InsightApi>,
    ) -> Self {
        Self {
            weather,
            geocoding,
            insight,
        }
    }

    fn load(&self, at: Coordinates, scope: &Scope<Self>) {
        scope.update_state(|state| WeatherState {
            is_loading: true,
            error: None,
            ..state
        });

        let api = Arc::clone(&self.weather);
        scope.subscribe_future(
            async move { api.current(at).await },
            |scope, outcome| match outcome {
                AsyncResult::Pending => {}
                AsyncResult::Success(current) => scope.update_state(|state| WeatherState {
                    is_loading: false,
                    current: Some(current),
                    ..state
                }),
                AsyncResult::Failure(error) => {
                    let message = error.to_string();
                    scope.update_state(|state| WeatherState {
                        is_loading: false,
                        error: Some(message.clone()),
                        ..state
                    });
                    scope.emit(WeatherEffect::ShowError(message));
                }
            },
        );

        let api = Arc::clone(&self.weather);
        scope.subscribe_future(
            async move { api.forecast(at).await },
            |scope, outcome| match outcome {
                AsyncResult::Pending => {}
                AsyncResult::Success(forecast) => scope.update_state(|state| WeatherState {
                    forecast: Some(forecast),
                    ..state
                }),
                AsyncResult::Failure(error) => {
                    let message = error.to_string();
                    scope.update_state(|state| WeatherState {
                        error: Some(message.clone()),
                        ..state
                    });
                    scope.emit(WeatherEffect::ShowError(message));
                }
            },
        );

        let api = Arc::clone(&self.geocoding);
        scope.subscribe_future(
            async move { api.reverse(at).await },
            |scope, outcome| match outcome {
                AsyncResult::Pending => {}
                // No match is absent data, not an error; a previously
                // resolved place is kept rather than cleared.
                AsyncResult::Success(place) => scope.update_state(|state| WeatherState {
                    place: place.or(state.place),
                    ..state
                }),
                AsyncResult::Failure(error) => {
                    scope.emit(WeatherEffect::ShowError(error.to_string()));
                }
            },
        );
    }

    fn generate_insight(&self, scope: &Scope<Self>) {
        let snapshot = scope.state();
        let Some(current) = snapshot.current else {
            scope.emit(WeatherEffect::ShowError(
                "no conditions to summarize yet".into(),
            ));
            return;
        };

        scope.update_state(|state| WeatherState {
            insight_loading: true,
            ..state
        });

        let place_name = snapshot
            .place
            .map(|p| p.name)
            .unwrap_or_else(|| "this location".to_string());
        let prompt = format!(
            "In two sentences, describe {} weather in {}: {:.1}°C (feels like {:.1}°C), \
             humidity {}%, wind {:.0} km/h.",
            current.summary,
            place_name,
            current.temperature_c,
            current.apparent_c,
            current.humidity_pct,
            current.wind_kmh,
        );

        let api = Arc::clone(&self.insight);
        scope.subscribe_future(
            async move { api.generate(&prompt).await },
            |scope, outcome| match outcome {
                AsyncResult::Pending => {}
                AsyncResult::Success(text) => scope.update_state(|state| WeatherState {
                    insight: Some(text),
                    insight_loading: false,
                    ..state
                }),
                AsyncResult::Failure(error) => {
                    scope.update_state(|state| WeatherState {
                        insight_loading: false,
                        ..state
                    });
                    scope.emit(WeatherEffect::ShowError(error.to_string()));
                }
            },
        );
    }
}

impl Screen for WeatherScreen {
    type State = WeatherState;
    type Intent = WeatherIntent;
    type Effect = WeatherEffect;

    fn initial_state(&self) -> WeatherState {
        WeatherState::default()
    }

    fn handle(&self, intent: WeatherIntent, scope: &Scope<Self>) {
        match intent {
            WeatherIntent::Load(at) => self.load(at, scope),
            WeatherIntent::GenerateInsight => self.generate_insight(scope),
            WeatherIntent::OpenSettings => scope.emit(WeatherEffect::NavigateToSettings),
        }
    }
}
