//! Domain value types shared by the collaborator boundary and the screens.
//!
//! These are deliberately sparse — they model what the screens render, not
//! every field the upstream providers return.

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_c: f64,
    pub humidity_pct: u8,
    pub wind_kmh: f64,
    /// Short human-readable summary, e.g. "partly cloudy".
    pub summary: String,
}

/// One day of the extended forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    /// Display label for the day, e.g. "Tue".
    pub label: String,
    pub high_c: f64,
    pub low_c: f64,
}

/// The extended forecast for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
}

/// A reverse-geocoded place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub region: Option<String>,
}

/// The application theme, held by a [`ThemeStore`](crate::api::ThemeStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
