//! **stratus** — an MVI (Model-View-Intent) state-management runtime for
//! screen-oriented clients.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! stratus = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`stratus_core`] are available at the crate root
//!   ([`Screen`], [`Controller`], [`Scope`], [`AsyncResult`], [`Reducer`],
//!   [`bind`], the [`testing`] harness, etc.).
//! * The [`screens`] module re-exports [`stratus_screens`]: the reference
//!   weather and settings screens plus the collaborator interfaces they
//!   consume.
//! * [`tokio`] and [`futures`] are re-exported so downstream crates do not
//!   need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use stratus::screens::{WeatherIntent, WeatherScreen};
//! use stratus::{bind, Controller};
//!
//! #[tokio::main]
//! async fn main() {
//!     let screen = WeatherScreen::new(weather_client, geocoding_client, insight_client);
//!     let controller = Controller::new(screen);
//!
//!     bind(
//!         &controller,
//!         Some(WeatherIntent::Load(home)),
//!         |state| draw(state),
//!         |effect| react(effect),
//!     )
//!     .await
//!     .unwrap();
//! }
//! ```

pub use stratus_core::*;
pub mod screens {
    pub use stratus_screens::*;
}

// Re-export dependencies for use by downstream crates.
pub use futures;
pub use tokio;
