//! Core library for the weather lookup widget.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The OpenWeather fetcher behind the `WeatherSource` trait
//! - The search state machine, condition classifier and text renderer
//!
//! It is used by `weather-widget`, but any front end that can feed it city text can
//! drive the same state.

pub mod classify;
pub mod config;
pub mod fetcher;
pub mod model;
pub mod render;
pub mod state;

pub use classify::{IconCategory, classify};
pub use config::Config;
pub use fetcher::{ClientSettings, FetchError, WeatherSource, openweather::OpenWeatherClient};
pub use model::WeatherResult;
pub use render::render;
pub use state::{FetchTicket, SearchState, Submission, View};
