use std::fmt;

use crate::{
    classify::classify,
    state::{SearchState, View},
};

const TITLE: &str = "Weather App";
const PLACEHOLDER: &str = "search location";

/// Renders the whole widget for `state` as plain text.
pub fn render(state: &SearchState) -> String {
    Panel(state).to_string()
}

/// `Display` adapter over a [`SearchState`].
pub struct Panel<'a>(pub &'a SearchState);

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "{TITLE}")?;
        if state.city_text().is_empty() {
            writeln!(f, "[ {PLACEHOLDER} ]")?;
        } else {
            writeln!(f, "[ {} ]", state.city_text())?;
        }

        match state.view() {
            View::Idle => {}
            View::HasError(message) => {
                writeln!(f)?;
                writeln!(f, "{message}")?;
            }
            View::HasResult(weather) => {
                let icon = classify(weather.condition_main.as_deref());

                writeln!(f)?;
                writeln!(f, "{}", icon.glyph())?;
                writeln!(f, "{}°C", weather.temperature_c)?;
                writeln!(f, "{}", weather.location_name)?;
                writeln!(f)?;
                writeln!(f, "💧 {}% Humidity", weather.humidity_pct)?;
                // Upstream reports m/s in metric mode; the label has always said km/h.
                writeln!(f, "🌬 {} km/h Wind Speed", weather.wind_speed)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{WeatherResult, fetcher::FetchError, state::Submission};

    fn resolved(city: &str, outcome: Result<WeatherResult, FetchError>) -> SearchState {
        let mut state = SearchState::new();
        state.set_city_text(city);
        let Submission::Fetch(ticket) = state.submit() else { panic!("expected fetch") };
        state.resolve_fetch(&ticket, outcome);
        state
    }

    #[test]
    fn idle_shows_placeholder_only() {
        let out = render(&SearchState::new());

        assert_eq!(out, "Weather App\n[ search location ]\n");
    }

    #[test]
    fn typed_text_is_echoed() {
        let mut state = SearchState::new();
        state.set_city_text("Osl");

        assert!(render(&state).contains("[ Osl ]"));
    }

    #[test]
    fn values_render_verbatim() {
        let state = resolved(
            "oslo",
            Ok(WeatherResult {
                temperature_c: 21.5,
                location_name: "Oslo".into(),
                humidity_pct: 60,
                wind_speed: 5.0,
                condition_main: Some("Clear".into()),
            }),
        );

        let out = render(&state);
        assert!(out.contains("\n21.5°C\n"), "{out}");
        assert!(out.contains("\nOslo\n"), "{out}");
        assert!(out.contains("60% Humidity"), "{out}");
        assert!(out.contains(" 5 km/h Wind Speed"), "{out}");
        assert!(out.contains("☁"), "{out}");
    }

    #[test]
    fn missing_condition_uses_default_icon() {
        let state = resolved(
            "x",
            Ok(WeatherResult {
                temperature_c: 0.0,
                location_name: "X".into(),
                humidity_pct: 1,
                wind_speed: 0.5,
                condition_main: None,
            }),
        );

        assert!(render(&state).contains("⛅"));
    }

    #[test]
    fn error_hides_weather_panel() {
        let state = resolved("Atlantis", Err(FetchError::NotFound { status: 404 }));
        let out = render(&state);

        assert!(out.contains("City not found. Please try again"));
        assert!(!out.contains("Humidity"));
    }
}
