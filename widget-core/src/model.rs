use serde::Deserialize;

/// Flattened projection of an OpenWeather current-weather response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub temperature_c: f64,
    pub location_name: String,
    pub humidity_pct: u8,
    /// As reported upstream; not converted.
    pub wind_speed: f64,
    /// `weather[0].main`, if the upstream array was non-empty.
    pub condition_main: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwMain {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWeather {
    pub main: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwWind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwCurrentResponse {
    pub name: String,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub wind: OwWind,
}

impl From<OwCurrentResponse> for WeatherResult {
    fn from(parsed: OwCurrentResponse) -> Self {
        let condition_main = parsed.weather.into_iter().next().map(|w| w.main);

        Self {
            temperature_c: parsed.main.temp,
            location_name: parsed.name,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            condition_main,
        }
    }
}
