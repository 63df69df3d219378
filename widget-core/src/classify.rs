//! Maps an upstream condition string to an icon category.
//!
//! The mapping is reproduced as the widget has always shown it: a clear sky gets the
//! plain cloud icon and cloudy weather gets the cloud-with-sun icon.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconCategory {
    #[default]
    Default,
    Cloud,
    CloudSun,
    CloudShowers,
}

impl IconCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Default => "default",
            IconCategory::Cloud => "cloud",
            IconCategory::CloudSun => "cloud-sun",
            IconCategory::CloudShowers => "cloud-showers",
        }
    }

    /// Terminal glyph. `Default` shares the cloud-sun glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Default | IconCategory::CloudSun => "⛅",
            IconCategory::Cloud => "☁",
            IconCategory::CloudShowers => "🌧",
        }
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(condition: Option<&str>) -> IconCategory {
    let Some(condition) = condition else {
        return IconCategory::Default;
    };

    match condition.to_lowercase().as_str() {
        "clear" => IconCategory::Cloud,
        "clouds" => IconCategory::CloudSun,
        "rain" | "drizzle" | "thunderstorm" => IconCategory::CloudShowers,
        _ => IconCategory::CloudSun,
    }
}
