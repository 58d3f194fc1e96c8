//! WMO weather-code tables and small display helpers.

const CLEAR_ART: &str = "    \\   |   /     \n     .--.--.\n    /   |   \\    \n    ";
const PARTLY_CLOUDY_ART: &str = "    \\   |   /     \n  .--.  -.- \n ( _ ).(___(\n  /(___(___)\n    ";
const OVERCAST_ART: &str = "             \n  .--.    \n .(   ).  \n(___.__)  \n    ";
const FOG_ART: &str = "             \n _ - _ - _\n  _ - _ -  \n _ - _ - _\n    ";
const DRIZZLE_ART: &str = "             \n  .--.    \n .(   ).  \n(___.__)  \n  / /     \n    ";
const RAIN_ART: &str = "             \n  .--.    \n .(   ).  \n(___.__)  \n  / / /   \n    ";
const SNOW_ART: &str = "             \n  .--.    \n .(   ).  \n(___.__)  \n * * * *  \n    ";
const RAIN_SHOWERS_ART: &str = "    _       \n  .--.    \n .(   ).  \n(___.__)  \n  / /     \n    ";
const SNOW_SHOWERS_ART: &str = "    * * *   \n  .--.    \n .(   ).  \n(___.__)  \n * *      \n    ";
const THUNDER_ART: &str = "     /_/_/_/  \n  .--.    \n .(   ).  \n(___.__)  \n  /_/      \n    ";

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Short English phrase for a WMO weather code.
pub fn describe_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

/// Multi-line ASCII pictogram. Unknown codes get the clear-sky picture.
pub fn art_for(code: i32) -> &'static str {
    match code {
        0 => CLEAR_ART,
        1 | 2 => PARTLY_CLOUDY_ART,
        3 => OVERCAST_ART,
        45 | 48 => FOG_ART,
        51 | 53 | 55 | 56 | 57 => DRIZZLE_ART,
        61 | 63 | 65 | 66 | 67 => RAIN_ART,
        71 | 73 | 75 | 77 => SNOW_ART,
        80..=82 => RAIN_SHOWERS_ART,
        85 | 86 => SNOW_SHOWERS_ART,
        95 | 96 | 99 => THUNDER_ART,
        _ => CLEAR_ART,
    }
}

/// Single glyph for compact table rows. Unknown codes get a thermometer.
pub fn emoji_for(code: i32) -> &'static str {
    match code {
        0 => "☀",
        1 | 2 => "⛅",
        3 => "☁",
        45 | 48 => "🌫",
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 => "🌧",
        71 | 73 | 75 | 77 | 85 | 86 => "❄",
        80..=82 => "🌦",
        95 | 96 | 99 => "⛈",
        _ => "🌡",
    }
}

/// Compass point whose 45° sector contains `degrees`.
pub fn wind_direction(degrees: f64) -> &'static str {
    let sector = ((degrees + 22.5) / 45.0).floor() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}

pub fn format_city_name(city: &str, country: &str, admin1: &str) -> String {
    let mut parts = vec![city.to_uppercase()];
    if !country.is_empty() {
        parts.push(country.to_uppercase());
    } else if !admin1.is_empty() {
        parts.push(admin1.to_uppercase());
    }
    parts.join(", ")
}
