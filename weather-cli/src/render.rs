//! Fixed-width ASCII boxes and tables for weather output.
//!
//! Widths are terminal display columns, so wide glyphs count as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uweather_core::{
    WeatherResponse,
    conditions::{art_for, describe_code, emoji_for, wind_direction},
    provider::clamp_days,
};

/// Outer width of the current-conditions box, borders included.
pub const CURRENT_BOX_WIDTH: usize = 37;

/// Day, temperature, wind, status.
pub const TABLE_COLUMNS: [usize; 4] = [15, 11, 10, 6];

/// Center `text` in `width` columns; the odd padding column goes right.
/// Text wider than `width` is cut to exactly `width`.
pub fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return truncate_to_width(text, width);
    }

    let padding = width - text_width;
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
}

/// A wide glyph that would straddle the edge is dropped and the gap filled with a space.
fn truncate_to_width(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;

    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width {
            break;
        }
        result.push(c);
        used += char_width;
    }

    result.push_str(&" ".repeat(width - used));
    result
}

fn rule(left: char, fill_widths: &[usize], joint: char, right: char) -> String {
    let segments: Vec<String> = fill_widths.iter().map(|w| "─".repeat(*w)).collect();
    format!("{left}{}{right}", segments.join(&joint.to_string()))
}

fn row(cells: &[String]) -> String {
    format!("│{}│", cells.join("│"))
}

/// Single-day box: pictogram, description, temperature, wind and humidity.
///
/// `hour` is the local hour of day, used as an index into the hourly series.
pub fn render_current(label: &str, weather: &WeatherResponse, hour: usize) -> String {
    let inner = CURRENT_BOX_WIDTH - 2;
    let current = &weather.current_weather;
    let line = |text: &str| row(&[center_text(text, inner)]);

    let mut lines = vec![rule('┌', &[inner], '─', '┐'), line(label), line("")];

    lines.extend(
        art_for(current.weathercode)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(line),
    );

    lines.push(line(""));
    lines.push(line(describe_code(current.weathercode)));
    lines.push(line(""));
    lines.push(line(&format!("Temperature: {:.1}°C", current.temperature)));
    lines.push(line(&format!(
        "Wind: {:.1} km/h {}",
        current.windspeed,
        wind_direction(current.winddirection)
    )));

    if let Some(humidity) = weather.hourly.humidity_at(hour) {
        lines.push(line(&format!("Humidity: {humidity}%")));
    }

    lines.push(line(""));
    lines.push(rule('└', &[inner], '─', '┘'));

    lines.join("\n") + "\n"
}

fn day_label(weather: &WeatherResponse, index: usize) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => match weather.daily.date(index) {
            Some(date) => date.format("%a %b %-d").to_string(),
            None => weather.daily.time[index].clone(),
        },
    }
}

/// Multi-day table, one row per day up to `min(days, daily series length)`.
pub fn render_forecast_table(label: &str, weather: &WeatherResponse, days: usize) -> String {
    let [day_w, temp_w, wind_w, status_w] = TABLE_COLUMNS;
    let inner = TABLE_COLUMNS.iter().sum::<usize>() + TABLE_COLUMNS.len() - 1;

    let mut lines = vec![
        rule('┌', &[inner], '─', '┐'),
        row(&[center_text(&format!("WEATHER FORECAST - {label}"), inner)]),
        rule('├', &TABLE_COLUMNS, '┬', '┤'),
        row(&[
            center_text("Day", day_w),
            center_text("Temp", temp_w),
            center_text("Wind", wind_w),
            center_text("Status", status_w),
        ]),
        rule('├', &TABLE_COLUMNS, '┼', '┤'),
    ];

    // The provider has no daily wind series; every row shows the current reading.
    let wind = format!("{:.0}km/h", weather.current_weather.windspeed);
    let daily = &weather.daily;

    for i in 0..days.min(daily.len()) {
        let temp = format!(
            "{:.0}°-{:.0}°C",
            daily.temperature_min[i], daily.temperature_max[i]
        );

        lines.push(row(&[
            center_text(&day_label(weather, i), day_w),
            center_text(&temp, temp_w),
            center_text(&wind, wind_w),
            center_text(emoji_for(daily.weathercode[i]), status_w),
        ]));
    }

    lines.push(rule('└', &TABLE_COLUMNS, '┴', '┘'));

    lines.join("\n") + "\n"
}

/// Current box for a single day, forecast table otherwise.
pub fn render_weather(label: &str, weather: &WeatherResponse, days: i64, hour: usize) -> String {
    match clamp_days(days) {
        1 => render_current(label, weather, hour),
        n => render_forecast_table(label, weather, n as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uweather_core::model::{CurrentWeather, DailyWeather, HourlyWeather};

    fn sample_weather(daily_days: usize) -> WeatherResponse {
        let dates = [
            "2026-10-17",
            "2026-10-18",
            "2026-10-19",
            "2026-10-20",
            "2026-10-21",
            "2026-10-22",
            "2026-10-23",
        ];

        WeatherResponse {
            current_weather: CurrentWeather {
                temperature: 18.4,
                windspeed: 11.2,
                winddirection: 45.0,
                weathercode: 61,
                time: "2026-10-17T14:00".into(),
            },
            hourly: HourlyWeather {
                time: (0..24).map(|h| format!("2026-10-17T{h:02}:00")).collect(),
                temperature: vec![Some(15.0); 24],
                humidity: (0..24).map(|h| Some(if h == 3 { 0 } else { 60 + h })).collect(),
            },
            daily: DailyWeather {
                time: dates[..daily_days].iter().map(|d| d.to_string()).collect(),
                temperature_max: vec![19.2; daily_days],
                temperature_min: vec![8.9; daily_days],
                weathercode: vec![0; daily_days],
                precipitation_sum: vec![0.0; daily_days],
            },
        }
    }

    fn data_rows(table: &str) -> usize {
        // title and header rows are the only other `│` lines
        table.lines().filter(|l| l.starts_with('│')).count() - 2
    }

    #[test]
    fn center_text_puts_odd_padding_on_the_right() {
        assert_eq!(center_text("ab", 5), " ab  ");
        assert_eq!(center_text("abc", 5), " abc ");
        assert_eq!(center_text("", 3), "   ");
    }

    #[test]
    fn center_text_truncates_to_exact_width() {
        assert_eq!(center_text("abcdefgh", 5), "abcde");
        assert_eq!(center_text("abcde", 5), "abcde");
        assert_eq!(center_text("°°°°", 2), "°°");
    }

    #[test]
    fn center_text_counts_wide_glyphs_as_two_columns() {
        assert_eq!(center_text("⛅", 6), "  ⛅  ");
        assert_eq!(center_text("⛅", 6).width(), 6);
        assert_eq!(center_text("⛅⛅⛅", 5), "⛅⛅ ");
    }

    #[test]
    fn forecast_table_lines_share_display_width_for_every_code() {
        let mut weather = sample_weather(3);
        for code in [0, 2, 3, 45, 61, 71, 80, 95, 9999] {
            weather.daily.weathercode = vec![code; 3];
            let out = render_forecast_table("ISTANBUL, TÜRKIYE", &weather, 3);

            let widths: Vec<usize> = out.lines().map(UnicodeWidthStr::width).collect();
            assert!(
                widths.iter().all(|w| *w == 47),
                "code {code}: uneven widths {widths:?}\n{out}"
            );
        }
    }

    #[test]
    fn current_box_has_fixed_width() {
        let out = render_current("ISTANBUL, TÜRKIYE", &sample_weather(1), 10);
        for line in out.lines() {
            assert_eq!(line.width(), CURRENT_BOX_WIDTH, "line: {line:?}");
        }
    }

    #[test]
    fn current_box_content() {
        let out = render_current("ISTANBUL, TÜRKIYE", &sample_weather(1), 10);

        assert!(out.contains("│         ISTANBUL, TÜRKIYE         │"));
        assert!(out.contains("Rain"));
        assert!(out.contains("Temperature: 18.4°C"));
        assert!(out.contains("Wind: 11.2 km/h NE"));
        assert!(out.contains("Humidity: 70%"));
        assert!(out.contains("/ / /"));
        assert!(out.starts_with("┌"));
        assert!(out.trim_end().ends_with("┘"));
    }

    #[test]
    fn current_box_skips_missing_or_zero_humidity() {
        let weather = sample_weather(1);
        assert!(!render_current("X", &weather, 3).contains("Humidity"));
        assert!(!render_current("X", &weather, 30).contains("Humidity"));
    }

    #[test]
    fn current_box_skips_blank_art_lines() {
        let out = render_current("X", &sample_weather(1), 0);
        let blank = format!("│{}│", " ".repeat(CURRENT_BOX_WIDTH - 2));
        // label spacer, after art, after description, closing spacer
        assert_eq!(out.lines().filter(|l| *l == blank).count(), 4);
    }

    #[test]
    fn forecast_table_rows_bounded_by_requested_days() {
        let weather = sample_weather(5);
        assert_eq!(data_rows(&render_forecast_table("X", &weather, 3)), 3);
        assert_eq!(data_rows(&render_forecast_table("X", &weather, 10)), 5);
    }

    #[test]
    fn forecast_table_layout() {
        let out = render_forecast_table("ISTANBUL, TÜRKIYE", &sample_weather(3), 3);
        let expected = "\
┌─────────────────────────────────────────────┐
│    WEATHER FORECAST - ISTANBUL, TÜRKIYE     │
├───────────────┬───────────┬──────────┬──────┤
│      Day      │   Temp    │   Wind   │Status│
├───────────────┼───────────┼──────────┼──────┤
│     Today     │  9°-19°C  │  11km/h  │  ☀   │
│   Tomorrow    │  9°-19°C  │  11km/h  │  ☀   │
│  Mon Oct 19   │  9°-19°C  │  11km/h  │  ☀   │
└───────────────┴───────────┴──────────┴──────┘
";
        assert_eq!(out, expected);
    }

    #[test]
    fn forecast_table_keeps_unparsable_dates_verbatim() {
        let mut weather = sample_weather(3);
        weather.daily.time[2] = "someday".into();

        let out = render_forecast_table("X", &weather, 3);
        assert!(out.contains("someday"));
    }

    #[test]
    fn single_day_uses_box_and_more_days_use_table() {
        let weather = sample_weather(5);
        assert!(render_weather("X", &weather, 1, 0).contains("Temperature:"));
        assert!(render_weather("X", &weather, 0, 0).contains("Temperature:"));
        assert!(render_weather("X", &weather, 3, 0).contains("WEATHER FORECAST - X"));
    }
}
