//! Rendering of weather records into the text handed back to the agent.
//!
//! Output depends only on the records passed in; values are inserted verbatim.

use crate::model::{AreaCode, CurrentConditions, ForecastDay, ForecastSet, GeocodeLookup};

const DAY_SEPARATOR: &str = "----------------------------";

/// One block per record, in the order given.
pub fn render_current(lives: &[CurrentConditions]) -> String {
    lives.iter().map(render_live).collect()
}

fn render_live(live: &CurrentConditions) -> String {
    format!(
        "{province}{city}:\n\
         Weather: {weather}\n\
         Temperature: {temperature}\n\
         Wind direction: {wind_direction}\n\
         Wind power: {wind_power}\n\
         Humidity: {humidity}\n",
        province = live.province,
        city = live.city,
        weather = live.weather,
        temperature = live.temperature,
        wind_direction = live.wind_direction,
        wind_power = live.wind_power,
        humidity = live.humidity,
    )
}

/// Header with the day count, then one block per day.
pub fn render_forecast(set: &ForecastSet) -> String {
    let header = format!(
        "{} {} forecast: next {} days:",
        set.province,
        set.city,
        set.days.len()
    );

    set.days.iter().fold(header, |mut text, day| {
        text.push_str(&render_day(day));
        text
    })
}

fn render_day(day: &ForecastDay) -> String {
    format!(
        "\n{DAY_SEPARATOR}\n\
         {date} (weekday {weekday})\n\
         Day: {day_weather}, temperature {day_temp}°C, wind {day_wind}, power {day_power}\n\
         Night: {night_weather}, temperature {night_temp}°C, wind {night_wind}, power {night_power}\n",
        date = day.date,
        weekday = day.weekday,
        day_weather = day.day_weather,
        day_temp = day.day_temp,
        day_wind = day.day_wind,
        day_power = day.day_power,
        night_weather = day.night_weather,
        night_temp = day.night_temp,
        night_wind = day.night_wind,
        night_power = day.night_power,
    )
}

pub fn unresolved_location(lookup: &GeocodeLookup) -> String {
    format!("Failed to retrieve grid point data for points: {lookup}.")
}

pub fn unsupported_area(area: &AreaCode) -> String {
    format!(
        "Failed to retrieve grid point data for adcode: {area}. This adcode may not be \
         supported by the AMap API (only China locations are supported)"
    )
}

pub fn no_forecast(area: &AreaCode) -> String {
    format!(
        "Failed to retrieve forecast data for adcode: {area}. This adcode may not be \
         supported by the AMap API (only China locations are supported)"
    )
}
