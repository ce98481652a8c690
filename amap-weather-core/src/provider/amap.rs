use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::IgnoredAny};
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{
        AddressComponent, AreaCode, Coordinate, CurrentConditions, ForecastDay, ForecastSet,
        GeocodeLookup, RegionInfo,
    },
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com/v3";

const GEOCODE: &str = "geocode";
const LIVE: &str = "live weather";
const FORECAST: &str = "forecast";

/// `extensions` query value of the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extensions {
    /// Live conditions.
    Base,
    /// Multi-day forecast.
    All,
}

impl Extensions {
    fn as_str(self) -> &'static str {
        match self {
            Extensions::Base => "base",
            Extensions::All => "all",
        }
    }
}

/// [`WeatherSource`] backed by the AMap web service API.
#[derive(Debug, Clone)]
pub struct AmapSource {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AmapSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    /// Reuse an existing HTTP client (connection pool, proxy settings, ...).
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::with_base_url(api_key.to_owned(), config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(endpoint, %url, "sending AMap request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Http { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| WeatherError::Http { endpoint, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }

    async fn weather_info<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        area: &AreaCode,
        extensions: Extensions,
    ) -> Result<T> {
        self.get_json(
            endpoint,
            "/weather/weatherInfo",
            &[
                ("key", self.api_key.as_str()),
                ("city", area.as_str()),
                ("extensions", extensions.as_str()),
                ("output", "json"),
            ],
        )
        .await
    }
}

#[async_trait]
impl WeatherSource for AmapSource {
    async fn reverse_geocode(&self, at: Coordinate) -> Result<GeocodeLookup> {
        let location = at.to_amap_location();
        let parsed: RegeoResponse = self
            .get_json(
                GEOCODE,
                "/geocode/regeo",
                &[
                    ("output", "json"),
                    ("location", location.as_str()),
                    ("key", self.api_key.as_str()),
                ],
            )
            .await?;

        parsed.status.warn_if_failed(GEOCODE);
        Ok(parsed.into())
    }

    async fn live_conditions(&self, area: &AreaCode) -> Result<Vec<CurrentConditions>> {
        let parsed: LivesResponse = self.weather_info(LIVE, area, Extensions::Base).await?;
        parsed.status.warn_if_failed(LIVE);

        Ok(parsed.lives.unwrap_or_default().into_iter().map(Into::into).collect())
    }

    async fn forecasts(&self, area: &AreaCode) -> Result<Vec<ForecastSet>> {
        let parsed: ForecastsResponse = self.weather_info(FORECAST, area, Extensions::All).await?;
        parsed.status.warn_if_failed(FORECAST);

        Ok(parsed.forecasts.unwrap_or_default().into_iter().map(Into::into).collect())
    }
}

/// Common envelope fields. `status` is `"1"` on success, `"0"` on failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmapStatus {
    #[serde(deserialize_with = "loose_opt_text")]
    status: Option<String>,
    #[serde(deserialize_with = "loose_opt_text")]
    info: Option<String>,
    #[serde(deserialize_with = "loose_opt_text")]
    infocode: Option<String>,
}

impl AmapStatus {
    fn warn_if_failed(&self, endpoint: &'static str) {
        if self.status.as_deref() == Some("0") {
            warn!(
                endpoint,
                info = self.info.as_deref().unwrap_or(""),
                infocode = self.infocode.as_deref().unwrap_or(""),
                "AMap reported an error"
            );
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegeoResponse {
    #[serde(flatten)]
    status: AmapStatus,
    #[serde(default)]
    regeocode: Option<AmapRegeocode>,
}

#[derive(Debug, Deserialize)]
struct AmapRegeocode {
    #[serde(default, rename = "addressComponent")]
    address_component: Option<AmapAddress>,
}

#[derive(Debug, Deserialize)]
struct AmapAddress {
    #[serde(default, deserialize_with = "loose_opt_text")]
    adcode: Option<String>,
}

impl From<RegeoResponse> for GeocodeLookup {
    fn from(r: RegeoResponse) -> Self {
        GeocodeLookup {
            region: r.regeocode.map(|rc| RegionInfo {
                address: rc.address_component.map(|a| AddressComponent {
                    area_code: a.adcode.and_then(AreaCode::new),
                }),
            }),
            info: r.status.info,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LivesResponse {
    #[serde(flatten)]
    status: AmapStatus,
    #[serde(default)]
    lives: Option<Vec<AmapLive>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmapLive {
    #[serde(deserialize_with = "loose_text")]
    province: String,
    #[serde(deserialize_with = "loose_text")]
    city: String,
    #[serde(deserialize_with = "loose_text")]
    adcode: String,
    #[serde(deserialize_with = "loose_text")]
    weather: String,
    #[serde(deserialize_with = "loose_text")]
    temperature: String,
    #[serde(deserialize_with = "loose_text")]
    winddirection: String,
    #[serde(deserialize_with = "loose_text")]
    windpower: String,
    #[serde(deserialize_with = "loose_text")]
    humidity: String,
    #[serde(deserialize_with = "loose_text")]
    reporttime: String,
    #[serde(deserialize_with = "loose_opt_text")]
    temperature_float: Option<String>,
    #[serde(deserialize_with = "loose_opt_text")]
    humidity_float: Option<String>,
}

impl From<AmapLive> for CurrentConditions {
    fn from(l: AmapLive) -> Self {
        CurrentConditions {
            province: l.province,
            city: l.city,
            area_code: l.adcode,
            weather: l.weather,
            temperature: l.temperature,
            wind_direction: l.winddirection,
            wind_power: l.windpower,
            humidity: l.humidity,
            report_time: l.reporttime,
            temperature_float: l.temperature_float,
            humidity_float: l.humidity_float,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastsResponse {
    #[serde(flatten)]
    status: AmapStatus,
    #[serde(default)]
    forecasts: Option<Vec<AmapForecast>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmapForecast {
    #[serde(deserialize_with = "loose_text")]
    province: String,
    #[serde(deserialize_with = "loose_text")]
    city: String,
    #[serde(deserialize_with = "loose_text")]
    adcode: String,
    #[serde(deserialize_with = "loose_text")]
    reporttime: String,
    casts: Option<Vec<AmapCast>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmapCast {
    #[serde(deserialize_with = "loose_text")]
    date: String,
    #[serde(deserialize_with = "loose_text")]
    week: String,
    #[serde(deserialize_with = "loose_text")]
    dayweather: String,
    #[serde(deserialize_with = "loose_text")]
    daytemp: String,
    #[serde(deserialize_with = "loose_text")]
    daywind: String,
    #[serde(deserialize_with = "loose_text")]
    daypower: String,
    #[serde(deserialize_with = "loose_text")]
    nightweather: String,
    #[serde(deserialize_with = "loose_text")]
    nighttemp: String,
    #[serde(deserialize_with = "loose_text")]
    nightwind: String,
    #[serde(deserialize_with = "loose_text")]
    nightpower: String,
}

impl From<AmapForecast> for ForecastSet {
    fn from(f: AmapForecast) -> Self {
        ForecastSet {
            province: f.province,
            city: f.city,
            area_code: f.adcode,
            report_time: f.reporttime,
            days: f.casts.unwrap_or_default().into_iter().map(Into::into).collect(),
        }
    }
}

impl From<AmapCast> for ForecastDay {
    fn from(c: AmapCast) -> Self {
        ForecastDay {
            date: c.date,
            weekday: c.week,
            day_weather: c.dayweather,
            day_temp: c.daytemp,
            day_wind: c.daywind,
            day_power: c.daypower,
            night_weather: c.nightweather,
            night_temp: c.nighttemp,
            night_wind: c.nightwind,
            night_power: c.nightpower,
        }
    }
}

/// AMap sends `[]` instead of a string for values it does not have, and
/// occasionally a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Number(serde_json::Number),
    Other(IgnoredAny),
}

fn loose_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LooseText>::deserialize(deserializer)? {
        Some(LooseText::Text(s)) => Some(s),
        Some(LooseText::Number(n)) => Some(n.to_string()),
        Some(LooseText::Other(_)) | None => None,
    };
    Ok(value.filter(|s| !s.is_empty()))
}

fn loose_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    loose_opt_text(deserializer).map(Option::unwrap_or_default)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
