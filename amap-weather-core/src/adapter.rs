use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{Result, WeatherError},
    format,
    model::{AreaCode, Coordinate},
    provider::{AmapSource, WeatherSource},
};

/// Coordinate-to-text weather lookup.
///
/// Every call is a single pass: reverse-geocode the coordinate to an area
/// code, fetch weather for that code, render it. The adapter keeps nothing
/// between calls, so one instance can serve concurrent tool invocations.
#[derive(Debug, Clone)]
pub struct WeatherAdapter<S> {
    source: S,
}

impl WeatherAdapter<AmapSource> {
    /// Build an adapter that talks to AMap with the configured key.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(AmapSource::from_config(config)?))
    }
}

impl<S: WeatherSource> WeatherAdapter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Reverse-geocode to an area code.
    ///
    /// Fails with [`WeatherError::AreaCodeUnavailable`] when the geocoder
    /// returned no region info, no address component, or no adcode.
    pub async fn resolve_area_code(&self, latitude: f64, longitude: f64) -> Result<AreaCode> {
        let at = Coordinate::new(latitude, longitude);
        let lookup = self.source.reverse_geocode(at).await?;

        match lookup.area_code() {
            Some(code) => {
                debug!(%at, area_code = %code, "resolved area code");
                Ok(code.clone())
            }
            None => Err(WeatherError::AreaCodeUnavailable { lookup }),
        }
    }

    /// Live conditions for the region containing the coordinate.
    ///
    /// An unresolvable location or an empty result is reported as text rather
    /// than an error, so the calling agent gets something it can act on.
    pub async fn get_current_weather(&self, latitude: f64, longitude: f64) -> Result<String> {
        info!(latitude, longitude, "current weather requested");

        let area = match self.resolve_area_code(latitude, longitude).await {
            Ok(area) => area,
            Err(WeatherError::AreaCodeUnavailable { lookup }) => {
                warn!(%lookup, "could not resolve area code");
                return Ok(format::unresolved_location(&lookup));
            }
            Err(e) => return Err(e),
        };

        let lives = self.source.live_conditions(&area).await?;
        if lives.is_empty() {
            warn!(area_code = %area, "no live conditions returned");
            return Ok(format::unsupported_area(&area));
        }

        Ok(format::render_current(&lives))
    }

    /// Multi-day forecast for the region containing the coordinate.
    ///
    /// Unlike [`get_current_weather`](Self::get_current_weather), an
    /// unresolvable location is returned as
    /// [`WeatherError::AreaCodeUnavailable`].
    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> Result<String> {
        info!(latitude, longitude, "forecast requested");

        let area = self.resolve_area_code(latitude, longitude).await?;
        let sets = self.source.forecasts(&area).await?;

        let Some(set) = sets.first() else {
            warn!(area_code = %area, "no forecast returned");
            return Ok(format::no_forecast(&area));
        };

        if sets.len() > 1 {
            debug!(area_code = %area, count = sets.len(), "using the first forecast only");
        }

        Ok(format::render_forecast(set))
    }
}
