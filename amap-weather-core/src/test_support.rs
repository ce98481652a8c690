//! In-memory [`WeatherSource`] for adapter tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    error::Result,
    model::{
        AddressComponent, AreaCode, Coordinate, CurrentConditions, ForecastSet, GeocodeLookup,
        RegionInfo,
    },
    provider::WeatherSource,
};

#[derive(Debug, Default)]
pub struct FakeSource {
    pub lookup: GeocodeLookup,
    pub lives: Vec<CurrentConditions>,
    pub forecasts: Vec<ForecastSet>,
    pub weather_calls: AtomicUsize,
}

impl FakeSource {
    pub fn resolving_to(code: &str) -> Self {
        Self { lookup: lookup_for(code), ..Default::default() }
    }

    pub fn weather_calls(&self) -> usize {
        self.weather_calls.load(Ordering::SeqCst)
    }
}

pub fn lookup_for(code: &str) -> GeocodeLookup {
    GeocodeLookup {
        region: Some(RegionInfo {
            address: Some(AddressComponent { area_code: AreaCode::new(code) }),
        }),
        info: Some("OK".into()),
    }
}

#[async_trait]
impl WeatherSource for FakeSource {
    async fn reverse_geocode(&self, _at: Coordinate) -> Result<GeocodeLookup> {
        Ok(self.lookup.clone())
    }

    async fn live_conditions(&self, _area: &AreaCode) -> Result<Vec<CurrentConditions>> {
        self.weather_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lives.clone())
    }

    async fn forecasts(&self, _area: &AreaCode) -> Result<Vec<ForecastSet>> {
        self.weather_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.forecasts.clone())
    }
}
