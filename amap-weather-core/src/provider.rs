use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{AreaCode, Coordinate, CurrentConditions, ForecastSet, GeocodeLookup},
};

pub mod amap;

pub use amap::AmapSource;

/// Upstream data needed by the lookup adapter.
///
/// Implementations must not hold mutable state: the adapter may be shared
/// across concurrent tool invocations.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Reverse-geocode a coordinate. A response without usable region info is
    /// `Ok`; it is up to the caller to decide whether that is fatal.
    async fn reverse_geocode(&self, at: Coordinate) -> Result<GeocodeLookup>;

    async fn live_conditions(&self, area: &AreaCode) -> Result<Vec<CurrentConditions>>;

    async fn forecasts(&self, area: &AreaCode) -> Result<Vec<ForecastSet>>;
}
