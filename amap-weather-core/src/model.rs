use std::fmt;

/// A point on the map. Not validated; AMap decides what it can resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// AMap expects `<lon>,<lat>`, longitude first.
    pub fn to_amap_location(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Administrative region code ("adcode") used by the weather endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AreaCode(String);

impl AreaCode {
    /// Returns `None` for blank input.
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        let trimmed = code.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the reverse geocoder handed back, kept whole so a failed lookup can be
/// reported as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodeLookup {
    pub region: Option<RegionInfo>,
    /// AMap's `info` field, e.g. `OK` or `INVALID_USER_KEY`.
    pub info: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionInfo {
    pub address: Option<AddressComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressComponent {
    pub area_code: Option<AreaCode>,
}

impl GeocodeLookup {
    pub fn area_code(&self) -> Option<&AreaCode> {
        self.region
            .as_ref()
            .and_then(|r| r.address.as_ref())
            .and_then(|a| a.area_code.as_ref())
    }
}

impl fmt::Display for GeocodeLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            None => f.write_str("no region info")?,
            Some(RegionInfo { address: None }) => {
                f.write_str("region info without address component")?
            }
            Some(RegionInfo { address: Some(AddressComponent { area_code: None }) }) => {
                f.write_str("address component without adcode")?
            }
            Some(RegionInfo { address: Some(AddressComponent { area_code: Some(code) }) }) => {
                write!(f, "adcode {code}")?
            }
        }

        match self.info.as_deref() {
            Some(info) if !info.eq_ignore_ascii_case("ok") => write!(f, " (AMap info: {info})"),
            _ => Ok(()),
        }
    }
}

/// Live conditions for one region. Values are kept exactly as AMap sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentConditions {
    pub province: String,
    pub city: String,
    pub area_code: String,
    pub weather: String,
    pub temperature: String,
    pub wind_direction: String,
    pub wind_power: String,
    pub humidity: String,
    pub report_time: String,
    pub temperature_float: Option<String>,
    pub humidity_float: Option<String>,
}

/// One day of a multi-day forecast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastDay {
    pub date: String,
    pub weekday: String,
    pub day_weather: String,
    pub day_temp: String,
    pub day_wind: String,
    pub day_power: String,
    pub night_weather: String,
    pub night_temp: String,
    pub night_wind: String,
    pub night_power: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastSet {
    pub province: String,
    pub city: String,
    pub area_code: String,
    pub report_time: String,
    /// In the order AMap returned them.
    pub days: Vec<ForecastDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amap_location_is_longitude_first() {
        let c = Coordinate::new(34.247311, 108.948303);
        assert_eq!(c.to_amap_location(), "108.948303,34.247311");
    }

    #[test]
    fn blank_area_code_is_rejected() {
        assert!(AreaCode::new("").is_none());
        assert!(AreaCode::new("   ").is_none());
        assert_eq!(AreaCode::new(" 610100 ").unwrap().as_str(), "610100");
    }

    #[test]
    fn lookup_describes_where_it_stopped() {
        let empty = GeocodeLookup::default();
        assert_eq!(empty.to_string(), "no region info");
        assert!(empty.area_code().is_none());

        let no_address = GeocodeLookup {
            region: Some(RegionInfo { address: None }),
            info: Some("OK".into()),
        };
        assert_eq!(no_address.to_string(), "region info without address component");

        let bad_key = GeocodeLookup { region: None, info: Some("INVALID_USER_KEY".into()) };
        assert_eq!(bad_key.to_string(), "no region info (AMap info: INVALID_USER_KEY)");

        let resolved = GeocodeLookup {
            region: Some(RegionInfo {
                address: Some(AddressComponent { area_code: AreaCode::new("610100") }),
            }),
            info: None,
        };
        assert_eq!(resolved.area_code().map(AreaCode::as_str), Some("610100"));
        assert_eq!(resolved.to_string(), "adcode 610100");
    }
}
