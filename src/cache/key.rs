// Forecast cache keys.
// A (date, latitude, longitude) record, flattened to "date_lat_lon" only when stored.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::str::FromStr;

use crate::error::ForecastAppError;

const SEPARATOR: char = '_';

/// Address of a single cached forecast.
///
/// All three parts are kept as the caller typed them; no numeric normalization is
/// applied, so `"51.5"` and `"51.50"` are distinct keys.
///
/// Equality and hashing follow the stored `date_lat_lon` form: two records that
/// flatten to the same string address the same entry.
#[derive(Debug, Clone)]
pub struct ForecastKey {
    pub date: String,
    pub latitude: String,
    pub longitude: String,
}

impl ForecastKey {
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Characters of the stored form, without allocating it.
    fn composite_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.date
            .chars()
            .chain(iter::once(SEPARATOR))
            .chain(self.latitude.chars())
            .chain(iter::once(SEPARATOR))
            .chain(self.longitude.chars())
    }
}

impl PartialEq for ForecastKey {
    fn eq(&self, other: &Self) -> bool {
        self.composite_chars().eq(other.composite_chars())
    }
}

impl Eq for ForecastKey {}

impl Hash for ForecastKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for ForecastKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.date, self.latitude, self.longitude
        )
    }
}

impl FromStr for ForecastKey {
    type Err = ForecastAppError;

    /// Splits on the first two separators; anything after belongs to the longitude.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(date), Some(latitude), Some(longitude)) => Ok(Self {
                date: date.to_string(),
                latitude: latitude.to_string(),
                longitude: longitude.to_string(),
            }),
            _ => Err(ForecastAppError::MalformedCache(format!(
                "key {s:?} is not of the form date_lat_lon"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_form() {
        let key = ForecastKey::new("51.5", "-0.1", "2024-01-01");
        assert_eq!(key.to_string(), "2024-01-01_51.5_-0.1");
    }

    #[test]
    fn test_parse_composite() {
        let key: ForecastKey = "2024-01-01_51.5_-0.1".parse().unwrap();
        assert_eq!(key, ForecastKey::new("51.5", "-0.1", "2024-01-01"));
    }

    #[test]
    fn test_parse_keeps_extra_separators_in_longitude() {
        let key: ForecastKey = "2024-01-01_51.5_-0.1_x".parse().unwrap();
        assert_eq!(key.latitude, "51.5");
        assert_eq!(key.longitude, "-0.1_x");
    }

    #[test]
    fn test_parse_empty_parts() {
        // Blank coordinates are accepted at the prompt, so they must survive a reload.
        let key = ForecastKey::new("", "", "2024-01-01");
        let parsed: ForecastKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_equality_follows_stored_form() {
        let a = ForecastKey::new("1_2", "3", "2024-01-01");
        let b = ForecastKey::new("1", "2_3", "2024-01-01");
        assert_eq!(a, b);
        assert_ne!(a, ForecastKey::new("1", "23", "2024-01-01"));
        assert_ne!(a, ForecastKey::new("12", "3", "2024-01-01"));

        let mut keys = std::collections::HashSet::new();
        keys.insert(a);
        assert!(keys.contains(&b));
    }

    #[test]
    fn test_parse_malformed() {
        let err = "2024-01-01".parse::<ForecastKey>().unwrap_err();
        assert!(matches!(err, ForecastAppError::MalformedCache(_)));

        let err = "2024-01-01_51.5".parse::<ForecastKey>().unwrap_err();
        assert!(matches!(err, ForecastAppError::MalformedCache(_)));
    }
}
