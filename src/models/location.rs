use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Minutes east of UTC.
    pub timezone_offset: i32,
}

/// Fixed offset for `minutes` east of UTC.
pub fn utc_offset(minutes: i32) -> anyhow::Result<chrono::FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(chrono::FixedOffset::east_opt)
        .ok_or_else(|| anyhow::anyhow!("Invalid timezone offset: {}", minutes))
}

/// Latitude in [-90, 90], longitude in [-180, 180].
pub fn validate_coordinates(lat: f64, lng: f64) -> anyhow::Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        anyhow::bail!("Latitude {} out of range (-90 to 90)", lat);
    }
    if !(-180.0..=180.0).contains(&lng) {
        anyhow::bail!("Longitude {} out of range (-180 to 180)", lng);
    }
    Ok(())
}

impl City {
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// A bookmarked city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: i64,
    pub city: City,
    pub created_at: String,
}
