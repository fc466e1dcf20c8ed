use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const LEAD_COUNT_PRESETS: [u32; 3] = [10, 50, 100];
pub const MAX_LEAD_COUNT: u32 = 200;
pub const DEFAULT_LEAD_COUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadCount(u32);

impl LeadCount {
    pub fn parse(count: u32) -> Result<Self, ValidationError> {
        if count == 0 || count > MAX_LEAD_COUNT {
            return Err(ValidationError::LeadCountOutOfRange(count));
        }
        Ok(LeadCount(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for LeadCount {
    fn default() -> Self {
        LeadCount(DEFAULT_LEAD_COUNT)
    }
}

/// What the lead count control on the search form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadCountChoice {
    Preset(u32),
    Unlimited,
}

impl LeadCountChoice {
    pub fn resolve(&self) -> Result<LeadCount, ValidationError> {
        match self {
            LeadCountChoice::Preset(count) => LeadCount::parse(*count),
            // "Unlimited" is capped so a single request stays bounded
            LeadCountChoice::Unlimited => Ok(LeadCount(MAX_LEAD_COUNT)),
        }
    }

    pub fn as_form_value(&self) -> String {
        match self {
            LeadCountChoice::Preset(count) => count.to_string(),
            LeadCountChoice::Unlimited => "unlimited".to_string(),
        }
    }
}

impl Default for LeadCountChoice {
    fn default() -> Self {
        LeadCountChoice::Preset(DEFAULT_LEAD_COUNT)
    }
}

impl FromStr for LeadCountChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unlimited") {
            return Ok(LeadCountChoice::Unlimited);
        }
        s.parse::<u32>()
            .map(LeadCountChoice::Preset)
            .map_err(|_| ValidationError::LeadCountNotANumber(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl UserLocation {
    pub fn parse(latitude: f64, longitude: f64) -> Option<Self> {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        in_range.then_some(UserLocation {
            latitude,
            longitude,
        })
    }
}

/// A validated search. Serializes to the webhook payload shape, which never
/// carries the geolocation hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_query: String,
    pub location: String,
    pub category: String,
    pub lead_count: LeadCount,
    #[serde(skip)]
    pub user_location: Option<UserLocation>,
}

/// Raw, unvalidated input as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub lead_count: Option<u32>,
    #[serde(default)]
    pub user_location: Option<UserLocation>,
}

impl SearchRequest {
    pub fn parse(
        search_query: &str,
        location: &str,
        category: Option<&str>,
        lead_count: LeadCount,
        user_location: Option<UserLocation>,
    ) -> Result<Self, ValidationError> {
        let search_query = search_query.trim();
        let location = location.trim();
        if search_query.is_empty() || location.is_empty() {
            return Err(ValidationError::MissingQueryOrLocation);
        }

        Ok(SearchRequest {
            search_query: search_query.to_string(),
            location: location.to_string(),
            category: category.map(str::trim).unwrap_or_default().to_string(),
            lead_count,
            user_location,
        })
    }

    pub fn category(&self) -> Option<&str> {
        match self.category.as_str() {
            "" => None,
            c => Some(c),
        }
    }
}

impl TryFrom<SearchInput> for SearchRequest {
    type Error = ValidationError;

    fn try_from(input: SearchInput) -> Result<Self, Self::Error> {
        let lead_count = match input.lead_count {
            Some(count) => LeadCount::parse(count)?,
            None => LeadCount::default(),
        };
        SearchRequest::parse(
            &input.search_query,
            &input.location,
            input.category.as_deref(),
            lead_count,
            input.user_location,
        )
    }
}
