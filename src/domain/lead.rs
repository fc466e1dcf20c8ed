use serde::{Deserialize, Deserializer, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// A business record as returned by the generation provider. Missing keys
/// default to empty values; nothing beyond JSON shape is checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub no: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub opening_time: String,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: f64,
    #[serde(default)]
    pub best_thing: String,
}

impl Lead {
    pub fn rating_label(&self) -> Option<String> {
        (self.rating > 0.0).then(|| format!("{:.1}", self.rating))
    }

    pub fn website_href(&self) -> Option<&str> {
        present(&self.website_link).filter(|link| link.starts_with("http"))
    }
}

/// Empty strings and "N/A" are placeholders, not values.
pub fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    match value {
        "" | NOT_AVAILABLE => None,
        v => Some(v),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRating {
    Number(f64),
    Text(String),
    Missing(()),
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = match RawRating::deserialize(deserializer)? {
        RawRating::Number(n) => n,
        RawRating::Text(s) => s.trim().parse().unwrap_or(0.0),
        RawRating::Missing(()) => 0.0,
    };
    Ok(rating)
}
