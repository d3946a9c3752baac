use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the backend. Some deployments hand out integers, others
/// strings, so it is kept as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ApartmentId(String);

impl ApartmentId {
    pub fn new(id: impl Into<String>) -> ApartmentId {
        ApartmentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApartmentId {
    fn from(id: &str) -> Self {
        ApartmentId::new(id)
    }
}

impl From<u64> for ApartmentId {
    fn from(id: u64) -> Self {
        ApartmentId(id.to_string())
    }
}

// Custom deserialization for id field as it can be int or String
impl<'de> Deserialize<'de> for ApartmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Ok(ApartmentId(s)),
            Value::Number(num) => Ok(ApartmentId(num.to_string())),
            _ => Err(de::Error::custom("id must be a non-empty string or a number")),
        }
    }
}

// Rent arrives as a number or, from form-driven backends, as numeric text.
// Missing, empty or non-finite values are a malformed record, not a zero rent.
fn rent_number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let rent = match Value::deserialize(deserializer)? {
        Value::Number(num) => num
            .as_f64()
            .ok_or_else(|| de::Error::custom("rent is not a valid number"))?,
        Value::String(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("rent '{s}' is not a number")))?,
        other => {
            return Err(de::Error::custom(format!(
                "rent must be a number or numeric string, got {other}"
            )))
        }
    };

    if !rent.is_finite() {
        return Err(de::Error::custom("rent must be finite"));
    }
    Ok(rent)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApartmentStatus {
    #[default]
    Available,
    Occupied,
}

impl ApartmentStatus {
    pub fn toggled(self) -> ApartmentStatus {
        match self {
            ApartmentStatus::Available => ApartmentStatus::Occupied,
            ApartmentStatus::Occupied => ApartmentStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApartmentStatus::Available => "Available",
            ApartmentStatus::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApartmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(ApartmentStatus::Available),
            "occupied" => Ok(ApartmentStatus::Occupied),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentRecord {
    pub id: ApartmentId,
    pub name: String,
    pub location: String,
    #[serde(deserialize_with = "rent_number_or_string")]
    pub rent: f64,
    pub status: ApartmentStatus,
}

impl ApartmentRecord {
    pub fn fields(&self) -> ApartmentFields {
        ApartmentFields {
            name: self.name.clone(),
            location: self.location.clone(),
            rent: self.rent,
            status: self.status,
        }
    }
}

/// Body of create and update requests. The id never travels in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentFields {
    pub name: String,
    pub location: String,
    #[serde(deserialize_with = "rent_number_or_string")]
    pub rent: f64,
    pub status: ApartmentStatus,
}
