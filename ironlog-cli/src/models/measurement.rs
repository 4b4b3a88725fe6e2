use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body measurement entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub kind: MeasurementKind,
    pub value: f64,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    BodyWeight,
    BodyFat,
    Chest,
    Waist,
    Hips,
    Biceps,
    Thigh,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMeasurement {
    pub kind: MeasurementKind,
    pub value: f64,
    pub unit: String,
    pub recorded_at: DateTime<Utc>,
}

impl MeasurementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::BodyWeight => "body_weight",
            MeasurementKind::BodyFat => "body_fat",
            MeasurementKind::Chest => "chest",
            MeasurementKind::Waist => "waist",
            MeasurementKind::Hips => "hips",
            MeasurementKind::Biceps => "biceps",
            MeasurementKind::Thigh => "thigh",
        }
    }

    /// Unit the backend expects when none is given
    pub fn default_unit(&self) -> &'static str {
        match self {
            MeasurementKind::BodyWeight => "kg",
            MeasurementKind::BodyFat => "%",
            _ => "cm",
        }
    }
}

impl NewMeasurement {
    pub fn now(kind: MeasurementKind, value: f64) -> Self {
        Self {
            kind,
            value,
            unit: kind.default_unit().to_string(),
            recorded_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementKind::BodyWeight => write!(f, "Body weight"),
            MeasurementKind::BodyFat => write!(f, "Body fat"),
            MeasurementKind::Chest => write!(f, "Chest"),
            MeasurementKind::Waist => write!(f, "Waist"),
            MeasurementKind::Hips => write!(f, "Hips"),
            MeasurementKind::Biceps => write!(f, "Biceps"),
            MeasurementKind::Thigh => write!(f, "Thigh"),
        }
    }
}

impl std::str::FromStr for MeasurementKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "body_weight" | "weight" => Ok(MeasurementKind::BodyWeight),
            "body_fat" | "fat" => Ok(MeasurementKind::BodyFat),
            "chest" => Ok(MeasurementKind::Chest),
            "waist" => Ok(MeasurementKind::Waist),
            "hips" => Ok(MeasurementKind::Hips),
            "biceps" => Ok(MeasurementKind::Biceps),
            "thigh" => Ok(MeasurementKind::Thigh),
            _ => Err(anyhow::anyhow!("Invalid measurement kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_from_str() -> anyhow::Result<()> {
        assert_eq!(MeasurementKind::from_str("Body Weight")?, MeasurementKind::BodyWeight);
        assert_eq!(MeasurementKind::from_str("body-fat")?, MeasurementKind::BodyFat);
        assert_eq!(MeasurementKind::from_str("WAIST")?, MeasurementKind::Waist);
        assert!(MeasurementKind::from_str("neck").is_err());
        Ok(())
    }

    #[test]
    fn test_kind_wire_name_matches_as_str() {
        for kind in [
            MeasurementKind::BodyWeight,
            MeasurementKind::BodyFat,
            MeasurementKind::Thigh,
        ] {
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_default_units() {
        assert_eq!(NewMeasurement::now(MeasurementKind::BodyWeight, 81.2).unit, "kg");
        assert_eq!(NewMeasurement::now(MeasurementKind::BodyFat, 14.0).unit, "%");
        assert_eq!(NewMeasurement::now(MeasurementKind::Waist, 82.0).unit, "cm");
    }
}
