use super::{ApiClient, ApiError};
use crate::models::{Measurement, MeasurementKind, NewMeasurement};

impl ApiClient {
    /// Measurements, newest first, optionally of a single kind
    pub async fn list_measurements(
        &self,
        kind: Option<MeasurementKind>,
    ) -> Result<Vec<Measurement>, ApiError> {
        let query: Vec<(&str, String)> = kind
            .map(|k| vec![("kind", k.as_str().to_string())])
            .unwrap_or_default();

        let mut measurements: Vec<Measurement> = self.get_list("/measurements/", &query).await?;
        measurements.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(measurements)
    }

    pub async fn add_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> Result<Measurement, ApiError> {
        self.post("/measurements/", measurement).await
    }

    pub async fn delete_measurement(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/measurements/{}/", id)).await
    }
}
