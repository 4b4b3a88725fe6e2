//! Client-side PRO feature gate.
//!
//! The gate reads the entitlement flag cached in the token store so that
//! premium commands can be hidden without a round trip. The server remains
//! the authority; a stale flag only affects what the client offers.

use crate::api::ApiError;
use crate::storage::{StorageError, TokenStore};

/// Workouts a free account can browse in history
pub const FREE_HISTORY_LIMIT: usize = 10;

/// Premium features; everything else is available to every account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    CustomExercises,
    ExerciseHistory,
    MeasurementCharts,
    UnlimitedWorkoutHistory,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::CustomExercises => write!(f, "Custom exercises"),
            Feature::ExerciseHistory => write!(f, "Exercise history"),
            Feature::MeasurementCharts => write!(f, "Measurement charts"),
            Feature::UnlimitedWorkoutHistory => write!(f, "Unlimited workout history"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureGate {
    is_pro: bool,
}

impl FeatureGate {
    pub fn new(is_pro: bool) -> Self {
        Self { is_pro }
    }

    /// Gate from the cached entitlement flag
    pub fn from_store(store: &dyn TokenStore) -> Result<Self, StorageError> {
        Ok(Self::new(store.cached_pro_flag()?))
    }

    pub fn is_pro(&self) -> bool {
        self.is_pro
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        tracing::trace!("Checking {} (pro: {})", feature, self.is_pro);
        self.is_pro
    }

    pub fn ensure(&self, feature: Feature) -> Result<(), ApiError> {
        if self.is_enabled(feature) {
            Ok(())
        } else {
            tracing::debug!("{} blocked for free account", feature);
            Err(ApiError::ProRequired(feature))
        }
    }

    /// How many history entries may be shown
    pub fn history_limit(&self, requested: usize) -> usize {
        if self.is_enabled(Feature::UnlimitedWorkoutHistory) {
            requested
        } else {
            requested.min(FREE_HISTORY_LIMIT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTokenStore;

    #[test]
    fn test_free_account_is_gated() {
        let gate = FeatureGate::new(false);
        assert!(!gate.is_enabled(Feature::CustomExercises));
        assert!(matches!(
            gate.ensure(Feature::MeasurementCharts),
            Err(ApiError::ProRequired(Feature::MeasurementCharts))
        ));
        assert!(matches!(
            gate.ensure(Feature::ExerciseHistory),
            Err(ApiError::ProRequired(Feature::ExerciseHistory))
        ));
        assert_eq!(gate.history_limit(50), FREE_HISTORY_LIMIT);
        assert_eq!(gate.history_limit(3), 3);
    }

    #[test]
    fn test_pro_account_sees_everything() {
        let gate = FeatureGate::new(true);
        assert!(gate.ensure(Feature::CustomExercises).is_ok());
        assert_eq!(gate.history_limit(50), 50);
    }

    #[test]
    fn test_gate_reads_cached_flag() -> anyhow::Result<()> {
        let store = MemoryTokenStore::new();
        assert!(!FeatureGate::from_store(&store)?.is_pro());

        store.cache_pro_flag(true)?;
        assert!(FeatureGate::from_store(&store)?.is_pro());
        Ok(())
    }

    #[test]
    fn test_pro_required_message() {
        let err = ApiError::ProRequired(Feature::CustomExercises);
        assert_eq!(err.to_string(), "Custom exercises requires IronLog PRO");
    }
}
