use super::{ApiClient, ApiError};
use crate::models::Achievement;

impl ApiClient {
    pub async fn list_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        self.get_list("/achievements/", &[]).await
    }

    /// Achievements unlocked lately
    pub async fn recent_achievements(&self) -> Result<Vec<Achievement>, ApiError> {
        self.get_list("/achievements/recent/", &[]).await
    }
}
