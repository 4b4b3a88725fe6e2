use super::{ApiClient, ApiError};
use crate::models::{Entitlement, ProfileUpdate, SubscriptionPackage, UserAccount};

impl ApiClient {
    /// Get current user information
    pub async fn whoami(&self) -> Result<UserAccount, ApiError> {
        let user: UserAccount = self.get("/user/me/").await?;
        tracing::info!("Retrieved user info for {}", user.username);
        Ok(user)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserAccount, ApiError> {
        self.put("/user/me/", update).await
    }

    /// Delete the account and forget local tokens
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/user/me/").await?;
        self.tokens().clear_tokens()?;
        tracing::info!("Account deleted");
        Ok(())
    }

    /// Current entitlement; refreshes the cached PRO flag
    pub async fn entitlement(&self) -> Result<Entitlement, ApiError> {
        let entitlement: Entitlement = self.get("/user/subscription/").await?;
        self.tokens()
            .cache_pro_flag(entitlement.is_active(chrono::Utc::now()))?;
        Ok(entitlement)
    }

    pub async fn subscription_packages(&self) -> Result<Vec<SubscriptionPackage>, ApiError> {
        self.get_list("/user/subscription/packages/", &[]).await
    }
}
