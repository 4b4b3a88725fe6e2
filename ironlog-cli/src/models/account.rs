use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl UserAccount {
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            (Some(first), _) if !first.is_empty() => first.to_string(),
            _ => self.username.clone(),
        }
    }
}

/// Partial profile update
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
    Lifetime,
}

/// Purchasable subscription offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPackage {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub period: BillingPeriod,
}

impl SubscriptionPackage {
    /// Price normalized to one month, `None` for one-off purchases
    pub fn monthly_price(&self) -> Option<f64> {
        match self.period {
            BillingPeriod::Monthly => Some(self.price),
            BillingPeriod::Yearly => Some(self.price / 12.0),
            BillingPeriod::Lifetime => None,
        }
    }
}

/// Current PRO entitlement of the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entitlement {
    pub is_pro: bool,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Entitlement {
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.is_pro && self.expires_at.map_or(true, |expires| expires > now)
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Yearly => write!(f, "yearly"),
            BillingPeriod::Lifetime => write!(f, "lifetime"),
        }
    }
}
