//! Shop record: identity, lifecycle status, and operating settings.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use shopfloor_core::{DomainError, DomainResult, ShopId};

/// Shop lifecycle status.
///
/// Anything other than `Active` makes the shop invisible to ordinary
/// authorization: members resolve to no effective role there (root admins and
/// the shop owner reading shop metadata are the only exceptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShopStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl core::fmt::Display for ShopStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShopStatus::Active => write!(f, "active"),
            ShopStatus::Inactive => write!(f, "inactive"),
            ShopStatus::Suspended => write!(f, "suspended"),
        }
    }
}

/// Daily opening window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl BusinessHours {
    /// Build a window, rejecting `open >= close`.
    pub fn new(open: NaiveTime, close: NaiveTime) -> DomainResult<Self> {
        if open >= close {
            return Err(DomainError::validation(format!(
                "business hours must open before they close ({open} >= {close})"
            )));
        }
        Ok(Self { open, close })
    }
}

/// Per-shop operating settings.
///
/// These are presentation/formatting inputs; the authorization engine never
/// reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSettings {
    /// ISO 4217 currency code (e.g. "USD").
    pub currency: String,
    /// IANA timezone name (e.g. "America/New_York").
    pub timezone: String,
    pub business_hours: BusinessHours,
}

/// A tenant/organizational unit owning its own inventory, sales, and staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub shop_id: ShopId,
    pub name: String,
    pub status: ShopStatus,
    pub settings: ShopSettings,
}

impl Shop {
    pub fn new(shop_id: ShopId, name: impl Into<String>, settings: ShopSettings) -> Self {
        Self {
            shop_id,
            name: name.into(),
            status: ShopStatus::Active,
            settings,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ShopStatus::Active
    }
}
