//! User record as seen by the authorization engine.
//!
//! The record is supplied by the identity/session collaborator; the engine
//! never fetches or caches it. `blocked` and `is_root_admin` are owned by
//! identity management and read-only here.

use serde::{Deserialize, Serialize};

use shopfloor_core::{ShopId, UserId};

use crate::assignment::ShopAssignment;
use crate::role::Role;

/// An authorization subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: UserId,

    /// Legacy pre-multi-tenant global role, retained for backward
    /// compatibility. Only consulted when a request carries no shop context.
    pub global_role: Option<Role>,

    /// System-wide bypass (global settings, brand/category management, role
    /// management).
    pub is_root_admin: bool,

    /// Shop memberships, ordered by assignment history. Order carries no
    /// authority.
    pub assigned_shops: Vec<ShopAssignment>,

    /// The session's active tenant context. A UI-level default only — never
    /// an authorization input by itself.
    pub current_shop: Option<ShopId>,

    /// When set, every request is denied, including for root admins.
    pub blocked: bool,
}

impl User {
    pub fn new(uid: UserId) -> Self {
        Self {
            uid,
            global_role: None,
            is_root_admin: false,
            assigned_shops: Vec::new(),
            current_shop: None,
            blocked: false,
        }
    }

    pub fn assignment_for(&self, shop_id: ShopId) -> Option<&ShopAssignment> {
        self.assigned_shops.iter().find(|a| a.shop_id == shop_id)
    }

    pub(crate) fn assignment_for_mut(&mut self, shop_id: ShopId) -> Option<&mut ShopAssignment> {
        self.assigned_shops.iter_mut().find(|a| a.shop_id == shop_id)
    }

    /// The assignment holding ownership of `shop_id`, if this user has it.
    pub fn owned_assignment_for(&self, shop_id: ShopId) -> Option<&ShopAssignment> {
        self.assignment_for(shop_id).filter(|a| a.is_owner)
    }
}
