//! Shop lookup seam.
//!
//! The engine only ever asks "what is this shop's status?"; the trait keeps
//! the actual source (cache, database, fixture) out of the decision path.

use std::collections::HashMap;

use shopfloor_core::ShopId;

use crate::shop::{Shop, ShopStatus};

/// Read-only shop lookup.
pub trait ShopDirectory {
    fn shop(&self, shop_id: ShopId) -> Option<&Shop>;

    /// Status of a shop, `None` when the shop is unknown to the directory.
    fn status_of(&self, shop_id: ShopId) -> Option<ShopStatus> {
        self.shop(shop_id).map(|s| s.status)
    }
}

/// In-memory directory, for tests and single-process embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShopDirectory {
    shops: HashMap<ShopId, Shop>,
}

impl InMemoryShopDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shop: Shop) {
        self.shops.insert(shop.shop_id, shop);
    }

    pub fn remove(&mut self, shop_id: ShopId) -> Option<Shop> {
        self.shops.remove(&shop_id)
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

impl ShopDirectory for InMemoryShopDirectory {
    fn shop(&self, shop_id: ShopId) -> Option<&Shop> {
        self.shops.get(&shop_id)
    }
}
