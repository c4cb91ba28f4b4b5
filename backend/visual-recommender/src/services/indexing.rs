// Ownership and interaction indices built from the text logs

use crate::models::{Interaction, ItemId, OwnerId, Timestamp, UserId};
use crate::readers::Row;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// item -> owner and owner -> items, built from `<item> <owner>` rows.
#[derive(Debug, Default, Clone)]
pub struct OwnershipIndex {
    item_to_owner: HashMap<ItemId, OwnerId>,
    owner_to_items: HashMap<OwnerId, HashSet<ItemId>>,
    skipped_rows: usize,
}

impl OwnershipIndex {
    /// Aggregate ownership rows. The last owner seen for an item wins; rows
    /// with fewer than two fields are skipped.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut index = Self::default();

        for row in rows {
            let mut fields = row.into_iter();
            let (item, owner) = match (fields.next(), fields.next()) {
                (Some(item), Some(owner)) => (item, owner),
                _ => {
                    index.skipped_rows += 1;
                    continue;
                }
            };
            index
                .owner_to_items
                .entry(owner.clone())
                .or_default()
                .insert(item.clone());
            index.item_to_owner.insert(item, owner);
        }

        if index.skipped_rows > 0 {
            warn!(
                skipped_rows = index.skipped_rows,
                "Skipped ownership rows with fewer than 2 fields"
            );
        }
        info!(
            items = index.item_to_owner.len(),
            owners = index.owner_to_items.len(),
            "Built ownership index"
        );

        index
    }

    pub fn owner_of(&self, item_id: &str) -> Option<&OwnerId> {
        self.item_to_owner.get(item_id)
    }

    pub fn items_of(&self, owner_id: &str) -> Option<&HashSet<ItemId>> {
        self.owner_to_items.get(owner_id)
    }

    /// Number of distinct items that have an owner
    pub fn item_count(&self) -> usize {
        self.item_to_owner.len()
    }

    /// Number of distinct owners with at least one item
    pub fn owner_count(&self) -> usize {
        self.owner_to_items.len()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

/// user -> [(item, ts)] and item -> [(user, ts)] in file-arrival order.
///
/// Users and items keep first-seen order, so `first_user` is the first user
/// of the log.
#[derive(Debug, Default, Clone)]
pub struct InteractionIndex {
    user_to_items: IndexMap<UserId, Vec<Interaction>>,
    item_to_users: IndexMap<ItemId, Vec<Interaction>>,
    skipped_rows: usize,
}

impl InteractionIndex {
    /// Aggregate `<user> <item> <timestamp>` rows. Every row is kept,
    /// duplicates included; rows without exactly three fields are skipped.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut index = Self::default();

        for row in rows {
            let [user, item, ts]: [String; 3] = match row.try_into() {
                Ok(fields) => fields,
                Err(_) => {
                    index.skipped_rows += 1;
                    continue;
                }
            };
            index.record(user, item, Timestamp::parse(&ts));
        }

        if index.skipped_rows > 0 {
            warn!(
                skipped_rows = index.skipped_rows,
                "Skipped interaction rows without exactly 3 fields"
            );
        }
        info!(
            users = index.user_to_items.len(),
            items = index.item_to_users.len(),
            "Built interaction index"
        );

        index
    }

    fn record(&mut self, user: UserId, item: ItemId, timestamp: Timestamp) {
        self.item_to_users
            .entry(item.clone())
            .or_default()
            .push(Interaction::new(user.clone(), timestamp.clone()));
        self.user_to_items
            .entry(user)
            .or_default()
            .push(Interaction::new(item, timestamp));
    }

    /// Full interaction history of a user, counterpart = item id
    pub fn history(&self, user_id: &str) -> Option<&[Interaction]> {
        self.user_to_items.get(user_id).map(Vec::as_slice)
    }

    /// Every interaction on an item, counterpart = user id
    pub fn interactions_for_item(&self, item_id: &str) -> Option<&[Interaction]> {
        self.item_to_users.get(item_id).map(Vec::as_slice)
    }

    pub fn first_user(&self) -> Option<&UserId> {
        self.user_to_items.keys().next()
    }

    pub fn user_count(&self) -> usize {
        self.user_to_items.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_to_users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_to_items.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}
