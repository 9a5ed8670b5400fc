//! Narrow interfaces to the app's inventory and progress stores.
//!
//! The session only reads boost status and asks for refills; it never
//! mutates inventory directly and never persists anything itself.

use serde::{Deserialize, Serialize};

/// Inventory item that doubles XP while active.
pub const XP_BOOST_ITEM: &str = "xp-boost";

pub trait Inventory {
    /// Is the named boost currently active for the player?
    fn has_active_boost(&self, name: &str) -> bool;

    /// Consume a refill item if the player owns one; returns hearts added
    /// (0 when nothing was available).
    fn grant_lives_refill(&mut self) -> u32;
}

/// `2` while the XP boost is active, else `1`.
pub fn xp_boost_multiplier(inventory: &impl Inventory) -> u32 {
    if inventory.has_active_boost(XP_BOOST_ITEM) { 2 } else { 1 }
}

/// Inventory with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyInventory;

impl Inventory for EmptyInventory {
    fn has_active_boost(&self, _name: &str) -> bool {
        false
    }

    fn grant_lives_refill(&mut self) -> u32 {
        0
    }
}

/// Summary handed to the progress store when a session finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub level_id: u32,
    pub total_reward: u32,
    pub correct_count: u32,
    pub total_exercises: u32,
    pub perfect: bool,
    pub failed: bool,
}
