// src/model/pipeline.rs

use serde::Serialize;

/// On-hand stock plus in-transit orders for one period.
///
/// Slot 0 is on-hand, slot `L` holds the order placed this period.
/// Orders move one slot closer to on-hand every period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pipeline {
    slots: Vec<i64>,
}

impl Pipeline {
    /// Empty pipeline for the given lead time.
    pub fn new(lead_time: usize) -> Self {
        Self {
            slots: vec![0; lead_time + 1],
        }
    }

    pub fn from_slots(slots: Vec<i64>) -> Self {
        debug_assert!(!slots.is_empty());
        Self { slots }
    }

    pub fn lead_time(&self) -> usize {
        self.slots.len() - 1
    }

    pub fn on_hand(&self) -> i64 {
        self.slots[0]
    }

    /// On-hand plus everything in transit.
    pub fn position(&self) -> i64 {
        self.slots.iter().sum()
    }

    pub fn slots(&self) -> &[i64] {
        &self.slots
    }

    /// Puts a new order at the tail of the pipeline.
    /// With zero lead time it lands on-hand straight away.
    pub fn place_order(&mut self, quantity: u32) {
        let tail = self.slots.len() - 1;
        self.slots[tail] += i64::from(quantity);
    }

    /// Removes demand from on-hand stock. The result is negative when demand
    /// exceeds stock; the shortfall is the lost sales of the period.
    pub fn apply_demand(&mut self, demand: u32) -> i64 {
        self.slots[0] -= i64::from(demand);
        self.slots[0]
    }

    /// Next period's pipeline: unmet demand is lost, the order in slot 1
    /// arrives, and every other slot moves one step forward.
    pub fn advance(&self) -> Self {
        let mut next = vec![0; self.slots.len()];
        next[0] = self.slots[0].max(0);
        for i in 1..self.slots.len() {
            next[i - 1] += self.slots[i];
        }
        Self { slots: next }
    }

    /// Compact `a|b|c` rendering for CSV cells.
    pub fn label(&self) -> String {
        self.slots
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}
