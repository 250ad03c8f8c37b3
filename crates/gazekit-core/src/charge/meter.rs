//! A simple charge accumulator

use std::collections::HashSet;

use super::Chargeable;
use crate::gaze::GazeableId;

/// Fills by `rate` per active charger on every [`advance`](Self::advance),
/// clamped to `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ChargeMeter {
    chargers: HashSet<GazeableId>,
    charge: f32,
    rate: f32,
}

impl ChargeMeter {
    pub fn new(rate: f32) -> Self {
        Self {
            chargers: HashSet::new(),
            charge: 0.0,
            rate,
        }
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn is_full(&self) -> bool {
        self.charge >= 1.0
    }

    pub fn charger_count(&self) -> usize {
        self.chargers.len()
    }

    /// Accumulate one tick's worth of charge
    pub fn advance(&mut self) {
        let gained = self.rate * self.chargers.len() as f32;
        self.charge = (self.charge + gained).clamp(0.0, 1.0);
    }

    pub fn reset(&mut self) {
        self.charge = 0.0;
    }
}

impl Chargeable for ChargeMeter {
    fn add_charger(&mut self, source: GazeableId) {
        self.chargers.insert(source);
    }

    fn remove_charger(&mut self, source: GazeableId) {
        self.chargers.remove(&source);
    }
}
