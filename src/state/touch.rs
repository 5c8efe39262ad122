// Active touch set and contact color assignment
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeMap;

use crate::model::{Color, ContactPoint, Touch, TouchId, PALETTE};
use crate::selection::Assignment;

#[derive(Default, Debug, Clone)]
pub struct TouchTracker {
    touches: BTreeMap<TouchId, Touch>,
}

/// Uniform pick among palette colors not in `in_use`; the whole palette once
/// every color is taken.
pub fn pick_color<R: Rng>(in_use: &[Color], rng: &mut R) -> Color {
    let free: Vec<Color> = PALETTE
        .iter()
        .copied()
        .filter(|c| !in_use.contains(c))
        .collect();
    match free.choose(rng) {
        Some(color) => *color,
        None => PALETTE.choose(rng).copied().unwrap_or(PALETTE[0]),
    }
}

impl TouchTracker {
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, id: TouchId) -> Option<&Touch> {
        self.touches.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Touch> {
        self.touches.values()
    }

    pub fn ids(&self) -> Vec<TouchId> {
        self.touches.keys().copied().collect()
    }

    /// Adds a contact, replacing any stale entry with the same id.
    pub fn insert<R: Rng>(&mut self, point: ContactPoint, rng: &mut R) -> Color {
        self.touches.remove(&point.id);
        let in_use: Vec<Color> = self.touches.values().map(|t| t.color).collect();
        let color = pick_color(&in_use, rng);
        self.touches
            .insert(point.id, Touch::new(point.id, point.x, point.y, color));
        color
    }

    pub fn move_to(&mut self, id: TouchId, x: f64, y: f64) -> bool {
        match self.touches.get_mut(&id) {
            Some(t) => {
                t.x = x;
                t.y = y;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: TouchId) -> bool {
        self.touches.remove(&id).is_some()
    }

    pub fn mark_lifted(&mut self, id: TouchId) -> bool {
        match self.touches.get_mut(&id) {
            Some(t) => {
                t.lifted = true;
                true
            }
            None => false,
        }
    }

    pub fn all_lifted(&self) -> bool {
        self.touches.values().all(|t| t.lifted)
    }

    #[cfg(test)]
    pub(crate) fn selected_count(&self) -> usize {
        self.touches.values().filter(|t| t.is_selected()).count()
    }

    pub fn clear(&mut self) {
        self.touches.clear();
    }

    pub fn apply(&mut self, assignments: &[Assignment]) {
        for a in assignments {
            if let Some(t) = self.touches.get_mut(&a.id) {
                t.outcome = a.outcome;
                if let Some(color) = a.color {
                    t.color = color;
                }
            }
        }
    }
}
