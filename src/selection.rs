// Selection state store: the visitor's four answers.
// Mutated only through the toggle operations; generators read it by reference.

use serde::Serialize;

use crate::types::*;

/// The questionnaire answers for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub age: Option<AgeBucket>,
    pub sex: Option<Sex>,
    pub occupation: Option<Occupation>,
    /// Insertion-ordered, no duplicates.
    have: Vec<Attribute>,
}

/// Result of a chip toggle, returned so the page can restyle the chip and
/// the continue button in one crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChipUpdate {
    pub selected: bool,
    pub can_continue: bool,
    pub clipboard_scale: f32,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `choice` in its group, or clear the group if it already holds it.
    pub fn toggle_single(&mut self, choice: SingleChoice) -> ChipUpdate {
        let selected = match choice {
            SingleChoice::Age(value) => toggle_slot(&mut self.age, value),
            SingleChoice::Sex(value) => toggle_slot(&mut self.sex, value),
            SingleChoice::Occupation(value) => toggle_slot(&mut self.occupation, value),
        };
        self.update(selected)
    }

    /// Flip membership of `attribute` in the "have" set.
    pub fn toggle_multi(&mut self, attribute: Attribute) -> ChipUpdate {
        let selected = match self.have.iter().position(|a| *a == attribute) {
            Some(index) => {
                self.have.remove(index);
                false
            }
            None => {
                self.have.push(attribute);
                true
            }
        };
        self.update(selected)
    }

    pub fn toggle(&mut self, chip: Chip) -> ChipUpdate {
        match chip {
            Chip::Single(choice) => self.toggle_single(choice),
            Chip::Have(attribute) => self.toggle_multi(attribute),
        }
    }

    pub fn have(&self) -> &[Attribute] {
        &self.have
    }

    pub fn has(&self, attribute: &Attribute) -> bool {
        self.have.contains(attribute)
    }

    /// Continue is enabled once every single-select group is answered and
    /// at least one attribute is held.
    pub fn can_continue(&self) -> bool {
        self.age.is_some() && self.sex.is_some() && self.occupation.is_some() && !self.have.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        [self.age.is_some(), self.sex.is_some(), self.occupation.is_some()]
            .iter()
            .filter(|set| **set)
            .count()
            + self.have.len()
    }

    /// The clipboard grows slightly with every answer, capped at +8%.
    pub fn clipboard_scale(&self) -> f32 {
        1.0 + (self.answered_count() as f32 * 0.008).min(0.08)
    }

    fn update(&self, selected: bool) -> ChipUpdate {
        ChipUpdate {
            selected,
            can_continue: self.can_continue(),
            clipboard_scale: self.clipboard_scale(),
        }
    }
}

fn toggle_slot<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        *slot = None;
        false
    } else {
        *slot = Some(value);
        true
    }
}
