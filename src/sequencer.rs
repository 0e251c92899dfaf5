// Screen sequencer: the single source of truth for navigation.
// One transition in flight at a time; input arriving while locked is dropped, never queued.

use serde::Serialize;

use crate::error::StoryError;

/// The seven screens of the walkthrough, in narrative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Screen {
    /// Questionnaire chips.
    Questionnaire = 1,
    /// "Pwned" splash.
    Pwned = 2,
    /// Exposure overview (left half of the horizontal scroller).
    Exposure = 3,
    /// Victim profile (right half of the horizontal scroller).
    Profile = 4,
    /// Victim card against the four tactics.
    Tactics = 5,
    /// Matched scammer card.
    Match = 6,
    /// Contact established.
    Contact = 7,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Questionnaire,
        Screen::Pwned,
        Screen::Exposure,
        Screen::Profile,
        Screen::Tactics,
        Screen::Match,
        Screen::Contact,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Screen> {
        Screen::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn next(&self) -> Option<Screen> {
        Screen::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Screen> {
        Screen::from_number(self.number().checked_sub(1)?)
    }

    fn index(&self) -> usize {
        usize::from(self.number()) - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// A move between two adjacent screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

impl Transition {
    pub fn direction(&self) -> Direction {
        if self.to > self.from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Navigation state machine: current screen, readiness flags, transition lock.
#[derive(Debug, Clone, Serialize)]
pub struct Sequencer {
    current: Screen,
    /// Indexed by screen; the questionnaire slot is never set.
    ready: [bool; 7],
    in_flight: Option<Transition>,
}

impl Sequencer {
    pub fn new() -> Self {
        Sequencer {
            current: Screen::Questionnaire,
            ready: [false; 7],
            in_flight: None,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_ready(&self, screen: Screen) -> bool {
        self.ready[screen.index()]
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<Transition> {
        self.in_flight
    }

    /// Explicit continue from the questionnaire. The only way onto screen 2.
    pub fn begin_confirm(&mut self, can_continue: bool) -> Option<Transition> {
        if self.is_transitioning() || self.current != Screen::Questionnaire || !can_continue {
            return None;
        }
        self.lock(Transition {
            from: Screen::Questionnaire,
            to: Screen::Pwned,
        })
    }

    /// Wheel navigation: positive delta moves forward, negative backward.
    pub fn on_wheel(&mut self, delta_y: f64) -> Option<Transition> {
        if self.is_transitioning() {
            log::debug!("wheel dropped: transition in flight");
            return None;
        }
        if !self.is_ready(self.current) {
            return None;
        }

        let to = if delta_y > 0.0 {
            self.current.next()
        } else if delta_y < 0.0 {
            self.current.previous().filter(|screen| *screen != Screen::Questionnaire)
        } else {
            None
        }?;

        self.lock(Transition {
            from: self.current,
            to,
        })
    }

    /// Finish the in-flight transition: move, update readiness, release the lock.
    /// Forward entry marks the destination ready; leaving backward clears the source
    /// so its entrance plays again on the next forward visit.
    pub fn complete(&mut self, transition: Transition) -> Result<(), StoryError> {
        if self.in_flight != Some(transition) {
            return Err(StoryError::TransitionMismatch {
                expected: self.current.number(),
                found: transition.from.number(),
            });
        }

        match transition.direction() {
            Direction::Forward => self.ready[transition.to.index()] = true,
            Direction::Backward => self.ready[transition.from.index()] = false,
        }
        self.current = transition.to;
        self.in_flight = None;
        Ok(())
    }

    fn lock(&mut self, transition: Transition) -> Option<Transition> {
        self.in_flight = Some(transition);
        Some(transition)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
