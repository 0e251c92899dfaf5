// Timeline scheduler: runs one script of timed cues against host timestamps.
// Cue order is the offset order (stable for equal offsets); completion is explicit data.
// See DESIGN.md: Timeline Scheduler

use crate::effects::Effect;
use crate::error::StoryError;
use crate::sequencer::Transition;
use crate::types::Millis;

/// An effect scheduled at a fixed offset from the start of its script.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub at: Millis,
    pub effect: Effect,
}

/// An ordered list of cues plus the offset at which the script settles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    cues: Vec<Cue>,
    settle_at: Millis,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `effects` at `offset_ms`, after anything already scheduled at that offset.
    pub fn at(mut self, offset_ms: u64, effects: impl IntoIterator<Item = Effect>) -> Self {
        let at = Millis::new(offset_ms);
        let mut index = self.cues.partition_point(|cue| cue.at <= at);
        for effect in effects {
            self.cues.insert(index, Cue { at, effect });
            index += 1;
        }
        self.settle_at = self.settle_at.max(at);
        self
    }

    /// Settle no earlier than `offset_ms`, and never before the last cue.
    pub fn settle(mut self, offset_ms: u64) -> Self {
        self.settle_at = self.settle_at.max(Millis::new(offset_ms));
        self
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn settle_at(&self) -> Millis {
        self.settle_at
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.cues.iter().map(|cue| &cue.effect)
    }
}

/// Output of one scheduler step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advance {
    /// Cues that came due, in script order.
    pub effects: Vec<Effect>,
    /// Set once the script has fully played out.
    pub settled: Option<Transition>,
}

#[derive(Debug, Clone)]
struct Running {
    transition: Transition,
    started: Millis,
    script: Script,
    next: usize,
}

/// Single-slot scheduler. At most one script runs; there is no cancellation.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    running: Option<Running>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_none()
    }

    /// Start `script` at `now` and return whatever is due immediately.
    pub fn start(
        &mut self,
        transition: Transition,
        script: Script,
        now: Millis,
    ) -> Result<Advance, StoryError> {
        if self.running.is_some() {
            return Err(StoryError::TransitionInFlight);
        }
        self.running = Some(Running {
            transition,
            started: now,
            script,
            next: 0,
        });
        Ok(self.advance(now))
    }

    /// Deliver every cue whose offset has elapsed by `now`.
    pub fn advance(&mut self, now: Millis) -> Advance {
        let Some(running) = self.running.as_mut() else {
            return Advance::default();
        };

        let elapsed = now.saturating_sub(running.started);
        let cues = running.script.cues();
        let due = cues[running.next..]
            .iter()
            .take_while(|cue| cue.at <= elapsed)
            .count();
        let effects = cues[running.next..running.next + due]
            .iter()
            .map(|cue| cue.effect.clone())
            .collect();
        running.next += due;

        let done = running.next == cues.len() && elapsed >= running.script.settle_at();
        let settled = if done {
            self.running.take().map(|r| r.transition)
        } else {
            None
        };

        Advance { effects, settled }
    }
}
