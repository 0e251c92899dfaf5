// Session context: the only mutable state of a walkthrough.
// Every handler goes through here; nothing is ambient or static.

use rand::Rng;

use crate::choreography::{script_for, Cast};
use crate::effects::Effect;
use crate::persona::{generate_victim, VictimPersona};
use crate::scammer::{generate_scammer, ScammerPersona};
use crate::selection::{ChipUpdate, SelectionState};
use crate::sequencer::{Screen, Sequencer, Transition};
use crate::timeline::{Advance, Timeline};
use crate::types::*;

pub struct Session<R: Rng> {
    config: StoryConfig,
    selection: SelectionState,
    sequencer: Sequencer,
    timeline: Timeline,
    victim: Option<VictimPersona>,
    scammer: Option<ScammerPersona>,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: StoryConfig, rng: R) -> Self {
        Session {
            config,
            selection: SelectionState::new(),
            sequencer: Sequencer::new(),
            timeline: Timeline::new(),
            victim: None,
            scammer: None,
            rng,
        }
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn victim(&self) -> Option<&VictimPersona> {
        self.victim.as_ref()
    }

    pub fn scammer(&self) -> Option<&ScammerPersona> {
        self.scammer.as_ref()
    }

    pub fn current_screen(&self) -> Screen {
        self.sequencer.current()
    }

    pub fn is_transitioning(&self) -> bool {
        self.sequencer.is_transitioning()
    }

    /// Answers are frozen once the visitor has left the questionnaire.
    pub fn toggle(&mut self, chip: Chip) -> ChipUpdate {
        if self.sequencer.current() != Screen::Questionnaire || self.is_transitioning() {
            log::debug!("chip toggle ignored after confirm");
            return ChipUpdate {
                selected: self.is_held(&chip),
                can_continue: self.selection.can_continue(),
                clipboard_scale: self.selection.clipboard_scale(),
            };
        }
        self.selection.toggle(chip)
    }

    pub fn toggle_single(&mut self, choice: SingleChoice) -> ChipUpdate {
        self.toggle(Chip::Single(choice))
    }

    pub fn toggle_multi(&mut self, attribute: Attribute) -> ChipUpdate {
        self.toggle(Chip::Have(attribute))
    }

    pub fn can_continue(&self) -> bool {
        self.selection.can_continue()
    }

    /// The continue action. Effects due immediately are returned; the rest come from `tick`.
    pub fn confirm(&mut self, now: Millis) -> Vec<Effect> {
        match self.sequencer.begin_confirm(self.selection.can_continue()) {
            Some(transition) => self.run(transition, now),
            None => Vec::new(),
        }
    }

    pub fn wheel(&mut self, delta_y: f64, now: Millis) -> Vec<Effect> {
        match self.sequencer.on_wheel(delta_y) {
            Some(transition) => self.run(transition, now),
            None => Vec::new(),
        }
    }

    /// Host frame callback: returns the effects that came due since the last call.
    pub fn tick(&mut self, now: Millis) -> Vec<Effect> {
        let advance = self.timeline.advance(now);
        self.settle(advance)
    }

    fn run(&mut self, transition: Transition, now: Millis) -> Vec<Effect> {
        log::info!(
            "transition {} -> {}",
            transition.from.number(),
            transition.to.number()
        );
        self.cast_for(transition);

        let cast = Cast {
            victim: self.victim.as_ref(),
            scammer: self.scammer.as_ref(),
            avatars: &self.config.avatars,
        };
        let script = script_for(transition, &cast);

        match self.timeline.start(transition, script, now) {
            Ok(advance) => self.settle(advance),
            Err(err) => {
                // The sequencer and timeline lock together; reaching this means they diverged.
                log::error!("{}", err);
                Vec::new()
            }
        }
    }

    /// Generate whichever personas the destination screen shows, once per session.
    fn cast_for(&mut self, transition: Transition) {
        let needs_victim = matches!(
            transition.to,
            Screen::Profile | Screen::Tactics | Screen::Match
        );
        if needs_victim && self.victim.is_none() {
            let victim = generate_victim(&self.selection, &mut self.rng);
            log::info!("victim generated: {} ({})", victim.name, victim.city);
            self.victim = Some(victim);
        }

        if transition.to == Screen::Match && self.scammer.is_none() {
            if let Some(victim) = &self.victim {
                let scammer = generate_scammer(&self.selection, &victim.city, &mut self.rng);
                log::info!("scammer generated: {} ({:?})", scammer.name, scammer.tactic);
                self.scammer = Some(scammer);
            }
        }
    }

    fn settle(&mut self, advance: Advance) -> Vec<Effect> {
        if let Some(transition) = advance.settled {
            if let Err(err) = self.sequencer.complete(transition) {
                log::error!("{}", err);
            } else {
                log::debug!("screen {} ready", transition.to.number());
            }
        }
        advance.effects
    }

    fn is_held(&self, chip: &Chip) -> bool {
        match chip {
            Chip::Single(SingleChoice::Age(age)) => self.selection.age == Some(*age),
            Chip::Single(SingleChoice::Sex(sex)) => self.selection.sex == Some(*sex),
            Chip::Single(SingleChoice::Occupation(occupation)) => {
                self.selection.occupation == Some(*occupation)
            }
            Chip::Have(attribute) => self.selection.has(attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{animate, Class};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Far enough past any script's settle offset.
    const SETTLE: u64 = 5_000;

    fn session() -> Session<SmallRng> {
        Session::new(StoryConfig::default(), SmallRng::seed_from_u64(42))
    }

    fn answered() -> Session<SmallRng> {
        let mut session = session();
        session.toggle_single(SingleChoice::Age(AgeBucket::From25To34));
        session.toggle_single(SingleChoice::Sex(Sex::Male));
        session.toggle_single(SingleChoice::Occupation(Occupation::Salaried));
        session.toggle_multi(Attribute::MobileNumber);
        session
    }

    /// Confirm and scroll forward until `target`, settling every transition.
    fn walk_to(target: Screen) -> (Session<SmallRng>, u64) {
        let mut session = answered();
        let mut now = 1_000;
        session.confirm(Millis::new(now));
        now += SETTLE;
        session.tick(Millis::new(now));
        while session.current_screen() < target {
            session.wheel(100.0, Millis::new(now));
            now += SETTLE;
            session.tick(Millis::new(now));
        }
        (session, now)
    }

    #[test]
    fn confirm_is_gated_on_answers() {
        let mut session = session();
        session.toggle_single(SingleChoice::Age(AgeBucket::Under18));
        assert!(session.confirm(Millis::ZERO).is_empty());
        assert!(!session.is_transitioning());
        assert_eq!(session.current_screen(), Screen::Questionnaire);
    }

    #[test]
    fn confirm_runs_the_pwned_entrance() {
        let mut session = answered();
        let immediate = session.confirm(Millis::new(100));
        assert!(!immediate.is_empty());
        assert!(session.is_transitioning());

        let early = session.tick(Millis::new(700));
        assert!(early.iter().any(|e| *e == crate::effects::add("#screen-2", Class::Shake)));
        assert_eq!(session.current_screen(), Screen::Questionnaire);

        let rest = session.tick(Millis::new(2_200));
        assert_eq!(rest.last(), Some(&animate("#s2-scroll-hint")));
        assert_eq!(session.current_screen(), Screen::Pwned);
        assert!(session.sequencer().is_ready(Screen::Pwned));
        assert!(!session.is_transitioning());
    }

    #[test]
    fn chips_freeze_after_confirm() {
        let (mut session, _) = walk_to(Screen::Pwned);
        let update = session.toggle_single(SingleChoice::Sex(Sex::Male));
        assert!(update.selected);
        assert_eq!(session.selection().sex, Some(Sex::Male));
    }

    #[test]
    fn wheel_mid_transition_has_no_effect() {
        let (mut session, now) = walk_to(Screen::Exposure);
        session.wheel(100.0, Millis::new(now));
        assert!(session.is_transitioning());

        assert!(session.wheel(100.0, Millis::new(now + 10)).is_empty());
        assert!(session.wheel(-100.0, Millis::new(now + 20)).is_empty());

        session.tick(Millis::new(now + SETTLE));
        assert_eq!(session.current_screen(), Screen::Profile);
        assert!(!session.is_transitioning());
    }

    #[test]
    fn forward_then_back_restores_screen() {
        let (mut session, mut now) = walk_to(Screen::Exposure);
        session.wheel(1.0, Millis::new(now));
        now += SETTLE;
        session.tick(Millis::new(now));
        assert_eq!(session.current_screen(), Screen::Profile);

        session.wheel(-1.0, Millis::new(now));
        now += SETTLE;
        session.tick(Millis::new(now));
        assert_eq!(session.current_screen(), Screen::Exposure);
        assert!(!session.sequencer().is_ready(Screen::Profile));
    }

    #[test]
    fn end_to_end_salaried_mobile_scenario() {
        let (session, _) = walk_to(Screen::Profile);
        let victim = session.victim().expect("victim generated on entering the profile");

        assert_eq!(victim.bio, crate::persona::bio_for(Occupation::Salaried, &victim.name));
        assert_eq!(victim.identifiers.len(), 1);
        let number = victim.identifiers[0]
            .strip_prefix("Mob no. \u{2013} 9")
            .expect("mobile line");
        assert_eq!(number.len(), 9);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(session.scammer().is_none());
    }

    #[test]
    fn profile_content_arrives_with_the_first_effects() {
        let (mut session, now) = walk_to(Screen::Exposure);
        let immediate = session.wheel(1.0, Millis::new(now));
        let victim = session.victim().unwrap();
        assert!(immediate.contains(&Effect::SetText {
            target: "#s4-name",
            text: victim.name.clone(),
        }));
    }

    #[test]
    fn personas_are_generated_once() {
        let (mut session, mut now) = walk_to(Screen::Match);
        let victim = session.victim().cloned().unwrap();
        let scammer = session.scammer().cloned().unwrap();
        assert_eq!(scammer.city, victim.city);
        // 45-54 would force authority; 25-34 salaried is authority or hijack.
        assert!(matches!(scammer.tactic, Tactic::Authority | Tactic::Hijack));

        for delta in [-1.0, -1.0, 1.0, 1.0] {
            session.wheel(delta, Millis::new(now));
            now += SETTLE;
            session.tick(Millis::new(now));
        }
        assert_eq!(session.current_screen(), Screen::Match);
        assert_eq!(session.victim(), Some(&victim));
        assert_eq!(session.scammer(), Some(&scammer));
    }

    #[test]
    fn full_walk_reaches_contact_and_back() {
        let (mut session, mut now) = walk_to(Screen::Contact);
        assert!(session.wheel(1.0, Millis::new(now)).is_empty());

        while session.current_screen() > Screen::Pwned {
            let before = session.current_screen();
            session.wheel(-1.0, Millis::new(now));
            now += SETTLE;
            session.tick(Millis::new(now));
            assert_eq!(session.current_screen(), before.previous().unwrap());
            assert!(!session.sequencer().is_ready(before));
        }
        assert!(session.wheel(-1.0, Millis::new(now)).is_empty());
        assert_eq!(session.current_screen(), Screen::Pwned);
    }
}
