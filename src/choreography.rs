// Transition choreography: one script of timed render effects per screen pair.
// Forward scripts fade the old screen, swap containers, then stagger the new one in.
// Reverse scripts restore the destination's settled state instead of replaying its entrance.

use crate::effects::*;
use crate::persona::VictimPersona;
use crate::scammer::ScammerPersona;
use crate::sequencer::{Screen, Transition};
use crate::timeline::Script;
use crate::types::AvatarSettings;

const SCREEN_1: &str = "#screen-1";
const SCREEN_2: &str = "#screen-2";
const SCREEN_3: &str = "#screen-3";
const SCREEN_4: &str = "#screen-4";
const SCREEN_5: &str = "#screen-5";
const SCREEN_6: &str = "#screen-6";
const SCREEN_7: &str = "#screen-7";
const SCROLLER: &str = "#scroll-container-3-4";

const S1_FORM: &str = "#screen-1 .section, #screen-1 .continue-wrapper";
const CLIPBOARD: &str = ".clipboard-wrapper";

const S2_ELEMENTS: &str =
    "#screen-2 .center-devil, #screen-2 .pwned-text, #screen-2 .pwned-link, #screen-2 .emoji, #screen-2 .scroll-hint";
const S2_HINT: &str = "#s2-scroll-hint";

const S3_ELEMENTS: &str = "#screen-3 .s3-pills, #screen-3 .s3-left, #screen-3 .s3-right, #screen-3 .scroll-hint";
const S3_HINT: &str = "#s3-scroll-hint";

const S4_PROFILE_CARD: &str = ".s4-profile-card";
const S4_ID_CARD: &str = ".s4-id-card";
const S4_HINT: &str = "#s4-scroll-hint";

const S5_STAGE: &str = "#screen-5 .s5-tactic, #screen-5 .s5-lines, #screen-5 .s5-center";
const S5_ALL: &str = "#screen-5 .s5-pills, #screen-5 .s5-center, #screen-5 .s5-lines, #screen-5 .s5-tactic, \
                      #screen-5 .s5-victim-label, #screen-5 #s5-victim-card, #screen-5 .scroll-hint";
const S5_HINT: &str = "#s5-scroll-hint";

const S6_CONTENT: &str = "#screen-6 .s6-scammer-label, #screen-6 #s6-scammer-card, #screen-6 .s6-pills, \
                          #screen-6 .s6-left, #screen-6 .s6-right, #screen-6 .s6-victim-label, #screen-6 #s6-victim-card";
const S6_ALL: &str = "#screen-6 .s6-scammer-label, #screen-6 #s6-scammer-card, #screen-6 .s6-pills, \
                      #screen-6 .s6-left, #screen-6 .s6-right, #screen-6 .s6-victim-label, #screen-6 #s6-victim-card, \
                      #screen-6 .scroll-hint";
const S6_HINT: &str = "#s6-scroll-hint";

const S7_ELEMENTS: &str = "#screen-7 .s7-scammer-figure, #screen-7 .s7-dots, #screen-7 .s7-victim-figure, \
                           #screen-7 .s7-text, #screen-7 .s7-modes, #screen-7 .scroll-hint";
const S7_DOTS: &str = ".s7-dots";
const S7_HINT: &str = "#s7-scroll-hint";

/// Text slots of a mini victim card (screens 5 and 6).
struct VictimCardSlots {
    avatar: &'static str,
    name: &'static str,
    details: &'static str,
    ids: &'static str,
}

const S5_VICTIM_CARD: VictimCardSlots = VictimCardSlots {
    avatar: "#s5-victim-avatar-img",
    name: "#s5-victim-name",
    details: "#s5-victim-details",
    ids: "#s5-victim-ids",
};

const S6_VICTIM_CARD: VictimCardSlots = VictimCardSlots {
    avatar: "#s6-victim-avatar-img",
    name: "#s6-victim-name",
    details: "#s6-victim-details",
    ids: "#s6-victim-ids",
};

/// Generated content available to the scripts.
#[derive(Debug, Clone, Copy)]
pub struct Cast<'a> {
    pub victim: Option<&'a VictimPersona>,
    pub scammer: Option<&'a ScammerPersona>,
    pub avatars: &'a AvatarSettings,
}

/// Build the script for `transition`. Pairs the sequencer never grants get an empty script.
pub fn script_for(transition: Transition, cast: &Cast<'_>) -> Script {
    use Screen::*;

    match (transition.from, transition.to) {
        (Questionnaire, Pwned) => enter_pwned(),
        (Pwned, Exposure) => enter_exposure(),
        (Exposure, Profile) => enter_profile(cast),
        (Profile, Tactics) => enter_tactics(cast),
        (Tactics, Match) => enter_match(cast),
        (Match, Contact) => enter_contact(),
        (Contact, Match) => back_to_match(),
        (Match, Tactics) => back_to_tactics(),
        (Tactics, Profile) => back_to_profile(),
        (Profile, Exposure) => back_to_exposure(),
        (Exposure, Pwned) => back_to_pwned(),
        (from, to) => {
            log::warn!("no choreography for {:?} -> {:?}", from, to);
            Script::new()
        }
    }
}

fn enter_pwned() -> Script {
    let mut swap = hide(SCREEN_1);
    swap.extend(show(SCREEN_2));
    swap.push(add(SCREEN_2, Class::Shake));

    Script::new()
        .at(0, fade_out(S1_FORM, Axis::X, -40))
        .at(0, fade_out(CLIPBOARD, Axis::X, 80))
        .at(600, swap)
        .at(700, [animate(".center-devil")])
        .at(1000, [animate(".pwned-text")])
        .at(1200, [animate(".emoji")])
        .at(1500, [animate(".pwned-link")])
        .at(2100, [animate(S2_HINT)])
}

fn enter_exposure() -> Script {
    let mut shrink = fade_out(S2_ELEMENTS, Axis::X, -40);
    shrink.push(style(S2_ELEMENTS, StyleProperty::Transform, "scale(0.9)"));

    let mut swap = hide(SCREEN_2);
    swap.extend(show(SCROLLER));
    swap.push(remove(SCREEN_3, Class::ScreenHidden));
    swap.push(remove(SCREEN_4, Class::ScreenHidden));

    Script::new()
        .at(0, shrink)
        .at(600, swap)
        .at(700, [animate(".s3-pills")])
        .at(800, [animate(".s3-left")])
        .at(950, [animate(".s3-right")])
        .at(1800, [animate(S3_HINT)])
}

fn enter_profile(cast: &Cast<'_>) -> Script {
    let mut slide = fade_hint(S3_HINT);
    slide.push(add(SCROLLER, Class::Scrolled));

    // Hint may still carry the fade from a previous exit.
    let mut reveal = vec![animate(S4_PROFILE_CARD), animate(S4_ID_CARD)];
    reveal.extend(restore(S4_HINT));

    Script::new()
        .at(0, populate_profile(cast))
        .at(0, slide)
        .at(1000, reveal)
}

fn enter_tactics(cast: &Cast<'_>) -> Script {
    let mut leave = fade_hint(S4_HINT);
    leave.extend(fade_out("#screen-4 .s4-id-card", Axis::X, -40));

    Script::new()
        .at(0, leave)
        .at(0, populate_victim_card(&S5_VICTIM_CARD, cast))
        .at(0, show(SCREEN_5))
        .at(100, [animate(".s5-victim-label"), animate("#s5-victim-card")])
        .at(300, hide(SCROLLER))
        .at(600, [animate(".s5-pills"), animate(".s5-center")])
        .at(1000, [animate(".s5-lines")])
        .at(1100, [animate(".s5-tactic")])
        .at(1900, [animate(S5_HINT)])
}

fn enter_match(cast: &Cast<'_>) -> Script {
    let mut leave = fade_hint(S5_HINT);
    leave.extend(fade_out(S5_STAGE, Axis::Y, 30));

    let mut swap = hide(SCREEN_5);
    swap.extend(show(SCREEN_6));

    Script::new()
        .at(0, leave)
        .at(0, populate_scammer_card(cast))
        .at(0, populate_victim_card(&S6_VICTIM_CARD, cast))
        .at(500, swap)
        .at(
            550,
            [animate(".s6-pills"), animate(".s6-victim-label"), animate("#s6-victim-card")],
        )
        .at(700, [animate(".s6-scammer-label"), animate("#s6-scammer-card")])
        .at(900, [animate(".s6-left")])
        .at(1100, [animate(".s6-right")])
        .at(2000, [animate(S6_HINT)])
}

fn enter_contact() -> Script {
    let mut leave = fade_hint(S6_HINT);
    leave.extend(fade_out(S6_CONTENT, Axis::Y, 30));

    let mut swap = hide(SCREEN_6);
    swap.extend(show(SCREEN_7));

    Script::new()
        .at(0, leave)
        .at(500, swap)
        .at(600, [animate(".s7-scammer-figure")])
        .at(1100, [animate(S7_DOTS)])
        .at(1700, [animate(".s7-victim-figure")])
        .at(2500, [remove(S7_DOTS, Class::Animate), add(S7_DOTS, Class::Connected)])
        .at(2700, [animate(".s7-text")])
        .at(3300, [animate(".s7-modes")])
        .at(3900, [animate(S7_HINT)])
}

fn back_to_match() -> Script {
    let mut swap = hide(SCREEN_7);
    swap.extend(strip(S7_ELEMENTS));
    swap.push(remove(S7_ELEMENTS, Class::Connected));
    swap.extend(show(SCREEN_6));
    swap.extend(restore(S6_CONTENT));
    swap.extend(restore(S6_HINT));

    Script::new()
        .at(0, fade_out(S7_ELEMENTS, Axis::Y, 30))
        .at(500, swap)
}

fn back_to_tactics() -> Script {
    let mut swap = hide(SCREEN_6);
    swap.extend(strip(S6_ALL));
    swap.extend(show(SCREEN_5));
    swap.extend(restore(S5_STAGE));
    swap.extend([
        animate(".s5-pills"),
        animate(".s5-victim-label"),
        animate("#s5-victim-card"),
    ]);
    swap.extend(restore(S5_HINT));

    Script::new()
        .at(0, fade_out(S6_ALL, Axis::Y, 30))
        .at(500, swap)
}

fn back_to_profile() -> Script {
    let mut swap = hide(SCREEN_5);
    swap.extend(strip(S5_ALL));
    swap.extend(show(SCROLLER));
    for card in [S4_PROFILE_CARD, S4_ID_CARD] {
        swap.push(style(card, StyleProperty::Opacity, "1"));
        swap.push(Effect::ClearStyle {
            target: card,
            property: StyleProperty::Transform,
        });
    }
    swap.extend(restore(S4_HINT));

    Script::new()
        .at(0, fade_out(S5_ALL, Axis::Y, 30))
        .at(500, swap)
}

fn back_to_exposure() -> Script {
    let mut slide = fade_hint(S4_HINT);
    slide.push(remove(SCROLLER, Class::Scrolled));

    Script::new()
        .at(0, slide)
        .at(1000, restore(S3_HINT))
}

fn back_to_pwned() -> Script {
    let mut swap = hide(SCROLLER);
    swap.extend(strip(S3_ELEMENTS));
    swap.extend(show(SCREEN_2));
    swap.extend(clear_styles(S2_ELEMENTS));
    swap.push(animate(S2_HINT));

    Script::new()
        .at(0, fade_out(S3_ELEMENTS, Axis::Y, 30))
        .at(500, swap)
}

fn populate_profile(cast: &Cast<'_>) -> Vec<Effect> {
    let Some(victim) = cast.victim else {
        log::warn!("profile revealed without a victim persona");
        return Vec::new();
    };
    vec![
        Effect::SetText {
            target: "#s4-name",
            text: victim.name.clone(),
        },
        Effect::SetAttr {
            target: "#s4-avatar-img",
            name: "src",
            value: cast.avatars.for_sex(victim.sex).to_string(),
        },
        Effect::SetLines {
            target: "#s4-details",
            tag: LineTag::Span,
            lines: victim.detail_lines(),
        },
        Effect::SetLines {
            target: "#s4-ids",
            tag: LineTag::Span,
            lines: victim.identifiers.clone(),
        },
        Effect::SetText {
            target: "#s4-bio",
            text: victim.bio.clone(),
        },
    ]
}

fn populate_victim_card(slots: &VictimCardSlots, cast: &Cast<'_>) -> Vec<Effect> {
    let Some(victim) = cast.victim else {
        log::warn!("victim card revealed without a victim persona");
        return Vec::new();
    };
    vec![
        Effect::SetAttr {
            target: slots.avatar,
            name: "src",
            value: cast.avatars.for_sex(victim.sex).to_string(),
        },
        Effect::SetText {
            target: slots.name,
            text: victim.name.clone(),
        },
        Effect::SetLines {
            target: slots.details,
            tag: LineTag::P,
            lines: victim.detail_lines(),
        },
        Effect::SetLines {
            target: slots.ids,
            tag: LineTag::P,
            lines: victim.identifiers.clone(),
        },
    ]
}

fn populate_scammer_card(cast: &Cast<'_>) -> Vec<Effect> {
    let Some(scammer) = cast.scammer else {
        log::warn!("scammer card revealed without a scammer persona");
        return Vec::new();
    };
    vec![
        Effect::SetText {
            target: "#s6-scammer-name",
            text: scammer.name.clone(),
        },
        Effect::SetLines {
            target: "#s6-scammer-details",
            tag: LineTag::P,
            lines: scammer.detail_lines(),
        },
    ]
}
