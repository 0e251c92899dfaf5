// Victim persona generator.
// Pure function of the selection plus an injected RNG; unset answers fall back to defaults.

use rand::Rng;
use serde::Serialize;

use crate::selection::SelectionState;
use crate::types::*;

pub const DEFAULT_AGE: AgeBucket = AgeBucket::From25To34;
pub const DEFAULT_SEX: Sex = Sex::Male;
pub const DEFAULT_OCCUPATION: Occupation = Occupation::Salaried;

const MALE_NAMES: &[&str] = &["Aarav", "Rohan", "Vikram", "Chandu", "Rahul", "Arjun", "Karan", "Nikhil"];
const FEMALE_NAMES: &[&str] = &["Priya", "Ananya", "Sneha", "Kavya", "Meera", "Isha", "Pooja", "Riya"];
const NON_BINARY_NAMES: &[&str] = &["Alex", "Sam", "Noor", "Kiran", "Arya", "Reese", "Jaya", "Pari"];

pub const CITIES: &[&str] = &[
    "Mumbai, MH",
    "Delhi, DL",
    "Bangalore, KA",
    "Nagpur, MH",
    "Pune, MH",
    "Hyderabad, TS",
    "Chennai, TN",
    "Kolkata, WB",
    "Jaipur, RJ",
    "Lucknow, UP",
];

const BANKS: &[&str] = &["ICICI", "SBI", "HDFC", "Axis", "Kotak"];
const BROKERS: &[&str] = &["Zerodha", "Groww", "Upstox"];
const SURNAMES: &[&str] = &["Kumar", "Sharma", "Singh", "Patel", "Rao"];

/// Minors and young adults are always shown as unmarried.
const MARRIAGEABLE_AGE: u8 = 22;

/// A generated victim. Built once per session, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VictimPersona {
    pub name: String,
    pub age: u8,
    pub sex: Sex,
    pub marital: MaritalStatus,
    pub occupation: Occupation,
    pub city: String,
    pub mobile: String,
    /// One line per held attribute that has a template, in click order.
    pub identifiers: Vec<String>,
    pub bio: String,
}

impl VictimPersona {
    /// The four stacked detail lines on the profile card.
    pub fn detail_lines(&self) -> Vec<String> {
        vec![
            format!("{} {}", self.age, self.sex.label()),
            self.marital.as_str().to_string(),
            self.occupation.label(),
            self.city.clone(),
        ]
    }
}

pub fn generate_victim<R: Rng + ?Sized>(selection: &SelectionState, rng: &mut R) -> VictimPersona {
    let sex = selection.sex.unwrap_or(DEFAULT_SEX);
    let bucket = selection.age.unwrap_or(DEFAULT_AGE);
    let occupation = selection.occupation.unwrap_or(DEFAULT_OCCUPATION);

    let age = display_age(bucket, rng);
    let name = pick(rng, names_for(sex)).to_string();
    let city = pick(rng, CITIES).to_string();
    let mobile = format!("9{}", digits(rng, 9));
    let marital = if age < MARRIAGEABLE_AGE {
        MaritalStatus::Unmarried
    } else if rng.gen_bool(0.5) {
        MaritalStatus::Married
    } else {
        MaritalStatus::Unmarried
    };

    let identifiers = selection
        .have()
        .iter()
        .filter_map(|attribute| {
            let line = identifier_line(attribute, &name, &mobile, rng);
            if line.is_none() {
                log::debug!("no identifier template for `{}`, omitting", attribute.as_str());
            }
            line
        })
        .collect();

    let bio = bio_for(occupation, &name);

    VictimPersona {
        name,
        age,
        sex,
        marital,
        occupation,
        city,
        mobile,
        identifiers,
        bio,
    }
}

/// Concrete age inside the bucket: pinned for open-ended buckets, uniform otherwise.
pub fn display_age<R: Rng + ?Sized>(bucket: AgeBucket, rng: &mut R) -> u8 {
    match (bucket.pinned_age(), bucket.bounds()) {
        (Some(age), _) => age,
        (None, Some((lo, hi))) => rng.gen_range(lo..=hi),
        (None, None) => 30,
    }
}

pub fn names_for(sex: Sex) -> &'static [&'static str] {
    match sex {
        Sex::Male => MALE_NAMES,
        Sex::Female => FEMALE_NAMES,
        Sex::NonBinary => NON_BINARY_NAMES,
    }
}

fn identifier_line<R: Rng + ?Sized>(
    attribute: &Attribute,
    name: &str,
    mobile: &str,
    rng: &mut R,
) -> Option<String> {
    let handle = name.to_lowercase();
    let line = match attribute {
        Attribute::MobileNumber => format!("Mob no. \u{2013} {}", mobile),
        Attribute::AadharNumber => format!("Aadhar \u{2013} {}", digits(rng, 12)),
        Attribute::PanNumber => format!("PAN \u{2013} {}", pan_code(rng)),
        Attribute::BankAccount => format!("BANK \u{2013} {}", pick(rng, BANKS)),
        Attribute::DematAccount => format!("Demat \u{2013} {}", pick(rng, BROKERS)),
        Attribute::Passport => format!("Passport \u{2013} J{}", digits(rng, 7)),
        Attribute::Instagram => format!("IG \u{2013} @{}{}", handle, digits(rng, 2)),
        Attribute::Facebook => format!("FB \u{2013} {} {}", name, pick(rng, SURNAMES)),
        Attribute::Whatsapp => format!("WhatsApp \u{2013} {}", mobile),
        Attribute::Gmail => format!("Gmail \u{2013} {}{}@gmail.com", handle, digits(rng, 3)),
        Attribute::Telegram => format!("Telegram \u{2013} @{}_{}", handle, digits(rng, 2)),
        Attribute::Other(_) => return None,
    };
    Some(line)
}

/// Five capitals, four digits, trailing `A`.
fn pan_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let letters: String = (0..5).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect();
    format!("{}{}A", letters, digits(rng, 4))
}

pub fn bio_for(occupation: Occupation, name: &str) -> String {
    match occupation {
        Occupation::Student => format!(
            "{name} spends hours scrolling through flashy ads and unbelievable offers with wide, trusting eyes. \
             Believes messages that start with \u{201c}Congratulations!\u{201d} are surely meant just for them. \
             When strangers text about lucky draws or secret investment tips, every word is read with complete seriousness. \
             In their digital world of bright banners and bold promises, their hopeful heart always clicks first and thinks later."
        ),
        Occupation::Salaried => format!(
            "{name} juggles work emails and personal messages on the same phone. \
             After a long day, a convincing \u{201c}urgent bank alert\u{201d} feels real enough to click. \
             Trusts official-looking logos and doesn\u{2019}t question links from \u{201c}HR\u{201d} or \u{201c}IT support.\u{201d} \
             The fatigue of a 9-to-5 makes every shortcut seem like a blessing\u{2014}and every scam seem genuine."
        ),
        Occupation::Unemployed => format!(
            "{name} spends hours online, scrolling through flashy ads and unbelievable offers with wide, trusting eyes. \
             Believes messages that start with \u{201c}Congratulations!\u{201d} are surely meant just for them. \
             When strangers text about lucky draws or secret investment tips, every word is read with complete seriousness. \
             Assumes everyone means well. Their hopeful heart always clicks first and thinks later."
        ),
        Occupation::SelfEmployed => format!(
            "{name} is always looking for the next big opportunity. \
             An email promising \u{201c}10x returns\u{201d} or a WhatsApp group with \u{201c}exclusive investment tips\u{201d} feels like insider knowledge. \
             Trusts people who talk business and moves fast without verifying. \
             The hustle mindset makes them the perfect target for scams dressed as opportunities."
        ),
    }
}

/// Uniform draw from a fixed, non-empty pool.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.gen_range(0..pool.len())]
}

pub(crate) fn digits<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    fn selection(
        age: Option<AgeBucket>,
        sex: Option<Sex>,
        occupation: Option<Occupation>,
        have: &[Attribute],
    ) -> SelectionState {
        let mut selection = SelectionState::new();
        selection.age = age;
        selection.sex = sex;
        selection.occupation = occupation;
        for attribute in have {
            selection.toggle_multi(attribute.clone());
        }
        selection
    }

    #[test]
    fn empty_selection_uses_defaults() {
        let victim = generate_victim(&SelectionState::new(), &mut rng(1));
        assert_eq!(victim.sex, Sex::Male);
        assert_eq!(victim.occupation, Occupation::Salaried);
        assert!((25..=34).contains(&victim.age));
        assert!(MALE_NAMES.contains(&victim.name.as_str()));
        assert!(victim.identifiers.is_empty());
    }

    #[test]
    fn pinned_ages() {
        for seed in 0..20 {
            let young = selection(Some(AgeBucket::Under18), None, None, &[]);
            assert_eq!(generate_victim(&young, &mut rng(seed)).age, 16);
            let old = selection(Some(AgeBucket::Over65), None, None, &[]);
            assert_eq!(generate_victim(&old, &mut rng(seed)).age, 68);
        }
    }

    #[test]
    fn minors_are_unmarried() {
        for seed in 0..20 {
            let young = selection(Some(AgeBucket::Under18), None, None, &[]);
            assert_eq!(generate_victim(&young, &mut rng(seed)).marital, MaritalStatus::Unmarried);
        }
    }

    #[test]
    fn salaried_mobile_only_scenario() {
        let chosen = selection(
            Some(AgeBucket::From25To34),
            Some(Sex::Male),
            Some(Occupation::Salaried),
            &[Attribute::MobileNumber],
        );
        let victim = generate_victim(&chosen, &mut rng(7));

        assert_eq!(victim.bio, bio_for(Occupation::Salaried, &victim.name));
        assert!(victim.bio.starts_with(&victim.name));
        assert_eq!(victim.identifiers.len(), 1);

        let line = &victim.identifiers[0];
        let number = line.strip_prefix("Mob no. \u{2013} ").expect("mobile prefix");
        assert_eq!(number.len(), 10);
        assert!(number.starts_with('9'));
        assert!(number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn every_known_attribute_renders_in_click_order() {
        let mut have: Vec<Attribute> = Attribute::KNOWN.to_vec();
        have.reverse();
        let chosen = selection(None, Some(Sex::Female), None, &have);
        let victim = generate_victim(&chosen, &mut rng(3));

        assert_eq!(victim.identifiers.len(), have.len());
        assert!(victim.identifiers[0].starts_with("Telegram \u{2013} @"));
        assert!(victim.identifiers.last().unwrap().starts_with("Mob no."));
        let whatsapp = victim
            .identifiers
            .iter()
            .find(|l| l.starts_with("WhatsApp"))
            .unwrap();
        assert!(whatsapp.ends_with(&victim.mobile));
    }

    #[test]
    fn unknown_attribute_is_omitted() {
        let chosen = selection(
            None,
            None,
            None,
            &[Attribute::Other("voter-id".to_string()), Attribute::Passport],
        );
        let victim = generate_victim(&chosen, &mut rng(5));
        assert_eq!(victim.identifiers.len(), 1);
        assert!(victim.identifiers[0].starts_with("Passport \u{2013} J"));
    }

    #[test]
    fn pan_code_shape() {
        let code = pan_code(&mut rng(11));
        assert_eq!(code.len(), 10);
        assert!(code[..5].chars().all(|c| c.is_ascii_uppercase()));
        assert!(code[5..9].chars().all(|c| c.is_ascii_digit()));
        assert!(code.ends_with('A'));
    }

    #[test]
    fn detail_lines_layout() {
        let chosen = selection(
            Some(AgeBucket::From18To24),
            Some(Sex::NonBinary),
            Some(Occupation::SelfEmployed),
            &[],
        );
        let victim = generate_victim(&chosen, &mut rng(9));
        let lines = victim.detail_lines();
        assert_eq!(lines[0], format!("{} NB", victim.age));
        assert_eq!(lines[2], "Self employed");
        assert_eq!(lines[3], victim.city);
        assert!(CITIES.contains(&lines[3].as_str()));
    }

    proptest! {
        /// Displayed ages always land inside the chosen bucket.
        #[test]
        fn display_age_within_bucket(bucket_index in 0usize..7, seed in any::<u64>()) {
            let bucket = AgeBucket::ALL[bucket_index];
            let age = display_age(bucket, &mut rng(seed));
            match (bucket.pinned_age(), bucket.bounds()) {
                (Some(pinned), _) => prop_assert_eq!(age, pinned),
                (None, Some((lo, hi))) => prop_assert!(age >= lo && age <= hi),
                (None, None) => prop_assert!(false, "bucket without age rule"),
            }
        }

        /// Generation never fails, whichever answers are missing.
        #[test]
        fn generation_tolerates_missing_answers(
            age in prop::option::of(0usize..7),
            sex in prop::option::of(0usize..3),
            occupation in prop::option::of(0usize..4),
            seed in any::<u64>(),
        ) {
            let chosen = selection(
                age.map(|i| AgeBucket::ALL[i]),
                sex.map(|i| Sex::ALL[i]),
                occupation.map(|i| Occupation::ALL[i]),
                &[],
            );
            let victim = generate_victim(&chosen, &mut rng(seed));
            prop_assert_eq!(victim.sex, chosen.sex.unwrap_or(DEFAULT_SEX));
            prop_assert_eq!(victim.occupation, chosen.occupation.unwrap_or(DEFAULT_OCCUPATION));
            prop_assert!(names_for(victim.sex).contains(&victim.name.as_str()));
        }
    }
}
