// Strong typing over strings. Newtypes for host time, enums for every chip vocabulary.
// The page speaks in data-group/data-value strings; they are parsed once, here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoryError;

/// Host time in milliseconds (`performance.now()`). Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Millis(u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn new(ms: u64) -> Self {
        Millis(ms)
    }

    /// Host timestamps arrive as fractional `f64`; negative and NaN clamp to zero.
    pub fn from_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Millis(ms.floor() as u64)
        } else {
            Millis(0)
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    pub fn saturating_sub(&self, other: Millis) -> Millis {
        Millis(self.0.saturating_sub(other.0))
    }
}

/// Age bucket chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "<18")]
    Under18,
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-64")]
    From55To64,
    #[serde(rename = ">65")]
    Over65,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 7] = [
        AgeBucket::Under18,
        AgeBucket::From18To24,
        AgeBucket::From25To34,
        AgeBucket::From35To44,
        AgeBucket::From45To54,
        AgeBucket::From55To64,
        AgeBucket::Over65,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBucket::Under18 => "<18",
            AgeBucket::From18To24 => "18-24",
            AgeBucket::From25To34 => "25-34",
            AgeBucket::From35To44 => "35-44",
            AgeBucket::From45To54 => "45-54",
            AgeBucket::From55To64 => "55-64",
            AgeBucket::Over65 => ">65",
        }
    }

    /// Inclusive bounds for the ranged buckets. Open-ended buckets have none.
    pub fn bounds(&self) -> Option<(u8, u8)> {
        match self {
            AgeBucket::Under18 | AgeBucket::Over65 => None,
            AgeBucket::From18To24 => Some((18, 24)),
            AgeBucket::From25To34 => Some((25, 34)),
            AgeBucket::From35To44 => Some((35, 44)),
            AgeBucket::From45To54 => Some((45, 54)),
            AgeBucket::From55To64 => Some((55, 64)),
        }
    }

    /// Fixed age shown for the open-ended buckets.
    pub fn pinned_age(&self) -> Option<u8> {
        match self {
            AgeBucket::Under18 => Some(16),
            AgeBucket::Over65 => Some(68),
            _ => None,
        }
    }

    /// Bucket midpoint used for tactic selection. Never random.
    pub fn midpoint(&self) -> f32 {
        match (self.pinned_age(), self.bounds()) {
            (Some(age), _) => age as f32,
            (None, Some((lo, hi))) => (lo as f32 + hi as f32) / 2.0,
            (None, None) => 30.0,
        }
    }
}

/// Sex chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
    NonBinary,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::NonBinary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::NonBinary => "non-binary",
        }
    }

    /// Short code printed next to the age on persona cards.
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::NonBinary => "NB",
        }
    }
}

/// Occupation chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occupation {
    Student,
    Salaried,
    SelfEmployed,
    #[serde(rename = "un-employed")]
    Unemployed,
}

impl Occupation {
    pub const ALL: [Occupation; 4] = [
        Occupation::Student,
        Occupation::Salaried,
        Occupation::SelfEmployed,
        Occupation::Unemployed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Student => "student",
            Occupation::Salaried => "salaried",
            Occupation::SelfEmployed => "self-employed",
            Occupation::Unemployed => "un-employed",
        }
    }

    /// Card label: capitalised, first hyphen becomes a space ("Self employed").
    pub fn label(&self) -> String {
        let raw = self.as_str().replacen('-', " ", 1);
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// "Do you have?" chip. Unrecognised tags are kept so the set stays faithful
/// to what was clicked, but they never render an identifier line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attribute {
    MobileNumber,
    AadharNumber,
    PanNumber,
    BankAccount,
    DematAccount,
    Passport,
    Instagram,
    Facebook,
    Whatsapp,
    Gmail,
    Telegram,
    #[serde(untagged)]
    Other(String),
}

impl Attribute {
    pub const KNOWN: [Attribute; 11] = [
        Attribute::MobileNumber,
        Attribute::AadharNumber,
        Attribute::PanNumber,
        Attribute::BankAccount,
        Attribute::DematAccount,
        Attribute::Passport,
        Attribute::Instagram,
        Attribute::Facebook,
        Attribute::Whatsapp,
        Attribute::Gmail,
        Attribute::Telegram,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Attribute::MobileNumber => "mobile-number",
            Attribute::AadharNumber => "aadhar-number",
            Attribute::PanNumber => "pan-number",
            Attribute::BankAccount => "bank-account",
            Attribute::DematAccount => "demat-account",
            Attribute::Passport => "passport",
            Attribute::Instagram => "instagram",
            Attribute::Facebook => "facebook",
            Attribute::Whatsapp => "whatsapp",
            Attribute::Gmail => "gmail",
            Attribute::Telegram => "telegram",
            Attribute::Other(tag) => tag,
        }
    }
}

impl From<&str> for Attribute {
    fn from(tag: &str) -> Self {
        Attribute::KNOWN
            .iter()
            .find(|known| known.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| Attribute::Other(tag.to_string()))
    }
}

macro_rules! parse_by_name {
    ($ty:ty, $group:literal) => {
        impl FromStr for $ty {
            type Err = StoryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| StoryError::UnknownChip {
                        group: $group.to_string(),
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

parse_by_name!(AgeBucket, "age");
parse_by_name!(Sex, "sex");
parse_by_name!(Occupation, "occupation");

/// A value for one of the three single-select groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "group", content = "value", rename_all = "lowercase")]
pub enum SingleChoice {
    Age(AgeBucket),
    Sex(Sex),
    Occupation(Occupation),
}

/// Any chip on the questionnaire, parsed from the page's data attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chip {
    Single(SingleChoice),
    Have(Attribute),
}

impl Chip {
    pub fn parse(group: &str, value: &str) -> Result<Chip, StoryError> {
        let chip = match group {
            "age" => Chip::Single(SingleChoice::Age(value.parse()?)),
            "sex" => Chip::Single(SingleChoice::Sex(value.parse()?)),
            "occupation" => Chip::Single(SingleChoice::Occupation(value.parse()?)),
            "have" => Chip::Have(Attribute::from(value)),
            other => return Err(StoryError::UnknownGroup(other.to_string())),
        };
        Ok(chip)
    }
}

/// Keyboard activation for chips: Enter and Space act as a click.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Scammer archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tactic {
    Authority,
    Distress,
    Affinity,
    Hijack,
}

impl Tactic {
    pub const ALL: [Tactic; 4] = [
        Tactic::Authority,
        Tactic::Distress,
        Tactic::Affinity,
        Tactic::Hijack,
    ];
}

/// Marital status on the victim card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Unmarried,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Unmarried => "Unmarried",
        }
    }
}

/// Story configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(default)]
    pub avatars: AvatarSettings,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed RNG seed. When absent the bridge seeds from `Math.random()`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StoryConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter, StoryError> {
        self.log_level
            .parse()
            .map_err(|_| StoryError::InvalidConfig(format!("unknown log level `{}`", self.log_level)))
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        StoryConfig {
            avatars: AvatarSettings::default(),
            log_level: default_log_level(),
            seed: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Avatar image paths by sex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarSettings {
    #[serde(default = "default_male_avatar")]
    pub male: String,
    #[serde(default = "default_female_avatar")]
    pub female: String,
    /// No dedicated asset ships for non-binary; falls back to `male` when unset.
    #[serde(default)]
    pub non_binary: Option<String>,
}

impl AvatarSettings {
    pub fn for_sex(&self, sex: Sex) -> &str {
        match sex {
            Sex::Female => &self.female,
            Sex::NonBinary => self.non_binary.as_deref().unwrap_or(&self.male),
            Sex::Male => &self.male,
        }
    }
}

impl Default for AvatarSettings {
    fn default() -> Self {
        AvatarSettings {
            male: default_male_avatar(),
            female: default_female_avatar(),
            non_binary: None,
        }
    }
}

fn default_male_avatar() -> String {
    "assets/man-red-hair.png".to_string()
}

fn default_female_avatar() -> String {
    "assets/woman-red-hair.png".to_string()
}
