// Scammer persona generator.
// Tactic choice reads the bucket midpoint so it stays stable for a selection; names and
// details are uniform draws from the tactic's pools.

use rand::Rng;
use serde::Serialize;

use crate::persona::{pick, DEFAULT_AGE, DEFAULT_OCCUPATION};
use crate::selection::SelectionState;
use crate::types::*;

/// Name pool and detail pools for one tactic.
struct TacticProfile {
    names: &'static [&'static str],
    age_sex: &'static str,
    roles: &'static [&'static str],
    organizations: &'static [&'static str],
}

const AUTHORITY: TacticProfile = TacticProfile {
    names: &[
        "Inspector Shinde saheb",
        "Deputy Commissioner Mehta",
        "Officer Kulkarni",
        "Inspector Yadav",
        "Superintendent Patil",
    ],
    age_sex: "43 M",
    roles: &["Narcotics Branch", "Cyber Cell", "Economic Offences Wing", "Crime Branch"],
    organizations: &["City Police", "State Police", "Central Bureau"],
};

const DISTRESS: TacticProfile = TacticProfile {
    names: &["Dr. Raghav Sharma", "Advocate Patel", "Cousin Ravi", "Sister Meera", "Aunt Sunita"],
    age_sex: "38 M",
    roles: &["Emergency Ward", "Accident Victim", "Stranded Traveller", "Hospital Critical Care"],
    organizations: &["City Hospital", "Apollo Hospital", "Max Hospital", "Relief Camp"],
};

const AFFINITY: TacticProfile = TacticProfile {
    names: &["Nisha Kapoor", "Raj Malhotra", "Aryan Investments", "TradeGuru Ankit", "Angel Priya"],
    age_sex: "32 M",
    roles: &[
        "Certified Financial Advisor",
        "Investment Strategist",
        "Relationship Counselor",
        "Freelance Recruiter",
    ],
    organizations: &["WealthMax Corp", "TrustFund Group", "GoldenTree Capital", "ConnectPro Solutions"],
};

const HIJACK: TacticProfile = TacticProfile {
    names: &[
        "Your Manager \u{2013} Suresh",
        "CEO \u{2013} Rajesh Gupta",
        "Friend \u{2013} Amit",
        "Brother \u{2013} Sanjay",
        "HR \u{2013} Neha",
    ],
    age_sex: "45 M",
    roles: &["Urgent Request", "Emergency Transfer", "OTP Verification Needed", "Account Locked Alert"],
    organizations: &["Your Company", "Head Office", "Personal Contact", "Known Network"],
};

impl Tactic {
    fn profile(&self) -> &'static TacticProfile {
        match self {
            Tactic::Authority => &AUTHORITY,
            Tactic::Distress => &DISTRESS,
            Tactic::Affinity => &AFFINITY,
            Tactic::Hijack => &HIJACK,
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.profile().names
    }
}

/// A generated scammer matched to the victim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScammerPersona {
    pub tactic: Tactic,
    pub name: String,
    pub age_sex: String,
    pub role: String,
    pub organization: String,
    /// Always the victim's city.
    pub city: String,
}

impl ScammerPersona {
    pub fn detail_lines(&self) -> Vec<String> {
        vec![
            self.age_sex.clone(),
            self.role.clone(),
            self.organization.clone(),
            self.city.clone(),
        ]
    }
}

/// First matching rule wins; see DESIGN.md for the table.
pub fn pick_scam_tactic<R: Rng + ?Sized>(selection: &SelectionState, rng: &mut R) -> Tactic {
    let occupation = selection.occupation.unwrap_or(DEFAULT_OCCUPATION);
    let age = selection.age.unwrap_or(DEFAULT_AGE).midpoint();

    let candidates: &[Tactic] = match occupation {
        Occupation::Salaried if age >= 35.0 => return Tactic::Authority,
        Occupation::Salaried => &[Tactic::Authority, Tactic::Hijack],
        Occupation::Unemployed => &[Tactic::Affinity, Tactic::Distress],
        Occupation::SelfEmployed => &[Tactic::Affinity, Tactic::Authority],
        Occupation::Student if age < 22.0 => &[Tactic::Affinity, Tactic::Distress],
        _ if age >= 55.0 => &[Tactic::Authority, Tactic::Hijack],
        _ => &Tactic::ALL,
    };
    candidates[rng.gen_range(0..candidates.len())]
}

pub fn generate_scammer<R: Rng + ?Sized>(
    selection: &SelectionState,
    victim_city: &str,
    rng: &mut R,
) -> ScammerPersona {
    let tactic = pick_scam_tactic(selection, rng);
    let profile = tactic.profile();

    ScammerPersona {
        tactic,
        name: pick(rng, profile.names).to_string(),
        age_sex: profile.age_sex.to_string(),
        role: pick(rng, profile.roles).to_string(),
        organization: pick(rng, profile.organizations).to_string(),
        city: victim_city.to_string(),
    }
}
