//! Closed enums for registration, roster, and scoring.
//!
//! Enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! except [`ProjectField`], which serializes to the Arabic competition label the
//! API stores and accepts its `snake_case` key as an alias.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Gender of a registrant or of a whole team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Map a `sex` value reported by the membership service.
    ///
    /// Accepts English words, single letters, and the Arabic terms, in any
    /// case. Returns `None` for anything else.
    #[must_use]
    pub fn from_membership_sex(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" | "m" | "ذكر" => Some(Self::Male),
            "female" | "f" | "أنثى" | "انثى" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RegistrationType
// ---------------------------------------------------------------------------

/// How a participant entered the competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    TeamWithIdea,
    IndividualWithIdea,
    IndividualNoIdea,
    TeamNoIdea,
}

impl RegistrationType {
    #[must_use]
    pub const fn is_team(self) -> bool {
        matches!(self, Self::TeamWithIdea | Self::TeamNoIdea)
    }

    #[must_use]
    pub const fn is_individual(self) -> bool {
        !self.is_team()
    }

    /// Whether the registration must carry a project idea.
    #[must_use]
    pub const fn requires_idea(self) -> bool {
        matches!(self, Self::TeamWithIdea | Self::IndividualWithIdea)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TeamWithIdea => "team_with_idea",
            Self::IndividualWithIdea => "individual_with_idea",
            Self::IndividualNoIdea => "individual_no_idea",
            Self::TeamNoIdea => "team_no_idea",
        }
    }
}

impl fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectField
// ---------------------------------------------------------------------------

/// Competition track a team or project competes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProjectField {
    #[serde(rename = "مسابقة التنقل الذكي", alias = "smart_mobility")]
    SmartMobility,
    #[serde(rename = "مسابقة ابتكار التكنولوجيا الحيوية", alias = "biotechnology")]
    Biotechnology,
    #[serde(rename = "مسابقة تقنيات البيئة والطاقة", alias = "environment_energy")]
    EnvironmentEnergy,
    #[serde(rename = "مسابقة تقنيات التعليم", alias = "education_tech")]
    EducationTech,
    #[serde(rename = "مسابقة تقنيات المعيشة الخالية من العوائق", alias = "barrier_free_living")]
    BarrierFreeLiving,
    #[serde(rename = "مسابقة أفكار التكنولوجيا المالية", alias = "fintech")]
    Fintech,
    #[serde(rename = "مسابقة التكنولوجيا لصالح البشرية", alias = "tech_for_humanity")]
    TechForHumanity,
    #[serde(rename = "مسابقة تطبيقات التكنولوجيا في علم النفس", alias = "psychology_tech")]
    PsychologyTech,
    #[serde(rename = "مسابقة الذكاء الاصطناعي في الصحة", alias = "ai_healthcare")]
    AiHealthcare,
    #[serde(rename = "مسابقة التقنيات الصناعية", alias = "industrial_digital")]
    IndustrialDigital,
    #[serde(rename = "مسابقة التكنولوجيا الزراعية", alias = "agricultural_tech")]
    AgriculturalTech,
    #[serde(rename = "مسابقة هاكاثون السفر", alias = "travel_hackathon")]
    TravelHackathon,
    #[serde(rename = "مسابقة تقنيات السياحة", alias = "tourism_tech")]
    TourismTech,
    #[serde(rename = "مسابقة معالجة اللغة التركية", alias = "turkish_nlp")]
    TurkishNlp,
    #[serde(rename = "مسابقة الذكاء الاصطناعي في النقل", alias = "ai_transportation")]
    AiTransportation,
    #[serde(rename = "مسابقة تطبيقات نماذج اللغة الضخمة", alias = "llm_applications")]
    LlmApplications,
    #[serde(rename = "مسابقة تقنيات أنظمة الدفاع الجويّة", alias = "air_defense")]
    AirDefense,
}

impl ProjectField {
    /// Every competition track, in the order the registration form lists them.
    pub const ALL: [Self; 17] = [
        Self::SmartMobility,
        Self::Biotechnology,
        Self::EnvironmentEnergy,
        Self::EducationTech,
        Self::BarrierFreeLiving,
        Self::Fintech,
        Self::TechForHumanity,
        Self::PsychologyTech,
        Self::AiHealthcare,
        Self::IndustrialDigital,
        Self::AgriculturalTech,
        Self::TravelHackathon,
        Self::TourismTech,
        Self::TurkishNlp,
        Self::AiTransportation,
        Self::LlmApplications,
        Self::AirDefense,
    ];

    /// The Arabic label used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SmartMobility => "مسابقة التنقل الذكي",
            Self::Biotechnology => "مسابقة ابتكار التكنولوجيا الحيوية",
            Self::EnvironmentEnergy => "مسابقة تقنيات البيئة والطاقة",
            Self::EducationTech => "مسابقة تقنيات التعليم",
            Self::BarrierFreeLiving => "مسابقة تقنيات المعيشة الخالية من العوائق",
            Self::Fintech => "مسابقة أفكار التكنولوجيا المالية",
            Self::TechForHumanity => "مسابقة التكنولوجيا لصالح البشرية",
            Self::PsychologyTech => "مسابقة تطبيقات التكنولوجيا في علم النفس",
            Self::AiHealthcare => "مسابقة الذكاء الاصطناعي في الصحة",
            Self::IndustrialDigital => "مسابقة التقنيات الصناعية",
            Self::AgriculturalTech => "مسابقة التكنولوجيا الزراعية",
            Self::TravelHackathon => "مسابقة هاكاثون السفر",
            Self::TourismTech => "مسابقة تقنيات السياحة",
            Self::TurkishNlp => "مسابقة معالجة اللغة التركية",
            Self::AiTransportation => "مسابقة الذكاء الاصطناعي في النقل",
            Self::LlmApplications => "مسابقة تطبيقات نماذج اللغة الضخمة",
            Self::AirDefense => "مسابقة تقنيات أنظمة الدفاع الجويّة",
        }
    }

    /// ASCII key accepted on the command line and as a serde alias.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SmartMobility => "smart_mobility",
            Self::Biotechnology => "biotechnology",
            Self::EnvironmentEnergy => "environment_energy",
            Self::EducationTech => "education_tech",
            Self::BarrierFreeLiving => "barrier_free_living",
            Self::Fintech => "fintech",
            Self::TechForHumanity => "tech_for_humanity",
            Self::PsychologyTech => "psychology_tech",
            Self::AiHealthcare => "ai_healthcare",
            Self::IndustrialDigital => "industrial_digital",
            Self::AgriculturalTech => "agricultural_tech",
            Self::TravelHackathon => "travel_hackathon",
            Self::TourismTech => "tourism_tech",
            Self::TurkishNlp => "turkish_nlp",
            Self::AiTransportation => "ai_transportation",
            Self::LlmApplications => "llm_applications",
            Self::AirDefense => "air_defense",
        }
    }

    #[must_use]
    pub const fn label_en(self) -> &'static str {
        match self {
            Self::SmartMobility => "Smart Mobility Competition",
            Self::Biotechnology => "Biotechnology Innovation Competition",
            Self::EnvironmentEnergy => "Environment and Energy Technologies Competition",
            Self::EducationTech => "Education Technologies Competition",
            Self::BarrierFreeLiving => "Barrier-Free Living Technologies Competition",
            Self::Fintech => "Financial Technologies (FinTech) Ideas Competition",
            Self::TechForHumanity => "Technology for Humanity Competition",
            Self::PsychologyTech => "Technological Applications in Psychology Competition",
            Self::AiHealthcare => "Artificial Intelligence in Healthcare Competition",
            Self::IndustrialDigital => "Industrial Digital Technologies Competition",
            Self::AgriculturalTech => "Agricultural Technologies Competition",
            Self::TravelHackathon => "Travel Hackathon Competition",
            Self::TourismTech => "Tourism Technologies Competition",
            Self::TurkishNlp => "Turkish Natural Language Processing Competition",
            Self::AiTransportation => "Artificial Intelligence in Transportation Competition",
            Self::LlmApplications => "Large Language Model Applications - T3 AI Hackathon",
            Self::AirDefense => "Air Defense Systems Technologies Competition",
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectField {
    type Err = String;

    /// Parse either the ASCII key (hyphens allowed) or the Arabic label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized || field.as_str() == s.trim())
            .ok_or_else(|| format!("unknown competition field '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// FieldSource
// ---------------------------------------------------------------------------

/// Where a member's identity fields came from.
///
/// `Verified` fields were resolved through the membership service and are
/// read-only; `Manual` fields were typed by the registrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    #[default]
    Manual,
    Verified,
}

impl FieldSource {
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Verified)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ScoreStatus
// ---------------------------------------------------------------------------

/// Which sides of a project's score are present.
///
/// Only `Complete` projects carry a total and take part in the
/// complete-only leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Complete,
    AdminOnly,
    AiOnly,
    Unscored,
}

impl ScoreStatus {
    #[must_use]
    pub const fn from_presence(has_admin: bool, has_ai: bool) -> Self {
        match (has_admin, has_ai) {
            (true, true) => Self::Complete,
            (true, false) => Self::AdminOnly,
            (false, true) => Self::AiOnly,
            (false, false) => Self::Unscored,
        }
    }

    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::AdminOnly => "admin_only",
            Self::AiOnly => "ai_only",
            Self::Unscored => "unscored",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
