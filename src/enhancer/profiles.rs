//! User roles and optimization levels

use serde::{Deserialize, Serialize};

use super::templates;

/// Audience profile a prompt is tailored for.
///
/// Wire values are snake_case (`content_creator`); unknown values are
/// rejected at deserialization time so the API can answer 400 instead of
/// silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Software developer: precise technical language, runnable code
    Developer,
    /// Designer: audience, platform, and visual tone
    Designer,
    /// Marketer: segment, channel, call to action
    Marketer,
    /// Content creator: format, length, voice
    ContentCreator,
    /// Analyst: data sources, metrics, methodology
    Analyst,
    /// No particular profile (default)
    #[default]
    General,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        UserRole::Developer,
        UserRole::Designer,
        UserRole::Marketer,
        UserRole::ContentCreator,
        UserRole::Analyst,
        UserRole::General,
    ];

    /// Wire value, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Designer => "designer",
            Self::Marketer => "marketer",
            Self::ContentCreator => "content_creator",
            Self::Analyst => "analyst",
            Self::General => "general",
        }
    }

    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Marketer => "Marketer",
            Self::ContentCreator => "Content Creator",
            Self::Analyst => "Analyst",
            Self::General => "General",
        }
    }

    /// Guidance block injected into the enhanced prompt for this role
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::Developer => templates::DEVELOPER_GUIDANCE,
            Self::Designer => templates::DESIGNER_GUIDANCE,
            Self::Marketer => templates::MARKETER_GUIDANCE,
            Self::ContentCreator => templates::CONTENT_CREATOR_GUIDANCE,
            Self::Analyst => templates::ANALYST_GUIDANCE,
            Self::General => templates::GENERAL_GUIDANCE,
        }
    }

    /// Parse a wire value, rejecting anything unknown
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim().to_lowercase())
    }
}

/// How far the enhancement is allowed to expand the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationLevel {
    /// Minimal additions, stays close to the original
    Conservative,
    /// Moderate expansion with structure and clarity guidance (default)
    #[default]
    Balanced,
    /// Full expansion with success criteria, edge cases, and examples
    Aggressive,
}

impl std::fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 3] = [
        OptimizationLevel::Conservative,
        OptimizationLevel::Balanced,
        OptimizationLevel::Aggressive,
    ];

    /// Wire value, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }

    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conservative => "Conservative",
            Self::Balanced => "Balanced",
            Self::Aggressive => "Aggressive",
        }
    }

    /// Typical expansion range shown next to the level in the UI
    pub fn expansion_hint(&self) -> &'static str {
        match self {
            Self::Conservative => "100-150% expansion",
            Self::Balanced => "150-250% expansion",
            Self::Aggressive => "200-400% expansion",
        }
    }

    /// Number of quality-requirement sections appended at this level.
    /// Strictly increasing so a higher level always produces a longer prompt.
    pub fn section_count(&self) -> usize {
        match self {
            Self::Conservative => 2,
            Self::Balanced => 4,
            Self::Aggressive => 6,
        }
    }

    /// Parse a wire value, rejecting anything unknown
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s.trim().to_lowercase())
    }
}
