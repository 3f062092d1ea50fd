//! Pulls named sections out of free-form model replies.
//!
//! Models answer with loosely formatted headers ("GEOGRAPHY:", "## Culture",
//! "Rules and Limitations"), so matching is keyword based and case
//! insensitive. A section runs from its keyword to the next blank line that
//! is followed by a letter, or to the end of the reply.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Body of the first section introduced by any of `keywords`, tried in order.
pub fn extract_section(text: &str, keywords: &[&str]) -> Option<String> {
    keywords.iter().find_map(|keyword| section_after(text, keyword))
}

/// Rest of the line following the first of `keywords` that matches.
pub fn extract_field(text: &str, keywords: &[&str]) -> Option<String> {
    keywords.iter().find_map(|keyword| {
        let pattern = format!(r"(?i){}[:\s]+([^\n]+)", regex_lite::escape(keyword));
        let regex = Regex::new(&pattern).ok()?;
        let value = regex.captures(text)?.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn section_after(text: &str, keyword: &str) -> Option<String> {
    let start_pattern = format!(r"(?i){}[:\s]+", regex_lite::escape(keyword));
    let start = Regex::new(&start_pattern).ok()?.find(text)?.end();
    let body = &text[start..];

    let end = Regex::new(r"\n\n[A-Za-z]")
        .ok()
        .and_then(|boundary| boundary.find(body))
        .map_or(body.len(), |m| m.start());

    let section = body[..end].trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// Entities suggested by a synopsis analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSuggestions {
    pub characters: Option<String>,
    pub locations: Option<String>,
    pub power_systems: Option<String>,
    pub lore: Option<String>,
    pub arcs: Option<String>,
}

impl StructureSuggestions {
    pub fn parse(text: &str) -> Self {
        Self {
            characters: extract_section(text, &["CHARACTERS"]),
            locations: extract_section(text, &["LOCATIONS"]),
            power_systems: extract_section(text, &["POWER"]),
            lore: extract_section(text, &["LORE"]),
            arcs: extract_section(text, &["ARCS"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDetails {
    pub geography: Option<String>,
    pub culture: Option<String>,
    pub history: Option<String>,
    pub economy: Option<String>,
    pub politics: Option<String>,
    pub notable_locations: Option<String>,
}

impl LocationDetails {
    pub fn parse(text: &str) -> Self {
        Self {
            geography: extract_section(text, &["GEOGRAPHY"]),
            culture: extract_section(text, &["CULTURE"]),
            history: extract_section(text, &["HISTORY"]),
            economy: extract_section(text, &["ECONOMY"]),
            politics: extract_section(text, &["POLITICS"]),
            notable_locations: extract_section(text, &["NOTABLE"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSystemDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rules: Option<String>,
    pub limitations: Option<String>,
    pub acquisition: Option<String>,
    pub examples: Option<String>,
}

impl PowerSystemDetails {
    pub fn parse(text: &str) -> Self {
        Self {
            name: extract_field(text, &["name", "System Name"]),
            description: extract_section(text, &["CONCEPT", "DESCRIPTION"]),
            rules: extract_section(text, &["RULES", "MECHANICS"]),
            limitations: extract_section(text, &["LIMITATIONS", "WEAKNESSES"]),
            acquisition: extract_section(text, &["ACQUISITION", "LEARN"]),
            examples: extract_section(text, &["EXAMPLES", "ABILITIES"]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterExpansion {
    pub personality: Option<String>,
    pub background: Option<String>,
    pub motivations: Option<String>,
    pub relationships: Option<String>,
    pub voice: Option<String>,
    pub development: Option<String>,
}

impl CharacterExpansion {
    pub fn parse(text: &str) -> Self {
        Self {
            personality: extract_section(text, &["PERSONALITY"]),
            background: extract_section(text, &["BACKGROUND"]),
            motivations: extract_section(text, &["MOTIVATIONS"]),
            relationships: extract_section(text, &["RELATIONSHIPS"]),
            voice: extract_section(text, &["VOICE", "SPEECH"]),
            development: extract_section(text, &["DEVELOPMENT", "GROWTH"]),
        }
    }
}
