//! Agent persona: who the agent plays (role) and how it talks (style).
//!
//! Both are plain enumerations with an explicit instruction table. Any
//! label that is not recognized maps to the fallback entry
//! ([`Role::Generalist`], [`Style::Plain`]) instead of failing the request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role the agent adopts for the whole conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Auditor,
    Developer,
    BusinessManager,
    Researcher,
    /// Fallback for unrecognized role labels.
    #[serde(other)]
    Generalist,
}

impl Role {
    /// Parses a caller-supplied label. Never fails; unknown labels become
    /// [`Role::Generalist`].
    pub fn parse_lenient(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "auditor" => Role::Auditor,
            "developer" | "desarrollador" => Role::Developer,
            "businessmanager" | "business" | "gestordenegocios" => Role::BusinessManager,
            "researcher" | "investigador" => Role::Researcher,
            _ => Role::Generalist,
        }
    }

    /// Instruction text for this role.
    pub fn instruction(&self) -> &'static str {
        match self {
            Role::Auditor => ROLE_AUDITOR,
            Role::Developer => ROLE_DEVELOPER,
            Role::BusinessManager => ROLE_BUSINESS_MANAGER,
            Role::Researcher => ROLE_RESEARCHER,
            Role::Generalist => ROLE_FALLBACK,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Auditor => "Auditor",
            Role::Developer => "Developer",
            Role::BusinessManager => "Business Manager",
            Role::Researcher => "Researcher",
            Role::Generalist => "Generalist",
        };
        write!(f, "{}", s)
    }
}

/// Register the agent writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Formal,
    Conversational,
    Technical,
    /// Fallback for unrecognized style labels; adds no modifier.
    #[serde(other)]
    Plain,
}

impl Style {
    /// Parses a caller-supplied label. Never fails; unknown labels become
    /// [`Style::Plain`].
    pub fn parse_lenient(label: &str) -> Self {
        match normalize_label(label).as_str() {
            "formal" => Style::Formal,
            "conversational" | "conversacional" => Style::Conversational,
            "technical" | "tecnico" => Style::Technical,
            _ => Style::Plain,
        }
    }

    /// Modifier text appended after the role instruction.
    pub fn modifier(&self) -> &'static str {
        match self {
            Style::Formal => STYLE_FORMAL,
            Style::Conversational => STYLE_CONVERSATIONAL,
            Style::Technical => STYLE_TECHNICAL,
            Style::Plain => "",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Style::Formal => "Formal",
            Style::Conversational => "Conversational",
            Style::Technical => "Technical",
            Style::Plain => "Plain",
        };
        write!(f, "{}", s)
    }
}

/// Combined persona instructions: role line, then style line.
pub fn persona_instructions(role: Role, style: Style) -> String {
    format!("{}\n{}", role.instruction(), style.modifier())
}

/// Lowercases, strips accents used by the Spanish labels, and drops
/// spaces/underscores/dashes so "Business Manager", "business_manager"
/// and "BusinessManager" all compare equal.
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect()
}

// ============================================================================
// Instruction tables
// ============================================================================

const ROLE_AUDITOR: &str = "You act as a business auditor who specializes in finding operational bottlenecks and proposing AI-driven automation.";
const ROLE_DEVELOPER: &str = "You are a senior developer with experience in modern architectures, microservices and applied AI.";
const ROLE_BUSINESS_MANAGER: &str = "You are a business strategist looking for efficiency and scalability opportunities.";
const ROLE_RESEARCHER: &str = "Your mission is to gather key facts and propose strategies grounded in real data.";
const ROLE_FALLBACK: &str = "You are an AI assistant with deep expertise in how companies operate.";

const STYLE_FORMAL: &str = "Use professional, direct language.";
const STYLE_CONVERSATIONAL: &str = "Speak naturally, like an expert colleague.";
const STYLE_TECHNICAL: &str = "Include technical terms and structured explanations.";
