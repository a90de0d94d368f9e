//! Step-by-step generation session
//!
//! A [`GenerationSession`] is the ephemeral, in-memory state of one
//! wizard run: the form inputs, the fetched heading set, and one
//! section entry per H2 heading. It is owned exclusively by the
//! [`Orchestrator`] for the duration of the flow and discarded when
//! the user starts over; saving copies the assembled result into a new
//! article record, after which session and record are independent.

use crate::generate::SeoContent;
use crate::store::Tone;
use serde::{Deserialize, Serialize};

pub mod flight;
pub mod orchestrator;

pub use flight::{FlightSlot, FlightToken};
pub use orchestrator::{Orchestrator, SessionForm};

/// Coarse progress marker for the wizard
///
/// Advances setup → headings → content under normal flow; moves
/// backward only through explicit user navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Headings,
    Content,
}

/// Status of one section's generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Pending,
    Generating,
    Generated,
    Failed,
}

/// Content generated for one H2 heading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Copied from the heading set at initialization; never edited
    pub heading: String,
    /// Empty until generated
    pub content: String,
    /// 0 until generated
    pub word_count: u32,
    pub status: SectionStatus,
    /// Present only when status is Failed
    pub error_message: Option<String>,
}

impl Section {
    fn pending(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            content: String::new(),
            word_count: 0,
            status: SectionStatus::Pending,
            error_message: None,
        }
    }
}

/// In-memory state of one generation flow
///
/// Invariant: `sections[i]` mirrors `headings.h2_headings[i]` by
/// index; sections are never reordered or inserted after
/// initialization.
#[derive(Debug, Clone)]
pub struct GenerationSession {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    /// Immutable once fetched
    pub headings: Option<SeoContent>,
    pub sections: Vec<Section>,
    pub phase: Phase,
    /// Session-level error message (headings failure, bulk failure)
    pub error: Option<String>,
}

impl GenerationSession {
    /// Fresh session in the setup phase
    pub fn new() -> Self {
        Self {
            topic: String::new(),
            keywords: Vec::new(),
            tone: Tone::default(),
            headings: None,
            sections: Vec::new(),
            phase: Phase::Setup,
            error: None,
        }
    }

    /// Initialize the section list from a fetched heading set
    ///
    /// All entries start pending with empty content.
    pub(crate) fn init_sections(&mut self, headings: &SeoContent) {
        self.sections = headings
            .h2_headings
            .iter()
            .map(|h| Section::pending(h))
            .collect();
    }

    /// Assemble the article markdown from the current state
    ///
    /// A pure view over the session, recomputed on every call: the H1
    /// plus one `##` block per section with generated status, in
    /// original index order. Sections that are not yet generated are
    /// omitted entirely rather than rendered as empty placeholders.
    pub fn assemble_article(&self) -> String {
        let Some(headings) = &self.headings else {
            return String::new();
        };

        let mut parts = vec![format!("# {}", headings.h1_heading)];
        parts.extend(
            self.sections
                .iter()
                .filter(|s| s.status == SectionStatus::Generated)
                .map(render_section_block),
        );
        parts.join("\n\n")
    }

    /// Sum of word counts across generated sections
    pub fn total_word_count(&self) -> u32 {
        self.sections
            .iter()
            .filter(|s| s.status == SectionStatus::Generated)
            .map(|s| s.word_count)
            .sum()
    }

    /// Number of sections in generated status
    pub fn generated_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.status == SectionStatus::Generated)
            .count()
    }

    /// True when every section has been generated
    pub fn is_complete(&self) -> bool {
        !self.sections.is_empty() && self.generated_count() == self.sections.len()
    }
}

impl Default for GenerationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Render one section as a `##` markdown block
///
/// Shared by article assembly and the `previous_content` continuity
/// context sent to the backend.
pub(crate) fn render_section_block(section: &Section) -> String {
    format!("## {}\n\n{}", section.heading, section.content)
}
