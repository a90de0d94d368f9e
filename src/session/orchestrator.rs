//! Generation workflow controller
//!
//! Drives one [`GenerationSession`] through the wizard: headings
//! first, then content per section, then save. Failures are recorded
//! per section rather than globally, except during heading generation,
//! where the session stays in setup with a session-level error.
//!
//! Single-flight discipline, enforced through [`FlightSlot`]:
//! at most one section generation is in flight at a time across the
//! whole session, at most one bulk run, and at most one save.
//! Concurrent requests are rejected with `Busy`, never queued.

use crate::error::{Result, SeoForgeError};
use crate::generate::{GenerationClient, HeadingsRequest, SectionRequest};
use crate::session::{
    render_section_block, FlightSlot, GenerationSession, Phase, SectionStatus,
};
use crate::store::{ArticleStore, NewArticle, Tone};
use std::time::Duration;

/// Form inputs for starting a generation flow
#[derive(Debug, Clone)]
pub struct SessionForm {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
}

/// Step-by-step generation orchestrator
///
/// Owns the session exclusively for the duration of one flow.
pub struct Orchestrator<C: GenerationClient> {
    client: C,
    session: GenerationSession,
    section_flight: FlightSlot,
    bulk_flight: FlightSlot,
    save_flight: FlightSlot,
    /// Pause between consecutive sections in a bulk run; a pacing
    /// throttle against the remote API, not a correctness requirement
    pacing: Duration,
}

impl<C: GenerationClient> Orchestrator<C> {
    /// Create an orchestrator with a fresh session
    pub fn new(client: C, pacing: Duration) -> Self {
        Self {
            client,
            session: GenerationSession::new(),
            section_flight: FlightSlot::new("section generation"),
            bulk_flight: FlightSlot::new("bulk generation"),
            save_flight: FlightSlot::new("save"),
            pacing,
        }
    }

    /// Read access to the session state
    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    /// Generate the heading set and initialize sections
    ///
    /// On success the session advances to the headings phase with every
    /// section pending. On failure the session stays in setup with a
    /// session-level error and no partial state.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty topic (rejected before any network
    /// call); `Generation` when the backend call fails.
    pub async fn generate_headings(&mut self, form: SessionForm) -> Result<()> {
        let topic = form.topic.trim().to_string();
        if topic.is_empty() {
            return Err(SeoForgeError::Validation("topic is required".into()).into());
        }

        let request = HeadingsRequest {
            topic: topic.clone(),
            keywords: form.keywords.clone(),
            tone: form.tone,
        };

        match self.client.generate_headings(request).await {
            Ok(response) => {
                self.session.topic = topic;
                self.session.keywords = form.keywords;
                self.session.tone = form.tone;
                self.session.init_sections(&response.seo_content);
                self.session.headings = Some(response.seo_content);
                self.session.phase = Phase::Headings;
                self.session.error = None;
                tracing::info!(
                    "Heading generation produced {} sections",
                    self.session.sections.len()
                );
                Ok(())
            }
            Err(err) => {
                self.session.error = Some(err.to_string());
                tracing::warn!("Heading generation failed: {}", err);
                Err(err)
            }
        }
    }

    /// Generate content for one section
    ///
    /// Retryable: invoking it again on a failed index overwrites the
    /// prior content and error.
    ///
    /// # Errors
    ///
    /// `Busy` when a section generation is already in flight;
    /// `Validation` for an out-of-range index or a session without
    /// headings; `Generation` when the backend call fails (the section
    /// is then marked failed and the session error set).
    pub async fn generate_section(&mut self, index: usize) -> Result<()> {
        let token = self.section_flight.try_acquire()?;
        let result = self.generate_section_inner(index).await;
        self.section_flight.finish(token);
        result
    }

    async fn generate_section_inner(&mut self, index: usize) -> Result<()> {
        let headings = self
            .session
            .headings
            .clone()
            .ok_or_else(|| SeoForgeError::Validation("headings not generated yet".into()))?;
        if index >= self.session.sections.len() {
            return Err(SeoForgeError::Validation(format!(
                "section index {index} out of range"
            ))
            .into());
        }

        self.session.sections[index].status = SectionStatus::Generating;
        self.session.sections[index].error_message = None;

        let request = SectionRequest {
            topic: self.session.topic.clone(),
            keywords: self.session.keywords.clone(),
            tone: self.session.tone,
            h2_heading: self.session.sections[index].heading.clone(),
            previous_content: self.previous_content(index),
            seo_content: headings,
        };

        match self.client.generate_section(request).await {
            Ok(response) => {
                let section = &mut self.session.sections[index];
                section.content = response.generated_content;
                section.word_count = response.word_count;
                section.status = SectionStatus::Generated;
                section.error_message = None;
                tracing::info!(
                    "Generated section {} ({} words)",
                    index,
                    self.session.sections[index].word_count
                );
                Ok(())
            }
            Err(err) => {
                let section = &mut self.session.sections[index];
                section.status = SectionStatus::Failed;
                section.error_message = Some(err.to_string());
                self.session.error = Some(err.to_string());
                tracing::warn!("Section {} generation failed: {}", index, err);
                Err(err)
            }
        }
    }

    /// Continuity context: all earlier generated sections, in index
    /// order, rendered as markdown blocks joined by a blank line
    fn previous_content(&self, index: usize) -> String {
        self.session.sections[..index]
            .iter()
            .filter(|s| s.status == SectionStatus::Generated)
            .map(render_section_block)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Generate every remaining section, strictly in index order
    ///
    /// Sections already generated are skipped, which makes re-running
    /// after a partial completion idempotent. Between items the
    /// configured pacing pause is observed. The first failure aborts
    /// the run, leaving completed sections intact; on full success the
    /// session advances to the content phase.
    ///
    /// # Errors
    ///
    /// `Busy` when a bulk run or a section generation is already in
    /// flight; `Generation` when any section fails.
    pub async fn generate_all(&mut self) -> Result<()> {
        let token = self.bulk_flight.try_acquire()?;
        let result = self.generate_all_inner().await;
        self.bulk_flight.finish(token);
        result
    }

    async fn generate_all_inner(&mut self) -> Result<()> {
        let total = self.session.sections.len();
        if total == 0 {
            return Err(SeoForgeError::Validation("headings not generated yet".into()).into());
        }

        for index in 0..total {
            if self.session.sections[index].status == SectionStatus::Generated {
                continue;
            }

            if let Err(err) = self.generate_section(index).await {
                self.session.error =
                    Some("Bulk generation failed; completed sections were kept".to_string());
                tracing::warn!("Bulk generation aborted at section {}: {}", index, err);
                return Err(err);
            }

            if index + 1 < total && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        self.session.phase = Phase::Content;
        self.session.error = None;
        Ok(())
    }

    /// Navigate back from headings review to the setup form
    ///
    /// # Errors
    ///
    /// `Validation` unless the session is in the headings phase.
    pub fn back_to_setup(&mut self) -> Result<()> {
        if self.session.phase != Phase::Headings {
            return Err(
                SeoForgeError::Validation("can only return to setup from headings".into()).into(),
            );
        }
        self.session.phase = Phase::Setup;
        Ok(())
    }

    /// Navigate back from content review to the headings list
    ///
    /// # Errors
    ///
    /// `Validation` unless the session is in the content phase.
    pub fn back_to_headings(&mut self) -> Result<()> {
        if self.session.phase != Phase::Content {
            return Err(
                SeoForgeError::Validation("can only return to headings from content".into()).into(),
            );
        }
        self.session.phase = Phase::Headings;
        Ok(())
    }

    /// Persist the assembled article
    ///
    /// Builds a create payload from the H1 (title), the assembled
    /// markdown, the summed word count, and the heading set's meta
    /// description, then delegates to the persistence adapter. Returns
    /// the slug the article was stored under; the caller is expected
    /// to move on to the edit view for it.
    ///
    /// # Errors
    ///
    /// `Busy` when a save is already in flight; `Validation` when no
    /// headings exist yet; storage errors propagate from the adapter.
    pub async fn save(&mut self, store: &dyn ArticleStore) -> Result<String> {
        let token = self.save_flight.try_acquire()?;
        let result = self.save_inner(store).await;
        self.save_flight.finish(token);
        result
    }

    async fn save_inner(&mut self, store: &dyn ArticleStore) -> Result<String> {
        let headings = self
            .session
            .headings
            .as_ref()
            .ok_or_else(|| SeoForgeError::Validation("nothing to save yet".into()))?;

        let article = NewArticle {
            title: headings.h1_heading.clone(),
            content: self.session.assemble_article(),
            meta_description: headings.meta_description.clone(),
            topic: self.session.topic.clone(),
            keywords: self.session.keywords.clone(),
            tone: self.session.tone,
            word_count: Some(self.session.total_word_count()),
        };

        let slug = store.create(article).await?;
        tracing::info!("Saved article under slug '{}'", slug);
        Ok(slug)
    }
}
