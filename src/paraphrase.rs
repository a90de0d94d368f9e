//! Paraphrase assistant
//!
//! Works on a selected span of an article body: validates the knobs
//! locally, fetches variations from the generation API, and splices a
//! chosen variation back into the text. Requests are guarded by a
//! [`FlightSlot`]: changing the selection while a request is pending
//! invalidates it, so a late response for old text can never be offered
//! against the new selection.

use crate::config::validate_paraphrase_params;
use crate::error::{Result, SeoForgeError};
use crate::generate::{GenerationClient, ParaphraseRequest, ParaphraseResponse};
use crate::session::{FlightSlot, FlightToken};

/// Byte-offset span into an article body
///
/// Offsets must land on character boundaries; [`Selection::extract`]
/// rejects anything else, and whitespace-only spans, before a request
/// is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The selected text
    ///
    /// # Errors
    ///
    /// `Validation` when the span is empty, out of bounds, inverted, or
    /// splits a multi-byte character.
    pub fn extract<'a>(&self, content: &'a str) -> Result<&'a str> {
        if self.start >= self.end {
            return Err(SeoForgeError::Validation("selection is empty".into()).into());
        }
        if self.end > content.len()
            || !content.is_char_boundary(self.start)
            || !content.is_char_boundary(self.end)
        {
            return Err(SeoForgeError::Validation(format!(
                "selection {}..{} does not address valid text",
                self.start, self.end
            ))
            .into());
        }
        let text = &content[self.start..self.end];
        if text.trim().is_empty() {
            return Err(SeoForgeError::Validation("selection is empty".into()).into());
        }
        Ok(text)
    }

    /// Replace the span with new text
    ///
    /// Returns the new buffer and the cursor position just past the
    /// inserted text, so the caller can keep editing from there.
    pub fn replace(&self, content: &str, replacement: &str) -> (String, usize) {
        let mut out = String::with_capacity(content.len() - (self.end - self.start) + replacement.len());
        out.push_str(&content[..self.start]);
        out.push_str(replacement);
        out.push_str(&content[self.end..]);
        (out, self.start + replacement.len())
    }
}

/// Paraphrasing knobs for one request
///
/// Same ranges as the config defaults: adequacy, fluency, and
/// diversity in 0.0..=2.0, max_variations in 1..=10.
#[derive(Debug, Clone, Copy)]
pub struct ParaphraseParams {
    pub adequacy: f64,
    pub fluency: f64,
    pub diversity: f64,
    pub max_variations: u32,
}

impl From<&crate::config::ParaphraseDefaults> for ParaphraseParams {
    fn from(defaults: &crate::config::ParaphraseDefaults) -> Self {
        Self {
            adequacy: defaults.adequacy,
            fluency: defaults.fluency,
            diversity: defaults.diversity,
            max_variations: defaults.max_variations,
        }
    }
}

/// One variation offered to the user
#[derive(Debug, Clone)]
pub struct Variation {
    pub text: String,
    /// Absent when the backend returned fewer scores than variations
    pub confidence: Option<f64>,
}

/// Stateful paraphrase workflow over one article body
pub struct ParaphraseAssistant {
    selection: Option<Selection>,
    params: ParaphraseParams,
    flight: FlightSlot,
    variations: Vec<Variation>,
    error: Option<String>,
}

impl ParaphraseAssistant {
    pub fn new(params: ParaphraseParams) -> Self {
        Self {
            selection: None,
            params,
            flight: FlightSlot::new("paraphrase"),
            variations: Vec::new(),
            error: None,
        }
    }

    /// Replace the paraphrasing knobs for subsequent requests
    ///
    /// # Errors
    ///
    /// `Validation` when a knob is out of range; the previous params
    /// stay in effect.
    pub fn set_params(&mut self, params: ParaphraseParams) -> Result<()> {
        validate_paraphrase_params(
            params.adequacy,
            params.fluency,
            params.diversity,
            params.max_variations,
        )
        .map_err(SeoForgeError::Validation)?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &ParaphraseParams {
        &self.params
    }

    /// Set the active selection
    ///
    /// Supersedes any pending request and discards prior variations:
    /// they described different text.
    ///
    /// # Errors
    ///
    /// `Validation` when the span does not address valid text.
    pub fn select(&mut self, content: &str, selection: Selection) -> Result<()> {
        selection.extract(content)?;
        self.selection = Some(selection);
        self.flight.invalidate_all();
        self.variations.clear();
        self.error = None;
        Ok(())
    }

    /// Drop the selection and everything derived from it
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.flight.invalidate_all();
        self.variations.clear();
        self.error = None;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> bool {
        self.flight.in_flight()
    }

    /// Validate and build the request for the current selection
    ///
    /// The returned token ties the eventual response to this selection;
    /// [`Self::complete_request`] discards responses whose token was
    /// superseded by a selection change.
    ///
    /// # Errors
    ///
    /// `Validation` when nothing is selected or the knobs are out of
    /// range, both rejected before any network traffic; `Busy` while a
    /// request for this selection is already pending.
    pub fn begin_request(&mut self, content: &str) -> Result<(FlightToken, ParaphraseRequest)> {
        let selection = self
            .selection
            .ok_or_else(|| SeoForgeError::Validation("no text selected".into()))?;
        let text = selection.extract(content)?;
        validate_paraphrase_params(
            self.params.adequacy,
            self.params.fluency,
            self.params.diversity,
            self.params.max_variations,
        )
        .map_err(SeoForgeError::Validation)?;

        let token = self.flight.try_acquire()?;
        Ok((
            token,
            ParaphraseRequest {
                text: text.to_string(),
                adequacy: self.params.adequacy,
                fluency: self.params.fluency,
                diversity: self.params.diversity,
                max_variations: self.params.max_variations,
            },
        ))
    }

    /// Apply the outcome of a request
    ///
    /// Returns true when the outcome was applied. A stale token, one
    /// superseded by a selection change, is discarded entirely: neither
    /// variations nor an error from the old selection may show up
    /// against the new one.
    pub fn complete_request(
        &mut self,
        token: FlightToken,
        outcome: Result<ParaphraseResponse>,
    ) -> bool {
        if !self.flight.is_current(&token) {
            tracing::debug!("Discarding paraphrase response for a superseded selection");
            return false;
        }
        self.flight.finish(token);

        match outcome {
            Ok(response) => {
                self.variations = response
                    .paraphrased_variations
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| Variation {
                        text,
                        confidence: response.confidence_scores.get(i).copied(),
                    })
                    .collect();
                self.error = None;
            }
            Err(err) => {
                self.variations.clear();
                self.error = Some(err.to_string());
                tracing::warn!("Paraphrase request failed: {}", err);
            }
        }
        true
    }

    /// Fetch variations for the current selection in one step
    ///
    /// # Errors
    ///
    /// Everything `begin_request` rejects, plus request failures (which
    /// are also recorded on the assistant for display).
    pub async fn request<C: GenerationClient + ?Sized>(
        &mut self,
        client: &C,
        content: &str,
    ) -> Result<()> {
        let (token, request) = self.begin_request(content)?;
        let outcome = client.paraphrase(request).await;
        let failed = outcome.is_err();
        self.complete_request(token, outcome);
        if failed {
            if let Some(message) = &self.error {
                return Err(SeoForgeError::Paraphrase(message.clone()).into());
            }
        }
        Ok(())
    }

    /// Splice a fetched variation into the body
    ///
    /// Consumes the selection and variations; returns the new buffer
    /// and the cursor position just past the inserted text.
    ///
    /// # Errors
    ///
    /// `Validation` when the index is out of range or no selection is
    /// active.
    pub fn apply_variation(&mut self, content: &str, index: usize) -> Result<(String, usize)> {
        let selection = self
            .selection
            .ok_or_else(|| SeoForgeError::Validation("no text selected".into()))?;
        let variation = self.variations.get(index).ok_or_else(|| {
            SeoForgeError::Validation(format!("no variation at index {index}"))
        })?;

        let result = selection.replace(content, &variation.text);
        self.clear_selection();
        Ok(result)
    }
}
