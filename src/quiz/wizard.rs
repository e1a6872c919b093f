//! Wizard controller.
//!
//! States: `Step(1..=N)` → `Submitting` → `Complete`.
//! `next` validates and commits the current draft before moving on;
//! `prev` moves back without validation. A failed dispatch returns the
//! session to the last step with every answer intact. Answers are locked
//! while submitting and once complete.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::catalog::{StepCatalog, StepKind};
use super::document::QuizDocument;
use super::draft::Draft;
use super::fields::FieldStore;
use super::validate::{StepInvalid, validate_step};
use crate::error::{MailError, WizardError};
use crate::mail::DeliveryReceipt;

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// On a step, 1-based.
    Step(usize),
    /// Final step passed validation; dispatch in flight.
    Submitting,
    /// Submission delivered. No further navigation.
    Complete,
}

/// Outcome of a forward navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved to this step.
    Advanced(usize),
    /// Final step committed; the caller must dispatch the document and
    /// report back through [`Wizard::finish`].
    Submit(QuizDocument),
    /// Dispatched and delivered (only from [`Wizard::next_with`]).
    Submitted(DeliveryReceipt),
    /// Nothing happened: a submission is in flight or the session is done.
    Ignored,
}

/// Delivers a finished quiz somewhere.
#[async_trait]
pub trait QuizDispatcher: Send + Sync {
    async fn dispatch(&self, document: QuizDocument) -> Result<DeliveryReceipt, MailError>;
}

/// One visitor's pass through the quiz.
#[derive(Debug, Clone)]
pub struct Wizard {
    catalog: StepCatalog,
    state: WizardState,
    store: FieldStore,
    draft: Draft,
}

impl Wizard {
    pub fn new(catalog: StepCatalog) -> Self {
        let draft = Draft::empty(catalog.first());
        Self {
            catalog,
            state: WizardState::Step(1),
            store: FieldStore::new(),
            draft,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Current 1-based step; the last step while submitting or complete.
    pub fn current_step(&self) -> usize {
        match self.state {
            WizardState::Step(s) => s,
            WizardState::Submitting | WizardState::Complete => self.catalog.len(),
        }
    }

    pub fn current_kind(&self) -> StepKind {
        self.draft.kind()
    }

    pub fn step_count(&self) -> usize {
        self.catalog.len()
    }

    /// Fraction of the progress bar to fill, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.current_step() as f32 / self.catalog.len() as f32
    }

    /// Whether the back control is shown.
    pub fn can_go_back(&self) -> bool {
        matches!(self.state, WizardState::Step(s) if s > 1)
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.state == WizardState::Submitting
    }

    pub fn is_complete(&self) -> bool {
        self.state == WizardState::Complete
    }

    /// Committed answers.
    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Draft of the current step, for edits. `None` while submitting or
    /// once complete.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self.state {
            WizardState::Step(_) => Some(&mut self.draft),
            WizardState::Submitting | WizardState::Complete => None,
        }
    }

    /// Whether the current draft would pass validation.
    pub fn is_current_step_valid(&self) -> bool {
        self.validate_current().is_ok()
    }

    fn validate_current(&self) -> Result<(), StepInvalid> {
        validate_step(self.draft.kind(), &self.store, Some(&self.draft))
    }

    /// Validate the current draft and move it into the store.
    ///
    /// Only allowed on a step; the store is frozen from submission on.
    pub fn commit(&mut self) -> Result<(), WizardError> {
        if !matches!(self.state, WizardState::Step(_)) {
            debug!(state = ?self.state, "Refusing commit outside of a step");
            return Err(WizardError::Locked);
        }
        Ok(self.commit_step()?)
    }

    fn commit_step(&mut self) -> Result<(), StepInvalid> {
        self.validate_current()?;
        self.draft.commit_into(&mut self.store);
        debug!(step = %self.draft.kind(), "Step committed");
        Ok(())
    }

    /// Advance one step, or hand out the document on the last step.
    pub fn next(&mut self) -> Result<Transition, WizardError> {
        let step = match self.state {
            WizardState::Step(s) => s,
            state => {
                debug!(?state, "Ignoring next outside of a step");
                return Ok(Transition::Ignored);
            }
        };

        if let Err(invalid) = self.commit_step() {
            debug!(step, missing = ?invalid.missing, "Step invalid");
            return Err(invalid.into());
        }

        if step < self.catalog.len() {
            let next = step + 1;
            self.enter(next);
            Ok(Transition::Advanced(next))
        } else {
            self.state = WizardState::Submitting;
            info!(fields = self.store.len(), "Quiz ready for submission");
            Ok(Transition::Submit(QuizDocument::from_store(&self.store)))
        }
    }

    /// Go back one step. Returns `false` when there is nowhere to go.
    ///
    /// The draft of the step being left is discarded; the previous step's
    /// draft is rebuilt from the store.
    pub fn prev(&mut self) -> bool {
        match self.state {
            WizardState::Step(s) if s > 1 => {
                self.enter(s - 1);
                true
            }
            _ => false,
        }
    }

    /// Record the dispatch outcome of a submission.
    ///
    /// Success completes the session. Failure puts the visitor back on the
    /// last step with the contact details still filled in.
    pub fn finish(
        &mut self,
        outcome: Result<DeliveryReceipt, MailError>,
    ) -> Result<DeliveryReceipt, WizardError> {
        if self.state != WizardState::Submitting {
            return Err(WizardError::NotSubmitting);
        }
        match outcome {
            Ok(receipt) => {
                self.state = WizardState::Complete;
                info!(id = %receipt.id, "Quiz submission delivered");
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Quiz submission failed");
                self.enter(self.catalog.len());
                Err(WizardError::Dispatch(e))
            }
        }
    }

    /// `next`, dispatching the document when the last step is passed.
    pub async fn next_with(
        &mut self,
        dispatcher: &dyn QuizDispatcher,
    ) -> Result<Transition, WizardError> {
        match self.next()? {
            Transition::Submit(document) => {
                let outcome = dispatcher.dispatch(document).await;
                self.finish(outcome).map(Transition::Submitted)
            }
            other => Ok(other),
        }
    }

    fn enter(&mut self, step: usize) {
        // Indices come from the catalog itself, so this always resolves.
        let kind = self.catalog.kind_at(step).unwrap_or_else(|| self.catalog.first());
        self.state = WizardState::Step(step);
        self.draft = Draft::hydrate(kind, &self.store);
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(StepCatalog::canonical())
    }
}
