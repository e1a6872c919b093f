//! Step validator gating forward navigation.
//!
//! Validation projects the draft onto a scratch store and checks it against
//! the step's required keys and conditional branches. A draft only writes a
//! key once the visitor has actually answered it, so "absent" and "missing"
//! coincide.

use std::fmt;

use super::catalog::StepKind;
use super::draft::Draft;
use super::fields::{FieldKey, FieldStore};

/// Why a step cannot be left yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInvalid {
    pub step: StepKind,
    pub missing: Vec<FieldKey>,
}

impl fmt::Display for StepInvalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.step {
            StepKind::PageScope => write!(
                f,
                "Vänligen välj ett paket eller använd reglaget för antal undersidor."
            ),
            _ => write!(f, "Fyll i de obligatoriska fälten."),
        }
    }
}

impl std::error::Error for StepInvalid {}

/// Validate step `kind`.
///
/// Uses `draft` when it belongs to `kind`; otherwise the step is rebuilt
/// from the committed values in `store`.
pub fn validate_step(
    kind: StepKind,
    store: &FieldStore,
    draft: Option<&Draft>,
) -> Result<(), StepInvalid> {
    let candidate = match draft {
        Some(d) if d.kind() == kind => d.project(),
        _ => Draft::hydrate(kind, store).project(),
    };
    let missing = missing_fields(kind, &candidate);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StepInvalid {
            step: kind,
            missing,
        })
    }
}

/// Boolean form of [`validate_step`].
pub fn is_step_valid(kind: StepKind, store: &FieldStore, draft: Option<&Draft>) -> bool {
    validate_step(kind, store, draft).is_ok()
}

/// Required keys of `kind` that `candidate` leaves unanswered, in
/// declaration order.
pub fn missing_fields(kind: StepKind, candidate: &FieldStore) -> Vec<FieldKey> {
    let mut missing: Vec<FieldKey> = kind
        .required()
        .iter()
        .copied()
        .filter(|key| !candidate.is_answered(*key))
        .collect();

    for branch in kind.branches() {
        if candidate.text(branch.discriminator) != Some(branch.value) {
            continue;
        }
        if branch.waived_by.is_some_and(|flag| candidate.flag(flag)) {
            continue;
        }
        missing.extend(
            branch
                .required
                .iter()
                .copied()
                .filter(|key| !candidate.is_answered(*key)),
        );
    }
    missing
}
