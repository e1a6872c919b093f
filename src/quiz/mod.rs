//! Multi-step quiz: answers, steps, validation and the wizard that drives them.

pub mod catalog;
pub mod document;
pub mod draft;
pub mod fields;
pub mod options;
pub mod suggest;
pub mod validate;
pub mod wizard;

pub use catalog::{StepCatalog, StepDescriptor, StepKind};
pub use document::QuizDocument;
pub use draft::Draft;
pub use fields::{FieldKey, FieldStore, FieldValue};
pub use validate::{StepInvalid, is_step_valid, validate_step};
pub use wizard::{QuizDispatcher, Transition, Wizard, WizardState};
