//! formwork-session: live form runtime over compiled descriptors.
//!
//! Consumes the schema IR and compiler from `formwork-core` and maintains
//! one form's state: current values, the visible field set, per-field
//! localized errors, and whole-form validity. Everything is synchronous
//! and event-driven -- each user edit or locale switch is one atomic
//! transition over the current value snapshot.
//!
//! # Public API
//!
//! - [`FormSession`] -- the orchestrator: values, visibility, errors,
//!   submit gating
//! - [`Value`], [`ValueMap`] -- runtime field values
//! - [`visibility::is_visible`], [`visibility::visible_set`] -- the
//!   visibility evaluator
//! - [`CrossFieldCheck`] -- runtime cross-field rules
//! - [`predicates`] -- atomic value predicates
//! - [`validate`] -- the field-local validation pass

pub mod predicates;
pub mod rules;
pub mod session;
pub mod validate;
pub mod value;
pub mod visibility;

pub use rules::CrossFieldCheck;
pub use session::{FormSession, SubmitError};
pub use validate::Violation;
pub use value::{Value, ValueMap};
pub use visibility::{is_visible, visible_set};
