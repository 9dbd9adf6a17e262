//! formwork-core: schema IR and field descriptor compiler.
//!
//! Turns a declarative form schema into renderer-agnostic field
//! descriptors. The schema is a tagged-variant IR built once at authoring
//! time ([`SchemaDef`], [`FieldType`], [`Condition`]); the compiler
//! ([`compile()`]) resolves render kinds, requiredness, localized text,
//! and per-field visibility rules with their dependency sets.
//!
//! Runtime state (values, visibility, validation, sessions) lives in the
//! companion crate `formwork-session`.
//!
//! # Public API
//!
//! - [`compile()`] -- produce descriptors from a schema and a translator
//! - [`SchemaDef`], [`FieldDecl`], [`FieldType`], [`Constraints`],
//!   [`RuleDecl`] -- the schema IR
//! - [`Condition`], [`Operator`] -- visibility conditions
//! - [`FieldDescriptor`], [`FieldKind`], [`ChoiceOption`] -- compiler output
//! - [`Translator`], [`StaticCatalog`] -- localization collaborator
//! - [`SchemaError`] -- definition parse errors

pub mod compile;
pub mod condition;
pub mod descriptor;
pub mod error;
pub mod schema;
pub mod translate;

pub use compile::compile;
pub use condition::{Condition, Operator};
pub use descriptor::{ChoiceOption, FieldDescriptor, FieldKind};
pub use error::SchemaError;
pub use schema::{Constraints, FieldDecl, FieldType, RuleDecl, SchemaDef};
pub use translate::{StaticCatalog, Translator};
