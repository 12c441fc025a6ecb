//! Shape-completion assistant.
//!
//! The [`engine`] decides whether to propose an addition from a
//! [`SuggestionContext`]; the [`catalogue`] turns an accepted suggestion's
//! template into concrete shapes.

pub mod catalogue;
pub mod engine;

pub use catalogue::{Catalogue, Template, TemplateId};
pub use engine::{Suggestion, SuggestionContext, SuggestionId, TriggerKind, propose};
