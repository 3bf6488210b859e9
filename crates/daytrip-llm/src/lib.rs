//! Text-generation backend abstraction for daytrip.
//!
//! Wraps an opaque text-completion capability behind the
//! [`GenerationBackend`] trait: prompt in, free-form itinerary text out.
//! The HTTP implementation speaks the OpenAI-compatible completions shape,
//! which covers hosted APIs and local model runners alike.

pub mod backend;
pub mod completion;
pub mod error;
pub mod types;

pub use backend::{GenerationBackend, SharedBackend};
pub use completion::{CompletionBackend, CompletionConfig};
pub use error::{GenerationError, Result};
pub use types::{GenerationRequest, GenerationResponse};

#[cfg(any(test, feature = "testing"))]
pub use backend::MockGenerator;
