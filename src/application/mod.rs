//! # Application Layer
//!
//! The chat-turn use case and the trait seams it depends on.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
