//! # Data Providers
//!
//! The dashboard never reaches for a global dataset. Everything it shows comes
//! from a [`PromptProvider`] handed to it at startup.

mod json;
mod mock;

pub use json::{Dataset, JsonFileProvider};
pub use mock::MockProvider;

use crate::types::{Prompt, UserInfo};

/// Source of the prompts and owner information shown on the dashboard.
pub trait PromptProvider {
    /// All prompts, in display order.
    fn prompts(&self) -> &[Prompt];

    /// Owner of the prompt library.
    fn user(&self) -> &UserInfo;

    /// Look up a prompt by id.
    fn find(&self, id: &crate::types::PromptId) -> Option<&Prompt> {
        self.prompts().iter().find(|p| &p.id == id)
    }
}
