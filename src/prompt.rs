//! Interactive confirmation.
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;

/// Asks the operator a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    /// Return `true` only on an explicit yes.
    fn confirm(&self, question: &str) -> bool;
}

/// Terminal prompt backed by `dialoguer`.
///
/// Defaults to no.  A closed or non-interactive terminal also counts as no.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl Prompt for DialoguerPrompt {
    fn confirm(&self, question: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
