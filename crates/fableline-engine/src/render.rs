//! Response rendering.
//!
//! A pure mapping from a resolved story node to the caller-facing script.
//! No state, no side effects; the transport layer decides how the script is
//! spoken.

use fableline_story::StoryNode;

/// How long to wait for a digit before repeating the prompt, in seconds.
pub const GATHER_TIMEOUT_SECS: u8 = 10;

/// Spoken after the node text while waiting for input.
pub const RETRY_PROMPT: &str = "Please make your choice now.";

/// What to do after speaking the script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Collect exactly one digit, repeating the prompt on silence.
    CollectDigit {
        /// Seconds to wait before the repeat-prompt fallback.
        timeout_secs: u8,
        /// Fallback line spoken while waiting.
        retry_prompt: String,
    },
    /// End the interaction.
    EndCall,
}

/// A caller-facing prompt script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerScript {
    /// The narration to speak.
    pub text: String,
    /// What follows the narration.
    pub directive: Directive,
}

impl CallerScript {
    /// Whether the script expects a digit from the caller.
    #[must_use]
    pub fn expects_input(&self) -> bool {
        matches!(self.directive, Directive::CollectDigit { .. })
    }
}

/// Renders a node into its caller script: narration plus a collect-one-digit
/// directive for branching nodes, or an end-of-interaction directive for
/// terminal nodes.
#[must_use]
pub fn script_for(node: &StoryNode) -> CallerScript {
    let directive = if node.is_terminal() {
        Directive::EndCall
    } else {
        Directive::CollectDigit {
            timeout_secs: GATHER_TIMEOUT_SECS,
            retry_prompt: RETRY_PROMPT.to_owned(),
        }
    };

    CallerScript {
        text: node.text.clone(),
        directive,
    }
}
