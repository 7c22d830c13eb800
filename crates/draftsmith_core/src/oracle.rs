//! crates/draftsmith_core/src/oracle.rs
//!
//! The content oracle: builds the prompts for outline, generation and
//! refinement, parses the provider's raw text, and applies the fallback
//! policy. It is generic over the `TextCompletion` port so the policy can be
//! exercised without a network.

use async_trait::async_trait;
use tracing::error;

use crate::ports::{ContentGeneration, TextCompletion};

/// Placeholder body returned when the provider fails during generation.
pub const GENERATION_FALLBACK: &str = "Error generating content. Please try again later.";

/// Outline returned when the provider fails during outline suggestion.
pub const OUTLINE_FALLBACK: [&str; 4] = ["Introduction", "Key Point 1", "Key Point 2", "Conclusion"];

//=========================================================================================
// The Oracle
//=========================================================================================

/// Wraps a raw text-completion provider with the prompt and fallback
/// behavior of the authoring workflow. Every operation is a single round
/// trip; a failed call degrades to a fixed value and never reaches the
/// caller as an error.
pub struct ContentOracle<P> {
    provider: P,
}

impl<P: TextCompletion> ContentOracle<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

/// Splits the provider's raw outline text on commas and trims whitespace
/// around each entry. No further cleanup: the caller gets exactly the
/// comma-split list.
fn parse_outline(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

#[async_trait]
impl<P: TextCompletion> ContentGeneration for ContentOracle<P> {
    async fn generate_section_content(
        &self,
        topic: &str,
        section_title: &str,
        doc_type: &str,
    ) -> String {
        let format_instruction = if doc_type == "word" {
            "Write a few paragraphs"
        } else {
            "Write 3-4 bullet points"
        };

        let prompt = format!(
            "You are writing a {doc_type} document about '{topic}'. \
             Write the content for a section titled '{section_title}'. \
             {format_instruction}. Do not include the title in the output."
        );

        match self.provider.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Content generation failed for section '{section_title}': {e}");
                GENERATION_FALLBACK.to_string()
            }
        }
    }

    async fn refine_content(&self, content: &str, instruction: &str) -> String {
        let prompt = format!(
            "Original text: \n{content}\n\nInstruction: {instruction}\n\nRewrite the text:"
        );

        match self.provider.complete(&prompt).await {
            Ok(text) => text,
            // A failed refinement must not destroy existing content.
            Err(e) => {
                error!("Refinement failed, keeping original content: {e}");
                content.to_string()
            }
        }
    }

    async fn suggest_outline(&self, topic: &str, doc_type: &str) -> Vec<String> {
        let prompt = format!(
            "Create a structured outline for a {doc_type} document about '{topic}'. \
             Return ONLY a comma-separated list of 5 section titles. No numbering."
        );

        match self.provider.complete(&prompt).await {
            Ok(text) => parse_outline(&text),
            Err(e) => {
                error!("Outline suggestion failed, using fallback outline: {e}");
                OUTLINE_FALLBACK.iter().map(|t| t.to_string()).collect()
            }
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, PortResult};
    use std::sync::Mutex;

    /// A provider stub that either answers with a canned string or fails,
    /// recording every prompt it was given.
    struct StubProvider {
        response: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn answering(response: &'static str) -> Self {
            Self {
                response: Some(response),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl TextCompletion for &StubProvider {
        async fn complete(&self, prompt: &str) -> PortResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.response {
                Some(text) => Ok(text.to_string()),
                None => Err(PortError::Unexpected("provider unreachable".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn outline_is_comma_split_and_trimmed() {
        let provider = StubProvider::answering("Intro ,  Body, Detail,Wrap-up , Conclusion");
        let oracle = ContentOracle::new(&provider);
        let outline = oracle.suggest_outline("rust", "word").await;
        assert_eq!(outline, vec!["Intro", "Body", "Detail", "Wrap-up", "Conclusion"]);
    }

    #[tokio::test]
    async fn outline_failure_yields_fixed_fallback() {
        let provider = StubProvider::failing();
        let oracle = ContentOracle::new(&provider);
        let outline = oracle.suggest_outline("rust", "word").await;
        assert_eq!(
            outline,
            vec!["Introduction", "Key Point 1", "Key Point 2", "Conclusion"]
        );
    }

    #[tokio::test]
    async fn refine_failure_returns_original_content() {
        let provider = StubProvider::failing();
        let oracle = ContentOracle::new(&provider);
        let refined = oracle.refine_content("Keep me intact.", "make it shorter").await;
        assert_eq!(refined, "Keep me intact.");
    }

    #[tokio::test]
    async fn refine_success_returns_rewritten_text() {
        let provider = StubProvider::answering("Shorter.");
        let oracle = ContentOracle::new(&provider);
        let refined = oracle.refine_content("A long paragraph.", "make it shorter").await;
        assert_eq!(refined, "Shorter.");
        let prompt = provider.last_prompt();
        assert!(prompt.contains("A long paragraph."));
        assert!(prompt.contains("make it shorter"));
    }

    #[tokio::test]
    async fn generation_failure_yields_placeholder() {
        let provider = StubProvider::failing();
        let oracle = ContentOracle::new(&provider);
        let content = oracle
            .generate_section_content("AI Ethics", "Intro", "word")
            .await;
        assert_eq!(content, GENERATION_FALLBACK);
    }

    #[tokio::test]
    async fn generation_prompt_matches_document_format() {
        let provider = StubProvider::answering("Some paragraphs.");
        let oracle = ContentOracle::new(&provider);
        oracle
            .generate_section_content("AI Ethics", "Intro", "word")
            .await;
        assert!(provider.last_prompt().contains("Write a few paragraphs"));

        oracle
            .generate_section_content("AI Ethics", "Intro", "powerpoint")
            .await;
        assert!(provider.last_prompt().contains("Write 3-4 bullet points"));
    }
}
