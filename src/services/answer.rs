//! Answer synthesis: grounding prompt construction and completion.

use std::sync::Arc;

use crate::domain::errors::PipelineResult;
use crate::domain::ports::CompletionProvider;

/// Builds the grounding prompt and invokes the generative capability.
pub struct AnswerService {
    completer: Arc<dyn CompletionProvider>,
}

impl AnswerService {
    pub fn new(completer: Arc<dyn CompletionProvider>) -> Self {
        Self { completer }
    }

    /// Synthesize an answer from the assembled context.
    ///
    /// Fails with `SynthesisFailed` only when the completion call itself
    /// errors; an empty answer string is passed through as-is.
    pub async fn synthesize(&self, question: &str, context_text: &str) -> PipelineResult<String> {
        let prompt = build_prompt(question, context_text);
        self.completer.complete(&prompt).await
    }
}

/// Fixed instructional template embedding the context and question.
pub(crate) fn build_prompt(question: &str, context_text: &str) -> String {
    format!(
        "You are an assistant answering questions about an indexed document collection.\n\
         Answer briefly and precisely using the context. If the context is insufficient, \
         say \"I do not have enough information about this topic.\"\n\
         CONTEXT:\n\
         {context_text}\n\
         \n\
         QUESTION: {question}\n\
         \n\
         ANSWER:"
    )
}
