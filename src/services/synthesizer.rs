//! Context assembly and answer synthesis.
//!
//! Joins retrieved chunk texts into a bounded context block, wraps it in
//! a fixed instruction prompt, and makes exactly one completion call.

use std::sync::Arc;

use crate::domain::errors::PipelineResult;
use crate::domain::models::{Chunk, SourceRef};
use crate::domain::ports::completion::CompletionProvider;

const INSTRUCTIONS: &str = "\
Use only the context that is relevant to the query.
Provide additional detail from the context where it helps, and be concise.
Do not change the terminology or keywords used in the documents.
The response must be coherent and easy to read.
If you do not know the answer, say \"I don't know\".
If the answer is not in the context, say \"The answer is not in the context\".
Do not make up answers or provide information that is not in the context.
Do not include any disclaimers or unnecessary information.";

/// Turns ranked chunks into a generated answer.
pub struct Synthesizer {
    completion: Arc<dyn CompletionProvider>,
    context_budget_chars: usize,
}

impl Synthesizer {
    pub fn new(completion: Arc<dyn CompletionProvider>, context_budget_chars: usize) -> Self {
        Self {
            completion,
            context_budget_chars,
        }
    }

    /// Generate prose for the query from the ranked chunks, returned
    /// verbatim from the completion collaborator.
    pub async fn synthesize(&self, query: &str, ranked: &[Chunk]) -> PipelineResult<String> {
        let context = self.build_context(ranked);
        let prompt = build_prompt(query, &context);

        tracing::debug!(
            context_chars = context.len(),
            chunks = ranked.len(),
            "Invoking completion collaborator"
        );

        self.completion.generate(&prompt).await
    }

    /// Join chunk texts with blank lines, stopping before the block
    /// would exceed the character budget. `k` already bounds the input;
    /// the budget is a second guard against oversized chunks. The top
    /// chunk is always included.
    fn build_context(&self, ranked: &[Chunk]) -> String {
        let mut context = String::new();

        for chunk in ranked {
            let projected = if context.is_empty() {
                chunk.text.len()
            } else {
                context.len() + 2 + chunk.text.len()
            };
            if !context.is_empty() && projected > self.context_budget_chars {
                tracing::debug!("Context budget reached, dropping remaining chunks");
                break;
            }
            if !context.is_empty() {
                context.push_str("\n\n");
            }
            context.push_str(&chunk.text);
        }

        context
    }
}

fn build_prompt(query: &str, context: &str) -> String {
    format!("{INSTRUCTIONS}\n\nQuery:\n{query}\n\nContext:\n{context}")
}

/// Deduplicate `(title, url)` pairs across ranked chunks, preserving
/// first-seen order and dropping exact URL repeats.
pub fn dedup_sources(ranked: &[Chunk]) -> Vec<SourceRef> {
    let mut seen = std::collections::HashSet::new();
    ranked
        .iter()
        .filter(|chunk| seen.insert(chunk.url.clone()))
        .map(|chunk| SourceRef {
            title: chunk.title.clone(),
            url: chunk.url.clone(),
        })
        .collect()
}
