//! Instruction templates for summarization and translation
//!
//! Each template carries exactly one `{text}` slot. Formatting is a pure
//! substitution; a template without the slot is a configuration defect and
//! is reported as [`FinSummaryError::Config`].

use finsummary_common::{FinSummaryError, Result};

use crate::types::SummaryStyle;

/// Name of the single substitution slot
pub const TEXT_SLOT: &str = "{text}";

/// Immutable instruction text with one `{text}` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    template: &'static str,
}

impl PromptTemplate {
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self { name, template }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Fill the `{text}` slot
    pub fn format(&self, text: &str) -> Result<String> {
        if !self.template.contains(TEXT_SLOT) {
            return Err(FinSummaryError::config(format!(
                "Prompt template '{}' has no {} slot",
                self.name, TEXT_SLOT
            )));
        }
        Ok(self.template.replace(TEXT_SLOT, text))
    }
}

/// Per-chunk summary instruction
pub const MAP_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "map",
    r#"
Write a concise summary of the following:
"{text}"
CONCISE SUMMARY:
"#,
);

/// Final instruction producing a structured prose summary
pub const COMBINE_PARAGRAPH_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "combine_paragraph",
    r#"
Your Role: Financial Analyst
Short basic instruction: Summarize economic outlook and investment documents from text enclosed within triple backquotes.
What you should do: Follow a structured approach to distill complex economic and investment documents into concise summaries. This includes reading thoroughly to understand the main arguments, identifying key points and arguments, and using your own words to outline a structured summary that captures the essence of the document.
Your Goal: Provide investors with a clear, concise summary that highlights the key points, arguments, and evidence from detailed economic outlook and investment documents. The summary should enable investors to quickly grasp the essential information and insights without having to navigate through the entire document.
Result: The summary should be organized with an introduction that includes the title of the original text, the author's name, and a brief overview of the main theme or argument. Body paragraphs should focus on specific main points or arguments, presented logically. The conclusion should reiterate the main arguments or points summarized. Use a formal and neutral tone throughout.
Constraint: Maintain objectivity and neutrality, avoiding personal opinions or biases. The summary should be significantly shorter than the original text, focusing only on essential arguments and points. Direct quotes should be used sparingly, with proper attribution.
Context: Given the complex nature of economic outlook and investment documents, which often contain detailed analyses, forecasts, and recommendations, your summary should help investors understand the key takeaways without oversimplifying or distorting the original document's content and intent.
```{text}```
PARAGRAPH SUMMARY:
"#,
);

/// Final instruction producing a bullet point summary
pub const COMBINE_BULLET_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "combine_bullet",
    r#"
Your Role: Financial Analyst
Short basic instruction: Summarize economic outlook and investment documents from text enclosed within triple backquotes.
What you should do: Follow a structured approach to read and understand the text, identify and organize key points, and summarize them effectively.
Your Goal: Provide concise, clear, and relevant summaries that aid investors in decision-making.
Result: Your summary should consist of bullet points, each representing a distinct idea or piece of information related to economics and investments. Use sub-bullets for details when necessary, ensuring each bullet is concise and uses keywords or phrases from the text.
Constraint: Limit your summary to the most critical information, avoiding overload. Keep each bullet point to one or two sentences and use parallel structure for readability. Focus on themes crucial for investment decisions, such as market trends, financial forecasts, risks, and opportunities.
Context: The document to be summarized is an economics outlook or investment document intended for investors. The summary should highlight essential points that affect investment decisions, maintaining accuracy and coherence with the original content.
```{text}```
BULLET POINT SUMMARY:
"#,
);

/// Thai translation instruction
///
/// The source text is fenced with `<text>` tags rather than backticks.
pub const TRANSLATE_THAI_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "translate_thai",
    r#"
Your task is to translate the text found between the <text> and </text> tags below into Thai language.
Ensure the translation maintains a natural and fluent tone, and exclude the tags from your response. Below is the text requiring translation:
<text>
{text}
</text>
Please adhere to the following guidelines in your translation:
- The translation should be natural and fluent, accurately reflecting the essence of the original text.
- Focus on translating only the section enclosed within the <text> tags; all other instructions should remain in English.
- Exclude the tags in your translation, presenting a clear and focused response.
- Keep the format consistent: if the original text is in bullet points, maintain bullet points; if it's in paragraph form, keep it as a paragraph.
"#,
);

impl SummaryStyle {
    /// Combine instruction used for this output style
    pub fn combine_template(self) -> PromptTemplate {
        match self {
            SummaryStyle::Paragraph => COMBINE_PARAGRAPH_TEMPLATE,
            SummaryStyle::Bullet => COMBINE_BULLET_TEMPLATE,
        }
    }
}

/// Prompt for a single chunk (map step)
pub fn map_prompt(chunk: &str) -> Result<String> {
    MAP_TEMPLATE.format(chunk)
}

/// Prompt for the combine step in the requested style
pub fn combine_prompt(style: SummaryStyle, text: &str) -> Result<String> {
    style.combine_template().format(text)
}

/// Prompt for Thai translation
pub fn translate_prompt(text: &str) -> Result<String> {
    TRANSLATE_THAI_TEMPLATE.format(text)
}

/// Slot value for a refine step: the running summary followed by the new chunk
pub fn refine_context(existing_summary: &str, chunk: &str) -> String {
    format!(
        "EXISTING SUMMARY:\n{}\n\nNEW CONTEXT (update the existing summary with it):\n{}",
        existing_summary.trim(),
        chunk.trim()
    )
}
