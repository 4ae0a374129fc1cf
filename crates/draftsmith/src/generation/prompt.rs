//! Prompt templates for enrichment and draft generation

use crate::types::{Category, KnowledgeRecord, Platform};

/// Prompt builder for the analyst (enrichment) and creator (drafting) calls
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the enrichment prompt: categorize into the fixed label set and
    /// summarize in one sentence, replying as bare JSON.
    pub fn build_analyst_prompt(business: &str, raw_text: &str) -> String {
        format!(
            r#"You are a Data Analyst for {business}.
Analyze the following raw text input: "{raw_text}"

1. Categorize it into exactly ONE of these buckets: [{labels}].
2. Write a 1-sentence clean summary of the key fact.

Return the result in this exact JSON format (no markdown):
{{ "category": "...", "summary": "..." }}"#,
            business = business,
            raw_text = raw_text,
            labels = Category::assignable_labels().join(", "),
        )
    }

    /// Render stored knowledge as generation context, one record per line.
    /// Records without a summary fall back to their raw content.
    pub fn build_context(records: &[KnowledgeRecord]) -> String {
        records
            .iter()
            .map(|record| format!("[{}]: {}", record.category, record.display_text()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the post-writing prompt for one platform
    pub fn build_post_prompt(
        business: &str,
        platform: Platform,
        context: &str,
        tone: Option<&str>,
        topic: Option<&str>,
        promo_message: Option<&str>,
        search_context: Option<&str>,
    ) -> String {
        let task_instruction = match topic.filter(|t| !t.trim().is_empty()) {
            Some(topic) => format!("Write a post specifically about: \"{}\".", topic),
            None => "Choose the most compelling info from the Context Data below.".to_string(),
        };

        let mut prompt = format!(
            r#"You are a social media manager for '{business}'.

TONE: {tone}
PLATFORM: {platform}

Task:
{task_instruction}
"#,
            business = business,
            tone = tone.unwrap_or("Professional & Exciting"),
            platform = platform,
            task_instruction = task_instruction,
        );

        if let Some(promo) = promo_message.filter(|p| !p.trim().is_empty()) {
            prompt.push_str(&format!(
                "\nWork this promotional message into the post: \"{}\".\n",
                promo
            ));
        }

        prompt.push_str(&format!(
            "\nCONTEXT DATA (Analyzed & Categorized):\n{}\n",
            context
        ));

        if let Some(search) = search_context.filter(|s| !s.trim().is_empty()) {
            prompt.push_str(&format!("\nLIVE WEB CONTEXT:\n{}\n", search));
        }

        prompt.push_str(
            r#"
Constraints:
- Include relevant hashtags.
- Keep it under ~100 words.
- Return ONLY the post text."#,
        );

        prompt
    }

    /// Build the image-generation prompt
    pub fn build_image_prompt(business: &str, focus: Option<&str>) -> String {
        match focus.filter(|f| !f.trim().is_empty()) {
            Some(focus) => format!(
                "A polished, vibrant social media photo for {}, featuring: {}. No text overlay.",
                business, focus
            ),
            None => format!(
                "A polished, vibrant social media photo showcasing {}. No text overlay.",
                business
            ),
        }
    }
}
