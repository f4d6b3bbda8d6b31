use chrono::{Duration, NaiveDate};

use super::PromptProvider;
use crate::types::{PerformanceRecord, Prompt, PromptIcon, PromptId, UserInfo};

/// Number of days of history generated for each prompt.
const HISTORY_DAYS: i64 = 15;

/// Built-in, deterministic demo dataset.
#[derive(Debug, Clone)]
pub struct MockProvider {
    user: UserInfo,
    prompts: Vec<Prompt>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            user: UserInfo {
                name: "Alex Morgan".to_string(),
                email: "alex.morgan@example.com".to_string(),
                plan: "Pro".to_string(),
            },
            prompts: mock_prompts(),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptProvider for MockProvider {
    fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    fn user(&self) -> &UserInfo {
        &self.user
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Daily history with a small deterministic wobble around the base values.
fn history(
    start: NaiveDate,
    days: i64,
    base_usage: u64,
    spread: u64,
    base_rate: f64,
    seed: u64,
) -> Vec<PerformanceRecord> {
    (0..days)
        .map(|i| {
            let step = i as u64;
            let usage = base_usage + (step * 37 + seed * 11) % spread;
            let wobble = ((step * seed + 3) % 7) as f64 * 0.006 - 0.018;
            PerformanceRecord::clamped(start + Duration::days(i), usage, base_rate + wobble)
        })
        .collect()
}

fn mock_prompts() -> Vec<Prompt> {
    let first_day = date(2024, 1, 1);
    // Prompts added later only report for the tail of the window
    let late_start = first_day + Duration::days(5);

    vec![
        Prompt {
            id: PromptId::from("product-description"),
            name: "Product Description Generator".to_string(),
            description: "Creates compelling product descriptions from key features".to_string(),
            content: "Write a persuasive product description for [product_name]. \
                      Highlight these features: [features]. Target audience: [audience]. \
                      Tone: [tone]."
                .to_string(),
            category: "Marketing".to_string(),
            icon: PromptIcon::FileText,
            usage: 1243,
            success: 1180,
            created_at: date(2023, 11, 12),
            updated_at: date(2024, 1, 10),
            performance: history(first_day, HISTORY_DAYS, 70, 30, 0.95, 1),
        },
        Prompt {
            id: PromptId::from("support-reply"),
            name: "Customer Support Reply".to_string(),
            description: "Drafts empathetic replies to customer support tickets".to_string(),
            content: "You are a support agent for [company]. Reply to the following ticket \
                      with empathy and a clear next step: [ticket_text]"
                .to_string(),
            category: "Support".to_string(),
            icon: PromptIcon::MessageSquare,
            usage: 2456,
            success: 2381,
            created_at: date(2023, 10, 3),
            updated_at: date(2024, 1, 12),
            performance: history(first_day, HISTORY_DAYS, 140, 45, 0.97, 2),
        },
        Prompt {
            id: PromptId::from("blog-outline"),
            name: "Blog Post Outline".to_string(),
            description: "Builds a structured outline for long-form articles".to_string(),
            content: "Create a detailed outline for a blog post titled [title]. \
                      Include an introduction, [section_count] sections and a conclusion."
                .to_string(),
            category: "Content".to_string(),
            icon: PromptIcon::Sparkles,
            usage: 876,
            success: 801,
            created_at: date(2023, 12, 1),
            updated_at: date(2024, 1, 8),
            performance: history(first_day, HISTORY_DAYS, 45, 25, 0.91, 3),
        },
        Prompt {
            id: PromptId::from("code-review"),
            name: "Code Review Assistant".to_string(),
            description: "Reviews a diff and points out bugs and style issues".to_string(),
            content: "Review the following [language] change. List correctness issues first, \
                      then style suggestions:\n[diff]"
                .to_string(),
            category: "Development".to_string(),
            icon: PromptIcon::Code,
            usage: 1532,
            success: 1489,
            created_at: date(2023, 9, 18),
            updated_at: date(2024, 1, 14),
            performance: history(first_day, HISTORY_DAYS, 95, 35, 0.96, 4),
        },
        Prompt {
            id: PromptId::from("launch-email"),
            name: "Email Campaign Writer".to_string(),
            description: "Drafts launch emails announcing a new product".to_string(),
            content: "Write a launch email for [product_name] aimed at [segment]. \
                      Keep it under [word_limit] words and end with [call_to_action]."
                .to_string(),
            category: "Marketing".to_string(),
            icon: PromptIcon::Mail,
            usage: 945,
            success: 884,
            created_at: date(2024, 1, 6),
            updated_at: date(2024, 1, 13),
            performance: history(late_start, HISTORY_DAYS - 5, 60, 20, 0.93, 5),
        },
        Prompt {
            id: PromptId::from("troubleshooting-guide"),
            name: "Troubleshooting Guide".to_string(),
            description: "Turns a known issue into step-by-step fix instructions".to_string(),
            content: "Given the issue [issue_summary] on [platform], write numbered \
                      troubleshooting steps a non-technical user can follow."
                .to_string(),
            category: "Support".to_string(),
            icon: PromptIcon::Bot,
            usage: 654,
            success: 591,
            created_at: date(2024, 1, 6),
            updated_at: date(2024, 1, 11),
            performance: history(late_start, HISTORY_DAYS - 5, 40, 20, 0.9, 6),
        },
    ]
}
