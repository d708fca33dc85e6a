/// Turns execution results into chat replies.

use crate::services::languages;
use crate::services::piston::{BackendFailure, ExecutionResult};
use crate::services::utils::floor_char_boundary;

/// Output lines shown per reply; the rest is dropped without a marker.
pub const MAX_OUTPUT_LINES: usize = 30;

/// Discord message length limit
pub const REPLY_LIMIT: usize = 2000;

pub const HELP_TITLE: &str = "I can run code";
pub const HELP_COLOUR: u32 = 0x2ECC71;

const CLOSING_FENCE: &str = "```";

pub fn format(result: &ExecutionResult, mention: &str) -> String {
    match result {
        ExecutionResult::Success { lines } => format_output(lines, mention),
        ExecutionResult::UnsupportedLanguage { alias } => {
            format!("`Unsupported language: {alias}`")
        }
        ExecutionResult::MalformedInput => "`No code or invalid code present`".to_string(),
        ExecutionResult::BackendError { reason: BackendFailure::InvalidResponse } => {
            "`Sorry, invalid response from Piston server`".to_string()
        }
        ExecutionResult::BackendError { reason: BackendFailure::ExecutionProblem } => {
            "`Sorry, execution problem`".to_string()
        }
    }
}

fn format_output(lines: &[String], mention: &str) -> String {
    let header = format!("Here is your output {mention}\n```\n");
    let shown = &lines[..lines.len().min(MAX_OUTPUT_LINES)];
    let body = shown.join("\n");

    // Long lines can still blow the message limit; cut so the fence stays closed
    let room = REPLY_LIMIT.saturating_sub(header.len() + CLOSING_FENCE.len());
    let body = &body[..floor_char_boundary(&body, room)];

    format!("{header}{body}{CLOSING_FENCE}")
}

/// Help embed description: supported languages and a usage example.
pub fn help_text(prefix: &str) -> String {
    format!(
        "**Here are my supported languages:**\n{}\n\n\
         **You can run code like this:**\n\
         {prefix}run python\n\
         \\`\\`\\`python\nyour code\n\\`\\`\\`\n",
        languages::grouped_by_initial().join("\n"),
    )
}
