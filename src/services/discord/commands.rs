use serenity::model::mention::Mentionable;
use serenity::model::user::User;

use crate::services::runner::{BoxError, Invocation};

use super::messages::ChannelReplier;
use super::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    /// Hidden; triggered by message edits
    RunAfterEdit,
    /// Hidden; also shown by `run` without a language
    RunHelp,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Run => "run",
            Command::RunAfterEdit => "run_after_edit",
            Command::RunHelp => "runhelp",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "run" => Some(Command::Run),
            "run_after_edit" => Some(Command::RunAfterEdit),
            "runhelp" => Some(Command::RunHelp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub command: Command,
    /// First whitespace-delimited argument, if any
    pub language: Option<String>,
}

/// Strip the first matching prefix, ignoring ASCII case.
fn strip_prefix_ci<'a>(content: &'a str, prefixes: &[String]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| {
        let head = content.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            content.get(prefix.len()..)
        } else {
            None
        }
    })
}

/// Recognise `<prefix>run [language]`, `<prefix>run_after_edit [language]`, `<prefix>runhelp`.
pub fn parse_command(content: &str, prefixes: &[String]) -> Option<CommandCall> {
    let rest = strip_prefix_ci(content, prefixes)?;
    let mut tokens = rest.split_whitespace();
    let command = Command::from_word(tokens.next()?)?;
    let language = tokens.next().map(str::to_string);
    Some(CommandCall { command, language })
}

/// Edit filter: should this edited message re-run its code?
/// Second word must be `run` and the text must start with `<prefix>run`.
pub fn rerun_requested(content: &str, prefixes: &[String]) -> bool {
    let lower = content.to_ascii_lowercase();
    if lower.split_whitespace().nth(1) != Some("run") {
        return false;
    }
    prefixes.iter().any(|p| lower.starts_with(&format!("{}run", p.to_ascii_lowercase())))
}

fn invocation(author: &User, content: &str, language: Option<String>) -> Invocation {
    Invocation {
        user_id: author.id.get(),
        mention: author.mention().to_string(),
        content: content.to_string(),
        language,
    }
}

/// Handle `run [language]`
pub async fn handle_run(
    replier: &ChannelReplier,
    author: &User,
    content: &str,
    language: Option<String>,
    state: &SharedState,
) -> Result<(), BoxError> {
    state.runner.run(&invocation(author, content, language), replier).await
}

/// Handle `run_after_edit [language]`
pub async fn handle_run_after_edit(
    replier: &ChannelReplier,
    author: &User,
    content: &str,
    language: Option<String>,
    state: &SharedState,
) -> Result<(), BoxError> {
    state.runner.run_after_edit(&invocation(author, content, language), replier).await
}

/// Handle `runhelp`
pub async fn handle_runhelp(
    replier: &ChannelReplier,
    state: &SharedState,
) -> Result<(), BoxError> {
    state.runner.runhelp(replier).await
}
