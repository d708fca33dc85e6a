use super::commands::{parse_command, rerun_requested, Command, CommandCall};

fn prefixes() -> Vec<String> {
    vec!["felix ".to_string()]
}

// --- parse_command ---

#[test]
fn test_parse_run_with_language() {
    let call = parse_command("felix run python\n```python\nprint(1)\n```", &prefixes());
    assert_eq!(call, Some(CommandCall { command: Command::Run, language: Some("python".to_string()) }));
}

#[test]
fn test_parse_run_without_language() {
    let call = parse_command("felix run", &prefixes());
    assert_eq!(call, Some(CommandCall { command: Command::Run, language: None }));
}

#[test]
fn test_parse_run_fence_on_same_line() {
    let call = parse_command("felix run ```py\nprint(1)\n```", &prefixes());
    assert_eq!(call.and_then(|c| c.language), Some("```py".to_string()));
}

#[test]
fn test_parse_prefix_case_insensitive() {
    let call = parse_command("Felix RUN py", &prefixes());
    assert_eq!(call.map(|c| c.command), Some(Command::Run));
}

#[test]
fn test_parse_hidden_commands() {
    assert_eq!(parse_command("felix runhelp", &prefixes()).map(|c| c.command), Some(Command::RunHelp));
    assert_eq!(
        parse_command("felix run_after_edit js", &prefixes()).map(|c| c.command),
        Some(Command::RunAfterEdit)
    );
}

#[test]
fn test_parse_ignores_other_messages() {
    assert_eq!(parse_command("hello there", &prefixes()), None);
    assert_eq!(parse_command("felix help", &prefixes()), None);
    assert_eq!(parse_command("felix", &prefixes()), None);
    assert_eq!(parse_command("", &prefixes()), None);
}

#[test]
fn test_parse_multibyte_content_shorter_than_prefix() {
    assert_eq!(parse_command("한글", &prefixes()), None);
}

#[test]
fn test_parse_second_prefix() {
    let prefixes = vec!["felix ".to_string(), "f!".to_string()];
    assert_eq!(parse_command("f!runhelp", &prefixes).map(|c| c.command), Some(Command::RunHelp));
}

// --- rerun_requested ---

#[test]
fn test_rerun_requested() {
    assert!(rerun_requested("felix run py\n```py\nprint(2)\n```", &prefixes()));
    assert!(rerun_requested("FELIX Run py", &prefixes()));
}

#[test]
fn test_rerun_single_token_is_ignored() {
    assert!(!rerun_requested("felix", &prefixes()));
    assert!(!rerun_requested("", &prefixes()));
}

#[test]
fn test_rerun_other_command_is_ignored() {
    assert!(!rerun_requested("felix runhelp", &prefixes()));
    assert!(!rerun_requested("felix help run", &prefixes()));
}

#[test]
fn test_rerun_wrong_prefix_is_ignored() {
    assert!(!rerun_requested("please run this", &prefixes()));
}

#[test]
fn test_rerun_and_parse_agree_on_non_ascii_prefix() {
    let prefixes = vec!["FÉLIX ".to_string()];
    for content in ["félix run py", "FÉLIX run py"] {
        assert_eq!(
            rerun_requested(content, &prefixes),
            parse_command(content, &prefixes).is_some(),
            "{content}"
        );
    }
    assert!(rerun_requested("FÉLIX RUN py", &prefixes));
}

// --- Command ---

#[test]
fn test_command_names() {
    assert_eq!(Command::Run.name(), "run");
    assert_eq!(Command::RunAfterEdit.name(), "run_after_edit");
    assert_eq!(Command::RunHelp.name(), "runhelp");
}
