/// Extraction of the language token and fenced code body from a chat message.

pub const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// No language argument at all: the caller shows help instead of running.
    ShowHelp,
    Code { alias: String, source: String },
    /// Language given but no complete fenced block
    MalformedInput { alias: String },
}

impl Parsed {
    /// `(alias, source)` for a run request, `None` when help should be shown.
    pub fn into_parts(self) -> Option<(String, Option<String>)> {
        match self {
            Parsed::ShowHelp => None,
            Parsed::Code { alias, source } => Some((alias, Some(source))),
            Parsed::MalformedInput { alias } => Some((alias, None)),
        }
    }
}

/// Remove every literal fence marker from the language token,
/// so "```python" typed right after the command still resolves.
pub fn strip_fence_markers(token: &str) -> String {
    token.replace(FENCE, "")
}

/// Pull the code body out of the first fenced block.
/// Needs an opening and a closing fence (at least 3 segments).
/// The rest of the opening fence line (language tag) is dropped.
pub fn extract_source(raw: &str) -> Option<String> {
    let mut segments = raw.split(FENCE);
    segments.next()?;
    let body = segments.next()?;
    segments.next()?;

    let body = match body.find('\n') {
        Some(pos) => &body[pos + 1..],
        None => body,
    };
    Some(body.trim().to_string())
}

pub fn parse(raw: &str, language_arg: Option<&str>) -> Parsed {
    let Some(language) = language_arg.filter(|l| !l.is_empty()) else {
        return Parsed::ShowHelp;
    };
    let alias = strip_fence_markers(language);
    match extract_source(raw) {
        Some(source) => Parsed::Code { alias, source },
        None => Parsed::MalformedInput { alias },
    }
}
