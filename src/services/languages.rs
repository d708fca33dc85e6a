/// Language aliases accepted by `run`, mapped to Piston's canonical identifiers.

/// (alias typed by the user, identifier Piston expects)
pub const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("asm",        "nasm"),
    ("awk",        "awk"),
    ("bash",       "bash"),
    ("bf",         "brainfuck"),
    ("brainfuck",  "brainfuck"),
    ("c",          "c"),
    ("c#",         "csharp"),
    ("c++",        "cpp"),
    ("cpp",        "cpp"),
    ("cs",         "csharp"),
    ("csharp",     "csharp"),
    ("duby",       "ruby"),
    ("go",         "go"),
    ("java",       "java"),
    ("javascript", "javascript"),
    ("jl",         "julia"),
    ("julia",      "julia"),
    ("js",         "javascript"),
    ("nasm",       "nasm"),
    ("node",       "javascript"),
    ("php",        "php"),
    ("php3",       "php"),
    ("php4",       "php"),
    ("php5",       "php"),
    ("py",         "python3"),
    ("py3",        "python3"),
    ("python",     "python3"),
    ("python2",    "python2"),
    ("python3",    "python3"),
    ("r",          "r"),
    ("rb",         "ruby"),
    ("ruby",       "ruby"),
    ("rs",         "rust"),
    ("rust",       "rust"),
    ("sage",       "python3"),
    ("swift",      "swift"),
    ("ts",         "typescript"),
    ("typescript", "typescript"),
];

/// Resolve a user alias to the canonical identifier. Case-sensitive.
pub fn resolve(alias: &str) -> Option<&'static str> {
    LANGUAGE_ALIASES.iter()
        .find(|(a, _)| *a == alias)
        .map(|(_, canonical)| *canonical)
}

/// Distinct canonical identifiers, sorted.
pub fn list_canonical() -> Vec<&'static str> {
    let mut langs: Vec<&'static str> = LANGUAGE_ALIASES.iter().map(|(_, c)| *c).collect();
    langs.sort_unstable();
    langs.dedup();
    langs
}

/// Canonical identifiers grouped by first letter, e.g. `["awk", "bash/brainfuck", ...]`.
pub fn grouped_by_initial() -> Vec<String> {
    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut last: Option<char> = None;
    for lang in list_canonical() {
        let initial = lang.chars().next().map(|c| c.to_ascii_lowercase());
        match groups.last_mut() {
            Some(group) if initial == last => group.push(lang),
            _ => groups.push(vec![lang]),
        }
        last = initial;
    }
    groups.into_iter().map(|g| g.join("/")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_alias() {
        for (alias, canonical) in LANGUAGE_ALIASES {
            assert_eq!(resolve(alias), Some(*canonical), "alias {alias}");
        }
    }

    #[test]
    fn test_resolve_python_family() {
        assert_eq!(resolve("py"), Some("python3"));
        assert_eq!(resolve("py3"), Some("python3"));
        assert_eq!(resolve("python"), Some("python3"));
        assert_eq!(resolve("python2"), Some("python2"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve("cobol"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_resolve_case_sensitive() {
        assert_eq!(resolve("Python"), None);
        assert_eq!(resolve("PY"), None);
    }

    #[test]
    fn test_no_duplicate_aliases() {
        let mut aliases: Vec<&str> = LANGUAGE_ALIASES.iter().map(|(a, _)| *a).collect();
        let total = aliases.len();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), total);
    }

    #[test]
    fn test_list_canonical_sorted_distinct() {
        let langs = list_canonical();
        assert_eq!(langs.first(), Some(&"awk"));
        assert_eq!(langs.last(), Some(&"typescript"));
        assert!(langs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(langs.iter().filter(|l| **l == "python3").count(), 1);
    }

    #[test]
    fn test_grouped_by_initial() {
        let groups = grouped_by_initial();
        assert!(groups.contains(&"bash/brainfuck".to_string()));
        assert!(groups.contains(&"c/cpp/csharp".to_string()));
        assert!(groups.contains(&"php/python2/python3".to_string()));
        assert!(groups.contains(&"r/ruby/rust".to_string()));
        assert_eq!(groups.join("/").split('/').count(), list_canonical().len());
    }
}
