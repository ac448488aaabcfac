//! Built-in exclusion tables applied unless disabled in configuration.

/// A message pattern excluded by default because it is noisy in practice.
#[derive(Debug, Clone, Copy)]
pub struct DefaultExcludePattern {
    pub id: &'static str,
    pub pattern: &'static str,
    pub engine: &'static str,
    pub why: &'static str,
}

pub const DEFAULT_EXCLUDE_PATTERNS: &[DefaultExcludePattern] = &[
    DefaultExcludePattern {
        id: "EXC0001",
        pattern: r"error return value of .((std(out|err)\..*)|.*close|.*flush|.*print(f|ln)?). is not checked",
        engine: "errcheck",
        why: "Almost all programs ignore errors on these functions",
    },
    DefaultExcludePattern {
        id: "EXC0002",
        pattern: r"(comment on exported (method|function|type|const)|should have( a package)? comment|comment should be of the form)",
        engine: "doc",
        why: "Annoying issue about not having a comment",
    },
    DefaultExcludePattern {
        id: "EXC0003",
        pattern: r"should have a package comment",
        engine: "doc",
        why: "Annoying issue about not having a comment",
    },
    DefaultExcludePattern {
        id: "EXC0004",
        pattern: r"(possible misuse of unsafe\.Pointer|should have signature)",
        engine: "vet",
        why: "Common false positives",
    },
    DefaultExcludePattern {
        id: "EXC0005",
        pattern: r"ineffective break statement\. Did you mean to break out of the outer loop",
        engine: "staticcheck",
        why: "Developers tend to write in C-style with an explicit 'break' in a 'switch', so it's ok to ignore",
    },
];

/// Directory patterns skipped unless `use_default_skip_dirs` is off.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    r"(^|/)vendor($|/)",
    r"(^|/)third_party($|/)",
    r"(^|/)testdata($|/)",
    r"(^|/)examples($|/)",
    r"(^|/)node_modules($|/)",
    r"(^|/)builtin($|/)",
];

pub fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS
        .iter()
        .map(|p| p.pattern.to_string())
        .collect()
}

pub fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_default_patterns_compile() {
        for p in DEFAULT_EXCLUDE_PATTERNS {
            assert!(Regex::new(p.pattern).is_ok(), "{} does not compile", p.id);
        }
        for d in DEFAULT_SKIP_DIRS {
            assert!(Regex::new(d).is_ok(), "{d} does not compile");
        }
    }

    #[test]
    fn test_default_ids_are_unique() {
        let mut ids: Vec<_> = DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DEFAULT_EXCLUDE_PATTERNS.len());
    }
}
