//! README presentation audit.

use std::sync::LazyLock;

use regex::Regex;

/// Default minimum number of `##` sections.
pub const DEFAULT_MIN_SECTIONS: usize = 3;

/// One audit check with its verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditCheck {
    pub name: &'static str,
    pub passed: bool,
    pub notes: String,
}

impl AuditCheck {
    fn new(name: &'static str, passed: bool, notes: impl Into<String>) -> Self {
        Self {
            name,
            passed,
            notes: notes.into(),
        }
    }
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+\S+").expect("title pattern is valid"));
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.+)$").expect("section pattern is valid"));
static INSTALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\binstall\b|\bsetup\b|pip install|brew install")
        .expect("install pattern is valid")
});
static USAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\busage\b|\bquickstart\b|\bexamples?\b").expect("usage pattern is valid")
});
static LICENSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blicense\b").expect("license pattern is valid"));
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]+\)").expect("image pattern is valid"));
static BADGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)shields\.io|badge").expect("badge pattern is valid"));

/// Run every check against `text`, in display order.
pub fn audit_readme(text: &str, min_sections: usize) -> Vec<AuditCheck> {
    let t = text.trim();
    let sections = SECTION_RE.find_iter(t).count();

    vec![
        AuditCheck::new(
            "Title header",
            TITLE_RE.is_match(t),
            "Expected a '# Title' at the top.",
        ),
        AuditCheck::new(
            "Sections",
            sections >= min_sections,
            format!("Found {sections} '##' sections."),
        ),
        AuditCheck::new(
            "Install instructions",
            INSTALL_RE.is_match(t),
            "Look for 'pip install ...' or explicit setup steps.",
        ),
        AuditCheck::new(
            "Usage section",
            USAGE_RE.is_match(t),
            "Include a minimal command or example.",
        ),
        AuditCheck::new(
            "License mentioned",
            LICENSE_RE.is_match(t),
            "Mention license and include a LICENSE file.",
        ),
        AuditCheck::new(
            "Screenshot or image",
            IMAGE_RE.is_match(t),
            "One screenshot near the top helps adoption.",
        ),
        AuditCheck::new(
            "Badges",
            BADGE_RE.is_match(t),
            "Optional, but can help: CI, license, version, etc.",
        ),
    ]
}

/// Whether every check passed.
pub fn all_passed(checks: &[AuditCheck]) -> bool {
    checks.iter().all(|c| c.passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "# Title

## Install
pip install x

## Usage
do thing

## License
MIT

![img](x.png)
";

    fn passed(checks: &[AuditCheck], name: &str) -> bool {
        checks
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.passed)
            .unwrap_or(false)
    }

    #[test]
    fn test_audit_readme_basics() {
        let checks = audit_readme(FULL, DEFAULT_MIN_SECTIONS);
        for name in [
            "Title header",
            "Sections",
            "Install instructions",
            "Usage section",
            "License mentioned",
            "Screenshot or image",
        ] {
            assert!(passed(&checks, name), "{name} should pass");
        }
        // No badge in the sample.
        assert!(!passed(&checks, "Badges"));
        assert!(!all_passed(&checks));
    }

    #[test]
    fn test_empty_readme_fails_everything() {
        let checks = audit_readme("", DEFAULT_MIN_SECTIONS);
        assert_eq!(checks.len(), 7);
        assert!(checks.iter().all(|c| !c.passed));
        assert_eq!(checks[1].notes, "Found 0 '##' sections.");
    }

    #[test]
    fn test_min_sections_threshold() {
        let text = "# T\n\n## One\n\n## Two\n";
        assert!(passed(&audit_readme(text, 2), "Sections"));
        assert!(!passed(&audit_readme(text, 3), "Sections"));
    }

    #[test]
    fn test_subsection_headers_not_counted() {
        let text = "# T\n\n### Deep\n\n#### Deeper\n";
        let checks = audit_readme(text, 1);
        assert!(!passed(&checks, "Sections"));
        assert!(passed(&checks, "Title header"));
    }

    #[test]
    fn test_title_requires_single_hash() {
        let checks = audit_readme("## Only a section", 0);
        assert!(!passed(&checks, "Title header"));
    }

    #[test]
    fn test_words_are_case_insensitive_and_bounded() {
        let checks = audit_readme("See USAGE and Examples. Licensed under LICENSE.", 0);
        assert!(passed(&checks, "Usage section"));
        assert!(passed(&checks, "License mentioned"));
        // "installer" is not the word "install"
        assert!(!passed(&audit_readme("run the installer", 0), "Install instructions"));
        assert!(passed(&audit_readme("brew install devkit", 0), "Install instructions"));
    }

    #[test]
    fn test_badges_detected() {
        let text = "[![CI](https://img.shields.io/badge/ci-passing-green)](https://ci)";
        let checks = audit_readme(text, 0);
        assert!(passed(&checks, "Badges"));
        assert!(passed(&checks, "Screenshot or image"));
    }

    #[test]
    fn test_everything_passes() {
        let text = format!("{FULL}\n![badge](https://img.shields.io/badge/x-y-z)\n");
        assert!(all_passed(&audit_readme(&text, DEFAULT_MIN_SECTIONS)));
    }
}
