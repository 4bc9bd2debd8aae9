//! Content lint rules over built fragments.
//!
//! Regex-driven checks guarding the pipeline's own invariants: pages need
//! one H1 for title material, headings must not masquerade as category
//! labels, and anchors must carry a destination the router can follow.

use std::sync::LazyLock;

use regex::Regex;

/// Severity of a lint finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LintSeverity {
    Warning,
    Error,
}

/// One lint finding for a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintIssue {
    /// Rule identifier, stable for report filtering.
    pub rule: &'static str,
    pub severity: LintSeverity,
    pub message: String,
}

impl LintIssue {
    fn warning(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: LintSeverity::Warning,
            message: message.into(),
        }
    }

    fn error(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: LintSeverity::Error,
            message: message.into(),
        }
    }
}

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([1-6])[^>]*>(.*?)</h[1-6]\s*>").unwrap_or_else(|e| panic!("{e}"))
});
static EMPTY_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(?i)<a\s+(?:[^>]*\s)?href="#"(?:\s[^>]*)?>"##).unwrap_or_else(|e| panic!("{e}"))
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap_or_else(|e| panic!("{e}")));

fn flatten(html: &str) -> String {
    TAG.replace_all(html, "").trim().to_owned()
}

/// Run every lint rule over one built fragment.
#[must_use]
pub fn lint_fragment(fragment: &str) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    let headings: Vec<(u8, String)> = HEADING
        .captures_iter(fragment)
        .map(|cap| {
            let level = cap[1].as_bytes()[0] - b'0';
            (level, flatten(&cap[2]))
        })
        .collect();

    let h1_count = headings.iter().filter(|(level, _)| *level == 1).count();
    if h1_count == 0 {
        issues.push(LintIssue::warning(
            "H1_MISSING",
            "No <h1> found. Pages need one <h1> for title material.",
        ));
    } else if h1_count > 1 {
        issues.push(LintIssue::error(
            "H1_MULTIPLE",
            format!("Found {h1_count} <h1> tags. Pages should have exactly one."),
        ));
    }

    if let Some(h1_at) = headings.iter().position(|(level, _)| *level == 1)
        && let Some((level, text)) = headings[..h1_at].first()
    {
        issues.push(LintIssue::error(
            "H1_ORDER",
            format!("<h{level}> \"{text}\" appears before the first <h1>."),
        ));
    }

    for (level, text) in &headings {
        if *level > 1 && text.trim_end().ends_with(':') {
            issues.push(LintIssue::warning(
                "HEADING_CATEGORY_LABEL",
                format!("<h{level}> \"{text}\" ends with ':' and will be dropped from the TOC."),
            ));
        }
    }

    for m in EMPTY_ANCHOR.find_iter(fragment) {
        if !m.as_str().contains("data-content") {
            issues.push(LintIssue::warning(
                "EMPTY_ANCHOR",
                "Anchor with href=\"#\" and no data-content key goes nowhere.".to_owned(),
            ));
        }
    }

    issues
}
