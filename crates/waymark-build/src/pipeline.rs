//! Build orchestration over a source directory.
//!
//! Source layout: `nav.md` (the navigation bullet list) plus one markdown
//! file per content key. Output layout matches what the router consumes:
//!
//! ```text
//! {output}/
//! +-- nav.html             sidebar component
//! +-- sitemap.xml
//! +-- content/
//!     +-- {key}.html       one fragment per page
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use waymark_nav::NavTree;

use crate::{
    BuildError, LintIssue, PageRenderer, compose_nav, inject_toc, lint_fragment, write_sitemap,
};

const NAV_SOURCE: &str = "nav.md";

/// Counts from one build run.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildSummary {
    /// Pages rendered and written.
    pub pages: usize,
    /// Urls in the sitemap.
    pub sitemap_urls: usize,
}

/// Static build pipeline.
pub struct Pipeline {
    source_dir: PathBuf,
    output_dir: PathBuf,
    base_url: String,
}

impl Pipeline {
    #[must_use]
    pub fn new(source_dir: PathBuf, output_dir: PathBuf, base_url: impl Into<String>) -> Self {
        Self {
            source_dir,
            output_dir,
            base_url: base_url.into(),
        }
    }

    /// Markdown page sources, sorted by key for deterministic output.
    fn page_sources(&self) -> Result<Vec<(String, PathBuf)>, BuildError> {
        let entries = fs::read_dir(&self.source_dir)
            .map_err(|e| BuildError::io(&self.source_dir, e))?
            .filter_map(Result::ok);

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.file_name().is_some_and(|name| name == NAV_SOURCE) {
                continue;
            }
            sources.push((stem.to_owned(), path.clone()));
        }
        sources.sort();
        Ok(sources)
    }

    fn read(&self, path: &Path) -> Result<String, BuildError> {
        fs::read_to_string(path).map_err(|e| BuildError::io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), BuildError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| BuildError::io(path, e))
    }

    /// Render one page source to its final fragment.
    fn render_page(&self, path: &Path) -> Result<String, BuildError> {
        let markdown = self.read(path)?;
        let result = PageRenderer::new().render(&markdown);
        Ok(inject_toc(&result.html))
    }

    /// Run the full build: nav, pages, sitemap.
    ///
    /// # Errors
    ///
    /// Fails on unreadable sources, unwritable output, or a navigation
    /// source without a list.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let nav_markdown = self.read(&self.source_dir.join(NAV_SOURCE))?;
        let nav_markup = compose_nav(&nav_markdown)?;
        self.write(&self.output_dir.join("nav.html"), &nav_markup)?;

        let tree = NavTree::parse(&nav_markup);
        let mut summary = BuildSummary::default();

        for (key, path) in self.page_sources()? {
            let fragment = self.render_page(&path)?;
            if tree.get(&key).is_none() {
                tracing::warn!(key, "page has no navigation entry");
            }
            self.write(
                &self.output_dir.join("content").join(format!("{key}.html")),
                &fragment,
            )?;
            summary.pages += 1;
            tracing::debug!(key, "page written");
        }

        let sitemap = write_sitemap(&tree, &self.base_url)?;
        self.write(&self.output_dir.join("sitemap.xml"), &sitemap)?;
        summary.sitemap_urls = sitemap.matches("<url>").count();

        Ok(summary)
    }

    /// Render every page and run the lint rules, without writing output.
    ///
    /// # Errors
    ///
    /// Fails on unreadable sources.
    pub fn check(&self) -> Result<Vec<(String, Vec<LintIssue>)>, BuildError> {
        let mut findings = Vec::new();
        for (key, path) in self.page_sources()? {
            let fragment = self.render_page(&path)?;
            let issues = lint_fragment(&fragment);
            if !issues.is_empty() {
                findings.push((key, issues));
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn seed_site(dir: &TempDir) -> PathBuf {
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();
        fs::write(
            source.join("nav.md"),
            "- [Home](#home)\n- [Guide](#guide)\n  - [Install](#guide-install)\n",
        )
        .unwrap();
        fs::write(source.join("home.md"), "# Home\n\nWelcome.\n").unwrap();
        fs::write(
            source.join("guide.md"),
            "# Guide\n\nIntro.\n\n## Setup\n\nSteps.\n",
        )
        .unwrap();
        fs::write(source.join("guide-install.md"), "# Install\n").unwrap();
        source
    }

    #[test]
    fn test_build_writes_site_layout() {
        let dir = TempDir::new().unwrap();
        let source = seed_site(&dir);
        let output = dir.path().join("site");

        let summary = Pipeline::new(source, output.clone(), "https://docs.test/")
            .build()
            .unwrap();

        assert_eq!(summary.pages, 3);
        assert_eq!(summary.sitemap_urls, 3);
        assert!(output.join("nav.html").exists());
        assert!(output.join("sitemap.xml").exists());
        assert!(output.join("content/home.html").exists());

        let guide = fs::read_to_string(output.join("content/guide.html")).unwrap();
        assert!(guide.contains(r#"<h2 id="setup">"#));
        assert!(guide.contains("table-of-contents"));
    }

    #[test]
    fn test_built_nav_is_router_compatible() {
        let dir = TempDir::new().unwrap();
        let source = seed_site(&dir);
        let output = dir.path().join("site");

        Pipeline::new(source, output.clone(), "https://docs.test/")
            .build()
            .unwrap();

        let markup = fs::read_to_string(output.join("nav.html")).unwrap();
        let tree = NavTree::parse(&markup);
        assert_eq!(tree.first_top_level(), "home");
        assert!(tree.get("guide").unwrap().has_children);
    }

    #[test]
    fn test_check_reports_lint_findings() {
        let dir = TempDir::new().unwrap();
        let source = seed_site(&dir);
        fs::write(source.join("broken.md"), "## No Title Here\n").unwrap();

        let findings = Pipeline::new(source, dir.path().join("site"), "https://docs.test/")
            .check()
            .unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].0, "broken");
        assert_eq!(findings[0].1[0].rule, "H1_MISSING");
    }

    #[test]
    fn test_build_without_nav_errors() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();

        let err = Pipeline::new(source, dir.path().join("site"), "https://docs.test/")
            .build()
            .unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
    }
}
