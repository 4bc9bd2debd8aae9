//! Markdown to HTML fragment rendering.
//!
//! A reduced event-loop renderer over `pulldown-cmark`. Headings are
//! written without ids; anchor ids are assigned later by the TOC injector
//! so build-time and view-time ids come from one place.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use waymark_toc::escape_html;

/// Result of rendering one markdown page.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Title extracted from the first H1 heading.
    pub title: Option<String>,
}

/// Markdown page renderer with GFM enabled by default.
pub struct PageRenderer {
    output: String,
    /// Open heading: level plus buffered inline HTML and plain text.
    heading: Option<(u8, String, String)>,
    title: Option<String>,
    code_lang: Option<String>,
    code_buf: Option<String>,
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
    gfm: bool,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            heading: None,
            title: None,
            code_lang: None,
            code_buf: None,
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render a markdown page to an HTML fragment.
    pub fn render(&mut self, markdown: &str) -> RenderResult {
        for event in Parser::new_ext(markdown, self.parser_options()) {
            self.process_event(event);
        }
        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.title.take(),
        }
    }

    /// Push inline content to the open heading buffer or the output.
    fn push_inline(&mut self, html: &str, text: &str) {
        match &mut self.heading {
            Some((_, buf_html, buf_text)) => {
                buf_html.push_str(html);
                buf_text.push_str(text);
            }
            None => self.output.push_str(html),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if let Some(buf) = &mut self.code_buf {
                    buf.push_str(&text);
                } else {
                    self.push_inline(&escape_html(&text), &text);
                }
            }
            Event::Code(code) => {
                let html = format!("<code>{}</code>", escape_html(&code));
                self.push_inline(&html, &code);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html, ""),
            Event::SoftBreak => self.push_inline("\n", " "),
            Event::HardBreak => self.push_inline("<br />", " "),
            Event::Rule => self.output.push_str("<hr />"),
            Event::TaskListMarker(checked) => {
                let checked = if checked { " checked" } else { "" };
                let _ = write!(
                    self.output,
                    "<input type=\"checkbox\" disabled{checked} /> "
                );
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                self.heading = Some((*level as u8, String::new(), String::new()));
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                self.code_lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => {
                        Some(info.split_whitespace().next().unwrap_or_default().to_owned())
                    }
                    _ => None,
                };
                self.code_buf = Some(String::new());
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, "<ol start=\"{n}\">");
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.alignments.clone_from(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.cell_index = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.in_table_head { "th" } else { "td" };
                let align = match self.alignments.get(self.cell_index) {
                    Some(Alignment::Left) => " style=\"text-align: left\"",
                    Some(Alignment::Center) => " style=\"text-align: center\"",
                    Some(Alignment::Right) => " style=\"text-align: right\"",
                    _ => "",
                };
                self.cell_index += 1;
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>", ""),
            Tag::Strong => self.push_inline("<strong>", ""),
            Tag::Strikethrough => self.push_inline("<s>", ""),
            Tag::Link { dest_url, .. } => {
                let html = format!("<a href=\"{}\">", escape_html(dest_url));
                self.push_inline(&html, "");
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(" title=\"{}\"", escape_html(title))
                };
                let html = format!("<img src=\"{}\"{title_attr} alt=\"", escape_html(dest_url));
                self.push_inline(&html, "");
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, html, text)) = self.heading.take() {
                    if level == 1 && self.title.is_none() {
                        self.title = Some(text.trim().to_owned());
                    }
                    let _ = write!(self.output, "<h{level}>{}</h{level}>", html.trim());
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let content = self.code_buf.take().unwrap_or_default();
                let class = match self.code_lang.take() {
                    Some(lang) => format!(" class=\"language-{}\"", escape_html(&lang)),
                    None => String::new(),
                };
                let _ = write!(
                    self.output,
                    "<pre><code{class}>{}</code></pre>",
                    escape_html(&content)
                );
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let tag = if self.in_table_head { "th" } else { "td" };
                let _ = write!(self.output, "</{tag}>");
            }
            TagEnd::Emphasis => self.push_inline("</em>", ""),
            TagEnd::Strong => self.push_inline("</strong>", ""),
            TagEnd::Strikethrough => self.push_inline("</s>", ""),
            TagEnd::Link => self.push_inline("</a>", ""),
            TagEnd::Image => self.push_inline("\" />", ""),
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }
}
