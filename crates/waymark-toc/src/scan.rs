//! Single-pass scan over a fetched page body.
//!
//! Collects everything the TOC builder and the metadata synchronizer need
//! from a document fragment: headings in document order, the splice point
//! after the first H1, the first paragraph text, and whether a build-time
//! TOC is already embedded. Malformed markup degrades to a partial scan
//! rather than an error; headings that were not reached simply won't be
//! found.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::toc::HeadingLevel;

/// One H2/H3/H4 heading found in the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedHeading {
    /// Heading level.
    pub level: HeadingLevel,
    /// Text content with inline markup flattened, trimmed.
    pub text: String,
    /// Value of an `id` attribute already present on the element.
    pub existing_id: Option<String>,
    /// Byte span of the opening tag (`<h2 ...>`) in the body.
    pub tag_span: (usize, usize),
    /// 0-based position among all scanned headings.
    pub ordinal: usize,
}

/// Result of scanning a page body.
#[derive(Clone, Debug, Default)]
pub struct PageScan {
    /// H2/H4 headings in document order (before category-label exclusion).
    pub headings: Vec<ScannedHeading>,
    /// Byte offset just past the first `</h1>`, if the body has an H1.
    pub first_h1_end: Option<usize>,
    /// Text of the first H1, for title synchronization.
    pub first_h1_text: Option<String>,
    /// Text of the first paragraph outside any embedded TOC.
    pub first_paragraph: Option<String>,
    /// True if the body already carries a `table-of-contents` nav.
    pub has_existing_toc: bool,
    /// True if the embedded TOC already has a navigation section.
    pub has_nav_section: bool,
}

fn heading_level(name: &[u8]) -> Option<HeadingLevel> {
    match name {
        b"h2" => Some(HeadingLevel::H2),
        b"h3" => Some(HeadingLevel::H3),
        b"h4" => Some(HeadingLevel::H4),
        _ => None,
    }
}

fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes().filter_map(Result::ok).find_map(|attr| {
        (attr.key.as_ref() == name)
            .then(|| attr.unescape_value().ok().map(std::borrow::Cow::into_owned))
            .flatten()
    })
}

fn decode_entity(entity: &str) -> String {
    match entity {
        "amp" => "&".to_owned(),
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "quot" => "\"".to_owned(),
        "apos" => "'".to_owned(),
        "nbsp" => " ".to_owned(),
        other => format!("&{other};"),
    }
}

/// Scan a page body fragment in a single pass.
#[must_use]
#[allow(clippy::too_many_lines, clippy::cast_possible_truncation)]
pub fn scan_page(body: &str) -> PageScan {
    let mut scan = PageScan::default();

    let mut reader = Reader::from_str(body);
    reader.config_mut().check_end_names = false;

    // Collection state. `toc_depth` > 0 while inside an embedded TOC nav,
    // where headings and paragraphs must not be collected.
    let mut toc_depth: usize = 0;
    let mut current_heading: Option<(HeadingLevel, Option<String>, (usize, usize))> = None;
    let mut heading_text = String::new();
    let mut in_h1 = false;
    let mut h1_text = String::new();
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    let mut buf = Vec::new();
    loop {
        let pos_before = reader.buffer_position() as usize;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if toc_depth > 0 {
                    if name == b"nav" {
                        toc_depth += 1;
                    }
                    buf.clear();
                    continue;
                }
                if name == b"nav" {
                    let class = attr_value(&e, b"class").unwrap_or_default();
                    if class.split_whitespace().any(|c| c == "table-of-contents") {
                        scan.has_existing_toc = true;
                        // The navigation section marker lives inside the nav
                        toc_depth = 1;
                    }
                } else if let Some(level) = heading_level(name) {
                    let span = (pos_before, reader.buffer_position() as usize);
                    current_heading = Some((level, attr_value(&e, b"id"), span));
                    heading_text.clear();
                } else if name == b"h1" && scan.first_h1_end.is_none() {
                    in_h1 = true;
                    h1_text.clear();
                } else if name == b"p" && scan.first_paragraph.is_none() {
                    in_paragraph = true;
                    paragraph_text.clear();
                }
            }
            Ok(Event::Text(e)) => {
                if toc_depth > 0 {
                    buf.clear();
                    continue;
                }
                if let Ok(text) = reader.decoder().decode(&e) {
                    if current_heading.is_some() {
                        heading_text.push_str(&text);
                    } else if in_h1 {
                        h1_text.push_str(&text);
                    } else if in_paragraph {
                        paragraph_text.push_str(&text);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if toc_depth > 0 {
                    buf.clear();
                    continue;
                }
                if let Ok(entity) = reader.decoder().decode(&e) {
                    let text = decode_entity(&entity);
                    if current_heading.is_some() {
                        heading_text.push_str(&text);
                    } else if in_h1 {
                        h1_text.push_str(&text);
                    } else if in_paragraph {
                        paragraph_text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if toc_depth > 0 {
                    if name == b"nav" {
                        toc_depth -= 1;
                    }
                    buf.clear();
                    continue;
                }
                if heading_level(name).is_some()
                    && let Some((level, existing_id, tag_span)) = current_heading.take()
                {
                    let ordinal = scan.headings.len();
                    scan.headings.push(ScannedHeading {
                        level,
                        text: heading_text.trim().to_owned(),
                        existing_id,
                        tag_span,
                        ordinal,
                    });
                } else if name == b"h1" && in_h1 {
                    in_h1 = false;
                    scan.first_h1_end = Some(reader.buffer_position() as usize);
                    scan.first_h1_text = Some(h1_text.trim().to_owned());
                } else if name == b"p" && in_paragraph {
                    in_paragraph = false;
                    let text = paragraph_text.trim().to_owned();
                    if !text.is_empty() {
                        scan.first_paragraph = Some(text);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "page body parse error, partial scan");
                break;
            }
        }
        buf.clear();
    }

    if scan.has_existing_toc {
        scan.has_nav_section = body.contains(r#"data-section="navigation""#);
    }

    scan
}
