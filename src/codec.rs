//! OPML text codec: whole-document parse and serialize.
//!
//! Parsing classifies each outline element independently: an explicit
//! `type` attribute wins, otherwise the element is a folder when it has
//! nested outlines and a feed when it has none. Serialization is
//! deterministic (normalized attribute order and whitespace), so a
//! byte-identical round trip of arbitrary input is not guaranteed, but
//! node set, kinds, labels, URLs, and order survive `parse(serialize(t))`.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::errors::{OutlineError, OutlineResult};
use crate::outline::{Document, NodeKind, OutlineNode};

/// Fixed OPML format version emitted on the document wrapper.
pub const OPML_VERSION: &str = "2.0";
/// Head title used when no configured title is given.
pub const DEFAULT_EXPORT_TITLE: &str = "Exported OPML";

/// An outline element whose closing tag has not been seen yet.
struct PendingOutline {
    label: String,
    explicit_kind: Option<NodeKind>,
    feed_url: Option<String>,
    site_url: Option<String>,
    children: Vec<OutlineNode>,
}

impl PendingOutline {
    fn from_start(element: &BytesStart) -> OutlineResult<Self> {
        let mut label = None;
        let mut explicit_kind = None;
        let mut feed_url = None;
        let mut site_url = None;

        for attr in element.attributes() {
            let attr = attr.map_err(|e| OutlineError::Parse {
                reason: e.to_string(),
            })?;
            let value = attr
                .unescape_value()
                .map_err(|e| OutlineError::Parse {
                    reason: e.to_string(),
                })?
                .into_owned();
            match attr.key.local_name().as_ref() {
                b"text" => label = Some(value),
                b"type" => {
                    explicit_kind = Some(if value == "folder" {
                        NodeKind::Folder
                    } else {
                        NodeKind::Feed
                    });
                }
                b"xmlUrl" => feed_url = Some(value),
                b"htmlUrl" => site_url = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            // The model keeps labels non-optional; a missing text attribute
            // parses as an empty label. URL attributes stay absent.
            label: label.unwrap_or_default(),
            explicit_kind,
            feed_url,
            site_url,
            children: Vec::new(),
        })
    }

    fn into_node(self) -> OutlineNode {
        let kind = self.explicit_kind.unwrap_or(if self.children.is_empty() {
            NodeKind::Feed
        } else {
            NodeKind::Folder
        });
        match kind {
            NodeKind::Folder => OutlineNode::Folder {
                label: self.label,
                // Zero nested elements parse as an absent container, not an
                // empty one.
                children: if self.children.is_empty() {
                    None
                } else {
                    Some(self.children)
                },
            },
            // An explicit feed marker wins even over nested elements, which
            // are dropped: a feed never has children.
            NodeKind::Feed => OutlineNode::Feed {
                label: self.label,
                feed_url: self.feed_url,
                site_url: self.site_url,
            },
        }
    }
}

/// Parse an OPML document into an outline tree.
///
/// Only outline elements not nested inside another outline element become
/// root entries; everything else (declaration, head, title, body) is
/// structural wrapping and carries no data.
pub fn parse(text: &str) -> OutlineResult<Document> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<PendingOutline> = Vec::new();
    let mut roots: Vec<OutlineNode> = Vec::new();

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(OutlineError::Parse {
                    reason: e.to_string(),
                })
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"outline" => {
                stack.push(PendingOutline::from_start(&e)?);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"outline" => {
                let node = PendingOutline::from_start(&e)?.into_node();
                attach(&mut stack, &mut roots, node);
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"outline" => {
                let pending = stack.pop().ok_or_else(|| OutlineError::Parse {
                    reason: "unexpected </outline>".to_string(),
                })?;
                let node = pending.into_node();
                attach(&mut stack, &mut roots, node);
            }
            Ok(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(OutlineError::Parse {
            reason: "unclosed <outline> element".to_string(),
        });
    }

    debug!("parsed {} root entries", roots.len());
    Ok(Document::new(roots))
}

fn attach(stack: &mut [PendingOutline], roots: &mut Vec<OutlineNode>, node: OutlineNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Serialize with the fixed default title.
pub fn serialize(document: &Document) -> String {
    serialize_with_title(document, DEFAULT_EXPORT_TITLE)
}

/// Serialize the outline tree into a normalized OPML document.
pub fn serialize_with_title(document: &Document, title: &str) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<opml version=\"{OPML_VERSION}\">\n"));
    out.push_str("  <head>\n");
    out.push_str(&format!("    <title>{}</title>\n", escape(title)));
    out.push_str("  </head>\n");
    out.push_str("  <body>\n");
    for root in &document.roots {
        write_outline(&mut out, root, 2);
    }
    out.push_str("  </body>\n");
    out.push_str("</opml>\n");
    out
}

fn write_outline(out: &mut String, node: &OutlineNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        OutlineNode::Folder { label, children } => {
            // The explicit folder marker is always emitted: a self-closed
            // folder would otherwise be indistinguishable from a feed on
            // re-parse.
            match children.as_deref() {
                Some(children) if !children.is_empty() => {
                    out.push_str(&format!(
                        "{indent}<outline text=\"{}\" type=\"folder\">\n",
                        escape(label)
                    ));
                    for child in children {
                        write_outline(out, child, depth + 1);
                    }
                    out.push_str(&format!("{indent}</outline>\n"));
                }
                _ => {
                    out.push_str(&format!(
                        "{indent}<outline text=\"{}\" type=\"folder\"/>\n",
                        escape(label)
                    ));
                }
            }
        }
        OutlineNode::Feed {
            label,
            feed_url,
            site_url,
        } => {
            out.push_str(&format!(
                "{indent}<outline text=\"{}\" type=\"rss\"",
                escape(label)
            ));
            if let Some(url) = feed_url {
                out.push_str(&format!(" xmlUrl=\"{}\"", escape(url)));
            }
            if let Some(url) = site_url {
                out.push_str(&format!(" htmlUrl=\"{}\"", escape(url)));
            }
            out.push_str("/>\n");
        }
    }
}
