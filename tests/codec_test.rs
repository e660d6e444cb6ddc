//! Codec tests: parse, type inference, serialization forms, round trips

use std::fs;
use std::path::Path;

use rsopml::codec::{parse, serialize, serialize_with_title, DEFAULT_EXPORT_TITLE};
use rsopml::{Document, NodeKind, OutlineNode};

// ============================================================
// Parse Tests
// ============================================================

#[test]
fn given_nested_outlines_when_parsing_then_builds_tree_to_arbitrary_depth() {
    let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<opml version="2.0">
  <head><title>t</title></head>
  <body>
    <outline text="a">
      <outline text="b">
        <outline text="c" type="rss" xmlUrl="u"/>
      </outline>
    </outline>
  </body>
</opml>"#;

    let doc = parse(text).unwrap();
    assert_eq!(doc.roots.len(), 1);

    let a = &doc.roots[0];
    assert_eq!(a.kind(), NodeKind::Folder);
    let b = &a.children().unwrap()[0];
    assert_eq!(b.kind(), NodeKind::Folder);
    let c = &b.children().unwrap()[0];
    assert_eq!(c.label(), "c");
    assert_eq!(c.kind(), NodeKind::Feed);
}

#[test]
fn given_no_type_attribute_when_parsing_then_infers_kind_from_nesting() {
    let text = r#"<opml version="2.0"><body>
        <outline text="has-children"><outline text="leaf"/></outline>
        <outline text="childless"/>
    </body></opml>"#;

    let doc = parse(text).unwrap();
    assert_eq!(doc.roots[0].kind(), NodeKind::Folder);
    assert_eq!(doc.roots[1].kind(), NodeKind::Feed);
    // inference happens independently at every depth
    assert_eq!(doc.roots[0].children().unwrap()[0].kind(), NodeKind::Feed);
}

#[test]
fn given_explicit_type_when_parsing_then_marker_wins_over_inference() {
    let text = r#"<opml><body>
        <outline text="empty-folder" type="folder"/>
        <outline text="feed-with-nested" type="rss" xmlUrl="u"><outline text="dropped"/></outline>
    </body></opml>"#;

    let doc = parse(text).unwrap();
    assert_eq!(doc.roots[0].kind(), NodeKind::Folder);
    // a self-closed folder never had a children container
    assert_eq!(doc.roots[0].children(), None);
    // explicit feed marker wins; a feed cannot carry children
    assert_eq!(doc.roots[1].kind(), NodeKind::Feed);
    assert_eq!(doc.roots[1].children(), None);
}

#[test]
fn given_missing_attributes_when_parsing_then_urls_are_absent() {
    let doc = parse(r#"<opml><body><outline text="bare"/></body></opml>"#).unwrap();
    match &doc.roots[0] {
        OutlineNode::Feed {
            feed_url, site_url, ..
        } => {
            assert_eq!(*feed_url, None);
            assert_eq!(*site_url, None);
        }
        other => panic!("expected feed, got {:?}", other),
    }
}

#[test]
fn given_escaped_attribute_when_parsing_then_value_is_unescaped() {
    let doc =
        parse(r#"<opml><body><outline text="A &amp; B &lt;ok&gt;"/></body></opml>"#).unwrap();
    assert_eq!(doc.roots[0].label(), "A & B <ok>");
}

#[test]
fn given_malformed_markup_when_parsing_then_fails_with_parse_error() {
    let result = parse(r#"<opml><body><outline text="a"#);
    assert!(result.is_err());

    let result = parse(r#"<opml><body><outline text="a"></body></opml>"#);
    assert!(result.is_err(), "unclosed outline should not parse");
}

// ============================================================
// Serialize Tests
// ============================================================

#[test]
fn given_document_when_serializing_then_emits_fixed_wrapper() {
    let out = serialize(&Document::default());
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(out.contains("<opml version=\"2.0\">"));
    assert!(out.contains(&format!("<title>{}</title>", DEFAULT_EXPORT_TITLE)));
    assert!(out.contains("<body>"));
}

#[test]
fn given_empty_folder_when_serializing_then_self_closed_with_folder_marker() {
    let absent = Document::new(vec![OutlineNode::folder("a", None)]);
    let empty = Document::new(vec![OutlineNode::folder("b", Some(vec![]))]);

    assert!(serialize(&absent).contains(r#"<outline text="a" type="folder"/>"#));
    assert!(serialize(&empty).contains(r#"<outline text="b" type="folder"/>"#));

    // the marker keeps the kind across a round trip
    let reparsed = parse(&serialize(&empty)).unwrap();
    assert_eq!(reparsed.roots[0].kind(), NodeKind::Folder);
}

#[test]
fn given_special_characters_when_serializing_then_attributes_are_escaped() {
    let doc = Document::new(vec![OutlineNode::feed(
        r#"A & B <"quoted">"#,
        Some("http://example.com/?a=1&b=2".to_string()),
        None,
    )]);

    let out = serialize(&doc);
    assert!(out.contains("A &amp; B &lt;"));
    assert!(out.contains("a=1&amp;b=2"));
    assert!(!out.contains("<\"quoted\">"));

    let reparsed = parse(&out).unwrap();
    assert_eq!(reparsed.roots[0].label(), r#"A & B <"quoted">"#);
}

#[test]
fn given_custom_title_when_serializing_then_title_is_used_and_escaped() {
    let out = serialize_with_title(&Document::default(), "My <Feeds>");
    assert!(out.contains("<title>My &lt;Feeds&gt;</title>"));
}

// ============================================================
// Round Trip Tests
// ============================================================

#[test]
fn given_fixture_file_when_round_tripping_then_structure_is_preserved() {
    let text = fs::read_to_string(Path::new("tests/resources/feeds.opml")).unwrap();
    let doc = parse(&text).unwrap();
    assert_eq!(doc.node_count(), 3);

    let reparsed = parse(&serialize(&doc)).unwrap();
    assert_eq!(doc, reparsed);
}

#[test]
fn given_mixed_tree_when_round_tripping_then_kinds_labels_urls_and_order_survive() {
    let doc = Document::new(vec![
        OutlineNode::folder("Empty", Some(vec![])),
        OutlineNode::folder(
            "Tech",
            Some(vec![
                OutlineNode::folder("Inner", None),
                OutlineNode::feed("A", Some("u1".to_string()), Some("s1".to_string())),
            ]),
        ),
        OutlineNode::feed("News", Some("u2".to_string()), None),
    ]);

    let reparsed = parse(&serialize(&doc)).unwrap();
    assert_eq!(reparsed.node_count(), doc.node_count());
    assert_eq!(reparsed.roots[0].kind(), NodeKind::Folder);
    assert_eq!(reparsed.roots[1], doc.roots[1]);
    assert_eq!(reparsed.roots[2], doc.roots[2]);
}
