// ABOUTME: Integration tests for the dead-link pass over parsed HTML and hast trees.
// ABOUTME: Covers exemptions, equivalence classes, dispositions, idempotence, and the empty-set fail-safe.

use deadwood_prune::{
    remove_dead_links, BuildContext, DeadLinkOptions, DestinationSet, Document, PageData,
    Transformer,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn dests(items: &[&str]) -> DestinationSet {
    items.iter().collect()
}

fn run(html: &str, items: &[&str], opts: &DeadLinkOptions) -> String {
    let mut doc = Document::parse_fragment(html);
    remove_dead_links(&mut doc, &dests(items), opts);
    doc.to_html()
}

#[test]
fn dead_link_becomes_marked_span_by_default() {
    let out = run(
        r#"<p><a href="/notes/gone">gone</a></p>"#,
        &["notes/rust"],
        &DeadLinkOptions::default(),
    );
    assert_eq!(out, r#"<p><span class="dead-link">gone</span></p>"#);
}

#[test]
fn valid_links_are_untouched() {
    let html = r#"<p><a href="/notes/rust">a</a><a href="notes/rust.html">b</a><a href="/notes/rust/">c</a></p>"#;
    assert_eq!(run(html, &["notes/rust"], &DeadLinkOptions::default()), html);
}

#[test]
fn anchors_and_external_links_are_never_dead() {
    let html = concat!(
        r##"<a href="#section">a</a>"##,
        r#"<a href="https://example.com">b</a>"#,
        r#"<a href="http://example.com">c</a>"#,
        r#"<a href="//cdn.example.com/x">d</a>"#,
        r#"<a class="external" href="/not/a/page">e</a>"#,
    );
    assert_eq!(run(html, &["only/this"], &DeadLinkOptions::default()), html);
    assert_eq!(run(html, &["section", "x"], &DeadLinkOptions::default()), html);
}

#[test]
fn index_equivalence_classes() {
    let html = r#"<a href="/foo">a</a><a href="foo">b</a><a href="/foo/">c</a>"#;
    assert_eq!(run(html, &["/foo/index"], &DeadLinkOptions::default()), html);

    let html = r#"<a href="/foo/index.html">a</a>"#;
    assert_eq!(run(html, &["/foo"], &DeadLinkOptions::default()), html);
}

#[test]
fn empty_destination_set_leaves_tree_identical() {
    let html = r#"<div><a href="/a">a</a><a class="x" href="missing">b</a><p>text</p></div>"#;
    assert_eq!(run(html, &[], &DeadLinkOptions::default()), html);

    let mut doc = Document::parse_fragment(html);
    Transformer::default().apply(&mut doc, None, &PageData::default());
    assert_eq!(doc.to_html(), html);
}

#[test]
fn mark_only_keeps_href() {
    let opts = DeadLinkOptions {
        add_marker_class: true,
        ..Default::default()
    };
    let out = run(
        r#"<a class="internal" href="/gone">x</a>"#,
        &["notes/rust"],
        &opts,
    );
    assert_eq!(out, r#"<a class="internal dead-link" href="/gone">x</a>"#);
}

#[test]
fn remove_completely_drops_link_without_class() {
    let opts = DeadLinkOptions {
        remove_completely: true,
        add_marker_class: true,
        ..Default::default()
    };
    let out = run(r#"<a href="/gone">x</a>"#, &["notes/rust"], &opts);
    assert_eq!(out, "<span>x</span>");
}

#[test]
fn custom_marker_class() {
    let opts = DeadLinkOptions {
        marker_class_name: "broken".to_string(),
        ..Default::default()
    };
    let out = run(r#"<a href="/gone">x</a>"#, &["notes/rust"], &opts);
    assert_eq!(out, r#"<span class="broken">x</span>"#);
}

#[test]
fn pass_is_idempotent_for_every_disposition() {
    let html = r#"<p><a href="/gone">x</a> <a class="a" href="/notes/rust">y</a> <a href="/also-gone">z</a></p>"#;
    let variants = [
        DeadLinkOptions::default(),
        DeadLinkOptions {
            add_marker_class: true,
            ..Default::default()
        },
        DeadLinkOptions {
            remove_completely: true,
            ..Default::default()
        },
    ];

    for opts in &variants {
        let set = dests(&["notes/rust"]);
        let mut doc = Document::parse_fragment(html);
        remove_dead_links(&mut doc, &set, opts);
        let once = doc.to_html();
        remove_dead_links(&mut doc, &set, opts);
        assert_eq!(doc.to_html(), once, "disposition {}", opts.disposition());
    }
}

#[test]
fn data_slug_resolves_relative_links() {
    let html = r#"<a data-slug="notes/rust" href="../notes/rust">ok</a><a data-slug="notes/gone" href="../notes/gone">gone</a>"#;
    let out = run(html, &["notes/rust"], &DeadLinkOptions::default());
    assert_eq!(
        out,
        r#"<a data-slug="notes/rust" href="../notes/rust">ok</a><span class="dead-link" data-slug="notes/gone">gone</span>"#
    );
}

#[test]
fn hast_class_shapes_are_preserved() {
    let tree = json!({
        "type": "root",
        "children": [
            {"type": "element", "tagName": "a",
             "properties": {"href": "/gone", "className": ["internal", "alias"]},
             "children": [{"type": "text", "value": "list"}]},
            {"type": "element", "tagName": "a",
             "properties": {"href": "/gone", "className": "internal"},
             "children": [{"type": "text", "value": "string"}]},
            {"type": "element", "tagName": "a",
             "properties": {"href": "/gone", "className": 7},
             "children": [{"type": "text", "value": "odd"}]}
        ]
    });
    let mut doc = Document::from_hast(&tree).unwrap();
    remove_dead_links(&mut doc, &dests(&["notes/rust"]), &DeadLinkOptions::default());

    let out = doc.to_hast();
    let classes: Vec<_> = out["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["properties"]["className"].clone())
        .collect();
    assert_eq!(
        classes,
        vec![
            json!(["internal", "alias", "dead-link"]),
            json!("internal dead-link"),
            json!("dead-link"),
        ]
    );
    assert!(out["children"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["tagName"] == "span" && c["properties"].get("href").is_none()));
}

#[test]
fn build_context_takes_precedence_over_page_slugs() {
    let html = r#"<a href="/a">a</a><a href="/b">b</a>"#;
    let page = PageData::from_json_str(r#"{"allSlugs": ["a", "b"]}"#).unwrap();
    let build = BuildContext::with_destinations(dests(&["a"]));

    let mut doc = Document::parse_fragment(html);
    Transformer::default().apply(&mut doc, Some(&build), &page);
    assert_eq!(
        doc.to_html(),
        r#"<a href="/a">a</a><span class="dead-link">b</span>"#
    );

    let mut doc = Document::parse_fragment(html);
    Transformer::default().apply(&mut doc, None, &page);
    assert_eq!(doc.to_html(), html);
}
