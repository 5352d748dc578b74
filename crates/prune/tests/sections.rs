// ABOUTME: Integration tests for the section pass over parsed HTML.
// ABOUTME: Covers nesting, range boundaries, case/substring matching, the empty-list guard, and deletion order.

use deadwood_prune::{
    remove_sections, Document, PageData, RemovalTitles, SectionOptions, Transformer,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn prune(html: &str, titles: &[&str]) -> String {
    prune_with(html, titles, &SectionOptions::default())
}

fn prune_with(html: &str, titles: &[&str], opts: &SectionOptions) -> String {
    let mut doc = Document::parse_fragment(html);
    remove_sections(&mut doc, &RemovalTitles::new(titles), opts);
    doc.to_html()
}

#[test]
fn nested_section_is_removed_with_subsections() {
    let html = concat!(
        "<h2>Keep</h2><p>keep body</p>",
        "<h3>Remove Me</h3><p>gone</p><ul><li>gone too</li></ul>",
        "<h4>Sub</h4><p>sub body</p>",
        "<h2>Next</h2><p>next body</p>",
    );
    assert_eq!(
        prune(html, &["remove me"]),
        "<h2>Keep</h2><p>keep body</p><h2>Next</h2><p>next body</p>"
    );
}

#[test]
fn nested_match_does_not_end_range_early() {
    let html = concat!(
        "<h2>Drafts</h2><p>a</p>",
        "<h3>Drafts archive</h3><p>b</p>",
        "<h3>Other</h3><p>c</p>",
        "<h2>Published</h2><p>d</p>",
    );
    assert_eq!(prune(html, &["drafts"]), "<h2>Published</h2><p>d</p>");
}

#[test]
fn range_runs_to_end_of_document() {
    let html = "<p>intro</p><h2>Changelog</h2><p>v1</p><h3>Older</h3><p>v0</p>";
    assert_eq!(prune(html, &["changelog"]), "<p>intro</p>");
}

#[test]
fn shallower_heading_ends_range() {
    let html = "<h3>Notes</h3><p>x</p><h1>Top</h1><p>y</p>";
    assert_eq!(prune(html, &["notes"]), "<h1>Top</h1><p>y</p>");
}

#[test]
fn closing_heading_can_open_a_new_range() {
    let html = concat!(
        "<h2>Changelog</h2><p>a</p>",
        "<h2>Private notes</h2><p>b</p>",
        "<h2>Kept</h2><p>c</p>",
    );
    assert_eq!(
        prune(html, &["changelog", "private"]),
        "<h2>Kept</h2><p>c</p>"
    );
}

#[test]
fn case_and_substring_matching() {
    let html = concat!(
        "<h2>Changelog</h2><p>a</p>",
        "<h2>Intro</h2><p>b</p>",
        "<h2>Project Changelog (v2)</h2><p>c</p>",
        "<h2>End</h2>",
    );
    assert_eq!(
        prune(html, &["changelog"]),
        "<h2>Intro</h2><p>b</p><h2>End</h2>"
    );
}

#[test]
fn heading_text_spans_inline_children() {
    let html = "<h2><a href=\"#dm\">#</a> DM <em>Notes</em></h2><p>secret</p><h2>Public</h2>";
    assert_eq!(prune(html, &["dm notes"]), "<h2>Public</h2>");
}

#[test]
fn heading_kept_when_configured() {
    let opts = SectionOptions {
        remove_heading_itself: false,
        ..Default::default()
    };
    let html = "<h2>Spoilers</h2><p>ending</p><h3>Twist</h3><p>more</p><h2>Review</h2>";
    assert_eq!(
        prune_with(html, &["spoilers"], &opts),
        "<h2>Spoilers</h2><h2>Review</h2>"
    );
}

#[test]
fn empty_title_list_leaves_tree_unchanged() {
    let html = "<h2>Changelog</h2><p>a</p>";
    assert_eq!(prune(html, &[]), html);
    assert_eq!(prune(html, &["", "  "]), html);
}

#[test]
fn non_contiguous_siblings_keep_relative_order() {
    let html = concat!(
        "<div>",
        "<p>s1</p><h2>Drop</h2><p>d1</p><p>d2</p>",
        "<h2>Stay</h2><p>s2</p>",
        "<h2>Drop again</h2><p>d3</p>",
        "<h2>Stay too</h2><p>s3</p>",
        "</div>",
    );
    assert_eq!(
        prune(html, &["drop"]),
        "<div><p>s1</p><h2>Stay</h2><p>s2</p><h2>Stay too</h2><p>s3</p></div>"
    );
}

#[test]
fn removal_crosses_container_boundaries() {
    let html = concat!(
        "<section><h2>Keep</h2><p>k</p></section>",
        "<section><h2>Remove</h2><p>r</p><div><p>nested</p></div></section>",
        "<aside><p>z</p></aside>",
    );
    assert_eq!(
        prune(html, &["remove"]),
        "<section><h2>Keep</h2><p>k</p></section><section></section>"
    );
}

#[test]
fn container_opened_inside_a_range_goes_with_it() {
    // The wrapper is seen before the heading that would close the range.
    let html = concat!(
        "<h2>Remove</h2><p>r</p>",
        "<section><h2>After</h2><p>a</p></section>",
        "<h2>Outside</h2><p>o</p>",
    );
    assert_eq!(prune(html, &["remove"]), "<h2>Outside</h2><p>o</p>");
}

#[test]
fn transformer_reads_titles_from_frontmatter() {
    let html = "<h2>Intro</h2><p>a</p><h2>Todo</h2><p>b</p>";
    let page = PageData::from_json_str(
        &json!({"frontmatter": {"hide": ["todo"], "remove_sections": ["intro"]}}).to_string(),
    )
    .unwrap();

    let mut doc = Document::parse_fragment(html);
    Transformer::default().apply(&mut doc, None, &page);
    assert_eq!(doc.to_html(), "<h2>Todo</h2><p>b</p>");

    let transformer = Transformer::builder()
        .metadata_field("hide")
        .build()
        .unwrap();
    let mut doc = Document::parse_fragment(html);
    transformer.apply(&mut doc, None, &page);
    assert_eq!(doc.to_html(), "<h2>Intro</h2><p>a</p>");
}

#[test]
fn malformed_frontmatter_is_a_no_op() {
    let html = "<h2>Intro</h2><p>a</p>";
    for frontmatter in [json!({"remove_sections": "intro"}), json!({"remove_sections": 3}), json!({})] {
        let page = PageData::from_json_str(&json!({ "frontmatter": frontmatter }).to_string()).unwrap();
        let mut doc = Document::parse_fragment(html);
        Transformer::default().apply(&mut doc, None, &page);
        assert_eq!(doc.to_html(), html);
    }
}
