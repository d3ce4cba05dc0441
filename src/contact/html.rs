// src/contact/html.rs
// =============================================================================
// This module finds interactive elements in an HTML page.
//
// We are NOT interested in the whole document. We only want the things a
// visitor can click or submit, because that's where contact affordances live:
// - <a href="...">                      -> link
// - <button href/data-href="...">       -> button
// - <div role="button" data-href="..."> -> role_button
// - <input type="submit|button">        -> input
//
// Each element kind is scanned on its own pass, so an <a role="button">
// shows up twice (once per kind). The crawler dedups matches later.
//
// We use the `scraper` crate (built on html5ever) to tokenize the markup and
// select elements with CSS selectors. It is forgiving with broken HTML, which
// is what real websites serve.
//
// The caller parses the page once (Html::parse_document) and hands the same
// document to extract_title and extract_candidates.
//
// Rust concepts:
// - Tree walking: element.descendants() visits every node under an element
// - Option chaining: find the first non-empty attribute from a list
// =============================================================================

use scraper::{ElementRef, Html, Node, Selector};

use crate::report::ElementKind;

// One clickable thing found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: ElementKind,
    /// Visible text, whitespace-collapsed
    pub text: String,
    /// Raw target as written in the markup (may be relative or empty)
    pub href: String,
    /// The page the element was found on
    pub page_url: String,
}

// Extracts all interactive candidates from a page
//
// Parameters:
//   document: the parsed page
//   page_url: the URL of the page (stored on each candidate for provenance)
//
// Returns: candidates in scan order (links, buttons, role buttons, inputs).
// Elements with neither text nor href are dropped.
pub fn extract_candidates(document: &Html, page_url: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    // Our selectors are constants and known to be valid
    let anchors = Selector::parse("a").expect("valid selector");
    let buttons = Selector::parse("button").expect("valid selector");
    let roles = Selector::parse("[role]").expect("valid selector");
    let inputs = Selector::parse("input").expect("valid selector");

    for element in document.select(&anchors) {
        push_candidate(
            &mut candidates,
            ElementKind::Link,
            inner_text(&element),
            first_attr(&element, &["href"]),
            page_url,
        );
    }

    for element in document.select(&buttons) {
        push_candidate(
            &mut candidates,
            ElementKind::Button,
            inner_text(&element),
            first_attr(&element, &["href", "data-href"]),
            page_url,
        );
    }

    // Attribute values are matched case-insensitively (role="Button")
    for element in document.select(&roles) {
        let is_button = element
            .value()
            .attr("role")
            .map_or(false, |role| role.trim().eq_ignore_ascii_case("button"));
        if !is_button {
            continue;
        }
        push_candidate(
            &mut candidates,
            ElementKind::RoleButton,
            inner_text(&element),
            first_attr(&element, &["data-href", "href"]),
            page_url,
        );
    }

    for element in document.select(&inputs) {
        let input_type = element.value().attr("type").unwrap_or("").trim();
        if !input_type.eq_ignore_ascii_case("submit") && !input_type.eq_ignore_ascii_case("button") {
            continue;
        }
        push_candidate(
            &mut candidates,
            ElementKind::Input,
            collapse_whitespace(&first_attr(&element, &["value", "aria-label", "name"])),
            first_attr(&element, &["formaction"]),
            page_url,
        );
    }

    candidates
}

// Extracts the page title
//
// Returns: the first <title> text, whitespace-collapsed, or "Untitled"
pub fn extract_title(document: &Html) -> String {
    let selector = Selector::parse("title").expect("valid selector");

    document
        .select(&selector)
        .next()
        .map(|title| inner_text(&title))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn push_candidate(
    candidates: &mut Vec<Candidate>,
    kind: ElementKind,
    text: String,
    href: String,
    page_url: &str,
) {
    if text.is_empty() && href.is_empty() {
        return;
    }
    candidates.push(Candidate {
        kind,
        text,
        href,
        page_url: page_url.to_string(),
    });
}

// Tags that start a new line when rendered, so their text never fuses with
// the text around them
const BREAKING_TAGS: [&str; 20] = [
    "br", "p", "div", "li", "ul", "ol", "dd", "dt", "tr", "td", "th", "table", "h1", "h2", "h3",
    "h4", "h5", "h6", "section", "article",
];

// Visible text of an element with all inner tags stripped
//
// Inline markup is glued back together (Cont<b>ato</b> reads "Contato");
// line-breaking tags become a space. html5ever already decodes entities;
// &nbsp; becomes U+00A0, which we turn into a plain space.
fn inner_text(element: &ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(tag) if BREAKING_TAGS.contains(&tag.name()) => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

// Returns the first non-empty attribute from the list, trimmed
fn first_attr(element: &ElementRef, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("")
        .to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
