// src/contact/phrases.rs
// =============================================================================
// This module decides whether a piece of text "looks like contact".
//
// It is used twice by the crawler:
// - To flag a link/button as a Match ("Fale Conosco", "Contact sales", ...)
// - To prioritize the crawl queue toward contact-like pages (/contact, /suporte)
//
// Matching is diacritic-insensitive: every string is normalized first
// (lower-case, accents stripped, whitespace collapsed), so "Orçamento",
// "ORCAMENTO" and "orçamento" all compare equal.
//
// The word lists live in a PhraseTable that the crawler receives by
// reference, so new locales can be added without touching crawl logic.
//
// Rust concepts:
// - Iterator adapters: nfd() -> filter() -> collect()
// - Default trait: PhraseTable::default() gives the built-in dictionary
// =============================================================================

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// English + Portuguese contact, support, sales and chat vocabulary
// Written naturally here; PhraseTable normalizes them on construction.
const DEFAULT_PHRASES: &[&str] = &[
    // English
    "contact us",
    "contact",
    "get in touch",
    "talk to us",
    "talk to sales",
    "contact sales",
    "sales",
    "support",
    "customer service",
    "help center",
    "live chat",
    "chat",
    "whatsapp",
    "email us",
    "call us",
    "request a quote",
    "book a demo",
    // Portuguese
    "fale conosco",
    "fale com",
    "entre em contato",
    "contato",
    "atendimento",
    "suporte",
    "vendas",
    "orçamento",
    "central de ajuda",
    "ajuda",
    "chat online",
];

// URL path fragments that suggest a contact page
const DEFAULT_PATH_HINTS: &[&str] = &[
    "/contact",
    "/contato",
    "/fale-conosco",
    "/faleconosco",
    "/support",
    "/suporte",
    "/help",
    "/ajuda",
    "/atendimento",
    "/sales",
    "/vendas",
    "/chat",
    "wa.me",
    "whatsapp",
];

// Normalizes text for matching
//
// Steps: lower-case, NFD decomposition, drop combining marks (accents),
// collapse whitespace runs to a single space, trim.
//
// Example:
//   "  Fale   Conôsco\n" -> "fale conosco"
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

// The immutable phrase dictionary and path-hint list
//
// Entries are stored normalized, and kept in insertion order with
// duplicates removed, because match results follow dictionary order.
#[derive(Debug, Clone)]
pub struct PhraseTable {
    phrases: Vec<String>,
    path_hints: Vec<String>,
}

impl PhraseTable {
    pub fn new<P, H>(phrases: P, path_hints: H) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let mut table = Self {
            phrases: Vec::new(),
            path_hints: Vec::new(),
        };
        table.extend_phrases(phrases);
        for hint in path_hints {
            push_unique(&mut table.path_hints, normalize(hint.as_ref()));
        }
        table
    }

    /// Returns a copy of this table with extra phrases appended
    pub fn with_extra_phrases<P>(mut self, phrases: P) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.extend_phrases(phrases);
        self
    }

    fn extend_phrases<P>(&mut self, phrases: P)
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        for phrase in phrases {
            push_unique(&mut self.phrases, normalize(phrase.as_ref()));
        }
    }

    // Finds every dictionary phrase contained in the text
    //
    // Returns: matched phrases (normalized), in dictionary order
    //
    // Example:
    //   "Entre em contato conosco agora" -> ["entre em contato", "contato"]
    pub fn match_phrases(&self, text: &str) -> Vec<String> {
        let haystack = normalize(text);
        if haystack.is_empty() {
            return Vec::new();
        }

        self.phrases
            .iter()
            .filter(|phrase| haystack.contains(phrase.as_str()))
            .cloned()
            .collect()
    }

    // Checks whether a link looks like it leads to a contact page
    //
    // True if the text contains a path hint (e.g. "/fale-conosco")
    // or any dictionary phrase.
    pub fn is_priority_url(&self, url_text: &str) -> bool {
        let haystack = normalize(url_text);
        if self.path_hints.iter().any(|hint| haystack.contains(hint.as_str())) {
            return true;
        }
        !self.match_phrases(url_text).is_empty()
    }
}

impl Default for PhraseTable {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES.iter(), DEFAULT_PATH_HINTS.iter())
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_diacritic_insensitive() {
        assert_eq!(normalize("Fale Conosco"), normalize("fale conosco"));
        assert_eq!(normalize("Orçamento"), "orcamento");
        assert_eq!(normalize("  Atendimento \t\n ao   Cliente "), "atendimento ao cliente");
    }

    #[test]
    fn test_match_portuguese_sentence() {
        let table = PhraseTable::default();
        let matched = table.match_phrases("Entre em contato conosco agora");
        assert!(matched.contains(&"contato".to_string()));
        assert!(matched.contains(&"entre em contato".to_string()));
    }

    #[test]
    fn test_match_follows_dictionary_order() {
        let table = PhraseTable::default();
        let matched = table.match_phrases("Contact Us /contact");
        assert_eq!(matched, vec!["contact us".to_string(), "contact".to_string()]);
    }

    #[test]
    fn test_match_accented_input() {
        let table = PhraseTable::default();
        let matched = table.match_phrases("Peça seu ORÇAMENTO");
        assert_eq!(matched, vec!["orcamento".to_string()]);
    }

    #[test]
    fn test_no_match() {
        let table = PhraseTable::default();
        assert!(table.match_phrases("Blog /blog").is_empty());
        assert!(table.match_phrases("").is_empty());
    }

    #[test]
    fn test_priority_by_path_hint() {
        let table = PhraseTable::default();
        assert!(table.is_priority_url("Saiba mais https://site.test/fale-conosco"));
        assert!(table.is_priority_url("Click https://wa.me/5511999999999"));
        assert!(!table.is_priority_url("Blog https://site.test/blog"));
    }

    #[test]
    fn test_priority_by_phrase() {
        let table = PhraseTable::default();
        assert!(table.is_priority_url("Talk to sales https://site.test/pricing"));
    }

    #[test]
    fn test_extra_phrases_extend_table() {
        let table = PhraseTable::default().with_extra_phrases(["Kontakt"]);
        assert_eq!(table.match_phrases("Kontakt aufnehmen"), vec!["kontakt".to_string()]);
    }
}
