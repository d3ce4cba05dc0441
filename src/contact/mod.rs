// src/contact/mod.rs
// =============================================================================
// This module contains the "is this a contact affordance?" logic.
//
// Submodules:
// - html: Finds links, buttons and submit inputs in page markup
// - phrases: Normalizes text and matches it against contact vocabulary
//
// Neither submodule touches the network. The crawler (src/crawl/) fetches
// pages and feeds them through here.
// =============================================================================

mod html;
mod phrases;

pub use html::{extract_candidates, extract_title, Candidate};
pub use phrases::{normalize, PhraseTable};
