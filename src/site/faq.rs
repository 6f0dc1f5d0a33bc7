//! FAQ accordion.
//!
//! Single-open disclosure: at most one entry is expanded. Toggling the open
//! entry collapses it; toggling another entry moves the expansion there.
//! On the server the state travels in the `faq` query parameter, so each
//! question links to the state its click would produce.

use crate::site::structured_data::{faq_entries_from_graph, StructuredDataGraph};
use crate::site::types::FaqEntry;

/// Query parameter carrying the open entry index.
pub const FAQ_QUERY_PARAM: &str = "faq";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionState {
    open_index: Option<usize>,
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(index: usize) -> Self {
        Self {
            open_index: Some(index),
        }
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_index
    }

    pub fn toggle(&mut self, index: usize) {
        self.open_index = if self.open_index == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// State after toggling `index`, leaving `self` untouched.
    pub fn toggled(self, index: usize) -> Self {
        let mut next = self;
        next.toggle(index);
        next
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open_index == Some(index)
    }
}

/// Accordion bound to a page's FAQ list.
#[derive(Debug, Clone)]
pub struct FaqAccordion<'a> {
    entries: &'a [FaqEntry],
    state: AccordionState,
}

impl<'a> FaqAccordion<'a> {
    pub fn new(entries: &'a [FaqEntry]) -> Self {
        Self {
            entries,
            state: AccordionState::new(),
        }
    }

    /// Restore state from a request; out-of-range indices collapse everything.
    pub fn from_request(entries: &'a [FaqEntry], open: Option<usize>) -> Self {
        let state = match open {
            Some(i) if i < entries.len() => AccordionState::with_open(i),
            _ => AccordionState::new(),
        };
        Self { entries, state }
    }

    pub fn entries(&self) -> &'a [FaqEntry] {
        self.entries
    }

    pub fn state(&self) -> AccordionState {
        self.state
    }

    /// Indices outside the list are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index < self.entries.len() {
            self.state.toggle(index);
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.state.is_open(index)
    }

    /// Answer text when entry `index` is expanded.
    pub fn visible_answer(&self, index: usize) -> Option<&'a str> {
        if self.is_open(index) {
            self.entries.get(index).map(|e| e.answer.as_str())
        } else {
            None
        }
    }

    /// Relative href that toggles entry `index` from the current state.
    pub fn toggle_href(&self, index: usize, anchor: &str) -> String {
        match self.state.toggled(index).open_index() {
            Some(open) => format!("?{}={}#{}", FAQ_QUERY_PARAM, open, anchor),
            None => format!("?#{}", anchor),
        }
    }
}

/// Result of comparing the accordion list with the `FAQPage` entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqParity {
    Match,
    LengthMismatch { accordion: usize, structured: usize },
    EntryMismatch { index: usize },
}

impl FaqParity {
    pub fn is_match(&self) -> bool {
        matches!(self, FaqParity::Match)
    }
}

/// Pointwise equality of accordion entries and `FAQPage.mainEntity`.
pub fn check_faq_parity(entries: &[FaqEntry], graph: &StructuredDataGraph) -> FaqParity {
    let structured = faq_entries_from_graph(graph);
    if structured.len() != entries.len() {
        return FaqParity::LengthMismatch {
            accordion: entries.len(),
            structured: structured.len(),
        };
    }

    match entries.iter().zip(&structured).position(|(a, b)| a != b) {
        Some(index) => FaqParity::EntryMismatch { index },
        None => FaqParity::Match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::structured_data::{build_faq_graph, PageInfo};

    fn entries() -> Vec<FaqEntry> {
        (0..4)
            .map(|i| FaqEntry::new(format!("Q{}?", i), format!("A{}.", i)))
            .collect()
    }

    #[test]
    fn test_initial_state_all_collapsed() {
        let list = entries();
        let accordion = FaqAccordion::new(&list);
        assert!((0..list.len()).all(|i| !accordion.is_open(i)));
        assert_eq!(accordion.state().open_index(), None);
    }

    #[test]
    fn test_toggle_twice_restores_initial() {
        for i in 0..4 {
            let mut state = AccordionState::new();
            state.toggle(i);
            state.toggle(i);
            assert_eq!(state, AccordionState::new());
        }
    }

    #[test]
    fn test_single_open() {
        for i in 0..4 {
            for j in (0..4).filter(|&j| j != i) {
                let mut state = AccordionState::new();
                state.toggle(i);
                state.toggle(j);
                assert_eq!(state.open_index(), Some(j));
                assert!(!state.is_open(i));
            }
        }
    }

    #[test]
    fn test_visible_answer() {
        let list = entries();
        let mut accordion = FaqAccordion::new(&list);
        assert_eq!(accordion.visible_answer(1), None);
        accordion.toggle(1);
        assert_eq!(accordion.visible_answer(1), Some("A1."));
        assert_eq!(accordion.visible_answer(0), None);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let list = entries();
        let mut accordion = FaqAccordion::from_request(&list, Some(99));
        assert_eq!(accordion.state().open_index(), None);
        accordion.toggle(99);
        assert_eq!(accordion.state().open_index(), None);
    }

    #[test]
    fn test_toggle_href() {
        let list = entries();
        let accordion = FaqAccordion::from_request(&list, Some(2));
        assert_eq!(accordion.toggle_href(2, "faq-2"), "?#faq-2");
        assert_eq!(accordion.toggle_href(0, "faq-0"), "?faq=0#faq-0");
    }

    #[test]
    fn test_parity() {
        let list = entries();
        let info = PageInfo {
            url: "https://moazhaider.com/x".to_string(),
            name: "X".to_string(),
            description: "X".to_string(),
            language: "en-US".to_string(),
            website_id: "https://moazhaider.com/#website".to_string(),
            provider_id: "https://moazhaider.com/#person".to_string(),
            service_name: None,
            service_type: None,
            area_served: None,
        };
        let graph = build_faq_graph(&info, &list);
        assert!(check_faq_parity(&list, &graph).is_match());

        let mut edited = list.clone();
        edited[2].answer.push_str(" Edited.");
        assert_eq!(check_faq_parity(&edited, &graph), FaqParity::EntryMismatch { index: 2 });
        assert_eq!(
            check_faq_parity(&list[..3], &graph),
            FaqParity::LengthMismatch { accordion: 3, structured: 4 }
        );
    }
}
