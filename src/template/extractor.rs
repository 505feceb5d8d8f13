use crate::template::document::{SlideDeck, TextContainer};
use crate::template::scanner::{PlaceholderRule, PlaceholderScanner};
use tracing::debug;

/// Lists the fields a deck declares.
///
/// Fields come out in slide order, then container order, then left to right
/// within a container's text. Duplicates are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor {
    scanner: PlaceholderScanner,
}

impl FieldExtractor {
    pub fn new(rule: PlaceholderRule) -> Self {
        Self {
            scanner: PlaceholderScanner::new(rule),
        }
    }

    pub fn extract<D: SlideDeck>(&self, deck: &D) -> Vec<String> {
        let mut fields = Vec::new();

        for slide in 0..deck.slide_count() {
            for (index, container) in deck.containers(slide).iter().enumerate() {
                let text = container.text();
                if !PlaceholderScanner::may_contain_placeholder(&text) {
                    continue;
                }

                let matches = self.scanner.scan(&text);
                debug!(slide, container = index, matches = matches.len(), "scanned text container");
                fields.extend(matches.iter().map(|m| m.field_name.to_string()));
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::document::memory::MemoryDeck;

    #[test]
    fn test_fields_in_deck_order_with_duplicates() {
        let deck = MemoryDeck::from_text(&[
            &[&["{title}"], &["no fields here"], &["{a} then", "{b}"]],
            &[&["{title} again"]],
        ]);
        let fields = FieldExtractor::default().extract(&deck);
        assert_eq!(fields, ["title", "a", "b", "title"]);
    }

    #[test]
    fn test_greedy_multi_brace_line() {
        let deck = MemoryDeck::from_text(&[&[&["Hello {name}, welcome to {event}!"]]]);
        assert_eq!(
            FieldExtractor::default().extract(&deck),
            ["name}, welcome to {event"]
        );
        assert_eq!(
            FieldExtractor::new(PlaceholderRule::PerPair).extract(&deck),
            ["name", "event"]
        );
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let deck = MemoryDeck::from_text(&[&[&["{x} {y}"], &["{z}"]], &[&["{}"]]]);
        let extractor = FieldExtractor::new(PlaceholderRule::PerPair);
        let first = extractor.extract(&deck);
        assert_eq!(first, ["x", "y", "z", ""]);
        assert_eq!(extractor.extract(&deck), first);
    }

    #[test]
    fn test_empty_deck() {
        assert!(FieldExtractor::default().extract(&MemoryDeck::default()).is_empty());
    }
}
