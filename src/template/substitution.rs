use crate::template::document::{SlideDeck, TextContainer, TextParagraph};
use crate::template::mapping::SubstitutionMapping;
use crate::template::scanner::{PlaceholderRule, PlaceholderScanner};
use tracing::debug;

/// What one substitution pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionStats {
    /// Text containers that held at least one placeholder
    pub containers: usize,

    /// Placeholders found across those containers
    pub matches: usize,

    /// Occurrences actually rewritten in paragraphs
    pub replacements: usize,

    /// Placeholders whose field was absent from the mapping
    pub unresolved: usize,

    /// Distinct tokens no paragraph still contained when their turn came,
    /// left as literal text
    pub unlocated: usize,
}

/// Rewrites placeholders in a deck.
///
/// Matches are found in a container's flattened text but replaced paragraph
/// by paragraph. A token that no paragraph contains verbatim, for instance
/// one whose text an earlier replacement already rewrote, is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstitutionEngine {
    scanner: PlaceholderScanner,
}

impl SubstitutionEngine {
    pub fn new(rule: PlaceholderRule) -> Self {
        Self {
            scanner: PlaceholderScanner::new(rule),
        }
    }

    /// Substitute `mapping` into `deck` in place.
    pub fn apply<D: SlideDeck>(&self, deck: &mut D, mapping: &SubstitutionMapping) -> SubstitutionStats {
        let mut stats = SubstitutionStats::default();

        for slide in 0..deck.slide_count() {
            for (index, container) in deck.containers_mut(slide).iter_mut().enumerate() {
                let text = container.text();
                if !PlaceholderScanner::may_contain_placeholder(&text) {
                    continue;
                }

                let matches = self.scanner.scan(&text);
                if matches.is_empty() {
                    continue;
                }
                stats.containers += 1;
                stats.matches += matches.len();

                // (token, value, occurrences replaced); a repeated token is replaced once
                let mut pending: Vec<(&str, &str, usize)> = Vec::with_capacity(matches.len());
                for m in &matches {
                    let value = mapping.lookup(m.field_name).unwrap_or_else(|| {
                        stats.unresolved += 1;
                        debug!(slide, container = index, field = m.field_name, "field not in mapping");
                        ""
                    });
                    if !pending.iter().any(|(token, ..)| *token == m.full_token) {
                        pending.push((m.full_token, value, 0));
                    }
                }

                for paragraph in container.paragraphs_mut() {
                    for (token, value, replaced) in pending.iter_mut() {
                        *replaced += paragraph.replace_text(*token, *value);
                    }
                }

                for (token, _, replaced) in &pending {
                    if *replaced == 0 {
                        stats.unlocated += 1;
                        debug!(slide, container = index, token = *token, "token not found in any paragraph");
                    }
                    stats.replacements += replaced;
                }
            }
        }

        stats
    }
}
