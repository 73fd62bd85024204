use crate::domain::NoteId;
use crate::search::index::SearchIndex;
use crate::search::tokenize::{normalize, tokenize};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

const PREFIX_WEIGHT: f64 = 0.5;
const SUBSTRING_BONUS: f64 = 3.0;

/// Searchable note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Plaintext,
    Tags,
}

impl Field {
    fn boost(self) -> f64 {
        match self {
            Field::Title => 2.0,
            Field::Plaintext => 1.0,
            Field::Tags => 1.5,
        }
    }
}

/// One search result, enough to render a list row. Fetch the full note from
/// the repository by `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: NoteId,
    pub title: String,
    pub score: f64,
    /// Indexed terms that matched a query token, exactly or by prefix.
    pub matched_terms: Vec<String>,
    pub matched_fields: Vec<Field>,
}

#[derive(Default)]
struct Candidate {
    score: f64,
    terms: BTreeSet<String>,
    fields: BTreeSet<Field>,
}

impl SearchIndex {
    /// Case-insensitive lookup over titles, plaintext and tags.
    ///
    /// Each query token matches indexed terms exactly or as a prefix, scored
    /// by field boost, term frequency and rarity. A note whose title,
    /// plaintext or a tag contains the whole query as a substring always
    /// matches and gets a bonus. Hits are ordered by score, then id.
    ///
    /// An empty or blank query returns nothing, as does an index that has
    /// never been built.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = normalize(query);
        if needle.is_empty() || !self.is_ready() {
            return Vec::new();
        }

        let mut candidates: HashMap<&str, Candidate> = HashMap::new();
        let total = self.entries.len() as f64;

        let tokens: BTreeSet<String> = tokenize(query).into_iter().collect();
        for token in &tokens {
            let matching = self
                .postings
                .range::<str, _>((Bound::Included(token.as_str()), Bound::Unbounded))
                .take_while(|(term, _)| term.starts_with(token.as_str()));

            for (term, postings) in matching {
                let weight = if term == token { 1.0 } else { PREFIX_WEIGHT };
                let rarity = (1.0 + total / postings.len() as f64).ln();

                for (id, posting) in postings {
                    let candidate = candidates.entry(id.as_str()).or_default();
                    let frequency = f64::from(posting.title) * Field::Title.boost()
                        + f64::from(posting.plaintext) * Field::Plaintext.boost()
                        + f64::from(posting.tags) * Field::Tags.boost();

                    candidate.score += weight * rarity * frequency;
                    candidate.terms.insert(term.clone());
                    candidate.fields.extend(posting.fields());
                }
            }
        }

        for (id, entry) in &self.entries {
            let mut fields = Vec::new();
            if entry.title_folded.contains(&needle) {
                fields.push(Field::Title);
            }
            if entry.plaintext_folded.contains(&needle) {
                fields.push(Field::Plaintext);
            }
            if entry.tags_folded.iter().any(|tag| tag.contains(&needle)) {
                fields.push(Field::Tags);
            }
            if fields.is_empty() {
                continue;
            }

            let candidate = candidates.entry(id.as_str()).or_default();
            candidate.score += SUBSTRING_BONUS * fields.iter().map(|f| f.boost()).sum::<f64>();
            candidate.fields.extend(fields);
        }

        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter_map(|(id, candidate)| {
                let entry = self.entries.get(id)?;
                Some(SearchHit {
                    id: id.to_string(),
                    title: entry.title.clone(),
                    score: candidate.score,
                    matched_terms: candidate.terms.into_iter().collect(),
                    matched_fields: candidate.fields.into_iter().collect(),
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        tracing::trace!(query, hits = hits.len(), "search");
        hits
    }
}
