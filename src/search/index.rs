use crate::domain::{Note, NoteId};
use crate::search::query::Field;
use crate::search::tokenize::{normalize, tokenize};
use std::collections::{BTreeMap, HashMap};

/// Per-field occurrence counts of one term in one note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Posting {
    pub title: u32,
    pub plaintext: u32,
    pub tags: u32,
}

impl Posting {
    fn bump(&mut self, field: Field) {
        match field {
            Field::Title => self.title += 1,
            Field::Plaintext => self.plaintext += 1,
            Field::Tags => self.tags += 1,
        }
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        [
            (Field::Title, self.title),
            (Field::Plaintext, self.plaintext),
            (Field::Tags, self.tags),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(field, _)| field)
    }
}

/// What the index keeps about one note: enough to render a hit and to
/// answer substring queries, plus its own terms so removal stays local.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub title: String,
    pub title_folded: String,
    pub plaintext_folded: String,
    pub tags_folded: Vec<String>,
    terms: Vec<String>,
}

/// Inverted index over note titles, plaintext and tags.
///
/// All operations are synchronous and in memory. Until the first
/// [`SearchIndex::build_index`] the index is not ready: searches return
/// nothing and incremental mutations are ignored.
#[derive(Debug, Default)]
pub struct SearchIndex {
    ready: bool,
    pub(crate) entries: HashMap<NoteId, Entry>,
    pub(crate) postings: BTreeMap<String, HashMap<NoteId, Posting>>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything and indexes `notes` from scratch. Tombstoned
    /// notes are skipped.
    pub fn build_index(&mut self, notes: &[Note]) {
        self.entries.clear();
        self.postings.clear();
        self.ready = true;

        for note in notes.iter().filter(|note| !note.deleted) {
            self.insert(note);
        }

        tracing::debug!(count = self.entries.len(), "search index rebuilt");
    }

    /// Indexes a newly created note. Re-adding an id replaces its entry.
    pub fn add_to_index(&mut self, note: &Note) {
        if !self.accepting("add", &note.id) {
            return;
        }
        self.discard(&note.id);
        if !note.deleted {
            self.insert(note);
        }
    }

    /// Replaces the entry for `note.id`. Safe to call repeatedly.
    pub fn update_in_index(&mut self, note: &Note) {
        if !self.accepting("update", &note.id) {
            return;
        }
        self.discard(&note.id);
        if !note.deleted {
            self.insert(note);
        }
    }

    /// Drops the entry for `id`, if any.
    pub fn remove_from_index(&mut self, id: &str) {
        if !self.accepting("remove", id) {
            return;
        }
        self.discard(id);
    }

    /// Whether [`SearchIndex::build_index`] has been called.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct terms currently indexed.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    fn accepting(&self, op: &str, id: &str) -> bool {
        if !self.ready {
            tracing::warn!(op, note_id = id, "search index not built yet, mutation ignored");
        }
        self.ready
    }

    fn insert(&mut self, note: &Note) {
        let mut counts: HashMap<String, Posting> = HashMap::new();

        for term in tokenize(&note.title) {
            counts.entry(term).or_default().bump(Field::Title);
        }
        for term in tokenize(&note.plaintext) {
            counts.entry(term).or_default().bump(Field::Plaintext);
        }
        for term in note.tags.iter().flat_map(|tag| tokenize(tag)) {
            counts.entry(term).or_default().bump(Field::Tags);
        }

        let mut terms = Vec::with_capacity(counts.len());
        for (term, posting) in counts {
            self.postings
                .entry(term.clone())
                .or_default()
                .insert(note.id.clone(), posting);
            terms.push(term);
        }

        self.entries.insert(
            note.id.clone(),
            Entry {
                title: note.title.clone(),
                title_folded: normalize(&note.title),
                plaintext_folded: normalize(&note.plaintext),
                tags_folded: note.tags.iter().map(|tag| normalize(tag)).collect(),
                terms,
            },
        );
    }

    fn discard(&mut self, id: &str) {
        let Some(entry) = self.entries.remove(id) else {
            return;
        };

        for term in entry.terms {
            if let Some(postings) = self.postings.get_mut(&term) {
                postings.remove(id);
                if postings.is_empty() {
                    self.postings.remove(&term);
                }
            }
        }
    }
}
