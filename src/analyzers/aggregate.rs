use crate::analyzers::types::{NoteFrequency, Record};
use std::collections::HashMap;

/// Tallies each distinct note into a [`NoteFrequency`] table.
///
/// Empty notes are ignored. Entries are ordered by descending count; notes
/// with equal counts keep the order in which they were first seen.
pub fn note_frequencies<'a, I>(notes: I) -> Vec<NoteFrequency>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<NoteFrequency> = Vec::new();

    for note in notes {
        if note.is_empty() {
            continue;
        }

        let slot = *slots.entry(note).or_insert_with(|| {
            table.push(NoteFrequency::new(note, 0));
            table.len() - 1
        });
        table[slot].count += 1;
    }

    // sort_by is stable, so ties stay in first-seen order
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// Tallies the notes of a slice of records.
pub fn record_note_frequencies(records: &[Record]) -> Vec<NoteFrequency> {
    note_frequencies(records.iter().map(|r| r.note.as_str()))
}
