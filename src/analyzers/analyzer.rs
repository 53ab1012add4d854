use crate::analyzers::aggregate::record_note_frequencies;
use crate::analyzers::assignment::assign;
use crate::analyzers::types::{AssignmentRequest, AssignmentResult, Record, RouteAnalysis};
use crate::error::RouteError;
use crate::parser::{clean_note, note_column_index, parse_line};
use tracing::{debug, info};

/// Parses the full text of a route export and tallies its notes.
///
/// The first line is the header; the note column is the first header that
/// contains "note" in any case. Blank lines, rows too short to reach the
/// note column, and rows whose cleaned note is empty are skipped.
///
/// # Errors
///
/// Returns [`RouteError::NoNoteColumn`] if no header names a note column.
#[tracing::instrument(skip(text), fields(bytes = text.len()))]
pub fn parse_and_analyze(text: &str) -> Result<RouteAnalysis, RouteError> {
    let mut lines = text.split('\n');
    let headers = parse_line(lines.next().unwrap_or_default());
    let note_index = note_column_index(&headers).ok_or(RouteError::NoNoteColumn)?;
    debug!(note_index, header = %headers[note_index], "Note column located");

    let mut records = Vec::new();
    let mut short_rows = 0usize;
    let mut empty_notes = 0usize;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields = parse_line(line);
        let Some(raw_note) = fields.get(note_index) else {
            short_rows += 1;
            continue;
        };

        let note = clean_note(raw_note);
        if note.is_empty() {
            empty_notes += 1;
            continue;
        }

        records.push(Record::from_fields(&fields, note));
    }

    let note_frequencies = record_note_frequencies(&records);

    if short_rows > 0 || empty_notes > 0 {
        debug!(short_rows, empty_notes, "Skipped rows without a usable note");
    }
    info!(
        records = records.len(),
        unique_notes = note_frequencies.len(),
        "Route file analyzed"
    );

    Ok(RouteAnalysis {
        records,
        note_frequencies,
    })
}

/// The route file currently loaded by a caller.
///
/// Loading replaces the previous analysis only when parsing succeeds.
#[derive(Debug, Default)]
pub struct RouteSession {
    analysis: Option<RouteAnalysis>,
}

impl RouteSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzes `text` and installs the result as the current route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoNoteColumn`] and keeps the previous route
    /// untouched if the header has no note column.
    pub fn load(&mut self, text: &str) -> Result<&RouteAnalysis, RouteError> {
        let analysis = parse_and_analyze(text)?;
        let installed: &RouteAnalysis = self.analysis.insert(analysis);
        Ok(installed)
    }

    pub fn analysis(&self) -> Option<&RouteAnalysis> {
        self.analysis.as_ref()
    }

    pub fn records(&self) -> &[Record] {
        self.analysis
            .as_ref()
            .map(|a| a.records.as_slice())
            .unwrap_or_default()
    }

    /// Splits the loaded route between the original driver and a helper.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidAssignment`] if the request is invalid
    /// for the loaded route, including when nothing is loaded.
    #[tracing::instrument(skip(self, request), fields(papers = request.papers_to_take))]
    pub fn assign(&self, request: &AssignmentRequest) -> Result<AssignmentResult, RouteError> {
        let result = assign(self.records(), request)?;
        info!(
            split_stop_number = result.split_stop_number,
            helper_notes = result.helper_note_frequencies.len(),
            "Route split computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::NoteFrequency;

    const SAMPLE: &str = "Stop,Id,Date,From,To,Name,Street,House,Postal,City,Note\n\
        1,A1,2024-01-01,08:00,10:00,Jan,Main St,1,1000AB,Town,\"Not home\"\n\
        2,A2,2024-01-01,08:00,10:00,Piet,Side St,2,1000AB,Town,Not home\n\
        3,A3,2024-01-01,08:00,10:00,Els,Oak St,3,1000AB,Town,Refused\n";

    #[test]
    fn test_parse_sample_route() {
        let analysis = parse_and_analyze(SAMPLE).unwrap();

        assert_eq!(analysis.total_record_count(), 3);
        assert_eq!(
            analysis.note_frequencies,
            vec![
                NoteFrequency::new("Not home", 2),
                NoteFrequency::new("Refused", 1),
            ]
        );
        assert_eq!(analysis.records[0].name, "Jan");
        assert_eq!(analysis.records[2].stop_id, "A3");
    }

    #[test]
    fn test_no_note_column() {
        let result = parse_and_analyze("Stop,Id,Date\n1,A1,2024-01-01\n");
        assert!(matches!(result, Err(RouteError::NoNoteColumn)));
    }

    #[test]
    fn test_empty_text_has_no_note_column() {
        assert!(matches!(parse_and_analyze(""), Err(RouteError::NoNoteColumn)));
    }

    #[test]
    fn test_header_only() {
        let analysis = parse_and_analyze("Stop,Note").unwrap();
        assert!(analysis.records.is_empty());
        assert!(analysis.note_frequencies.is_empty());
    }

    #[test]
    fn test_skips_blank_short_and_empty_note_rows() {
        let text = "Stop,Note,Extra\n\
            1,Refused,x\n\
            \n   \n\
            2\n\
            3,   ,x\n\
            4,\"\",x\n\
            5,Refused,x\n";
        let analysis = parse_and_analyze(text).unwrap();

        assert_eq!(analysis.total_record_count(), 2);
        assert_eq!(analysis.records[0].stop_number, "1");
        assert_eq!(analysis.records[1].stop_number, "5");
        assert_eq!(analysis.note_frequencies, vec![NoteFrequency::new("Refused", 2)]);
    }

    #[test]
    fn test_note_column_not_at_position_ten() {
        let text = "Stop,Remarks / Notes\n7,Leave at door\n";
        let analysis = parse_and_analyze(text).unwrap();
        let record = &analysis.records[0];

        assert_eq!(record.note, "Leave at door");
        // Positional mapping still takes index 1 as the stop id
        assert_eq!(record.stop_id, "Leave at door");
        assert_eq!(record.city, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "Stop,Note\r\n1,Refused\r\n2,Not home\r\n";
        let analysis = parse_and_analyze(text).unwrap();

        assert_eq!(analysis.total_record_count(), 2);
        assert_eq!(analysis.records[0].note, "Refused");
    }

    #[test]
    fn test_quoted_note_with_comma() {
        let text = "Stop,Note\n1,\"Door 2, back side\"\n";
        let analysis = parse_and_analyze(text).unwrap();
        assert_eq!(analysis.records[0].note, "Door 2, back side");
    }

    #[test]
    fn test_frequency_sum_matches_records() {
        let analysis = parse_and_analyze(SAMPLE).unwrap();
        let sum: usize = analysis.note_frequencies.iter().map(|f| f.count).sum();
        assert_eq!(sum, analysis.records.len());
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(
            parse_and_analyze(SAMPLE).unwrap(),
            parse_and_analyze(SAMPLE).unwrap()
        );
    }

    #[test]
    fn test_session_failed_load_keeps_previous_route() {
        let mut session = RouteSession::new();
        session.load(SAMPLE).unwrap();

        let result = session.load("Stop,Id\n1,A1\n");
        assert!(matches!(result, Err(RouteError::NoNoteColumn)));
        assert_eq!(session.records().len(), 3);
    }

    #[test]
    fn test_session_load_replaces_previous_route() {
        let mut session = RouteSession::new();
        session.load(SAMPLE).unwrap();
        session.load("Stop,Note\n1,Refused\n").unwrap();

        let analysis = session.analysis().unwrap();
        assert_eq!(analysis.total_record_count(), 1);
        assert_eq!(analysis.note_frequencies, vec![NoteFrequency::new("Refused", 1)]);
    }

    #[test]
    fn test_session_assign() {
        let mut session = RouteSession::new();
        session.load(SAMPLE).unwrap();

        let request = AssignmentRequest::from_form("Anna", "Bram", "1").unwrap();
        let result = session.assign(&request).unwrap();

        assert_eq!(result.split_stop_number, 2);
        assert_eq!(
            result.helper_note_frequencies,
            vec![NoteFrequency::new("Refused", 1)]
        );
    }

    #[test]
    fn test_session_assign_without_route() {
        let session = RouteSession::new();
        let request = AssignmentRequest::from_form("Anna", "Bram", "1").unwrap();

        assert!(matches!(
            session.assign(&request),
            Err(RouteError::InvalidAssignment(_))
        ));
    }
}
