//! Splitting a route between the original driver and a helper.

use crate::analyzers::aggregate::record_note_frequencies;
use crate::analyzers::types::{AssignmentRequest, AssignmentResult, NoteFrequency, Record};
use crate::error::RouteError;
use tracing::debug;

impl AssignmentRequest {
    /// Builds a request from raw form values.
    ///
    /// Names are trimmed. `papers_to_take` must be a positive whole number.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidAssignment`] if a name is blank or the
    /// paper count is not a positive integer.
    pub fn from_form(
        original_driver: &str,
        helper_name: &str,
        papers_to_take: &str,
    ) -> Result<Self, RouteError> {
        let papers: i64 = papers_to_take.trim().parse().map_err(|_| {
            RouteError::InvalidAssignment(format!(
                "papers to take must be a whole number, got {papers_to_take:?}"
            ))
        })?;

        let papers = usize::try_from(papers)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| {
                RouteError::InvalidAssignment(format!(
                    "papers to take must be positive, got {papers}"
                ))
            })?;

        let request = AssignmentRequest {
            original_driver: original_driver.trim().to_string(),
            helper_name: helper_name.trim().to_string(),
            papers_to_take: papers,
        };
        request.check_fields()?;
        Ok(request)
    }

    /// Checks the request against the number of records on the route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidAssignment`] if a name is blank, the paper
    /// count is zero, or the helper would take the whole route or more.
    pub fn validate(&self, total_records: usize) -> Result<(), RouteError> {
        self.check_fields()?;

        if self.papers_to_take >= total_records {
            return Err(RouteError::InvalidAssignment(format!(
                "number of papers to take ({}) must be less than total records ({})",
                self.papers_to_take, total_records
            )));
        }

        Ok(())
    }

    fn check_fields(&self) -> Result<(), RouteError> {
        if self.original_driver.trim().is_empty() {
            return Err(RouteError::InvalidAssignment(
                "original driver name is required".into(),
            ));
        }
        if self.helper_name.trim().is_empty() {
            return Err(RouteError::InvalidAssignment(
                "helper name is required".into(),
            ));
        }
        if self.papers_to_take == 0 {
            return Err(RouteError::InvalidAssignment(
                "papers to take must be positive, got 0".into(),
            ));
        }
        Ok(())
    }
}

/// Tallies the notes of every record from `start_index` to the end.
///
/// A `start_index` at or past the end yields an empty table.
pub fn compute_assignment(records: &[Record], start_index: usize) -> Vec<NoteFrequency> {
    let suffix = records.get(start_index..).unwrap_or_default();
    debug!(
        start_index,
        helper_records = suffix.len(),
        "Computing helper note breakdown"
    );
    record_note_frequencies(suffix)
}

/// Validates `request` against `records` and computes the split.
///
/// # Errors
///
/// Returns [`RouteError::InvalidAssignment`] if the request fails validation.
pub fn assign(records: &[Record], request: &AssignmentRequest) -> Result<AssignmentResult, RouteError> {
    request.validate(records.len())?;

    let split_stop_number = records.len() - request.papers_to_take;
    let helper_note_frequencies = compute_assignment(records, split_stop_number);

    Ok(AssignmentResult {
        original_driver: request.original_driver.clone(),
        helper_name: request.helper_name.clone(),
        papers_to_take: request.papers_to_take,
        split_stop_number,
        helper_note_frequencies,
    })
}
