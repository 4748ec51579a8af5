//! Pre-save conflict validation

use tracing::debug;

use crate::conflict::conflict_message;
use crate::error::RelationResult;
use crate::types::{DateRange, EntitySelection, FormSubmission, InstanceId, ValidationResult};

use super::RelationHandler;

/// Run the conflict checker once per row that selects an entity.
///
/// Rows without an entity field, with an empty value or with the sentinel
/// are skipped. Conflicts are collected as messages keyed by row index and
/// never abort the remaining rows; only checker failures are returned as
/// errors.
pub fn validate(
    handler: &RelationHandler,
    submission: &FormSubmission,
    date_ranges: &[DateRange],
    host_id: InstanceId,
) -> RelationResult<ValidationResult> {
    let mut result = ValidationResult::default();
    if !submission.has_entity_fields() {
        return Ok(result);
    }

    for (index, row, selection) in submission.entity_fields() {
        let EntitySelection::Entity(entity_id) = selection else {
            continue;
        };
        let area = row.area_tag.as_deref().unwrap_or_else(|| handler.area());

        let report = handler
            .deps
            .conflicts
            .check(entity_id, date_ranges, host_id, area)?;
        if let Some(message) = conflict_message(&report) {
            debug!(
                kind = %handler.kind,
                host_id,
                entity_id,
                index,
                conflicts = report.conflicts.len(),
                "Entity not available"
            );
            result.push(index, &message);
        }
    }

    Ok(result)
}
