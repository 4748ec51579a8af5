//! Parent-level operations: cascading deletes and outlier detection

use tracing::{debug, info, warn};

use crate::error::{RelationError, RelationResult};
use crate::types::{BulkDeleteReport, InstanceId};
use crate::validation::{KnownHostKinds, BOOKING_COMPONENT, OPTIONDATE_AREA, OPTION_AREA};

use super::{Collaborators, RelationHandler};

/// Delete the relations of every instance of this handler's kind under `parent_id`.
///
/// Each id is deleted on its own; failures are collected in the report and
/// do not stop the others. Running it twice is harmless.
pub fn delete_all_for_parent(
    handler: &RelationHandler,
    parent_id: InstanceId,
) -> RelationResult<BulkDeleteReport> {
    if parent_id == 0 {
        return Err(RelationError::InvalidArgument(format!(
            "Cannot clear '{}' relations without a parent id",
            handler.kind
        )));
    }

    let instance_ids = handler.deps.hosts.instances_of(&handler.kind, parent_id)?;
    let report = handler
        .deps
        .store
        .delete_by_addresses(&handler.kind, &instance_ids);

    if report.succeeded() {
        info!(
            kind = %handler.kind,
            parent_id,
            hosts = instance_ids.len(),
            removed = report.removed,
            "Cleared relations for parent"
        );
    } else {
        warn!(
            kind = %handler.kind,
            parent_id,
            removed = report.removed,
            failed = ?report.failed,
            "Some relations could not be cleared"
        );
    }
    Ok(report)
}

/// True when the sub-instances of `parent_id` reference more than one entity.
///
/// Only existing relations count; sub-instances without one are ignored.
pub fn has_divergent_sub_entities(
    handler: &RelationHandler,
    parent_id: InstanceId,
) -> RelationResult<bool> {
    let sub_kind = handler.sub_kind()?;
    let instance_ids = handler.deps.hosts.instances_of(&sub_kind, parent_id)?;
    if instance_ids.is_empty() {
        return Ok(false);
    }

    let distinct = handler
        .deps
        .store
        .distinct_entity_count(&sub_kind, &instance_ids)?;
    debug!(kind = %sub_kind, parent_id, distinct, "Counted distinct sub-entities");
    Ok(distinct > 1)
}

/// Remove every relation under a booking instance: those of its options and
/// those of each option's dates.
///
/// Both kinds go through `known`, so a deployment that excludes booking
/// options gets `InvalidArgument` and one that excludes option dates only
/// clears the options. An option whose dates cannot be listed is reported
/// by its own id in `failed`; the remaining options are still processed.
pub fn delete_relations_for_booking(
    deps: &Collaborators,
    known: &KnownHostKinds,
    booking_id: InstanceId,
) -> RelationResult<BulkDeleteReport> {
    if booking_id == 0 {
        return Err(RelationError::InvalidArgument(
            "Could not clear entity relations because of missing booking id".to_string(),
        ));
    }

    let options = RelationHandler::new(known, BOOKING_COMPONENT, OPTION_AREA, deps.clone())?;
    let option_ids = deps.hosts.instances_of(&options.kind, booking_id)?;
    let mut report = delete_all_for_parent(&options, booking_id)?;

    let date_kind = options.kind.with_area(OPTIONDATE_AREA);
    if !known.contains(&date_kind) {
        debug!(kind = %date_kind, "Host kind not enabled, skipping option dates");
        return Ok(report);
    }
    let dates = RelationHandler::new(known, BOOKING_COMPONENT, OPTIONDATE_AREA, deps.clone())?;

    for option_id in option_ids {
        match delete_all_for_parent(&dates, option_id) {
            Ok(part) => report.merge(part),
            Err(e) => {
                warn!(booking_id, option_id, error = %e, "Could not clear relations of option dates");
                report.failed.push(option_id);
            }
        }
    }
    Ok(report)
}
