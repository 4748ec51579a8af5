//! Booking conflict checking
//!
//! The availability calculator itself lives outside this crate. The engine
//! only needs [`ConflictChecker`] and turns its answers into field messages
//! (see [`messages`]).

pub mod messages;

pub use messages::{conflict_message, CONFLICTS_HEADER, OUTSIDE_OPENING_HOURS};

use crate::error::RelationResult;
use crate::types::{ConflictReport, DateRange, EntityId, InstanceId};

/// Decides whether an entity is free for the given date ranges
pub trait ConflictChecker: Send + Sync {
    /// Check `entity_id` for `date_ranges`.
    ///
    /// `host_id` is the host's existing id (0 for a host not created yet) so
    /// a host never conflicts with its own earlier booking. `area` tells the
    /// checker whether the host is an option or a single option date.
    fn check(
        &self,
        entity_id: EntityId,
        date_ranges: &[DateRange],
        host_id: InstanceId,
        area: &str,
    ) -> RelationResult<ConflictReport>;
}

/// Checker that reports every entity as available.
///
/// Used when no availability calculator is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllChecker;

impl ConflictChecker for AcceptAllChecker {
    fn check(
        &self,
        _entity_id: EntityId,
        _date_ranges: &[DateRange],
        _host_id: InstanceId,
        _area: &str,
    ) -> RelationResult<ConflictReport> {
        Ok(ConflictReport::default())
    }
}
