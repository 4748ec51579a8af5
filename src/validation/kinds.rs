//! Standard host kinds with validation

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{RelationError, RelationResult};
use crate::types::HostKind;

/// Component name of the booking subsystem
pub const BOOKING_COMPONENT: &str = "mod_booking";

/// Area of a booking option
pub const OPTION_AREA: &str = "option";

/// Area of a single date of a booking option
pub const OPTIONDATE_AREA: &str = "optiondate";

/// Host kinds accepted when nothing else is configured
pub const STANDARD_HOST_KINDS: &[(&str, &str)] = &[
    (BOOKING_COMPONENT, OPTION_AREA),
    (BOOKING_COMPONENT, OPTIONDATE_AREA),
];

/// Closed enumeration of host kinds relations may be attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHostKinds {
    kinds: BTreeSet<HostKind>,
}

impl KnownHostKinds {
    pub fn new(kinds: impl IntoIterator<Item = HostKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn contains(&self, kind: &HostKind) -> bool {
        self.kinds.contains(kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostKind> {
        self.kinds.iter()
    }

    /// Check a `(component, area)` pair against the list (case sensitive)
    pub fn resolve(&self, component: &str, area: &str) -> RelationResult<HostKind> {
        let kind = HostKind::new(component, area);
        if self.contains(&kind) {
            Ok(kind)
        } else {
            Err(RelationError::InvalidArgument(format!(
                "Unknown host kind '{}'. Known: {}",
                kind,
                self.kinds
                    .iter()
                    .map(HostKind::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }
}

impl Default for KnownHostKinds {
    fn default() -> Self {
        Self::new(
            STANDARD_HOST_KINDS
                .iter()
                .map(|(component, area)| HostKind::new(*component, *area)),
        )
    }
}

/// Parses `component:area,component:area`
impl FromStr for KnownHostKinds {
    type Err = RelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut kinds = BTreeSet::new();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (component, area) = item
                .split_once(':')
                .map(|(c, a)| (c.trim(), a.trim()))
                .filter(|(c, a)| !c.is_empty() && !a.is_empty())
                .ok_or_else(|| {
                    RelationError::InvalidArgument(format!(
                        "Host kind '{}' must look like component:area",
                        item
                    ))
                })?;
            kinds.insert(HostKind::new(component, area));
        }

        if kinds.is_empty() {
            return Err(RelationError::InvalidArgument(
                "At least one host kind is required".to_string(),
            ));
        }
        Ok(Self { kinds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_standard_kind() {
        let known = KnownHostKinds::default();
        let kind = known.resolve("mod_booking", "option").unwrap();
        assert_eq!(kind, HostKind::new("mod_booking", "option"));
        assert!(known.resolve("mod_booking", "optiondate").is_ok());
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let known = KnownHostKinds::default();
        let err = known.resolve("mod_booking", "Option").unwrap_err();
        assert!(matches!(err, RelationError::InvalidArgument(_)));
        assert!(err.to_string().contains("Unknown host kind"));
    }

    #[test]
    fn test_parse_kind_list() {
        let known: KnownHostKinds = "booking:option, booking:optiondate ,".parse().unwrap();
        assert!(known.contains(&HostKind::new("booking", "option")));
        assert!(known.contains(&HostKind::new("booking", "optiondate")));
        assert_eq!(known.iter().count(), 2);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("booking".parse::<KnownHostKinds>().is_err());
        assert!("booking:".parse::<KnownHostKinds>().is_err());
        assert!("".parse::<KnownHostKinds>().is_err());
    }
}
