//! Host kind validation
//!
//! Relations may only be attached to host kinds from a closed, caller-supplied
//! list. The check runs once, when a handler is constructed.

mod kinds;

pub use kinds::{
    KnownHostKinds, BOOKING_COMPONENT, OPTIONDATE_AREA, OPTION_AREA, STANDARD_HOST_KINDS,
};
