use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// declares a string-backed identifier type. identifiers from the imported
/// schedule, network and fleet are opaque strings, so each aggregate gets its
/// own newtype to keep e.g. a [`LinkId`] from being used where a [`NodeId`]
/// is expected.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(String::from(value))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }
    };
}

string_id!(
    /// identifies a [`super::Line`] in a [`super::Timetable`]
    LineId
);
string_id!(
    /// identifies a [`super::Route`] within its owning line
    RouteId
);
string_id!(
    /// identifies a [`super::Departure`] within its owning route
    DepartureId
);
string_id!(StopFacilityId);
string_id!(NodeId);
string_id!(LinkId);
string_id!(VehicleId);
string_id!(VehicleTypeId);
string_id!(
    /// capacity-sharing key. links carrying the same resource id are mutually
    /// exclusive in the simulation engine.
    ResourceId
);
