use std::error::Error;
use std::fmt;

pub mod group_member;
pub mod meeting;
pub mod meeting_user;
pub mod stokvel_group;
pub mod user;

/// Returned when a status string matches none of an enumeration's
/// recognized values, even case-insensitively.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownStatus;

impl Error for UnknownStatus {}

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized status value")
    }
}
