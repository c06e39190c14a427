pub mod invite;
pub mod phase;
pub mod submission;
