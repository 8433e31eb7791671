pub mod me;
pub mod payments;
