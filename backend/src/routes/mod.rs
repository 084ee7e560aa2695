pub mod compliance;
pub mod filters;
pub mod overview;
pub mod passengers;
pub mod queue;
pub mod security;
pub mod trends;
pub mod voc;
