pub mod language;
pub mod region;
pub mod site;
pub mod snapshot;
pub mod timestamp;
