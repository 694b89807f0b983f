pub mod collector;
pub mod kill;
pub mod sensors;
pub mod snapshot;
