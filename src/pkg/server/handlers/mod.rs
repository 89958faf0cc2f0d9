pub mod probes;
pub mod upload;
