pub mod cmd;
pub mod conf;
pub mod errors;
pub mod pkg;
pub mod prelude;

// Mock adapters shared between unit and integration tests.
pub mod test_support;
