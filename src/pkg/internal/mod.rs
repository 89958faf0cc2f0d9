pub mod extract;
pub mod record;
pub mod retry;
pub mod sheets;
pub mod transcribe;
