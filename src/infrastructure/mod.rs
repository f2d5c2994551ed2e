pub mod insights;
pub mod storage;
pub mod sync;
