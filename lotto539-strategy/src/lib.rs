pub mod offset;
pub mod report;
pub mod search;
pub mod week;
