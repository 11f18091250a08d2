pub mod approvals;
pub mod directory;
pub mod http;
pub mod scheduling;
pub mod time;
pub mod world;
