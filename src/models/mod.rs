pub mod filter;
pub mod record;
pub mod snapshot;

pub use filter::RecordFilter;
pub use record::{Record, COLUMNS};
pub use snapshot::Snapshot;
