pub mod limits;
pub mod plan;
pub mod read;
pub mod readme;
pub mod verify;
pub mod write;
mod zip_write;

// Re-exports for convenience
pub use limits::{ReadLimits, ReadLimitsOverrides};
pub use plan::{PayloadFile, WritePlan};
pub use read::ContainerReader;
pub use readme::render_readme;
pub use verify::{Discrepancy, VerifyReport};
pub use write::{convert, ContainerWriter, ConvertReport};
