pub mod artifact_name;
mod descriptor;
mod scan_error;
mod scan_input;
mod scanner;

pub use descriptor::{ArtifactDescriptor, DESCRIPTOR_SUFFIX};
pub use scan_error::ScanError;
pub use scan_input::{AmenityInput, WalkshedInput};
pub use scanner::scan;
