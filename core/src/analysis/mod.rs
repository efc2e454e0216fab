pub use inference::*;
pub use snapshot::*;

mod inference;
mod snapshot;
