mod types;

pub use types::{MosaicError, Result};
