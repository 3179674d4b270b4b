pub mod error;
pub mod time;
pub mod types;

pub use error::{ManagerError, Result};
pub use types::{BucketInfo, ObjectInfo};
