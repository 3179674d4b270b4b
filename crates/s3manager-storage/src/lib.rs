pub mod aws;
pub mod config;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod traits;

pub use aws::AwsObjectStore;
pub use config::S3Config;
#[cfg(any(test, feature = "testing"))]
pub use mock::MockObjectStore;
pub use traits::{CopyConditions, GetObjectOutput, ObjectStore};
