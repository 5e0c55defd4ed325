pub mod address_file;
pub mod deployer;
pub mod error;
pub mod fuel;
pub mod shared;

pub use error::{DeployError, Result};
