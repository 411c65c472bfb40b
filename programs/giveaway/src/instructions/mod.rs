pub mod append_entries;
pub mod create_bucket;
pub mod fulfill_randomness;
pub mod init_config;
#[cfg(feature = "devnet")]
pub mod mock_fulfill;
pub mod replace_entries;
pub mod transfer_admin;

pub use append_entries::*;
pub use create_bucket::*;
pub use fulfill_randomness::*;
pub use init_config::*;
#[cfg(feature = "devnet")]
pub use mock_fulfill::*;
pub use replace_entries::*;
pub use transfer_admin::*;
