mod init;
mod search;
mod serve;

pub use init::cmd_init;
pub use search::cmd_search;
pub use serve::cmd_serve;
