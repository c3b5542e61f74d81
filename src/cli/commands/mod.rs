mod dealers;
mod init;
mod reviews;

pub use dealers::{cmd_dealer_info, cmd_list_dealers};
pub use init::cmd_init;
pub use reviews::cmd_list_reviews;
