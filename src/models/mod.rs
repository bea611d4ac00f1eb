mod account;
mod post;

pub use account::Account;
pub use post::{Post, PostId};
