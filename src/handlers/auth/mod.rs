pub mod me;
pub mod session;

pub use me::me as users_me;
pub use session::{signin as auth_signin, signup as auth_signup};
