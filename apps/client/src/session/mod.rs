// Session handling: the persisted token store, the refresh operation and
// the authenticated-call wrapper that ties them together.

pub mod auth;
pub mod refresh;
pub mod store;

pub use auth::Authenticator;
pub use refresh::{HttpRefresher, TokenRefresher};
pub use store::SessionStore;
