// User profiles: the per-session store, the session registry that owns the
// stores, and the standalone prompt modifier.

pub mod handlers;
pub mod modifier;
pub mod session;
pub mod store;

pub use session::SessionRegistry;
