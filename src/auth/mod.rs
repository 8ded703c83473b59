pub mod guard;
pub mod session;
pub mod storage;

pub use guard::{check, GuardOutcome, LOGIN_REQUIRED};
pub use session::SessionStore;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
