//! guardnest - cookie session gate for protected API routes
//!
//! For every request the gate reads a session token from a cookie, looks the
//! session up in a [`SessionStore`], and decides whether to let the request
//! through. Sessions that are expired or close to expiry are renewed by an
//! external [`RefreshAuthority`]; the cookies it returns are handed back to
//! the caller for the client's next request.
//!
//! The crate is framework agnostic. `guardnest-axum` wires it into axum.

mod config;
mod refresh;
mod session;
mod storage;

pub use config::{REFRESH_COOKIE_NAME, SESSION_COOKIE_NAME, SESSION_REFRESH_WINDOW, load_env_files};

pub use refresh::{
    HttpRefreshAuthority, NEXT_REFRESH_URL, REFRESH_TIMEOUT, RefreshAuthority, RefreshError,
};

pub use session::{
    AuthGate, AuthenticatedUser, DenyReason, ExpiryState, GateDecision, RefreshGrant, Session,
    SessionError, SessionService, Validation, VerifyResponse,
};

pub use storage::{
    DATABASE_MAX_CONNECTIONS, DB_TABLE_SESSIONS, InMemorySessionStore, PostgresSessionStore,
    SessionStore, SqliteSessionStore, StorageError, StoreKind, connect_session_store,
};
