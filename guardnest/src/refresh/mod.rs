mod client;
mod config;
mod errors;

pub use client::{HttpRefreshAuthority, RefreshAuthority};
pub use config::{NEXT_REFRESH_URL, REFRESH_TIMEOUT};
pub use errors::RefreshError;
