//! Constants shared by the end-to-end tests.
//!
//! The demo items are created in this order on an empty store, so their ids
//! are fixed.

pub const THE_MARTIAN_ID: &str = "1";
pub const THE_MARTIAN_NAME: &str = "The Martian";
pub const THE_MARTIAN_AUTHOR: &str = "Andy Weir";

pub const DUNE_ID: &str = "2";
pub const DUNE_NAME: &str = "Dune";
pub const DUNE_AUTHOR: &str = "Denis Villeneuve";

pub const TIME_MAGAZINE_ID: &str = "3";
pub const TIME_MAGAZINE_NAME: &str = "Time Magazine";

pub const DEMO_ITEMS_COUNT: usize = 3;

/// Id that no test ever creates.
pub const MISSING_ID: &str = "999";

// Timeouts
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
