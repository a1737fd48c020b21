#![doc(test(attr(deny(warnings))))]

//! Sterdiary core: the screen back-stack, the new-entry wizard and the diary
//! session built on them, plus a small shell for driving a session.

pub mod archive;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod utils;
pub mod wizard;

pub use errors::{DiaryError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing. Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("sterdiary tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
