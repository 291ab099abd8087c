//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache.
//!
//! # Tasks
//! - Reaper: Removes expired cache entries once per sweep interval

mod reaper;

pub(crate) use reaper::spawn_reaper;
