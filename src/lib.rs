//! Terminal food diary backed by USDA FoodData Central search.
//!
//! The library is presentation-free: [`Diary`] owns the day's log, the
//! overlay state machine and the search client, exposing one method per
//! user intent; a front end renders the snapshots it reads back.

pub mod client;
pub mod config;
pub mod diary;
pub mod error;
pub mod log;
pub mod models;
pub mod overlay;
pub mod store;

pub use client::FdcClient;
pub use config::Config;
pub use diary::Diary;
pub use error::{DiaryError, DiaryResult};
pub use log::FoodLog;
pub use models::{FoodRecord, LogEntry, Totals};
pub use overlay::{Overlay, OverlayState};
pub use store::FileStore;
