//! A fixed-capacity, round-robin slot set written in pure Rust.
//! `no_std`, no heap / `alloc`, no `unsafe`.
//!
//! Designed for embedded and real-time schedulers where pending work is
//! identified by a small integer: a channel ID, a task ID, a peripheral index.
//!
//! [`BitScanSet`] is the main struct in this library. [`GuardedBitScanSet`]
//! wraps one behind a spin lock for use from several threads.
//!
//! # Examples
//! ```
//! use bitscan_deque::{bucket_count, BitScanSet, ScanError};
//!
//! const SLOTS: usize = 8;
//! let mut set = BitScanSet::<SLOTS, { bucket_count(SLOTS) }>::new();
//! set.push_back(2).unwrap();
//! set.push_front(3).unwrap();
//! set.push_front(5).unwrap();
//!
//! assert_eq!(set.front(), Some(5));
//! set.pop_front().unwrap();
//! assert_eq!(set.front(), Some(2)); // scanned 6, 7, 0, 1, 2
//! set.pop_front().unwrap();
//! assert_eq!(set.front(), Some(3));
//! set.pop_front().unwrap();
//! assert!(set.empty());
//! assert_eq!(set.pop_front(), Err(ScanError::Empty));
//! ```
//!
//! # Semantics
//!
//! - A slot is either pending or idle; pushing a pending slot is a no-op
//! - `push_back` marks a slot pending and leaves the scan position alone
//! - `push_front` marks a slot pending and moves the scan position onto it,
//!   so it is retrieved next
//! - `front` and `pop_front` scan circularly from the last position, which
//!   spreads retrieval across all pending slots
//! - Every scan stops after one circuit of the slots, pending or not
//! - Bad slots and empty scans are reported through return values, never
//!   panics
//!
//! # Features
//!
//! - `guarded` (default): enables [`GuardedBitScanSet`] and its `spin`
//!   dependency
//!
//! # Logging
//!
//! Rejected slots and `push_front` escalations are reported through the
//! [`log`](https://docs.rs/log) facade at `trace` level.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), no_std)]

mod bitmap;
mod error;
#[cfg(feature = "guarded")]
mod guarded;
mod scan_set;

pub use bitmap::{IterOnes, bucket_count};
pub use error::ScanError;
#[cfg(feature = "guarded")]
pub use guarded::GuardedBitScanSet;
pub use scan_set::BitScanSet;
