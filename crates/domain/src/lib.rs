//! # minaret-domain
//!
//! Pure domain model for the minaret call scheduler.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Calls** (the named playback events: fajr, maghrib, isha) and the
//!   audio resource each one uses
//! - Define the **Schedule** (one entry of call times per calendar date)
//! - Define **Armed triggers** (today's call times with once-per-day firing state)
//! - Define **Devices** (reported player state, media requests)
//! - Define **Playback** (resource URLs and dispatch outcomes)
//! - Define **Log entries** (the lines shown to the operator)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod call;
pub mod device;
pub mod log;
pub mod playback;
pub mod schedule;
pub mod trigger;
