#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod averaging;
mod channel;
mod command;
mod driver;
mod error;
mod power;

pub use channel::Channel;
pub use driver::{Ads7828, DEFAULT_ADDRESS, address_for_pins};
pub use error::Error;
pub use power::PowerMode;
