// SPDX-License-Identifier: MIT

//! fmcp-daemon: the long-running process that owns the FMDM, the broadcast
//! bus, and every monitored folder's pipeline (C9, C10).

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod backends;
pub mod bus;
pub mod discovery;
pub mod env;
pub mod error;
pub mod folder_manager;
pub mod supervisor;

pub use error::DaemonError;
pub use supervisor::Supervisor;
