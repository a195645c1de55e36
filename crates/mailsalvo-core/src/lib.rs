//! # mailsalvo-core
//!
//! Campaign logic for the bulk-mail dispatcher.
//!
//! This crate provides:
//! - JSON configuration model and validation
//! - Group planning: partitioning the victim pool into disjoint
//!   sender/recipient groups with one message each
//! - The batch dispatch loop draining a plan through one SMTP session
//!
//! The protocol itself lives in `mailsalvo-smtp`; this crate only decides
//! who gets what and in which order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
mod error;
pub mod message;
pub mod plan;

pub use config::{Config, ConfigError};
pub use dispatch::{DeliveryReport, DispatchError, dispatch};
pub use error::{Error, Result};
pub use message::Message;
pub use plan::{Group, PlanError, plan_groups};
