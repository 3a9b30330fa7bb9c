//! Contract-violation errors.
//!
//! Problem-space outcomes (infeasible, timeout, dropped pin) are never
//! errors — they show up as a status on [`crate::extract::ScheduleSolution`].
//! Only malformed input that should have been caught upstream produces an
//! `Err` here; everything else is a value.

pub use anyhow::{Error, Result, anyhow, bail};
