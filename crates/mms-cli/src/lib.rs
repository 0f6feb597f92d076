//! Library components of the `mms` command.

pub mod logging;
pub mod pipeline;
