//! Shared infrastructure for the ifcat command line tools.

#![deny(unsafe_code)]

pub mod logging;
