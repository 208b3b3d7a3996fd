//! marquee CLI - Media Library Shell
//!
//! Thin binary wrapper around [`marquee::cli::run`].

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::process::ExitCode;

fn main() -> ExitCode {
    marquee::cli::run()
}
