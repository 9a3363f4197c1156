//! Command-line front end for the Dockerfile formatter.

pub mod args;
pub mod config;
pub mod run;
