//! # gitpulse CLI
//!
//! Command handlers, configuration and credential discovery for the
//! `gitpulse` binary. The GitHub client itself lives in `gitpulse-gh`.

pub mod cli;
pub mod clients;
pub mod config;
pub mod consts;
pub mod creds;
pub mod output;
