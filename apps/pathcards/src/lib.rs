//! # pathcards
//!
//! Command line front end for `pathcards-core`: reads model documents and
//! blacklists, applies the TOML config, runs the miner and writes cards and
//! SIF triples.

pub mod cli;
pub mod config;
