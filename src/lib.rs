//! IPU college predictor.
//!
//! Loads a table of historical closing ranks, lists the institute/program
//! seats a given rank, category and quota would have admitted, and exports
//! that list as a printable document. The desktop front end lives in the
//! `ipu-predictor` binary; everything here is UI-independent.

pub mod config;
pub mod data;
pub mod export;
pub mod state;
