//! taxport splits GST, HST and QST out of tax-inclusive amounts and lays a year of income and
//! expense records out for CRA forms and tax software.
//!
//! The engine (`rates`, `decompose`, `ledger`, `export`, `summary`, `cca`) is synchronous and does
//! no I/O. The CLI layer (`args`, `commands`) reads record files and writes exports.

pub mod args;
pub mod cca;
pub mod commands;
mod config;
pub mod decompose;
pub mod error;
pub mod export;
pub mod ledger;
pub mod model;
pub mod rates;
pub mod summary;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::Error;
pub use error::Result;
