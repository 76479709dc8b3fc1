//! Import notebook documents as modules, and convert notebook trees into
//! plain source packages.
//!
//! A notebook directory `nbs/` becomes importable as package `nbs`: the
//! notebook `nbs/module.ipynb` is module `nbs.module`, and a subdirectory
//! holding a package marker (`nbs/child/__init__.py`) is subpackage
//! `nbs.child`.

pub mod cli;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod extract;
pub mod import;
pub mod resolve;
pub mod types;

pub use error::{DocumentError, EvalError, ImportError, Result};
