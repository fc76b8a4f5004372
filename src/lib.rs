//!A small library for redirecting `dlopen` requests from one library path to another.
//!
//!The redirect table is fixed when the interposer is built. At run time every call the host
//!process makes to `dlopen` is checked against the table: a path that exactly matches an old
//!path is replaced by its new path, everything else is forwarded untouched to the real loader.
//!
//!The interposer itself lives in the `cdylib` member of this workspace and is meant to be
//!injected with `LD_PRELOAD`. This crate holds the parts that do not depend on being loaded
//!that way, so they can be tested on their own.
//!
//! # Examples
//! ```
//! use dlopen_redirect::{Redirect, RedirectTable};
//!
//! static REDIRECTS: RedirectTable =
//!     RedirectTable::new(&[Redirect::new(c"./lib1.so", c"./lib2.so")]);
//!
//! let resolution = REDIRECTS.resolve(Some(c"./lib1.so"));
//! assert_eq!(resolution.path(), Some(c"./lib2.so"));
//! assert_eq!(
//!     resolution.diagnostic().unwrap().to_string(),
//!     "Redirecting ./lib1.so to ./lib2.so"
//! );
//! ```
pub mod abi;
mod config;
mod flags;
mod table;

use core::fmt::Display;
pub use config::{
    debug_enabled, init_logger, parse_pairs, render_table, DEBUG_ENV, DIAGNOSTIC_TARGET,
    NEW_PATHS_ENV, OLD_PATHS_ENV,
};
pub use flags::OpenFlags;
pub use table::{Redirect, RedirectTable, Resolution};

#[cfg(not(unix))]
compile_error!("unsupport platform");

#[derive(Debug)]
pub enum Error {
    /// Returned when the build-time redirect lists are malformed.
    ConfigError { msg: String },
    /// Returned when the real loader entry point cannot be found.
    FindSymbolError { msg: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::ConfigError { msg } => write!(f, "{msg}"),
            Error::FindSymbolError { msg } => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cold]
#[inline(never)]
fn config_error(msg: impl ToString) -> Error {
    Error::ConfigError {
        msg: msg.to_string(),
    }
}

#[cold]
#[inline(never)]
fn find_symbol_error(msg: impl ToString) -> Error {
    Error::FindSymbolError {
        msg: msg.to_string(),
    }
}

pub type Result<T> = core::result::Result<T, Error>;
