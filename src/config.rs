//! Build-time and run-time configuration.

use crate::{config_error, Error, Result};
use core::fmt::Write as _;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::{
    env,
    ffi::{CString, OsStr},
    io::Write as _,
};

/// Build-time list of paths to redirect, separated by `:`.
///
/// There is no escape for the separator, so a path containing `:` can not be redirected.
pub const OLD_PATHS_ENV: &str = "DLOPEN_REDIRECT_OLD_PATHS";
/// Build-time list of replacement paths, paired with [`OLD_PATHS_ENV`] by position.
///
/// Same format as [`OLD_PATHS_ENV`]: a replacement path can not contain `:` either.
pub const NEW_PATHS_ENV: &str = "DLOPEN_REDIRECT_NEW_PATHS";
/// Run-time toggle. When present, every redirect is reported on stderr.
pub const DEBUG_ENV: &str = "DLOPEN_REDIRECT_DEBUG";
/// Log target of the `Redirecting <old> to <new>` line.
pub const DIAGNOSTIC_TARGET: &str = "dlopen_redirect::diagnostic";

/// Whether the debug toggle is on.
///
/// Only presence matters: an empty value or `0` still turns the diagnostic on.
#[inline]
pub fn debug_enabled(value: Option<&OsStr>) -> bool {
    value.is_some()
}

/// Install the logger used by the interposer.
///
/// Records are written to stderr as the bare message. `RUST_LOG` controls the internal
/// tracing, while the redirect diagnostic follows [`DEBUG_ENV`] alone.
pub fn init_logger() {
    let diagnostic = if debug_enabled(env::var_os(DEBUG_ENV).as_deref()) {
        LevelFilter::Info
    } else {
        LevelFilter::Off
    };
    let _ = Builder::new()
        .parse_env(Env::default())
        .filter_module(DIAGNOSTIC_TARGET, diagnostic)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(Target::Stderr)
        .try_init();
}

fn split_paths(list: &str) -> Vec<&str> {
    if list.is_empty() {
        Vec::new()
    } else {
        list.split(':').collect()
    }
}

/// Pair the old and new path lists by position.
///
/// Both lists use the `LD_LIBRARY_PATH` convention of `:` separated entries, with no escape
/// for `:` itself. An empty list yields an empty table.
pub fn parse_pairs(old: &str, new: &str) -> Result<Vec<(CString, CString)>> {
    let old = split_paths(old);
    let new = split_paths(new);
    if old.len() != new.len() {
        return Err(config_error(format!(
            "{OLD_PATHS_ENV} has {} entries but {NEW_PATHS_ENV} has {}",
            old.len(),
            new.len()
        )));
    }
    let to_cstring = |path: &str| {
        if path.is_empty() {
            return Err(config_error("empty path in redirect list"));
        }
        CString::new(path).map_err(|err| config_error(format!("invalid path [{path}]: {err}")))
    };
    old.into_iter()
        .zip(new)
        .map(|(old, new)| Ok::<_, Error>((to_cstring(old)?, to_cstring(new)?)))
        .collect()
}

fn c_literal(path: &CString) -> String {
    let mut lit = String::from("c\"");
    for &byte in path.as_bytes() {
        match byte {
            b'"' => lit.push_str("\\\""),
            b'\\' => lit.push_str("\\\\"),
            0x20..=0x7e => lit.push(byte as char),
            _ => {
                let _ = write!(lit, "\\x{byte:02x}");
            }
        }
    }
    lit.push('"');
    lit
}

/// Render the `REDIRECTS` table as Rust source, ready to be `include!`d.
pub fn render_table(pairs: &[(CString, CString)]) -> String {
    let mut src = String::from(
        "static REDIRECTS: ::dlopen_redirect::RedirectTable = ::dlopen_redirect::RedirectTable::new(&[\n",
    );
    for (old, new) in pairs {
        let _ = writeln!(
            src,
            "    ::dlopen_redirect::Redirect::new({}, {}),",
            c_literal(old),
            c_literal(new)
        );
    }
    src.push_str("]);\n");
    src
}
