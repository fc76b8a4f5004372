//! `LD_PRELOAD` interposer that redirects `dlopen` requests.
//!
//! The redirect table is generated by `build.rs` from `DLOPEN_REDIRECT_OLD_PATHS` and
//! `DLOPEN_REDIRECT_NEW_PATHS`.
use std::ffi::{c_char, c_int, c_void};

include!(concat!(env!("OUT_DIR"), "/redirects.rs"));

#[ctor::ctor]
fn init() {
    dlopen_redirect::init_logger();
    log::debug!("dlopen-redirect: loaded with {} redirects", REDIRECTS.len());
}

#[no_mangle]
unsafe extern "C" fn dlopen(filename: *const c_char, flags: c_int) -> *mut c_void {
    dlopen_redirect::abi::dlopen(&REDIRECTS, filename, flags)
}
