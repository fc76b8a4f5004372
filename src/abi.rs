//! c interface

use crate::{find_symbol_error, OpenFlags, RedirectTable, Result, DIAGNOSTIC_TARGET};
use core::{
    ffi::{c_char, c_int, c_void, CStr},
    mem,
    ptr::{null, null_mut},
};
use spin::Once;

/// Signature of the loader's `dlopen`.
pub type DlopenFn = unsafe extern "C" fn(filename: *const c_char, flags: c_int) -> *mut c_void;

static REAL_DLOPEN: Once<Option<DlopenFn>> = Once::new();

/// Find the `dlopen` that the interposed one shadows.
pub fn next_dlopen() -> Result<DlopenFn> {
    let sym = unsafe { libc::dlsym(libc::RTLD_NEXT, c"dlopen".as_ptr()) };
    if sym.is_null() {
        return Err(find_symbol_error("can not find the next definition of [dlopen]"));
    }
    Ok(unsafe { mem::transmute::<*mut c_void, DlopenFn>(sym) })
}

fn real_dlopen() -> Option<DlopenFn> {
    *REAL_DLOPEN.call_once(|| match next_dlopen() {
        Ok(real) => Some(real),
        Err(err) => {
            log::error!("dlopen: {err}");
            None
        }
    })
}

/// It is the same as `dlopen`, except that `filename` is first looked up in `table`.
///
/// Returns null if the real `dlopen` can not be found.
///
/// # Safety
/// `filename` must be null or point to a nul-terminated string.
pub unsafe fn dlopen(table: &RedirectTable, filename: *const c_char, flags: c_int) -> *mut c_void {
    match real_dlopen() {
        Some(real) => dlopen_with(table, filename, flags, real),
        None => null_mut(),
    }
}

/// Redirect `filename` through `table` and forward the call to `real`.
///
/// `flags` are passed on untouched, as is the return value of `real`.
///
/// # Safety
/// `filename` must be null or point to a nul-terminated string, and `real` must be safe to
/// call with the same arguments as `dlopen`.
pub unsafe fn dlopen_with(
    table: &RedirectTable,
    filename: *const c_char,
    flags: c_int,
    real: DlopenFn,
) -> *mut c_void {
    let path = if filename.is_null() {
        None
    } else {
        Some(CStr::from_ptr(filename))
    };
    let resolution = table.resolve(path);
    log::trace!(
        "dlopen: Opening [{}] with flags {:?}",
        path.map_or("<main program>".into(), CStr::to_string_lossy),
        OpenFlags::from_raw(flags)
    );
    if let Some(redirect) = resolution.diagnostic() {
        log::info!(target: DIAGNOSTIC_TARGET, "{redirect}");
    }
    real(resolution.path().map_or(null(), CStr::as_ptr), flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Redirect;
    use core::cell::Cell;

    static TABLE: RedirectTable =
        RedirectTable::new(&[Redirect::new(c"./lib1.so", c"./lib2.so")]);

    const HANDLE: usize = 0x1000;

    thread_local! {
        static SEEN: Cell<Option<(*const c_char, c_int)>> = const { Cell::new(None) };
    }

    unsafe extern "C" fn fake_dlopen(filename: *const c_char, flags: c_int) -> *mut c_void {
        SEEN.set(Some((filename, flags)));
        HANDLE as *mut c_void
    }

    unsafe extern "C" fn failing_dlopen(filename: *const c_char, flags: c_int) -> *mut c_void {
        SEEN.set(Some((filename, flags)));
        null_mut()
    }

    fn seen() -> (*const c_char, c_int) {
        SEEN.take().expect("delegate was not called")
    }

    #[test]
    fn forwards_redirected_path() {
        let handle =
            unsafe { dlopen_with(&TABLE, c"./lib1.so".as_ptr(), libc::RTLD_LAZY, fake_dlopen) };
        assert_eq!(handle as usize, HANDLE);
        let (path, flags) = seen();
        assert_eq!(unsafe { CStr::from_ptr(path) }, c"./lib2.so");
        assert_eq!(flags, libc::RTLD_LAZY);
    }

    #[test]
    fn forwards_same_pointer() {
        let filename = c"./lib3.so".as_ptr();
        let raw = libc::RTLD_NOW | libc::RTLD_GLOBAL | 0x4000_0000;
        unsafe { dlopen_with(&TABLE, filename, raw, fake_dlopen) };
        assert_eq!(seen(), (filename, raw));
    }

    #[test]
    fn forwards_null() {
        unsafe { dlopen_with(&TABLE, null(), libc::RTLD_NOW, fake_dlopen) };
        let (path, _) = seen();
        assert!(path.is_null());
    }

    #[test]
    fn failure_is_passed_back() {
        let handle =
            unsafe { dlopen_with(&TABLE, c"./lib1.so".as_ptr(), libc::RTLD_NOW, failing_dlopen) };
        assert!(handle.is_null());
        assert!(SEEN.take().is_some());
    }

    #[test]
    fn real_loader() {
        assert!(next_dlopen().is_ok());
        let handle = unsafe { dlopen(&TABLE, null(), libc::RTLD_NOW) };
        assert!(!handle.is_null());
        assert_eq!(unsafe { libc::dlclose(handle) }, 0);
    }

    #[test]
    fn real_loader_missing_library() {
        let handle = unsafe {
            dlopen(
                &TABLE,
                c"./this-library-does-not-exist.so".as_ptr(),
                libc::RTLD_NOW,
            )
        };
        assert!(handle.is_null());
        assert!(!unsafe { libc::dlerror() }.is_null());
    }
}
