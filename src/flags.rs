use bitflags::bitflags;
use core::ffi::c_int;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Mode flags accepted by `dlopen`.
    pub struct OpenFlags: c_int {
        /// Perform lazy binding.
        const RTLD_LAZY = libc::RTLD_LAZY;
        /// Resolve all undefined symbols before `dlopen` returns.
        const RTLD_NOW = libc::RTLD_NOW;
        /// Don't load the library, only check whether it is already resident.
        const RTLD_NOLOAD = libc::RTLD_NOLOAD;
        /// Prefer the library's own symbols over global ones with the same name.
        #[cfg(all(target_os = "linux", target_env = "gnu"))]
        const RTLD_DEEPBIND = libc::RTLD_DEEPBIND;
        /// Make the library's symbols available to subsequently loaded libraries.
        const RTLD_GLOBAL = libc::RTLD_GLOBAL;
        /// The converse of `RTLD_GLOBAL`.
        const RTLD_LOCAL = libc::RTLD_LOCAL;
        /// Do not unload the library during `dlclose`.
        const RTLD_NODELETE = libc::RTLD_NODELETE;
    }
}

impl OpenFlags {
    /// Wrap raw flags coming from a C caller, keeping bits this type does not name.
    #[inline]
    pub const fn from_raw(flags: c_int) -> Self {
        Self::from_bits_retain(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bits_survive() {
        let raw = libc::RTLD_NOW | libc::RTLD_GLOBAL | 0x4000_0000;
        let flags = OpenFlags::from_raw(raw);
        assert_eq!(flags.bits(), raw);
        assert!(flags.contains(OpenFlags::RTLD_NOW | OpenFlags::RTLD_GLOBAL));
    }

    #[test]
    fn lazy() {
        assert_eq!(OpenFlags::RTLD_LAZY.bits(), libc::RTLD_LAZY);
    }
}
