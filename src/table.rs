use core::{
    ffi::CStr,
    fmt::{Display, Formatter},
};

/// A single `old -> new` substitution rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    old: &'static CStr,
    new: &'static CStr,
}

impl Redirect {
    pub const fn new(old: &'static CStr, new: &'static CStr) -> Self {
        Self { old, new }
    }

    /// The path that triggers this rule.
    #[inline]
    pub fn old_path(&self) -> &'static CStr {
        self.old
    }

    /// The path that replaces [`Redirect::old_path`].
    #[inline]
    pub fn new_path(&self) -> &'static CStr {
        self.new
    }
}

/// The diagnostic line printed when a redirect happens.
impl Display for Redirect {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Redirecting {} to {}",
            self.old.to_string_lossy(),
            self.new.to_string_lossy()
        )
    }
}

/// An immutable, ordered set of redirect rules.
///
/// The table is built once, usually as a `static` generated at compile time, and never
/// changes afterwards, so it can be read from any thread without locking.
#[derive(Debug, Clone, Copy)]
pub struct RedirectTable {
    entries: &'static [Redirect],
}

impl RedirectTable {
    pub const fn new(entries: &'static [Redirect]) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn entries(&self) -> &'static [Redirect] {
        self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first rule whose old path is byte-for-byte equal to `path`.
    ///
    /// No normalization is applied: `./lib1.so` and `lib1.so` are different paths here.
    pub fn lookup(&self, path: &CStr) -> Option<&'static Redirect> {
        let entries: &'static [Redirect] = self.entries;
        let bytes = path.to_bytes();
        entries.iter().find(|entry| entry.old.to_bytes() == bytes)
    }

    /// Decide which path should be forwarded to the real loader.
    ///
    /// A null path (`None`) opens the main program and is never looked up.
    pub fn resolve<'a>(&self, path: Option<&'a CStr>) -> Resolution<'a> {
        match path {
            Some(path) => match self.lookup(path) {
                Some(redirect) => Resolution::Redirected(redirect),
                None => Resolution::Passthrough(Some(path)),
            },
            None => Resolution::Passthrough(None),
        }
    }
}

/// The outcome of [`RedirectTable::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The path did not match any rule and is forwarded as is.
    Passthrough(Option<&'a CStr>),
    /// The path matched a rule and is replaced by its new path.
    Redirected(&'static Redirect),
}

impl<'a> Resolution<'a> {
    /// The path to hand to the real `dlopen`.
    #[inline]
    pub fn path(&self) -> Option<&'a CStr> {
        match self {
            Resolution::Passthrough(path) => *path,
            Resolution::Redirected(redirect) => Some(redirect.new),
        }
    }

    /// The rule to report, if a redirect happened.
    #[inline]
    pub fn diagnostic(&self) -> Option<&'static Redirect> {
        match self {
            Resolution::Passthrough(_) => None,
            Resolution::Redirected(redirect) => Some(*redirect),
        }
    }
}
