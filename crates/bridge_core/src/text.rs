//! Borrowed text views passed across the call table.
//!
//! Text never changes ownership at the boundary. The caller passes a
//! [`NativeStr`] pointing into memory it keeps alive for the duration of the
//! call; text coming back from native is written as a view into native
//! storage that stays valid until the next call into native, and is copied
//! out immediately.

/// A `(pointer, length)` view of UTF-8 bytes with C layout.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct NativeStr {
    ptr: *const u8,
    len: usize,
}

impl NativeStr {
    /// The empty view. Its pointer is null.
    pub const EMPTY: Self = Self {
        ptr: std::ptr::null(),
        len: 0,
    };

    /// Borrow a Rust string. The view is valid while `s` is.
    #[must_use]
    pub const fn new(s: &str) -> Self {
        Self {
            ptr: s.as_ptr(),
            len: s.len(),
        }
    }

    /// Returns the length of the view in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view is empty or null.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0 || self.ptr.is_null()
    }

    /// Returns the viewed bytes.
    ///
    /// # Safety
    ///
    /// The memory behind the view must be alive and unmodified for `'a`.
    #[must_use]
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.is_empty() {
            return &[];
        }
        // SAFETY: non-null, and the caller guarantees `len` readable bytes.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }

    /// Returns the view as `&str`.
    ///
    /// # Errors
    ///
    /// Returns the UTF-8 error if the bytes are not valid UTF-8.
    ///
    /// # Safety
    ///
    /// Same contract as [`NativeStr::as_bytes`].
    pub unsafe fn to_str<'a>(&self) -> Result<&'a str, std::str::Utf8Error> {
        // SAFETY: forwarded to the caller.
        std::str::from_utf8(unsafe { self.as_bytes() })
    }

    /// Copy the view into an owned `String`, replacing invalid UTF-8.
    ///
    /// # Safety
    ///
    /// Same contract as [`NativeStr::as_bytes`].
    #[must_use]
    pub unsafe fn to_string_lossy(&self) -> String {
        // SAFETY: forwarded to the caller.
        String::from_utf8_lossy(unsafe { self.as_bytes() }).into_owned()
    }
}

impl Default for NativeStr {
    fn default() -> Self {
        Self::EMPTY
    }
}
