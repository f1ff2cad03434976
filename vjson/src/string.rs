//! String value type.

use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use alloc::string::String;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::Deref;
use core::ptr::{self, NonNull};

/// Header for heap-allocated strings.
#[repr(C, align(8))]
struct StringHeader {
    /// Length of the string in bytes, excluding the trailing NUL.
    len: usize,
    // String data follows immediately after, then one NUL byte
}

/// Owning pointer to a single `StringHeader + payload + NUL` block.
struct HeapStr {
    ptr: NonNull<StringHeader>,
}

// Safety: HeapStr uniquely owns its allocation and never exposes interior mutability.
unsafe impl Send for HeapStr {}
unsafe impl Sync for HeapStr {}

impl HeapStr {
    fn layout(len: usize) -> Layout {
        Layout::new::<StringHeader>()
            .extend(Layout::array::<u8>(len + 1).unwrap())
            .unwrap()
            .0
            .pad_to_align()
    }

    fn new(s: &str) -> Self {
        let layout = Self::layout(s.len());
        unsafe {
            let Some(ptr) = NonNull::new(alloc(layout).cast::<StringHeader>()) else {
                handle_alloc_error(layout)
            };
            ptr.as_ptr().write(StringHeader { len: s.len() });

            let data_ptr = ptr.as_ptr().add(1).cast::<u8>();
            ptr::copy_nonoverlapping(s.as_ptr(), data_ptr, s.len());
            data_ptr.add(s.len()).write(0);

            HeapStr { ptr }
        }
    }

    fn len(&self) -> usize {
        unsafe { (*self.ptr.as_ptr()).len }
    }

    fn data_ptr(&self) -> *const u8 {
        // Stay on the allocation pointer so provenance covers the payload
        unsafe { self.ptr.as_ptr().add(1).cast::<u8>() }
    }

    fn as_bytes(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.data_ptr(), self.len()) }
    }

    fn as_bytes_with_nul(&self) -> &[u8] {
        unsafe { core::slice::from_raw_parts(self.data_ptr(), self.len() + 1) }
    }
}

impl Drop for HeapStr {
    fn drop(&mut self) {
        unsafe {
            let layout = Self::layout(self.len());
            dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

#[derive(Clone, Copy)]
struct InlineStr {
    len: u8,
    buf: [u8; VString::INLINE_CAPACITY],
}

impl InlineStr {
    fn new(s: &str) -> Self {
        debug_assert!(s.len() <= VString::INLINE_CAPACITY);
        let mut buf = [0u8; VString::INLINE_CAPACITY];
        buf[..s.len()].copy_from_slice(s.as_bytes());
        InlineStr {
            len: s.len() as u8,
            buf,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

enum Repr {
    Inline(InlineStr),
    Heap(HeapStr),
}

/// A string value.
///
/// `VString` stores UTF-8 string data. Strings of up to [`VString::INLINE_CAPACITY`] bytes are
/// kept inline without touching the heap; longer strings live in exactly one heap block holding
/// a length header, the bytes and a trailing NUL.
pub struct VString(Repr);

impl VString {
    /// Inline capacity in bytes: one machine word minus one.
    pub const INLINE_CAPACITY: usize = mem::size_of::<u64>() - 1;

    /// Creates a new string from a `&str`.
    #[must_use]
    pub fn new(s: &str) -> Self {
        if Self::can_inline(s.len()) {
            VString(Repr::Inline(InlineStr::new(s)))
        } else {
            VString(Repr::Heap(HeapStr::new(s)))
        }
    }

    /// Creates an empty string.
    #[must_use]
    pub fn empty() -> Self {
        VString(Repr::Inline(InlineStr::new("")))
    }

    #[inline]
    const fn can_inline(len: usize) -> bool {
        len <= Self::INLINE_CAPACITY
    }

    /// Returns the length of the string in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.0 {
            Repr::Inline(s) => s.len as usize,
            Repr::Heap(s) => s.len(),
        }
    }

    /// Returns `true` if the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the string is stored inline.
    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self.0, Repr::Inline(_))
    }

    /// Returns the string as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        unsafe { core::str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Returns the string as a byte slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.0 {
            Repr::Inline(s) => s.as_bytes(),
            Repr::Heap(s) => s.as_bytes(),
        }
    }

    /// Returns the heap buffer including its trailing NUL, or `None` for inline strings.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        match &self.0 {
            Repr::Inline(_) => None,
            Repr::Heap(s) => Some(s.as_bytes_with_nul()),
        }
    }
}

impl Clone for VString {
    fn clone(&self) -> Self {
        match &self.0 {
            Repr::Inline(s) => VString(Repr::Inline(*s)),
            Repr::Heap(s) => VString(Repr::Heap(HeapStr::new(unsafe {
                core::str::from_utf8_unchecked(s.as_bytes())
            }))),
        }
    }
}

impl Default for VString {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for VString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for VString {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for VString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for VString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for VString {}

impl PartialOrd for VString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for VString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Debug for VString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for VString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

// === Comparison with str types ===

impl PartialEq<str> for VString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<VString> for str {
    fn eq(&self, other: &VString) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<&str> for VString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for VString {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<VString> for String {
    fn eq(&self, other: &VString) -> bool {
        self.as_str() == other.as_str()
    }
}

// === From implementations ===

impl From<&str> for VString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VString {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&String> for VString {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl From<char> for VString {
    fn from(c: char) -> Self {
        let mut buf = [0u8; 4];
        Self::new(c.encode_utf8(&mut buf))
    }
}

impl From<VString> for String {
    fn from(s: VString) -> Self {
        s.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_capacity_is_seven() {
        assert_eq!(VString::INLINE_CAPACITY, 7);
    }

    #[test]
    fn inline_capacity_boundaries() {
        for len in 0..=VString::INLINE_CAPACITY {
            let s = "a".repeat(len);
            let v = VString::new(&s);
            assert!(v.is_inline(), "length {len} should be inline");
            assert_eq!(v.as_str(), s);
            assert_eq!(v.as_bytes_with_nul(), None);
        }

        let s = "a".repeat(VString::INLINE_CAPACITY + 1);
        let v = VString::new(&s);
        assert!(!v.is_inline());
        assert_eq!(v.as_str(), s);
    }

    #[test]
    fn heap_strings_are_nul_terminated() {
        let v = VString::new("hello, world");
        let bytes = v.as_bytes_with_nul().unwrap();
        assert_eq!(bytes.len(), v.len() + 1);
        assert_eq!(bytes.last(), Some(&0));
        assert_eq!(&bytes[..v.len()], b"hello, world");
    }

    #[test]
    fn multibyte_strings_split_on_byte_length() {
        // "héllo" is six bytes
        let v = VString::new("héllo");
        assert!(v.is_inline());
        assert_eq!(v.len(), 6);

        // "日本語" is nine bytes
        let v = VString::new("日本語");
        assert!(!v.is_inline());
        assert_eq!(v.as_str(), "日本語");
    }

    #[test]
    fn clone_does_not_share_heap_storage() {
        let a = VString::new("a string long enough for the heap");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a.as_bytes().as_ptr(), b.as_bytes().as_ptr());
    }

    #[test]
    fn empty_heap_layout_has_room_for_nul() {
        let layout = HeapStr::layout(0);
        assert!(layout.size() > mem::size_of::<StringHeader>());
    }

    #[test]
    fn compares_with_str_types() {
        let v = VString::from("key");
        assert_eq!(v, "key");
        assert_eq!(v, String::from("key"));
        assert_eq!(*"key", v);
        assert!(VString::from("a") < VString::from("b"));
    }
}
