use num_traits::*;

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::fmt::{self, Debug};
use std::{mem, ptr};

#[repr(align(64))]
pub struct Align64;

// A 64 byte aligned piece of data.
// # Examples
// ```
// let x: Aligned<[i16; 64 * 64]> = Aligned::new([0; 64 * 64]);
// assert!(x.data.as_ptr() as usize % 64 == 0);
// ```
pub struct Aligned<T> {
    _alignment: [Align64; 0],
    pub data: T,
}

impl<T> Aligned<T> {
    pub const fn new(data: T) -> Self {
        Aligned {
            _alignment: [],
            data,
        }
    }
}

/// An analog to a Box<[T]> where the underlying slice is aligned for
/// 256-bit loads.
pub struct AlignedBoxedSlice<T> {
    ptr: ptr::NonNull<T>,
    len: usize,
}

impl<T> AlignedBoxedSlice<T> {
    // Data alignment in bytes.
    const DATA_ALIGNMENT_LOG2: usize = 5;

    fn layout(len: usize) -> Layout {
        let size = mem::size_of::<T>() * len;
        // size is a multiple of size_of::<T>() and the alignment is a power of two
        unsafe { Layout::from_size_align_unchecked(size.max(1), 1 << Self::DATA_ALIGNMENT_LOG2) }
    }

    fn alloc(len: usize) -> ptr::NonNull<T> {
        let layout = Self::layout(len);
        match ptr::NonNull::new(unsafe { alloc(layout) } as *mut T) {
            Some(p) => p,
            None => handle_alloc_error(layout),
        }
    }

    /// Creates a [`AlignedBoxedSlice`] with a slice of length `len` filled
    /// with `val`.
    pub fn new(len: usize, val: T) -> Self
    where
        T: Clone,
    {
        let ptr = Self::alloc(len);
        for i in 0..len {
            unsafe { ptr::write(ptr.as_ptr().add(i), val.clone()) };
        }

        AlignedBoxedSlice { ptr, len }
    }
}

impl<T: Clone> Clone for AlignedBoxedSlice<T> {
    fn clone(&self) -> Self {
        let ptr = Self::alloc(self.len);
        for (i, v) in self.iter().enumerate() {
            unsafe { ptr::write(ptr.as_ptr().add(i), v.clone()) };
        }

        AlignedBoxedSlice { ptr, len: self.len }
    }
}

impl<T: Debug> Debug for AlignedBoxedSlice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&**self, f)
    }
}

impl<T> std::ops::Deref for AlignedBoxedSlice<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> std::ops::DerefMut for AlignedBoxedSlice<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for AlignedBoxedSlice<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(&mut **self as *mut [T]);
            dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.len));
        }
    }
}

unsafe impl<T> Send for AlignedBoxedSlice<T> where T: Send {}
unsafe impl<T> Sync for AlignedBoxedSlice<T> where T: Sync {}

/// Sample type of a reconstructed plane.
pub trait Pixel: PrimInt + Debug + Send + Sync + 'static {}

impl Pixel for u8 {}
impl Pixel for u16 {}
