use std::{collections::TryReserveError, fmt, mem::MaybeUninit};

/// A fixed number of possibly uninitialized slots in a single heap allocation.
///
/// `Slots` does not know which of its slots hold a value, that bookkeeping
/// belongs to the owner. Dropping `Slots` releases the allocation without
/// dropping anything stored in it.
#[repr(transparent)]
pub struct Slots<T> {
    inner: Box<[MaybeUninit<T>]>,
}

impl<T> Slots<T> {
    /// Zero slots. Does not allocate.
    pub fn empty() -> Self {
        Self {
            inner: Box::new([]),
        }
    }

    /// Allocate `len` uninitialized slots, aborting on allocation failure.
    pub fn new(len: usize) -> Self {
        Self {
            inner: Box::new_uninit_slice(len),
        }
    }

    /// Allocate `len` uninitialized slots, reporting allocation failure to the
    /// caller instead of aborting.
    pub fn try_new(len: usize) -> Result<Self, TryReserveError> {
        let mut inner = Vec::new();
        inner.try_reserve_exact(len)?;
        // SAFETY: The capacity was reserved above and `MaybeUninit` needs no
        // initialization.
        unsafe {
            inner.set_len(len);
        }
        Ok(Self {
            inner: inner.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.inner.as_ptr().cast()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.inner.as_mut_ptr().cast()
    }

    /// Store `value` in slot `index`, returning a reference to it. A value
    /// already present in that slot is overwritten without being dropped.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn write(&mut self, index: usize, value: T) -> &mut T {
        debug_assert!(index < self.len());
        unsafe { self.inner.get_unchecked_mut(index).write(value) }
    }

    /// Move the value out of slot `index`, leaving the slot logically
    /// uninitialized.
    ///
    /// # Safety
    ///
    /// `index` must be less than `self.len()` and the slot must hold a value
    /// which is not read again until it is overwritten.
    #[inline]
    pub unsafe fn read(&self, index: usize) -> T {
        debug_assert!(index < self.len());
        unsafe { self.inner.get_unchecked(index).assume_init_read() }
    }

    /// View the first `len` slots as initialized values.
    ///
    /// # Safety
    ///
    /// `len` must not exceed `self.len()` and every slot in `0..len` must hold
    /// a value.
    #[inline]
    pub unsafe fn prefix(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.len());
        unsafe { std::slice::from_raw_parts(self.as_ptr(), len) }
    }

    /// Mutable counterpart of [`Slots::prefix`].
    ///
    /// # Safety
    ///
    /// Same as [`Slots::prefix`].
    #[inline]
    pub unsafe fn prefix_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.len());
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for Slots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots").field("len", &self.len()).finish()
    }
}
