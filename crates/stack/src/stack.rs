use std::{fmt, mem, ptr};

use util::collections::Slots;

use crate::{
    error::{Error, Result},
    iter::{Iter, IterMut, Position},
};

/// Where a stack sits between empty and full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackState {
    /// No slots at all. Such a stack is empty and full at the same time, every
    /// push fails.
    ZeroCapacity,
    Empty,
    Partial,
    Full,
}

/// A stack with a capacity fixed at construction.
///
/// The stack owns one heap buffer of `capacity` slots. The occupied region is
/// always the prefix `0..len()`, with the top of the stack at `len() - 1`. The
/// buffer never moves or grows while the stack is alive, only
/// [`assign`](BoundedStack::assign) and [`swap`](BoundedStack::swap) replace it
/// wholesale.
///
/// ```
/// use lifo_stack::{BoundedStack, Error};
///
/// let mut stack = BoundedStack::with_capacity(2);
/// stack.push(1)?;
/// stack.push(2)?;
/// assert!(matches!(stack.push(3), Err(Error::CapacityExceeded { .. })));
/// assert_eq!(stack.pop()?, 2);
/// assert_eq!(stack.size(), 2);
/// assert_eq!(stack.len(), 1);
/// # Ok::<_, lifo_stack::Error>(())
/// ```
pub struct BoundedStack<T> {
    slots: Slots<T>,
    len: usize,
}

impl<T> BoundedStack<T> {
    /// A stack with no capacity. Does not allocate.
    pub fn new() -> Self {
        Self {
            slots: Slots::empty(),
            len: 0,
        }
    }

    /// An empty stack with room for exactly `capacity` elements.
    ///
    /// Aborts if the storage cannot be allocated, see
    /// [`try_with_capacity`](BoundedStack::try_with_capacity) for the fallible
    /// version.
    pub fn with_capacity(capacity: usize) -> Self {
        tracing::trace!(capacity, "allocating stack storage");
        Self {
            slots: Slots::new(capacity),
            len: 0,
        }
    }

    /// An empty stack with room for exactly `capacity` elements, reporting
    /// allocation failure as [`Error::AllocationFailure`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        tracing::trace!(capacity, "allocating stack storage");
        let slots = Slots::try_new(capacity).map_err(|error| {
            tracing::warn!(capacity, %error, "failed to allocate stack storage");
            Error::from(error)
        })?;
        Ok(Self { slots, len: 0 })
    }

    /// Build a stack sized to fit `range` exactly, holding its elements in
    /// order with the last one on top.
    ///
    /// `range` is walked twice, once to count and once to push, so it has to be
    /// replayable. One-shot iterators can go through
    /// [`FromIterator`] instead.
    ///
    /// ```
    /// use lifo_stack::BoundedStack;
    ///
    /// let stack = BoundedStack::<i64>::from_range([10i32, 20, 30])?;
    /// assert_eq!(stack.size(), 3);
    /// assert_eq!(stack.as_slice(), &[10, 20, 30]);
    /// # Ok::<_, lifo_stack::Error>(())
    /// ```
    pub fn from_range<I>(range: I) -> Result<Self>
    where
        I: IntoIterator + Clone,
        I::Item: Into<T>,
    {
        let capacity = range.clone().into_iter().count();
        let mut stack = Self::try_with_capacity(capacity)?;
        stack.fill(range)?;
        Ok(stack)
    }

    /// Replace the contents of the stack with the elements of `range`, last
    /// one on top.
    ///
    /// The stack is cleared first. If `range` holds more elements than the
    /// stack has capacity for, nothing is pushed and the stack is left empty.
    pub fn load_from_range<I>(&mut self, range: I) -> Result<()>
    where
        I: IntoIterator + Clone,
        I::Item: Into<T>,
    {
        self.clear();

        let count = range.clone().into_iter().count();

        if count > self.capacity() {
            tracing::debug!(
                capacity = self.capacity(),
                count,
                "range does not fit in stack"
            );
            return Err(Error::capacity_exceeded(self.capacity(), count));
        }

        if let Err(error) = self.fill(range) {
            self.clear();
            return Err(error);
        }

        Ok(())
    }

    fn fill<I>(&mut self, range: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        for value in range {
            self.push(value.into())?;
        }

        Ok(())
    }

    /// The capacity of the stack.
    ///
    /// This is the size of the storage, not the number of elements held. Use
    /// [`len`](BoundedStack::len) for the latter.
    #[inline]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Alias of [`size`](BoundedStack::size).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of elements currently on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Index of the top element, `None` when empty.
    #[inline]
    pub fn top(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }

    pub fn state(&self) -> StackState {
        if self.capacity() == 0 {
            StackState::ZeroCapacity
        } else if self.is_empty() {
            StackState::Empty
        } else if self.is_full() {
            StackState::Full
        } else {
            StackState::Partial
        }
    }

    /// Push `value` on top of the stack.
    ///
    /// Fails with [`Error::CapacityExceeded`] when the stack is full, in which
    /// case the stack is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<()> {
        if self.is_full() {
            tracing::debug!(capacity = self.capacity(), "push on a full stack");
            return Err(Error::capacity_exceeded(self.capacity(), self.len + 1));
        }

        // SAFETY: The stack is not full.
        unsafe {
            self.push_unchecked(value);
        }

        Ok(())
    }

    /// # Safety
    ///
    /// The stack must not be full.
    #[inline]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe {
            self.slots.write(self.len, value);
        }
        self.len += 1;
    }

    /// Remove and return the top element.
    ///
    /// Fails with [`Error::EmptyAccess`] when the stack is empty.
    pub fn pop(&mut self) -> Result<T> {
        let Some(top) = self.top() else {
            tracing::debug!("pop on an empty stack");
            return Err(Error::EmptyAccess);
        };

        self.len = top;
        // SAFETY: Slot `top` was occupied and is now outside of the occupied
        // region, so it is never read again until overwritten by a push.
        Ok(unsafe { self.slots.read(top) })
    }

    /// The top element, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Remove every element. The storage and capacity are kept.
    pub fn clear(&mut self) {
        let occupied: *mut [T] = self.as_mut_slice();
        // Reset first so a panicking destructor can not lead to a double drop.
        self.len = 0;
        // SAFETY: The elements were initialized and are no longer reachable.
        unsafe {
            ptr::drop_in_place(occupied);
        }
    }

    /// Exchange storage, capacity and contents with `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.slots, &mut other.slots);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// The occupied region, bottom first.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: Slots `0..len` are occupied.
        unsafe { self.slots.prefix(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: Slots `0..len` are occupied.
        unsafe { self.slots.prefix_mut(self.len) }
    }

    /// Cursor at the bottom of the stack.
    pub fn begin(&self) -> Iter<'_, T> {
        Iter::new(self.position(0), self.as_slice())
    }

    /// Cursor one past the top of the stack.
    pub fn end(&self) -> Iter<'_, T> {
        Iter::new(self.position(self.len), &[])
    }

    /// Mutable cursor at the bottom of the stack.
    pub fn begin_mut(&mut self) -> IterMut<'_, T> {
        let position = self.position(0);
        IterMut::new(position, self.as_mut_slice())
    }

    /// Iterate from the bottom to the top of the stack.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.begin()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.begin_mut()
    }

    /// The position [`end`](BoundedStack::end) points at, without keeping the
    /// stack borrowed.
    #[inline]
    pub fn end_position(&self) -> Position<T> {
        self.position(self.len)
    }

    #[inline]
    fn position(&self, index: usize) -> Position<T> {
        Position::new(self.slots.as_ptr(), index)
    }
}

impl<T> BoundedStack<T>
where
    T: Clone,
{
    /// Fallible copy. Reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut stack = Self::try_with_capacity(self.capacity())?;
        stack.extend_cloned(self.as_slice());
        Ok(stack)
    }

    /// Replace `self` with a copy of `other`.
    ///
    /// The copy is built in full before it is swapped in, so on failure `self`
    /// is left as it was.
    pub fn assign(&mut self, other: &Self) -> Result<()> {
        let mut copy = other.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }

    /// If a clone panics, the elements cloned so far are dropped together with
    /// `self` while unwinding.
    fn extend_cloned(&mut self, values: &[T]) {
        debug_assert!(values.len() <= self.capacity() - self.len);

        for value in values {
            // SAFETY: `values` fits in the remaining capacity.
            unsafe {
                self.push_unchecked(value.clone());
            }
        }
    }
}

impl<T> Drop for BoundedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for BoundedStack<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BoundedStack<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut stack = Self::with_capacity(self.capacity());
        stack.extend_cloned(self.as_slice());
        stack
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> FromIterator<T> for BoundedStack<T> {
    /// Collect every element of `iter`, sized to fit exactly.
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values = iter.into_iter().collect::<Vec<_>>();
        let mut stack = Self::with_capacity(values.len());

        for value in values {
            // SAFETY: The stack was sized for `values`.
            unsafe {
                stack.push_unchecked(value);
            }
        }

        stack
    }
}

impl<T> PartialEq for BoundedStack<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.as_slice() == other.as_slice()
    }
}

impl<T> Eq for BoundedStack<T> where T: Eq {}

impl<T> fmt::Debug for BoundedStack<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedStack")
            .field("capacity", &self.capacity())
            .field("items", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        panic::{self, AssertUnwindSafe},
        rc::Rc,
    };

    use super::{BoundedStack, StackState};
    use crate::Error;

    /// Counts how many times it has been dropped.
    struct Tracked {
        value: u32,
        drops: Rc<Cell<usize>>,
    }

    impl Tracked {
        fn new(value: u32, drops: &Rc<Cell<usize>>) -> Self {
            Self {
                value,
                drops: drops.clone(),
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            if self.value == 13 {
                panic!("unlucky clone");
            }
            Self::new(self.value, &self.drops)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn stack_of(capacity: usize, values: &[i32]) -> BoundedStack<i32> {
        let mut stack = BoundedStack::with_capacity(capacity);
        for &value in values {
            stack.push(value).unwrap();
        }
        stack
    }

    #[test]
    fn fresh_stacks_are_empty() {
        for capacity in [0, 1, 2, 7, 64] {
            let stack = BoundedStack::<u8>::with_capacity(capacity);
            assert_eq!(stack.size(), capacity);
            assert_eq!(stack.len(), 0);
            assert_eq!(stack.top(), None);

            let stack = BoundedStack::<u8>::try_with_capacity(capacity).unwrap();
            assert_eq!(stack.size(), capacity);
            assert!(stack.is_empty());
        }

        let stack = BoundedStack::<String>::new();
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.state(), StackState::ZeroCapacity);
    }

    #[test]
    fn try_with_capacity_reports_allocation_failure() {
        let result = BoundedStack::<u64>::try_with_capacity(usize::MAX);
        assert!(matches!(result, Err(Error::AllocationFailure(_))));
    }

    #[test]
    fn push_pop_round_trip() {
        let mut stack = stack_of(4, &[1, 2]);
        stack.push(42).unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop().unwrap(), 42);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek(), Some(&2));
    }

    #[test]
    fn lifo_order() {
        let mut stack = stack_of(3, &[1, 2, 3]);
        assert_eq!(stack.pop(), Ok(3));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert_eq!(stack.pop(), Err(Error::EmptyAccess));
    }

    #[test]
    fn push_on_full_stack() {
        let mut stack = stack_of(2, &[1, 2]);
        assert_eq!(
            stack.push(3),
            Err(Error::CapacityExceeded {
                capacity: 2,
                requested: 3
            })
        );
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.as_slice(), &[1, 2]);
    }

    #[test]
    fn push_on_zero_capacity() {
        let mut stack = BoundedStack::new();
        assert!(matches!(
            stack.push(1),
            Err(Error::CapacityExceeded { capacity: 0, .. })
        ));
        assert!(stack.is_empty());
        assert!(stack.is_full());
    }

    #[test]
    fn pop_on_empty_stack() {
        let mut stack = BoundedStack::<i32>::with_capacity(3);
        assert_eq!(stack.pop(), Err(Error::EmptyAccess));
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.size(), 3);
    }

    #[test]
    fn states() {
        let mut stack = BoundedStack::with_capacity(2);
        assert_eq!(stack.state(), StackState::Empty);
        stack.push(1).unwrap();
        assert_eq!(stack.state(), StackState::Partial);
        stack.push(2).unwrap();
        assert_eq!(stack.state(), StackState::Full);
        stack.clear();
        assert_eq!(stack.state(), StackState::Empty);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut stack = stack_of(5, &[1, 2, 3]);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.size(), 5);
        stack.push(9).unwrap();
        assert_eq!(stack.as_slice(), &[9]);
    }

    #[test]
    fn copies_are_independent() {
        let original = stack_of(5, &[1, 2, 3]);
        let mut copy = original.clone();
        copy.push(4).unwrap();

        assert_eq!(original.len(), 3);
        assert_eq!(original.peek(), Some(&3));
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.peek(), Some(&4));
        assert_eq!(copy.size(), 5);

        let mut copy = original.try_clone().unwrap();
        copy.pop().unwrap();
        assert_eq!(original.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn assign_replaces_everything() {
        let source = stack_of(5, &[1, 2, 3]);
        let mut target = stack_of(2, &[7]);
        target.assign(&source).unwrap();
        assert_eq!(target, source);
        assert_eq!(target.size(), 5);

        target.push(4).unwrap();
        assert_eq!(source.len(), 3);

        let mut target = BoundedStack::new();
        target.clone_from(&source);
        assert_eq!(target.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn assign_from_own_copy_is_a_no_op() {
        let mut stack = stack_of(4, &[1, 2, 3]);
        let copy = stack.clone();
        stack.assign(&copy).unwrap();
        assert_eq!(stack, copy);
        assert_eq!(stack.size(), 4);
    }

    #[test]
    fn swap_exchanges_state() {
        let mut a = stack_of(2, &[1]);
        let mut b = stack_of(3, &[4, 5, 6]);
        a.swap(&mut b);
        assert_eq!(a.size(), 3);
        assert_eq!(a.as_slice(), &[4, 5, 6]);
        assert_eq!(b.size(), 2);
        assert_eq!(b.as_slice(), &[1]);
    }

    #[test]
    fn from_range_sizes_to_fit() {
        let stack = BoundedStack::<i32>::from_range([10, 20, 30, 40, 50]).unwrap();
        assert_eq!(stack.size(), 5);
        assert!(stack.is_full());
        assert_eq!(stack.peek(), Some(&50));

        let values = vec![1u8, 2];
        let stack = BoundedStack::<u32>::from_range(values.iter().copied()).unwrap();
        assert_eq!(stack.as_slice(), &[1, 2]);

        let stack = BoundedStack::<u32>::from_range(Vec::<u32>::new()).unwrap();
        assert_eq!(stack.size(), 0);
    }

    #[test]
    fn load_from_range() {
        let mut stack = stack_of(5, &[3]);

        stack.load_from_range(vec![10, 20, 30]).unwrap();
        assert_eq!(stack.as_slice(), &[10, 20, 30]);

        assert_eq!(
            stack.load_from_range(vec![1, 2, 3, 4, 5, 6]),
            Err(Error::CapacityExceeded {
                capacity: 5,
                requested: 6
            })
        );
        assert!(stack.is_empty());

        stack.load_from_range(1..=5).unwrap();
        assert!(stack.is_full());
        assert_eq!(stack.as_slice(), &[1, 2, 3, 4, 5]);

        stack.load_from_range(Vec::<i32>::new()).unwrap();
        assert!(stack.is_empty());
        assert_eq!(stack.size(), 5);
    }

    #[test]
    fn collect() {
        let stack = (1..=4).filter(|n| n % 2 == 0).collect::<BoundedStack<_>>();
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.as_slice(), &[2, 4]);
    }

    #[test]
    fn every_element_dropped_once() {
        let drops = Rc::new(Cell::new(0));

        let mut stack = BoundedStack::with_capacity(4);
        for value in 0..4 {
            stack.push(Tracked::new(value, &drops)).unwrap();
        }

        let popped = stack.pop().unwrap();
        assert_eq!(popped.value, 3);
        assert_eq!(drops.get(), 0);
        drop(popped);
        assert_eq!(drops.get(), 1);

        assert!(stack.push(Tracked::new(8, &drops)).is_ok());
        assert!(stack.push(Tracked::new(9, &drops)).is_err());
        assert_eq!(drops.get(), 2);

        stack.clear();
        assert_eq!(drops.get(), 6);

        stack.push(Tracked::new(0, &drops)).unwrap();
        drop(stack);
        assert_eq!(drops.get(), 7);
    }

    #[test]
    fn panicking_clone_releases_partial_copy() {
        let drops = Rc::new(Cell::new(0));

        let mut stack = BoundedStack::with_capacity(4);
        for value in [1, 2, 13] {
            stack.push(Tracked::new(value, &drops)).unwrap();
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| stack.clone()));
        assert!(result.is_err());
        // The two elements cloned before the panic were dropped.
        assert_eq!(drops.get(), 2);
        assert_eq!(stack.len(), 3);

        let mut target = BoundedStack::with_capacity(1);
        target.push(Tracked::new(5, &drops)).unwrap();
        let result = panic::catch_unwind(AssertUnwindSafe(|| target.assign(&stack)));
        assert!(result.is_err());
        assert_eq!(drops.get(), 4);
        assert_eq!(target.len(), 1);
        assert_eq!(target.peek().map(|t| t.value), Some(5));
    }

    #[test]
    fn debug_and_eq() {
        let stack = stack_of(3, &[1, 2]);
        assert_eq!(
            format!("{stack:?}"),
            "BoundedStack { capacity: 3, items: [1, 2] }"
        );
        assert_ne!(stack, stack_of(2, &[1, 2]));
        assert_ne!(stack, stack_of(3, &[1]));
    }

    #[test]
    fn zero_sized_elements() {
        let mut stack = BoundedStack::with_capacity(3);
        stack.push(()).unwrap();
        stack.push(()).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop(), Ok(()));
        assert_eq!(stack.iter().count(), 1);
    }

    #[test]
    fn huge_zero_sized_stack() {
        let mut stack = BoundedStack::<()>::try_with_capacity(usize::MAX).unwrap();
        assert_eq!(stack.size(), usize::MAX);
        stack.push(()).unwrap();
        assert_eq!(stack.try_clone().unwrap().len(), 1);
    }
}
