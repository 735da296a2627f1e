use crate::{BoundedStack, error::Result};

/// Something that can decide whether to keep an element.
///
/// Implemented for every `FnMut(&T) -> bool`.
pub trait Predicate<T: ?Sized> {
    fn test(&mut self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: FnMut(&T) -> bool,
{
    #[inline]
    fn test(&mut self, value: &T) -> bool {
        self(value)
    }
}

/// Something that maps an element to a new element of the same type.
///
/// Implemented for every `FnMut(&T) -> T`.
pub trait Transformer<T> {
    fn apply(&mut self, value: &T) -> T;
}

impl<T, F> Transformer<T> for F
where
    F: FnMut(&T) -> T,
{
    #[inline]
    fn apply(&mut self, value: &T) -> T {
        self(value)
    }
}

impl<T> BoundedStack<T>
where
    T: Clone,
{
    /// A new stack holding copies of the elements `predicate` accepts, in the
    /// same bottom-to-top order.
    ///
    /// The new stack has the same capacity as `self`, however many elements
    /// made it through.
    ///
    /// ```
    /// use lifo_stack::BoundedStack;
    ///
    /// let stack = BoundedStack::<i32>::from_range(1..=5)?;
    /// let even = stack.filter_out(|value: &i32| value % 2 == 0);
    /// assert_eq!(even.as_slice(), &[2, 4]);
    /// assert_eq!(even.size(), 5);
    /// # Ok::<_, lifo_stack::Error>(())
    /// ```
    pub fn filter_out<P>(&self, predicate: P) -> Self
    where
        P: Predicate<T>,
    {
        let mut filtered = Self::with_capacity(self.capacity());
        filtered.push_matching(self, predicate);
        filtered
    }

    /// Like [`filter_out`](BoundedStack::filter_out), but reports allocation
    /// failure instead of aborting.
    pub fn try_filter_out<P>(&self, predicate: P) -> Result<Self>
    where
        P: Predicate<T>,
    {
        let mut filtered = Self::try_with_capacity(self.capacity())?;
        filtered.push_matching(self, predicate);
        Ok(filtered)
    }

    fn push_matching<P>(&mut self, source: &Self, mut predicate: P)
    where
        P: Predicate<T>,
    {
        debug_assert!(self.is_empty() && self.capacity() == source.capacity());

        for value in source {
            if predicate.test(value) {
                // SAFETY: At most `source.len()` elements are pushed and
                // `self` has the capacity of `source`.
                unsafe {
                    self.push_unchecked(value.clone());
                }
            }
        }
    }
}

/// Overwrite every element of `stack` with `function` applied to it, from the
/// bottom to the top.
///
/// ```
/// use lifo_stack::{BoundedStack, transform};
///
/// let mut stack = BoundedStack::<i32>::from_range(1..=5)?;
/// transform(&mut stack, |value: &i32| value * value);
/// assert_eq!(stack.as_slice(), &[1, 4, 9, 16, 25]);
/// # Ok::<_, lifo_stack::Error>(())
/// ```
pub fn transform<T, F>(stack: &mut BoundedStack<T>, mut function: F)
where
    F: Transformer<T>,
{
    for value in stack.iter_mut() {
        *value = function.apply(value);
    }
}
