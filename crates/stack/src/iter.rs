use std::{fmt, iter::FusedIterator, marker::PhantomData, mem};

use crate::BoundedStack;

/// A slot in the storage of a particular stack.
///
/// Two positions are equal when they refer to the same slot of the same
/// storage. A position does not borrow the stack and can not be dereferenced.
///
/// Storage that does not allocate has no address of its own. This is the case
/// for stacks with zero capacity and for stacks of zero-sized `T`, so
/// positions taken from two different such stacks compare equal whenever
/// their indices do.
pub struct Position<T> {
    base: usize,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Position<T> {
    #[inline]
    pub(crate) fn new(base: *const T, index: usize) -> Self {
        Self {
            base: base.addr(),
            index,
            _marker: PhantomData,
        }
    }

    /// Index of the slot, counted from the bottom of the stack.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Position<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Position<T> {}

impl<T> PartialEq for Position<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.index == other.index
    }
}

impl<T> Eq for Position<T> {}

impl<T> fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("base", &format_args!("{:#x}", self.base))
            .field("index", &self.index)
            .finish()
    }
}

/// Read-only cursor over a [`BoundedStack`], walking from the bottom to the top.
///
/// An `Iter` is also what [`BoundedStack::end`] returns, in which case it is
/// exhausted from the start.
pub struct Iter<'a, T> {
    position: Position<T>,
    rest: &'a [T],
}

impl<'a, T> Iter<'a, T> {
    #[inline]
    pub(crate) fn new(position: Position<T>, rest: &'a [T]) -> Self {
        Self { position, rest }
    }

    /// The slot the cursor currently points at.
    #[inline]
    pub fn position(&self) -> Position<T> {
        self.position
    }

    /// The element under the cursor, `None` once it reached the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.rest.first()
    }

    /// The elements not yet visited.
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.rest
    }
}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            rest: self.rest,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.rest.split_first()?;
        self.rest = rest;
        self.position.index += 1;
        Some(first)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.rest).finish()
    }
}

/// Mutable cursor over a [`BoundedStack`], walking from the bottom to the top.
///
/// Converts into an [`Iter`] at the same position, but not the other way
/// around.
pub struct IterMut<'a, T> {
    position: Position<T>,
    rest: &'a mut [T],
}

impl<'a, T> IterMut<'a, T> {
    #[inline]
    pub(crate) fn new(position: Position<T>, rest: &'a mut [T]) -> Self {
        Self { position, rest }
    }

    #[inline]
    pub fn position(&self) -> Position<T> {
        self.position
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.rest.first()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.rest.first_mut()
    }

    /// The elements not yet visited.
    #[inline]
    pub fn into_slice(self) -> &'a mut [T] {
        self.rest
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = mem::take(&mut self.rest).split_first_mut()?;
        self.rest = rest;
        self.position.index += 1;
        Some(first)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len(), Some(self.rest.len()))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.rest).finish()
    }
}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
    #[inline]
    fn from(iter: IterMut<'a, T>) -> Self {
        Self {
            position: iter.position,
            rest: iter.rest,
        }
    }
}

macro_rules! position_eq {
    ($($lhs:ident == $rhs:ident),* $(,)?) => {
        $(
            impl<'a, 'b, T> PartialEq<$rhs<'b, T>> for $lhs<'a, T> {
                #[inline]
                fn eq(&self, other: &$rhs<'b, T>) -> bool {
                    self.position == other.position
                }
            }
        )*
    };
}

position_eq! {
    Iter == Iter,
    Iter == IterMut,
    IterMut == IterMut,
    IterMut == Iter,
}

impl<T> Eq for Iter<'_, T> {}

impl<T> Eq for IterMut<'_, T> {}

impl<T> PartialEq<Position<T>> for Iter<'_, T> {
    #[inline]
    fn eq(&self, other: &Position<T>) -> bool {
        self.position == *other
    }
}

impl<T> PartialEq<Position<T>> for IterMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Position<T>) -> bool {
        self.position == *other
    }
}

impl<'a, T> IntoIterator for &'a BoundedStack<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BoundedStack<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
