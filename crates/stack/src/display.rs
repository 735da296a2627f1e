use std::fmt;

use crate::BoundedStack;

/// Displays a stack one element per line, starting from the top.
///
/// Returned by [`BoundedStack::top_down`].
pub struct TopDown<'a, T> {
    stack: &'a BoundedStack<T>,
}

impl<T> fmt::Display for TopDown<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return writeln!(f, "stack is empty");
        }

        for value in self.stack.as_slice().iter().rev() {
            writeln!(f, "{value}")?;
        }

        Ok(())
    }
}

impl<T> BoundedStack<T> {
    /// Display the elements from the top of the stack down, the reverse of
    /// the iteration order.
    ///
    /// ```
    /// use lifo_stack::BoundedStack;
    ///
    /// let stack = BoundedStack::<i32>::from_range([1, 2, 3])?;
    /// assert_eq!(stack.top_down().to_string(), "3\n2\n1\n");
    /// assert_eq!(BoundedStack::<i32>::new().top_down().to_string(), "stack is empty\n");
    /// # Ok::<_, lifo_stack::Error>(())
    /// ```
    pub fn top_down(&self) -> TopDown<'_, T> {
        TopDown { stack: self }
    }

    /// Print [`top_down`](BoundedStack::top_down) to stdout.
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        print!("{}", self.top_down());
    }
}
