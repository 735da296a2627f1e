//! A stack with a capacity fixed at construction.
//!
//! ## Usage
//!
//! ```
//! use lifo_stack::{BoundedStack, transform};
//!
//! let mut stack = BoundedStack::with_capacity(5);
//!
//! for value in 1..=5 {
//!     stack.push(value)?;
//! }
//!
//! // Filtering produces a new stack with the same capacity.
//! let even = stack.filter_out(|value: &i32| value % 2 == 0);
//! assert_eq!(even.as_slice(), &[2, 4]);
//!
//! // Transforming rewrites the stack in place, bottom to top.
//! transform(&mut stack, |value: &i32| value * value);
//! assert_eq!(stack.pop()?, 25);
//!
//! // Iteration goes from the bottom of the stack to the top.
//! let sum = stack.iter().sum::<i32>();
//! assert_eq!(sum, 1 + 4 + 9 + 16);
//! # Ok::<_, lifo_stack::Error>(())
//! ```
//!
//! ## Features
//!
//! * `serde`: `Serialize` and `Deserialize` for [`BoundedStack`], as a struct
//!   with a `capacity` and the `items` from the bottom up.
mod display;
mod error;
mod iter;
mod ops;
mod stack;

#[cfg(feature = "serde")]
mod serde_impl;

pub use display::TopDown;
pub use error::{Error, Result};
pub use iter::{Iter, IterMut, Position};
pub use ops::{Predicate, Transformer, transform};
pub use stack::{BoundedStack, StackState};
