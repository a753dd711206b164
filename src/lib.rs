//! This crate provides the [`Vector`](generic::Vector) data structure,
//! a contiguous growable array whose length and capacity are stored in
//! the heap block, right before the elements,
//! and its type-erased counterpart [`RawVector`](raw::RawVector)
//! whose elements are opaque runs of bytes of a size chosen at run time.
//!
//! An empty vector created without capacity does not allocate at all:
//! it only remembers the size of its elements.
//!
//! ## Basic usage
//!
//! ```rust
//! use header_vec::Vector;
//!
//! let mut vec: Vector<i32> = Vector::new(); // nothing is allocated yet.
//! vec.push(&[1, 2, 3, 7]);
//! vec.insert(3, &[4, 5, 6]);
//! assert_eq!(vec, [1, 2, 3, 4, 5, 6, 7]);
//!
//! let mut end = [0; 2];
//! vec.slice(5, &mut end);
//! assert_eq!(end, [6, 7]);
//! ```
//!
//! The type-erased vector works on bytes:
//! ```rust
//! use header_vec::RawVector;
//!
//! let mut raw = RawVector::new(4, 2);
//! raw.push(&[1, 0, 2, 0], 2);
//! assert_eq!(raw.len(), 2);
//! assert_eq!(raw.at(1), Some(&[2, 0][..]));
//! ```
//!
//! Out of bounds insertions and removals panic,
//! out of bounds reads return `None`.
//!
//! ## Features
//!
//! - `tracing`: emits `trace` level events when a vector block is
//!   allocated, reallocated or released.

#[cfg(feature = "tracing")]
macro_rules! trace {
	($($arg:tt)*) => {
		tracing::trace!($($arg)*)
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
	($($arg:tt)*) => {
		()
	};
}

mod error;
pub mod raw;
pub mod generic;
pub mod wide;
#[cfg(target_pointer_width = "64")]
pub mod lean;
#[cfg(not(target_pointer_width = "64"))]
pub mod lean {
	/// Re-exports `wide` for non-64-bit targets
	pub use super::wide::*;
}

pub use error::TryReserveError;
pub use wide::{
	RawVector,
	Vector
};
