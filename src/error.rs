use core::{alloc::Layout, fmt};

/// The error type for `try_reserve` methods.
///
/// `std::collections::TryReserveError` cannot be constructed outside of the
/// standard library, hence this mirror of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TryReserveError {
	/// The requested capacity exceeds the maximum length of the header format,
	/// or its size in bytes exceeds `isize::MAX`.
	CapacityOverflow,

	/// The memory allocator returned an error.
	AllocError {
		/// The layout of the allocation request that failed.
		layout: Layout
	}
}

impl fmt::Display for TryReserveError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("memory allocation failed")?;
		match self {
			TryReserveError::CapacityOverflow => f.write_str(" because the computed capacity exceeded the collection's maximum"),
			TryReserveError::AllocError { layout } => write!(f, " because the memory allocator returned an error (size {}, align {})", layout.size(), layout.align())
		}
	}
}

impl std::error::Error for TryReserveError {}
