use core::{
	alloc::Layout,
	fmt,
	mem,
	ops::Range,
	ptr::{
		self,
		NonNull
	},
	slice,
	cmp
};
use std::alloc::{
	alloc,
	dealloc,
	realloc,
	handle_alloc_error
};
use crate::TryReserveError;

/// Metadata representing the length and capacity of a vector.
///
/// It is stored at the start of every heap block, right before the element
/// size.
///
/// This crate provides two implementation of this trait:
/// [`wide::Meta`](crate::wide::Meta) stores the length and capacity with two `usize`.
/// For 64-bit plateforms, this crate also provides [`lean::Meta`](crate::lean::Meta) that stores both the length
/// and capacity on a single `usize`. As a result, the maximum length/capacity is [`std::u32::MAX`].
pub trait Meta: Copy {
	/// Maximum length/capacity of the array using this metadata format.
	const MAX_LENGTH: usize;

	/// Create a new metadata from an array's length and capacity.
	fn new(len: usize, capacity: usize) -> Self;

	/// Get the length of the array.
	fn len(&self) -> usize;

	/// Get the capacity of the buffer.
	fn capacity(&self) -> usize;

	/// Set the new length of the array.
	fn set_len(&mut self, len: usize);
}

#[allow(dead_code)]
#[repr(align(16))]
struct MaxAlign;

/// Alignment of every heap block, and of the element storage inside it.
///
/// This is the alignment of `max_align_t` on common plateforms. Since it is
/// greater than one, the least significant bit of a block address is always
/// clear, which is what [`RawVector::into_handle`] relies on.
pub const BLOCK_ALIGN: usize = mem::align_of::<MaxAlign>();

/// Largest element size that an unallocated vector can carry.
///
/// Past this size, `(element_size << 1) | 1` no longer fits in a `usize` and
/// even an empty vector has to allocate its header.
pub const MAX_INLINE_ELEMENT_SIZE: usize = usize::MAX >> 1;

/// Block header, followed by the element storage at [`data_offset`].
#[repr(C)]
struct Header<M> {
	meta: M,
	element_size: usize
}

/// Offset of the element storage from the start of the block.
#[inline]
const fn data_offset<M>() -> usize {
	(mem::size_of::<Header<M>>() + BLOCK_ALIGN - 1) & !(BLOCK_ALIGN - 1)
}

/// Layout of a block able to hold `capacity` elements of `element_size` bytes.
fn block_layout<M>(capacity: usize, element_size: usize) -> Result<Layout, TryReserveError> {
	let size = capacity.checked_mul(element_size)
		.and_then(|bytes| bytes.checked_add(data_offset::<M>()))
		.ok_or(TryReserveError::CapacityOverflow)?;

	Layout::from_size_align(size, BLOCK_ALIGN).map_err(|_| TryReserveError::CapacityOverflow)
}

#[derive(Clone, Copy)]
enum Repr<M> {
	/// Zero capacity, nothing allocated.
	Inline {
		element_size: usize
	},

	/// Owned heap block.
	Allocated(NonNull<Header<M>>)
}

/// Type-erased contiguous growable array.
///
/// Elements are opaque runs of `element_size` bytes, fixed when the vector
/// is created. An empty vector created with no capacity does not allocate:
/// it only remembers its element size. Otherwise the vector owns a single
/// heap block made of a small header (capacity, length and element size)
/// followed by the element storage.
///
/// Any operation that can grow the vector takes `&mut self`, and may move
/// the block. Views returned by [`at`](RawVector::at) and friends borrow the
/// vector, so they cannot outlive such a call.
///
/// Contract violations (out of bounds insertion or removal, element size
/// mismatch) panic. Reads never panic and return `None` instead.
pub struct RawVector<M: Meta> {
	repr: Repr<M>
}

unsafe impl<M: Meta + Send> Send for RawVector<M> {}
unsafe impl<M: Meta + Sync> Sync for RawVector<M> {}

impl<M: Meta> Drop for RawVector<M> {
	fn drop(&mut self) {
		if let Some((ptr, layout)) = self.current_memory() {
			trace!(capacity = self.capacity(), element_size = self.element_size(), "releasing vector block");
			unsafe {
				dealloc(ptr.as_ptr(), layout)
			}
		}
	}
}

impl<M: Meta> RawVector<M> {
	/// Creates a new, empty vector of elements of `element_size` bytes.
	///
	/// If `initial_capacity` is zero, the vector won't allocate until
	/// elements are added to it.
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds `M::MAX_LENGTH`, or if the block size
	/// overflows `isize::MAX`.
	/// Aborts on memory allocation failure.
	#[inline]
	pub fn new(initial_capacity: usize, element_size: usize) -> Self {
		if initial_capacity == 0 && element_size <= MAX_INLINE_ELEMENT_SIZE {
			RawVector {
				repr: Repr::Inline { element_size }
			}
		} else {
			handle_reserve(Self::try_allocate(initial_capacity, element_size))
		}
	}

	fn try_allocate(capacity: usize, element_size: usize) -> Result<Self, TryReserveError> {
		let header = finish_grow::<M>(capacity, element_size, None)?;

		unsafe {
			header.as_ptr().write(Header {
				meta: M::new(0, capacity),
				element_size
			})
		}

		Ok(RawVector {
			repr: Repr::Allocated(header)
		})
	}

	/// Destroys the vector, releasing its block if any.
	///
	/// This is what dropping the vector does.
	#[inline]
	pub fn delete(self) {
		mem::drop(self)
	}

	/// Converts the vector into a single tagged word.
	///
	/// An unallocated vector is encoded as `(element_size << 1) | 1`,
	/// an allocated vector as the address of its block, whose least
	/// significant bit is always clear.
	/// The vector is not released: the handle must be turned back into a
	/// vector with [`from_handle`](RawVector::from_handle) to free it.
	#[inline]
	pub fn into_handle(self) -> usize {
		let handle = match self.repr {
			Repr::Inline { element_size } => (element_size << 1) | 1,
			Repr::Allocated(header) => header.as_ptr() as usize
		};

		mem::forget(self);
		handle
	}

	/// Takes back ownership of a vector converted with [`into_handle`](RawVector::into_handle).
	///
	/// # Safety
	///
	/// `handle` must have been returned by `into_handle` on a vector using the same
	/// metadata format `M`, and must not be used again afterward.
	#[inline]
	pub unsafe fn from_handle(handle: usize) -> Self {
		let repr = if handle & 1 != 0 {
			Repr::Inline { element_size: handle >> 1 }
		} else {
			Repr::Allocated(NonNull::new_unchecked(handle as *mut Header<M>))
		};

		RawVector { repr }
	}

	#[inline]
	fn header(&self) -> Option<&Header<M>> {
		match self.repr {
			Repr::Inline { .. } => None,
			Repr::Allocated(header) => Some(unsafe { &*header.as_ptr() })
		}
	}

	/// Returns the current allocated memory and layout.
	///
	/// Returns `None` if the vector is not allocated.
	fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
		match self.repr {
			Repr::Inline { .. } => None,
			Repr::Allocated(header) => unsafe {
				let header_ref = &*header.as_ptr();
				// We have an allocated block, so its layout has already been checked.
				let size = data_offset::<M>() + header_ref.meta.capacity() * header_ref.element_size;
				let layout = Layout::from_size_align_unchecked(size, BLOCK_ALIGN);
				Some((header.cast(), layout))
			}
		}
	}

	/// Returns `true` if the vector owns a heap block.
	#[inline]
	pub fn is_allocated(&self) -> bool {
		match self.repr {
			Repr::Inline { .. } => false,
			Repr::Allocated(_) => true
		}
	}

	/// Returns the number of elements in the vector.
	#[inline]
	pub fn len(&self) -> usize {
		self.header().map(|header| header.meta.len()).unwrap_or(0)
	}

	/// Returns the number of elements the vector can hold without
	/// reallocating.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.header().map(|header| header.meta.capacity()).unwrap_or(0)
	}

	/// Returns the size of each element, in bytes.
	#[inline]
	pub fn element_size(&self) -> usize {
		match self.repr {
			Repr::Inline { element_size } => element_size,
			Repr::Allocated(header) => unsafe { (*header.as_ptr()).element_size }
		}
	}

	/// Returns `true` if the vector contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns a raw pointer to the element storage.
	///
	/// The pointer is dangling (but non-null and aligned on [`BLOCK_ALIGN`])
	/// if the vector is not allocated.
	/// Modifying the vector may cause its block to be reallocated,
	/// which would also make any pointers to it invalid.
	#[inline]
	pub fn as_ptr(&self) -> *const u8 {
		match self.repr {
			Repr::Inline { .. } => NonNull::<MaxAlign>::dangling().as_ptr() as *const u8,
			Repr::Allocated(header) => unsafe { data_ptr(header) }
		}
	}

	/// Returns an unsafe mutable pointer to the element storage.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut u8 {
		match self.repr {
			Repr::Inline { .. } => NonNull::<MaxAlign>::dangling().as_ptr() as *mut u8,
			Repr::Allocated(header) => unsafe { data_ptr(header) }
		}
	}

	/// Returns the range of bytes spanned by the live elements.
	///
	/// The end pointer is one past the last live byte.
	#[inline]
	pub fn as_ptr_range(&self) -> Range<*const u8> {
		let start = self.as_ptr();
		let end = unsafe { start.add(self.len() * self.element_size()) };
		start..end
	}

	/// Returns the bytes of the element at `index`, or `None` if it is out of bounds.
	#[inline]
	pub fn at(&self, index: usize) -> Option<&[u8]> {
		if index < self.len() {
			let element_size = self.element_size();
			unsafe {
				Some(slice::from_raw_parts(self.as_ptr().add(index * element_size), element_size))
			}
		} else {
			None
		}
	}

	/// Returns the mutable bytes of the element at `index`, or `None` if it is out of bounds.
	#[inline]
	pub fn at_mut(&mut self, index: usize) -> Option<&mut [u8]> {
		if index < self.len() {
			let element_size = self.element_size();
			unsafe {
				Some(slice::from_raw_parts_mut(self.as_mut_ptr().add(index * element_size), element_size))
			}
		} else {
			None
		}
	}

	/// Returns the bytes of the first element, or `None` if the vector is empty.
	#[inline]
	pub fn first(&self) -> Option<&[u8]> {
		self.at(0)
	}

	/// Returns the bytes of the last element, or `None` if the vector is empty.
	#[inline]
	pub fn last(&self) -> Option<&[u8]> {
		match self.len() {
			0 => None,
			len => self.at(len - 1)
		}
	}

	/// The same as `reserve`, but returns on errors instead of panicking or aborting.
	pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
		let len = self.len();
		let capacity = self.capacity();

		if additional <= capacity - len {
			return Ok(())
		}

		let required_capacity = len.checked_add(additional).ok_or(TryReserveError::CapacityOverflow)?;
		if required_capacity > M::MAX_LENGTH {
			return Err(TryReserveError::CapacityOverflow)
		}

		let new_capacity = amortized_capacity(capacity, additional, M::MAX_LENGTH);
		debug_assert!(new_capacity >= required_capacity);
		let element_size = self.element_size();

		let header = finish_grow::<M>(new_capacity, element_size, self.current_memory())?;
		trace!(old_capacity = capacity, new_capacity, element_size, "reallocated vector block");

		// If the block moved, `self` still points to the old one until here.
		unsafe {
			header.as_ptr().write(Header {
				meta: M::new(len, new_capacity),
				element_size
			})
		}

		self.repr = Repr::Allocated(header);
		Ok(())
	}

	/// Reserves capacity for at least `additional` more elements, such that
	/// the vector can hold `self.len() + additional` elements before
	/// reallocating. Does nothing if the capacity is already sufficient.
	///
	/// When growing, the new capacity is `old + old * 3 / 2 + additional`
	/// (at most `M::MAX_LENGTH`). The block may move, so this takes `&mut self`.
	///
	/// # Panics
	///
	/// Panics if the new capacity exceeds `M::MAX_LENGTH` or `isize::MAX` bytes.
	/// Aborts on memory allocation failure.
	#[inline]
	pub fn reserve(&mut self, additional: usize) {
		handle_reserve(self.try_reserve(additional))
	}

	/// Inserts `count` elements at position `index`, shifting all elements
	/// after it to the right.
	///
	/// `elements` holds the bytes of the new elements and must be exactly
	/// `count * self.element_size()` bytes long.
	///
	/// # Panics
	///
	/// Panics if `index > len`, or if `elements` does not have the expected length.
	pub fn insert(&mut self, index: usize, elements: &[u8], count: usize) {
		check_byte_len(elements.len(), count, self.element_size());
		unsafe {
			self.insert_raw(index, elements.as_ptr(), count)
		}
	}

	/// Same as [`insert`](RawVector::insert) but reading the elements from a raw pointer.
	///
	/// # Safety
	///
	/// `elements` must be valid for reads of `count * self.element_size()` bytes,
	/// and must not point inside this vector's block.
	/// It may be dangling if this is zero.
	pub unsafe fn insert_raw(&mut self, index: usize, elements: *const u8, count: usize) {
		let len = self.len();
		if index > len {
			insertion_out_of_bounds(index, len)
		}

		if count == 0 {
			return
		}

		self.reserve(count);

		let header = match self.repr {
			Repr::Allocated(header) => header,
			Repr::Inline { .. } => unreachable!("non-zero reservation left the vector unallocated")
		};

		let element_size = (*header.as_ptr()).element_size;
		let p = data_ptr(header).add(index * element_size);
		// Shift everything over to make space.
		ptr::copy(p, p.add(count * element_size), (len - index) * element_size);
		ptr::copy_nonoverlapping(elements, p, count * element_size);
		(*header.as_ptr()).meta.set_len(len + count);
	}

	/// Appends `count` elements to the back of the vector.
	///
	/// Pushing is amortized O(1) per element.
	///
	/// # Panics
	///
	/// Panics if `elements` is not `count * self.element_size()` bytes long.
	#[inline]
	pub fn push(&mut self, elements: &[u8], count: usize) {
		let len = self.len();
		self.insert(len, elements, count)
	}

	/// Same as [`push`](RawVector::push) but reading the elements from a raw pointer.
	///
	/// # Safety
	///
	/// Same as [`insert_raw`](RawVector::insert_raw).
	#[inline]
	pub unsafe fn push_raw(&mut self, elements: *const u8, count: usize) {
		let len = self.len();
		self.insert_raw(len, elements, count)
	}

	/// Copies the `count` elements starting at `index` into `slice`.
	///
	/// `slice` must be exactly `count * self.element_size()` bytes long.
	///
	/// # Panics
	///
	/// Panics if `index + count > len`, or if `slice` does not have the expected length.
	pub fn slice(&self, index: usize, slice: &mut [u8], count: usize) {
		check_byte_len(slice.len(), count, self.element_size());
		unsafe {
			self.slice_raw(index, slice.as_mut_ptr(), count)
		}
	}

	/// Same as [`slice`](RawVector::slice) but writing the elements through a raw pointer.
	///
	/// # Safety
	///
	/// `slice` must be valid for writes of `count * self.element_size()` bytes,
	/// and must not point inside this vector's block.
	/// It may be dangling if this is zero.
	pub unsafe fn slice_raw(&self, index: usize, slice: *mut u8, count: usize) {
		check_range(index, count, self.len());

		if count > 0 {
			let element_size = self.element_size();
			ptr::copy_nonoverlapping(self.as_ptr().add(index * element_size), slice, count * element_size);
		}
	}

	/// Appends a copy of every element of `other` to the vector.
	///
	/// # Panics
	///
	/// Panics if the element sizes of the two vectors differ.
	pub fn extend(&mut self, other: &RawVector<M>) {
		let element_size = self.element_size();
		if other.element_size() != element_size {
			panic!("element size mismatch (is {}, should be {})", other.element_size(), element_size)
		}

		if other.is_allocated() {
			unsafe {
				self.push_raw(other.as_ptr(), other.len())
			}
		}
	}

	/// Removes `count` elements starting at `index`, shifting all elements
	/// after them to the left.
	///
	/// The capacity is left untouched.
	///
	/// # Panics
	///
	/// Panics if `index + count > len`.
	pub fn remove(&mut self, index: usize, count: usize) {
		let len = self.len();
		check_range(index, count, len);

		if count == 0 {
			return
		}

		if let Repr::Allocated(header) = self.repr {
			unsafe {
				let element_size = (*header.as_ptr()).element_size;
				let p = data_ptr(header).add(index * element_size);
				// Shift everything down to fill in the gap.
				ptr::copy(p.add(count * element_size), p, (len - index - count) * element_size);
				(*header.as_ptr()).meta.set_len(len - count);
			}
		}
	}

	/// Removes all the elements.
	///
	/// Note that this method has no effect on the allocated capacity
	/// of the vector.
	#[inline]
	pub fn clear(&mut self) {
		if let Repr::Allocated(header) = self.repr {
			unsafe {
				(*header.as_ptr()).meta.set_len(0)
			}
		}
	}
}

impl<M: Meta> Clone for RawVector<M> {
	fn clone(&self) -> RawVector<M> {
		let mut vector = RawVector::new(self.len(), self.element_size());
		unsafe {
			vector.push_raw(self.as_ptr(), self.len())
		}
		vector
	}
}

impl<M: Meta> fmt::Debug for RawVector<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RawVector")
			.field("len", &self.len())
			.field("capacity", &self.capacity())
			.field("element_size", &self.element_size())
			.finish()
	}
}

#[inline]
unsafe fn data_ptr<M>(header: NonNull<Header<M>>) -> *mut u8 {
	header.as_ptr().cast::<u8>().add(data_offset::<M>())
}

/// Capacity after growing a buffer of `capacity` elements by at least `additional`.
fn amortized_capacity(capacity: usize, additional: usize, max: usize) -> usize {
	let grown = capacity.checked_add(capacity)
		.and_then(|c| c.checked_add(capacity / 2))
		.and_then(|c| c.checked_add(additional))
		.unwrap_or(max);

	cmp::min(grown, max)
}

// Allocates a block for `capacity` elements, or grows the `current_memory`
// block to it. The header is left for the caller to write.
#[inline(never)]
fn finish_grow<M: Meta>(capacity: usize, element_size: usize, current_memory: Option<(NonNull<u8>, Layout)>) -> Result<NonNull<Header<M>>, TryReserveError> {
	if capacity > M::MAX_LENGTH {
		return Err(TryReserveError::CapacityOverflow)
	}

	let new_layout = block_layout::<M>(capacity, element_size)?;

	let memory = match current_memory {
		Some((ptr, old_layout)) => unsafe {
			debug_assert!(old_layout.size() <= new_layout.size());
			realloc(ptr.as_ptr(), old_layout, new_layout.size())
		},
		None => {
			trace!(capacity, element_size, "allocating vector block");
			// The header makes the layout size non-zero.
			unsafe { alloc(new_layout) }
		}
	};

	NonNull::new(memory.cast()).ok_or(TryReserveError::AllocError { layout: new_layout })
}

// Central function for reserve error handling.
#[inline]
fn handle_reserve<T>(result: Result<T, TryReserveError>) -> T {
	match result {
		Err(TryReserveError::CapacityOverflow) => capacity_overflow(),
		Err(TryReserveError::AllocError { layout }) => handle_alloc_error(layout),
		Ok(t) => t
	}
}

#[inline]
fn check_byte_len(byte_len: usize, count: usize, element_size: usize) {
	if count.checked_mul(element_size) != Some(byte_len) {
		panic!("byte length (is {}) should be {} elements of {} bytes", byte_len, count, element_size)
	}
}

#[inline]
fn check_range(index: usize, count: usize, len: usize) {
	match index.checked_add(count) {
		Some(end) if end <= len => (),
		_ => range_out_of_bounds(index, count, len)
	}
}

#[cold]
#[inline(never)]
fn insertion_out_of_bounds(index: usize, len: usize) -> ! {
	panic!("insertion index (is {}) should be <= len (is {})", index, len)
}

#[cold]
#[inline(never)]
fn range_out_of_bounds(index: usize, count: usize, len: usize) -> ! {
	panic!("range end (is {} + {}) should be <= len (is {})", index, count, len)
}

// One central function responsible for reporting capacity overflows. This'll
// ensure that the code generation related to these panics is minimal as there's
// only one location which panics rather than a bunch throughout the module.
fn capacity_overflow() -> ! {
	panic!("capacity overflow");
}

#[cfg(test)]
mod tests {
	use crate::wide::RawVector;
	use super::{BLOCK_ALIGN, MAX_INLINE_ELEMENT_SIZE, amortized_capacity};

	fn bytes(values: &[i32]) -> Vec<u8> {
		values.iter().flat_map(|v| v.to_ne_bytes()).collect()
	}

	fn values(vector: &RawVector) -> Vec<i32> {
		(0..vector.len()).map(|i| {
			let mut buffer = [0u8; 4];
			buffer.copy_from_slice(vector.at(i).unwrap());
			i32::from_ne_bytes(buffer)
		}).collect()
	}

	#[test]
	fn empty_vector_does_not_allocate() {
		let vector = RawVector::new(0, 4);
		assert!(!vector.is_allocated());
		assert_eq!(vector.len(), 0);
		assert_eq!(vector.capacity(), 0);
		assert_eq!(vector.element_size(), 4);
		assert!(vector.is_empty());
		assert_eq!(vector.as_ptr() as usize % BLOCK_ALIGN, 0);
	}

	#[test]
	fn initial_capacity_allocates() {
		let vector = RawVector::new(10, 4);
		assert!(vector.is_allocated());
		assert_eq!(vector.len(), 0);
		assert_eq!(vector.capacity(), 10);
		assert_eq!(vector.element_size(), 4);
		assert_eq!(vector.as_ptr() as usize % BLOCK_ALIGN, 0);
	}

	#[test]
	fn oversized_empty_vector_allocates() {
		let vector = RawVector::new(0, MAX_INLINE_ELEMENT_SIZE + 1);
		assert!(vector.is_allocated());
		assert_eq!(vector.capacity(), 0);
		assert_eq!(vector.element_size(), MAX_INLINE_ELEMENT_SIZE + 1);
	}

	#[test]
	fn growth_formula() {
		assert_eq!(amortized_capacity(0, 1, usize::MAX), 1);
		assert_eq!(amortized_capacity(10, 1, usize::MAX), 26);
		assert_eq!(amortized_capacity(5, 3, usize::MAX), 15);
		assert_eq!(amortized_capacity(100, 1, 150), 150);
		assert_eq!(amortized_capacity(usize::MAX / 2, 1, usize::MAX), usize::MAX);
	}

	#[test]
	fn reserve_grows_from_inline() {
		let mut vector = RawVector::new(0, 4);
		vector.reserve(3);
		assert!(vector.is_allocated());
		assert_eq!(vector.capacity(), 3);
		assert_eq!(vector.len(), 0);

		vector.reserve(3);
		assert_eq!(vector.capacity(), 3);
	}

	#[test]
	fn reserve_preserves_content() {
		let mut vector = RawVector::new(2, 4);
		vector.push(&bytes(&[7, 8]), 2);
		vector.reserve(1);
		assert_eq!(vector.capacity(), 2 + 3 + 1);
		assert_eq!(values(&vector), [7, 8]);
	}

	#[test]
	fn try_reserve_reports_overflow() {
		let mut vector = RawVector::new(0, 4);
		assert_eq!(vector.try_reserve(usize::MAX), Err(crate::TryReserveError::CapacityOverflow));
		assert!(!vector.is_allocated());

		let mut vector = RawVector::new(1, 4);
		vector.push(&bytes(&[1]), 1);
		assert_eq!(vector.try_reserve(usize::MAX), Err(crate::TryReserveError::CapacityOverflow));
		assert_eq!(values(&vector), [1]);
	}

	#[test]
	fn insert_shifts_elements() {
		let mut vector = RawVector::new(0, 4);
		vector.push(&bytes(&[1, 2, 6]), 3);
		vector.insert(2, &bytes(&[3, 4, 5]), 3);
		assert_eq!(values(&vector), [1, 2, 3, 4, 5, 6]);
		vector.insert(0, &bytes(&[0]), 1);
		assert_eq!(values(&vector), [0, 1, 2, 3, 4, 5, 6]);
	}

	#[test]
	fn remove_shifts_elements() {
		let mut vector = RawVector::new(0, 4);
		vector.push(&bytes(&[1, 2, 3, 4, 5]), 5);
		let capacity = vector.capacity();
		vector.remove(1, 2);
		assert_eq!(values(&vector), [1, 4, 5]);
		vector.remove(2, 1);
		assert_eq!(values(&vector), [1, 4]);
		assert_eq!(vector.capacity(), capacity);
	}

	#[test]
	fn zero_count_operations_on_inline_vector() {
		let mut vector = RawVector::new(0, 4);
		vector.insert(0, &[], 0);
		vector.push(&[], 0);
		vector.remove(0, 0);
		vector.slice(0, &mut [], 0);
		assert!(!vector.is_allocated());
	}

	#[test]
	#[should_panic(expected = "insertion index (is 1) should be <= len (is 0)")]
	fn insert_past_end_of_inline_vector() {
		let mut vector = RawVector::new(0, 4);
		vector.insert(1, &[], 0);
	}

	#[test]
	#[should_panic(expected = "byte length (is 3) should be 1 elements of 4 bytes")]
	fn insert_with_wrong_byte_length() {
		let mut vector = RawVector::new(0, 4);
		vector.push(&[1, 2, 3], 1);
	}

	#[test]
	#[should_panic(expected = "range end")]
	fn remove_with_overflowing_range() {
		let mut vector = RawVector::new(0, 4);
		vector.push(&bytes(&[1, 2]), 2);
		vector.remove(1, usize::MAX);
	}

	#[test]
	#[should_panic(expected = "element size mismatch (is 8, should be 4)")]
	fn extend_with_other_element_size() {
		let mut vector = RawVector::new(0, 4);
		let other = RawVector::new(0, 8);
		vector.extend(&other);
	}

	#[test]
	fn extend_with_inline_vector() {
		let mut vector = RawVector::new(0, 4);
		vector.extend(&RawVector::new(0, 4));
		assert!(!vector.is_allocated());
	}

	#[test]
	fn access() {
		let mut vector = RawVector::new(0, 4);
		assert_eq!(vector.first(), None);
		assert_eq!(vector.last(), None);
		assert_eq!(vector.at(0), None);

		vector.push(&bytes(&[1, 2, 3]), 3);
		assert_eq!(vector.first(), Some(&1i32.to_ne_bytes()[..]));
		assert_eq!(vector.last(), Some(&3i32.to_ne_bytes()[..]));
		assert_eq!(vector.at(3), None);

		vector.at_mut(1).unwrap().copy_from_slice(&20i32.to_ne_bytes());
		assert_eq!(values(&vector), [1, 20, 3]);
		assert!(vector.at_mut(3).is_none());

		let range = vector.as_ptr_range();
		assert_eq!(range.end as usize - range.start as usize, 12);
	}

	#[test]
	fn clear_keeps_capacity() {
		let mut vector = RawVector::new(4, 4);
		vector.push(&bytes(&[1, 2]), 2);
		vector.clear();
		assert!(vector.is_empty());
		assert_eq!(vector.capacity(), 4);

		let mut inline = RawVector::new(0, 4);
		inline.clear();
		assert!(!inline.is_allocated());
	}

	#[test]
	fn handle_round_trip() {
		let inline = RawVector::new(0, 12);
		let handle = inline.into_handle();
		assert_eq!(handle, (12 << 1) | 1);
		let inline = unsafe { RawVector::from_handle(handle) };
		assert_eq!(inline.element_size(), 12);
		assert!(!inline.is_allocated());

		let mut vector = RawVector::new(0, 4);
		vector.push(&bytes(&[1, 2, 3]), 3);
		let handle = vector.into_handle();
		assert_eq!(handle & 1, 0);
		let vector = unsafe { RawVector::from_handle(handle) };
		assert_eq!(values(&vector), [1, 2, 3]);
		vector.delete();
	}

	#[test]
	fn zero_sized_elements() {
		let mut vector = RawVector::new(0, 0);
		vector.push(&[], 5);
		assert_eq!(vector.len(), 5);
		assert_eq!(vector.at(4), Some(&[][..]));
		vector.remove(0, 5);
		assert!(vector.is_empty());
	}

	#[test]
	fn clone_copies_elements() {
		let mut vector = RawVector::new(0, 4);
		vector.push(&bytes(&[1, 2, 3]), 3);
		let copy = vector.clone();
		vector.clear();
		assert_eq!(values(&copy), [1, 2, 3]);
		assert_eq!(copy.capacity(), 3);
	}

	#[test]
	fn vectors_are_send_and_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<RawVector>();
		assert_send_sync::<crate::lean::RawVector>();
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn traced_lifecycle() {
		let mut vector = RawVector::new(1, 4);
		vector.push(&bytes(&[1, 2, 3]), 3);
		vector.reserve(16);
		assert_eq!(values(&vector), [1, 2, 3]);
		vector.delete();
	}
}
