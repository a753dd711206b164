use core::{
	marker::PhantomData,
	mem,
	ops::{
		Deref,
		DerefMut,
		Range
	},
	fmt,
	slice
};
use crate::{
	raw::{
		Meta,
		RawVector,
		BLOCK_ALIGN
	},
	TryReserveError
};

/// Contiguous growable array of `Copy` elements.
///
/// This is a typed [`RawVector`]: the element size is `size_of::<T>()`, so
/// vectors of the same type always agree on it.
/// Just like a raw vector, an empty `Vector` created with no capacity does not
/// allocate, and the length and capacity are stored in the heap block itself.
///
/// The maximum capacity of a `Vector<T>` depends on the metadata format used
/// which is given as type parameter `M`, implementing the [`Meta`] trait.
///
/// # Examples
///
/// ```
/// # use header_vec::Vector;
/// let mut vector: Vector<i32> = Vector::with_capacity(10);
/// vector.push(&[1, 2, 3, 4, 8, 9]);
/// vector.insert(4, &[5, 6, 7]);
/// assert_eq!(vector, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
///
/// vector.remove(0, 3);
/// assert_eq!(vector.first(), Some(&4));
/// ```
pub struct Vector<T, M: Meta> {
	raw: RawVector<M>,
	element: PhantomData<T>
}

impl<T: Copy, M: Meta> Vector<T, M> {
	const ALIGNED: () = assert!(mem::align_of::<T>() <= BLOCK_ALIGN, "element alignment exceeds the block alignment");

	#[inline]
	fn from_raw_unchecked(raw: RawVector<M>) -> Self {
		let () = Self::ALIGNED;
		debug_assert_eq!(raw.element_size(), mem::size_of::<T>());

		Vector {
			raw,
			element: PhantomData
		}
	}

	/// Constructs a new, empty `Vector<T>`.
	///
	/// The vector will not allocate until elements are pushed onto it.
	#[inline]
	pub fn new() -> Self {
		Self::with_capacity(0)
	}

	/// Constructs a new, empty `Vector<T>` able to hold `capacity` elements
	/// without reallocating.
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds `M::MAX_LENGTH` or `isize::MAX` bytes.
	/// Aborts on memory allocation failure.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::from_raw_unchecked(RawVector::new(capacity, mem::size_of::<T>()))
	}

	/// Converts a type-erased vector into a typed one.
	///
	/// Returns the raw vector back if its element size is not `size_of::<T>()`.
	///
	/// # Safety
	///
	/// Every element of `raw` must be a valid value of `T`.
	#[inline]
	pub unsafe fn try_from_raw(raw: RawVector<M>) -> Result<Self, RawVector<M>> {
		if raw.element_size() == mem::size_of::<T>() {
			Ok(Self::from_raw_unchecked(raw))
		} else {
			Err(raw)
		}
	}

	/// Converts the vector into its type-erased counterpart.
	///
	/// # Safety
	///
	/// `T` may contain padding bytes. The byte views of the returned vector
	/// ([`at`](RawVector::at), [`first`](RawVector::first),
	/// [`last`](RawVector::last), [`slice`](RawVector::slice)) must not be
	/// used to read them.
	#[inline]
	pub unsafe fn into_raw(self) -> RawVector<M> {
		self.raw
	}

	/// Converts the vector into a single tagged word.
	///
	/// See [`RawVector::into_handle`].
	#[inline]
	pub fn into_handle(self) -> usize {
		self.raw.into_handle()
	}

	/// Takes back ownership of a vector converted with [`into_handle`](Vector::into_handle).
	///
	/// # Safety
	///
	/// `handle` must have been returned by `into_handle` on a `Vector<T, M>`,
	/// and must not be used again afterward.
	#[inline]
	pub unsafe fn from_handle(handle: usize) -> Self {
		Self::from_raw_unchecked(RawVector::from_handle(handle))
	}

	/// Destroys the vector, releasing its heap block if any.
	#[inline]
	pub fn delete(self) {
		self.raw.delete()
	}

	/// Returns the number of elements in the vector.
	#[inline]
	pub fn len(&self) -> usize {
		self.raw.len()
	}

	/// Returns the number of elements the vector can hold without reallocating.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.raw.capacity()
	}

	/// Returns the size of each element, that is `size_of::<T>()`.
	#[inline]
	pub fn element_size(&self) -> usize {
		self.raw.element_size()
	}

	/// Returns `true` if the vector contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.raw.is_empty()
	}

	/// Returns `true` if the vector owns a heap block.
	#[inline]
	pub fn is_allocated(&self) -> bool {
		self.raw.is_allocated()
	}

	/// Returns a raw pointer to the vector's buffer.
	///
	/// The caller must ensure that the vector outlives the pointer this
	/// function returns, or else it will end up pointing to garbage.
	/// Modifying the vector may cause its buffer to be reallocated,
	/// which would also make any pointers to it invalid.
	#[inline]
	pub fn as_ptr(&self) -> *const T {
		self.raw.as_ptr().cast()
	}

	/// Returns an unsafe mutable pointer to the vector's buffer.
	#[inline]
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.raw.as_mut_ptr().cast()
	}

	/// Returns the two raw pointers spanning the vector.
	///
	/// The end pointer is one past the last element.
	#[inline]
	pub fn as_ptr_range(&self) -> Range<*const T> {
		self.as_slice().as_ptr_range()
	}

	/// Extracts a slice containing the entire vector.
	#[inline]
	pub fn as_slice(&self) -> &[T] {
		unsafe {
			slice::from_raw_parts(self.as_ptr(), self.len())
		}
	}

	/// Extracts a mutable slice of the entire vector.
	#[inline]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		unsafe {
			let len = self.len();
			slice::from_raw_parts_mut(self.as_mut_ptr(), len)
		}
	}

	/// Returns a reference to the element at `index`, or `None` if it is out of bounds.
	#[inline]
	pub fn at(&self, index: usize) -> Option<&T> {
		self.as_slice().get(index)
	}

	/// Returns a mutable reference to the element at `index`, or `None` if it is out of bounds.
	///
	/// This is the only accessor through which an element can be modified in place.
	#[inline]
	pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
		self.as_mut_slice().get_mut(index)
	}

	/// Returns the first element, or `None` if the vector is empty.
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.as_slice().first()
	}

	/// Returns the last element, or `None` if the vector is empty.
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.as_slice().last()
	}

	/// Reserves capacity for at least `additional` more elements.
	///
	/// See [`RawVector::reserve`].
	#[inline]
	pub fn reserve(&mut self, additional: usize) {
		self.raw.reserve(additional)
	}

	/// The same as `reserve`, but returns on errors instead of panicking or aborting.
	#[inline]
	pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
		self.raw.try_reserve(additional)
	}

	/// Inserts `elements` at position `index`, shifting all elements
	/// after it to the right.
	///
	/// # Panics
	///
	/// Panics if `index > len`.
	#[inline]
	pub fn insert(&mut self, index: usize, elements: &[T]) {
		// `elements` cannot borrow from `self`, which is borrowed mutably.
		unsafe {
			self.raw.insert_raw(index, elements.as_ptr().cast(), elements.len())
		}
	}

	/// Appends `elements` to the back of the vector.
	///
	/// Pushing is amortized O(1) per element.
	#[inline]
	pub fn push(&mut self, elements: &[T]) {
		unsafe {
			self.raw.push_raw(elements.as_ptr().cast(), elements.len())
		}
	}

	/// Copies the elements starting at `index` into `slice`, filling it.
	///
	/// # Panics
	///
	/// Panics if `index + slice.len() > len`.
	#[inline]
	pub fn slice(&self, index: usize, slice: &mut [T]) {
		unsafe {
			self.raw.slice_raw(index, slice.as_mut_ptr().cast(), slice.len())
		}
	}

	/// Appends a copy of every element of `other`.
	#[inline]
	pub fn extend(&mut self, other: &Vector<T, M>) {
		self.raw.extend(&other.raw)
	}

	/// Removes `count` elements starting at `index`, shifting all elements
	/// after them to the left.
	///
	/// # Panics
	///
	/// Panics if `index + count > len`.
	#[inline]
	pub fn remove(&mut self, index: usize, count: usize) {
		self.raw.remove(index, count)
	}

	/// Clears the vector, removing all values.
	///
	/// Note that this method has no effect on the allocated capacity
	/// of the vector.
	#[inline]
	pub fn clear(&mut self) {
		self.raw.clear()
	}
}

impl<T: Copy, M: Meta> Default for Vector<T, M> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Copy, M: Meta> Clone for Vector<T, M> {
	fn clone(&self) -> Self {
		Self::from_raw_unchecked(self.raw.clone())
	}
}

impl<T: Copy, M: Meta> Deref for Vector<T, M> {
	type Target = [T];

	#[inline]
	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T: Copy, M: Meta> DerefMut for Vector<T, M> {
	#[inline]
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<'v, T: Copy, M: Meta> IntoIterator for &'v Vector<T, M> {
	type Item = &'v T;
	type IntoIter = slice::Iter<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_slice().iter()
	}
}

impl<'v, T: Copy, M: Meta> IntoIterator for &'v mut Vector<T, M> {
	type Item = &'v mut T;
	type IntoIter = slice::IterMut<'v, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.as_mut_slice().iter_mut()
	}
}

impl<T: Copy + fmt::Debug, M: Meta> fmt::Debug for Vector<T, M> {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(self.as_slice(), f)
	}
}

impl<T: Copy, M: Meta> AsRef<[T]> for Vector<T, M> {
	#[inline]
	fn as_ref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T: Copy, M: Meta> AsMut<[T]> for Vector<T, M> {
	#[inline]
	fn as_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<'s, T: Copy, M: Meta> From<&'s [T]> for Vector<T, M> {
	fn from(s: &'s [T]) -> Vector<T, M> {
		let mut vector = Vector::with_capacity(s.len());
		vector.push(s);
		vector
	}
}

macro_rules! impl_slice_eq1 {
	([$($vars:tt)*] $lhs:ty, $rhs:ty $(where $ty:ty: $bound:ident)?) => {
		impl<$($vars)*> PartialEq<$rhs> for $lhs where T: PartialEq<U>, $($ty: $bound)? {
			#[inline]
			fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
			#[inline]
			fn ne(&self, other: &$rhs) -> bool { self[..] != other[..] }
		}
	}
}

impl_slice_eq1! { [T: Copy, U: Copy, O: Meta, P: Meta] Vector<T, O>, Vector<U, P> }
impl_slice_eq1! { [T: Copy, U, M: Meta] Vector<T, M>, Vec<U> }
impl_slice_eq1! { [T, U: Copy, M: Meta] Vec<T>, Vector<U, M> }
impl_slice_eq1! { ['a, T: Copy, U, M: Meta] Vector<T, M>, &'a [U] }
impl_slice_eq1! { ['a, T: Copy, U, M: Meta] Vector<T, M>, &'a mut [U] }
impl_slice_eq1! { [T: Copy, U, M: Meta] Vector<T, M>, [U] }
impl_slice_eq1! { [T: Copy, U, M: Meta, const N: usize] Vector<T, M>, [U; N] }

impl<T: Copy + Eq, M: Meta> Eq for Vector<T, M> {}
