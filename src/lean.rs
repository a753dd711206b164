#[derive(Clone, Copy)]
pub struct Meta {
	data: usize
}

const CAP_MASK: usize = std::u32::MAX as usize;

impl crate::raw::Meta for Meta {
	const MAX_LENGTH: usize = std::u32::MAX as usize;

	fn new(len: usize, capacity: usize) -> Self {
		assert!(len <= Self::MAX_LENGTH);
		assert!(capacity <= Self::MAX_LENGTH);

		Meta {
			data: len << 32 | capacity
		}
	}

	fn len(&self) -> usize {
		self.data >> 32
	}

	fn capacity(&self) -> usize {
		self.data & CAP_MASK
	}

	fn set_len(&mut self, len: usize) {
		assert!(len <= Self::MAX_LENGTH);
		self.data = (len << 32) | (self.data & CAP_MASK)
	}
}

pub type RawVector = crate::raw::RawVector<Meta>;
pub type Vector<T> = crate::generic::Vector<T, Meta>;
