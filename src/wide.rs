#[derive(Clone, Copy)]
pub struct Meta {
	len: usize,
	capacity: usize
}

impl crate::raw::Meta for Meta {
	const MAX_LENGTH: usize = std::usize::MAX;

	fn new(len: usize, capacity: usize) -> Self {
		Meta {
			len,
			capacity
		}
	}

	fn len(&self) -> usize {
		self.len
	}

	fn capacity(&self) -> usize {
		self.capacity
	}

	fn set_len(&mut self, len: usize) {
		self.len = len
	}
}

pub type RawVector = crate::raw::RawVector<Meta>;
pub type Vector<T> = crate::generic::Vector<T, Meta>;
