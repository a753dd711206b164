use header_vec::{
	lean,
	Vector
};
use proptest::prelude::*;

fn arb_elements() -> impl Strategy<Value = Vec<u32>> {
	prop::collection::vec(any::<u32>(), 0..64)
}

/// A vector and an insertion point in `0..=len`.
fn arb_vector_and_index() -> impl Strategy<Value = (Vec<u32>, usize)> {
	arb_elements().prop_flat_map(|elements| {
		let len = elements.len();
		(Just(elements), 0..=len)
	})
}

fn vector_of(elements: &[u32]) -> Vector<u32> {
	let mut vector = Vector::new();
	vector.push(elements);
	vector
}

proptest! {
	#[test]
	fn push_then_slice_round_trips(elements in arb_elements()) {
		let vector = vector_of(&elements);
		prop_assert_eq!(vector.len(), elements.len());
		prop_assert!(vector.len() <= vector.capacity());

		let mut out = vec![0; elements.len()];
		vector.slice(0, &mut out);
		prop_assert_eq!(out, elements);
	}

	#[test]
	fn single_pushes_keep_length_within_capacity(elements in arb_elements()) {
		let mut vector: lean::Vector<u32> = lean::Vector::new();
		for element in &elements {
			vector.push(&[*element]);
			prop_assert!(vector.len() <= vector.capacity());
		}
		prop_assert_eq!(vector.as_slice(), &elements[..]);
	}

	#[test]
	fn insert_then_remove_restores(
		(elements, index) in arb_vector_and_index(),
		inserted in arb_elements()
	) {
		let mut vector = vector_of(&elements);
		vector.insert(index, &inserted);
		prop_assert_eq!(vector.len(), elements.len() + inserted.len());
		prop_assert_eq!(&vector[index..index + inserted.len()], &inserted[..]);

		vector.remove(index, inserted.len());
		prop_assert_eq!(vector, elements);
	}

	#[test]
	fn insert_matches_vec(
		(elements, index) in arb_vector_and_index(),
		inserted in arb_elements()
	) {
		let mut vector = vector_of(&elements);
		vector.insert(index, &inserted);

		let mut expected = elements.clone();
		expected.splice(index..index, inserted.iter().cloned());
		prop_assert_eq!(vector, expected);
	}

	#[test]
	fn remove_matches_vec((elements, index) in arb_vector_and_index(), count in 0usize..8) {
		let count = count.min(elements.len() - index);
		let mut vector = vector_of(&elements);
		let capacity = vector.capacity();
		vector.remove(index, count);

		let mut expected = elements.clone();
		expected.drain(index..index + count);
		prop_assert_eq!(vector.capacity(), capacity);
		prop_assert_eq!(vector, expected);
	}

	#[test]
	fn reserve_preserves_content(elements in arb_elements(), additional in 0usize..256) {
		let mut vector = vector_of(&elements);
		let old_capacity = vector.capacity();
		vector.reserve(additional);

		prop_assert!(vector.capacity() >= elements.len() + additional);
		if elements.len() + additional <= old_capacity {
			prop_assert_eq!(vector.capacity(), old_capacity);
		} else {
			prop_assert_eq!(vector.capacity(), old_capacity * 2 + old_capacity / 2 + additional);
		}
		prop_assert_eq!(vector, elements);
	}

	#[test]
	fn extend_appends(a in arb_elements(), b in arb_elements()) {
		let mut vector = vector_of(&a);
		let other = vector_of(&b);
		vector.extend(&other);

		let expected: Vec<u32> = a.iter().chain(b.iter()).cloned().collect();
		prop_assert_eq!(vector, expected);
		prop_assert_eq!(other, b);
	}

	#[test]
	fn zero_count_operations_are_noops((elements, index) in arb_vector_and_index()) {
		let mut vector = vector_of(&elements);
		let capacity = vector.capacity();

		vector.insert(index, &[]);
		vector.push(&[]);
		vector.slice(index, &mut []);
		vector.remove(index, 0);

		prop_assert_eq!(vector.capacity(), capacity);
		prop_assert_eq!(vector, elements);
	}

	#[test]
	fn out_of_range_reads_are_none(elements in arb_elements(), past in 0usize..16) {
		let vector = vector_of(&elements);
		prop_assert_eq!(vector.at(elements.len() + past), None);
		prop_assert_eq!(vector.first(), elements.first());
		prop_assert_eq!(vector.last(), elements.last());
	}
}
