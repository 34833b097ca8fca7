use std::hash::{BuildHasher, Hash};

/// The hash modulus of a freshly constructed map. The table never shrinks below this.
pub const INITIAL_CAPACITY: usize = 16;

/// The number of pairs in a map stays at or below `modulus * EXPAND_FILL_FACTOR`.
pub const EXPAND_FILL_FACTOR: f64 = 1.2;

/// Once the modulus is larger than [`INITIAL_CAPACITY`], the number of pairs stays at or above
/// `modulus * SHRINK_FILL_FACTOR`.
pub const SHRINK_FILL_FACTOR: f64 = 0.4;

// Owned and borrowed forms of a key must hash alike, since lookups go through `Borrow`.
pub(crate) fn make_hash<T, S>(hash_builder: &S, val: &T) -> u64
where
    T: Hash + ?Sized,
    S: BuildHasher,
{
    hash_builder.hash_one(val)
}

// Largest size a table with the given modulus holds before growing.
pub(crate) fn max_size(modulus: usize) -> usize {
    (modulus as f64 * EXPAND_FILL_FACTOR) as usize
}

// Smallest size a table with the given modulus holds before shrinking.
pub(crate) fn min_size(modulus: usize) -> usize {
    if modulus > INITIAL_CAPACITY {
        (modulus as f64 * SHRINK_FILL_FACTOR) as usize
    } else {
        0
    }
}

/// Doubles `modulus` until a table of `expected` pairs fits under the expand threshold.
pub(crate) fn increase_modulus(modulus: usize, expected: usize) -> usize {
    let min_modulus = (expected as f64 / EXPAND_FILL_FACTOR) as usize + 1;

    let mut digest = modulus;
    while digest < min_modulus {
        digest *= 2;
    }
    digest
}

/// Halves `modulus` until a table of `expected` pairs is above the shrink threshold, but never
/// goes below [`INITIAL_CAPACITY`].
pub(crate) fn decrease_modulus(modulus: usize, expected: usize) -> usize {
    let max_modulus = ((expected as f64 / SHRINK_FILL_FACTOR) as usize).saturating_sub(1);

    let mut digest = modulus;
    while digest > INITIAL_CAPACITY && digest > max_modulus {
        digest /= 2;
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_hash_test() {
        let hash_builder = hashbrown::hash_map::DefaultHashBuilder::default();
        let owned = "key".to_string();
        assert_eq!(
            make_hash::<str, _>(&hash_builder, "key"),
            make_hash(&hash_builder, &owned)
        );
    }

    #[test]
    fn thresholds_test() {
        assert_eq!(max_size(16), 19);
        assert_eq!(min_size(16), 0);
        assert_eq!(max_size(32), 38);
        assert_eq!(min_size(32), 12);
    }

    #[test]
    fn increase_modulus_test() {
        assert_eq!(increase_modulus(INITIAL_CAPACITY, 0), 16);
        assert_eq!(increase_modulus(INITIAL_CAPACITY, 19), 16);
        assert_eq!(increase_modulus(INITIAL_CAPACITY, 20), 32);
        assert_eq!(increase_modulus(INITIAL_CAPACITY, 1000), 1024);
    }

    #[test]
    fn decrease_modulus_test() {
        assert_eq!(decrease_modulus(1024, 0), INITIAL_CAPACITY);
        assert_eq!(decrease_modulus(1024, 2), INITIAL_CAPACITY);
        assert_eq!(decrease_modulus(1024, 100), 128);
        assert_eq!(decrease_modulus(16, 0), 16);
    }
}
