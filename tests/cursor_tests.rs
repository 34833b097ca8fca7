#[cfg(test)]
mod tests {
    use std::hash::{Hash, Hasher};

    use bidi_map::{BidiError, BidiHashMap};
    use hashbrown::HashSet;

    // Few distinct hashes, so chains are long and shared.
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    struct Bucketed(u64);

    impl Hash for Bucketed {
        fn hash<H: Hasher>(&self, state: &mut H) {
            (self.0 % 3).hash(state)
        }
    }

    fn construct_default_map(n: u64) -> BidiHashMap<u64, String> {
        (0..n).map(|i| (i, i.to_string())).collect()
    }

    #[test]
    fn walk_test() {
        let map = construct_default_map(100);
        let mut cursor = map.cursor();
        let mut seen = HashSet::new();
        while let Some(key) = cursor.next(&map).unwrap() {
            assert!(seen.insert(*key));
            assert_eq!(cursor.key(&map), Ok(key));
            assert_eq!(cursor.value(&map), Ok(&key.to_string()));
        }
        assert_eq!(seen.len(), 100);
        // Exhausted cursors stay exhausted
        assert_eq!(cursor.has_next(&map), Ok(false));
        assert_eq!(cursor.next(&map), Ok(None));
    }

    #[test]
    fn walk_order_matches_iter_test() {
        let map = construct_default_map(50);
        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        while let Some(key) = cursor.next(&map).unwrap() {
            walked.push(*key);
        }
        let iterated: Vec<u64> = map.keys().copied().collect();
        assert_eq!(walked, iterated);
    }

    #[test]
    fn fail_fast_after_put_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.cursor();
        cursor.next(&map).unwrap();
        map.put(100, "100".to_string());
        assert_eq!(cursor.next(&map), Err(BidiError::ConcurrentModification));
        assert_eq!(cursor.has_next(&map), Err(BidiError::ConcurrentModification));
        assert_eq!(cursor.key(&map), Err(BidiError::ConcurrentModification));
        assert_eq!(
            cursor.remove(&mut map),
            Err(BidiError::ConcurrentModification)
        );
        assert_eq!(map.len(), 11);
    }

    #[test]
    fn fail_fast_after_remove_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.cursor();
        map.remove(&3);
        assert_eq!(cursor.next(&map), Err(BidiError::ConcurrentModification));
    }

    #[test]
    fn fail_fast_after_value_replacement_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.cursor();
        map.put(3, "three".to_string());
        assert_eq!(cursor.has_next(&map), Err(BidiError::ConcurrentModification));
    }

    #[test]
    fn unchanged_put_keeps_cursor_valid_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.cursor();
        cursor.next(&map).unwrap();
        map.put(3, "3".to_string());
        assert!(cursor.next(&map).is_ok());
    }

    #[test]
    fn remove_every_third_test() {
        let mut map = construct_default_map(100);
        let before: Vec<u64> = map.keys().copied().collect();
        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        let mut removed = Vec::new();
        while let Some(&key) = cursor.next(&map).unwrap() {
            walked.push(key);
            if walked.len() % 3 == 0 {
                let (k, v) = cursor.remove(&mut map).unwrap();
                assert_eq!(k, key);
                assert_eq!(v, key.to_string());
                removed.push(k);
            }
        }
        // Every pair is visited once, in the order the walk started with
        assert_eq!(walked, before);
        assert_eq!(removed.len(), 33);
        assert_eq!(map.len(), 67);
        for k in removed.iter() {
            assert!(!map.contains_key(k));
            assert!(!map.contains_value(&k.to_string()));
        }
        // The survivors keep their relative order
        let remaining: Vec<u64> = before
            .iter()
            .copied()
            .filter(|k| !removed.contains(k))
            .collect();
        let after: Vec<u64> = map.keys().copied().collect();
        assert_eq!(after, remaining);
        for (k, v) in map.iter() {
            assert_eq!(map.get_by_value(v), Some(k));
        }
    }

    #[test]
    fn remove_in_shared_chains_keeps_order_test() {
        let mut map: BidiHashMap<Bucketed, u64> = (0..60).map(|i| (Bucketed(i), i)).collect();
        let before: Vec<Bucketed> = map.keys().copied().collect();
        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        let mut removed = Vec::new();
        loop {
            // Alternate between peeking first and stepping straight away
            if walked.len() % 2 == 0 && !cursor.has_next(&map).unwrap() {
                break;
            }
            let key = match cursor.next(&map).unwrap() {
                Some(&key) => key,
                None => break,
            };
            walked.push(key);
            if key.0 % 4 == 1 {
                cursor.has_next(&map).unwrap();
            }
            if key.0 % 5 < 2 {
                let (k, v) = cursor.remove(&mut map).unwrap();
                assert_eq!(v, k.0);
                removed.push(k);
            } else if key.0 % 5 == 2 {
                cursor.set_value(&mut map, key.0 + 1000).unwrap();
            }
        }
        assert_eq!(walked, before);
        let remaining: Vec<Bucketed> = before
            .iter()
            .copied()
            .filter(|k| !removed.contains(k))
            .collect();
        let after: Vec<Bucketed> = map.keys().copied().collect();
        assert_eq!(after, remaining);
        for (k, v) in map.iter() {
            assert_eq!(map.get_by_value(v), Some(k));
        }
    }

    #[test]
    fn remove_all_test() {
        let mut map = construct_default_map(1000);
        let mut cursor = map.cursor();
        let mut count = 0;
        while cursor.next(&map).unwrap().is_some() {
            cursor.remove(&mut map).unwrap();
            count += 1;
        }
        assert_eq!(count, 1000);
        assert!(map.is_empty());
        // Still usable once the walk is over
        map.put(1, "1".to_string());
        assert_eq!(map.get_by_value(&"1".to_string()), Some(&1));
    }

    #[test]
    fn illegal_state_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.cursor();
        assert_eq!(cursor.remove(&mut map), Err(BidiError::IllegalState));
        assert_eq!(cursor.key(&map), Err(BidiError::IllegalState));
        assert_eq!(
            cursor.set_value(&mut map, "x".to_string()),
            Err(BidiError::IllegalState)
        );

        cursor.next(&map).unwrap();
        assert!(cursor.remove(&mut map).is_ok());
        assert_eq!(cursor.remove(&mut map), Err(BidiError::IllegalState));
        assert_eq!(cursor.value(&map), Err(BidiError::IllegalState));
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn has_next_then_remove_test() {
        let mut map = construct_default_map(30);
        let before: Vec<u64> = map.keys().copied().collect();
        let mut cursor = map.cursor();
        let mut walked = Vec::new();
        let mut removed = Vec::new();
        while cursor.has_next(&map).unwrap() {
            let key = *cursor.next(&map).unwrap().unwrap();
            walked.push(key);
            // Look ahead first so the removal happens behind the cursor's position
            if cursor.has_next(&map).unwrap() && walked.len() % 3 == 0 {
                let (k, _) = cursor.remove(&mut map).unwrap();
                removed.push(k);
            }
        }
        assert_eq!(walked, before);
        // The last pair has nothing to look ahead to
        assert_eq!(removed.len(), 9);
        let remaining: Vec<u64> = before
            .iter()
            .copied()
            .filter(|k| !removed.contains(k))
            .collect();
        let after: Vec<u64> = map.keys().copied().collect();
        assert_eq!(after, remaining);
    }

    #[test]
    fn set_value_test() {
        let mut map = construct_default_map(20);
        let mut cursor = map.cursor();
        while let Some(&key) = cursor.next(&map).unwrap() {
            let old = cursor.set_value(&mut map, format!("v{key}")).unwrap();
            assert_eq!(old, key.to_string());
            assert_eq!(cursor.value(&map), Ok(&format!("v{key}")));
        }
        assert_eq!(map.len(), 20);
        for i in 0..20 {
            assert_eq!(map.get_by_value(&format!("v{i}")), Some(&i));
            assert_eq!(map.get_by_value(&i.to_string()), None);
        }
    }

    #[test]
    fn set_same_value_test() {
        let mut map = construct_default_map(5);
        let mut cursor = map.cursor();
        let key = *cursor.next(&map).unwrap().unwrap();
        assert_eq!(
            cursor.set_value(&mut map, key.to_string()),
            Ok(key.to_string())
        );
        assert_eq!(map.get(&key), Some(&key.to_string()));
    }

    #[test]
    fn set_duplicate_value_test() {
        let mut map = construct_default_map(10);
        let before = map.clone();
        let mut cursor = map.cursor();
        let key = *cursor.next(&map).unwrap().unwrap();
        let taken = ((key + 1) % 10).to_string();
        assert_eq!(
            cursor.set_value(&mut map, taken),
            Err(BidiError::DuplicateValue)
        );
        assert_eq!(map, before);
        // The cursor is still usable
        assert_eq!(cursor.key(&map), Ok(&key));
        assert!(cursor.next(&map).is_ok());
    }

    #[test]
    fn value_cursor_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.value_set().cursor();
        let mut values = HashSet::new();
        while let Some(value) = cursor.next(&map).unwrap() {
            values.insert(value.clone());
            if value == "4" {
                assert_eq!(cursor.remove(&mut map), Ok((4, "4".to_string())));
            }
        }
        assert_eq!(values.len(), 10);
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn entry_cursor_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.entry_set().cursor();
        while let Some((&key, _)) = cursor.next(&map).unwrap() {
            if key < 5 {
                cursor.set_value(&mut map, format!("low{key}")).unwrap();
            } else {
                cursor.remove(&mut map).unwrap();
            }
        }
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&i), Some(&format!("low{i}")));
        }
    }

    #[test]
    fn inverse_cursor_test() {
        let mut map = construct_default_map(10);
        let mut cursor = map.inverse().cursor();
        let value = cursor.next(&map).unwrap().unwrap().clone();
        let key = *cursor.value(&map).unwrap();
        assert_eq!(cursor.key(&map), Ok(&value));
        assert!(matches!(
            cursor.set_value(&mut map, 100),
            Err(BidiError::Unsupported(_))
        ));
        assert_eq!(map.len(), 10);
        assert_eq!(cursor.remove(&mut map), Ok((value, key)));
        assert_eq!(map.len(), 9);
    }

    #[test]
    fn cursor_removal_defers_resize_test() {
        let mut map = construct_default_map(500);
        let mut cursor = map.cursor();
        while let Some(&key) = cursor.next(&map).unwrap() {
            if key >= 5 {
                cursor.remove(&mut map).unwrap();
            }
        }
        assert_eq!(map.len(), 5);
        // Outside of the cursor the map resizes as usual
        map.remove(&0);
        for i in 1..5 {
            assert_eq!(map.get_by_value(&i.to_string()), Some(&i));
        }
    }
}
