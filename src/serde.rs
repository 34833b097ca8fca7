use crate::BidiHashMap;
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};
use serde::{
    de::{SeqAccess, Visitor},
    ser::{SerializeSeq, Serializer},
    Deserializer, {Deserialize, Serialize},
};

struct BidiHashMapVisitor<K, V, S> {
    marker: PhantomData<fn() -> BidiHashMap<K, V, S>>,
}

impl<'de, K, V, S> Visitor<'de> for BidiHashMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    type Value = BidiHashMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of key-value pairs")
    }

    // Pairs are put in order, so a later pair wins over an earlier one with the same key or value.
    fn visit_seq<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: SeqAccess<'de>,
    {
        let mut map = BidiHashMap::with_capacity_and_hasher(
            access.size_hint().unwrap_or(0),
            S::default(),
        );
        while let Some((key, value)) = access.next_element::<(K, V)>()? {
            map.put(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for BidiHashMap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(BidiHashMapVisitor {
            marker: PhantomData,
        })
    }
}

impl<K, V, H> Serialize for BidiHashMap<K, V, H>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for pair in self.iter() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::BidiHashMap;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Hash, Debug)]
    struct TestingStruct {
        pub(crate) value: u64,
        pub(crate) data: String,
    }

    impl TestingStruct {
        pub(crate) fn from_value(value: u64) -> Self {
            Self {
                value,
                data: value.to_string(),
            }
        }
    }

    fn construct_default_map() -> BidiHashMap<String, TestingStruct> {
        (0..10)
            .map(|i| (i.to_string(), TestingStruct::from_value(i)))
            .collect()
    }

    #[test]
    fn serialize_deserialize_test() {
        let map = construct_default_map();
        let jsonified: String =
            serde_json::to_string(&map).expect("Unable to convert map to json!");
        let reconstituted: BidiHashMap<String, TestingStruct> =
            serde_json::from_str(&jsonified).expect("Unable to convert json to map!");
        assert_eq!(map, reconstituted);
        assert_eq!(
            reconstituted.get_by_value(&TestingStruct::from_value(3)),
            Some(&"3".to_string())
        );
    }

    #[test]
    fn later_pairs_win_test() {
        let map: BidiHashMap<u64, String> =
            serde_json::from_str(r#"[[1,"a"],[2,"b"],[3,"a"],[2,"c"]]"#).expect("Bad json");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&2), Some(&"c".to_string()));
        assert_eq!(map.get_by_value(&"a".to_string()), Some(&3));
    }

    #[test]
    fn option_values_test() {
        let mut map: BidiHashMap<Option<u64>, Option<String>> = BidiHashMap::new();
        map.put(None, Some("none".to_string()));
        map.put(Some(1), None);
        let jsonified = serde_json::to_string(&map).expect("Unable to convert map to json!");
        let reconstituted: BidiHashMap<Option<u64>, Option<String>> =
            serde_json::from_str(&jsonified).expect("Unable to convert json to map!");
        assert_eq!(reconstituted.get(&None), Some(&Some("none".to_string())));
        assert_eq!(reconstituted.get_by_value(&None), Some(&Some(1)));
    }
}
