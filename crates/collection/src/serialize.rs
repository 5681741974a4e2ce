use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Collection, Key};

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(i) => serializer.serialize_i64(*i),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
        Ok(Key::Index(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
        i64::try_from(v)
            .map(Key::Index)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Key, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Lists serialize as sequences, everything else as maps in entry order.
impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

struct CollectionVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for CollectionVisitor<T> {
    type Value = Collection<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence or a map")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            collection
                .push([value])
                .map_err(<A::Error as de::Error>::custom)?;
        }
        Ok(collection)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, T>()? {
            collection.insert(key, value);
        }
        Ok(collection)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Collection, Key, collection};

    #[test]
    fn lists_serialize_as_arrays() {
        let list = collection![1, 2, 3];
        assert_eq!(serde_json::to_string(&list).unwrap(), "[1,2,3]");

        let empty: Collection<i32> = Collection::new();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");
    }

    #[test]
    fn keyed_collections_serialize_as_objects_in_order() {
        let keyed = collection! {"name" => "budiono", "country" => "Indonesia"};
        assert_eq!(
            serde_json::to_string(&keyed).unwrap(),
            r#"{"name":"budiono","country":"Indonesia"}"#
        );

        let mut mixed = collection![0, 1];
        mixed.put("a", 1);
        assert_eq!(serde_json::to_string(&mixed).unwrap(), r#"{"0":0,"1":1,"a":1}"#);
    }

    #[test]
    fn deserialize_restores_keys() {
        let list: Collection<i32> = serde_json::from_str("[4,5,6]").unwrap();
        assert_eq!(list, collection![4, 5, 6]);

        let mixed: Collection<i32> =
            serde_json::from_str(r#"{"0":0,"1":1,"a":1,"01":2}"#).unwrap();
        assert_eq!(mixed.get(0), Some(&0));
        assert_eq!(mixed.get(1), Some(&1));
        assert_eq!(mixed.get("a"), Some(&1));
        assert_eq!(mixed.get("01"), Some(&2));
        assert_eq!(
            mixed.keys().cloned().collect::<Vec<_>>(),
            [
                Key::Index(0),
                Key::Index(1),
                Key::from("a"),
                Key::from("01")
            ]
        );
    }

    #[test]
    fn numeric_names_round_trip_as_the_same_slot() {
        let mut collection = Collection::new();
        collection.put(0, 1).put("0", 2);
        assert_eq!(collection.len(), 1);
        let json = serde_json::to_string(&collection).unwrap();
        assert_eq!(json, "[2]");
        let back: Collection<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);

        let named = collection! {"5" => 1, "a" => 2};
        assert_eq!(named.keys().next(), Some(&Key::Index(5)));
        let json = serde_json::to_string(&named).unwrap();
        assert_eq!(json, r#"{"5":1,"a":2}"#);
        let back: Collection<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, named);
    }

    #[test]
    fn max_index_key_deserializes() {
        let keyed: Collection<i32> =
            serde_json::from_str(r#"{"9223372036854775807":1}"#).unwrap();
        assert_eq!(keyed.get(i64::MAX), Some(&1));
        assert!(serde_json::from_str::<Collection<i32>>("[1,2]").is_ok());
    }

    #[test]
    fn nested_groups_round_trip() {
        let groups = collection! {
            "IT" => collection!["budiono", "sebas"],
            "HR" => collection!["alex"],
        };
        let json = serde_json::to_string(&groups).unwrap();
        assert_eq!(json, r#"{"IT":["budiono","sebas"],"HR":["alex"]}"#);

        let back: Collection<Collection<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.get("IT").map(Collection::to_vec),
            Some(vec!["budiono".to_owned(), "sebas".to_owned()])
        );
        assert_eq!(back.get("HR").map(Collection::len), Some(1));
    }
}
