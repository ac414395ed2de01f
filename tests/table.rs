use std::collections::HashMap;

use chained_hash_table::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_pairs(seed: u64, count: usize, key_space: usize) -> Vec<(String, String)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let key = format!("key_{}", rng.gen_range(0..key_space));
            let value = format!("value_{}", rng.gen::<u32>());
            (key, value)
        })
        .collect()
}

#[test]
fn demo_scenario() {
    init_logger();
    let mut table = ChainedHashTable::with_capacity(2).unwrap();
    table.insert("line_1", "Tiny hash table");
    table.insert("line_2", "Filled beyond capacity");
    table.insert("line_3", "Linked list saves the day!");

    assert_eq!(table.len(), 3);
    assert_eq!(table.retrieve("line_1"), Some("Tiny hash table"));
    assert_eq!(table.retrieve("line_2"), Some("Filled beyond capacity"));
    assert_eq!(table.retrieve("line_3"), Some("Linked list saves the day!"));

    let table = table.resize().unwrap();
    assert_eq!(table.capacity(), 4);
    assert_eq!(table.len(), 3);
    assert_eq!(table.retrieve("line_1"), Some("Tiny hash table"));
    assert_eq!(table.retrieve("line_2"), Some("Filled beyond capacity"));
    assert_eq!(table.retrieve("line_3"), Some("Linked list saves the day!"));

    table.destroy();
}

#[test]
fn insert_and_retrieve_with_collisions() {
    // three buckets for a thousand keys, every chain is long
    let pairs = random_pairs(7, 1000, 1000);
    let mut table = ChainedHashTable::with_capacity(3).unwrap();
    let mut reference = HashMap::new();
    for (key, value) in &pairs {
        table.insert(key.as_str(), value.as_str());
        reference.insert(key.clone(), value.clone());
    }

    assert_eq!(table.len(), reference.len());
    for (key, value) in &reference {
        assert_eq!(table.retrieve(key), Some(value.as_str()));
    }
}

#[test]
fn duplicate_insert_keeps_one_entry() {
    let mut table = ChainedHashTable::with_capacity(2).unwrap();
    table.insert("line_1", "first");
    table.insert("line_3", "neighbour");
    let index = table.bucket_index("line_1");
    let chain = table.bucket_len(index);

    assert_eq!(table.insert("line_1", "second").as_deref(), Some("first"));
    assert_eq!(table.bucket_len(index), chain);
    assert_eq!(table.len(), 2);
    assert_eq!(table.retrieve("line_1"), Some("second"));
    assert_eq!(table.retrieve("line_3"), Some("neighbour"));
}

#[test]
fn remove_from_middle_of_chain() {
    init_logger();
    // a single bucket puts every key on one chain
    let mut table = ChainedHashTable::with_capacity(1).unwrap();
    for i in 0..5 {
        table.insert(format!("key_{}", i), format!("value_{}", i));
    }

    assert_eq!(table.remove("key_2").unwrap(), "value_2");
    assert_eq!(table.len(), 4);
    assert_eq!(table.bucket_len(0), Some(4));
    assert_eq!(table.retrieve("key_2"), None);
    for i in [0, 1, 3, 4] {
        assert_eq!(
            table.retrieve(&format!("key_{}", i)),
            Some(format!("value_{}", i).as_str())
        );
    }
    let order: Vec<_> = table.iter().map(|(k, _)| k).collect();
    assert_eq!(order, ["key_0", "key_1", "key_3", "key_4"]);
}

#[test]
fn remove_head_and_tail() {
    let mut table = ChainedHashTable::with_capacity(1).unwrap();
    for key in ["a", "b", "c"] {
        table.insert(key, key);
    }
    table.remove("a").unwrap();
    table.remove("c").unwrap();
    assert_eq!(table.iter().collect::<Vec<_>>(), [("b", "b")]);
    table.remove("b").unwrap();
    assert!(table.is_empty());
    assert_eq!(table.bucket_len(0), Some(0));
}

#[test]
fn remove_missing_key_reports_not_found() {
    init_logger();
    let mut table = ChainedHashTable::with_capacity(2).unwrap();
    table.insert("line_1", "a");
    let before = format!("{:?}", table);

    // line_2 hashes to the empty bucket, line_3 to line_1's chain
    for key in ["line_2", "line_3"] {
        let err = table.remove(key).unwrap_err();
        assert_eq!(err, TableError::KeyNotFound(key.to_owned()));
        assert_eq!(err.to_string(), format!("Unable to find entry with key: {}", key));
    }
    assert_eq!(format!("{:?}", table), before);
}

#[test]
fn removing_twice_fails_the_second_time() {
    let mut table = ChainedHashTable::with_capacity(4).unwrap();
    table.insert("line_1", "a");
    assert_eq!(table.remove("line_1").unwrap(), "a");
    assert!(table.remove("line_1").unwrap_err().is_not_found());
}

#[test]
fn empty_value_is_not_a_miss() {
    let mut table = ChainedHashTable::with_capacity(4).unwrap();
    table.insert("present", "");
    assert_eq!(table.retrieve("present"), Some(""));
    assert_eq!(table.try_retrieve("present"), Ok(""));
    assert_eq!(table.retrieve("absent"), None);
    assert_eq!(
        table.try_retrieve("absent"),
        Err(TableError::KeyNotFound("absent".into()))
    );
}

#[test]
fn resize_preserves_every_pair() {
    let pairs = random_pairs(11, 500, 300);
    let mut table = ChainedHashTable::with_capacity(5).unwrap();
    for (key, value) in &pairs {
        table.insert(key.as_str(), value.as_str());
    }
    let before: HashMap<String, String> = table
        .iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

    for expected_capacity in [10, 20, 40, 80] {
        table = table.resize().unwrap();
        assert_eq!(table.capacity(), expected_capacity);
        assert_eq!(table.len(), before.len());
        for (key, value) in &before {
            assert_eq!(table.retrieve(key), Some(value.as_str()));
        }
    }
}

#[test]
fn chains_redistribute_after_resize() {
    let mut table = ChainedHashTable::with_capacity(1).unwrap();
    for i in 0..64 {
        table.insert(format!("key_{}", i), i.to_string());
    }
    assert_eq!(table.bucket_len(0), Some(64));

    table.grow().unwrap();
    table.grow().unwrap();
    let total: usize = (0..table.capacity()).filter_map(|i| table.bucket_len(i)).sum();
    assert_eq!(total, 64);
    for i in 0..table.capacity() {
        assert!(table.bucket_len(i).unwrap() < 64);
    }
    for (key, _) in table.iter() {
        assert_eq!(
            table.bucket_index(key),
            chained_hash_table::hash::hash(key, 4).unwrap()
        );
    }
}

#[test]
fn resize_keeps_insertion_order_within_buckets() {
    init_logger();
    let keys: Vec<String> = random_pairs(11, 40, 1_000_000)
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    let mut table = ChainedHashTable::with_capacity(1).unwrap();
    for key in &keys {
        table.insert(key.as_str(), "v");
    }

    for _ in 0..3 {
        table = table.resize().unwrap();
        let mut expected: Vec<&str> = Vec::new();
        for index in 0..table.capacity() {
            let mut seen = Vec::new();
            for key in &keys {
                if table.bucket_index(key) == index && !seen.contains(key) {
                    seen.push(key.clone());
                    expected.push(key.as_str());
                }
            }
        }
        let actual: Vec<&str> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn insert_remove_random() {
    let pairs = random_pairs(42, 2000, 64);
    let mut table = ChainedHashTable::with_capacity(8).unwrap();
    let mut reference: HashMap<String, String> = HashMap::new();
    let mut rng = StdRng::seed_from_u64(42);

    for (key, value) in pairs {
        if rng.gen_bool(0.3) {
            let expected = reference.remove(&key).ok_or(TableError::KeyNotFound(key.clone()));
            assert_eq!(table.remove(&key), expected);
        } else {
            let expected = reference.insert(key.clone(), value.clone());
            assert_eq!(table.insert(key, value), expected);
        }
        assert_eq!(table.len(), reference.len());
    }
    for (key, value) in &reference {
        assert_eq!(table.retrieve(key), Some(value.as_str()));
    }
}

#[test]
fn generic_driver_through_trait() {
    fn fill<T: HashTable>(mut table: T) -> T {
        for i in 0..10 {
            table.insert(format!("k{}", i), format!("v{}", i));
        }
        table
    }

    let table = fill(<ChainedHashTable as HashTable>::with_capacity(2).unwrap());
    let table = HashTable::resize(table).unwrap();
    assert_eq!(HashTable::capacity(&table), 4);
    assert_eq!(HashTable::len(&table), 10);
    assert_eq!(HashTable::get(&table, "k7"), Some("v7"));
}
