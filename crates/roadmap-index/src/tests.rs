//! Unit tests for `NameIndex`.

use roadmap_core::CityId;

use crate::{IndexError, NameIndex};

#[test]
fn find_on_empty_index() {
    let idx = NameIndex::new();
    assert_eq!(idx.find(b"Warsaw"), None);
}

#[test]
fn insert_then_find() {
    let mut idx = NameIndex::new();
    idx.insert(b"Warsaw", CityId(0)).unwrap();
    assert_eq!(idx.find(b"Warsaw"), Some(CityId(0)));
}

#[test]
fn duplicate_insert_rejected() {
    let mut idx = NameIndex::new();
    idx.insert(b"Warsaw", CityId(0)).unwrap();
    let err = idx.insert(b"Warsaw", CityId(1)).unwrap_err();
    assert!(matches!(err, IndexError::NotUnique));
    // Original mapping is untouched.
    assert_eq!(idx.find(b"Warsaw"), Some(CityId(0)));
}

#[test]
fn distinguishes_prefix_and_superstring() {
    let mut idx = NameIndex::new();
    idx.insert(b"War", CityId(0)).unwrap();
    idx.insert(b"Warsaw", CityId(1)).unwrap();
    assert_eq!(idx.find(b"War"), Some(CityId(0)));
    assert_eq!(idx.find(b"Warsaw"), Some(CityId(1)));
    assert_eq!(idx.find(b"Wars"), None);
}

#[test]
fn case_and_byte_sensitive() {
    let mut idx = NameIndex::new();
    idx.insert(b"Warsaw", CityId(0)).unwrap();
    assert_eq!(idx.find(b"warsaw"), None);
}

#[test]
fn bulk_insert_skips_already_present() {
    let mut idx = NameIndex::new();
    idx.insert(b"A", CityId(0)).unwrap();
    let names = vec![b"A".to_vec(), b"B".to_vec(), b"C".to_vec()];
    let cities = vec![CityId(99), CityId(1), CityId(2)];
    idx.bulk_insert(&names, &cities).unwrap();
    // "A" keeps its original mapping; B and C are freshly inserted.
    assert_eq!(idx.find(b"A"), Some(CityId(0)));
    assert_eq!(idx.find(b"B"), Some(CityId(1)));
    assert_eq!(idx.find(b"C"), Some(CityId(2)));
}

#[test]
fn bulk_insert_shares_prefixes() {
    let mut idx = NameIndex::new();
    let names = vec![b"AA".to_vec(), b"AB".to_vec(), b"AC".to_vec()];
    let cities = vec![CityId(0), CityId(1), CityId(2)];
    idx.bulk_insert(&names, &cities).unwrap();
    assert_eq!(idx.find(b"AA"), Some(CityId(0)));
    assert_eq!(idx.find(b"AB"), Some(CityId(1)));
    assert_eq!(idx.find(b"AC"), Some(CityId(2)));
}

#[test]
fn inserting_a_name_that_is_an_existing_internal_node_attaches_its_city() {
    // "Warsaw" creates an internal (city-less) node for "War" along the way;
    // inserting "War" afterward must attach to that node rather than create
    // a sibling, and must not disturb "Warsaw".
    let mut idx = NameIndex::new();
    idx.insert(b"Warsaw", CityId(0)).unwrap();
    assert_eq!(idx.find(b"War"), None);
    idx.insert(b"War", CityId(1)).unwrap();
    assert_eq!(idx.find(b"War"), Some(CityId(1)));
    assert_eq!(idx.find(b"Warsaw"), Some(CityId(0)));
}

#[test]
fn bulk_insert_mixes_pre_existing_prefixes_with_new_shared_prefixes() {
    let mut idx = NameIndex::new();
    idx.insert(b"Warsaw", CityId(0)).unwrap();
    let names = vec![b"War".to_vec(), b"Ward".to_vec(), b"Warden".to_vec()];
    let cities = vec![CityId(1), CityId(2), CityId(3)];
    idx.bulk_insert(&names, &cities).unwrap();
    assert_eq!(idx.find(b"Warsaw"), Some(CityId(0)));
    assert_eq!(idx.find(b"War"), Some(CityId(1)));
    assert_eq!(idx.find(b"Ward"), Some(CityId(2)));
    assert_eq!(idx.find(b"Warden"), Some(CityId(3)));
}

#[test]
fn single_byte_names_both_nibbles() {
    let mut idx = NameIndex::new();
    idx.insert(&[0x00], CityId(0)).unwrap();
    idx.insert(&[0xFF], CityId(1)).unwrap();
    assert_eq!(idx.find(&[0x00]), Some(CityId(0)));
    assert_eq!(idx.find(&[0xFF]), Some(CityId(1)));
    assert_eq!(idx.find(&[0x0F]), None);
}
