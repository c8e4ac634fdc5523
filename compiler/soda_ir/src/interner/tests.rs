use super::*;

#[test]
fn test_intern_is_idempotent() {
    let mut interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    assert_eq!(a, b);
    assert_eq!(interner.lookup(a), "counter");
}

#[test]
fn test_distinct_strings_get_distinct_names() {
    let mut interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");
    assert_ne!(a, b);
    assert_eq!(interner.len(), 3);
}

#[test]
fn test_empty_string_is_preinterned() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_get_does_not_intern() {
    let mut interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);

    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
}

#[test]
fn test_dotted_names_are_interned_whole() {
    let mut interner = StringInterner::new();
    let dotted = interner.intern("N.S.v");
    assert_eq!(interner.lookup(dotted), "N.S.v");
    assert_eq!(interner.get("N"), None);
}
