//! Integration tests for member-path emptiness checks
//!
//! These exercise paths through nested records, wrappers and collections,
//! the member-wise record rule, and the evaluator cache under concurrency.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Utc};
use tripwire::empty::Iterable;
use tripwire::inspect::{Field, Inspect, Shape};
use tripwire::prelude::*;
use tripwire::selector::{EvaluatorCache, DEFAULT_CAPACITY};
use uuid::Uuid;

// Example domain types for testing

#[derive(Debug, Clone, Default)]
struct Street {
    line: String,
    number: Option<u32>,
}

#[derive(Debug, Clone, Default)]
struct Address {
    street: Option<Street>,
    city: String,
    tags: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
struct Customer {
    id: Uuid,
    address: Option<Box<Address>>,
    notes: Vec<String>,
    joined: Option<DateTime<Utc>>,
}

impl Inspect for Street {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::new("line", |s: &Street| &s.line),
            Field::new("number", |s: &Street| &s.number),
        ])
    }
}

impl Inspect for Address {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::optional("street", |a: &Address| a.street.as_ref()),
            Field::new("city", |a: &Address| &a.city),
            Field::new("tags", |a: &Address| &a.tags),
        ])
    }
}

impl Inspect for Customer {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::new("id", |c: &Customer| &c.id),
            Field::new("address", |c: &Customer| &c.address),
            Field::new("notes", |c: &Customer| &c.notes),
            Field::new("joined", |c: &Customer| &c.joined),
        ])
    }
}

fn path(text: &str) -> Path<Customer> {
    Path::parse(text).unwrap()
}

fn customer_in(city: &str) -> Customer {
    Customer {
        id: Uuid::from_u128(7),
        address: Some(Box::new(Address {
            street: Some(Street {
                line: "Rua Augusta".into(),
                number: Some(12),
            }),
            city: city.into(),
            tags: HashSet::new(),
        })),
        notes: vec!["vip".into()],
        joined: Some(Utc::now()),
    }
}

#[test]
fn test_three_hops_are_null_safe() {
    let line = path("address.street.line");

    // absent at the first hop
    assert!(is_empty_at(&Customer::default(), &line));

    // absent at the second hop
    let mut no_street = customer_in("Lisbon");
    if let Some(address) = no_street.address.as_mut() {
        address.street = None;
    }
    assert!(is_empty_at(&no_street, &line));

    // present all the way
    assert!(!is_empty_at(&customer_in("Lisbon"), &line));
}

#[test]
fn test_leaf_rules_through_paths() {
    let full = customer_in("Lisbon");
    let fresh = Customer::default();

    assert!(!is_empty_at(&full, &path("id")));
    assert!(is_empty_at(&fresh, &path("id")));

    assert!(!is_empty_at(&full, &path("notes")));
    assert!(is_empty_at(&fresh, &path("notes")));

    assert!(is_empty_at(&full, &path("address.tags")));
    assert!(!is_empty_at(&full, &path("address.street.number")));

    assert!(!is_empty_at(&full, &path("joined")));
    let epoch = Customer {
        joined: Some(DateTime::<Utc>::default()),
        ..Customer::default()
    };
    assert!(is_empty_at(&epoch, &path("joined")));
}

#[test]
fn test_absent_root_is_empty() {
    assert!(is_empty_at(None::<&Customer>, &path("address.city")));
}

#[test]
fn test_composite_member_rule() {
    let street = path("address.street");

    let blank = Customer {
        address: Some(Box::new(Address {
            street: Some(Street::default()),
            ..Address::default()
        })),
        ..Customer::default()
    };
    assert!(is_empty_at(&blank, &street));

    let numbered = Customer {
        address: Some(Box::new(Address {
            street: Some(Street {
                line: String::new(),
                number: Some(4),
            }),
            ..Address::default()
        })),
        ..Customer::default()
    };
    assert!(!is_empty_at(&numbered, &street));
}

#[derive(Debug)]
struct Pair {
    a: Option<String>,
    b: Vec<i32>,
}

impl Inspect for Pair {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::optional("a", |p: &Pair| p.a.as_ref()),
            Field::new("b", |p: &Pair| &p.b),
        ])
    }
}

#[test]
fn test_record_with_absent_and_empty_members() {
    assert!(is_empty_members(&Pair { a: None, b: vec![] }).unwrap());
    assert!(!is_empty_members(&Pair {
        a: Some("x".into()),
        b: vec![]
    }).unwrap());
    assert!(!is_empty_members(&Pair {
        a: None,
        b: vec![0]
    }).unwrap());
}

struct Marker;

impl Inspect for Marker {
    fn shape() -> Shape {
        Shape::record::<Self>(Vec::new())
    }
}

#[test]
fn test_memberless_record_is_not_empty() {
    assert!(!is_empty_members(&Marker).unwrap());
    assert!(is_empty_members(None::<&Marker>).unwrap());
}

struct Category {
    name: String,
    parent: Option<Rc<Category>>,
    children: Vec<Category>,
}

impl Inspect for Category {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::new("name", |c: &Category| &c.name),
            Field::new("parent", |c: &Category| &c.parent),
            Field::new("children", |c: &Category| &c.children),
        ])
    }
}

fn category(name: &str, parent: Option<Category>) -> Category {
    Category {
        name: name.into(),
        parent: parent.map(Rc::new),
        children: Vec::new(),
    }
}

#[test]
fn test_self_referential_types_terminate() {
    let orphan = category("", None);
    assert!(is_empty_members(&orphan).unwrap());

    let nested_blank = category("", Some(category("", Some(category("", None)))));
    assert!(is_empty_members(&nested_blank).unwrap());

    let rooted = category("", Some(category("", Some(category("root", None)))));
    assert!(!is_empty_members(&rooted).unwrap());

    let grandparent = Path::<Category>::parse("parent.parent.name").unwrap();
    assert!(!is_empty_at(&rooted, &grandparent));
    assert!(is_empty_at(&orphan, &grandparent));
}

#[derive(Default)]
struct Ledger {
    entries: Iterable<BTreeMap<u32, i64>>,
    shared: Arc<Vec<u8>>,
}

impl Inspect for Ledger {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::new("entries", |l: &Ledger| &l.entries),
            Field::new("shared", |l: &Ledger| &l.shared),
        ])
    }
}

#[test]
fn test_iterable_and_shared_members() {
    let empty = Ledger::default();
    let entries = Path::<Ledger>::parse("entries").unwrap();
    let shared = Path::<Ledger>::parse("shared").unwrap();

    assert!(is_empty_at(&empty, &entries));
    assert!(is_empty_at(&empty, &shared));

    let booked = Ledger {
        entries: Iterable(BTreeMap::from([(1, -40)])),
        shared: Arc::new(vec![1]),
    };
    assert!(!is_empty_at(&booked, &entries));
    assert!(!is_empty_at(&booked, &shared));
}

#[test]
fn test_malformed_paths_fail_at_construction() {
    assert!(matches!(
        Path::<Customer>::parse("address.country"),
        Err(SelectorError::UnknownMember { .. })
    ));
    assert!(matches!(
        Path::<Customer>::parse("notes.first"),
        Err(SelectorError::NotARecord { .. })
    ));
    assert!(matches!(
        Path::<Customer>::parse(""),
        Err(SelectorError::Empty { .. })
    ));
}

struct Seller {
    email: String,
}

struct Buyer {
    email: String,
}

// Lists a field whose accessor reads a `Seller`.
impl Inspect for Buyer {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![Field::new("email", |s: &Seller| &s.email)])
    }
}

struct Order {
    buyer: Option<Buyer>,
    total: u32,
}

impl Inspect for Order {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::optional("buyer", |o: &Order| o.buyer.as_ref()),
            Field::new("total", |o: &Order| &o.total),
        ])
    }
}

#[test]
fn test_fields_of_another_record_fail_at_construction() {
    let buyer = Buyer {
        email: "ana@example.com".into(),
    };
    assert!(!buyer.email.is_empty());

    assert!(matches!(
        Path::<Buyer>::parse("email"),
        Err(SelectorError::FieldOwnerMismatch { record, owner, .. })
            if record.ends_with("Buyer") && owner.ends_with("Seller")
    ));
    assert!(is_empty_members(&buyer).is_err());

    // reached mid-path
    assert!(matches!(
        Path::<Order>::parse("buyer.email"),
        Err(SelectorError::FieldOwnerMismatch { .. })
    ));
    // reached only by the member-wise rule
    assert!(matches!(
        Path::<Order>::parse("buyer"),
        Err(SelectorError::FieldOwnerMismatch { .. })
    ));
    let order = Order {
        buyer: Some(buyer),
        total: 0,
    };
    assert!(matches!(
        is_empty_members(&order),
        Err(SelectorError::FieldOwnerMismatch { .. })
    ));
    // sibling members stay selectable
    assert!(is_empty_at(&order, &Path::<Order>::parse("total").unwrap()));

    let seller = Seller {
        email: String::new(),
    };
    assert!(seller.email.is_empty());
}

#[derive(Default)]
struct Handle {
    name: Arc<str>,
    aliases: Box<[String]>,
    motto: Option<Rc<str>>,
}

impl Inspect for Handle {
    fn shape() -> Shape {
        Shape::record::<Self>(vec![
            Field::new("name", |h: &Handle| &h.name),
            Field::new("aliases", |h: &Handle| &h.aliases),
            Field::new("motto", |h: &Handle| &h.motto),
        ])
    }
}

#[test]
fn test_shared_text_and_slice_members() {
    let name = Path::<Handle>::parse("name").unwrap();
    let aliases = Path::<Handle>::parse("aliases").unwrap();
    let motto = Path::<Handle>::parse("motto").unwrap();

    let blank = Handle::default();
    assert!(is_empty_at(&blank, &name));
    assert!(is_empty_at(&blank, &aliases));
    assert!(is_empty_at(&blank, &motto));
    assert!(is_empty_members(&blank).unwrap());

    let named = Handle {
        name: Arc::from("ana"),
        aliases: vec!["a.".to_owned()].into_boxed_slice(),
        motto: Some(Rc::from("")),
    };
    assert!(!is_empty_at(&named, &name));
    assert!(!is_empty_at(&named, &aliases));
    assert!(is_empty_at(&named, &motto));
    assert!(!is_empty_members(&named).unwrap());
}

#[test]
fn test_compilation_is_idempotent() {
    let cache = EvaluatorCache::new();
    let city = path("address.city");

    let cached = cache.compile(&city);
    cache.clear();
    let rebuilt = cache.compile(&city);
    let fresh = city.compile();

    let samples = [
        Customer::default(),
        customer_in(""),
        customer_in("Porto"),
    ];
    for sample in &samples {
        let expected = cached.evaluate(sample);
        assert_eq!(rebuilt.evaluate(sample), expected);
        assert_eq!(fresh.evaluate(sample), expected);
    }
}

#[test]
fn test_cache_stays_bounded() {
    let cache = EvaluatorCache::with_capacity(3);
    let texts = [
        "id",
        "notes",
        "joined",
        "address",
        "address.city",
        "address.tags",
        "address.street",
        "address.street.line",
    ];

    let sample = customer_in("Faro");
    for text in texts {
        let expected = path(text).compile().evaluate(&sample);
        assert_eq!(cache.is_empty_at(&sample, &path(text)), expected);
        assert!(cache.len() <= cache.capacity());
    }
    assert_eq!(EvaluatorCache::new().capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_concurrent_first_use() {
    let cache = Arc::new(EvaluatorCache::with_capacity(4));
    let texts = ["id", "notes", "address.city", "address.street.line", "joined"];

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let sample = if worker % 2 == 0 {
                    customer_in("Braga")
                } else {
                    Customer::default()
                };
                for round in 0..50 {
                    let text = texts[(worker + round) % texts.len()];
                    let path = path(text);
                    let expected = path.compile().evaluate(&sample);
                    assert_eq!(cache.is_empty_at(&sample, &path), expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(cache.len() <= 4);
}
