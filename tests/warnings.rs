// Dropped names and merged duplicates are reported through `log::warn!`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Once;

use geodedup::{Point, PointVec, PointVecConfig};
use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps every record on the thread that logged it, so tests running in
/// parallel only see their own output.
struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool { true }

    fn log(&self, record: &Record) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

/// Run `f` and return the warnings it logged.
fn warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
    let out = f();
    let warnings = RECORDS.with(|r| {
        r.borrow_mut()
            .drain(..)
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect()
    });
    (out, warnings)
}

fn near_pair() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0, 0.0),
        Point::new(0.0, 0.0, 0.0001),
        Point::new(5.0, 5.0, 5.0),
    ]
}

fn names(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
    pairs.iter().map(|&(name, index)| (name.to_owned(), index)).collect()
}

fn config() -> PointVecConfig {
    PointVecConfig::new("test").with_rel_eps(1e-4)
}

#[test]
fn construction_reports_merges_and_dropped_names() {
    let (vec, warnings) = warnings(|| PointVec::new(config(), near_pair(), Some(names(&[("a", 0), ("b", 1)]))));
    let vec = vec.unwrap();

    assert_eq!(vec.id_by_name("a"), Ok(0));
    assert!(vec.id_by_name("b").is_err());
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings[0].contains("there are 1 double points"), "{warnings:?}");
    assert!(warnings[1].contains("already named 'a', dropping name 'b'"), "{warnings:?}");
}

#[test]
fn distinct_names_are_quiet() {
    let (vec, warnings) = warnings(|| PointVec::new(config(), near_pair(), Some(names(&[("a", 0), ("b", 2)]))));
    assert_eq!(vec.unwrap().names(), [("a", 0), ("b", 1)]);
    // Only the merge itself is reported.
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("double points"));
}

#[test]
fn push_back_named_reports_a_taken_name() {
    let mut vec = PointVec::new(config(), near_pair(), Some(names(&[("a", 0)]))).unwrap();

    let (id, warnings) = warnings(|| vec.push_back_named(Point::new(1.0, 2.0, 3.0), "a"));
    assert_eq!(id, Ok(2));
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("share the name 'a' (ids 0 and 2)"), "{warnings:?}");
}

#[test]
fn push_back_named_reports_a_renamed_target() {
    let mut vec = PointVec::new(config(), near_pair(), Some(names(&[("a", 0)]))).unwrap();

    let (id, warnings) = warnings(|| vec.push_back_named(Point::new(0.0, 0.0, 0.0), "other"));
    assert_eq!(id, Ok(0));
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(warnings[0].contains("already named 'a', dropping name 'other'"), "{warnings:?}");
}

#[test]
fn push_back_named_with_a_fresh_name_is_quiet() {
    let mut vec = PointVec::new(config(), near_pair(), None).unwrap();

    let (id, warnings) = warnings(|| vec.push_back_named(Point::new(1.0, 2.0, 3.0), "well"));
    assert_eq!(id, Ok(2));
    assert!(warnings.is_empty(), "{warnings:?}");
}
