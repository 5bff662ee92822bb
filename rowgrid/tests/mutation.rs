//! Tests for add, remove, and move mutations.

use std::sync::{Arc, Mutex};

use serde_json::{Map, Value, json};

use rowgrid::{AddRowPos, GridConfig, GridEvent, Row, RowCollection, RowScope};

fn record(id: u64) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("id".into(), json!(id));
    map
}

fn dataset(ids: &[u64]) -> Value {
    Value::Array(ids.iter().map(|id| Value::Object(record(*id))).collect())
}

fn ids(rows: &[Row]) -> Vec<u64> {
    rows.iter()
        .filter_map(|row| row.field("id"))
        .filter_map(|v| v.as_u64())
        .collect()
}

fn event_log(collection: &mut RowCollection) -> Arc<Mutex<Vec<String>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    collection.subscribe(move |event| {
        let name = format!("{event:?}");
        let name = name.split([' ', '{']).next().unwrap_or("").to_string();
        sink.lock().unwrap().push(name);
    });
    log
}

#[test]
fn test_add_appends_by_default() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2])).unwrap();

    collection.add(record(3), None, None);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 2, 3]);
    assert_eq!(ids(&collection.rows(RowScope::Active)), vec![1, 2, 3]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 2, 3]);
}

#[test]
fn test_add_top_prepends() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2])).unwrap();

    collection.add(record(3), Some(AddRowPos::Top), None);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![3, 1, 2]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![3, 1, 2]);
}

#[test]
fn test_add_before_anchor() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2])).unwrap();
    let anchor = collection.get_row(&json!(1)).unwrap();

    collection.add(record(3), Some(AddRowPos::Top), Some(&anchor));

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![3, 1, 2]);
    assert_eq!(ids(&collection.rows(RowScope::Active)), vec![3, 1, 2]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![3, 1, 2]);
}

#[test]
fn test_add_after_anchor() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2])).unwrap();
    let anchor = collection.get_row(&json!(1)).unwrap();

    collection.add(record(3), Some(AddRowPos::Bottom), Some(&anchor));

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 3, 2]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 3, 2]);
}

#[test]
fn test_add_omitted_where_anchor_absent() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.register_data_stage(10, |rows| {
        Some(
            rows.into_iter()
                .filter(|row| row.field("id") != Some(json!(1)))
                .collect(),
        )
    });
    collection.load(dataset(&[1, 2])).unwrap();
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![2]);

    let anchor = collection.get_row(&json!(1)).unwrap();
    collection.add(record(3), Some(AddRowPos::Bottom), Some(&anchor));

    // The anchor exists in the full set but was filtered out of the
    // display, so the new row lands only where the anchor is present.
    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 3, 2]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![2]);

    // The next full refresh reconciles everything from the full set.
    collection.refresh();
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![3, 2]);
}

#[test]
fn test_add_many_keeps_input_order_at_top() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1])).unwrap();

    collection.add_many(vec![record(2), record(3)], Some(AddRowPos::Top), None);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![2, 3, 1]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![2, 3, 1]);
}

#[test]
fn test_add_many_after_anchor_keeps_input_order() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 4])).unwrap();
    let anchor = collection.get_row(&json!(1)).unwrap();

    collection.add_many(
        vec![record(2), record(3)],
        Some(AddRowPos::Bottom),
        Some(&anchor),
    );

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 2, 3, 4]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 2, 3, 4]);
}

#[test]
fn test_remove_patches_all_structures() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2, 3])).unwrap();
    let log = event_log(&mut collection);
    let row = collection.get_row(&json!(2)).unwrap();

    collection.remove(&row);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 3]);
    assert_eq!(ids(&collection.rows(RowScope::Active)), vec![1, 3]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 3]);

    let events = log.lock().unwrap();
    assert!(events.iter().any(|e| e == "RowDeleted"));
    assert!(events.iter().any(|e| e == "DataChanged"));
}

#[test]
fn test_remove_last_row_signals_empty_display() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1])).unwrap();
    let log = event_log(&mut collection);
    let row = collection.get_row(&json!(1)).unwrap();

    collection.remove(&row);

    assert_eq!(collection.row_count(RowScope::Display), 0);
    assert!(log.lock().unwrap().iter().any(|e| e == "DisplayEmpty"));
}

#[test]
fn test_remove_row_absent_from_derived_structures() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.register_data_stage(10, |rows| {
        Some(
            rows.into_iter()
                .filter(|row| row.field("id") != Some(json!(2)))
                .collect(),
        )
    });
    collection.load(dataset(&[1, 2, 3])).unwrap();

    let row = collection.get_row(&json!(2)).unwrap();
    collection.remove(&row);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![1, 3]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 3]);
}

#[test]
fn test_move_row_after_anchor() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2, 3])).unwrap();
    let row = collection.get_row(&json!(1)).unwrap();
    let anchor = collection.get_row(&json!(3)).unwrap();

    collection.move_row(&row, &anchor, true);

    assert_eq!(ids(&collection.rows(RowScope::All)), vec![2, 3, 1]);
    assert_eq!(ids(&collection.rows(RowScope::Active)), vec![2, 3, 1]);
    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![2, 3, 1]);
}

#[test]
fn test_move_row_round_trip_restores_order() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2, 3])).unwrap();
    let row = collection.get_row(&json!(1)).unwrap();
    let fore = collection.get_row(&json!(2)).unwrap();
    let aft = collection.get_row(&json!(3)).unwrap();

    collection.move_row(&row, &aft, true);
    collection.move_row(&row, &fore, false);

    assert_eq!(ids(&collection.rows(RowScope::Display)), vec![1, 2, 3]);
}

#[test]
fn test_move_restripes_affected_display_range() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.load(dataset(&[1, 2, 3, 4])).unwrap();
    let row = collection.get_row(&json!(1)).unwrap();
    let anchor = collection.get_row(&json!(3)).unwrap();

    collection.move_row(&row, &anchor, true);

    for (i, row) in collection.rows(RowScope::Display).iter().enumerate() {
        assert_eq!(row.render_state().even, i % 2 == 1, "parity at index {i}");
    }
}

#[test]
fn test_mutations_keep_subset_invariants() {
    let mut collection = RowCollection::new(GridConfig::new());
    collection.register_data_stage(10, |rows| {
        Some(
            rows.into_iter()
                .filter(|row| row.field("id").and_then(|v| v.as_u64()).unwrap_or(0) % 2 == 1)
                .collect(),
        )
    });
    collection.load(dataset(&[1, 2, 3, 4, 5])).unwrap();

    collection.add(record(7), Some(AddRowPos::Top), None);
    let row = collection.get_row(&json!(3)).unwrap();
    collection.remove(&row);

    let all = ids(&collection.rows(RowScope::All));
    let active = ids(&collection.rows(RowScope::Active));
    let display = ids(&collection.rows(RowScope::Display));

    for id in &active {
        assert!(all.contains(id), "active row {id} missing from full set");
    }
    for id in &display {
        assert!(active.contains(id), "display row {id} missing from active set");
    }
}
