//! Integration tests for FrameStore

use ippcode_foundation::{FrameKind, Value};
use ippcode_storage::FrameStore;
use proptest::prelude::*;

// =============================================================================
// Declaration and Binding
// =============================================================================

#[test]
fn redeclaration_fails_even_after_reads() {
    let mut store = FrameStore::new();
    store.declare(FrameKind::Global, "x").unwrap();
    store.set(FrameKind::Global, "x", Value::Int(1)).unwrap();
    let _ = store.get(FrameKind::Global, "x").unwrap();
    assert_eq!(
        store.declare(FrameKind::Global, "x").unwrap_err().exit_code(),
        52
    );
}

#[test]
fn same_name_in_different_frames_is_fine() {
    let mut store = FrameStore::new();
    store.declare(FrameKind::Global, "x").unwrap();
    store.create_temporary();
    store.declare(FrameKind::Temporary, "x").unwrap();
    store.push_temporary().unwrap();
    store.declare(FrameKind::Local, "y").unwrap();
    assert!(store.exists(FrameKind::Local, "x").unwrap());
    assert!(!store.exists(FrameKind::Global, "y").unwrap());
}

#[test]
fn missing_frames_are_invalid() {
    let mut store = FrameStore::new();
    assert_eq!(store.declare(FrameKind::Local, "x").unwrap_err().exit_code(), 55);
    assert_eq!(store.get(FrameKind::Temporary, "x").unwrap_err().exit_code(), 55);
    assert_eq!(store.push_temporary().unwrap_err().exit_code(), 55);
    assert_eq!(store.pop_local().unwrap_err().exit_code(), 55);
}

#[test]
fn undeclared_variables_are_undefined() {
    let mut store = FrameStore::new();
    assert_eq!(store.get(FrameKind::Global, "x").unwrap_err().exit_code(), 54);
    assert_eq!(
        store.set(FrameKind::Global, "x", Value::Nil).unwrap_err().exit_code(),
        54
    );
}

// =============================================================================
// Frame Rotation
// =============================================================================

#[test]
fn createframe_discards_pending_frame() {
    let mut store = FrameStore::new();
    store.create_temporary();
    store.declare(FrameKind::Temporary, "a").unwrap();
    store.create_temporary();
    assert!(!store.exists(FrameKind::Temporary, "a").unwrap());
}

#[test]
fn pushframe_consumes_the_temporary_frame() {
    let mut store = FrameStore::new();
    store.create_temporary();
    store.push_temporary().unwrap();
    assert!(store.temporary().is_none());
    assert_eq!(store.locals().len(), 1);
}

#[test]
fn visible_count_ignores_buried_locals() {
    let mut store = FrameStore::new();
    store.create_temporary();
    store.declare(FrameKind::Temporary, "a").unwrap();
    store.set(FrameKind::Temporary, "a", Value::Int(1)).unwrap();
    store.push_temporary().unwrap();
    assert_eq!(store.visible_declared_count(), 1);

    store.create_temporary();
    store.push_temporary().unwrap();
    assert_eq!(store.visible_declared_count(), 0);
}

proptest! {
    #[test]
    fn pop_restores_pushed_frame(values in prop::collection::vec(any::<i64>(), 0..8)) {
        let mut store = FrameStore::new();
        store.create_temporary();
        store.push_temporary().unwrap();
        for (i, v) in values.iter().enumerate() {
            let name = format!("v{i}");
            store.declare(FrameKind::Local, &name).unwrap();
            store.set(FrameKind::Local, &name, Value::Int(*v)).unwrap();
        }

        store.pop_local().unwrap();
        prop_assert!(store.locals().is_empty());
        for (i, v) in values.iter().enumerate() {
            let name = format!("v{i}");
            prop_assert_eq!(store.get(FrameKind::Temporary, &name).unwrap(), Some(&Value::Int(*v)));
        }
    }
}
