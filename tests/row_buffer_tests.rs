//! Row buffer allocation, growth, and slot surgery tests

use rowfuse_core::buffer::{RowBuffer, OVER_ALLOCATE_SIZE};
use rowfuse_core::error::Error;
use rowfuse_core::types::{Row, Value};

fn five_row() -> Row {
    Row::from(vec![
        Value::from("test"),
        Value::Bool(true),
        Value::I64(100),
        Value::I64(101),
        Value::from("test1"),
    ])
}

fn longs(values: &[i64]) -> Row {
    values.iter().map(|&v| Value::I64(v)).collect()
}

#[test]
fn test_allocate_adds_slack() {
    let buf = RowBuffer::default();
    let row = buf.allocate(4);
    assert_eq!(row.capacity(), 4 + OVER_ALLOCATE_SIZE);
    assert!(row.iter().all(Value::is_null));
}

#[test]
fn test_allocate_custom_slack() {
    let buf = RowBuffer::new(3);
    assert_eq!(buf.allocate(0).capacity(), 3);
    assert_eq!(buf.allocate(7).capacity(), 10);
}

#[test]
fn test_resize_smaller_or_equal_keeps_row() {
    let buf = RowBuffer::default();
    let row = five_row();
    let expected = row.clone();

    let ptr = row.as_ptr();
    let same = buf.resize(Some(row), 3);
    assert_eq!(same.as_ptr(), ptr);
    assert_eq!(same, expected);
    assert!(!same.shares_storage(&expected));

    let ptr = same.as_ptr();
    let same = buf.resize(Some(same), 5);
    assert_eq!(same.as_ptr(), ptr);
    assert_eq!(same.capacity(), 5);
}

#[test]
fn test_resize_larger_copies_into_new_buffer() {
    let buf = RowBuffer::default();
    let row = five_row();
    let original = row.clone();
    let ptr = row.as_ptr();

    let grown = buf.resize(Some(row), 7);
    assert_ne!(grown.as_ptr(), ptr);
    assert!(grown.capacity() >= 7 + OVER_ALLOCATE_SIZE);
    assert_eq!(&grown[..5], &original[..]);
    assert!(grown[5..].iter().all(Value::is_null));
}

#[test]
fn test_resize_absent_row_allocates() {
    let buf = RowBuffer::default();
    let row = buf.resize(None, 6);
    assert_eq!(row.capacity(), 6 + OVER_ALLOCATE_SIZE);
}

#[test]
fn test_create_resized_copy_never_aliases() {
    let buf = RowBuffer::default();
    let row = five_row();

    let copy = buf.create_resized_copy(Some(&row), 3);
    assert!(!copy.shares_storage(&row));
    assert!(row.shares_storage(&row));
    // No growth needed: exact slot count, no slack.
    assert_eq!(copy.capacity(), row.capacity());
    assert_eq!(copy, row);

    let grown = buf.create_resized_copy(Some(&row), 8);
    assert_eq!(grown.capacity(), 8 + OVER_ALLOCATE_SIZE);
    assert_eq!(&grown[..5], &row[..]);
}

#[test]
fn test_empty_rows_never_share_storage() {
    let buf = RowBuffer::default();
    let empty = Row::default();

    let copy = buf.create_resized_copy(Some(&empty), 0);
    assert_eq!(copy.capacity(), 0);
    assert!(!copy.shares_storage(&empty));
    assert!(!empty.shares_storage(&empty));
}

#[test]
fn test_create_resized_copy_absent_row() {
    let buf = RowBuffer::default();
    let row = buf.create_resized_copy(None, 2);
    assert_eq!(row.capacity(), 2 + OVER_ALLOCATE_SIZE);
}

#[test]
fn test_concat_copy() {
    let buf = RowBuffer::default();
    let a = longs(&[1, 2, 3, 99]);
    let b = longs(&[4, 5]);
    let c = longs(&[6]);

    let out = buf.concat_copy(&[&a, &b, &c], &[3, 2, 1]).unwrap();
    assert_eq!(out.capacity(), 6 + OVER_ALLOCATE_SIZE);
    assert_eq!(&out[..6], &longs(&[1, 2, 3, 4, 5, 6])[..]);
    assert!(out[6..].iter().all(Value::is_null));
}

#[test]
fn test_concat_copy_rejects_bad_lengths() {
    let buf = RowBuffer::default();
    let a = longs(&[1, 2]);

    let err = buf.concat_copy(&[&a], &[3]).unwrap_err();
    assert!(matches!(err, Error::Shape(_)));

    let err = buf.concat_copy(&[&a], &[1, 1]).unwrap_err();
    assert!(matches!(err, Error::Shape(_)));
}

#[test]
fn test_remove_item() {
    let buf = RowBuffer::default();
    let arr = longs(&[1, 2, 3, 4, 5]);

    // Remove the first item
    let arr1 = buf.remove_item(&arr, 0).unwrap();
    assert_eq!(arr1, longs(&[2, 3, 4, 5]));

    // Remove the last item
    let arr2 = buf.remove_item(&arr1, arr1.capacity() - 1).unwrap();
    assert_eq!(arr2, longs(&[2, 3, 4]));

    // Remove in the middle
    let arr3 = buf.remove_item(&arr2, 1).unwrap();
    assert_eq!(arr3, longs(&[2, 4]));

    // Remove until empty
    let arr4 = buf.remove_item(&arr3, 0).unwrap();
    let arr5 = buf.remove_item(&arr4, 0).unwrap();
    assert_eq!(arr5.capacity(), 0);

    assert!(matches!(buf.remove_item(&arr5, 0), Err(Error::Shape(_))));
}

#[test]
fn test_remove_then_insert_restores_row() {
    let buf = RowBuffer::default();
    let arr = longs(&[10, 20, 30, 40]);

    for idx in 0..arr.capacity() {
        let removed = buf.remove_item(&arr, idx).unwrap();
        let occupied = removed.capacity();
        let restored = buf
            .insert_value(removed, occupied, idx, arr[idx].clone())
            .unwrap();
        assert_eq!(&restored[..arr.capacity()], &arr[..], "index {idx}");
    }
}

#[test]
fn test_remove_last_then_append_value_restores_row() {
    let buf = RowBuffer::default();
    let arr = longs(&[1, 2, 3]);
    let removed = buf.remove_item(&arr, 2).unwrap();
    let restored = buf.append_value(removed, 2, Value::I64(3));
    assert_eq!(&restored[..3], &arr[..]);
}

#[test]
fn test_remove_items() {
    let buf = RowBuffer::default();
    let arr = longs(&[1, 2, 3, 4, 5]);

    let same = buf.remove_items(&arr, &[]).unwrap();
    assert_eq!(same, arr);

    let out = buf.remove_items(&arr, &[0, 2, 4]).unwrap();
    assert_eq!(out.capacity(), arr.capacity() - 3);
    assert_eq!(out, longs(&[2, 4]));

    let out = buf.remove_items(&arr, &[3, 4]).unwrap();
    assert_eq!(out, longs(&[1, 2, 3]));
}

#[test]
fn test_remove_items_rejects_bad_indices() {
    let buf = RowBuffer::default();
    let arr = longs(&[1, 2, 3]);

    assert!(matches!(buf.remove_items(&arr, &[2, 0]), Err(Error::Shape(_))));
    assert!(matches!(buf.remove_items(&arr, &[1, 1]), Err(Error::Shape(_))));
    assert!(matches!(buf.remove_items(&arr, &[0, 3]), Err(Error::Shape(_))));
}

#[test]
fn test_append() {
    let buf = RowBuffer::default();
    let arr = longs(&[1, 2, 3]);

    let out = buf.append(Row::default(), 0, &arr);
    assert!(out.capacity() >= 3);
    assert_eq!(&out[..3], &arr[..]);

    let out = buf.append(longs(&[1, 2, 3]), 3, &[]);
    assert_eq!(&out[..3], &arr[..]);

    let out = buf.append(longs(&[1]), 1, &longs(&[2, 3]));
    assert_eq!(&out[..3], &arr[..]);

    let out = buf.append(longs(&[1, 2]), 2, &longs(&[3]));
    assert_eq!(&out[..3], &arr[..]);
}

#[test]
fn test_append_reuses_spare_capacity() {
    let buf = RowBuffer::default();
    let mut row = buf.allocate(1);
    row[0] = Value::I64(1);
    let ptr = row.as_ptr();

    let mut occupied = 1;
    for v in 2..=(1 + OVER_ALLOCATE_SIZE as i64) {
        row = buf.append_value(row, occupied, Value::I64(v));
        occupied += 1;
    }
    assert_eq!(row.as_ptr(), ptr);

    // One past the slack forces a single growth.
    row = buf.append_value(row, occupied, Value::I64(99));
    assert_ne!(row.as_ptr(), ptr);
    assert_eq!(row[occupied], Value::I64(99));
    assert_eq!(row[0], Value::I64(1));
}

#[test]
fn test_append_value() {
    let buf = RowBuffer::default();
    let out = buf.append_value(Row::default(), 0, Value::I64(1));
    assert!(out.capacity() >= 1);
    assert_eq!(out[0], Value::I64(1));

    let out = buf.append_value(longs(&[1]), 1, Value::I64(2));
    assert_eq!(&out[..2], &longs(&[1, 2])[..]);
}

#[test]
fn test_insert_value_out_of_range() {
    let buf = RowBuffer::default();
    let err = buf.insert_value(longs(&[1, 2]), 2, 3, Value::Null).unwrap_err();
    assert!(matches!(err, Error::Shape(_)));
    assert!(!err.suggestions().is_empty());
}
