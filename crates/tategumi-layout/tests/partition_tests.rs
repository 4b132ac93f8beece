//! Integration tests for table column partitions.

use quickcheck_macros::quickcheck;
use tategumi_layout::{Partition, PartitionSet, PartitionUnit};

fn weighted(weights: &[i32]) -> Partition {
    Partition::new(weights.iter().copied().map(PartitionUnit::new).collect())
}

#[test]
fn test_weighted_shares() {
    assert_eq!(weighted(&[100, 50, 50]).get_sizes(600), vec![300, 150, 150]);
}

#[test]
fn test_shares_are_floored() {
    assert_eq!(weighted(&[1, 1, 1]).get_sizes(100), vec![33, 33, 33]);
}

#[test]
fn test_static_unit_keeps_size() {
    let partition = Partition::new(vec![
        PartitionUnit::fixed(100),
        PartitionUnit::new(1),
        PartitionUnit::new(1),
    ]);
    assert_eq!(partition.get_sizes(300), vec![100, 100, 100]);
}

#[test]
fn test_static_units_scale_when_too_wide() {
    let partition = Partition::new(vec![PartitionUnit::fixed(400), PartitionUnit::fixed(200)]);
    assert_eq!(partition.get_sizes(300), vec![200, 100]);
}

#[test]
fn test_zero_weights() {
    assert_eq!(weighted(&[0, 0]).get_sizes(100), vec![0, 0]);
}

// ---------------------------------------------------------------------------
// Merging rows
//
// Rows with the same cell count share one partition so that their columns
// line up.
// ---------------------------------------------------------------------------

#[test]
fn test_unit_merge_prefers_static() {
    let merged = PartitionUnit::new(80).merge_to(PartitionUnit::fixed(20));
    assert_eq!(merged, PartitionUnit::fixed(20));
    let merged = PartitionUnit::fixed(20).merge_to(PartitionUnit::new(80));
    assert_eq!(merged, PartitionUnit::fixed(20));
}

#[test]
fn test_unit_merge_prefers_larger_weight() {
    assert_eq!(
        PartitionUnit::new(3).merge_to(PartitionUnit::new(5)),
        PartitionUnit::new(5)
    );
    assert_eq!(
        PartitionUnit::new(7).merge_to(PartitionUnit::new(5)),
        PartitionUnit::new(7)
    );
}

#[test]
fn test_partition_merge_keeps_extra_columns() {
    let merged = weighted(&[3, 9]).merge_to(&weighted(&[5]));
    assert_eq!(merged.units(), weighted(&[5, 9]).units());
}

#[test]
fn test_set_merges_same_cell_count() {
    let mut set = PartitionSet::new();
    set.add(2, weighted(&[1, 1]));
    set.add(2, weighted(&[3, 1]));
    set.add(3, weighted(&[1, 2, 1]));
    assert_eq!(set.get_sizes(2, 400), vec![300, 100]);
    assert_eq!(set.get_sizes(3, 400), vec![100, 200, 100]);
}

#[test]
fn test_set_unknown_count_is_even() {
    let set = PartitionSet::new();
    assert_eq!(set.get_sizes(3, 90), vec![30, 30, 30]);
    assert!(set.get_sizes(0, 90).is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn units_of(cells: &[(u8, bool)]) -> Partition {
    Partition::new(
        cells
            .iter()
            .map(|&(weight, is_static)| {
                if is_static {
                    PartitionUnit::fixed(i32::from(weight))
                } else {
                    PartitionUnit::new(i32::from(weight))
                }
            })
            .collect(),
    )
}

#[quickcheck]
fn prop_sizes_fit_measure(cells: Vec<(u8, bool)>, measure: u16) -> bool {
    let measure = i32::from(measure);
    let sizes = units_of(&cells).get_sizes(measure);
    sizes.len() == cells.len()
        && sizes.iter().all(|&size| size >= 0)
        && sizes.iter().sum::<i32>() <= measure
}

#[quickcheck]
fn prop_heavier_column_is_not_narrower(weights: Vec<u8>, measure: u16) -> bool {
    let weights: Vec<i32> = weights.into_iter().map(i32::from).collect();
    let sizes = weighted(&weights).get_sizes(i32::from(measure));
    weights.iter().zip(&sizes).all(|(wa, sa)| {
        weights
            .iter()
            .zip(&sizes)
            .all(|(wb, sb)| wa < wb || sa >= sb)
    })
}
