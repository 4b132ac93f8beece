//! Proportional partitions of the inline measure.
//!
//! A table row divides its measure between its cells. Every cell contributes
//! a [`PartitionUnit`]; units are either *static* (an explicit width pins the
//! cell) or weighted (the weight is an estimate of the cell's content
//! length). Rows with the same cell count share one merged [`Partition`] so
//! that columns line up across the table.

use std::collections::BTreeMap;

/// One cell's claim on the row measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionUnit {
    /// Pixel width for static units, relative weight otherwise.
    pub weight: i32,
    /// Static units keep their weight as an exact size.
    pub is_static: bool,
}

impl PartitionUnit {
    /// A weighted unit.
    #[must_use]
    pub const fn new(weight: i32) -> Self {
        Self {
            weight,
            is_static: false,
        }
    }

    /// A unit pinned to `size` pixels.
    #[must_use]
    pub const fn fixed(size: i32) -> Self {
        Self {
            weight: size,
            is_static: true,
        }
    }

    /// Proportional share: `floor(measure * weight / total_weight)`.
    #[must_use]
    pub fn get_size(&self, measure: i32, total_weight: i32) -> i32 {
        if total_weight <= 0 {
            return 0;
        }
        let share = i64::from(measure) * i64::from(self.weight) / i64::from(total_weight);
        i32::try_from(share).unwrap_or(i32::MAX)
    }

    /// Merge with the unit in the same column of another row.
    ///
    /// A static unit wins over a weighted one. Between two units of the same
    /// kind the larger weight wins, and a tie keeps `other`.
    #[must_use]
    pub const fn merge_to(self, other: Self) -> Self {
        if self.is_static && !other.is_static {
            return self;
        }
        if !self.is_static && other.is_static {
            return other;
        }
        if self.weight > other.weight { self } else { other }
    }
}

/// The units of one row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    units: Vec<PartitionUnit>,
}

impl Partition {
    /// Build a partition from units in column order.
    #[must_use]
    pub const fn new(units: Vec<PartitionUnit>) -> Self {
        Self { units }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` when there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The units in column order.
    #[must_use]
    pub fn units(&self) -> &[PartitionUnit] {
        &self.units
    }

    /// Column-wise merge. Extra columns on either side are kept as they are.
    #[must_use]
    pub fn merge_to(&self, other: &Self) -> Self {
        let len = self.units.len().max(other.units.len());
        let units = (0..len)
            .filter_map(|i| match (self.units.get(i), other.units.get(i)) {
                (Some(a), Some(b)) => Some(a.merge_to(*b)),
                (Some(unit), None) | (None, Some(unit)) => Some(*unit),
                (None, None) => None,
            })
            .collect();
        Self { units }
    }

    /// Resolve every column to pixels.
    ///
    /// Static columns take their fixed size (clamped to what is left), and
    /// the remaining measure is shared by weight. The sum never exceeds
    /// `measure`.
    #[must_use]
    pub fn get_sizes(&self, measure: i32) -> Vec<i32> {
        let static_total: i32 = self
            .units
            .iter()
            .filter(|u| u.is_static)
            .map(|u| u.weight.max(0))
            .sum();
        let mut rest = measure.max(0);
        let static_scale = static_total > rest;
        let flexible_measure = (rest - static_total).max(0);
        let total_weight: i32 = self
            .units
            .iter()
            .filter(|u| !u.is_static)
            .map(|u| u.weight.max(0))
            .sum();

        let mut sizes = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let size = if unit.is_static {
                if static_scale {
                    unit.get_size(measure.max(0), static_total)
                } else {
                    unit.weight.max(0)
                }
            } else {
                unit.get_size(flexible_measure, total_weight)
            };
            let size = size.min(rest);
            rest -= size;
            sizes.push(size);
        }
        sizes
    }
}

/// Partitions keyed by cell count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSet {
    partitions: BTreeMap<usize, Partition>,
}

impl PartitionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row partition, merging it with any row of the same cell count.
    pub fn add(&mut self, count: usize, partition: Partition) {
        let merged = match self.partitions.get(&count) {
            Some(existing) => existing.merge_to(&partition),
            None => partition,
        };
        let _ = self.partitions.insert(count, merged);
    }

    /// The merged partition for rows with `count` cells.
    #[must_use]
    pub fn get(&self, count: usize) -> Option<&Partition> {
        self.partitions.get(&count)
    }

    /// Column sizes for a row of `count` cells across `measure` pixels.
    ///
    /// Rows whose cell count was never scanned are divided evenly.
    #[must_use]
    pub fn get_sizes(&self, count: usize, measure: i32) -> Vec<i32> {
        if let Some(partition) = self.get(count) {
            return partition.get_sizes(measure);
        }
        if count == 0 {
            return Vec::new();
        }
        let even = Partition::new(vec![PartitionUnit::new(1); count]);
        even.get_sizes(measure)
    }
}
