use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The tracked event kinds, in the order they are reported and exported.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum CounterKind {
    RayBoxTestsTotal,
    RayBoxHits,
    RayBoxMisses,
    RayTriangleTestsTotal,
    RayTriangleHits,
    RayTriangleMisses,
    BvhNodesVisited,
    LeafNodesVisited,
    InnerNodesVisited,
    RaysTracedTotal,
    RaysWithHits,
    RaysWithoutHits,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CounterCategory {
    RayBox,
    RayTriangle,
    BvhTraversal,
    Ray,
}

impl CounterKind {
    /// Returns the exported name, e.g. `ray_box_tests_total`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn category(self) -> CounterCategory {
        match self {
            CounterKind::RayBoxTestsTotal | CounterKind::RayBoxHits | CounterKind::RayBoxMisses => {
                CounterCategory::RayBox
            }
            CounterKind::RayTriangleTestsTotal
            | CounterKind::RayTriangleHits
            | CounterKind::RayTriangleMisses => CounterCategory::RayTriangle,
            CounterKind::BvhNodesVisited
            | CounterKind::LeafNodesVisited
            | CounterKind::InnerNodesVisited => CounterCategory::BvhTraversal,
            CounterKind::RaysTracedTotal
            | CounterKind::RaysWithHits
            | CounterKind::RaysWithoutHits => CounterCategory::Ray,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Process-wide intersection counters.
///
/// Every counter is independent. Increments are single relaxed atomic adds, so the
/// per-category relations (`hits + misses == tests_total` and friends) only hold once
/// all producers have quiesced. See [StatsSnapshot::consistency_issues].
pub struct IntersectionCounters {
    counters: [AtomicU64; CounterKind::COUNT],
}

impl IntersectionCounters {
    pub fn new() -> Self {
        Self {
            counters: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    #[inline]
    pub fn increment(&self, kind: CounterKind) {
        self.counters[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Adds `n` in one atomic op. Lets workers flush locally accumulated tallies.
    #[inline]
    pub fn add(&self, kind: CounterKind, n: u64) {
        self.counters[kind.index()].fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self, kind: CounterKind) -> u64 {
        self.counters[kind.index()].load(Ordering::Relaxed)
    }

    /// Zeroes all counters.
    ///
    /// Must not race with increments: only call this before workers start or after
    /// they have joined.
    pub fn reset(&self) {
        for c in &self.counters {
            c.store(0, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let mut values = [0; CounterKind::COUNT];
        for kind in CounterKind::iter() {
            values[kind.index()] = self.get(kind);
        }
        StatsSnapshot { values }
    }
}

impl Default for IntersectionCounters {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_named_increments {
    ( $( $fn_name:ident => $kind:ident ),+ $(,)? ) => {
        impl IntersectionCounters {
            $(
                #[inline]
                pub fn $fn_name(&self) {
                    self.increment(CounterKind::$kind);
                }
            )*
        }
    };
}

impl_named_increments!(
    increment_ray_box_test => RayBoxTestsTotal,
    increment_ray_box_hit => RayBoxHits,
    increment_ray_box_miss => RayBoxMisses,
    increment_ray_triangle_test => RayTriangleTestsTotal,
    increment_ray_triangle_hit => RayTriangleHits,
    increment_ray_triangle_miss => RayTriangleMisses,
    increment_bvh_node_visited => BvhNodesVisited,
    increment_leaf_node_visited => LeafNodesVisited,
    increment_inner_node_visited => InnerNodesVisited,
    increment_ray_traced => RaysTracedTotal,
    increment_ray_with_hit => RaysWithHits,
    increment_ray_without_hit => RaysWithoutHits,
);

/// Plain copy of the counter values at one point in time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatsSnapshot {
    values: [u64; CounterKind::COUNT],
}

impl StatsSnapshot {
    pub fn get(&self, kind: CounterKind) -> u64 {
        self.values[kind.index()]
    }

    pub fn set(&mut self, kind: CounterKind, value: u64) {
        self.values[kind.index()] = value;
    }

    /// Iterates `(kind, value)` in export order.
    pub fn iter(&self) -> impl Iterator<Item = (CounterKind, u64)> + '_ {
        CounterKind::iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Returns a description for each per-category relation that doesn't hold.
    ///
    /// These relations are only expected to hold after quiescence, and only if the
    /// host records every event with its outcome.
    pub fn consistency_issues(&self) -> Vec<String> {
        let checks = [
            (
                "Ray-Box",
                CounterKind::RayBoxTestsTotal,
                CounterKind::RayBoxHits,
                CounterKind::RayBoxMisses,
            ),
            (
                "Ray-Triangle",
                CounterKind::RayTriangleTestsTotal,
                CounterKind::RayTriangleHits,
                CounterKind::RayTriangleMisses,
            ),
            (
                "BVH",
                CounterKind::BvhNodesVisited,
                CounterKind::LeafNodesVisited,
                CounterKind::InnerNodesVisited,
            ),
            (
                "Ray",
                CounterKind::RaysTracedTotal,
                CounterKind::RaysWithHits,
                CounterKind::RaysWithoutHits,
            ),
        ];

        checks
            .iter()
            .filter_map(|&(label, total, a, b)| {
                let (total_v, a_v, b_v) = (self.get(total), self.get(a), self.get(b));
                // Widen so that near-max counters can't overflow the sum
                if (a_v as u128) + (b_v as u128) != total_v as u128 {
                    Some(format!(
                        "{}: {} ({}) + {} ({}) != {} ({})",
                        label,
                        a.name(),
                        a_v,
                        b.name(),
                        b_v,
                        total.name(),
                        total_v
                    ))
                } else {
                    None
                }
            })
            .collect()
    }
}
