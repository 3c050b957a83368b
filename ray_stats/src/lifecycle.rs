use std::path::Path;

use crate::{
    counters::{CounterKind, IntersectionCounters, StatsSnapshot},
    gate::CollectionGate,
    report,
    settings::StatsSettings,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Active,
    Terminated,
}

/// Ray intersection statistics for one simulator run.
///
/// Create one at startup, [init](RayStats::init) it, then share it with the workers
/// by reference or through an `Arc`. Workers call the `record_*` functions at their
/// event points; each one is a single branch when collection is disabled.
/// [cleanup](RayStats::cleanup) must only be called after all workers have joined.
pub struct RayStats {
    gate: CollectionGate,
    counters: IntersectionCounters,
    settings: StatsSettings,
    state: LifecycleState,
}

impl RayStats {
    pub fn new() -> Self {
        Self {
            gate: CollectionGate::disabled(),
            counters: IntersectionCounters::new(),
            settings: StatsSettings::default(),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Resolves the gate from `settings` and zeroes the counters if collection is enabled.
    pub fn init(&mut self, settings: StatsSettings) {
        if self.state != LifecycleState::Uninitialized {
            stats_warn!("init called in state {:?}, ignoring", self.state);
            return;
        }

        self.gate = settings.gate();
        self.settings = settings;
        self.state = LifecycleState::Active;

        if self.gate.is_enabled() {
            stats_info!("Ray intersection statistics collection ENABLED");
            self.counters.reset();
        } else {
            stats_info!("Ray intersection statistics collection DISABLED");
        }
    }

    /// Prints the final report and writes the CSV export if collection was enabled.
    pub fn cleanup(&mut self) {
        if self.state != LifecycleState::Active {
            stats_warn!("cleanup called in state {:?}, ignoring", self.state);
            return;
        }
        self.state = LifecycleState::Terminated;

        if self.gate.is_enabled() {
            self.print_stats("Final ");
            self.save_to_file(&self.settings.resolved_output_path());
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn settings(&self) -> &StatsSettings {
        &self.settings
    }

    #[inline(always)]
    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Raw counters, bypassing the gate.
    pub fn counters(&self) -> &IntersectionCounters {
        &self.counters
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.counters.snapshot()
    }

    /// Must not race with increments.
    pub fn reset(&self) {
        stats_trace!("Resetting counters");
        self.counters.reset();
    }

    pub fn print_stats(&self, prefix: &str) {
        report::print_stats(prefix, &self.snapshot());
    }

    pub fn save_to_file(&self, path: &Path) {
        report::save_to_file(path, &self.snapshot());
    }

    #[inline]
    pub fn count(&self, kind: CounterKind) {
        if self.gate.is_enabled() {
            self.counters.increment(kind);
        }
    }

    /// Records a ray-box test along with its outcome.
    #[inline]
    pub fn record_box_test(&self, hit: bool) {
        if self.gate.is_enabled() {
            self.counters.increment_ray_box_test();
            if hit {
                self.counters.increment_ray_box_hit();
            } else {
                self.counters.increment_ray_box_miss();
            }
        }
    }

    /// Records a ray-triangle test along with its outcome.
    #[inline]
    pub fn record_triangle_test(&self, hit: bool) {
        if self.gate.is_enabled() {
            self.counters.increment_ray_triangle_test();
            if hit {
                self.counters.increment_ray_triangle_hit();
            } else {
                self.counters.increment_ray_triangle_miss();
            }
        }
    }

    #[inline]
    pub fn record_node_visit(&self, is_leaf: bool) {
        if self.gate.is_enabled() {
            self.counters.increment_bvh_node_visited();
            if is_leaf {
                self.counters.increment_leaf_node_visited();
            } else {
                self.counters.increment_inner_node_visited();
            }
        }
    }

    /// Records a finished ray and whether it hit anything.
    #[inline]
    pub fn record_ray(&self, hit: bool) {
        if self.gate.is_enabled() {
            self.counters.increment_ray_traced();
            if hit {
                self.counters.increment_ray_with_hit();
            } else {
                self.counters.increment_ray_without_hit();
            }
        }
    }
}

impl Default for RayStats {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_gated_increments {
    ( $( $fn_name:ident => $kind:ident ),+ $(,)? ) => {
        impl RayStats {
            $(
                #[inline]
                pub fn $fn_name(&self) {
                    self.count(CounterKind::$kind);
                }
            )*
        }
    };
}

impl_gated_increments!(
    record_ray_box_test => RayBoxTestsTotal,
    record_ray_box_hit => RayBoxHits,
    record_ray_box_miss => RayBoxMisses,
    record_ray_triangle_test => RayTriangleTestsTotal,
    record_ray_triangle_hit => RayTriangleHits,
    record_ray_triangle_miss => RayTriangleMisses,
    record_bvh_node_visited => BvhNodesVisited,
    record_leaf_node_visited => LeafNodesVisited,
    record_inner_node_visited => InnerNodesVisited,
    record_ray_traced => RaysTracedTotal,
    record_ray_with_hit => RaysWithHits,
    record_ray_without_hit => RaysWithoutHits,
);
