#[macro_use]
pub mod macros;

pub mod counters;
pub mod gate;
pub mod lifecycle;
pub mod logging;
pub mod report;
pub mod settings;

pub use counters::{CounterCategory, CounterKind, IntersectionCounters, StatsSnapshot};
pub use gate::CollectionGate;
pub use lifecycle::{LifecycleState, RayStats};
pub use settings::StatsSettings;
