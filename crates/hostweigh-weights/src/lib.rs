//! hostweigh-weights — the host weighing pipeline.
//!
//! Takes the hosts that survived filtering and orders them from most to
//! least preferred. Each weigher scores every host on one criterion; the
//! scores are min-max normalized to `[0, 1]`, scaled by the weigher's
//! multiplier, and summed per host.
//!
//! # Components
//!
//! - **`normalize`** — Min-max rescaling with degenerate-range handling
//! - **`weigher`** — The `Weigher` trait and `WeighedHost`
//! - **`weighers`** — Built-in RAM, I/O ops, and metrics weighers
//! - **`registry`** — Name → factory lookup for weigher classes
//! - **`handler`** — Runs a full pass and sorts the result
//!
//! # Pass
//!
//! ```text
//! names ──registry──▶ [WeigherClass] ──build──▶ [Box<dyn Weigher>]
//!                                                   │
//! [HostState] ──▶ [WeighedHost{weight: 0}] ──weigh_all per weigher──▶ sort desc
//! ```

pub mod error;
pub mod handler;
pub mod normalize;
pub mod registry;
pub mod weigher;
pub mod weighers;

pub use error::{WeighError, WeighResult};
pub use handler::WeightHandler;
pub use normalize::normalize;
pub use registry::{ALL_WEIGHERS, WeigherClass, WeigherFactory, WeigherRegistry};
pub use weigher::{WeighProperties, WeighedHost, WeighedHostView, Weigher};
pub use weighers::{IoOpsWeigher, MetricsWeigher, RamWeigher, parse_setting};
