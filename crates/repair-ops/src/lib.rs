pub mod bridge;
pub mod components;
pub mod repair;
pub mod tighten;

pub use bridge::{capsule_bridge, closest_point_pair, sample_points, ClosestPair};
pub use components::{component_count, text_components};
pub use repair::{repair_connectivity, safe_clean_dedupe, RepairOutcome, RepairParams, ROUND_PRECISION};
pub use tighten::{auto_tighten, Tightened, TIGHTEN_STEPS};
