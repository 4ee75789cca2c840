//! Clearance evaluation.
//!
//! The proposed height of attachment (PHOA) sits 12 inches above the highest
//! communication attachment, or at 22'2" when there is none. Each
//! [`ClearanceCheck`] then measures the distance from PHOA up to one kind of
//! obstacle:
//!
//! | check                | obstacle                                | threshold     |
//! |----------------------|-----------------------------------------|---------------|
//! | `streetlight_bottom` | lowest street-light bottom              | configurable (4) |
//! | `circuit`            | lowest traffic circuit or drip loop     | configurable (12) |
//! | `pole_top`           | top of a telephone pole                 | fixed 4       |
//! | `lowest_power`       | lowest power on a joint pole            | configurable (40) |
//! | `transformer_bottom` | lowest transformer bottom               | configurable (30) |
//!
//! A check triggers make-ready when the obstacle is less than the threshold
//! above PHOA, or below PHOA altogether.

mod check;
mod checks;
mod evaluator;

pub use check::{decide, CheckOutcome, CheckStatus, ClearanceCheck, ObstacleWording};
pub use checks::{
    standard_checks, CircuitCheck, LowestPowerCheck, PoleTopCheck, StreetlightBottomCheck,
    TransformerBottomCheck, POLE_TOP_CLEARANCE,
};
pub use evaluator::{
    proposed_height, ClearanceEvaluator, ClearanceVerdict, COMMUNICATION_SEPARATION,
    DEFAULT_PROPOSED_HEIGHT,
};
