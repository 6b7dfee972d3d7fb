//! Game rules for backgammon.
//!
//! Pure functions over a [`Board`](crate::Board). The move engine and the
//! drop contracts both compose these so the same rule is never coded twice.

pub mod bear_off;
pub mod legal;
pub mod movement;

pub use bear_off::{can_bear_off, is_farthest_back};
pub use legal::legal_destinations;
pub use movement::{Occupancy, occupancy, pip_distance, source_holds};
