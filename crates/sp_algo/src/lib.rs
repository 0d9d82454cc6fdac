// crates/sp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure apportionment algorithms. Every function here is deterministic and
//! side-effect free; vectors are indexed by canonical committee position.

pub use sp_core::{
    entities::{Committee, District},
    ids::{CommitteeId, DistrictNumber},
    variables::AllocationMethod,
};

// ----------------------------- Projection (public surface) ---------------------------

pub mod baseline;
pub mod projection;
pub mod threshold;

pub use baseline::{build_baseline, HistoricalBaseline};
pub use projection::{LocalSupportProjector, ProjectionError, ResolvedOverride};
pub use threshold::{apply_threshold, clears_threshold};

// ----------------------------- Allocation (public surface) ---------------------------

pub mod allocation {
    // File modules (actual implementations)
    pub mod divisor;
    pub mod dhondt;
    pub mod sainte_lague;
    pub mod largest_remainder;

    pub use dhondt::allocate_dhondt;
    pub use divisor::{quotient_table, Quotient};
    pub use largest_remainder::allocate_hare_niemeyer;
    pub use sainte_lague::allocate_sainte_lague;

    use sp_core::variables::AllocationMethod;

    /// One apportionment capability: non-negative support plus a seat count in,
    /// an aligned seat vector out. Implementations return `seats` in total
    /// whenever the support has a positive sum, and all zeros otherwise.
    pub trait SeatAllocator {
        fn allocate(&self, seats: u32, support: &[f64]) -> Vec<u32>;
    }

    impl SeatAllocator for AllocationMethod {
        fn allocate(&self, seats: u32, support: &[f64]) -> Vec<u32> {
            match self {
                AllocationMethod::DHondt => allocate_dhondt(seats, support),
                AllocationMethod::SainteLague => allocate_sainte_lague(seats, support),
                AllocationMethod::HareNiemeyer => allocate_hare_niemeyer(seats, support),
            }
        }
    }

    /// Runtime-selected allocation.
    pub fn allocate(method: AllocationMethod, seats: u32, support: &[f64]) -> Vec<u32> {
        method.allocate(seats, support)
    }
}

pub use allocation::{allocate, SeatAllocator};

// ----------------------------- Coalitions ---------------------------------

pub mod coalition;

pub use coalition::{
    describe_all, search_coalitions, Coalition, CoalitionError, CoalitionMember, ResolvedRules,
    MAX_COALITION_COMMITTEES, NO_MAJORITY,
};
