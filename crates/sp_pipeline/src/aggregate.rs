//! AGGREGATE stage: project → filter → allocate for every district, and sum
//! national seat totals.
//!
//! Each call builds fresh per-district results; nothing from a previous run is
//! reused, so repeated recomputation never accumulates stale seats.

use sp_algo::{
    apply_threshold, Committee, District, DistrictNumber, LocalSupportProjector, SeatAllocator,
};
use sp_core::{determinism::argmax_first, variables::AllocationMethod};

/// One district's outcome: projected (unfiltered) local support and seats won.
#[derive(Clone, Debug, PartialEq)]
pub struct DistrictResult {
    pub number: DistrictNumber,
    pub seats: u32,
    pub local_support: Vec<f64>,
    pub mandates: Vec<u32>,
}

impl DistrictResult {
    /// Committee index with the highest local support (lowest index on ties).
    pub fn leader(&self) -> Option<usize> {
        argmax_first(&self.local_support)
    }

    /// `(committee index, seats)` for every committee that won a seat,
    /// most seats first; equal counts keep committee order.
    pub fn breakdown(&self) -> Vec<(usize, u32)> {
        let mut rows: Vec<(usize, u32)> =
            self.mandates.iter().copied().enumerate().filter(|&(_, s)| s > 0).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    pub fn seats_awarded(&self) -> u32 {
        self.mandates.iter().sum()
    }
}

/// Range of one committee's local support across districts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupportExtent {
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionOutcome {
    pub method: AllocationMethod,
    /// National seats per committee, canonical order.
    pub national_seats: Vec<u32>,
    /// In district-list order.
    pub districts: Vec<DistrictResult>,
}

impl ProjectionOutcome {
    pub fn total_seats(&self) -> u32 {
        self.national_seats.iter().sum()
    }

    pub fn district(&self, number: DistrictNumber) -> Option<&DistrictResult> {
        self.districts.iter().find(|d| d.number == number)
    }

    pub fn support_extent(&self, committee: usize) -> Option<SupportExtent> {
        let mut values = self.districts.iter().filter_map(|d| d.local_support.get(committee).copied());
        let first = values.next()?;
        Some(values.fold(SupportExtent { min: first, max: first }, |acc, v| SupportExtent {
            min: acc.min.min(v),
            max: acc.max.max(v),
        }))
    }
}

/// Run the projector, the threshold filter and `method` over every district.
///
/// `support` is the national vector in canonical committee order.
pub fn compute_mandates(
    projector: &LocalSupportProjector,
    committees: &[Committee],
    districts: &[District],
    support: &[f64],
    method: AllocationMethod,
) -> ProjectionOutcome {
    let mut national_seats = vec![0u32; committees.len()];
    let mut results = Vec::with_capacity(districts.len());

    for d in districts {
        let local_support = projector.project(support, d);
        let filtered = apply_threshold(&local_support, support, committees);
        let mandates = method.allocate(d.seats, &filtered);

        for (total, &won) in national_seats.iter_mut().zip(&mandates) {
            *total += won;
        }

        let result = DistrictResult { number: d.number, seats: d.seats, local_support, mandates };
        if result.seats_awarded() != d.seats {
            tracing::warn!(district = %d.number, seats = d.seats, "no committee has filtered support; district left unallocated");
        }
        tracing::debug!(district = %d.number, mandates = ?result.mandates, "district allocated");
        results.push(result);
    }

    tracing::info!(
        method = %method,
        districts = results.len(),
        seats = national_seats.iter().sum::<u32>(),
        "mandates computed"
    );

    ProjectionOutcome { method, national_seats, districts: results }
}
