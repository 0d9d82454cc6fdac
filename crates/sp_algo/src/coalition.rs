//! Coalition Search: enumerate committee subsets that reach a seat majority.
//!
//! Contract:
//! - Subsets are generated by size (1..=n), each size in lexicographic index order.
//! - A subset is dropped if it contains both members of a forbidden pair, any
//!   excluded committee, or a committee holding zero seats.
//! - Accepted subsets need `Σ seats ≥ majority`.
//! - Members are listed by seats descending, then national support descending.
//! - Results are stable-sorted by total seats, descending, and deduplicated by
//!   their description (first occurrence wins).
//!
//! Enumeration is exponential: at most [`MAX_COALITION_COMMITTEES`] committees
//! are accepted, larger inputs are rejected up front.

use std::collections::BTreeSet;
use std::fmt;

use sp_core::determinism::cmp_desc;
use sp_core::entities::{committee_index, Committee};
use sp_core::ids::CommitteeId;
use sp_core::variables::CoalitionRules;

/// Upper bound on the committee count (2^12 − 1 = 4095 subsets).
pub const MAX_COALITION_COMMITTEES: usize = 12;

/// Text reported when no subset reaches the majority.
pub const NO_MAJORITY: &str = "no coalition reaches a majority";

#[derive(Clone, Debug, PartialEq)]
pub enum CoalitionError {
    UnknownCommittee(CommitteeId),
    TooManyCommittees { count: usize, max: usize },
    LengthMismatch { committees: usize, seats: usize, support: usize },
}

impl fmt::Display for CoalitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoalitionError::UnknownCommittee(id) => write!(f, "coalition rule names unknown committee {id}"),
            CoalitionError::TooManyCommittees { count, max } => {
                write!(f, "coalition search supports at most {max} committees, got {count}")
            }
            CoalitionError::LengthMismatch { committees, seats, support } => write!(
                f,
                "misaligned inputs: {committees} committees, {seats} seat totals, {support} support values"
            ),
        }
    }
}

impl std::error::Error for CoalitionError {}

/// Exclusion rules with committee ids resolved to canonical indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedRules {
    pairs: Vec<(usize, usize)>,
    excluded: Vec<usize>,
}

impl ResolvedRules {
    pub fn resolve(rules: &CoalitionRules, committees: &[Committee]) -> Result<Self, CoalitionError> {
        let idx = |id: &CommitteeId| {
            committee_index(committees, id).ok_or_else(|| CoalitionError::UnknownCommittee(id.clone()))
        };
        let pairs = rules
            .forbidden_pairs
            .iter()
            .map(|(a, b)| Ok((idx(a)?, idx(b)?)))
            .collect::<Result<Vec<_>, CoalitionError>>()?;
        let excluded = rules.excluded.iter().map(idx).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs, excluded })
    }

    /// True if `subset` (sorted committee indices) trips no exclusion rule.
    pub fn admits(&self, subset: &[usize]) -> bool {
        let has = |i: usize| subset.binary_search(&i).is_ok();
        if self.excluded.iter().any(|&e| has(e)) {
            return false;
        }
        !self.pairs.iter().any(|&(a, b)| has(a) && has(b))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoalitionMember {
    pub committee: CommitteeId,
    pub label: String,
    pub seats: u32,
    pub support: f64,
}

/// A governing option whose members jointly hold at least the majority.
#[derive(Clone, Debug, PartialEq)]
pub struct Coalition {
    pub members: Vec<CoalitionMember>,
    pub total_seats: u32,
}

impl Coalition {
    pub fn is_single_party(&self) -> bool {
        self.members.len() == 1
    }

    /// `Single-party majority: PiS (235)` or `Coalition: KO(157)+TD(65)+NL(26) = 248`.
    pub fn describe(&self) -> String {
        match self.members.as_slice() {
            [only] => format!("Single-party majority: {} ({})", only.label, only.seats),
            members => {
                let parts: Vec<String> = members.iter().map(|m| format!("{}({})", m.label, m.seats)).collect();
                format!("Coalition: {} = {}", parts.join("+"), self.total_seats)
            }
        }
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Search all committee subsets for majority coalitions.
///
/// `seats` and `support` are national totals aligned with `committees`.
pub fn search_coalitions(
    seats: &[u32],
    support: &[f64],
    committees: &[Committee],
    rules: &CoalitionRules,
    majority: u32,
) -> Result<Vec<Coalition>, CoalitionError> {
    let n = committees.len();
    if seats.len() != n || support.len() != n {
        return Err(CoalitionError::LengthMismatch { committees: n, seats: seats.len(), support: support.len() });
    }
    if n > MAX_COALITION_COMMITTEES {
        return Err(CoalitionError::TooManyCommittees { count: n, max: MAX_COALITION_COMMITTEES });
    }
    let rules = ResolvedRules::resolve(rules, committees)?;

    let mut found: Vec<Coalition> = Vec::new();
    for size in 1..=n {
        for subset in Combinations::new(n, size) {
            if !rules.admits(&subset) || subset.iter().any(|&i| seats[i] == 0) {
                continue;
            }
            let total: u32 = subset.iter().map(|&i| seats[i]).sum();
            if total < majority {
                continue;
            }
            let mut members: Vec<CoalitionMember> = subset
                .iter()
                .map(|&i| CoalitionMember {
                    committee: committees[i].id.clone(),
                    label: committees[i].label().to_string(),
                    seats: seats[i],
                    support: support[i],
                })
                .collect();
            members.sort_by(|a, b| b.seats.cmp(&a.seats).then_with(|| cmp_desc(a.support, b.support)));
            found.push(Coalition { members, total_seats: total });
        }
    }

    found.sort_by(|a, b| b.total_seats.cmp(&a.total_seats));
    let mut seen = BTreeSet::new();
    found.retain(|c| seen.insert(c.describe()));
    Ok(found)
}

/// One line per coalition, or [`NO_MAJORITY`] when the list is empty.
pub fn describe_all(coalitions: &[Coalition]) -> String {
    if coalitions.is_empty() {
        return NO_MAJORITY.to_string();
    }
    coalitions.iter().map(Coalition::describe).collect::<Vec<_>>().join("\n")
}

/// Lexicographic r-combinations of `0..n`.
struct Combinations {
    n: usize,
    idx: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, r: usize) -> Self {
        Self { n, idx: (0..r).collect(), done: r == 0 || r > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let out = self.idx.clone();

        // Advance: find the rightmost index that can still move right.
        let r = self.idx.len();
        let mut i = r;
        while i > 0 {
            i -= 1;
            if self.idx[i] < self.n - r + i {
                self.idx[i] += 1;
                for j in i + 1..r {
                    self.idx[j] = self.idx[j - 1] + 1;
                }
                return Some(out);
            }
        }
        self.done = true;
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::presets::{sejm_2023_committees, sejm_2023_params};

    fn cid(s: &str) -> CommitteeId {
        s.parse().unwrap()
    }

    #[test]
    fn combinations_are_lexicographic() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(all, vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]);
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!((1..=5).map(|r| Combinations::new(5, r).count()).sum::<usize>(), 31);
    }

    #[test]
    fn sejm_scenario_lists_expected_coalitions() {
        let cs = sejm_2023_committees();
        let p = sejm_2023_params();
        //            td  nl  pis konf ko  rz  poz
        let seats = [65, 26, 194, 18, 157, 0, 0];
        let support = [14.4, 8.6, 35.4, 7.2, 30.7, 0.0, 3.7];
        let found = search_coalitions(&seats, &support, &cs, &p.coalition_rules, 231).unwrap();
        let lines: Vec<String> = found.iter().map(Coalition::describe).collect();
        assert_eq!(
            lines,
            vec![
                "Coalition: PiS(194)+TD(65)+KONF(18) = 277",
                "Coalition: PiS(194)+TD(65) = 259",
                "Coalition: KO(157)+TD(65)+NL(26) = 248",
                "Coalition: KO(157)+TD(65)+KONF(18) = 240",
            ]
        );
    }

    #[test]
    fn single_party_majority_is_labelled() {
        let cs = vec![
            Committee::new(cid("a"), "A", 5.0).unwrap().with_short_name("AA"),
            Committee::new(cid("b"), "B", 5.0).unwrap(),
        ];
        let found = search_coalitions(&[240, 220], &[52.0, 48.0], &cs, &CoalitionRules::default(), 231).unwrap();
        assert_eq!(found[0].describe(), "Coalition: AA(240)+b(220) = 460");
        assert_eq!(found[1].describe(), "Single-party majority: AA (240)");
        assert!(found[1].is_single_party());
    }

    #[test]
    fn equal_seats_order_members_by_support() {
        let cs = vec![
            Committee::new(cid("a"), "A", 5.0).unwrap(),
            Committee::new(cid("b"), "B", 5.0).unwrap(),
        ];
        let found = search_coalitions(&[100, 100], &[20.0, 25.0], &cs, &CoalitionRules::default(), 150).unwrap();
        assert_eq!(describe_all(&found), "Coalition: b(100)+a(100) = 200");
    }

    #[test]
    fn excluded_pairs_and_residual_never_appear() {
        let cs = sejm_2023_committees();
        let p = sejm_2023_params();
        let seats = [60, 60, 60, 60, 60, 60, 100];
        let support = [10.0; 7];
        let found = search_coalitions(&seats, &support, &cs, &p.coalition_rules, 120).unwrap();
        assert!(!found.is_empty());
        for c in &found {
            let ids: Vec<&str> = c.members.iter().map(|m| m.committee.as_str()).collect();
            assert!(!ids.contains(&"poz"));
            for (a, b) in &p.coalition_rules.forbidden_pairs {
                assert!(!(ids.contains(&a.as_str()) && ids.contains(&b.as_str())), "{ids:?}");
            }
        }
    }

    #[test]
    fn no_majority_reports_empty() {
        let cs = vec![Committee::new(cid("a"), "A", 5.0).unwrap()];
        let found = search_coalitions(&[100], &[40.0], &cs, &CoalitionRules::default(), 231).unwrap();
        assert!(found.is_empty());
        assert_eq!(describe_all(&found), NO_MAJORITY);
    }

    #[test]
    fn rejects_unknown_ids_and_oversized_inputs() {
        let cs = vec![Committee::new(cid("a"), "A", 5.0).unwrap()];
        let rules = CoalitionRules { forbidden_pairs: vec![(cid("a"), cid("zz"))], excluded: vec![] };
        assert_eq!(
            search_coalitions(&[1], &[1.0], &cs, &rules, 1),
            Err(CoalitionError::UnknownCommittee(cid("zz")))
        );

        let many: Vec<Committee> = (0..13)
            .map(|i| Committee::new(cid(&format!("c{i}")), "C", 0.0).unwrap())
            .collect();
        let err = search_coalitions(&[1; 13], &[1.0; 13], &many, &CoalitionRules::default(), 1).unwrap_err();
        assert_eq!(err, CoalitionError::TooManyCommittees { count: 13, max: 12 });

        assert!(matches!(
            search_coalitions(&[1, 2], &[1.0], &cs, &CoalitionRules::default(), 1),
            Err(CoalitionError::LengthMismatch { .. })
        ));
    }
}
