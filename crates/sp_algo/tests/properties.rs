//! Property checks over the algorithm layer.

use proptest::prelude::*;

use sp_algo::allocation::{allocate_dhondt, allocate_hare_niemeyer, allocate_sainte_lague};
use sp_algo::{apply_threshold, search_coalitions, AllocationMethod, Committee, CommitteeId, District, DistrictNumber};
use sp_algo::{LocalSupportProjector, SeatAllocator};
use sp_core::variables::CoalitionRules;

fn support_vec() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=100.0, 1..8)
}

fn committees(n: usize) -> Vec<Committee> {
    (0..n)
        .map(|i| {
            let id: CommitteeId = format!("c{i}").parse().unwrap();
            Committee::new(id, format!("C{i}"), 5.0).unwrap()
        })
        .collect()
}

proptest! {
    #[test]
    fn every_method_hands_out_all_seats(support in support_vec(), seats in 1u32..60) {
        let positive = support.iter().any(|&s| s > 0.0);
        for method in AllocationMethod::ALL {
            let out = method.allocate(seats, &support);
            prop_assert_eq!(out.len(), support.len());
            let total: u32 = out.iter().sum();
            if positive {
                prop_assert_eq!(total, seats, "{}", method);
            } else {
                prop_assert_eq!(total, 0);
            }
            for (i, &s) in support.iter().enumerate() {
                if s == 0.0 {
                    prop_assert_eq!(out[i], 0);
                }
            }
        }
    }

    #[test]
    fn divisor_methods_never_lose_seats_when_the_house_grows(support in support_vec(), seats in 1u32..40) {
        let small_d = allocate_dhondt(seats, &support);
        let big_d = allocate_dhondt(seats + 1, &support);
        let small_s = allocate_sainte_lague(seats, &support);
        let big_s = allocate_sainte_lague(seats + 1, &support);
        for i in 0..support.len() {
            prop_assert!(big_d[i] >= small_d[i]);
            prop_assert!(big_s[i] >= small_s[i]);
        }
    }

    #[test]
    fn raising_support_never_costs_divisor_seats(
        support in prop::collection::vec(0.0f64..=60.0, 4),
        hist in prop::collection::vec(prop::collection::vec(0.0f64..=100.0, 4), 2..4),
        seats in 1u32..20,
        who in 0usize..4,
        raise in 0.0f64..=40.0,
    ) {
        let cs = committees(4);
        prop_assume!(support[who] >= cs[who].threshold);
        let districts: Vec<District> = hist
            .iter()
            .enumerate()
            .map(|(n, h)| {
                let map = cs.iter().zip(h).map(|(c, v)| (c.id.clone(), *v)).collect();
                District::new(DistrictNumber(n as u32 + 1), seats + n as u32, map).unwrap()
            })
            .collect();
        let p = LocalSupportProjector::new(&cs, &districts, &[]).unwrap();

        let mut raised = support.clone();
        raised[who] = (raised[who] + raise).min(100.0);

        for d in &districts {
            let before = apply_threshold(&p.project(&support, d), &support, &cs);
            let after = apply_threshold(&p.project(&raised, d), &raised, &cs);
            for method in [AllocationMethod::DHondt, AllocationMethod::SainteLague] {
                let b = method.allocate(d.seats, &before);
                let a = method.allocate(d.seats, &after);
                prop_assert!(a[who] >= b[who], "{} district {}: {:?} -> {:?}", method, d.number, b, a);
            }
        }
    }

    #[test]
    fn hare_niemeyer_stays_within_one_of_the_quota(support in support_vec(), seats in 1u32..60) {
        let total: f64 = support.iter().sum();
        prop_assume!(total > 0.0);
        let out = allocate_hare_niemeyer(seats, &support);
        for (i, &s) in support.iter().enumerate() {
            let exact = s / total * seats as f64;
            prop_assert!((out[i] as f64 - exact).abs() < 1.0 + 1e-9);
        }
    }

    #[test]
    fn projection_stays_within_one_hundred(
        support in prop::collection::vec(0.0f64..=100.0, 3),
        hist in prop::collection::vec(prop::collection::vec(0.0f64..=100.0, 3), 1..5),
    ) {
        let cs = committees(3);
        let districts: Vec<District> = hist
            .iter()
            .enumerate()
            .map(|(n, h)| {
                let map = cs.iter().zip(h).map(|(c, v)| (c.id.clone(), *v)).collect();
                District::new(DistrictNumber(n as u32 + 1), 5 + n as u32, map).unwrap()
            })
            .collect();
        let p = LocalSupportProjector::new(&cs, &districts, &[]).unwrap();
        for d in &districts {
            let local = p.project(&support, d);
            prop_assert!(local.iter().all(|&v| (0.0..=100.0).contains(&v)));
            prop_assert!(local.iter().sum::<f64>() <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn threshold_filter_is_idempotent(
        local in prop::collection::vec(0.0f64..=100.0, 4),
        national in prop::collection::vec(0.0f64..=100.0, 4),
    ) {
        let cs = committees(4);
        let once = apply_threshold(&local, &national, &cs);
        prop_assert_eq!(apply_threshold(&once, &national, &cs), once.clone());
        for i in 0..4 {
            prop_assert!(once[i] == local[i] || once[i] == 0.0);
        }
    }

    #[test]
    fn coalitions_respect_exclusions(seats in prop::collection::vec(0u32..120, 5), majority in 1u32..300) {
        let cs = committees(5);
        let rules = CoalitionRules {
            forbidden_pairs: vec![(cs[0].id.clone(), cs[1].id.clone())],
            excluded: vec![cs[4].id.clone()],
        };
        let support = vec![10.0; 5];
        let found = search_coalitions(&seats, &support, &cs, &rules, majority).unwrap();
        for pair in found.windows(2) {
            prop_assert!(pair[0].total_seats >= pair[1].total_seats);
        }
        for c in &found {
            prop_assert!(c.total_seats >= majority);
            let ids: Vec<&str> = c.members.iter().map(|m| m.committee.as_str()).collect();
            prop_assert!(!ids.contains(&"c4"));
            prop_assert!(!(ids.contains(&"c0") && ids.contains(&"c1")));
            prop_assert!(c.members.iter().all(|m| m.seats > 0));
        }
    }
}
