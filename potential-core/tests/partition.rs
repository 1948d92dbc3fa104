//! Classification invariants over randomly placed clamp regions.

use potential_core::{CellClass, ClampRegion, classify, first_match, initialise};
use proptest::prelude::*;

fn arb_layout() -> impl Strategy<Value = (usize, Vec<ClampRegion>)> {
    (3usize..40).prop_flat_map(|h| {
        let hf = h as f32;
        let region = (0.0..hf, 0.0..hf, -100.0f32..100.0, 0.0..hf / 3.0)
            .prop_map(|(cx, cy, v, r)| ClampRegion::new(cx, cy, v, r));
        (Just(h), prop::collection::vec(region, 0..4))
    })
}

proptest! {
    #[test]
    fn every_interior_cell_lands_in_exactly_one_class((h, regions) in arb_layout()) {
        let (grid, free) = initialise(h, &regions);

        let mut clamped = 0usize;
        let mut free_count = 0usize;
        for y in 1..h - 1 {
            for x in 1..h - 1 {
                match classify(h, &regions, x, y) {
                    CellClass::Clamped(idx) => {
                        clamped += 1;
                        prop_assert_eq!(grid.get(x, y), regions[idx].value());
                        let (first, _) = first_match(&regions, x, y).unwrap();
                        prop_assert_eq!(first, idx);
                    }
                    CellClass::Free => free_count += 1,
                    CellClass::Border => prop_assert!(false, "interior cell ({}, {}) classed as border", x, y),
                }
            }
        }

        prop_assert_eq!(clamped + free_count, (h - 2) * (h - 2));
        prop_assert_eq!(free.len(), free_count);
        prop_assert_eq!(free.even.len() + free.odd.len(), free.len());
    }

    #[test]
    fn parity_sets_are_disjoint_and_cover_free((h, regions) in arb_layout()) {
        let (_, free) = initialise(h, &regions);
        let mut merged: Vec<_> = free.even.iter().chain(&free.odd).copied().collect();
        merged.sort_by_key(|c| (c.y, c.x));
        prop_assert_eq!(merged, free.all.clone());
        prop_assert!(free.even.iter().all(|c| (c.x + c.y) % 2 == 0));
        prop_assert!(free.odd.iter().all(|c| (c.x + c.y) % 2 == 1));
    }

    #[test]
    fn border_is_never_stamped((h, regions) in arb_layout()) {
        let (grid, _) = initialise(h, &regions);
        for i in 0..h {
            prop_assert_eq!(grid.get(i, 0), 0.0);
            prop_assert_eq!(grid.get(i, h - 1), 0.0);
            prop_assert_eq!(grid.get(0, i), 0.0);
            prop_assert_eq!(grid.get(h - 1, i), 0.0);
        }
    }
}
