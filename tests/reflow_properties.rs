//! Property tests for single-layer reflow.
//!
//! Layers are generated from a small pool of product codes so that repeats,
//! ties and full layers all occur often.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use shelf_reflow::{prelude::*, space::compute};

const LAYER: LayerKey = LayerKey {
    module_id: 1,
    layer_id: 1,
};
const CODES: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Debug, Clone)]
struct LayerCase {
    items: Vec<Item>,
    sales: SalesTable,
}

fn layer_strategy() -> impl Strategy<Value = LayerCase> {
    let widths = prop::collection::vec(10u32..=400, CODES.len());
    let sales = prop::collection::vec(0u32..=100, CODES.len());
    let picks = prop::collection::vec(0..CODES.len(), 1..8);

    (widths, sales, picks).prop_map(|(widths, sales, picks)| {
        let mut position = 0.0;
        let mut items = Vec::new();

        for pick in picks {
            let (Some(code), Some(width)) = (CODES.get(pick), widths.get(pick)) else {
                continue;
            };
            let width = f64::from(*width);

            items.push(Item::new(LAYER, *code, width, position));
            position += width;
        }

        let sales = CODES
            .iter()
            .zip(sales)
            .map(|(code, sales)| (*code, f64::from(sales)))
            .collect();

        LayerCase { items, sales }
    })
}

fn reflow(case: &LayerCase) -> (LayerSpace, Option<LayerReflow>) {
    let settings = ReflowSettings::default();
    let space = compute(LAYER, &case.items, settings.layer_width);
    let candidates = rank(&case.items, &case.sales);

    let reflowed = match reflow_layer(&space, &candidates, &case.items, &settings) {
        LayerOutcome::Reflowed(reflow) => Some(reflow),
        LayerOutcome::Skipped { .. } => None,
    };

    (space, reflowed)
}

fn counts(items: &[Item]) -> FxHashMap<&str, usize> {
    let mut counts = FxHashMap::default();

    for item in items {
        *counts.entry(item.item_code.as_str()).or_default() += 1;
    }

    counts
}

proptest! {
    #[test]
    fn units_never_exceed_cap(case in layer_strategy()) {
        let (_, reflowed) = reflow(&case);
        let reflowed = reflowed.ok_or_else(|| TestCaseError::fail("layer skipped"))?;
        let before = counts(&case.items);

        for (code, after) in counts(&reflowed.items) {
            let original = before.get(code).copied().unwrap_or(0);

            prop_assert!(after <= original.max(2), "{code}: {original} -> {after}");
        }
    }

    #[test]
    fn layer_width_is_conserved(case in layer_strategy()) {
        let (_, reflowed) = reflow(&case);
        let reflowed = reflowed.ok_or_else(|| TestCaseError::fail("layer skipped"))?;
        let n = reflowed.items.len();

        if n > 1 {
            let widths: f64 = reflowed.items.iter().map(|item| item.item_width).sum();
            let gaps = f64::from(u32::try_from(n - 1).unwrap_or(u32::MAX));

            prop_assert!((widths + reflowed.spacing * gaps - 1000.0).abs() < 1e-6);

            let end = reflowed
                .items
                .last()
                .map_or(0.0, |item| item.position + item.item_width);

            prop_assert!((end - 1000.0).abs() < 1e-6, "last item ends at {end}");
        }
    }

    #[test]
    fn copies_sit_next_to_their_original(case in layer_strategy()) {
        let (_, reflowed) = reflow(&case);
        let reflowed = reflowed.ok_or_else(|| TestCaseError::fail("layer skipped"))?;

        for (code, copies) in reflowed.plan.iter() {
            let first = reflowed
                .items
                .iter()
                .position(|item| item.item_code == code)
                .ok_or_else(|| TestCaseError::fail("copied item missing"))?;

            let run = reflowed
                .items
                .iter()
                .skip(first)
                .take_while(|item| item.item_code == code)
                .count();

            prop_assert!(run > copies, "{code}: run of {run} for {copies} copies");
        }
    }

    #[test]
    fn copies_fit_in_free_space(case in layer_strategy()) {
        let (space, reflowed) = reflow(&case);
        let reflowed = reflowed.ok_or_else(|| TestCaseError::fail("layer skipped"))?;

        let added: f64 = reflowed.items.iter().map(|item| item.item_width).sum::<f64>()
            - space.used_width;

        prop_assert!(added <= space.remaining_width.max(0.0) + 1e-9);
    }

    #[test]
    fn reflow_is_deterministic(case in layer_strategy()) {
        prop_assert_eq!(reflow(&case).1, reflow(&case).1);
    }

    #[test]
    fn full_layer_keeps_its_items(case in layer_strategy()) {
        let (space, reflowed) = reflow(&case);
        let reflowed = reflowed.ok_or_else(|| TestCaseError::fail("layer skipped"))?;

        if space.remaining_width <= 0.0 {
            prop_assert!(reflowed.plan.is_empty());
            prop_assert_eq!(counts(&reflowed.items), counts(&case.items));
        }
    }
}
