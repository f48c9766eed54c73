//! Property-based tests for inventory interactions
//!
//! Validates inventory invariants:
//! - Interactions move quantity but never create or destroy it
//! - Empty slots always carry a zero amount and vice versa
//! - Splitting halves a stack exactly
//! - Rejected interactions leave every slot untouched
//! - Swapping twice restores both slots

use proptest::prelude::*;
use stashgrid_core::{Cell, InteractError, Interaction, Inventory, InventoryConfig, Transition};

const CELLS: usize = 9;

fn small_config(max_stack: Option<u32>) -> InventoryConfig {
    InventoryConfig {
        cell_count: CELLS,
        max_stack,
    }
}

fn interaction() -> impl Strategy<Value = Interaction> {
    prop_oneof![Just(Interaction::Primary), Just(Interaction::Secondary)]
}

fn seeds() -> impl Strategy<Value = Vec<(usize, u32, u32)>> {
    prop::collection::vec((0..CELLS, 1u32..5, 1u32..40), 0..CELLS)
}

fn seeded_inventory(config: InventoryConfig, seeds: &[(usize, u32, u32)]) -> Inventory {
    let mut inv = Inventory::with_config(config).expect("valid config");
    for &(index, item, amount) in seeds {
        // Seeding an occupied cell may swap a stack into the hand; that stack is discarded.
        let _ = inv.seed(index, item, amount);
        inv.set_hand(Cell::EMPTY);
    }
    inv
}

fn assert_normalized(inv: &Inventory) -> Result<(), TestCaseError> {
    for (index, cell) in inv.cells().iter().enumerate() {
        prop_assert_eq!(
            cell.is_empty(),
            cell.amount == 0,
            "cell {} is inconsistent: {:?}",
            index,
            cell
        );
    }
    let hand = inv.hand();
    prop_assert_eq!(hand.is_empty(), hand.amount == 0, "hand is inconsistent: {:?}", hand);
    Ok(())
}

proptest! {
    /// Property: Any interaction sequence conserves the total amount
    ///
    /// Merges, deposits, splits and swaps only move quantity between
    /// the hand and the cells.
    #[test]
    fn interactions_conserve_total(
        seeds in seeds(),
        ops in prop::collection::vec((interaction(), 0..CELLS), 1..64),
        max_stack in prop_oneof![Just(None), (1u32..32).prop_map(Some)],
    ) {
        let mut inv = seeded_inventory(small_config(max_stack), &seeds);
        let total = inv.total_amount();

        for (interaction, index) in ops {
            let _ = inv.interact(interaction, index);
            prop_assert_eq!(inv.total_amount(), total);
            assert_normalized(&inv)?;
        }
    }

    /// Property: Split gives the hand the floor half
    #[test]
    fn split_is_exact(item in 1u32..100, amount in 2u32..10_000) {
        let mut inv = Inventory::with_config(small_config(None)).expect("valid config");
        inv.seed(0, item, amount).expect("seed empty cell");

        let transition = inv.secondary_interact(0).expect("split accepted");
        prop_assert_eq!(transition, Transition::Split { taken: amount / 2 });

        let hand = *inv.hand();
        let cell = *inv.cell(0).expect("cell exists");
        prop_assert_eq!(hand, Cell::new(item, amount / 2));
        prop_assert_eq!(cell, Cell::new(item, amount - amount / 2));
        prop_assert_eq!(hand.amount + cell.amount, amount);
    }

    /// Property: Out-of-range indices are rejected without mutation
    #[test]
    fn invalid_index_is_idempotent(
        seeds in seeds(),
        interaction in interaction(),
        offset in 0usize..1000,
        hand in (0u32..5, 0u32..20),
    ) {
        let mut inv = seeded_inventory(small_config(None), &seeds);
        inv.set_hand(Cell::new(hand.0, hand.1));
        let before = inv.clone();

        let index = CELLS + offset;
        prop_assert_eq!(
            inv.interact(interaction, index),
            Err(InteractError::OutOfRange { index, len: CELLS })
        );
        prop_assert_eq!(inv, before);
    }

    /// Property: Swapping different stacks twice restores both
    #[test]
    fn swap_is_an_involution(
        interaction in interaction(),
        cell_item in 1u32..50,
        hand_item in 50u32..100,
        cell_amount in 1u32..64,
        hand_amount in 1u32..64,
    ) {
        let mut inv = Inventory::with_config(small_config(None)).expect("valid config");
        inv.seed(4, cell_item, cell_amount).expect("seed empty cell");
        inv.set_hand(Cell::new(hand_item, hand_amount));
        let before = inv.clone();

        prop_assert_eq!(inv.interact(interaction, 4), Ok(Transition::Swapped));
        prop_assert_eq!(inv.interact(interaction, 4), Ok(Transition::Swapped));
        prop_assert_eq!(inv, before);
    }

    /// Property: A capped inventory never grows a stack past the cap by merging
    #[test]
    fn capped_merges_never_exceed_cap(
        cap in 1u32..32,
        start in 1u32..32,
        held in 1u32..64,
        interaction in interaction(),
    ) {
        let start = start.min(cap);
        let mut inv = Inventory::with_config(small_config(Some(cap))).expect("valid config");
        inv.seed(0, 7, start).expect("seed empty cell");
        inv.set_hand(Cell::new(7, held));

        match inv.interact(interaction, 0) {
            Ok(_) => prop_assert!(inv.cell(0).expect("cell exists").amount <= cap),
            Err(err) => {
                prop_assert_eq!(err, InteractError::StackFull { index: 0 });
                prop_assert_eq!(start, cap);
            }
        }
    }
}
