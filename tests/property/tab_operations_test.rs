//! Property-based tests for Tab Manager operations.
//!
//! For any interleaving of tab creations, activations, closes, navigations
//! and surface event delivery, the manager keeps its structural guarantees:
//! one visible surface, a valid active tab, and a list that is never empty
//! once the first tab exists.

use proptest::prelude::*;
use simzilla::managers::tab_manager::{TabManager, TabManagerTrait};
use simzilla::services::address::AddressResolver;
use simzilla::surface::headless::{HeadlessFactory, HeadlessWorld};
use simzilla::types::event::{LoadFailure, SurfaceEvent, ERR_ABORTED};

/// Operations that can be performed on the TabManager.
#[derive(Debug, Clone)]
enum TabOp {
    Create,
    Activate(usize),
    Close(usize),
    Navigate(String),
    Back,
    Deliver,
    Cancelled(usize),
}

fn arb_tab_ops() -> impl Strategy<Value = Vec<TabOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(TabOp::Create),
            2 => (0..20usize).prop_map(TabOp::Activate),
            3 => (0..20usize).prop_map(TabOp::Close),
            2 => "[a-z]{1,8}(\\.test)?".prop_map(TabOp::Navigate),
            1 => Just(TabOp::Back),
            2 => Just(TabOp::Deliver),
            1 => (0..20usize).prop_map(TabOp::Cancelled),
        ],
        1..60,
    )
}

fn tab_ids(mgr: &TabManager<HeadlessFactory>) -> Vec<String> {
    mgr.get_all_tabs().iter().map(|t| t.id.clone()).collect()
}

fn check_invariants(mgr: &TabManager<HeadlessFactory>) -> Result<(), TestCaseError> {
    let ids = tab_ids(mgr);
    prop_assert!(!ids.is_empty(), "tab list must never be empty");

    let active = mgr.active_tab_id().map(str::to_string);
    prop_assert!(active.is_some(), "a tab must be active");
    let active = active.unwrap();
    prop_assert!(ids.contains(&active), "active tab must be in the list");

    let visible: Vec<&String> = ids
        .iter()
        .filter(|id| mgr.surface(id).map_or(false, |s| s.is_visible()))
        .collect();
    prop_assert_eq!(visible, vec![&active], "exactly the active tab is visible");

    prop_assert_eq!(&mgr.controls().address, &mgr.get_active_tab().unwrap().url);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn tab_structure_invariants_hold(ops in arb_tab_ops()) {
        let world = HeadlessWorld::new();
        let mut mgr = TabManager::new(world.factory(), AddressResolver::default());
        mgr.create_tab("").unwrap();

        for op in &ops {
            match op {
                TabOp::Create => {
                    mgr.create_tab("").unwrap();
                }
                TabOp::Activate(idx) => {
                    let ids = tab_ids(&mgr);
                    let id = &ids[idx % ids.len()];
                    mgr.activate_tab(id);
                }
                TabOp::Close(idx) => {
                    let ids = tab_ids(&mgr);
                    let id = &ids[idx % ids.len()];
                    mgr.close_tab(id).unwrap();
                }
                TabOp::Navigate(input) => mgr.navigate(input),
                TabOp::Back => mgr.go_back(),
                TabOp::Deliver => {
                    world.deliver(&mut mgr);
                }
                TabOp::Cancelled(idx) => {
                    let ids = tab_ids(&mgr);
                    world.emit(
                        &ids[idx % ids.len()],
                        SurfaceEvent::LoadFailed(LoadFailure::new(ERR_ABORTED, "ERR_ABORTED", "")),
                    );
                }
            }
            check_invariants(&mgr)?;
        }

        world.deliver(&mut mgr);
        check_invariants(&mgr)?;
        prop_assert_eq!(world.live_surfaces().len(), mgr.tab_count());
    }

    // Closing the active tab among N > 1 hands over to the same position,
    // or to the new last tab.
    #[test]
    fn close_active_picks_same_or_previous_position(count in 2usize..8, pick in 0usize..8) {
        let world = HeadlessWorld::new();
        let mut mgr = TabManager::new(world.factory(), AddressResolver::default());
        for _ in 0..count {
            mgr.create_tab("").unwrap();
        }
        let ids = tab_ids(&mgr);
        let index = pick % count;
        mgr.activate_tab(&ids[index]);

        mgr.close_tab(&ids[index]).unwrap();

        let remaining = tab_ids(&mgr);
        prop_assert_eq!(remaining.len(), count - 1);
        let expected = &remaining[index.min(count - 2)];
        prop_assert_eq!(mgr.active_tab_id(), Some(expected.as_str()));
    }

    // A cancelled load never changes anything the user sees.
    #[test]
    fn cancelled_loads_never_change_title(input in "[a-z]{1,8}\\.test", title in "[A-Za-z ]{0,20}") {
        let world = HeadlessWorld::new();
        let mut mgr = TabManager::new(world.factory(), AddressResolver::default());
        let id = mgr.create_tab(&input).unwrap();
        world.deliver(&mut mgr);
        mgr.on_surface_event(&id, SurfaceEvent::TitleUpdated { title });
        let before = mgr.get_tab(&id).unwrap().clone();

        mgr.on_surface_event(
            &id,
            SurfaceEvent::LoadFailed(LoadFailure::new(ERR_ABORTED, "ERR_ABORTED", "")),
        );

        prop_assert_eq!(mgr.get_tab(&id).unwrap(), &before);
    }
}
