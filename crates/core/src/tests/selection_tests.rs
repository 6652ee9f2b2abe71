// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Selection;
use crate::tests::helpers::{TestRoster, ids, pid, squad_of};
use war_roster_domain::{Container, Snapshot};

#[test]
fn test_exclusive_toggle_replaces_selection() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), true);
    selection.toggle(&pid("B"), true);

    selection.toggle(&pid("C"), false);

    assert_eq!(selection.ids(), ids(&["C"]).as_slice());
}

#[test]
fn test_exclusive_toggle_on_sole_selected_clears() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), false);

    selection.toggle(&pid("A"), false);

    assert!(selection.is_empty());
}

#[test]
fn test_exclusive_toggle_on_one_of_many_collapses_to_it() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), true);
    selection.toggle(&pid("B"), true);

    selection.toggle(&pid("A"), false);

    assert_eq!(selection.ids(), ids(&["A"]).as_slice());
}

#[test]
fn test_additive_toggle_adds_and_removes() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), true);
    selection.toggle(&pid("B"), true);
    selection.toggle(&pid("C"), true);

    selection.toggle(&pid("B"), true);

    assert_eq!(selection.ids(), ids(&["A", "C"]).as_slice());
    assert_eq!(selection.len(), 2);
}

#[test]
fn test_drag_on_unselected_collapses_selection() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), true);
    selection.toggle(&pid("B"), true);

    let dragged = selection.begin_drag(&pid("C"));

    assert_eq!(dragged, ids(&["C"]));
    assert_eq!(selection.ids(), ids(&["C"]).as_slice());
}

#[test]
fn test_drag_on_selected_keeps_selection() {
    let mut selection: Selection = Selection::new();
    selection.toggle(&pid("A"), true);
    selection.toggle(&pid("B"), true);

    let dragged = selection.begin_drag(&pid("B"));

    assert_eq!(dragged, ids(&["A", "B"]));
}

#[test]
fn test_select_all_and_retain_present() {
    let snapshot: Snapshot = TestRoster::new()
        .squad("alpha", &["A", "B"])
        .pool(&["C"])
        .build();
    let mut selection: Selection = Selection::new();

    selection.select_all(&snapshot, &squad_of("alpha"));
    assert_eq!(selection.ids(), ids(&["A", "B"]).as_slice());

    selection.select_all(&snapshot, &Container::Pool);
    assert_eq!(selection.ids(), ids(&["C"]).as_slice());

    selection.toggle(&pid("Z"), true);
    selection.retain_present(&snapshot);
    assert_eq!(selection.ids(), ids(&["C"]).as_slice());
}
