use std::collections::HashSet;

use crate::shared::excel_importer::flow::Ticket;
use crate::shared::excel_importer::FlowError;
use crate::shared::picker_aggregate::AggregatePickerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }
}

#[derive(Debug, Clone)]
struct Pane<T> {
    items: Vec<T>,
    selected: HashSet<String>,
    anchor: Option<String>,
    filter: String,
}

impl<T> Default for Pane<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: HashSet::new(),
            anchor: None,
            filter: String::new(),
        }
    }
}

impl<T: AggregatePickerResult> Pane<T> {
    fn is_visible(&self, item: &T) -> bool {
        let needle = self.filter.trim().to_lowercase();
        needle.is_empty()
            || item.display_name().to_lowercase().contains(&needle)
            || item.id().to_lowercase().contains(&needle)
    }

    fn visible_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| self.is_visible(item))
            .map(|item| item.id())
            .collect()
    }

    fn clear_selection(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    fn prune_selection(&mut self) {
        let visible: HashSet<String> = self.visible_ids().into_iter().collect();
        self.selected.retain(|id| visible.contains(id));
        if self.anchor.as_ref().is_some_and(|a| !visible.contains(a)) {
            self.anchor = None;
        }
    }

    /// Removes the items whose id is in `ids`, in display order.
    fn take(&mut self, ids: &HashSet<String>) -> Vec<T> {
        let (moved, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| ids.contains(&item.id()));
        self.items = kept;
        moved
    }
}

/// Two disjoint lists with per-side selection and filter.
///
/// Every item lives in exactly one side; moves only ever transfer items.
/// Reloads are ticketed: only the latest `begin_load` may fill the lists.
#[derive(Debug, Clone)]
pub struct DualListState<T> {
    source: Pane<T>,
    target: Pane<T>,
    ticket: Ticket,
    pending: bool,
}

impl<T> Default for DualListState<T> {
    fn default() -> Self {
        Self {
            source: Pane::default(),
            target: Pane::default(),
            ticket: 0,
            pending: false,
        }
    }
}

impl<T: AggregatePickerResult + Clone> DualListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn pane(&self, side: Side) -> &Pane<T> {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    fn pane_mut(&mut self, side: Side) -> &mut Pane<T> {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    /// Replace both lists. Source items already in the target are dropped,
    /// and duplicates inside a list are kept once.
    pub fn load(&mut self, source: Vec<T>, target: Vec<T>) {
        let mut seen = HashSet::new();
        let target: Vec<T> = target.into_iter().filter(|t| seen.insert(t.id())).collect();
        let source: Vec<T> = source.into_iter().filter(|s| seen.insert(s.id())).collect();
        self.source.items = source;
        self.target.items = target;
        self.source.clear_selection();
        self.target.clear_selection();
    }

    /// Starts a reload. Results of earlier loads are ignored from now on.
    pub fn begin_load(&mut self) -> Ticket {
        self.ticket += 1;
        self.pending = true;
        self.ticket
    }

    /// Applies a fetch result. Returns `false` for a stale ticket.
    pub fn finish_load(&mut self, ticket: Ticket, source: Vec<T>, target: Vec<T>) -> bool {
        if ticket != self.ticket || !self.pending {
            log::debug!("dual list: dropping stale load {}", ticket);
            return false;
        }
        self.pending = false;
        self.load(source, target);
        true
    }

    /// Ends a failed fetch, leaving the lists untouched. `false` when stale.
    pub fn fail_load(&mut self, ticket: Ticket) -> bool {
        if ticket != self.ticket || !self.pending {
            return false;
        }
        self.pending = false;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Empty both sides and their filters; any load in flight is dropped.
    pub fn clear(&mut self) {
        self.source = Pane::default();
        self.target = Pane::default();
        self.ticket += 1;
        self.pending = false;
    }

    pub fn items(&self, side: Side) -> &[T] {
        &self.pane(side).items
    }

    pub fn visible(&self, side: Side) -> Vec<&T> {
        let pane = self.pane(side);
        pane.items.iter().filter(|item| pane.is_visible(item)).collect()
    }

    pub fn len(&self, side: Side) -> usize {
        self.pane(side).items.len()
    }

    pub fn filter(&self, side: Side) -> &str {
        &self.pane(side).filter
    }

    /// Filtering hides items; hidden items drop out of the selection.
    pub fn set_filter(&mut self, side: Side, filter: impl Into<String>) {
        let pane = self.pane_mut(side);
        pane.filter = filter.into();
        pane.prune_selection();
    }

    pub fn selected_count(&self, side: Side) -> usize {
        self.pane(side).selected.len()
    }

    pub fn is_selected(&self, side: Side, id: &str) -> bool {
        self.pane(side).selected.contains(id)
    }

    /// Click on an item.
    ///
    /// Plain click selects only `id`, ctrl toggles it, shift selects the
    /// visible range between the anchor and `id`. Hidden ids are ignored.
    pub fn toggle_select(&mut self, side: Side, id: &str, ctrl: bool, shift: bool) {
        let pane = self.pane_mut(side);
        let visible = pane.visible_ids();
        let Some(clicked) = visible.iter().position(|v| v == id) else {
            return;
        };

        let anchor = pane
            .anchor
            .as_ref()
            .and_then(|a| visible.iter().position(|v| v == a));

        match (shift, anchor) {
            (true, Some(anchor)) => {
                let (from, to) = if anchor <= clicked {
                    (anchor, clicked)
                } else {
                    (clicked, anchor)
                };
                pane.selected = visible[from..=to].iter().cloned().collect();
            }
            _ if ctrl => {
                if !pane.selected.remove(id) {
                    pane.selected.insert(id.to_string());
                }
                pane.anchor = Some(id.to_string());
            }
            _ => {
                pane.selected = HashSet::from([id.to_string()]);
                pane.anchor = Some(id.to_string());
            }
        }
    }

    fn transfer(&mut self, from: Side, ids: &HashSet<String>) -> usize {
        let moved = self.pane_mut(from).take(ids);
        let count = moved.len();
        self.pane_mut(from).clear_selection();
        self.pane_mut(from.other()).items.extend(moved);
        count
    }

    pub fn move_selected_to_target(&mut self) -> usize {
        let ids = self.source.selected.clone();
        self.transfer(Side::Source, &ids)
    }

    pub fn move_selected_to_source(&mut self) -> usize {
        let ids = self.target.selected.clone();
        self.transfer(Side::Target, &ids)
    }

    /// Moves every visible item of the source.
    pub fn move_all_to_target(&mut self) -> usize {
        let ids = self.source.visible_ids().into_iter().collect();
        self.transfer(Side::Source, &ids)
    }

    pub fn move_all_to_source(&mut self) -> usize {
        let ids = self.target.visible_ids().into_iter().collect();
        self.transfer(Side::Target, &ids)
    }

    /// Double-click: send one item to the other side.
    pub fn move_item(&mut self, from: Side, id: &str) -> usize {
        if !self.pane(from).items.iter().any(|i| i.id() == id) {
            return 0;
        }
        let ids = HashSet::from([id.to_string()]);
        self.transfer(from, &ids)
    }

    /// Full target list for the batch request.
    pub fn submit(&self) -> Result<Vec<T>, FlowError> {
        if self.pending {
            return Err(FlowError::NotReady);
        }
        if self.target.items.is_empty() {
            return Err(FlowError::EmptyTarget);
        }
        Ok(self.target.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityRef;

    fn eleves(ids: std::ops::RangeInclusive<i64>) -> Vec<EntityRef> {
        ids.map(|i| EntityRef::new(i, Some(format!("M{:03}", i)), format!("Eleve {}", i)))
            .collect()
    }

    fn ids(list: &[EntityRef]) -> HashSet<i64> {
        list.iter().map(|e| e.id).collect()
    }

    #[test]
    fn ctrl_select_three_then_move() {
        let mut state = DualListState::new();
        state.load(eleves(1..=10), Vec::new());
        state.toggle_select(Side::Source, "2", true, false);
        state.toggle_select(Side::Source, "5", true, false);
        state.toggle_select(Side::Source, "9", true, false);
        assert_eq!(state.move_selected_to_target(), 3);
        assert_eq!(state.len(Side::Source), 7);
        assert_eq!(state.len(Side::Target), 3);
        assert_eq!(ids(state.items(Side::Target)), HashSet::from([2, 5, 9]));
        assert_eq!(state.selected_count(Side::Source), 0);
    }

    #[test]
    fn round_trip_restores_both_sets_without_duplicates() {
        let mut state = DualListState::new();
        state.load(eleves(1..=6), eleves(7..=8));
        let source_before = ids(state.items(Side::Source));
        let target_before = ids(state.items(Side::Target));

        state.toggle_select(Side::Source, "1", false, false);
        state.toggle_select(Side::Source, "4", false, true);
        state.move_selected_to_target();
        assert!(ids(state.items(Side::Source)).is_disjoint(&ids(state.items(Side::Target))));
        assert_eq!(state.len(Side::Source) + state.len(Side::Target), 8);

        for id in ["1", "2", "3", "4"] {
            state.toggle_select(Side::Target, id, true, false);
        }
        state.move_selected_to_source();
        assert_eq!(ids(state.items(Side::Source)), source_before);
        assert_eq!(ids(state.items(Side::Target)), target_before);
    }

    #[test]
    fn shift_range_follows_filtered_display_order() {
        let mut state = DualListState::new();
        let mut items = eleves(1..=7);
        items[1].libelle = "Autre".into();
        items[4].libelle = "Autre".into();
        state.load(items, Vec::new());
        state.set_filter(Side::Source, "eleve");
        let visible: Vec<i64> = state.visible(Side::Source).iter().map(|e| e.id).collect();
        assert_eq!(visible, vec![1, 3, 4, 6, 7]);

        state.toggle_select(Side::Source, "1", false, false);
        state.toggle_select(Side::Source, "6", false, true);
        let selected: HashSet<i64> = [1, 3, 4, 6].into_iter().collect();
        let got: HashSet<i64> = state
            .items(Side::Source)
            .iter()
            .filter(|e| state.is_selected(Side::Source, &e.id.to_string()))
            .map(|e| e.id)
            .collect();
        assert_eq!(got, selected);

        // Shift backwards from the same anchor.
        state.toggle_select(Side::Source, "3", false, true);
        assert_eq!(state.selected_count(Side::Source), 2);
    }

    #[test]
    fn plain_click_replaces_and_ctrl_toggles() {
        let mut state = DualListState::new();
        state.load(eleves(1..=3), Vec::new());
        state.toggle_select(Side::Source, "1", false, false);
        state.toggle_select(Side::Source, "2", true, false);
        assert_eq!(state.selected_count(Side::Source), 2);
        state.toggle_select(Side::Source, "2", true, false);
        assert!(!state.is_selected(Side::Source, "2"));
        state.toggle_select(Side::Source, "3", false, false);
        assert_eq!(state.selected_count(Side::Source), 1);
        assert!(state.is_selected(Side::Source, "3"));
    }

    #[test]
    fn filter_prunes_selection_and_limits_move_all() {
        let mut state = DualListState::new();
        state.load(eleves(1..=12), Vec::new());
        state.toggle_select(Side::Source, "2", false, false);
        state.toggle_select(Side::Source, "11", true, false);
        state.set_filter(Side::Source, "Eleve 1");
        // "Eleve 1", "Eleve 10", "Eleve 11", "Eleve 12"
        assert_eq!(state.visible(Side::Source).len(), 4);
        assert!(!state.is_selected(Side::Source, "2"));
        assert!(state.is_selected(Side::Source, "11"));

        state.toggle_select(Side::Source, "2", true, false);
        assert!(!state.is_selected(Side::Source, "2"));

        assert_eq!(state.move_all_to_target(), 4);
        assert_eq!(state.len(Side::Source), 8);
        state.set_filter(Side::Source, "");
        assert_eq!(state.visible(Side::Source).len(), 8);
    }

    #[test]
    fn load_drops_source_items_already_assigned() {
        let mut state = DualListState::new();
        state.load(eleves(1..=5), eleves(4..=6));
        assert_eq!(ids(state.items(Side::Source)), HashSet::from([1, 2, 3]));
        assert_eq!(state.len(Side::Target), 3);
    }

    #[test]
    fn double_click_moves_one_item() {
        let mut state = DualListState::new();
        state.load(eleves(1..=3), Vec::new());
        assert_eq!(state.move_item(Side::Source, "2"), 1);
        assert_eq!(ids(state.items(Side::Target)), HashSet::from([2]));
        assert_eq!(state.move_item(Side::Source, "2"), 0);
        state.move_item(Side::Target, "2");
        assert_eq!(state.len(Side::Target), 0);
        // appended at the end of the source
        assert_eq!(state.items(Side::Source).last().map(|e| e.id), Some(2));
    }

    #[test]
    fn submit_requires_a_target() {
        let mut state: DualListState<EntityRef> = DualListState::new();
        state.load(eleves(1..=2), Vec::new());
        assert_eq!(state.submit(), Err(FlowError::EmptyTarget));
        state.move_all_to_target();
        assert_eq!(state.submit().map(|t| t.len()), Ok(2));
    }

    #[test]
    fn late_load_for_a_previous_choice_is_dropped() {
        let mut state: DualListState<EntityRef> = DualListState::new();
        // Class A is picked, then class B before A's students arrive.
        let for_a = state.begin_load();
        let for_b = state.begin_load();
        assert!(state.finish_load(for_b, eleves(1..=2), eleves(20..=21)));
        assert!(!state.is_loading());

        assert!(!state.finish_load(for_a, eleves(1..=2), eleves(10..=12)));
        assert!(!state.fail_load(for_a));
        assert_eq!(ids(state.items(Side::Target)), HashSet::from([20, 21]));
        assert_eq!(state.submit().map(|t| ids(&t)), Ok(HashSet::from([20, 21])));
    }

    #[test]
    fn pending_load_blocks_submit_and_clear_drops_it() {
        let mut state: DualListState<EntityRef> = DualListState::new();
        state.load(eleves(1..=2), eleves(3..=4));
        let ticket = state.begin_load();
        assert!(state.is_loading());
        assert_eq!(state.submit(), Err(FlowError::NotReady));

        state.clear();
        assert!(!state.is_loading());
        assert!(!state.finish_load(ticket, eleves(1..=2), eleves(3..=4)));
        assert_eq!(state.len(Side::Target), 0);

        let ticket = state.begin_load();
        assert!(state.fail_load(ticket));
        assert!(!state.is_loading());
    }
}
