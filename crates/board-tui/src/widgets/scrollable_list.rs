//! Generic scrollable + filterable list widget.
//!
//! Items go in via `set_items` in the order the caller wants them shown;
//! the list never reorders.  An optional text filter narrows the view
//! without touching the underlying items.

pub struct ScrollableList<T> {
    items: Vec<T>,
    filtered_indices: Vec<usize>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub filter: String,
    filter_fn: Box<dyn Fn(&T, &str) -> bool + Send + Sync>,
}

impl<T> ScrollableList<T> {
    pub fn new(filter_fn: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            filter: String::new(),
            filter_fn: Box::new(filter_fn),
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild_filter();
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        let old_idx = self.filtered_indices.get(self.selected).copied();
        self.rebuild_filter();
        // Try to keep the same item selected after filter change
        if let Some(prev) = old_idx {
            if let Some(pos) = self.filtered_indices.iter().position(|&i| i == prev) {
                self.selected = pos;
            } else {
                self.selected = 0;
            }
        }
        self.scroll_offset = 0;
    }

    fn rebuild_filter(&mut self) {
        if self.filter.is_empty() {
            self.filtered_indices = (0..self.items.len()).collect();
        } else {
            self.filtered_indices = self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| (self.filter_fn)(item, &self.filter))
                .map(|(i, _)| i)
                .collect();
        }
        if self.selected >= self.filtered_indices.len() {
            self.selected = self.filtered_indices.len().saturating_sub(1);
        }
    }

    pub fn select_up(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.filtered_indices.len().saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered_indices.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        let idx = self.filtered_indices.get(self.selected)?;
        self.items.get(*idx)
    }

    /// Visible window of `height` rows after `ensure_visible`.
    pub fn visible_items(&self, height: usize) -> Vec<&T> {
        if height == 0 || self.filtered_indices.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.filtered_indices.len());
        self.filtered_indices[self.scroll_offset..end]
            .iter()
            .map(|&i| &self.items[i])
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.filtered_indices.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }

    pub fn selected_in_view(&self, height: usize) -> usize {
        self.selected
            .saturating_sub(self.scroll_offset)
            .min(height.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ScrollableList<String> {
        let mut l = ScrollableList::new(|item: &String, q: &str| item.contains(q));
        l.set_items(vec![
            "alpha".to_string(),
            "beta".to_string(),
            "gamma".to_string(),
            "delta".to_string(),
        ]);
        l
    }

    #[test]
    fn test_preserves_insertion_order() {
        let l = list();
        let visible: Vec<&String> = l.visible_items(10);
        assert_eq!(visible, vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_filter_narrows_and_clears() {
        let mut l = list();
        l.set_filter("ta");
        let visible: Vec<&String> = l.visible_items(10);
        assert_eq!(visible, vec!["beta", "delta"]);
        l.set_filter("");
        assert_eq!(l.len(), 4);
    }

    #[test]
    fn test_selection_clamps_at_edges() {
        let mut l = list();
        l.select_up(5);
        assert_eq!(l.selected_item().map(String::as_str), Some("alpha"));
        l.select_down(100);
        assert_eq!(l.selected_item().map(String::as_str), Some("delta"));
    }

    #[test]
    fn test_scroll_window_follows_selection() {
        let mut l = list();
        l.select_last();
        l.ensure_visible(2);
        let visible: Vec<&String> = l.visible_items(2);
        assert_eq!(visible, vec!["gamma", "delta"]);
        assert_eq!(l.selected_in_view(2), 1);
    }
}
