use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// A stored query/response pair, replayable without a new backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub query: String,
    pub response: String,
}

/// Append-only list of completed exchanges, rendered as the sidebar panel.
/// Entries accumulate for the lifetime of the session; nothing is ever
/// removed or edited.
#[derive(Debug, Default)]
pub struct QueryHistory {
    entries: Vec<HistoryEntry>,
    state: ListState,
    last_area: Option<Rect>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, query: String, response: String) {
        self.entries.push(HistoryEntry { query, response });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.state.select(Some(index));
        }
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(next));
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let prev = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(prev));
    }

    /// Maps a terminal click position to the entry rendered on that row.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.last_area?;
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.state.offset() + (row - inner.y) as usize;
        if index < self.entries.len() {
            Some(index)
        } else {
            None
        }
    }

    pub fn render(&mut self, f: &mut Frame<'_>, area: Rect, focused: bool) {
        self.last_area = Some(area);

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.query.clone()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("History")
                    .border_style(border_style),
            )
            .style(Style::default().fg(Color::White))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        f.render_stateful_widget(list, area, &mut self.state);
    }

    #[cfg(test)]
    pub(crate) fn set_area(&mut self, area: Rect) {
        self.last_area = Some(area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> QueryHistory {
        let mut history = QueryHistory::new();
        for i in 0..n {
            history.push(format!("query {}", i), format!("response {}", i));
        }
        history
    }

    #[test]
    fn test_push_appends_in_order() {
        let history = filled(3);
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0).unwrap().query, "query 0");
        assert_eq!(history.get(2).unwrap().response, "response 2");

        let queries: Vec<&str> = history.entries().iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["query 0", "query 1", "query 2"]);
    }

    #[test]
    fn test_entries_are_never_dropped() {
        let history = filled(500);
        assert_eq!(history.len(), 500);
    }

    #[test]
    fn test_select_next_starts_at_first_entry() {
        let mut history = filled(2);
        assert_eq!(history.selected_index(), None);
        history.select_next();
        assert_eq!(history.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut history = filled(2);
        history.select_next();
        history.select_next();
        history.select_next();
        assert_eq!(history.selected_index(), Some(1));

        history.select_prev();
        history.select_prev();
        history.select_prev();
        assert_eq!(history.selected_index(), Some(0));
    }

    #[test]
    fn test_selection_on_empty_history_is_a_no_op() {
        let mut history = QueryHistory::new();
        history.select_next();
        history.select_prev();
        assert_eq!(history.selected_index(), None);
    }

    #[test]
    fn test_select_ignores_out_of_range_index() {
        let mut history = filled(2);
        history.select(5);
        assert_eq!(history.selected_index(), None);
    }

    #[test]
    fn test_hit_test_maps_rows_to_entries() {
        let mut history = filled(3);
        history.set_area(Rect::new(40, 0, 20, 10));

        // First row inside the borders is the first entry
        assert_eq!(history.hit_test(45, 1), Some(0));
        assert_eq!(history.hit_test(45, 3), Some(2));
        // Row past the last entry
        assert_eq!(history.hit_test(45, 5), None);
        // Outside the panel entirely
        assert_eq!(history.hit_test(10, 1), None);
    }

    #[test]
    fn test_hit_test_without_rendered_area_is_none() {
        let history = filled(1);
        assert_eq!(history.hit_test(1, 1), None);
    }
}
