//! ListingTabs component — the tabbed lifecycle view of the board.
//!
//! Owns the `TabController` and re-runs classification on every sync; the
//! rendered subset is never cached across evaluations.

use board_core::lifecycle::{Bucket, BUCKETS};
use board_core::listing::Listing;
use chrono::{DateTime, Utc};
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::tabs::{TabContent, TabController, TabQuery};
use crate::theme::{
    style_active_tab, style_secondary, C_BADGE_ERR, C_DONE, C_MUTED, C_OPEN, C_PRIMARY, C_REVIEW,
    C_REWARD, C_SECONDARY, C_SELECTION_BG, C_SKELETON, C_SPONSOR,
};
use crate::widgets::{
    filter_input::{FilterAction, FilterInput},
    pane_chrome::{pane_chrome, Badge},
    scrollable_list::ScrollableList,
};

/// What the content area should draw, derived in `sync`.
#[derive(Clone, Copy)]
enum TabView {
    Loading { rows: usize },
    Cards,
    Empty {
        title: &'static str,
        message: &'static str,
    },
}

pub struct ListingTabs {
    tabs: TabController,
    list: ScrollableList<Listing>,
    filter_input: FilterInput,
    view: TabView,
    /// Tab label hitboxes from the last draw: (x_start, x_end, bucket).
    tab_hitboxes: Vec<(u16, u16, Bucket)>,
}

impl ListingTabs {
    pub fn new() -> Self {
        Self {
            tabs: TabController::new(),
            list: ScrollableList::new(|l: &Listing, q: &str| listing_matches(l, q)),
            filter_input: FilterInput::new("title, sponsor, token…"),
            view: TabView::Loading {
                rows: crate::tabs::SKELETON_ROWS,
            },
            tab_hitboxes: Vec::new(),
        }
    }

    pub fn active_bucket(&self) -> Bucket {
        self.tabs.active()
    }

    /// Re-run classification for the active tab.  Pure and idempotent, so
    /// it is safe to call on every state change or tick.
    pub fn sync(&mut self, state: &AppState) {
        let pred;
        let language: Option<&dyn Fn(&Listing) -> bool> = if state.check_language {
            match state.language.as_deref() {
                Some(lang) => {
                    pred = move |l: &Listing| l.matches_language(lang);
                    Some(&pred)
                }
                None => None,
            }
        } else {
            None
        };

        let query = TabQuery {
            listings: state.listings.as_deref(),
            is_loading: state.is_loading,
            now: Utc::now(),
            take: state.take,
            language,
        };

        match self.tabs.content(&query) {
            TabContent::Loading { rows } => {
                self.view = TabView::Loading { rows };
                self.list.set_items(Vec::new());
            }
            TabContent::Empty { title, message } => {
                self.view = TabView::Empty { title, message };
                self.list.set_items(Vec::new());
            }
            TabContent::Listings(items) => {
                self.view = TabView::Cards;
                self.list.set_items(items.into_iter().cloned().collect());
            }
        }
    }

    fn switch_tab(&mut self, bucket: Bucket, state: &AppState) {
        self.tabs.select(bucket);
        self.list.select_first();
        self.sync(state);
    }

    fn selected_url(&self, state: &AppState) -> Option<String> {
        self.list.selected_item().map(|l| l.url(&state.base_url))
    }

    fn render_item<'a>(
        &self,
        listing: &'a Listing,
        is_selected: bool,
        width: u16,
        now: DateTime<Utc>,
    ) -> ListItem<'a> {
        let (icon, icon_color) = match self.tabs.active() {
            Bucket::Open => ("●", C_OPEN),
            Bucket::InReview => ("◐", C_REVIEW),
            Bucket::Completed => ("✓", C_DONE),
        };

        let title_style = if is_selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let item_bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };

        // Reserve roughly half the row for title, the rest for metadata.
        let title_max = (width as usize / 2).max(16);
        let mut spans: Vec<Span> = vec![
            Span::styled(format!(" {icon} "), Style::default().fg(icon_color)),
            Span::styled(truncate_to(&listing.title, title_max), title_style),
        ];

        if let Some(sponsor) = &listing.sponsor_name {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(sponsor.clone(), Style::default().fg(C_SPONSOR)));
        }

        if let Some(amount) = listing.reward_amount {
            let token = listing.token.as_deref().unwrap_or("");
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{amount} {token}").trim_end().to_string(),
                Style::default().fg(C_REWARD),
            ));
        }

        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            deadline_label(listing.deadline, now),
            Style::default().fg(C_MUTED),
        ));

        ListItem::new(Line::from(spans)).style(item_bg)
    }

    fn draw_skeleton(&self, frame: &mut Frame, area: Rect, rows: usize) {
        let row = "░".repeat((area.width as usize).saturating_sub(4).clamp(8, 48));
        for i in 0..rows.min(area.height as usize) {
            let line_area = Rect {
                y: area.y + i as u16,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {row}"),
                    Style::default().fg(C_SKELETON),
                )),
                line_area,
            );
        }
    }

    fn draw_empty(&self, frame: &mut Frame, area: Rect, title: &str, message: &str) {
        let top = area.y + area.height / 3;
        if top + 1 >= area.y + area.height {
            return;
        }
        let title_area = Rect {
            y: top,
            height: 1,
            ..area
        };
        let message_area = Rect {
            y: top + 1,
            height: 1,
            ..area
        };
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(
                    title.to_string(),
                    Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
                ))
                .centered(),
            ),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(Span::styled(message.to_string(), Style::default().fg(C_MUTED)))
                    .centered(),
            ),
            message_area,
        );
    }
}

fn listing_matches(listing: &Listing, q: &str) -> bool {
    if q.trim().is_empty() {
        return true;
    }
    let q = q.to_lowercase();
    let text = format!(
        "{} {} {}",
        listing.title.to_lowercase(),
        listing.sponsor_name.as_deref().unwrap_or("").to_lowercase(),
        listing.token.as_deref().unwrap_or("").to_lowercase()
    );
    q.split_whitespace().all(|term| text.contains(term))
}

/// Short relative-deadline label: "due 3d", "due 2h", "ended 5d ago".
fn deadline_label(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = deadline - now;
    if delta.num_seconds() >= 0 {
        if delta.num_days() > 0 {
            format!("due {}d", delta.num_days())
        } else if delta.num_hours() > 0 {
            format!("due {}h", delta.num_hours())
        } else {
            format!("due {}m", delta.num_minutes().max(1))
        }
    } else {
        let past = -delta;
        if past.num_days() > 0 {
            format!("ended {}d ago", past.num_days())
        } else if past.num_hours() > 0 {
            format!("ended {}h ago", past.num_hours())
        } else {
            format!("ended {}m ago", past.num_minutes().max(1))
        }
    }
}

fn truncate_to(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

impl Component for ListingTabs {
    fn id(&self) -> ComponentId {
        ComponentId::ListingTabs
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Filter mode input
        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => {
                    self.list.set_filter(&q);
                    vec![]
                }
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => {
                    self.list.set_filter("");
                    vec![Action::CloseFilter]
                }
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Right => {
                self.tabs.select_next();
                self.list.select_first();
                self.sync(state);
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.tabs.select_prev();
                self.list.select_first();
                self.sync(state);
            }
            KeyCode::Char('1') => self.switch_tab(Bucket::Open, state),
            KeyCode::Char('2') => self.switch_tab(Bucket::InReview, state),
            KeyCode::Char('3') => self.switch_tab(Bucket::Completed, state),

            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }
            KeyCode::Esc => {
                self.list.set_filter("");
                self.filter_input.clear();
            }

            KeyCode::Enter | KeyCode::Char('y') => {
                if let Some(url) = self.selected_url(state) {
                    return vec![Action::CopyToClipboard(url)];
                }
            }
            KeyCode::Char('v') => {
                if let Some(link) = state.view_all_link.clone() {
                    return vec![Action::CopyToClipboard(link)];
                }
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                // Tab bar is the first row inside the border.
                if event.row == area.y + 1 {
                    for &(x0, x1, bucket) in &self.tab_hitboxes {
                        if event.column >= x0 && event.column < x1 {
                            self.switch_tab(bucket, state);
                            break;
                        }
                    }
                } else if event.row >= area.y + 2 {
                    let rel = (event.row - area.y - 2) as usize;
                    self.list.handle_click(rel);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        // Deadlines cross in real time; membership is recomputed, never cached.
        self.sync(state);
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::SelectTab(bucket) => self.switch_tab(*bucket, state),
            Action::NextTab => {
                self.tabs.select_next();
                self.list.select_first();
                self.sync(state);
            }
            Action::PrevTab => {
                self.tabs.select_prev();
                self.list.select_first();
                self.sync(state);
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = if state.fetch_error {
            Some(Badge {
                text: "ERR",
                color: C_BADGE_ERR,
            })
        } else {
            None
        };
        let block = pane_chrome("listings", focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        // ── Tab bar ──────────────────────────────────────────────────────────
        let tab_row = Rect {
            height: 1,
            ..inner
        };
        self.tab_hitboxes.clear();
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        let mut x = inner.x + 1;
        for (i, bucket) in BUCKETS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", Style::default().fg(C_MUTED)));
                x += 3;
            }
            let label = bucket.title();
            let w = label.width() as u16;
            let style = if *bucket == self.tabs.active() {
                style_active_tab()
            } else {
                style_secondary()
            };
            spans.push(Span::styled(label, style));
            self.tab_hitboxes.push((x, x + w, *bucket));
            x += w;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), tab_row);

        if state.show_view_all && state.view_all_link.is_some() {
            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled("View All → ", Style::default().fg(C_SECONDARY)))
                        .right_aligned(),
                ),
                tab_row,
            );
        }

        // ── Content ──────────────────────────────────────────────────────────
        let mut content = Rect {
            x: inner.x,
            y: inner.y + 1,
            width: inner.width,
            height: inner.height - 1,
        };
        if self.filter_input.is_active() && content.height > 1 {
            content.height -= 1;
        }

        match self.view {
            TabView::Loading { rows } => self.draw_skeleton(frame, content, rows),
            TabView::Empty { title, message } => self.draw_empty(frame, content, title, message),
            TabView::Cards => {
                let h = content.height as usize;
                self.list.ensure_visible(h);
                let sel_in_view = self.list.selected_in_view(h);
                let now = Utc::now();
                let visible: Vec<Listing> =
                    self.list.visible_items(h).into_iter().cloned().collect();
                let items: Vec<ListItem> = visible
                    .iter()
                    .enumerate()
                    .map(|(row, listing)| {
                        self.render_item(listing, row == sel_in_view, content.width, now)
                    })
                    .collect();
                frame.render_widget(List::new(items), content);
            }
        }

        // Filter input bar at the bottom of the pane when active.
        if self.filter_input.is_active() {
            let filter_area = Rect {
                x: inner.x,
                y: inner.y + inner.height - 1,
                width: inner.width,
                height: 1,
            };
            self.filter_input.draw(frame, filter_area);
        }
    }
}

impl Default for ListingTabs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_deadline_labels() {
        let now = at("2024-06-15T12:00:00Z");
        assert_eq!(deadline_label(at("2024-06-18T12:00:00Z"), now), "due 3d");
        assert_eq!(deadline_label(at("2024-06-15T14:30:00Z"), now), "due 2h");
        assert_eq!(deadline_label(at("2024-06-15T12:00:00Z"), now), "due 1m");
        assert_eq!(deadline_label(at("2024-06-10T12:00:00Z"), now), "ended 5d ago");
        assert_eq!(deadline_label(at("2024-06-15T11:00:00Z"), now), "ended 1h ago");
    }

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate_to("short", 10), "short");
        let cut = truncate_to("a rather long listing title", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }
}
