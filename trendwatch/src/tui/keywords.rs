//! Keyword list panels - popular (server-ranked) and recent (client-owned).
//!
//! Both panels render position as rank, `N. value`, with distinct colors on
//! the top three positions. The recent panel additionally distinguishes
//! entries the user just searched (highlighted, unranked marker row) from
//! ordinary entries loaded off the server.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{rank_color, DIM, HIGHLIGHT, TEXT};
use crate::model::RecentEntry;
use crate::payload::KeywordEntry;

/// Placeholder shown when a ranked list has nothing to display.
pub const EMPTY_LIST: &str = "검색어가 없습니다";

/// Build the rows of the popular panel. Rendering the same payload twice
/// yields identical rows; there is no accumulation.
#[must_use]
pub fn popular_lines(entries: &[KeywordEntry]) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(EMPTY_LIST, Style::default().fg(DIM)))];
    }
    entries.iter().enumerate().map(|(i, entry)| ranked_line(i, &entry.value)).collect()
}

/// Build the rows of the recent panel.
#[must_use]
pub fn recent_lines(entries: &[RecentEntry]) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![Line::from(Span::styled(EMPTY_LIST, Style::default().fg(DIM)))];
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if entry.just_searched {
                Line::from(Span::styled(
                    format!("🔍 {}", entry.value),
                    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
                ))
            } else {
                ranked_line(i, &entry.value)
            }
        })
        .collect()
}

fn ranked_line(index: usize, value: &str) -> Line<'static> {
    let style = rank_color(index).map_or_else(
        || Style::default().fg(TEXT),
        |color| Style::default().fg(color).add_modifier(Modifier::BOLD),
    );
    Line::from(Span::styled(format!("{}. {value}", index + 1), style))
}

/// Popular-keywords panel, refreshed by the poller.
pub struct PopularPanel;

impl PopularPanel {
    pub fn render(f: &mut Frame, area: Rect, entries: &[KeywordEntry]) {
        let paragraph = Paragraph::new(popular_lines(entries)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("인기 검색어")
                .border_style(Style::default().fg(DIM)),
        );
        f.render_widget(paragraph, area);
    }
}

/// Recent-keywords panel, owned by the search controller.
pub struct RecentPanel;

impl RecentPanel {
    pub fn render(f: &mut Frame, area: Rect, entries: &[RecentEntry]) {
        let paragraph = Paragraph::new(recent_lines(entries)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("최근 검색어")
                .border_style(Style::default().fg(DIM)),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn entry(value: &str) -> KeywordEntry {
        KeywordEntry { value: value.to_string(), score: None }
    }

    #[test]
    fn popular_rows_are_one_indexed() {
        let lines = popular_lines(&[entry("a"), entry("b")]);
        assert_eq!(text_of(&lines[0]), "1. a");
        assert_eq!(text_of(&lines[1]), "2. b");
    }

    #[test]
    fn empty_popular_list_renders_placeholder() {
        let lines = popular_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), EMPTY_LIST);
    }

    #[test]
    fn rendering_same_payload_twice_is_identical() {
        let entries = vec![entry("a"), entry("b"), entry("c")];
        let first: Vec<String> = popular_lines(&entries).iter().map(text_of).collect();
        let second: Vec<String> = popular_lines(&entries).iter().map(text_of).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn top_three_rows_carry_rank_colors() {
        let entries: Vec<_> = (0..5).map(|i| entry(&format!("kw{i}"))).collect();
        let lines = popular_lines(&entries);
        for (i, line) in lines.iter().enumerate() {
            let fg = line.spans[0].style.fg;
            match i {
                0..=2 => assert_eq!(fg, rank_color(i)),
                _ => assert_ne!(fg, None),
            }
        }
    }

    #[test]
    fn just_searched_entry_renders_highlighted_marker_row() {
        let entries = vec![
            RecentEntry { value: "laptop".to_string(), score: None, just_searched: true },
            RecentEntry { value: "shoes".to_string(), score: None, just_searched: false },
        ];
        let lines = recent_lines(&entries);
        assert_eq!(text_of(&lines[0]), "🔍 laptop");
        assert_eq!(lines[0].spans[0].style.fg, Some(HIGHLIGHT));
        assert_eq!(text_of(&lines[1]), "2. shoes");
    }
}
