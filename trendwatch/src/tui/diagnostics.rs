//! Diagnostics panel - status dump and Redis-vs-DB comparison views.
//!
//! Both views are snapshots of a single server payload; nothing here polls
//! or accumulates. Missing counts show as `0개`, empty sections show the
//! `데이터가 없습니다` placeholder.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{ACCENT, DIM, SUCCESS_GREEN, TEXT};
use crate::model::Diagnostics;
use crate::payload::{ComparisonPayload, KeywordEntry, StatusPayload};

/// Placeholder for an empty diagnostics section.
pub const NO_DATA: &str = "데이터가 없습니다";

const STYLE_HEADING: Style = Style::new().fg(ACCENT).add_modifier(Modifier::BOLD);
const STYLE_LABEL: Style = Style::new().fg(DIM);
const STYLE_VALUE: Style = Style::new().fg(TEXT);

/// Build the status-dump view: per-list counts, the popular list with
/// scores, the recent list numbered without scores.
#[must_use]
pub fn status_lines(status: &StatusPayload) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Redis 상태 정보", STYLE_HEADING)),
        count_line("인기 검색어 수: ", status.total_popular_count),
        count_line("최근 검색어 수: ", status.total_recent_count),
        Line::from(""),
        Line::from(Span::styled("인기 검색어 (점수 포함):", STYLE_LABEL)),
    ];
    push_scored(&mut lines, &status.popular_keywords);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("최근 검색어:", STYLE_LABEL)));
    push_numbered(&mut lines, &status.recent_keywords);
    lines
}

/// Build the comparison view: both latencies, the improvement figure, both
/// result lists verbatim and 1-indexed.
#[must_use]
pub fn comparison_lines(cmp: &ComparisonPayload) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Redis vs DB 성능 비교 결과", STYLE_HEADING)),
        Line::from(vec![
            Span::styled("Redis 조회 시간: ", STYLE_LABEL),
            Span::styled(cmp.redis_time.clone(), STYLE_VALUE),
        ]),
        Line::from(vec![
            Span::styled("DB 조회 시간: ", STYLE_LABEL),
            Span::styled(cmp.db_time.clone(), STYLE_VALUE),
        ]),
        Line::from(vec![
            Span::styled("성능 향상: ", STYLE_LABEL),
            Span::styled(cmp.performance_improvement.clone(), Style::new().fg(SUCCESS_GREEN)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Redis 결과:", STYLE_LABEL)),
    ];
    push_verbatim(&mut lines, &cmp.redis_result);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("DB 결과:", STYLE_LABEL)));
    push_verbatim(&mut lines, &cmp.db_result);
    lines
}

fn count_line(label: &'static str, count: u64) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, STYLE_LABEL),
        Span::styled(format!("{count}개"), STYLE_VALUE),
    ])
}

fn push_scored(lines: &mut Vec<Line<'static>>, entries: &[KeywordEntry]) {
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(NO_DATA, STYLE_LABEL)));
        return;
    }
    for entry in entries {
        let text = entry.score.as_ref().map_or_else(
            || entry.value.clone(),
            |score| format!("{} ({score}점)", entry.value),
        );
        lines.push(Line::from(Span::styled(text, STYLE_VALUE)));
    }
}

fn push_numbered(lines: &mut Vec<Line<'static>>, entries: &[KeywordEntry]) {
    if entries.is_empty() {
        lines.push(Line::from(Span::styled(NO_DATA, STYLE_LABEL)));
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        lines.push(Line::from(Span::styled(format!("{}. {}", i + 1, entry.value), STYLE_VALUE)));
    }
}

fn push_verbatim(lines: &mut Vec<Line<'static>>, items: &[String]) {
    if items.is_empty() {
        lines.push(Line::from(Span::styled(NO_DATA, STYLE_LABEL)));
        return;
    }
    for (i, item) in items.iter().enumerate() {
        lines.push(Line::from(Span::styled(format!("{}. {item}", i + 1), STYLE_VALUE)));
    }
}

/// On-demand diagnostics panel.
pub struct DiagnosticsPanel;

impl DiagnosticsPanel {
    pub fn render(f: &mut Frame, area: Rect, diagnostics: &Diagnostics) {
        let lines = match diagnostics {
            Diagnostics::Hidden => {
                vec![Line::from(Span::styled("F4: 상태 확인  F5: 성능 비교", STYLE_LABEL))]
            }
            Diagnostics::Status(status) => status_lines(status),
            Diagnostics::Comparison(cmp) => comparison_lines(cmp),
        };
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("진단")
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

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(text_of).collect()
    }

    #[test]
    fn empty_status_renders_zero_counts_and_placeholders() {
        let lines = status_lines(&StatusPayload::default());
        let texts = texts(&lines);
        assert!(texts.contains(&"인기 검색어 수: 0개".to_string()));
        assert!(texts.contains(&"최근 검색어 수: 0개".to_string()));
        assert_eq!(texts.iter().filter(|t| *t == NO_DATA).count(), 2);
    }

    #[test]
    fn status_popular_entries_show_scores_recent_do_not() {
        let status = StatusPayload {
            popular_keywords: vec![KeywordEntry {
                value: "laptop".to_string(),
                score: Some("42".to_string()),
            }],
            recent_keywords: vec![KeywordEntry { value: "shoes".to_string(), score: None }],
            total_popular_count: 1,
            total_recent_count: 1,
        };
        let texts = texts(&status_lines(&status));
        assert!(texts.contains(&"laptop (42점)".to_string()));
        assert!(texts.contains(&"1. shoes".to_string()));
    }

    #[test]
    fn scoreless_popular_entry_renders_without_score_suffix() {
        let status = StatusPayload {
            popular_keywords: vec![KeywordEntry { value: "bare".to_string(), score: None }],
            ..StatusPayload::default()
        };
        let texts = texts(&status_lines(&status));
        assert!(texts.contains(&"bare".to_string()));
    }

    #[test]
    fn comparison_lists_are_one_indexed_and_verbatim() {
        let cmp = ComparisonPayload {
            redis_result: vec!["a".to_string(), "b".to_string()],
            db_result: vec!["a".to_string()],
            redis_time: "5ms".to_string(),
            db_time: "120ms".to_string(),
            performance_improvement: "24x".to_string(),
        };
        let texts = texts(&comparison_lines(&cmp));
        assert!(texts.contains(&"1. a".to_string()));
        assert!(texts.contains(&"2. b".to_string()));
        assert!(texts.contains(&"Redis 조회 시간: 5ms".to_string()));
        assert!(texts.contains(&"성능 향상: 24x".to_string()));
        // DB list holds exactly one row.
        let db_idx = texts.iter().position(|t| t == "DB 결과:").unwrap();
        assert_eq!(texts[db_idx + 1], "1. a");
        assert_eq!(texts.len(), db_idx + 2);
    }
}
