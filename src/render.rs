//! Terminal rendering for rotaview types.
//!
//! Extension traits that draw core types with owo_colors: one row per hour,
//! one fixed-width cell per timeline column.

use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Style};
use rotaview_core::layout::{Segment, SegmentPhase};
use rotaview_core::{Confidence, RenderModel, ScheduleDay, Window};

/// Width of one timeline column, in characters
const CELL_WIDTH: usize = 24;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Confidence {
    fn render(&self) -> String {
        format!("[{}]", self).style(confidence_style(self)).to_string()
    }
}

fn confidence_style(confidence: &Confidence) -> Style {
    match confidence {
        Confidence::Official => Style::new().green(),
        Confidence::Community => Style::new().yellow(),
        Confidence::Other(_) => Style::new().cyan(),
    }
}

fn segment_style(segment: &Segment) -> Style {
    let style = confidence_style(&segment.confidence);
    match segment.phase {
        SegmentPhase::Past => style.dimmed(),
        SegmentPhase::Current => style.bold(),
        SegmentPhase::Future => style,
    }
}

impl Render for RenderModel {
    fn render(&self) -> String {
        let mut lines = vec![self.now.format("%a %H:%M").to_string().bold().to_string()];

        if self.is_empty() {
            lines.push("No maps today".dimmed().to_string());
            return lines.join("\n");
        }

        for hour in &self.hours {
            let from = self.day.hour_start(hour.hour);
            let to = self.day.hour_start(hour.hour + 1);

            let cells: Vec<String> = (0..self.column_count)
                .map(|column| {
                    let mut in_cell = self
                        .segments
                        .iter()
                        .filter(|s| s.column == column && s.start < to && s.end > from);
                    let first = in_cell.next();
                    let labelled = first
                        .filter(|s| s.label.is_some())
                        .or_else(|| in_cell.find(|s| s.label.is_some()));
                    render_cell(labelled.or(first))
                })
                .collect();

            let (marker, label) = if hour.is_current {
                ("▶".red().to_string(), hour.label.bold().to_string())
            } else {
                (" ".to_string(), hour.label.dimmed().to_string())
            };

            let row = format!("{} {} │ {}", marker, label, cells.join(" "));
            lines.push(row.trim_end().to_string());
        }

        lines.push(String::new());
        if self.live.is_empty() {
            lines.push("Nothing live right now".dimmed().to_string());
        } else {
            lines.push("Live now".bold().to_string());
            for window in &self.live {
                lines.push(format!("  {} {}", window.label(), window.confidence.render()));
            }
        }

        lines.join("\n")
    }
}

/// One fixed-width cell: the label on labelled segments, a rail otherwise.
fn render_cell(segment: Option<&Segment>) -> String {
    let Some(segment) = segment else {
        return " ".repeat(CELL_WIDTH);
    };

    let text = segment.label.as_deref().unwrap_or("┆");
    let clipped: String = text.chars().take(CELL_WIDTH).collect();
    let padded = format!("{:<width$}", clipped, width = CELL_WIDTH);

    padded.style(segment_style(segment)).to_string()
}

/// A window as a list item: time range, label, confidence chip, tags, note.
pub fn render_window(window: &Window, day: &ScheduleDay, now: DateTime<Utc>) -> String {
    let range = if window.start <= day.start() && window.end >= day.end() {
        "all day".to_string()
    } else {
        format!(
            "{}–{}",
            day.local(window.start).format("%H:%M"),
            day.local(window.end).format("%H:%M")
        )
    };

    let label = if window.is_live(now) {
        format!("{} {}", window.label().bold(), "● live".red())
    } else {
        window.label()
    };

    let mut line = format!(
        "  {} {} {}",
        format!("{:<11}", range).dimmed(),
        label,
        window.confidence.render()
    );

    if !window.tags.is_empty() {
        line.push_str(&format!(" {}", window.tags.join(", ").dimmed()));
    }
    if let Some(note) = &window.note {
        line.push_str(&format!("\n              {}", note.italic()));
    }

    line
}
