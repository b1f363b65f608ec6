//! Rewrites the renderer's absolute axis labels into project-relative
//! counters (`DAY3`, `WEEK2`, `MONTH1`).
//!
//! The renderer regenerates its labels whenever it pleases, so this pass is
//! run repeatedly and must leave already rewritten labels alone.
//!
//! Week axes need extra care: a week that straddles a month boundary is
//! drawn as two segments tagged with the same ISO week. The first segment
//! carrying text gets the counter in the [`LabelStyle::Flat`] style and every
//! other segment of that week becomes an empty
//! [`LabelStyle::Continuation`], so the pair reads as one band.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;

use super::calendar::{self, RelativeLabel};
use super::view::{LabelStyle, TickLabel};
use crate::model::Granularity;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// What a resolver knows about the axis while walking it left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisContext {
    pub granularity: Granularity,
    pub project_start: NaiveDate,
    /// Date of the last resolved label, or the axis start.
    pub cursor: NaiveDate,
}

/// Recovers the date a rendered tick label stands for.
pub trait TickDateResolver {
    fn tick_to_date(&self, label: &TickLabel, context: &AxisContext) -> Option<NaiveDate>;
}

/// Reads dates back from label text: day-of-month numbers, month
/// abbreviations (with an optional year) and ISO week tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTickResolver;

impl TickDateResolver for TextTickResolver {
    fn tick_to_date(&self, label: &TickLabel, context: &AxisContext) -> Option<NaiveDate> {
        match context.granularity {
            Granularity::Day => resolve_day(&label.text, context.cursor),
            Granularity::Week => resolve_week(label.week?, context.cursor),
            Granularity::Month => resolve_month(&label.text, context.cursor),
        }
    }
}

fn first_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// The first date on or after `cursor` whose day of month is the label's.
fn resolve_day(text: &str, cursor: NaiveDate) -> Option<NaiveDate> {
    let day = first_number(text.trim())?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let mut month = calendar::first_of_month(cursor);
    // A day number may be missing from the next month (e.g. the 31st).
    for _ in 0..3 {
        if let Some(date) = month.with_day(day) {
            if date >= cursor {
                return Some(date);
            }
        }
        month = calendar::next_month(month);
    }
    None
}

/// Monday of ISO week `week` on or after the cursor's week.
fn resolve_week(week: u32, cursor: NaiveDate) -> Option<NaiveDate> {
    let cursor_week = calendar::week_start(cursor);
    let year = cursor.iso_week().year();
    let candidate = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    if candidate >= cursor_week {
        Some(candidate)
    } else {
        NaiveDate::from_isoywd_opt(year + 1, week, Weekday::Mon)
    }
}

/// First day of the named month, using an explicit four-digit year when the
/// label has one and the first such month on or after the cursor otherwise.
fn resolve_month(text: &str, cursor: NaiveDate) -> Option<NaiveDate> {
    let lower = text.trim().to_lowercase();
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| lower.contains(abbr))? as u32
        + 1;
    let explicit_year = first_number(&lower).filter(|y| (1000..=9999).contains(y));
    let year = match explicit_year {
        Some(year) => year as i32,
        None if month < cursor.month() => cursor.year() + 1,
        None => cursor.year(),
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Outcome of one rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub rewritten: usize,
    pub continued: usize,
    pub skipped: usize,
    pub unresolved: usize,
}

impl RewriteStats {
    pub fn changed(&self) -> usize {
        self.rewritten + self.continued
    }
}

/// Corrective pass over the renderer's minor axis labels.
#[derive(Debug, Clone, Default)]
pub struct LabelRewriter<R = TextTickResolver> {
    resolver: R,
}

impl<R: TickDateResolver> LabelRewriter<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Rewrite `labels` (in axis order) in place.
    pub fn rewrite(
        &self,
        labels: Vec<&mut TickLabel>,
        project_start: NaiveDate,
        granularity: Granularity,
        axis_start: NaiveDate,
    ) -> RewriteStats {
        let mut stats = RewriteStats::default();
        let mut context = AxisContext {
            granularity,
            project_start,
            cursor: axis_start,
        };
        let weeks = granularity == Granularity::Week;

        let mut segments: HashMap<u32, usize> = HashMap::new();
        if weeks {
            for week in labels.iter().filter(|l| !l.measure).filter_map(|l| l.week) {
                *segments.entry(week).or_default() += 1;
            }
        }
        let mut labelled: HashSet<u32> = HashSet::new();

        for label in labels {
            if label.measure {
                continue;
            }
            let parsed = RelativeLabel::parse(&label.text);
            let done = label.style != LabelStyle::Absolute || parsed.is_some();
            let relative = parsed.filter(|r| r.granularity == granularity);
            let week = if weeks { label.week } else { None };

            if done {
                if let Some(week) = week {
                    if !label.text.trim().is_empty() {
                        labelled.insert(week);
                    }
                }
                // Keep the cursor moving so fresh labels further right
                // resolve past the ones already rewritten.
                let date = match relative {
                    Some(relative) => Some(relative.period_start(project_start)),
                    None if week.is_some() => self.resolver.tick_to_date(label, &context),
                    None => None,
                };
                if let Some(date) = date {
                    context.cursor = context.cursor.max(date);
                }
                stats.skipped += 1;
                continue;
            }

            if let Some(week) = week {
                if label.text.trim().is_empty() || labelled.contains(&week) {
                    label.text.clear();
                    label.style = LabelStyle::Continuation;
                    stats.continued += 1;
                    continue;
                }
            }

            let Some(date) = self.resolver.tick_to_date(label, &context) else {
                debug!(
                    "event=label_unresolved module=labels granularity={} text={:?}",
                    granularity, label.text
                );
                stats.unresolved += 1;
                continue;
            };
            context.cursor = date;

            let relative = match week {
                Some(_) => RelativeLabel {
                    granularity,
                    index: calendar::relative_week_index(date, project_start),
                },
                None => calendar::relative_time_label(date, project_start, granularity),
            };
            label.text = relative.to_string();
            label.style = match week {
                Some(week) => {
                    labelled.insert(week);
                    if segments.get(&week).copied().unwrap_or(0) > 1 {
                        LabelStyle::Flat
                    } else {
                        LabelStyle::Relative
                    }
                }
                None => LabelStyle::Relative,
            };
            stats.rewritten += 1;
        }

        if stats.changed() > 0 {
            debug!(
                "event=labels_rewritten module=labels granularity={} rewritten={} continued={} unresolved={}",
                granularity, stats.rewritten, stats.continued, stats.unresolved
            );
        }
        stats
    }
}
