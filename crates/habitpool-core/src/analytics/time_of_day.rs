//! Time-of-day completion patterns.

use serde::{Deserialize, Serialize};

use super::math::percent;
use crate::habits::CompletionEvent;

/// Coarse part of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPart {
    /// 05:00-11:59
    Morning,
    /// 12:00-16:59
    Afternoon,
    /// 17:00-21:59
    Evening,
    /// 22:00-04:59
    Night,
}

impl DayPart {
    pub const ALL: [DayPart; 4] = [
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPart::Morning,
            12..=16 => DayPart::Afternoon,
            17..=21 => DayPart::Evening,
            _ => DayPart::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPart::Morning => "morning",
            DayPart::Afternoon => "afternoon",
            DayPart::Evening => "evening",
            DayPart::Night => "night",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DayPart::Morning => "sunrise",
            DayPart::Afternoon => "sun",
            DayPart::Evening => "sunset",
            DayPart::Night => "moon",
        }
    }
}

/// One hourly bin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourBin {
    pub hour: u32,
    pub samples: u32,
    pub completed: u32,
    pub rate: f64,
    /// Bin has enough samples to count
    pub qualifies: bool,
}

/// Aggregate over the qualifying bins of a day part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPartStat {
    pub part: DayPart,
    pub samples: u32,
    pub completed: u32,
    pub rate: f64,
}

/// Time-of-day analysis block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDayAnalysis {
    pub has_enough_data: bool,
    pub total_events: u32,
    /// False when the log holds no missed entries, so every rate is 100 and
    /// parts and hours are ranked by completion count instead
    pub has_misses: bool,
    pub hours: Vec<HourBin>,
    pub day_parts: Vec<DayPartStat>,
    pub best_part: Option<DayPart>,
    pub worst_part: Option<DayPart>,
    pub best_hour: Option<u32>,
    pub best_hour_rate: f64,
}

impl TimeOfDayAnalysis {
    pub fn part(&self, part: DayPart) -> Option<&DayPartStat> {
        self.day_parts.iter().find(|p| p.part == part)
    }
}

/// Bucket completions into hourly bins and day parts.
///
/// Needs `min_events` well-formed entries; a bin counts only with at least
/// `min_hour_samples` samples.
pub fn analyze_time_of_day(
    log: &[CompletionEvent],
    min_events: u32,
    min_hour_samples: u32,
) -> TimeOfDayAnalysis {
    let mut hours: Vec<HourBin> = (0..24)
        .map(|hour| HourBin {
            hour,
            ..Default::default()
        })
        .collect();

    let mut total_events = 0u32;
    let mut has_misses = false;
    for event in log.iter().filter(|e| e.is_well_formed()) {
        let Some(hour) = event.local_hour() else {
            continue;
        };
        total_events += 1;
        let bin = &mut hours[hour as usize];
        bin.samples += 1;
        if event.completed {
            bin.completed += 1;
        } else {
            has_misses = true;
        }
    }

    if total_events < min_events {
        tracing::debug!(total_events, min_events, "time-of-day analysis gated");
        return TimeOfDayAnalysis {
            total_events,
            ..Default::default()
        };
    }

    for bin in &mut hours {
        bin.rate = percent(bin.completed, bin.samples);
        bin.qualifies = bin.samples >= min_hour_samples;
    }

    let day_parts: Vec<DayPartStat> = DayPart::ALL
        .iter()
        .filter_map(|part| {
            let (samples, completed) = hours
                .iter()
                .filter(|b| b.qualifies && DayPart::from_hour(b.hour) == *part)
                .fold((0, 0), |(s, c), b| (s + b.samples, c + b.completed));
            (samples > 0).then(|| DayPartStat {
                part: *part,
                samples,
                completed,
                rate: percent(completed, samples),
            })
        })
        .collect();

    // Without misses every rate is 100; rank by volume instead
    let part_key = |p: &DayPartStat| if has_misses { p.rate } else { p.completed as f64 };
    let hour_key = |b: &HourBin| if has_misses { b.rate } else { b.completed as f64 };

    // Ties resolve to the earlier part / hour
    let best_part = day_parts
        .iter()
        .fold(None::<&DayPartStat>, |best, p| match best {
            Some(b) if part_key(b) >= part_key(p) => Some(b),
            _ => Some(p),
        })
        .map(|p| p.part);
    let worst_part = day_parts
        .iter()
        .fold(None::<&DayPartStat>, |worst, p| match worst {
            Some(w) if part_key(w) <= part_key(p) => Some(w),
            _ => Some(p),
        })
        .map(|p| p.part);
    let best_bin = hours
        .iter()
        .filter(|b| b.qualifies)
        .fold(None::<&HourBin>, |best, b| match best {
            Some(x) if hour_key(x) >= hour_key(b) => Some(x),
            _ => Some(b),
        });

    TimeOfDayAnalysis {
        has_enough_data: true,
        total_events,
        has_misses,
        best_hour: best_bin.map(|b| b.hour),
        best_hour_rate: best_bin.map_or(0.0, |b| b.rate),
        hours,
        day_parts,
        best_part,
        worst_part,
    }
}
