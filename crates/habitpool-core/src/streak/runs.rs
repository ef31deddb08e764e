//! Run-length helpers over a chronological hit series (oldest first).

/// Consecutive hits ending at the last element.
///
/// The last element is "today" and is pending: a miss there does not break
/// the run, counting simply starts from the day before.
pub fn current_run(series: &[bool]) -> u32 {
    let settled = match series.split_last() {
        Some((false, rest)) => rest,
        _ => series,
    };
    settled.iter().rev().take_while(|hit| **hit).count() as u32
}

/// Longest run of consecutive hits anywhere in the series.
pub fn longest_run(series: &[bool]) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    for hit in series {
        if *hit {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
