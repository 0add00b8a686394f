//! Proportional progress bars for breakdowns.

use crate::error::Result;
use crate::rounding::allocate;
use crate::summary::{Breakdown, Outcome, Segment};

/// Cell character used for an outcome.
pub fn bar_glyph(outcome: Outcome) -> char {
    match outcome {
        Outcome::Success => '#',
        Outcome::Fail => 'x',
        Outcome::Disabled => '-',
    }
}

/// `passed 67% (2)`.
pub fn segment_label(segment: &Segment) -> String {
    format!(
        "{} {}% ({})",
        segment.outcome.label(),
        segment.percentage,
        segment.absolute
    )
}

/// Render the visible segments of `breakdown` as a bar of `width` cells.
///
/// Cells are allocated to segments with the same largest-remainder rounding
/// used for the percentages, so the bar is always exactly `width` long.
pub fn bar(breakdown: &Breakdown, width: u32) -> Result<String> {
    if width == 0 {
        return Ok(String::new());
    }

    let visible: Vec<&Segment> = breakdown.visible_segments().collect();
    let percent_total: u32 = visible.iter().map(|s| s.percentage).sum();
    if percent_total == 0 {
        return Ok(" ".repeat(width as usize));
    }

    let shares: Vec<f64> = visible
        .iter()
        .map(|s| f64::from(s.percentage) * f64::from(width) / f64::from(percent_total))
        .collect();
    let cells = allocate(&shares, width)?;

    let mut out = String::with_capacity(width as usize);
    for (segment, count) in visible.iter().zip(cells) {
        let glyph = bar_glyph(segment.outcome);
        out.extend(std::iter::repeat(glyph).take(count as usize));
    }
    Ok(out)
}
