//! Rewrite a set of overlapping rectangles as a disjoint, grid-aligned cover
//! of the same union (sweep-line over unique x coordinates).

use crate::aabb::{
    compute_minimum_positions_of_rectangles, discretize_rectangles, undiscretize_rectangles, Aabb, IntRect,
};
use crate::error::ReachError;

/// Sweep-line repartition of an integer-grid rectangle list into a disjoint
/// cover with the same union. Output is sorted lexicographically by
/// `(xmin, ymin)`.
pub fn repartition_rectangle(rects: &[IntRect]) -> Vec<IntRect> {
    if rects.is_empty() {
        return Vec::new();
    }
    let mut xs: Vec<i64> = rects.iter().flat_map(|r| [r.xmin, r.xmax]).collect();
    xs.sort_unstable();
    xs.dedup();

    let mut out: Vec<IntRect> = Vec::new();
    // Pending group: the y-spans active over [pending_start, ..) not yet flushed.
    let mut pending_start: i64 = xs[0];
    let mut pending_spans: Vec<(i64, i64)> = Vec::new();

    for w in xs.windows(2) {
        let (x0, x1) = (w[0], w[1]);
        let spans = merged_y_spans(rects, x0, x1);
        if spans == pending_spans {
            continue;
        }
        flush(&mut out, pending_start, w[0], &pending_spans);
        pending_start = x0;
        pending_spans = spans;
    }
    let xend = *xs.last().unwrap();
    flush(&mut out, pending_start, xend, &pending_spans);

    out.sort_by(|a, b| (a.xmin, a.ymin).cmp(&(b.xmin, b.ymin)));
    out
}

fn flush(out: &mut Vec<IntRect>, xmin: i64, xmax: i64, spans: &[(i64, i64)]) {
    if xmin >= xmax {
        return;
    }
    for &(ymin, ymax) in spans {
        out.push(IntRect { xmin, ymin, xmax, ymax });
    }
}

/// Union of y-intervals of rectangles covering the slab `[x0, x1]`, merged
/// into a sorted, disjoint (but touching-merged) list.
fn merged_y_spans(rects: &[IntRect], x0: i64, x1: i64) -> Vec<(i64, i64)> {
    let mut ys: Vec<(i64, i64)> = rects
        .iter()
        .filter(|r| r.xmin <= x0 && r.xmax >= x1)
        .map(|r| (r.ymin, r.ymax))
        .collect();
    ys.sort_unstable();
    let mut merged: Vec<(i64, i64)> = Vec::with_capacity(ys.len());
    for (ymin, ymax) in ys {
        if let Some(last) = merged.last_mut() {
            if ymin <= last.1 {
                last.1 = last.1.max(ymax);
                continue;
            }
        }
        merged.push((ymin, ymax));
    }
    merged
}

/// End-to-end repartition: minimum positions -> discretize -> sweep -> undiscretize.
pub fn create_repartitioned_rectangles(rectangles: &[Aabb], delta: f64) -> Result<Vec<Aabb>, ReachError> {
    if rectangles.is_empty() {
        return Ok(Vec::new());
    }
    let p_min = compute_minimum_positions_of_rectangles(rectangles)
        .expect("non-empty input guaranteed by the guard above");
    let discretized = discretize_rectangles(rectangles, p_min, delta)?;
    let repartitioned = repartition_rectangle(&discretized);
    Ok(undiscretize_rectangles(&repartitioned, p_min, delta))
}
