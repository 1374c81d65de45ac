//! Collision-driven recursive rectangle splitting against a time-indexed
//! collision checker, parallelized over independent rectangles.

use rayon::prelude::*;

use crate::aabb::Aabb;
use crate::error::ReachError;

/// A read-only, per-step view of the collision environment.
///
/// `collides` is fallible: a checker that cannot evaluate an AABB (e.g. an
/// upstream I/O or raster error) returns `Err`, which the splitter surfaces
/// as [`ReachError::Checker`] and which aborts the current step.
pub trait CollisionStep: Sync {
    fn collides(&self, aabb: Aabb) -> Result<bool, String>;
}

/// The collision checker contract: `checker.at(step)` yields a [`CollisionStep`].
pub trait CollisionChecker: Sync {
    type Step<'a>: CollisionStep
    where
        Self: 'a;

    fn at(&self, step: usize) -> Self::Step<'_>;
}

/// Recursively split `rect` until it is collision-free or below the terminal
/// resolution (`r_term_sq` is `r_term^2`); collision at the terminal size
/// drops the rectangle entirely.
fn create_collision_free_rectangles<S: CollisionStep>(
    t: usize,
    step: &S,
    rect: Aabb,
    r_term_sq: f64,
) -> Result<Vec<Aabb>, ReachError> {
    if rect.diagonal_squared() <= r_term_sq {
        return Ok(Vec::new());
    }
    if !step
        .collides(rect)
        .map_err(|message| ReachError::Checker { step: t, message })?
    {
        return Ok(vec![rect]);
    }
    let (a, b) = rect.split_longer_axis();
    let mut out = create_collision_free_rectangles(t, step, a, r_term_sq)?;
    out.extend(create_collision_free_rectangles(t, step, b, r_term_sq)?);
    Ok(out)
}

/// Process every rectangle independently and in parallel; output order is
/// the concatenation of per-input results in input-index order, which is
/// deterministic regardless of thread count.
pub fn check_collision_and_split_rectangles<C: CollisionChecker>(
    t: usize,
    checker: &C,
    rects: &[Aabb],
    r_term: f64,
    threads: usize,
) -> Result<Vec<Aabb>, ReachError> {
    let step = checker.at(t);
    let r_term_sq = r_term * r_term;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ReachError::invariant(format!("failed to build a {threads}-thread pool: {e}")))?;
    let per_rect: Vec<Result<Vec<Aabb>, ReachError>> = pool.install(|| {
        rects
            .par_iter()
            .map(|&r| {
                let hit = step
                    .collides(r)
                    .map_err(|message| ReachError::Checker { step: t, message })?;
                if hit {
                    create_collision_free_rectangles(t, &step, r, r_term_sq)
                } else {
                    Ok(vec![r])
                }
            })
            .collect()
    });
    let mut out = Vec::with_capacity(per_rect.len());
    for r in per_rect {
        out.extend(r?);
    }
    Ok(out)
}
