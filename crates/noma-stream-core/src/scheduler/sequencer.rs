use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use super::template::PacingTemplate;
use crate::moment::{Category, Moment};

/// Arrange a pool of moments into a paced stream order.
///
/// The output is a permutation of the input: same length, same multiset of
/// ids. Within each category the order is uniformly random; across
/// categories the template decides which queue each slot draws from.
pub fn arrange(pool: Vec<Moment>, template: &PacingTemplate) -> Vec<Moment> {
    arrange_with_rng(pool, template, &mut rand::thread_rng())
}

/// Arrange with a caller-provided random source, so a seeded rng
/// reproduces the exact sequence.
pub fn arrange_with_rng<R: Rng + ?Sized>(
    pool: Vec<Moment>,
    template: &PacingTemplate,
    rng: &mut R,
) -> Vec<Moment> {
    let total = pool.len();
    if total == 0 {
        return Vec::new();
    }

    // Buckets live in Category::ALL order so the rng consumption order is
    // stable across runs with the same seed.
    let mut buckets: Vec<Vec<Moment>> = Category::ALL.iter().map(|_| Vec::new()).collect();
    for moment in pool {
        buckets[bucket_of(moment.category)].push(moment);
    }
    for bucket in &mut buckets {
        bucket.shuffle(rng);
    }
    let mut queues: Vec<VecDeque<Moment>> = buckets.into_iter().map(VecDeque::from).collect();

    let fallback = template.fallback_order();
    let mut out: Vec<Moment> = Vec::with_capacity(total);

    for position in 0..total {
        let desired = template.slot(position);
        let Some(pick) = pick_queue(&queues, desired, &fallback, ends_heavy_pair(&out)) else {
            break;
        };
        if let Some(moment) = queues[pick].pop_front() {
            out.push(moment);
        }
    }

    out
}

fn bucket_of(category: Category) -> usize {
    // Category::ALL covers every variant, so position() always finds one.
    Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0)
}

/// Pick the queue for one slot. The desired category wins unless it is
/// empty or would extend a heavy run; then the light fallback chain; then
/// whatever is left, so the walk always drains the pool.
fn pick_queue(
    queues: &[VecDeque<Moment>],
    desired: Category,
    fallback: &[Category],
    heavy_run: bool,
) -> Option<usize> {
    let desired_idx = bucket_of(desired);
    if !queues[desired_idx].is_empty() && !(desired.is_heavy() && heavy_run) {
        return Some(desired_idx);
    }

    for category in fallback {
        let idx = bucket_of(*category);
        if !queues[idx].is_empty() {
            return Some(idx);
        }
    }

    queues.iter().position(|q| !q.is_empty())
}

fn ends_heavy_pair(out: &[Moment]) -> bool {
    out.len() >= 2
        && out[out.len() - 1].category.is_heavy()
        && out[out.len() - 2].category.is_heavy()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn moment(id: &str, category: Category) -> Moment {
        Moment {
            id: id.to_string(),
            category,
            body: format!("body of {}", id),
            alias: "a quiet fox".to_string(),
            heart_count: 0,
            reply_count: 0,
            hearted: false,
            saved: false,
            created_at: Utc::now(),
        }
    }

    fn pool_of(categories: &[Category]) -> Vec<Moment> {
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| moment(&format!("m{}", i), *c))
            .collect()
    }

    fn sorted_ids(moments: &[Moment]) -> Vec<String> {
        let mut ids: Vec<String> = moments.iter().map(|m| m.id.clone()).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_output_is_permutation_of_pool() {
        let pool = pool_of(&[
            Category::Validation,
            Category::Confession,
            Category::Guidance,
            Category::Confession,
            Category::Prompt,
            Category::Reassurance,
            Category::Validation,
        ]);
        let before = sorted_ids(&pool);

        let out = arrange(pool, &PacingTemplate::default());

        assert_eq!(sorted_ids(&out), before);
    }

    #[test]
    fn test_no_three_consecutive_heavy() {
        // Five light, three heavy: a heavy triple is avoidable, so the
        // sequencer must avoid it.
        let pool = pool_of(&[
            Category::Validation,
            Category::Validation,
            Category::Guidance,
            Category::Prompt,
            Category::Reassurance,
            Category::Confession,
            Category::Confession,
            Category::Confession,
        ]);

        let out = arrange(pool, &PacingTemplate::default());

        assert_eq!(out.len(), 8);
        for window in out.windows(3) {
            assert!(
                !window.iter().all(|m| m.category.is_heavy()),
                "heavy run in {:?}",
                out.iter().map(|m| m.category.as_str()).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_heavy_routes_back_to_light() {
        let pool = pool_of(&[
            Category::Confession,
            Category::Confession,
            Category::Validation,
            Category::Guidance,
            Category::Reassurance,
            Category::Prompt,
        ]);

        let out = arrange(pool, &PacingTemplate::default());

        for pair in out.windows(2) {
            if pair[0].category.is_heavy() && pair[1].category.is_heavy() {
                panic!("adjacent heavy moments with lights available");
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let categories = [
            Category::Validation,
            Category::Confession,
            Category::Guidance,
            Category::Prompt,
            Category::Reassurance,
        ];
        let pool: Vec<Moment> = (0..15)
            .map(|i| moment(&format!("m{}", i), categories[i % categories.len()]))
            .collect();
        let template = PacingTemplate::default();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let out_a = arrange_with_rng(pool.clone(), &template, &mut rng_a);
        let out_b = arrange_with_rng(pool, &template, &mut rng_b);

        let ids_a: Vec<&str> = out_a.iter().map(|m| m.id.as_str()).collect();
        let ids_b: Vec<&str> = out_b.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_different_seeds_shuffle_within_category() {
        let pool: Vec<Moment> = (0..20)
            .map(|i| moment(&format!("m{}", i), Category::Validation))
            .collect();
        let template = PacingTemplate::default();

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        let out_a = arrange_with_rng(pool.clone(), &template, &mut rng_a);
        let out_b = arrange_with_rng(pool, &template, &mut rng_b);

        let ids_a: Vec<&str> = out_a.iter().map(|m| m.id.as_str()).collect();
        let ids_b: Vec<&str> = out_b.iter().map(|m| m.id.as_str()).collect();
        assert_ne!(ids_a, ids_b);
    }

    #[test]
    fn test_empty_pool_yields_empty_stream() {
        let out = arrange(Vec::new(), &PacingTemplate::default());
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_category_pool_drains_fully() {
        // All heavy: pacing cannot be satisfied, the permutation still must.
        let pool: Vec<Moment> = (0..7)
            .map(|i| moment(&format!("m{}", i), Category::Confession))
            .collect();

        let out = arrange(pool, &PacingTemplate::default());

        assert_eq!(out.len(), 7);
    }

    #[test]
    fn test_exhausted_heavy_slot_falls_back_to_light() {
        let pool = pool_of(&[
            Category::Confession,
            Category::Validation,
            Category::Guidance,
            Category::Prompt,
            Category::Reassurance,
            Category::Validation,
        ]);

        let out = arrange(pool, &PacingTemplate::default());

        // One heavy moment, five light: both heavy template slots past the
        // first draw from light queues instead.
        assert_eq!(out.len(), 6);
        assert_eq!(out.iter().filter(|m| m.category.is_heavy()).count(), 1);
    }
}
