//! Random selection made when a countdown expires.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{ChooserConfig, Color, Mode, Outcome, RoundSummary, TouchId, PALETTE};

/// Unbiased in-place Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Splits `items` into `n` contiguous chunks whose sizes differ by at most one,
/// larger chunks first.
pub fn chunkify<T>(items: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let mut rest = items.into_iter();
    let mut left = rest.len();
    let mut chunks = Vec::with_capacity(n);
    for i in (1..=n).rev() {
        let take = left.div_ceil(i);
        chunks.push(rest.by_ref().take(take).collect::<Vec<_>>());
        left -= take;
    }
    chunks
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assignment {
    pub id: TouchId,
    pub outcome: Outcome,
    /// Replacement color, set in Groups mode only.
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub assignments: Vec<Assignment>,
    pub summary: RoundSummary,
}

impl Selection {
    #[cfg(test)]
    pub(crate) fn selected_count(&self) -> usize {
        self.summary.winners.len()
    }
}

/// Count actually used for `n` touches. Non-positive counts become 1, and
/// neither winners nor groups outnumber touches.
pub fn effective_count(config: &ChooserConfig, n: usize) -> u32 {
    config.count.max(1).min(n.max(1) as u32)
}

pub fn select<R: Rng>(ids: &[TouchId], config: ChooserConfig, rng: &mut R) -> Selection {
    let mut order = ids.to_vec();
    shuffle(&mut order, rng);
    let effective = effective_count(&config, order.len());
    match config.mode {
        Mode::Fingers => select_fingers(order, config.count, effective),
        Mode::Groups => assign_groups(order, config.count, effective, rng),
    }
}

fn select_fingers(order: Vec<TouchId>, requested: u32, count: u32) -> Selection {
    let touches = order.len();
    let mut winners = Vec::new();
    let assignments = order
        .into_iter()
        .enumerate()
        .map(|(rank, id)| {
            let position = rank as u32 + 1;
            let selected = position <= count;
            if selected {
                winners.push(id);
            }
            Assignment {
                id,
                outcome: Outcome::Ranked { position, selected },
                color: None,
            }
        })
        .collect();
    Selection {
        assignments,
        summary: RoundSummary {
            mode: Mode::Fingers,
            requested,
            effective: count,
            touches,
            winners,
            group_sizes: Vec::new(),
        },
    }
}

fn assign_groups<R: Rng>(
    order: Vec<TouchId>,
    requested: u32,
    groups: u32,
    rng: &mut R,
) -> Selection {
    let touches = order.len();
    let mut colors = PALETTE;
    shuffle(&mut colors, rng);
    let mut assignments = Vec::with_capacity(touches);
    let mut group_sizes = Vec::with_capacity(groups as usize);
    for (index, chunk) in chunkify(order, groups as usize).into_iter().enumerate() {
        let group = index as u32 + 1;
        // More groups than palette entries: colors repeat.
        let color = colors[index % colors.len()];
        group_sizes.push(chunk.len());
        assignments.extend(chunk.into_iter().map(|id| Assignment {
            id,
            outcome: Outcome::Grouped { group },
            color: Some(color),
        }));
    }
    Selection {
        assignments,
        summary: RoundSummary {
            mode: Mode::Groups,
            requested,
            effective: groups,
            touches,
            winners: Vec::new(),
            group_sizes,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng());
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng());
        assert!(empty.is_empty());
        let mut one = vec![7];
        shuffle(&mut one, &mut rng());
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn shuffle_positions_are_uniform() {
        const N: usize = 6;
        const TRIALS: usize = 60_000;
        let mut r = rng();
        let mut counts = [[0usize; N]; N];
        for _ in 0..TRIALS {
            let mut items: [usize; N] = [0, 1, 2, 3, 4, 5];
            shuffle(&mut items, &mut r);
            for (slot, item) in items.iter().enumerate() {
                counts[*item][slot] += 1;
            }
        }
        let expected = (TRIALS / N) as f64;
        for row in counts.iter() {
            let chi2: f64 = row
                .iter()
                .map(|&c| {
                    let d = c as f64 - expected;
                    d * d / expected
                })
                .sum();
            // 5 degrees of freedom, p = 0.0001
            assert!(chi2 < 25.74, "chi-square {} too large: {:?}", chi2, row);
        }
    }

    #[test]
    fn chunkify_ten_into_three() {
        let chunks = chunkify((1..=10).collect::<Vec<_>>(), 3);
        let sizes: Vec<_> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(chunks[0], vec![1, 2, 3, 4]);
        assert_eq!(chunks[2], vec![8, 9, 10]);
    }

    #[test]
    fn chunkify_sizes_are_balanced() {
        for n in 1..=24usize {
            for k in 1..=n {
                let chunks = chunkify((0..n).collect::<Vec<_>>(), k);
                assert_eq!(chunks.len(), k);
                let sizes: Vec<_> = chunks.iter().map(Vec::len).collect();
                assert!(sizes.iter().all(|&s| s > 0), "n={} k={} {:?}", n, k, sizes);
                assert_eq!(sizes.iter().sum::<usize>(), n);
                let max = *sizes.iter().max().unwrap();
                let min = *sizes.iter().min().unwrap();
                assert!(max - min <= 1, "n={} k={} {:?}", n, k, sizes);
                assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }

    #[test]
    fn fingers_selects_exactly_count() {
        let ids = [10, 11, 12, 13, 14];
        let config = ChooserConfig { count: 2, mode: Mode::Fingers };
        let sel = select(&ids, config, &mut rng());
        assert_eq!(sel.selected_count(), 2);
        let selected: Vec<_> = sel
            .assignments
            .iter()
            .filter(|a| matches!(a.outcome, Outcome::Ranked { selected: true, .. }))
            .collect();
        assert_eq!(selected.len(), 2);
        let mut positions: Vec<u32> = sel
            .assignments
            .iter()
            .map(|a| match a.outcome {
                Outcome::Ranked { position, .. } => position,
                _ => panic!("fingers mode must rank"),
            })
            .collect();
        positions.sort();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        assert!(sel.assignments.iter().all(|a| a.color.is_none()));
    }

    #[test]
    fn fingers_count_above_touches_selects_everyone() {
        let config = ChooserConfig { count: 9, mode: Mode::Fingers };
        let sel = select(&[1, 2, 3], config, &mut rng());
        assert_eq!(sel.selected_count(), 3);
        assert_eq!(sel.summary.requested, 9);
        assert_eq!(sel.summary.effective, 3);
    }

    #[test]
    fn zero_count_is_clamped_to_one() {
        let config = ChooserConfig { count: 0, mode: Mode::Fingers };
        let sel = select(&[1, 2, 3], config, &mut rng());
        assert_eq!(sel.selected_count(), 1);
        assert_eq!(sel.summary.requested, 0);
        assert_eq!(sel.summary.effective, 1);
    }

    #[test]
    fn groups_partition_everyone_with_distinct_colors() {
        let ids: Vec<TouchId> = (0..7).collect();
        let config = ChooserConfig { count: 3, mode: Mode::Groups };
        let sel = select(&ids, config, &mut rng());
        assert_eq!(sel.assignments.len(), 7);
        assert_eq!(sel.summary.group_sizes, vec![3, 2, 2]);
        let mut group_colors = std::collections::HashMap::new();
        for a in &sel.assignments {
            let Outcome::Grouped { group } = a.outcome else {
                panic!("groups mode must group");
            };
            let color = a.color.expect("group color");
            assert_eq!(*group_colors.entry(group).or_insert(color), color);
        }
        let distinct: HashSet<_> = group_colors.values().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn groups_never_outnumber_touches() {
        let config = ChooserConfig { count: 5, mode: Mode::Groups };
        let sel = select(&[1, 2], config, &mut rng());
        assert_eq!(sel.summary.effective, 2);
        assert_eq!(sel.summary.group_sizes, vec![1, 1]);
    }

    #[test]
    fn groups_beyond_palette_reuse_colors() {
        let ids: Vec<TouchId> = (0..14).collect();
        let config = ChooserConfig { count: 14, mode: Mode::Groups };
        let sel = select(&ids, config, &mut rng());
        assert_eq!(sel.summary.group_sizes.len(), 14);
        let colors: HashSet<_> = sel.assignments.iter().filter_map(|a| a.color).collect();
        assert_eq!(colors.len(), PALETTE.len());
    }
}
