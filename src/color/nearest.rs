use rayon::prelude::*;

use super::Rgb;
use super::distance::distance;

/// Candidate count above which distances are computed on the rayon pool.
pub const PARALLEL_THRESHOLD: usize = 4_096;

/// A candidate color and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestColor {
    pub color: Rgb,
    pub distance: f64,
}

/// Rank `candidates` by ascending distance to `target`.
///
/// Equal distances keep their input order. An empty slice gives an empty
/// ranking.
pub fn find_nearest_colors(target: Rgb, candidates: &[Rgb]) -> Vec<NearestColor> {
    find_nearest_colors_with_threshold(target, candidates, PARALLEL_THRESHOLD)
}

/// Same as [`find_nearest_colors`] with an explicit parallel cutoff.
pub fn find_nearest_colors_with_threshold(
    target: Rgb,
    candidates: &[Rgb],
    parallel_threshold: usize,
) -> Vec<NearestColor> {
    let measure = |&color: &Rgb| NearestColor {
        color,
        distance: distance(target, color),
    };
    let mut ranked: Vec<NearestColor> = if candidates.len() <= parallel_threshold {
        candidates.iter().map(measure).collect()
    } else {
        candidates.par_iter().map(measure).collect()
    };
    // Stable: ties stay in candidate order.
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidates_give_empty_ranking() {
        assert!(find_nearest_colors(Rgb::WHITE, &[]).is_empty());
    }

    #[test]
    fn ranks_ascending_by_distance() {
        let candidates = [Rgb::BLACK, Rgb::new(250, 250, 250), Rgb::new(128, 128, 128)];
        let ranked = find_nearest_colors(Rgb::WHITE, &candidates);
        let colors: Vec<Rgb> = ranked.iter().map(|n| n.color).collect();
        assert_eq!(
            colors,
            vec![Rgb::new(250, 250, 250), Rgb::new(128, 128, 128), Rgb::BLACK]
        );
        assert!(ranked.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn ties_keep_input_order() {
        let candidates = [
            Rgb::new(10, 0, 0),
            Rgb::new(0, 10, 0),
            Rgb::new(0, 0, 10),
            Rgb::new(0, 0, 0),
        ];
        let ranked = find_nearest_colors(Rgb::BLACK, &candidates);
        let colors: Vec<Rgb> = ranked.iter().map(|n| n.color).collect();
        assert_eq!(
            colors,
            vec![
                Rgb::new(0, 0, 0),
                Rgb::new(10, 0, 0),
                Rgb::new(0, 10, 0),
                Rgb::new(0, 0, 10),
            ]
        );
    }

    #[test]
    fn parallel_path_matches_sequential() {
        let candidates: Vec<Rgb> = (0..20_000_u32)
            .map(|i| {
                let [_, r, g, b] = i.wrapping_mul(2_654_435_761).to_be_bytes();
                Rgb::new(r, g, b)
            })
            .collect();
        let target = Rgb::new(90, 140, 200);
        let sequential = find_nearest_colors_with_threshold(target, &candidates, usize::MAX);
        let parallel = find_nearest_colors_with_threshold(target, &candidates, 0);
        assert_eq!(sequential, parallel);
    }
}
