use crate::models::Solution;

/// Sort solutions by objective, best first.
///
/// The sort is stable, so equal objectives keep discovery order. The input
/// is left untouched.
pub fn rank_solutions(solutions: &[Solution]) -> Vec<Solution> {
    let mut ranked = solutions.to_vec();
    ranked.sort_by(|a, b| a.objective.total_cmp(&b.objective));
    ranked
}
