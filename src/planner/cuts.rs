//! No-good cuts that remove one block assignment from a model.
//!
//! For every food whose count can still move, the "differs" indicator is
//! split into two binaries: `up` forces `blocks >= v + 1` and `down` forces
//! `blocks <= v - 1`. A cover row asks for at least one of them, so the cut
//! point itself becomes infeasible while every other integer point stays.

use tracing::debug;

use crate::planner::model::{DietModel, LinearExpr, Relation, VarDef, VarKind};

/// Result of excluding an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum CutOutcome {
    /// The derived model, identical to the input plus the cut rows.
    Cut(DietModel),

    /// No food can take another value, so nothing feasible remains.
    DomainExhausted,
}

/// Derive a model that excludes `counts` (aligned with `model.foods()`).
///
/// `big_m_fallback` is only used for the `down` direction of foods that
/// have no ceiling (zero calories and no Max).
pub fn exclude_assignment(model: &DietModel, counts: &[i64], big_m_fallback: f64) -> CutOutcome {
    let round = model.cut_count() + 1;
    let mut derived = model.clone();
    let mut cover = LinearExpr::new();

    for (food_var, &value) in model.foods().iter().zip(counts) {
        let lower = food_var.bounds.lower;
        let name = &food_var.food.name;

        let can_go_up = food_var.ceiling.is_none_or(|ceiling| value < ceiling);
        if can_go_up {
            let up = derived.add_var(binary(format!("cut{round}_up_{name}")));
            // up = 1  =>  blocks >= value + 1
            let big_m = (value + 1 - lower) as f64;
            let expr = LinearExpr::new()
                .with_term(food_var.var, 1.0)
                .with_term(up, -big_m);
            derived.add_constraint(format!("cut{round}_up_{name}"), expr, Relation::Ge, lower as f64);
            cover.add(up, 1.0);
        }

        if value > lower {
            let down = derived.add_var(binary(format!("cut{round}_down_{name}")));
            // down = 1  =>  blocks <= value - 1
            let (big_m, rhs) = match food_var.ceiling {
                Some(ceiling) => ((ceiling - value + 1) as f64, ceiling as f64),
                None => (big_m_fallback, (value - 1) as f64 + big_m_fallback),
            };
            let expr = LinearExpr::new()
                .with_term(food_var.var, 1.0)
                .with_term(down, big_m);
            derived.add_constraint(format!("cut{round}_down_{name}"), expr, Relation::Le, rhs);
            cover.add(down, 1.0);
        }
    }

    if cover.is_empty() {
        debug!(round, "no food can change, domain exhausted");
        return CutOutcome::DomainExhausted;
    }

    debug!(round, indicators = cover.terms().len(), "adding no-good cut");
    derived.add_constraint(format!("cut{round}_cover"), cover, Relation::Ge, 1.0);
    derived.record_cut();
    CutOutcome::Cut(derived)
}

fn binary(name: String) -> VarDef {
    VarDef {
        name,
        kind: VarKind::Binary,
        lower: 0.0,
        upper: Some(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, Targets, Unit};
    use crate::planner::constants::DEFAULT_BIG_M_FALLBACK;

    fn targets() -> Targets {
        Targets::new(20.0, 20.0, 10.0).unwrap()
    }

    fn model(foods: &[FoodItem]) -> DietModel {
        DietModel::build(foods, &targets()).unwrap()
    }

    fn bounded(name: &str, min: f64, max: f64) -> FoodItem {
        FoodItem::new(name, Unit::Grams, 100.0, 20.0, 0.0, 0.0).with_limits(Some(min), Some(max))
    }

    /// Values for every variable of `model`, with the given block counts and
    /// the indicator binaries set as listed.
    fn point(model: &DietModel, counts: &[i64], active: &[&str]) -> Vec<f64> {
        let mut values = vec![0.0; model.variables().len()];
        for (food_var, &c) in model.foods().iter().zip(counts) {
            values[food_var.var.index()] = c as f64;
        }
        for (i, def) in model.variables().iter().enumerate() {
            if active.contains(&def.name.as_str()) {
                values[i] = 1.0;
            }
        }
        values
    }

    fn cut_rows_hold(model: &DietModel, values: &[f64]) -> bool {
        model
            .constraints()
            .iter()
            .filter(|c| c.name.starts_with("cut"))
            .all(|c| c.is_satisfied(values, 1e-9))
    }

    #[test]
    fn test_cut_derives_new_model() {
        let base = model(&[bounded("A", 100.0, 150.0), bounded("B", 100.0, 150.0)]);
        let CutOutcome::Cut(derived) = exclude_assignment(&base, &[12, 10], DEFAULT_BIG_M_FALLBACK)
        else {
            panic!("expected a cut");
        };

        assert_eq!(base.cut_count(), 0);
        assert_eq!(derived.cut_count(), 1);
        // A can move both ways, B only up
        assert_eq!(derived.variables().len(), base.variables().len() + 3);
        assert_eq!(derived.constraints().len(), base.constraints().len() + 4);
        assert_eq!(&derived.constraints()[..base.constraints().len()], base.constraints());
    }

    #[test]
    fn test_cut_excludes_only_the_cut_point() {
        let base = model(&[bounded("A", 100.0, 150.0), bounded("B", 100.0, 150.0)]);
        let CutOutcome::Cut(derived) = exclude_assignment(&base, &[12, 10], DEFAULT_BIG_M_FALLBACK)
        else {
            panic!("expected a cut");
        };

        // The excluded point fails whatever the indicators say.
        for active in [
            vec![],
            vec!["cut1_up_A"],
            vec!["cut1_down_A"],
            vec!["cut1_up_B"],
        ] {
            let values = point(&derived, &[12, 10], &active);
            assert!(!cut_rows_hold(&derived, &values), "{active:?}");
        }

        // Neighbours stay reachable with the matching indicator.
        assert!(cut_rows_hold(&derived, &point(&derived, &[13, 10], &["cut1_up_A"])));
        assert!(cut_rows_hold(&derived, &point(&derived, &[10, 10], &["cut1_down_A"])));
        assert!(cut_rows_hold(&derived, &point(&derived, &[12, 15], &["cut1_up_B"])));
        assert!(cut_rows_hold(&derived, &point(&derived, &[15, 15], &["cut1_up_A"])));
    }

    #[test]
    fn test_fixed_foods_get_no_indicator() {
        let base = model(&[bounded("A", 100.0, 110.0), bounded("Fixed", 50.0, 50.0)]);
        let CutOutcome::Cut(derived) = exclude_assignment(&base, &[10, 5], DEFAULT_BIG_M_FALLBACK)
        else {
            panic!("expected a cut");
        };
        assert!(
            derived
                .variables()
                .iter()
                .all(|v| !v.name.ends_with("_Fixed"))
        );
    }

    #[test]
    fn test_single_point_domain_is_exhausted() {
        let base = model(&[bounded("A", 100.0, 100.0), bounded("B", 50.0, 50.0)]);
        assert_eq!(
            exclude_assignment(&base, &[10, 5], DEFAULT_BIG_M_FALLBACK),
            CutOutcome::DomainExhausted
        );
    }

    #[test]
    fn test_fallback_only_for_foods_without_ceiling() {
        let water = FoodItem::new("Water", Unit::Units, 1.0, 0.0, 0.0, 0.0);
        let base = model(&[bounded("A", 100.0, 150.0), water]);
        let CutOutcome::Cut(derived) = exclude_assignment(&base, &[12, 3], 500.0) else {
            panic!("expected a cut");
        };

        let down_water = derived.constraint("cut1_down_Water").unwrap();
        assert_eq!(down_water.expr.terms()[1].1, 500.0);
        assert_eq!(down_water.rhs, 502.0);

        let down_a = derived.constraint("cut1_down_A").unwrap();
        assert_eq!(down_a.expr.terms()[1].1, 4.0);
        assert_eq!(down_a.rhs, 15.0);

        // Water at 3 -> 400 is fine going up, 2 going down.
        assert!(cut_rows_hold(&derived, &point(&derived, &[12, 400], &["cut1_up_Water"])));
        assert!(cut_rows_hold(&derived, &point(&derived, &[12, 2], &["cut1_down_Water"])));
    }

    #[test]
    fn test_cuts_accumulate() {
        let base = model(&[bounded("A", 100.0, 150.0), bounded("B", 100.0, 150.0)]);
        let CutOutcome::Cut(first) = exclude_assignment(&base, &[12, 10], DEFAULT_BIG_M_FALLBACK)
        else {
            panic!("expected a cut");
        };
        let CutOutcome::Cut(second) = exclude_assignment(&first, &[13, 10], DEFAULT_BIG_M_FALLBACK)
        else {
            panic!("expected a cut");
        };
        assert_eq!(second.cut_count(), 2);
        assert!(second.constraint("cut1_cover").is_some());
        assert!(second.constraint("cut2_cover").is_some());
    }
}
