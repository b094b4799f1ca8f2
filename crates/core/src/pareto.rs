//! Pareto cost-concentration ranking
//!
//! Items are sorted by total cost, descending and stable, then swept once to
//! assign cumulative cost, cumulative percentage, and the critical flag.
//! "Critical" is always relative to the set being ranked: whole projects and
//! per-level subsets each get their own 100% basis.

use std::cmp::Ordering;

use boqlens_domain::constants::PARETO_CRITICAL_THRESHOLD;
use boqlens_domain::types::{LineItem, WbsAggregateRow};

/// Anything that can be ranked by total cost.
pub trait CostRanked {
    fn total_cost(&self) -> f64;
    fn set_ranking(&mut self, cumulative_cost: f64, cumulative_percentage: f64, critical: bool);
}

impl CostRanked for LineItem {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn set_ranking(&mut self, cumulative_cost: f64, cumulative_percentage: f64, critical: bool) {
        self.cumulative_cost = Some(cumulative_cost);
        self.cumulative_percentage = Some(cumulative_percentage);
        self.is_pareto_critical = Some(critical);
    }
}

impl CostRanked for WbsAggregateRow {
    fn total_cost(&self) -> f64 {
        self.total_cost
    }

    fn set_ranking(&mut self, cumulative_cost: f64, cumulative_percentage: f64, critical: bool) {
        self.cumulative_cost = Some(cumulative_cost);
        self.cumulative_percentage = Some(cumulative_percentage);
        self.is_pareto_critical = Some(critical);
    }
}

/// Rank `items` in place against `critical_threshold` and return the set's
/// total cost.
///
/// The sort is stable: items with equal cost keep their input order, which
/// keeps repeated runs and drill-down views reproducible. An item is critical
/// while the running total entering it is still below the threshold, so the
/// item that carries the ranking across the boundary is included; an item
/// ending exactly on the threshold is critical too.
///
/// A non-positive total zeroes every computed field and marks nothing
/// critical, so degenerate inputs cannot divide by zero.
pub fn rank_by_cost<T: CostRanked>(items: &mut [T], critical_threshold: f64) -> f64 {
    items.sort_by(|a, b| {
        b.total_cost().partial_cmp(&a.total_cost()).unwrap_or(Ordering::Equal)
    });

    let total: f64 = items.iter().map(CostRanked::total_cost).sum();
    if total <= 0.0 {
        for item in items.iter_mut() {
            item.set_ranking(0.0, 0.0, false);
        }
        return total;
    }

    let mut running = 0.0;
    for item in items.iter_mut() {
        // Multiply before dividing: 80/100 must classify as exactly 80%.
        let entering = running * 100.0 / total;
        running += item.total_cost();
        let percentage = running * 100.0 / total;
        item.set_ranking(running, percentage, entering < critical_threshold);
    }
    total
}

/// Rank with the default critical threshold.
pub fn rank<T: CostRanked>(items: &mut [T]) -> f64 {
    rank_by_cost(items, PARETO_CRITICAL_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Costed {
        label: &'static str,
        cost: f64,
        cumulative: Option<f64>,
        percentage: Option<f64>,
        critical: Option<bool>,
    }

    impl Costed {
        fn new(label: &'static str, cost: f64) -> Self {
            Self { label, cost, cumulative: None, percentage: None, critical: None }
        }
    }

    impl CostRanked for Costed {
        fn total_cost(&self) -> f64 {
            self.cost
        }

        fn set_ranking(&mut self, cumulative: f64, percentage: f64, critical: bool) {
            self.cumulative = Some(cumulative);
            self.percentage = Some(percentage);
            self.critical = Some(critical);
        }
    }

    #[test]
    fn ranks_descending_with_cumulative_percentages() {
        let mut items = vec![Costed::new("sitework", 1000.0), Costed::new("concrete", 9000.0)];
        let total = rank(&mut items);

        assert_eq!(total, 10_000.0);
        assert_eq!(items[0].label, "concrete");
        assert_eq!(items[0].cumulative, Some(9000.0));
        assert_eq!(items[0].percentage, Some(90.0));
        assert_eq!(items[0].critical, Some(true));
        assert_eq!(items[1].label, "sitework");
        assert_eq!(items[1].cumulative, Some(10_000.0));
        assert_eq!(items[1].percentage, Some(100.0));
        assert_eq!(items[1].critical, Some(false));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut items = vec![Costed::new("a", 80.0), Costed::new("b", 20.0)];
        rank(&mut items);

        assert_eq!(items[0].percentage, Some(80.0));
        assert_eq!(items[0].critical, Some(true));
        assert_eq!(items[1].critical, Some(false));
    }

    #[test]
    fn equal_costs_keep_input_order() {
        let mut items = vec![
            Costed::new("first", 500.0),
            Costed::new("second", 500.0),
            Costed::new("third", 500.0),
        ];
        rank(&mut items);

        let labels: Vec<_> = items.iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn cumulative_percentage_is_monotonic_and_ends_at_hundred() {
        let mut items = vec![
            Costed::new("a", 312.4),
            Costed::new("b", 87.61),
            Costed::new("c", 1043.0),
            Costed::new("d", 3.99),
            Costed::new("e", 87.61),
        ];
        rank(&mut items);

        let mut previous = 0.0;
        for item in &items {
            let percentage = item.percentage.unwrap();
            assert!(percentage >= previous);
            previous = percentage;
        }
        assert!((previous - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_guards_division() {
        let mut items: Vec<Costed> = Vec::new();
        assert_eq!(rank(&mut items), 0.0);

        let mut items = vec![Costed::new("a", 0.0), Costed::new("b", 0.0)];
        let total = rank(&mut items);
        assert_eq!(total, 0.0);
        for item in &items {
            assert_eq!(item.cumulative, Some(0.0));
            assert_eq!(item.percentage, Some(0.0));
            assert_eq!(item.critical, Some(false));
        }
    }

    #[test]
    fn custom_threshold_applies() {
        let mut items = vec![Costed::new("a", 50.0), Costed::new("b", 50.0)];
        rank_by_cost(&mut items, 50.0);

        assert_eq!(items[0].critical, Some(true));
        assert_eq!(items[1].critical, Some(false));
    }
}
