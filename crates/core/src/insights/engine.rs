//! Insight generation over ranked line items

use boqlens_domain::constants::DOMINANT_ITEM_SHARE;
use boqlens_domain::{Insight, InsightKind, LineItem};
use chrono::Utc;
use uuid::Uuid;

use super::rules;

/// Rule-based insight generator.
///
/// Consumes a ranked item set (ranking fields populated) and produces
/// concentration summaries plus value-engineering suggestions for the
/// Pareto-critical items. Stateless; safe to share.
#[derive(Debug, Default, Clone, Copy)]
pub struct InsightEngine;

impl InsightEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Generate the full insight set for one project's ranked items.
    pub fn generate(&self, project_id: &str, items: &[LineItem]) -> Vec<Insight> {
        let mut insights = Vec::new();
        if items.is_empty() {
            return insights;
        }
        let now = Utc::now().timestamp();

        let critical = items.iter().filter(|item| item.is_critical()).count();
        insights.push(Insight {
            id: Uuid::now_v7().to_string(),
            project_id: project_id.to_string(),
            kind: InsightKind::CostConcentration,
            item_code: None,
            title: "Cost concentration".to_string(),
            detail: format!(
                "{critical} of {} line items carry the critical share of project cost; \
                 focus reviews there first",
                items.len()
            ),
            savings_min: None,
            savings_max: None,
            created_at: now,
        });

        // Ranked input: the head item is the most expensive one.
        if let Some(top) = items.first() {
            let total: f64 = items.iter().map(|item| item.total_cost).sum();
            if total > 0.0 {
                let share = top.total_cost * 100.0 / total;
                if share > DOMINANT_ITEM_SHARE {
                    insights.push(Insight {
                        id: Uuid::now_v7().to_string(),
                        project_id: project_id.to_string(),
                        kind: InsightKind::DominantItem,
                        item_code: Some(top.item_code.clone()),
                        title: format!("Single item drives {share:.0}% of cost"),
                        detail: format!(
                            "'{}' alone accounts for {share:.1}% of the ranked total; \
                             a unit-rate or quantity error here distorts the whole analysis",
                            top.description
                        ),
                        savings_min: None,
                        savings_max: None,
                        created_at: now,
                    });
                }
            }
        }

        for item in items.iter().filter(|item| item.is_critical()) {
            if let Some(rule) = rules::match_rule(&item.description) {
                insights.push(Insight {
                    id: Uuid::now_v7().to_string(),
                    project_id: project_id.to_string(),
                    kind: InsightKind::ValueEngineering,
                    item_code: Some(item.item_code.clone()),
                    title: format!("{}: value-engineering candidate", rule.category),
                    detail: rule.suggestion.to_string(),
                    savings_min: Some(item.total_cost * rule.savings_min_pct / 100.0),
                    savings_max: Some(item.total_cost * rule.savings_max_pct / 100.0),
                    created_at: now,
                });
            }
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto;

    fn item(code: &str, description: &str, cost: f64) -> LineItem {
        LineItem {
            id: String::new(),
            project_id: "p".into(),
            item_code: code.into(),
            description: description.into(),
            quantity: 1.0,
            unit: None,
            unit_rate: cost,
            total_cost: cost,
            wbs_level: 1,
            parent_item_code: None,
            cumulative_cost: None,
            cumulative_percentage: None,
            is_pareto_critical: None,
        }
    }

    fn ranked(mut items: Vec<LineItem>) -> Vec<LineItem> {
        pareto::rank(&mut items);
        items
    }

    #[test]
    fn empty_input_generates_nothing() {
        let engine = InsightEngine::new();
        assert!(engine.generate("p", &[]).is_empty());
    }

    #[test]
    fn concentration_insight_counts_critical_items() {
        let engine = InsightEngine::new();
        let items = ranked(vec![
            item("1", "Roadworks", 7000.0),
            item("2", "Drainage", 2000.0),
            item("3", "Signage", 1000.0),
        ]);

        let insights = engine.generate("p", &items);
        let concentration = insights
            .iter()
            .find(|insight| insight.kind == InsightKind::CostConcentration)
            .expect("concentration insight should exist");
        assert!(concentration.detail.starts_with("2 of 3"));
    }

    #[test]
    fn dominant_item_is_flagged_with_its_code() {
        let engine = InsightEngine::new();
        let items = ranked(vec![
            item("1", "Substructure package", 9000.0),
            item("2", "Minor works", 1000.0),
        ]);

        let insights = engine.generate("p", &items);
        let dominant = insights
            .iter()
            .find(|insight| insight.kind == InsightKind::DominantItem)
            .expect("dominant-item insight should exist");
        assert_eq!(dominant.item_code.as_deref(), Some("1"));
    }

    #[test]
    fn ve_suggestion_bounds_scale_with_item_cost() {
        let engine = InsightEngine::new();
        let items = ranked(vec![
            item("1", "Cast in-situ concrete slab", 10_000.0),
            item("2", "Hoarding", 3000.0),
        ]);

        let insights = engine.generate("p", &items);
        let ve = insights
            .iter()
            .find(|insight| insight.kind == InsightKind::ValueEngineering)
            .expect("VE suggestion should exist");
        assert_eq!(ve.item_code.as_deref(), Some("1"));
        assert_eq!(ve.savings_min, Some(500.0));
        assert_eq!(ve.savings_max, Some(1200.0));
    }

    #[test]
    fn non_critical_items_get_no_ve_suggestion() {
        let engine = InsightEngine::new();
        // Concrete item is the cheap tail item, beyond the threshold.
        let items = ranked(vec![
            item("1", "Earthworks and grading", 9000.0),
            item("2", "Concrete kerbs", 1000.0),
        ]);

        let insights = engine.generate("p", &items);
        assert!(insights
            .iter()
            .filter(|insight| insight.kind == InsightKind::ValueEngineering)
            .all(|insight| insight.item_code.as_deref() != Some("2")));
    }
}
