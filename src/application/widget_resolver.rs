// Widget resolution - binds planned widget specs to a stats snapshot
use crate::domain::stats::{BreakdownEntry, DashboardStats};
use crate::domain::widget::{
    ListItem, Orientation, StatSource, WidgetData, WidgetKind, WidgetSpec, WidgetView, PALETTE,
};

fn palette_for(len: usize) -> Vec<String> {
    (0..len)
        .map(|i| PALETTE[i % PALETTE.len()].to_string())
        .collect()
}

fn series<'a>(source: StatSource, stats: &'a DashboardStats) -> Option<&'a [BreakdownEntry]> {
    match source {
        StatSource::ByCity => Some(&stats.by_city),
        StatSource::ByType => Some(&stats.by_type),
        StatSource::ByOffice => Some(&stats.by_office),
        StatSource::BySentiment => Some(&stats.by_sentiment),
        StatSource::ByLanguage => Some(&stats.by_language),
        StatSource::VipShare | StatSource::AvgPriority => None,
    }
}

/// Slice a breakdown to `top_n`, sorted by descending count. Without a
/// bound the series is passed through in upstream order.
fn sliced(entries: &[BreakdownEntry], top_n: Option<usize>) -> Vec<BreakdownEntry> {
    match top_n {
        Some(n) => {
            let mut sorted = entries.to_vec();
            sorted.sort_by(|a, b| b.count.cmp(&a.count));
            sorted.truncate(n);
            sorted
        }
        None => entries.to_vec(),
    }
}

/// Resolve one spec against the current snapshot. Widgets whose backing
/// series is empty are dropped (no empty charts are ever rendered).
pub fn resolve(spec: &WidgetSpec, stats: &DashboardStats) -> Option<WidgetView> {
    let data = match spec.kind {
        WidgetKind::Bar => {
            let entries = sliced(series(spec.source, stats)?, spec.top_n);
            if entries.is_empty() {
                return None;
            }
            WidgetData::Bar {
                labels: entries.iter().map(|e| e.label.clone()).collect(),
                colors: palette_for(entries.len()),
                values: entries.iter().map(|e| e.count).collect(),
                horizontal: spec.orientation == Some(Orientation::Horizontal),
            }
        }
        WidgetKind::Donut => {
            let entries = sliced(series(spec.source, stats)?, spec.top_n);
            if entries.is_empty() {
                return None;
            }
            WidgetData::Donut {
                labels: entries.iter().map(|e| e.label.clone()).collect(),
                colors: palette_for(entries.len()),
                values: entries.iter().map(|e| e.count).collect(),
            }
        }
        WidgetKind::List => {
            let entries = sliced(series(spec.source, stats)?, spec.top_n);
            if entries.is_empty() {
                return None;
            }
            WidgetData::List {
                items: entries.iter().map(ListItem::from).collect(),
            }
        }
        WidgetKind::Stat => match spec.source {
            StatSource::VipShare => WidgetData::Stat {
                value: format!("{}%", (stats.totals.vip_share * 100.0).round() as i64),
                helper: Some("От всех обращений".to_string()),
            },
            StatSource::AvgPriority => WidgetData::Stat {
                value: format!("{:.1}", stats.totals.avg_priority),
                helper: Some("По шкале 1-10".to_string()),
            },
            // A stat over a breakdown dimension has no meaning.
            _ => return None,
        },
    };

    Some(WidgetView::new(spec.source, spec.title.clone(), data))
}

/// Resolve a planned sequence, preserving order and dropping empty widgets.
pub fn resolve_all(specs: &[WidgetSpec], stats: &DashboardStats) -> Vec<WidgetView> {
    specs.iter().filter_map(|s| resolve(s, stats)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::planner;
    use crate::domain::stats::StatsTotals;

    fn snapshot() -> DashboardStats {
        DashboardStats {
            totals: StatsTotals {
                tickets: 128,
                avg_priority: 6.4,
                vip_share: 0.23,
                in_routing: 18,
            },
            by_city: vec![
                BreakdownEntry::new("Алматы", 48),
                BreakdownEntry::new("Астана", 36),
                BreakdownEntry::new("Шымкент", 19),
                BreakdownEntry::new("Актобе", 12),
            ],
            by_type: vec![
                BreakdownEntry::new("Консультация", 29),
                BreakdownEntry::new("Жалоба", 18),
            ],
            by_office: vec![BreakdownEntry::new("Алматы Центр", 44)],
            by_sentiment: vec![
                BreakdownEntry::new("Негативный", 41),
                BreakdownEntry::new("Нейтральный", 63),
                BreakdownEntry::new("Позитивный", 24),
            ],
            by_language: vec![BreakdownEntry::new("RU", 90)],
        }
    }

    #[test]
    fn test_empty_series_drops_widget() {
        let mut stats = snapshot();
        stats.by_city.clear();

        let outcome = planner::plan("Покажи обращения по городам");
        assert_eq!(outcome.widgets.len(), 1, "predicate still fires");
        assert!(resolve_all(&outcome.widgets, &stats).is_empty());
    }

    #[test]
    fn test_vip_stat_formatting() {
        let outcome = planner::plan("Какая доля VIP обращений?");
        let views = resolve_all(&outcome.widgets, &snapshot());
        assert_eq!(views.len(), 1);
        match &views[0].data {
            WidgetData::Stat { value, helper } => {
                assert_eq!(value, "23%");
                assert_eq!(helper.as_deref(), Some("От всех обращений"));
            }
            other => panic!("expected stat widget, got {other:?}"),
        }
    }

    #[test]
    fn test_avg_priority_stat_formatting() {
        let spec = WidgetSpec::new(WidgetKind::Stat, StatSource::AvgPriority, "Средний приоритет");
        match resolve(&spec, &snapshot()).unwrap().data {
            WidgetData::Stat { value, .. } => assert_eq!(value, "6.4"),
            other => panic!("expected stat widget, got {other:?}"),
        }
    }

    #[test]
    fn test_top_n_list_sorted_descending() {
        let spec = WidgetSpec::new(WidgetKind::List, StatSource::ByCity, "Топ города")
            .with_top_n(3);
        match resolve(&spec, &snapshot()).unwrap().data {
            WidgetData::List { items } => {
                let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
                assert_eq!(labels, vec!["Алматы", "Астана", "Шымкент"]);
            }
            other => panic!("expected list widget, got {other:?}"),
        }
    }

    #[test]
    fn test_bar_keeps_upstream_order_and_palette_length() {
        let spec = WidgetSpec::new(WidgetKind::Bar, StatSource::BySentiment, "Тональность");
        match resolve(&spec, &snapshot()).unwrap().data {
            WidgetData::Bar {
                labels,
                values,
                colors,
                horizontal,
            } => {
                assert_eq!(labels[0], "Негативный");
                assert_eq!(values, vec![41, 63, 24]);
                assert_eq!(colors.len(), 3);
                assert!(!horizontal);
            }
            other => panic!("expected bar widget, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_preserves_planner_order() {
        let outcome = planner::plan("Покажи распределение типов обращений по городам");
        let views = resolve_all(&outcome.widgets, &snapshot());
        let sources: Vec<StatSource> = views.iter().map(|v| v.source).collect();
        assert_eq!(sources, vec![StatSource::ByType, StatSource::ByCity]);
    }
}
