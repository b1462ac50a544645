// Query intent planner - maps a free-text operator query to widget specs
use crate::domain::widget::{Orientation, StatSource, WidgetKind, WidgetSpec};
use regex::Regex;
use std::sync::LazyLock;

/// Reply when no predicate fires, enumerating recognized phrases.
pub const HELP_REPLY: &str = "Не нашел метрик для запроса. Попробуйте: \
«тип обращений», «тональность», «по городам», «по офисам», «доля VIP».";

const TOP_CITIES: usize = 3;

// Keyword-stem predicates, one per statistical dimension. Independent:
// a single query may fire several of them.
static RE_CITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"город|географ|населен|регион|област").unwrap());
static RE_TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"тип|категор").unwrap());
static RE_SENTIMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"тональн|эмоци|настроен").unwrap());
static RE_OFFICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"офис|подраздел|бизнес-единиц").unwrap());
static RE_VIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"vip|премиум").unwrap());
static RE_PRIORITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"приоритет|срочн").unwrap());
static RE_VOLUME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"больше|топ|максим|лидер").unwrap());

/// Planner result: a reply for the conversation log and the widgets to build.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOutcome {
    pub reply: String,
    pub widgets: Vec<WidgetSpec>,
}

/// Lowercase, strip sentence punctuation, collapse whitespace.
pub fn normalize(query: &str) -> String {
    let lowered = query.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| match c {
            '.' | ',' | '!' | '?' | ';' | ':' | '(' | ')' => ' ',
            other => other,
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Two widgets shown when the remote planner is unreachable.
pub fn default_widgets() -> Vec<WidgetSpec> {
    vec![type_widget(), city_widget()]
}

fn type_widget() -> WidgetSpec {
    WidgetSpec::new(WidgetKind::Bar, StatSource::ByType, "Типы обращений")
        .with_orientation(Orientation::Horizontal)
}

fn city_widget() -> WidgetSpec {
    WidgetSpec::new(WidgetKind::Bar, StatSource::ByCity, "География обращений")
}

/// Pure rule-based planning: predicates tested against the normalized
/// query, widgets appended in fixed precedence order. Callers reject
/// queries that are empty after trimming.
pub fn plan(query: &str) -> PlannerOutcome {
    let tokens = normalize(query);

    let wants_city = RE_CITY.is_match(&tokens);
    let wants_type = RE_TYPE.is_match(&tokens);
    let wants_sentiment = RE_SENTIMENT.is_match(&tokens);
    let wants_office = RE_OFFICE.is_match(&tokens);
    let wants_vip = RE_VIP.is_match(&tokens);
    let wants_priority = RE_PRIORITY.is_match(&tokens);
    let wants_volume = RE_VOLUME.is_match(&tokens);

    let mut widgets = Vec::new();

    if wants_type {
        widgets.push(type_widget());
    }
    if wants_city || wants_volume {
        widgets.push(city_widget());
    }
    if wants_sentiment {
        widgets.push(WidgetSpec::new(
            WidgetKind::Donut,
            StatSource::BySentiment,
            "Тональность обращений",
        ));
    }
    if wants_office {
        widgets.push(WidgetSpec::new(
            WidgetKind::List,
            StatSource::ByOffice,
            "Распределение по офисам",
        ));
    }
    if wants_vip {
        widgets.push(WidgetSpec::new(
            WidgetKind::Stat,
            StatSource::VipShare,
            "Доля VIP обращений",
        ));
    }
    if wants_priority {
        widgets.push(WidgetSpec::new(
            WidgetKind::Stat,
            StatSource::AvgPriority,
            "Средний приоритет",
        ));
    }
    if wants_volume {
        widgets.push(
            WidgetSpec::new(
                WidgetKind::List,
                StatSource::ByCity,
                "Топ города по обращениям",
            )
            .with_top_n(TOP_CITIES),
        );
    }

    let reply = if widgets.is_empty() {
        HELP_REPLY.to_string()
    } else {
        let titles: Vec<&str> = widgets.iter().map(|w| w.title.as_str()).collect();
        format!("Готово! Построил виджеты: {}.", titles.join(", "))
    };

    PlannerOutcome { reply, widgets }
}
