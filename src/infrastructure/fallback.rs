// Bundled sample datasets served when upstream services are unreachable
use crate::domain::manager::{ManagerProfile, ManagerStats};
use crate::domain::stats::{BreakdownEntry, DashboardStats, StatsTotals};
use crate::domain::ticket::Ticket;

pub fn sample_stats() -> DashboardStats {
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
            BreakdownEntry::new("Караганда", 13),
        ],
        by_type: vec![
            BreakdownEntry::new("Неработоспособность приложения", 31),
            BreakdownEntry::new("Консультация", 29),
            BreakdownEntry::new("Смена данных", 22),
            BreakdownEntry::new("Жалоба", 18),
            BreakdownEntry::new("Претензия", 16),
            BreakdownEntry::new("Мошеннические действия", 12),
        ],
        by_office: vec![
            BreakdownEntry::new("Алматы Центр", 44),
            BreakdownEntry::new("Астана БЦ", 33),
            BreakdownEntry::new("Шымкент", 19),
            BreakdownEntry::new("Актобе", 12),
            BreakdownEntry::new("Караганда", 20),
        ],
        by_sentiment: vec![
            BreakdownEntry::new("Негативный", 41),
            BreakdownEntry::new("Нейтральный", 63),
            BreakdownEntry::new("Позитивный", 24),
        ],
        by_language: vec![
            BreakdownEntry::new("RU", 90),
            BreakdownEntry::new("KZ", 24),
            BreakdownEntry::new("ENG", 14),
        ],
    }
}

pub fn sample_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "TCK-001".to_string(),
            backend_id: None,
            raw_ticket_id: None,
            client_id: None,
            segment: "VIP".to_string(),
            description: "Не проходит перевод между счетами, ошибка 502 после подтверждения."
                .to_string(),
            ticket_type: "Неработоспособность приложения".to_string(),
            priority: 9,
            city: Some("Алматы".to_string()),
            office: Some("Алматы Центр".to_string()),
            language: Some("RU".to_string()),
            sentiment: Some("Негативный".to_string()),
            summary: Some(
                "Клиент не может завершить перевод. Рекомендуется проверить статус транзакции."
                    .to_string(),
            ),
            assigned_manager: Some("Кожахметова А.".to_string()),
            created_at: Some("2026-02-21T09:12:00Z".to_string()),
        },
        Ticket {
            id: "TCK-002".to_string(),
            backend_id: None,
            raw_ticket_id: None,
            client_id: None,
            segment: "Mass".to_string(),
            description: "Как изменить номер телефона в профиле?".to_string(),
            ticket_type: "Смена данных".to_string(),
            priority: 6,
            city: Some("Астана".to_string()),
            office: Some("Астана БЦ".to_string()),
            language: Some("RU".to_string()),
            sentiment: Some("Нейтральный".to_string()),
            summary: Some("Запрос на смену номера. Нужна верификация личности клиента.".to_string()),
            assigned_manager: Some("Омаров Б.".to_string()),
            created_at: Some("2026-02-21T09:26:00Z".to_string()),
        },
        Ticket {
            id: "TCK-003".to_string(),
            backend_id: None,
            raw_ticket_id: None,
            client_id: None,
            segment: "Priority".to_string(),
            description: "Card was charged twice, please refund the duplicate payment.".to_string(),
            ticket_type: "Претензия".to_string(),
            priority: 8,
            city: Some("Shymkent".to_string()),
            office: Some("Шымкент".to_string()),
            language: Some("ENG".to_string()),
            sentiment: Some("Негативный".to_string()),
            summary: Some("Двойное списание. Проверьте платежные подтверждения.".to_string()),
            assigned_manager: Some("Williams J.".to_string()),
            created_at: Some("2026-02-21T09:42:00Z".to_string()),
        },
    ]
}

pub fn sample_manager() -> ManagerProfile {
    ManagerProfile {
        id: "MGR-0017".to_string(),
        full_name: "Аида Нурланова".to_string(),
        role: "Senior Routing Manager".to_string(),
        office: "Алматы Центр".to_string(),
        department: "Customer Operations".to_string(),
        status: "online".to_string(),
        email: "a.nurlanova@fire.local".to_string(),
        phone: "+7 701 555 12 44".to_string(),
        shift: "08:00 - 17:00".to_string(),
        languages: vec!["RU".to_string(), "KZ".to_string(), "ENG".to_string()],
        skills: vec![
            "VIP Routing".to_string(),
            "Fraud Escalation".to_string(),
            "Data Change".to_string(),
        ],
        stats: ManagerStats {
            assigned_today: 28,
            in_progress: 6,
            sla_breaches: 1,
            avg_handle_time_min: 14,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_breakdowns_sum_to_total() {
        let stats = sample_stats();
        let total = stats.totals.tickets;
        for series in [
            &stats.by_city,
            &stats.by_type,
            &stats.by_office,
            &stats.by_sentiment,
            &stats.by_language,
        ] {
            assert_eq!(series.iter().map(|e| e.count).sum::<u64>(), total);
        }
    }
}
