use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// レコード時刻はミリ秒精度（ISO-8601, UTC）に揃える
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// `<prefix>-<unix millis>-<8 hex>` 形式のIDを生成する
#[derive(Debug, Clone, Copy, Default)]
pub struct IdGenerator;

impl IdGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, prefix: &str) -> String {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        format!("{prefix}-{millis}-{}", &random[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_carry_prefix_and_are_unique() {
        let ids = IdGenerator::new();
        let generated: HashSet<String> = (0..500).map(|_| ids.generate("patient")).collect();
        assert_eq!(generated.len(), 500);
        assert!(generated.iter().all(|id| id.starts_with("patient-")));
    }

    #[test]
    fn id_has_three_segments() {
        let id = IdGenerator::new().generate("audit");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn now_is_millisecond_precision() {
        let ts = now();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
