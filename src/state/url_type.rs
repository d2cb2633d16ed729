/// The five traversal strategies a root (and its descendants) can be keyed by.
///
/// `max_depth` constraints per type are enforced at config-validation time
/// (see `config::validation`) and re-checked at dispatch time as the
/// `InvalidConfig` error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlType {
    /// Type 0: the root URL itself is the only candidate target. `max_depth` MUST be 0.
    DirectTarget,
    /// Type 1: a single listing page; every matching link on it is a target. `max_depth` MUST be 0.
    SinglePage,
    /// Type 2: root page yields targets + seeds; each seed is fetched once. `max_depth` MUST be 1.
    SeedTarget,
    /// Type 3: regex at depth 0, AI classifier at depth 1, regex-only targets at depth 2. `max_depth` MUST be 2.
    ComplexAi,
    /// Type 4: AI-driven classification until the last depth, then regex-only targets. `max_depth` MUST be >= 2.
    FullAi,
}

impl UrlType {
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            0 => Some(UrlType::DirectTarget),
            1 => Some(UrlType::SinglePage),
            2 => Some(UrlType::SeedTarget),
            3 => Some(UrlType::ComplexAi),
            4 => Some(UrlType::FullAi),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            UrlType::DirectTarget => 0,
            UrlType::SinglePage => 1,
            UrlType::SeedTarget => 2,
            UrlType::ComplexAi => 3,
            UrlType::FullAi => 4,
        }
    }

    /// Whether `max_depth` is a legal value for this type, per spec §4.6.
    pub fn max_depth_is_valid(&self, max_depth: u32) -> bool {
        match self {
            UrlType::DirectTarget | UrlType::SinglePage => max_depth == 0,
            UrlType::SeedTarget => max_depth == 1,
            UrlType::ComplexAi => max_depth == 2,
            UrlType::FullAi => max_depth >= 2,
        }
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            UrlType::DirectTarget => "DIRECT_TARGET",
            UrlType::SinglePage => "SINGLE_PAGE",
            UrlType::SeedTarget => "SEED_TARGET",
            UrlType::ComplexAi => "COMPLEX_AI",
            UrlType::FullAi => "FULL_AI",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "DIRECT_TARGET" => Some(UrlType::DirectTarget),
            "SINGLE_PAGE" => Some(UrlType::SinglePage),
            "SEED_TARGET" => Some(UrlType::SeedTarget),
            "COMPLEX_AI" => Some(UrlType::ComplexAi),
            "FULL_AI" => Some(UrlType::FullAi),
            _ => None,
        }
    }
}

impl std::fmt::Display for UrlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_round_trip() {
        for n in 0..=4u8 {
            let t = UrlType::from_ordinal(n).unwrap();
            assert_eq!(t.ordinal(), n);
        }
        assert!(UrlType::from_ordinal(5).is_none());
    }

    #[test]
    fn test_max_depth_constraints() {
        assert!(UrlType::DirectTarget.max_depth_is_valid(0));
        assert!(!UrlType::DirectTarget.max_depth_is_valid(1));
        assert!(UrlType::SeedTarget.max_depth_is_valid(1));
        assert!(!UrlType::SeedTarget.max_depth_is_valid(2));
        assert!(UrlType::ComplexAi.max_depth_is_valid(2));
        assert!(!UrlType::ComplexAi.max_depth_is_valid(3));
        assert!(UrlType::FullAi.max_depth_is_valid(2));
        assert!(UrlType::FullAi.max_depth_is_valid(5));
        assert!(!UrlType::FullAi.max_depth_is_valid(1));
    }

    #[test]
    fn test_db_string_round_trip() {
        for n in 0..=4u8 {
            let t = UrlType::from_ordinal(n).unwrap();
            assert_eq!(UrlType::from_db_string(t.to_db_string()), Some(t));
        }
    }
}
