use crate::error::{Result, SearchError};

/// Tunables for the algorithms that take them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Number of cells beam search keeps after each expansion.
    pub beam_width: usize,
    /// Ceiling on the visited-cell count for iterative deepening.
    pub visit_limit: usize,
}

impl SearchConfig {
    pub const DEFAULT_BEAM_WIDTH: usize = 2;
    pub const DEFAULT_VISIT_LIMIT: usize = 100_000;

    /// Check that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(SearchError::InvalidConfig(
                "beam width must be at least 1".into(),
            ));
        }
        if self.visit_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "visit limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: Self::DEFAULT_BEAM_WIDTH,
            visit_limit: Self::DEFAULT_VISIT_LIMIT,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = SearchConfig {
            beam_width: 5,
            visit_limit: 42,
        };
        let json = serde_json::to_string(&c).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: SearchConfig = serde_json::from_str(r#"{"beam_width": 3}"#).unwrap();
        assert_eq!(back.beam_width, 3);
        assert_eq!(back.visit_limit, SearchConfig::DEFAULT_VISIT_LIMIT);
    }
}
