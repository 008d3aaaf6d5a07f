//! Configuration for the rule core.

/// Tunables for command resolution.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    /// Minimum Jaro-Winkler similarity for a fuzzy item match (0.0-1.0).
    pub fuzzy_threshold: f64,
    /// Keyword separating a direct object from an instrument ("door with key").
    pub connective: String,
    /// Item name tried by `light` when the command names nothing.
    pub default_light_source: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.8,
            connective: "with".to_string(),
            default_light_source: "candle".to_string(),
        }
    }
}

impl RulesConfig {
    /// Set the fuzzy match threshold (clamped to 0.0-1.0).
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the connective keyword.
    pub fn with_connective(mut self, connective: impl Into<String>) -> Self {
        self.connective = connective.into();
        self
    }

    /// Set the default light source name.
    pub fn with_default_light_source(mut self, name: impl Into<String>) -> Self {
        self.default_light_source = name.into();
        self
    }
}
