use crate::error::LayoutConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_X: f64 = 100.0;
pub const DEFAULT_START_Y: f64 = 100.0;
pub const DEFAULT_HORIZONTAL_GAP: f64 = 50.0;
pub const DEFAULT_VERTICAL_GAP: f64 = 120.0;
pub const DEFAULT_TIER_GAP: f64 = 300.0;
pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;

/// Placement constants. Every key is optional in JSON and falls back to its
/// `DEFAULT_*` constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub start_x: f64,
    pub start_y: f64,
    /// Right-hand margin of the drawing bounds.
    pub horizontal_gap: f64,
    /// Distance between consecutive nodes of one tier.
    pub vertical_gap: f64,
    /// Distance between tier columns.
    pub tier_gap: f64,
    pub node_width: f64,
    pub node_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: DEFAULT_START_X,
            start_y: DEFAULT_START_Y,
            horizontal_gap: DEFAULT_HORIZONTAL_GAP,
            vertical_gap: DEFAULT_VERTICAL_GAP,
            tier_gap: DEFAULT_TIER_GAP,
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
        }
    }
}

impl LayoutConfig {
    /// Parses a partial configuration and validates the result.
    pub fn from_json(json: &str) -> Result<Self, LayoutConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)
            .map_err(|e| LayoutConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_start(mut self, x: f64, y: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self
    }

    pub fn with_tier_gap(mut self, tier_gap: f64) -> Self {
        self.tier_gap = tier_gap;
        self
    }

    pub fn with_vertical_gap(mut self, vertical_gap: f64) -> Self {
        self.vertical_gap = vertical_gap;
        self
    }

    pub fn with_horizontal_gap(mut self, horizontal_gap: f64) -> Self {
        self.horizontal_gap = horizontal_gap;
        self
    }

    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// Start coordinates must be finite; gaps and sizes finite and non-negative, and
    /// `tierGap` above zero so tiers get distinct columns.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        for (key, value) in [("startX", self.start_x), ("startY", self.start_y)] {
            if !value.is_finite() {
                return Err(LayoutConfigError::InvalidValue { key, value });
            }
        }
        for (key, value) in [
            ("horizontalGap", self.horizontal_gap),
            ("verticalGap", self.vertical_gap),
            ("tierGap", self.tier_gap),
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutConfigError::InvalidValue { key, value });
            }
        }
        if self.tier_gap == 0.0 {
            return Err(LayoutConfigError::InvalidValue {
                key: "tierGap",
                value: self.tier_gap,
            });
        }
        Ok(())
    }
}
