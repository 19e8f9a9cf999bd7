use archview_core::Orientation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFeature {
    None,
    /// Draw injectors and providers as a second layer beside the main tree
    SecondaryLayerForInjector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeInfoLevel {
    #[default]
    Basic,
    Detail,
}

/// Layout parameters for one draw pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub orientation: Orientation,
    pub features: Vec<LayoutFeature>,
    pub info_level: NodeInfoLevel,
}

impl LayoutOptions {
    pub fn has_feature(&self, feature: LayoutFeature) -> bool {
        self.features.contains(&feature)
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::TopToBottom,
            features: vec![LayoutFeature::None],
            info_level: NodeInfoLevel::Basic,
        }
    }
}
