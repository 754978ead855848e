//! Viewer configuration.

use serde::{Deserialize, Serialize};

use placard_host::{PosterSize, SessionOptions};

use crate::placement::PlacementConfig;

fn default_image_source() -> String {
    "img/img.png".to_string()
}

/// Options for launching a [`Viewer`](crate::Viewer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerOptions {
    /// Identifier of the poster texture, opaque to the core.
    #[serde(default = "default_image_source")]
    pub image_source: String,
    /// Physical poster dimensions, fixed after creation.
    #[serde(default)]
    pub size: PosterSize,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub session: SessionOptions,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            image_source: default_image_source(),
            size: PosterSize::default(),
            placement: PlacementConfig::default(),
            session: SessionOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::PlacementPolicy;

    #[test]
    fn empty_document_yields_defaults() {
        let opts: ViewerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ViewerOptions::default());
        assert_eq!(opts.placement.policy, PlacementPolicy::Parent);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let opts: ViewerOptions = serde_json::from_str(
            r#"{"image_source":"img/other.png","placement":{"policy":"snapshot"}}"#,
        )
        .unwrap();
        assert_eq!(opts.image_source, "img/other.png");
        assert_eq!(opts.placement.policy, PlacementPolicy::Snapshot);
        assert_eq!(opts.size, PosterSize::default());
    }
}
