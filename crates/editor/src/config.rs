use serde::Deserialize;

/// Editor tuning knobs, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Arrow length of the translation gizmo.
    pub axis_size: f64,
    /// Edge length of the translation plane handles.
    pub plane_size: f64,
    /// Radius of the rotation rings.
    pub ring_size: f64,
    /// Draw order of the gizmo layers; gizmos sit above regular layers.
    pub depth_order: i32,
    /// Notifications kept for inspection; `None` keeps everything.
    pub event_history: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            axis_size: 1.5,
            plane_size: 0.5,
            ring_size: 1.2,
            depth_order: 1000,
            event_history: Some(1024),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditorConfig;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "axis_size": 3.0 }"#).expect("config");
        assert_eq!(config.axis_size, 3.0);
        assert_eq!(config.depth_order, 1000);
        assert_eq!(config.event_history, Some(1024));
    }

    #[test]
    fn empty_json_is_default() {
        let config: EditorConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(config, EditorConfig::default());
    }
}
