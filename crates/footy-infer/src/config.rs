use footy_image::Filter;

/// Ball detector settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub threshold: f32,
    pub tag: String,
    pub filter: Filter,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 0.10,
            tag: "soccer_ball".to_string(),
            filter: Filter::Bilinear,
        }
    }
}

impl DetectorConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}

/// Pose estimator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseConfig {
    /// Keypoints scoring above this contribute to the person box.
    pub visibility_threshold: f32,
    /// Margin added around the keypoints on every side.
    pub padding: f32,
    pub filter: Filter,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.2,
            padding: 0.05,
            filter: Filter::Nearest,
        }
    }
}

impl PoseConfig {
    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }
}
