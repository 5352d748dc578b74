// ABOUTME: Configuration for the dead-link and section passes, plus the Transformer builder.
// ABOUTME: Options deserialize from camelCase JSON and accept the older plugin option names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};
use crate::transform::Transformer;

/// How a dead link is neutralized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Retag as `span` and drop `href`.
    Unlink,
    /// Append the marker class and keep `href`.
    Mark,
    /// Both of the above.
    UnlinkAndMark,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Disposition::Unlink => "unlink",
            Disposition::Mark => "mark",
            Disposition::UnlinkAndMark => "unlink+mark",
        };
        write!(f, "{}", s)
    }
}

/// Options for the dead-link pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeadLinkOptions {
    #[serde(alias = "addCssClass")]
    pub add_marker_class: bool,
    #[serde(alias = "cssClassName")]
    pub marker_class_name: String,
    #[serde(alias = "removeLinkCompletely")]
    pub remove_completely: bool,
}

impl Default for DeadLinkOptions {
    fn default() -> Self {
        Self {
            add_marker_class: false,
            marker_class_name: "dead-link".to_string(),
            remove_completely: false,
        }
    }
}

impl DeadLinkOptions {
    /// `remove_completely` wins over `add_marker_class`; neither means both.
    pub fn disposition(&self) -> Disposition {
        if self.remove_completely {
            Disposition::Unlink
        } else if self.add_marker_class {
            Disposition::Mark
        } else {
            Disposition::UnlinkAndMark
        }
    }
}

/// Options for the section pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionOptions {
    #[serde(alias = "frontmatterField")]
    pub metadata_field: String,
    #[serde(alias = "removeHeading")]
    pub remove_heading_itself: bool,
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            metadata_field: "remove_sections".to_string(),
            remove_heading_itself: true,
        }
    }
}

/// Options for both passes, as read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    pub dead_links: DeadLinkOptions,
    pub sections: SectionOptions,
}

impl TransformOptions {
    /// Parse options from JSON; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let opts: TransformOptions = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject values that would produce broken markup.
    pub fn validate(&self) -> Result<()> {
        let class = &self.dead_links.marker_class_name;
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(TransformError::invalid_options(format!(
                "marker class name must be a single non-empty token, got {:?}",
                class
            )));
        }
        if self.sections.metadata_field.trim().is_empty() {
            return Err(TransformError::invalid_options(
                "metadata field name must not be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for constructing Transformer instances with custom configuration.
#[derive(Debug, Clone)]
pub struct TransformerBuilder {
    opts: TransformOptions,
    dead_links: bool,
    sections: bool,
}

impl TransformerBuilder {
    /// Create a new TransformerBuilder with default options and both passes on.
    pub fn new() -> Self {
        Self {
            opts: TransformOptions::default(),
            dead_links: true,
            sections: true,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, opts: TransformOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Keep `href` and only add the marker class to dead links.
    pub fn add_marker_class(mut self, enabled: bool) -> Self {
        self.opts.dead_links.add_marker_class = enabled;
        self
    }

    /// Set the class appended to dead links.
    pub fn marker_class_name(mut self, name: impl Into<String>) -> Self {
        self.opts.dead_links.marker_class_name = name.into();
        self
    }

    /// Turn dead links into plain spans without a marker class.
    pub fn remove_completely(mut self, enabled: bool) -> Self {
        self.opts.dead_links.remove_completely = enabled;
        self
    }

    /// Set the frontmatter field holding the section titles.
    pub fn metadata_field(mut self, field: impl Into<String>) -> Self {
        self.opts.sections.metadata_field = field.into();
        self
    }

    /// Remove the matching heading along with its section.
    pub fn remove_heading_itself(mut self, enabled: bool) -> Self {
        self.opts.sections.remove_heading_itself = enabled;
        self
    }

    /// Enable or disable the dead-link pass.
    pub fn dead_links(mut self, enabled: bool) -> Self {
        self.dead_links = enabled;
        self
    }

    /// Enable or disable the section pass.
    pub fn sections(mut self, enabled: bool) -> Self {
        self.sections = enabled;
        self
    }

    /// Build the Transformer, validating the configured options.
    pub fn build(self) -> Result<Transformer> {
        self.opts.validate()?;
        Ok(Transformer::new(self.opts, self.dead_links, self.sections))
    }
}

impl Default for TransformerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
