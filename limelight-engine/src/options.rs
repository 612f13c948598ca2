//! Engine configuration
//!
//! `Options` is the resolved store; `OptionsUpdate` is a patch that
//! `configure` shallow-merges into it, last write winning. Values are not
//! validated beyond their types.

use alloc::string::String;
use alloc::vec::Vec;

use limelight_dom::NodeId;

/// How the inspector overlay element is supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InspectorSpec {
    /// Not supplied; pair with `create_inspector` to auto-create one.
    #[default]
    None,
    /// A selector resolved against the main document on start.
    Selector(String),
    /// An explicit element.
    Element(NodeId),
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// The inspector overlay element, or how to find it.
    pub inspector: InspectorSpec,
    /// Tag the root document element with a namespace class while running.
    pub html_class: bool,
    /// Veto navigation while running.
    pub block_redirection: bool,
    /// Auto-create the overlay when none is supplied.
    pub create_inspector: bool,
    /// Selectors whose matches never become inspection targets.
    pub excludes: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inspector: InspectorSpec::None,
            html_class: true,
            block_redirection: false,
            create_inspector: false,
            excludes: Vec::new(),
        }
    }
}

impl Options {
    /// Shallow-merge an update: every provided field overwrites the
    /// stored value.
    pub fn apply(&mut self, update: OptionsUpdate) {
        if let Some(inspector) = update.inspector {
            self.inspector = inspector;
        }
        if let Some(html_class) = update.html_class {
            self.html_class = html_class;
        }
        if let Some(block_redirection) = update.block_redirection {
            self.block_redirection = block_redirection;
        }
        if let Some(create_inspector) = update.create_inspector {
            self.create_inspector = create_inspector;
        }
        if let Some(excludes) = update.excludes {
            self.excludes = excludes;
        }
    }
}

/// A configuration patch; `None` fields leave the store untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsUpdate {
    pub inspector: Option<InspectorSpec>,
    pub html_class: Option<bool>,
    pub block_redirection: Option<bool>,
    pub create_inspector: Option<bool>,
    pub excludes: Option<Vec<String>>,
}
