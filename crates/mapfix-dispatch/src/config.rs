//! Dispatcher configuration.
//!
//! Loading happens in two stages so failures can be told apart: the XML
//! header is first validated against the expected shape into
//! [`DispatcherSettings`] (plain strings), which are then compiled into a
//! [`DispatcherConfig`] (regexes and templates).
//!
//! ```xml
//! <MapFixer>
//!   <Comments regex="//[^\n]*|/\*(?s:.*?)\*/"/>
//!   <Switch regex="switch\s*\(\s*name\s*\)\s*\{([^}]*)\}" contentGroup="1">
//!     <Case strFormat="\t\tcase &quot;{0}&quot;: return level.{0};\r\n"/>
//!     <Default strFormat="\t\tdefault: return undefined;\r\n"/>
//!   </Switch>
//! </MapFixer>
//! ```

use regex::Regex;
use roxmltree::{Document, Node};

use crate::error::{Error, Result};
use crate::settings::extract_settings;
use crate::template::{CaseTemplate, unescape};

const ROOT_NODE: &str = "MapFixer";
const COMMENTS_NODE: &str = "Comments";
const SWITCH_NODE: &str = "Switch";
const CASE_NODE: &str = "Case";
const DEFAULT_NODE: &str = "Default";

/// Settings exactly as written in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    pub comment_regex: String,
    pub switch_regex: String,
    /// Capture group of `switch_regex` holding the generated region.
    pub content_group: usize,
    pub case_format: String,
    pub default_format: String,
}

impl DispatcherSettings {
    /// Validate a settings payload against the expected node layout.
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if !root.has_tag_name(ROOT_NODE) {
            return Err(Error::MissingNode { node: ROOT_NODE });
        }

        let comments = child(root, COMMENTS_NODE)?;
        let switch = child(root, SWITCH_NODE)?;
        let case = child(switch, CASE_NODE)?;
        let default = child(switch, DEFAULT_NODE)?;

        let group = attribute(switch, SWITCH_NODE, "contentGroup")?;
        let content_group = group
            .trim()
            .parse()
            .map_err(|_| Error::InvalidGroup {
                value: group.to_string(),
            })?;

        Ok(Self {
            comment_regex: attribute(comments, COMMENTS_NODE, "regex")?.to_string(),
            switch_regex: attribute(switch, SWITCH_NODE, "regex")?.to_string(),
            content_group,
            case_format: attribute(case, CASE_NODE, "strFormat")?.to_string(),
            default_format: attribute(default, DEFAULT_NODE, "strFormat")?.to_string(),
        })
    }
}

fn child<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>> {
    parent
        .children()
        .find(|n| n.has_tag_name(name))
        .ok_or(Error::MissingNode { node: name })
}

fn attribute<'a>(
    node: Node<'a, '_>,
    node_name: &'static str,
    attribute: &'static str,
) -> Result<&'a str> {
    node.attribute(attribute).ok_or(Error::MissingAttribute {
        node: node_name,
        attribute,
    })
}

/// Compiled rules for rewriting one dispatcher.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Matches comments, which are blanked before the switch is located.
    pub comment_pattern: Regex,
    /// Locates the switch statement.
    pub switch_pattern: Regex,
    pub switch_content_group: usize,
    pub case_template: CaseTemplate,
    /// Default entry with escapes already resolved.
    pub default_template: String,
}

impl DispatcherConfig {
    /// Compile validated settings.
    pub fn compile(settings: &DispatcherSettings) -> Result<Self> {
        let comment_pattern =
            Regex::new(&settings.comment_regex).map_err(|source| Error::InvalidRegex {
                node: COMMENTS_NODE,
                source,
            })?;
        let switch_pattern =
            Regex::new(&settings.switch_regex).map_err(|source| Error::InvalidRegex {
                node: SWITCH_NODE,
                source,
            })?;

        Ok(Self {
            comment_pattern,
            switch_pattern,
            switch_content_group: settings.content_group,
            case_template: CaseTemplate::new(&settings.case_format),
            default_template: unescape(&settings.default_format),
        })
    }

    /// Extract, validate and compile the header of a dispatcher file.
    pub fn from_dispatcher(content: &str) -> Result<Self> {
        let xml = extract_settings(content)?;
        let settings = DispatcherSettings::parse(&xml)?;
        Self::compile(&settings)
    }
}
