//! Error types for mapfix-dispatch

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] mapfix_fs::Error),

    #[error("Dispatcher has no `{sentinel}` settings header")]
    MissingSettings { sentinel: &'static str },

    #[error("Settings header is not well-formed XML: {0}")]
    SettingsXml(#[from] roxmltree::Error),

    #[error("Settings header is missing the <{node}> node")]
    MissingNode { node: &'static str },

    #[error("Settings node <{node}> is missing the `{attribute}` attribute")]
    MissingAttribute {
        node: &'static str,
        attribute: &'static str,
    },

    #[error("Settings attribute `contentGroup` must be a non-negative integer, got {value:?}")]
    InvalidGroup { value: String },

    #[error("Invalid regex in <{node}>: {source}")]
    InvalidRegex {
        node: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Switch regex did not match the dispatcher")]
    NoSwitchMatch,

    #[error("Switch regex has {groups} groups, contentGroup {group} is out of range")]
    GroupOutOfRange { group: usize, groups: usize },

    #[error("Switch regex group {group} did not participate in the match")]
    GroupNotMatched { group: usize },

    #[error("Switch region boundary at byte {offset} falls inside a character of a comment")]
    RegionSplitsCharacter { offset: usize },
}
