//! Page namespaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A MediaWiki namespace number.
///
/// Only the built-in namespaces have canonical names that every wiki
/// understands; anything else is carried as a bare number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(i32);

impl Namespace {
    pub const MEDIA: Namespace = Namespace(-2);
    pub const SPECIAL: Namespace = Namespace(-1);
    pub const MAIN: Namespace = Namespace(0);
    pub const TALK: Namespace = Namespace(1);
    pub const USER: Namespace = Namespace(2);
    pub const USER_TALK: Namespace = Namespace(3);
    pub const PROJECT: Namespace = Namespace(4);
    pub const PROJECT_TALK: Namespace = Namespace(5);
    pub const FILE: Namespace = Namespace(6);
    pub const FILE_TALK: Namespace = Namespace(7);
    pub const MEDIAWIKI: Namespace = Namespace(8);
    pub const MEDIAWIKI_TALK: Namespace = Namespace(9);
    pub const TEMPLATE: Namespace = Namespace(10);
    pub const TEMPLATE_TALK: Namespace = Namespace(11);
    pub const HELP: Namespace = Namespace(12);
    pub const HELP_TALK: Namespace = Namespace(13);
    pub const CATEGORY: Namespace = Namespace(14);
    pub const CATEGORY_TALK: Namespace = Namespace(15);

    /// Create a namespace from its number.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the namespace number.
    pub const fn id(&self) -> i32 {
        self.0
    }

    /// Returns the canonical (language-independent) name, if built in.
    ///
    /// The main namespace has the empty name.
    pub fn canonical_name(&self) -> Option<&'static str> {
        let name = match self.0 {
            -2 => "Media",
            -1 => "Special",
            0 => "",
            1 => "Talk",
            2 => "User",
            3 => "User talk",
            4 => "Project",
            5 => "Project talk",
            6 => "File",
            7 => "File talk",
            8 => "MediaWiki",
            9 => "MediaWiki talk",
            10 => "Template",
            11 => "Template talk",
            12 => "Help",
            13 => "Help talk",
            14 => "Category",
            15 => "Category talk",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for Namespace {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
