//! The [`Catalog`] value and its lookups.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::tables::{
    CC_MACROS, CREATE_METHODS, DEPRECATED_V3, IGNORED_HEADERS, OBJC_TO_CPP, STATIC_METHODS,
    V2_TO_V3,
};

/// Prefix applied to engine identifiers that must be namespace-qualified.
pub const TARGET_NAMESPACE: &str = "cocos2d::";

/// Which Cocos2d-x generation the output targets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetVersion {
    /// Cocos2d-x 2.x (the `CC`-prefixed API).
    #[default]
    V2,
    /// Cocos2d-x 3.x: containers and `CCObject` renamed on top of the 2.x map.
    V3,
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetVersion::V2 => write!(f, "v2"),
            TargetVersion::V3 => write!(f, "v3"),
        }
    }
}

impl FromStr for TargetVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v2" | "2" | "2.x" => Ok(TargetVersion::V2),
            "v3" | "3" | "3.x" => Ok(TargetVersion::V3),
            other => Err(format!("unknown target version `{other}` (expected v2 or v3)")),
        }
    }
}

/// Immutable identifier vocabulary for one target version.
#[derive(Clone, Debug)]
pub struct Catalog {
    version: TargetVersion,
    identifiers: FxHashMap<&'static str, &'static str>,
    macros: FxHashSet<&'static str>,
    factory_methods: FxHashSet<&'static str>,
    static_methods: FxHashMap<&'static str, &'static str>,
    deprecated: FxHashSet<&'static str>,
    ignored_headers: FxHashSet<&'static str>,
}

impl Catalog {
    /// Build the catalog for `version`.
    ///
    /// For [`TargetVersion::V3`] the 3.x renames are composed onto the 2.x
    /// map up front, so every identifier lookup stays a single probe.
    pub fn new(version: TargetVersion) -> Self {
        let mut identifiers: FxHashMap<&'static str, &'static str> =
            OBJC_TO_CPP.iter().copied().collect();
        let mut deprecated = FxHashSet::default();

        if version == TargetVersion::V3 {
            let upgrades: FxHashMap<&'static str, &'static str> =
                V2_TO_V3.iter().copied().collect();
            for target in identifiers.values_mut() {
                if let Some(&upgraded) = upgrades.get(*target) {
                    *target = upgraded;
                }
            }
            for (&v2, &v3) in &upgrades {
                identifiers.entry(v2).or_insert(v3);
            }
            deprecated.extend(DEPRECATED_V3.iter().copied());
        }

        Catalog {
            version,
            identifiers,
            macros: CC_MACROS.iter().copied().collect(),
            factory_methods: CREATE_METHODS.iter().copied().collect(),
            static_methods: STATIC_METHODS.iter().copied().collect(),
            deprecated,
            ignored_headers: IGNORED_HEADERS.iter().copied().collect(),
        }
    }

    /// The target version this catalog was built for.
    pub fn version(&self) -> TargetVersion {
        self.version
    }

    /// Translate an identifier, optionally qualifying engine names.
    ///
    /// Unknown names come back unchanged. With `qualify`, a result whose
    /// first two characters are `cc` (any case) and which is not an engine
    /// macro gets the [`TARGET_NAMESPACE`] prefix.
    pub fn translate_identifier<'a>(&self, name: &'a str, qualify: bool) -> Cow<'a, str> {
        let mapped: &'a str = self.identifiers.get(name).copied().unwrap_or(name);
        if qualify && self.is_engine_type(mapped) {
            Cow::Owned(format!("{TARGET_NAMESPACE}{mapped}"))
        } else {
            Cow::Borrowed(mapped)
        }
    }

    /// Translate the selector of a message send into a call opener.
    ///
    /// Factory constructors become `::create(`, renamed class methods their
    /// static replacement. Anything else is an instance call (`->name(`)
    /// unless `preceding_word` looks like a class name, which makes it a
    /// scoped static call (`::name(`).
    pub fn translate_method_call(&self, method: &str, preceding_word: Option<&str>) -> String {
        if self.factory_methods.contains(method) {
            return "::create(".to_owned();
        }
        if let Some(renamed) = self.static_methods.get(method) {
            return format!("::{renamed}(");
        }
        let scope = if preceding_word.is_some_and(looks_like_type_name) {
            "::"
        } else {
            "->"
        };
        format!("{scope}{method}(")
    }

    /// Whether an `#import` of `header` should be commented out.
    pub fn is_ignored_header(&self, header: &str) -> bool {
        self.ignored_headers.contains(header)
    }

    /// Whether `name` is an engine macro (never namespace-qualified).
    pub fn is_macro(&self, name: &str) -> bool {
        self.macros.contains(name)
    }

    /// Whether `name` is deprecated in the targeted engine version.
    ///
    /// Always false for [`TargetVersion::V2`].
    pub fn is_deprecated(&self, name: &str) -> bool {
        self.deprecated.contains(name)
    }

    fn is_engine_type(&self, name: &str) -> bool {
        name.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("cc")) && !self.is_macro(name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(TargetVersion::default())
    }
}

/// Capitalization heuristic: does `word` look like a class name?
///
/// True when the first character is uppercase and the word is not entirely
/// uppercase. This is only a guess: `URLCache`-style names pass, but so does
/// a capitalized local variable, and a lowercase class name fails. Without a
/// symbol table there is nothing better to go on.
pub fn looks_like_type_name(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase) && word.chars().any(char::is_lowercase)
}
