//! Language version + feature availability model.
//!
//! The parser accepts a superset grammar wherever the tree shape does not
//! depend on the version. A few constructs (`record`, `closed`, `file`) change
//! shape with the version; everything else is reported by the post-parse
//! feature gate pass using the tables below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered language versions; `Preview` is greater than every numbered version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LanguageVersion {
    CSharp7,
    CSharp7_1,
    CSharp7_2,
    CSharp7_3,
    CSharp8,
    CSharp9,
    CSharp10,
    CSharp11,
    CSharp12,
    CSharp13,
    CSharp14,
    Preview,
}

impl LanguageVersion {
    pub const LATEST: Self = LanguageVersion::CSharp14;

    pub const ALL: [LanguageVersion; 12] = [
        LanguageVersion::CSharp7,
        LanguageVersion::CSharp7_1,
        LanguageVersion::CSharp7_2,
        LanguageVersion::CSharp7_3,
        LanguageVersion::CSharp8,
        LanguageVersion::CSharp9,
        LanguageVersion::CSharp10,
        LanguageVersion::CSharp11,
        LanguageVersion::CSharp12,
        LanguageVersion::CSharp13,
        LanguageVersion::CSharp14,
        LanguageVersion::Preview,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::CSharp7 => "7.0",
            LanguageVersion::CSharp7_1 => "7.1",
            LanguageVersion::CSharp7_2 => "7.2",
            LanguageVersion::CSharp7_3 => "7.3",
            LanguageVersion::CSharp8 => "8.0",
            LanguageVersion::CSharp9 => "9.0",
            LanguageVersion::CSharp10 => "10.0",
            LanguageVersion::CSharp11 => "11.0",
            LanguageVersion::CSharp12 => "12.0",
            LanguageVersion::CSharp13 => "13.0",
            LanguageVersion::CSharp14 => "14.0",
            LanguageVersion::Preview => "preview",
        }
    }

    pub fn availability(self, feature: Feature) -> FeatureAvailability {
        match feature.stable_since() {
            Some(min) if self >= min => FeatureAvailability::Stable,
            Some(_) => FeatureAvailability::Unavailable,
            None if self == LanguageVersion::Preview => FeatureAvailability::Stable,
            None => FeatureAvailability::Preview,
        }
    }

    /// Is the feature usable in this configuration?
    pub fn is_enabled(self, feature: Feature) -> bool {
        self.availability(feature) == FeatureAvailability::Stable
    }

    #[inline]
    pub fn supports_records(self) -> bool {
        self.is_enabled(Feature::Records)
    }

    #[inline]
    pub fn supports_closed_classes(self) -> bool {
        self.is_enabled(Feature::ClosedClasses)
    }

    #[inline]
    pub fn supports_file_types(self) -> bool {
        self.is_enabled(Feature::FileTypes)
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        LanguageVersion::Preview
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language version `{0}`")]
pub struct LanguageVersionParseError(pub String);

impl FromStr for LanguageVersion {
    type Err = LanguageVersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let bare = normalized
            .strip_prefix("csharp")
            .unwrap_or(&normalized)
            .replace('_', ".");
        let version = match bare.as_str() {
            "preview" => LanguageVersion::Preview,
            "latest" | "latestmajor" | "default" => LanguageVersion::LATEST,
            "7" | "7.0" => LanguageVersion::CSharp7,
            "7.1" => LanguageVersion::CSharp7_1,
            "7.2" => LanguageVersion::CSharp7_2,
            "7.3" => LanguageVersion::CSharp7_3,
            "8" | "8.0" => LanguageVersion::CSharp8,
            "9" | "9.0" => LanguageVersion::CSharp9,
            "10" | "10.0" => LanguageVersion::CSharp10,
            "11" | "11.0" => LanguageVersion::CSharp11,
            "12" | "12.0" => LanguageVersion::CSharp12,
            "13" | "13.0" => LanguageVersion::CSharp13,
            "14" | "14.0" => LanguageVersion::CSharp14,
            _ => return Err(LanguageVersionParseError(s.to_string())),
        };
        Ok(version)
    }
}

impl Serialize for LanguageVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LanguageVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) if number.fract() == 0.0 => format!("{number:.0}"),
            Raw::Number(number) => number.to_string(),
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    RefStructs,                          // 7.2
    StaticLocalFunctions,                // 8
    Records,                             // 9
    InitOnlySetters,                     // 9
    TopLevelStatements,                  // 9
    DefaultTypeParameterConstraint,      // 9
    RecordStructs,                       // 10
    GlobalUsingDirectives,               // 10
    FileScopedNamespaces,                // 10
    StaticAbstractMembersInInterfaces,   // 11
    FileTypes,                           // 11
    RequiredMembers,                     // 11
    PrimaryConstructors,                 // 12
    ClosedClasses,                       // preview only
}

impl Feature {
    pub const fn diagnostic_name(self) -> &'static str {
        match self {
            Feature::RefStructs => "ref structs",
            Feature::StaticLocalFunctions => "static local functions",
            Feature::Records => "records",
            Feature::InitOnlySetters => "init-only setters",
            Feature::TopLevelStatements => "top-level statements",
            Feature::DefaultTypeParameterConstraint => "default type parameter constraints",
            Feature::RecordStructs => "record structs",
            Feature::GlobalUsingDirectives => "global using directive",
            Feature::FileScopedNamespaces => "file-scoped namespace",
            Feature::StaticAbstractMembersInInterfaces => "static abstract members in interfaces",
            Feature::FileTypes => "file types",
            Feature::RequiredMembers => "required members",
            Feature::PrimaryConstructors => "primary constructors",
            Feature::ClosedClasses => "closed classes",
        }
    }

    pub const fn stable_since(self) -> Option<LanguageVersion> {
        match self {
            Feature::RefStructs => Some(LanguageVersion::CSharp7_2),
            Feature::StaticLocalFunctions => Some(LanguageVersion::CSharp8),
            Feature::Records
            | Feature::InitOnlySetters
            | Feature::TopLevelStatements
            | Feature::DefaultTypeParameterConstraint => Some(LanguageVersion::CSharp9),
            Feature::RecordStructs
            | Feature::GlobalUsingDirectives
            | Feature::FileScopedNamespaces => Some(LanguageVersion::CSharp10),
            Feature::StaticAbstractMembersInInterfaces
            | Feature::FileTypes
            | Feature::RequiredMembers => Some(LanguageVersion::CSharp11),
            Feature::PrimaryConstructors => Some(LanguageVersion::CSharp12),
            Feature::ClosedClasses => None,
        }
    }
}

/// Whether the *language* supports a feature at a given version.
///
/// `Preview` means the feature only exists under the preview version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureAvailability {
    Unavailable,
    Preview,
    Stable,
}
