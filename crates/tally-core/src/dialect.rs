//! Dialect descriptors for backend-native results files.
//!
//! Backends disagree on every naming detail of their XML results: what marks
//! a test case, where the case name lives, where the status lives, and which
//! token means "pass". A `Dialect` captures those four facts declaratively so
//! the resolver stays generic — registering a new backend means writing a
//! descriptor, not a parser.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Where a case's raw status string is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum StatusField {
    /// Text body of a child element: `<TestCase><Result>pass</Result></TestCase>`.
    ChildText { element: String },
    /// Attribute on a child element: `<test><status status="PASS">msg</status></test>`.
    /// The child's text body doubles as the case message.
    ChildAttr { element: String, attr: String },
    /// Attribute on the case element itself.
    Attr { attr: String },
}

/// The field/attribute vocabulary of one backend's results format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    pub name: String,
    /// Element name marking one test case, matched anywhere in the document.
    pub case_element: String,
    /// Attribute keys tried in order for the case name.
    pub name_attrs: Vec<String>,
    pub status: StatusField,
    /// Token that means "pass"; compared case-insensitively.
    pub pass_token: String,
}

impl Dialect {
    /// QTest binaries: `<TestCase name="..."><Result>pass</Result></TestCase>`,
    /// with the name attribute seen both lower- and uppercased in the wild.
    pub fn qtest() -> Self {
        Self {
            name: "qtest".into(),
            case_element: "TestCase".into(),
            name_attrs: vec!["name".into(), "Name".into()],
            status: StatusField::ChildText {
                element: "Result".into(),
            },
            pass_token: "pass".into(),
        }
    }

    /// Robot Framework output.xml: `<test name="..."><status status="PASS">msg</status></test>`.
    pub fn robot() -> Self {
        Self {
            name: "robot".into(),
            case_element: "test".into(),
            name_attrs: vec!["name".into()],
            status: StatusField::ChildAttr {
                element: "status".into(),
                attr: "status".into(),
            },
            pass_token: "PASS".into(),
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "qtest" => Some(Self::qtest()),
            "robot" => Some(Self::robot()),
            _ => None,
        }
    }

    /// Load a custom descriptor from a YAML (or JSON) file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dialect file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse dialect file {}", path.display()))
    }
}
