//! Rule-set parsing and normalization

use crate::{Error, Result};
use serde::de::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One field's drawing rule: where and how to stamp its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Record field the value is resolved from
    pub field: String,
    /// Draw instructions; a field may be stamped at several positions or as
    /// several primitives
    pub instructions: Vec<Instruction>,
}

/// A single draw instruction: `[x, y, options?]` in rule-source form.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// X position in points
    pub x: f64,
    /// Y position in points
    pub y: f64,
    /// Caller-supplied drawing options, unresolved
    pub options: Map<String, Value>,
}

impl Instruction {
    fn from_parts(parts: &[Value]) -> std::result::Result<Self, String> {
        if parts.len() < 2 || parts.len() > 3 {
            return Err(format!(
                "draw instruction must be [x, y, options?], got {} elements",
                parts.len()
            ));
        }

        let x = parts[0]
            .as_f64()
            .ok_or("x position must be a number".to_string())?;
        let y = parts[1]
            .as_f64()
            .ok_or("y position must be a number".to_string())?;

        let options = match parts.get(2) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map.clone(),
            Some(other) => return Err(format!("options must be a mapping, got {other}")),
        };

        Ok(Self { x, y, options })
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = Vec::<Value>::deserialize(deserializer)?;
        Instruction::from_parts(&parts).map_err(serde::de::Error::custom)
    }
}

/// A rule-source entry is either one instruction or a sequence of them.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RuleEntry {
    One(Instruction),
    Many(Vec<Instruction>),
}

/// The parsed rule set: field name to draw instructions.
///
/// Single-instruction entries are normalized to one-element sequences at
/// parse time, so the interpreter sees a uniform shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Load rules from a file path or an inline JSON mapping.
    ///
    /// The source is first treated as a path; when no such file exists it is
    /// parsed as inline JSON. An empty source is a configuration error.
    pub fn load(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Err(Error::EmptyRules);
        }

        match fs::read_to_string(source) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => Self::from_json(source),
        }
    }

    /// Load rules from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse rules from an inline JSON mapping.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Err(Error::EmptyRules);
        }

        let entries: BTreeMap<String, RuleEntry> =
            serde_json::from_str(json).map_err(|e| Error::Rules(e.to_string()))?;

        let rules = entries
            .into_iter()
            .map(|(field, entry)| Rule {
                field,
                instructions: match entry {
                    RuleEntry::One(instruction) => vec![instruction],
                    RuleEntry::Many(instructions) => instructions,
                },
            })
            .collect();

        Ok(Self { rules })
    }

    /// All rules, one per field.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of fields covered by this rule set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
