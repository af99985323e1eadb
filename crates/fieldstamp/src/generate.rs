//! Document generation - the rule interpreter

use crate::align::aligned_x;
use crate::options::{self, ResolvedOptions};
use crate::record::{value_to_string, Record};
use crate::ruleset::{Instruction, RuleSet};
use crate::{Error, Result};
use canvas::Canvas;
use log::debug;
use serde_json::Value;
use std::path::Path;

/// Interprets a rule set against data records, drawing onto one canvas.
///
/// The canvas is owned for the lifetime of one document-generation session:
/// construct the generator, call [`generate`](Self::generate) once per
/// record, then take the canvas back with [`into_canvas`](Self::into_canvas).
pub struct Generator<C> {
    rules: RuleSet,
    canvas: C,
}

impl<C: Canvas> Generator<C> {
    pub fn new(rules: RuleSet, canvas: C) -> Self {
        Self { rules, canvas }
    }

    /// Load rules from a file path or inline JSON and wrap the canvas.
    pub fn from_source(source: &str, canvas: C) -> Result<Self> {
        Ok(Self::new(RuleSet::load(source)?, canvas))
    }

    /// Render every rule against `record`.
    ///
    /// Fields whose resolved value is absent or `null` are skipped silently.
    /// Any other failure aborts the whole pass: there is no per-field
    /// recovery, a single bad instruction fails the document.
    pub fn generate<R: Record>(&mut self, record: &R) -> Result<()> {
        let Self { rules, canvas } = self;

        for rule in rules.rules() {
            let value = match record.field(&rule.field) {
                None | Some(Value::Null) => {
                    debug!("field '{}' has no value, skipping", rule.field);
                    continue;
                }
                Some(value) => value,
            };

            for instruction in &rule.instructions {
                let resolved = options::resolve(Some(&instruction.options));
                dispatch(canvas, &rule.field, &value, instruction, &resolved)?;
            }
        }

        Ok(())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Hand the canvas back when generation completes.
    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

/// Invoke the primitive named by the resolved `type`.
fn dispatch<C: Canvas>(
    canvas: &mut C,
    field: &str,
    value: &Value,
    instruction: &Instruction,
    resolved: &ResolvedOptions,
) -> Result<()> {
    let text = value_to_string(value);
    debug!(
        "drawing field '{}' as {} at ({}, {})",
        field, resolved.kind, instruction.x, instruction.y
    );

    match resolved.kind.as_str() {
        "text" => {
            let style = resolved.text_style()?;
            let x = aligned_x(&*canvas, &text, instruction.x, resolved.align, &style)?;
            canvas.draw_text(&text, x, instruction.y, &style)?;
        }
        "barcode" => {
            let key = resolved.symbology().unwrap_or_default();
            let encoder = symbology::encode(&key, &text)?;
            canvas.draw_barcode(
                encoder.modules(),
                instruction.x,
                instruction.y,
                &resolved.barcode_style()?,
            )?;
        }
        "image" => {
            canvas.draw_image(
                Path::new(&text),
                instruction.x,
                instruction.y,
                resolved.dimension("width"),
                resolved.dimension("height"),
            )?;
        }
        other => return Err(Error::UnknownPrimitive(other.to_string())),
    }

    Ok(())
}
