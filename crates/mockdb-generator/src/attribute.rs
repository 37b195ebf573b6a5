//! Attributes: concrete columns and foreign-key references.
//!
//! A foreign key is built holding only the names it refers to. The schema
//! later resolves it into a [`Binding`]; from then on its type and length are
//! those of the column at the end of the reference chain.

use crate::generators::date::{date_from_scalar, duration_from_parts};
use crate::generators::ValueGenerator;
use crate::options::GenerationContext;
use chrono::TimeDelta;
use mockdb_core::{
    AttributeDocument, DbType, Error, GeneratedValue, GenerationMode, Pattern, Result,
    StepDocument,
};
use std::sync::Arc;

/// Length of a string column when the document does not give one.
pub const DEFAULT_STRING_LENGTH: usize = 10;

/// Position of an attribute inside a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeRef {
    pub table: usize,
    pub attribute: usize,
}

impl AttributeRef {
    pub fn new(table: usize, attribute: usize) -> Self {
        Self { table, attribute }
    }
}

/// Resolved foreign-key target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// Attribute named by the reference
    pub target: AttributeRef,
    /// Concrete column at the end of the reference chain
    pub root: AttributeRef,
    /// Type of the root column
    pub db_type: DbType,
    /// Number of references followed to reach the root (1 for a direct key)
    pub depth: usize,
}

/// Generation settings of a concrete column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub db_type: DbType,
    pub mode: GenerationMode,
    /// Never set for strings
    pub start: Option<GeneratedValue>,
    /// Step, bound or modulus; `None` for strings
    pub step: Option<Pattern>,
    /// Declared length; only strings carry one
    pub length: Option<usize>,
}

impl Column {
    /// Column with every setting at its default: Random mode, no start, a
    /// step of one unit and strings of length 10.
    pub fn new(db_type: DbType) -> Self {
        let (step, length) = match db_type {
            DbType::String => (None, Some(DEFAULT_STRING_LENGTH)),
            other => (Some(default_step(other)), None),
        };
        Self {
            db_type,
            mode: GenerationMode::Random,
            start: None,
            step,
            length,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Result<Self> {
        self.db_type.check_mode(mode)?;
        self.mode = mode;
        Ok(self)
    }

    pub fn with_start(mut self, start: impl Into<GeneratedValue>) -> Result<Self> {
        if self.db_type == DbType::String {
            return Err(string_start_error());
        }
        self.start = Some(start.into());
        Ok(self)
    }

    pub fn with_step(mut self, step: impl Into<Pattern>) -> Self {
        self.step = Some(step.into());
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Build a column from its document entry.
    pub fn from_document(db_type: DbType, doc: &AttributeDocument) -> Result<Self> {
        let mut column = Column::new(db_type);

        if let Some(generation) = &doc.generation {
            column = column.with_mode(generation.parse()?)?;
        }

        if let Some(start) = &doc.start {
            let start = match db_type {
                DbType::String => return Err(string_start_error()),
                DbType::Integer => GeneratedValue::Integer(start.as_i64().ok_or_else(|| {
                    Error::invalid(format!("start '{start}' is not an integer"))
                })?),
                DbType::Real => GeneratedValue::Real(start.as_f64().ok_or_else(|| {
                    Error::invalid(format!("start '{start}' is not a number"))
                })?),
                DbType::Date => GeneratedValue::Date(date_from_scalar(start)?),
            };
            column.start = Some(start);
        }

        if let Some(step) = &doc.step {
            column.step = parse_step(db_type, step)?;
        }

        if let Some(length) = &doc.length {
            if db_type == DbType::String {
                let length = length.as_usize().ok_or_else(|| {
                    Error::invalid(format!("length '{length}' is not a non-negative integer"))
                })?;
                column.length = Some(length);
            } else {
                tracing::debug!("Ignoring 'length' on a {db_type} attribute");
            }
        }

        Ok(column)
    }

    /// Pattern handed to the generator: the length for strings, else the step.
    pub fn pattern(&self) -> Pattern {
        match self.db_type {
            DbType::String => Pattern::Count(self.length.unwrap_or(DEFAULT_STRING_LENGTH)),
            other => self.step.unwrap_or_else(|| default_step(other)),
        }
    }

    /// Generate `quantity` values, updating the length of realistic strings to
    /// the longest produced value.
    pub fn generate(
        &mut self,
        quantity: usize,
        ctx: &mut GenerationContext,
    ) -> Result<Vec<GeneratedValue>> {
        let mut generator = ValueGenerator::new(
            self.db_type,
            quantity,
            self.mode,
            self.start.clone(),
            ctx.words.clone(),
        )?;
        let values = generator.generate_all(self.pattern(), &mut ctx.rng)?;

        if self.mode.is_realistic() {
            if let Some(longest) = values.iter().map(GeneratedValue::char_len).max() {
                self.length = Some(longest);
            }
        }
        Ok(values)
    }
}

/// Default step of a non-string column: one unit, or one day for dates.
pub fn default_step(db_type: DbType) -> Pattern {
    match db_type {
        DbType::Integer => Pattern::Integer(1),
        DbType::Real => Pattern::Real(1.0),
        DbType::Date => Pattern::Duration(TimeDelta::days(1)),
        DbType::String => Pattern::Count(DEFAULT_STRING_LENGTH),
    }
}

/// Step of a non-string column. STRING columns take `length`, so their step is dropped.
fn parse_step(db_type: DbType, step: &StepDocument) -> Result<Option<Pattern>> {
    let pattern = match (db_type, step) {
        (DbType::String, _) => return Ok(None),
        (DbType::Integer, StepDocument::Scalar(s)) => s
            .as_i64()
            .map(Pattern::Integer)
            .ok_or_else(|| Error::invalid(format!("step '{s}' is not an integer"))),
        (DbType::Real, StepDocument::Scalar(s)) => s
            .as_f64()
            .map(Pattern::Real)
            .ok_or_else(|| Error::invalid(format!("step '{s}' is not a number"))),
        (DbType::Date, StepDocument::Duration(parts)) => {
            duration_from_parts(parts).map(Pattern::Duration)
        }
        (DbType::Date, StepDocument::Scalar(s)) => Err(Error::invalid(format!(
            "step '{s}' for a DATE attribute must be an object such as {{\"days\": 1}}"
        ))),
        (db_type, StepDocument::Duration(_)) => Err(Error::invalid(format!(
            "step for a {db_type} attribute must be a number"
        ))),
    };
    pattern.map(Some)
}

fn string_start_error() -> Error {
    Error::invalid("a starting value cannot be given for type STRING")
}

/// A foreign-key reference, by name until resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub table: String,
    pub attribute: String,
    pub binding: Option<Binding>,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            attribute: attribute.into(),
            binding: None,
        }
    }

    /// The binding, or `UnresolvedReference` if resolution has not run.
    pub fn binding(&self) -> Result<Binding> {
        self.binding.ok_or_else(|| Error::UnresolvedReference {
            table: self.table.clone(),
            attribute: Some(self.attribute.clone()),
        })
    }

    fn from_references(references: Option<&serde_json::Value>) -> Result<Self> {
        let references = references.ok_or_else(|| {
            Error::invalid("it is a foreign key but no references are given")
        })?;
        let object = references.as_object().ok_or_else(|| {
            Error::invalid(
                "foreign key references must be an object with keys 'table' and 'attribute'",
            )
        })?;

        let key = |name: &str| -> Result<String> {
            match object.get(name) {
                Some(serde_json::Value::String(value)) => Ok(value.clone()),
                Some(other) => Err(Error::invalid(format!(
                    "foreign key references key '{name}' must be a string, got {other}"
                ))),
                None => Err(Error::invalid(format!(
                    "foreign key references is missing '{name}' key"
                ))),
            }
        };

        Ok(ForeignKey::new(key("table")?, key("attribute")?))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    Column(Column),
    ForeignKey(ForeignKey),
}

/// Named attribute of a table, with its generated data once populated.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    data: Option<Arc<[GeneratedValue]>>,
}

/// What a foreign key needs to know about its target to populate itself.
#[derive(Debug, Clone)]
pub(crate) struct ForeignSource {
    /// Data of the referenced attribute, if already populated
    pub data: Option<Arc<[GeneratedValue]>>,
    pub db_type: DbType,
    /// Length of the root column
    pub length: Option<usize>,
}

impl Attribute {
    pub fn column(name: impl Into<String>, column: Column) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Column(column),
            data: None,
        }
    }

    pub fn foreign_key(
        name: impl Into<String>,
        table: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::ForeignKey(ForeignKey::new(table, attribute)),
            data: None,
        }
    }

    /// Build an attribute from its document entry.
    ///
    /// Errors are wrapped with the attribute name when it is known.
    pub fn from_document(doc: &AttributeDocument) -> Result<Self> {
        let name = doc
            .name
            .clone()
            .ok_or_else(|| Error::invalid("an attribute is missing required key 'name'"))?;
        Self::build(&name, doc).map_err(|e| e.in_attribute(&name))
    }

    fn build(name: &str, doc: &AttributeDocument) -> Result<Self> {
        let attribute_type = doc
            .attribute_type
            .as_deref()
            .ok_or_else(|| Error::invalid("missing required key 'type'"))?;

        if doc.is_foreign_key() {
            for (key, present) in [
                ("start", doc.start.is_some()),
                ("step", doc.step.is_some()),
                ("length", doc.length.is_some()),
                ("generation", doc.generation.is_some()),
            ] {
                if present {
                    tracing::warn!(
                        "Ignoring '{key}' on foreign key attribute '{name}', it follows the referenced attribute"
                    );
                }
            }
            let fk = ForeignKey::from_references(doc.references.as_ref())?;
            return Ok(Self {
                name: name.to_string(),
                kind: AttributeKind::ForeignKey(fk),
                data: None,
            });
        }

        let db_type: DbType = attribute_type.parse()?;
        if db_type == DbType::String && doc.step.is_some() {
            tracing::warn!("Ignoring 'step' on STRING attribute '{name}', 'length' is used instead");
        }
        Ok(Self::column(name, Column::from_document(db_type, doc)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn is_foreign_key(&self) -> bool {
        matches!(self.kind, AttributeKind::ForeignKey(_))
    }

    pub fn as_column(&self) -> Option<&Column> {
        match &self.kind {
            AttributeKind::Column(column) => Some(column),
            AttributeKind::ForeignKey(_) => None,
        }
    }

    pub fn as_foreign_key(&self) -> Option<&ForeignKey> {
        match &self.kind {
            AttributeKind::ForeignKey(fk) => Some(fk),
            AttributeKind::Column(_) => None,
        }
    }

    pub(crate) fn foreign_key_mut(&mut self) -> Option<&mut ForeignKey> {
        match &mut self.kind {
            AttributeKind::ForeignKey(fk) => Some(fk),
            AttributeKind::Column(_) => None,
        }
    }

    /// Effective type: the column's own, or the bound root column's.
    pub fn db_type(&self) -> Option<DbType> {
        match &self.kind {
            AttributeKind::Column(column) => Some(column.db_type),
            AttributeKind::ForeignKey(fk) => fk.binding.map(|b| b.db_type),
        }
    }

    /// Generated data, if populated.
    pub fn data(&self) -> Option<&Arc<[GeneratedValue]>> {
        self.data.as_ref()
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_some()
    }

    /// Generated data, or `DataNotReady`.
    pub fn require_data(&self) -> Result<&Arc<[GeneratedValue]>> {
        self.data.as_ref().ok_or_else(|| Error::DataNotReady {
            attribute: self.name.clone(),
        })
    }

    /// Generate this column's data. Foreign keys and populated attributes
    /// are left untouched.
    pub(crate) fn populate_column(
        &mut self,
        quantity: usize,
        ctx: &mut GenerationContext,
    ) -> Result<()> {
        if self.data.is_some() {
            return Ok(());
        }
        if let AttributeKind::Column(column) = &mut self.kind {
            let values = column.generate(quantity, ctx)?;
            tracing::debug!("Generated {} values for '{}'", values.len(), self.name);
            self.data = Some(values.into());
        }
        Ok(())
    }

    /// Populate this foreign key from its target: share the target's data
    /// when it exists, otherwise generate independent values with default
    /// settings for the target's type.
    pub(crate) fn populate_foreign_key(
        &mut self,
        quantity: usize,
        source: ForeignSource,
        ctx: &mut GenerationContext,
    ) -> Result<()> {
        if self.data.is_some() {
            return Ok(());
        }

        if let Some(data) = source.data {
            self.data = Some(data);
            return Ok(());
        }

        tracing::warn!(
            "Referenced data for foreign key '{}' is not generated yet, generating {} independent values",
            self.name,
            quantity
        );
        let mut column = Column::new(source.db_type);
        if let Some(length) = source.length {
            column = column.with_length(length);
        }
        let values = column.generate(quantity, ctx)?;
        self.data = Some(values.into());
        Ok(())
    }
}
