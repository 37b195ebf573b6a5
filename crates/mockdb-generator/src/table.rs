//! Tables: ordered attributes, a row count and a primary key.

use crate::attribute::{Attribute, AttributeKind, AttributeRef, ForeignSource};
use crate::options::{ForeignKeySampling, GenerationContext};
use mockdb_core::{Error, GeneratedValue, Result, TableDocument};
use rand::Rng;
use std::collections::HashMap;

/// One table of a schema.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    quantity: usize,
    attributes: Vec<Attribute>,
    /// Cached attribute lookup by name
    index: HashMap<String, usize>,
    primary_keys: Vec<usize>,
}

/// Read-only view of the other tables of a schema while one table is
/// mutably borrowed.
pub struct Siblings<'a> {
    before: &'a [Table],
    after: &'a [Table],
    /// Position of the borrowed table
    current: usize,
}

impl<'a> Siblings<'a> {
    pub fn new(before: &'a [Table], after: &'a [Table]) -> Self {
        Self {
            before,
            after,
            current: before.len(),
        }
    }

    /// Table at `index`, or `None` for the borrowed table itself.
    pub fn get(&self, index: usize) -> Option<&'a Table> {
        if index < self.current {
            self.before.get(index)
        } else if index > self.current {
            self.after.get(index - self.current - 1)
        } else {
            None
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }
}

impl Table {
    /// Create a table. Fails on duplicate attribute names and on primary keys
    /// that are unknown or repeated.
    pub fn new(
        name: impl Into<String>,
        quantity: usize,
        attributes: Vec<Attribute>,
        primary_keys: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        Self::assemble(&name, quantity, attributes, primary_keys).map_err(|e| e.in_table(&name))
    }

    fn assemble(
        name: &str,
        quantity: usize,
        attributes: Vec<Attribute>,
        primary_keys: &[&str],
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(attributes.len());
        for (idx, attribute) in attributes.iter().enumerate() {
            if index.insert(attribute.name().to_string(), idx).is_some() {
                return Err(Error::invalid(format!(
                    "duplicate attribute '{}'",
                    attribute.name()
                )));
            }
        }

        let mut keys = Vec::with_capacity(primary_keys.len());
        for key in primary_keys {
            let idx = *index.get(*key).ok_or_else(|| {
                Error::invalid(format!("primary key '{key}' is not an attribute"))
            })?;
            if keys.contains(&idx) {
                return Err(Error::invalid(format!("primary key '{key}' is repeated")));
            }
            keys.push(idx);
        }

        Ok(Self {
            name: name.to_string(),
            quantity,
            attributes,
            index,
            primary_keys: keys,
        })
    }

    /// Build a table from its document entry.
    pub fn from_document(doc: &TableDocument) -> Result<Self> {
        let name = doc
            .name
            .clone()
            .ok_or_else(|| Error::invalid("a table is missing required key 'name'"))?;

        let rows = doc
            .rows
            .as_ref()
            .ok_or_else(|| Error::invalid("missing required key 'rows'").in_table(&name))?;
        let quantity = rows.as_usize().ok_or_else(|| {
            Error::invalid(format!("rows '{rows}' is not a non-negative integer")).in_table(&name)
        })?;

        let attribute_docs = doc.attributes.as_ref().ok_or_else(|| {
            Error::invalid("a table must have an 'attributes' array").in_table(&name)
        })?;
        let attributes = attribute_docs
            .iter()
            .map(Attribute::from_document)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_table(&name))?;

        let keys: Vec<&str> = doc.primary_keys.iter().map(String::as_str).collect();
        Self::new(name, quantity, attributes, &keys)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target row count.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub(crate) fn attribute_mut(&mut self, index: usize) -> Option<&mut Attribute> {
        self.attributes.get_mut(index)
    }

    /// Position of an attribute by name.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attribute_index(name)
            .and_then(|idx| self.attributes.get(idx))
    }

    /// Names of the attributes, in declaration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(Attribute::name).collect()
    }

    /// Names of the primary-key attributes, in declaration order of the key.
    pub fn primary_key_names(&self) -> Vec<&str> {
        self.primary_keys
            .iter()
            .filter_map(|&idx| self.attributes.get(idx))
            .map(Attribute::name)
            .collect()
    }

    /// Generate data for every plain column that has none yet.
    pub fn generate_columns(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        let quantity = self.quantity;
        for attribute in &mut self.attributes {
            let name = attribute.name().to_string();
            attribute
                .populate_column(quantity, ctx)
                .map_err(|e| e.in_attribute(name))?;
        }
        Ok(())
    }

    /// Populate every attribute in declaration order.
    ///
    /// A foreign key copies its target's data when the target is already
    /// populated, whether it lives in this table or in a sibling; otherwise
    /// it gets independently generated values.
    pub fn generate_data(
        &mut self,
        siblings: &Siblings<'_>,
        ctx: &mut GenerationContext,
    ) -> Result<()> {
        tracing::debug!("Generating {} rows for table '{}'", self.quantity, self.name);
        for idx in 0..self.attributes.len() {
            self.populate_attribute(idx, siblings, ctx)?;
        }
        Ok(())
    }

    /// Populate the attribute at `idx` if it has no data yet.
    pub fn populate_attribute(
        &mut self,
        idx: usize,
        siblings: &Siblings<'_>,
        ctx: &mut GenerationContext,
    ) -> Result<()> {
        let quantity = self.quantity;
        let Some(name) = self.attributes.get(idx).map(|a| a.name().to_string()) else {
            return Err(Error::invalid(format!(
                "table '{}' has no attribute at position {idx}",
                self.name
            )));
        };
        self.foreign_source(idx, siblings)
            .and_then(|source| {
                let attribute = &mut self.attributes[idx];
                match source {
                    Some(source) => attribute.populate_foreign_key(quantity, source, ctx),
                    None => attribute.populate_column(quantity, ctx),
                }
            })
            .map_err(|e| e.in_attribute(name))
    }

    /// What the foreign key at `idx` reads from, or `None` for a column.
    fn foreign_source(&self, idx: usize, siblings: &Siblings<'_>) -> Result<Option<ForeignSource>> {
        let Some(fk) = self.attributes[idx].as_foreign_key() else {
            return Ok(None);
        };
        let binding = fk.binding()?;
        let lookup = |r: AttributeRef| {
            let table = if r.table == siblings.current() {
                Some(self)
            } else {
                siblings.get(r.table)
            };
            table.and_then(|t| t.attribute(r.attribute))
        };

        let target = lookup(binding.target).ok_or_else(|| Error::UnresolvedReference {
            table: fk.table.clone(),
            attribute: Some(fk.attribute.clone()),
        })?;
        let length = lookup(binding.root)
            .and_then(Attribute::as_column)
            .and_then(|column| column.length);

        Ok(Some(ForeignSource {
            data: target.data().cloned(),
            db_type: binding.db_type,
            length,
        }))
    }

    /// Materialize row `index`.
    ///
    /// A column contributes `data[index]`; a foreign key contributes a value
    /// of its data chosen by `sampling`.
    pub fn row<'a, R: Rng + ?Sized>(
        &'a self,
        index: usize,
        sampling: ForeignKeySampling,
        rng: &mut R,
    ) -> Result<Vec<&'a GeneratedValue>> {
        self.attributes
            .iter()
            .map(|attribute| {
                let data = attribute.require_data()?;
                let not_ready = || Error::DataNotReady {
                    attribute: attribute.name().to_string(),
                };
                let position = match attribute.kind() {
                    AttributeKind::Column(_) => index,
                    AttributeKind::ForeignKey(_) if data.is_empty() => return Err(not_ready()),
                    AttributeKind::ForeignKey(_) => match sampling {
                        ForeignKeySampling::Random => rng.gen_range(0..data.len()),
                        ForeignKeySampling::Positional => index % data.len(),
                    },
                };
                data.get(position).ok_or_else(not_ready)
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_table(&self.name))
    }

    /// Materialize every row, in order.
    pub fn rows<'a, R: Rng + ?Sized>(
        &'a self,
        sampling: ForeignKeySampling,
        rng: &'a mut R,
    ) -> impl Iterator<Item = Result<Vec<&'a GeneratedValue>>> + 'a {
        (0..self.quantity).map(move |i| self.row(i, sampling, &mut *rng))
    }
}
