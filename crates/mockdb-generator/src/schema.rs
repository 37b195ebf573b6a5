//! Schemas: construction, foreign-key resolution and generation.
//!
//! A schema is built in three steps:
//!
//! 1. every table is built from its document entry, so table and attribute
//!    names become resolvable;
//! 2. one resolution pass binds every foreign key to its target, following
//!    chains of keys down to a concrete column;
//! 3. a generation pass fills every attribute, in the configured
//!    [`GenerationOrder`].
//!
//! After that the schema is read-only and emitters read it through
//! [`AttributeView`]s and [`Table::rows`].

use crate::attribute::{Attribute, AttributeRef, Binding};
use crate::options::{GenerateOptions, GenerationContext, GenerationOrder};
use crate::table::{Siblings, Table};
use mockdb_core::{DbType, Error, GeneratedValue, Result, SchemaDocument};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A populated (or to-be-populated) set of tables.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    tables: Vec<Table>,
    /// Cached table lookup by name
    index: HashMap<String, usize>,
}

/// Names a foreign key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub table: &'a str,
    pub attribute: &'a str,
}

/// What emitters see of one attribute of a generated schema.
#[derive(Debug, Clone, Copy)]
pub struct AttributeView<'a> {
    pub name: &'a str,
    /// Own type, or the referenced column's for a foreign key
    pub db_type: DbType,
    /// Length of a string column (the referenced one for a foreign key)
    pub length: Option<usize>,
    pub data: &'a [GeneratedValue],
    /// Target names of a foreign key
    pub references: Option<Reference<'a>>,
}

impl Schema {
    /// Create a schema from already built tables, without resolving.
    pub fn new(name: impl Into<String>, tables: Vec<Table>) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(tables.len());
        for (idx, table) in tables.iter().enumerate() {
            if index.insert(table.name().to_string(), idx).is_some() {
                return Err(
                    Error::invalid(format!("duplicate table '{}'", table.name())).in_schema(name),
                );
            }
        }
        Ok(Self {
            name,
            tables,
            index,
        })
    }

    /// Build and resolve a schema from a document, without generating data.
    pub fn build(name: impl Into<String>, doc: &SchemaDocument) -> Result<Self> {
        let name = name.into();
        let tables = doc
            .tables
            .iter()
            .map(Table::from_document)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_schema(&name))?;

        let mut schema = Self::new(name, tables)?;
        schema.resolve()?;
        Ok(schema)
    }

    /// Build, resolve and generate a schema from a document.
    pub fn from_document(
        name: impl Into<String>,
        doc: &SchemaDocument,
        options: &GenerateOptions,
    ) -> Result<Self> {
        let mut schema = Self::build(name, doc)?;
        let mut ctx = options.context();
        schema.generate_data(&mut ctx)?;
        Ok(schema)
    }

    /// Load a document and generate it, naming the schema after the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P, options: &GenerateOptions) -> Result<Self> {
        let path = path.as_ref();
        let doc = SchemaDocument::from_file(path)?;
        Self::from_document(Self::name_from_path(path), &doc, options)
    }

    /// File stem of `path`, the default schema name.
    pub fn name_from_path(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "schema".to_string())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    pub fn table_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.table_index(name).and_then(|idx| self.tables.get(idx))
    }

    pub fn attribute(&self, r: AttributeRef) -> Option<&Attribute> {
        self.tables.get(r.table)?.attribute(r.attribute)
    }

    /// Find an attribute by table and attribute name.
    pub fn locate(&self, table: &str, attribute: &str) -> Result<AttributeRef> {
        let table_idx = self
            .table_index(table)
            .ok_or_else(|| Error::UnresolvedReference {
                table: table.to_string(),
                attribute: None,
            })?;
        let attribute_idx = self.tables[table_idx]
            .attribute_index(attribute)
            .ok_or_else(|| Error::UnresolvedReference {
                table: table.to_string(),
                attribute: Some(attribute.to_string()),
            })?;
        Ok(AttributeRef::new(table_idx, attribute_idx))
    }

    /// Bind every foreign key to its target.
    ///
    /// Fails with `UnresolvedReference` for a missing table or attribute and
    /// with `InvalidConfiguration` for a cycle of keys.
    pub fn resolve(&mut self) -> Result<()> {
        self.resolve_bindings().map_err(|e| e.in_schema(&self.name))
    }

    fn resolve_bindings(&mut self) -> Result<()> {
        let mut targets = BTreeMap::new();
        for (t, table) in self.tables.iter().enumerate() {
            for (a, attribute) in table.attributes().iter().enumerate() {
                let Some(fk) = attribute.as_foreign_key() else {
                    continue;
                };
                let target = self
                    .locate(&fk.table, &fk.attribute)
                    .map_err(|e| e.in_attribute(attribute.name()).in_table(table.name()))?;
                targets.insert(AttributeRef::new(t, a), target);
            }
        }

        let mut bindings = Vec::with_capacity(targets.len());
        for (&key, &target) in &targets {
            let mut root = target;
            let mut depth = 1;
            while let Some(&next) = targets.get(&root) {
                root = next;
                depth += 1;
                if depth > targets.len() {
                    return Err(self.context_error(
                        key,
                        Error::invalid("foreign keys reference each other in a cycle"),
                    ));
                }
            }

            let db_type = self
                .attribute(root)
                .and_then(Attribute::db_type)
                .ok_or_else(|| self.context_error(key, Error::invalid("reference has no type")))?;
            bindings.push((
                key,
                Binding {
                    target,
                    root,
                    db_type,
                    depth,
                },
            ));
        }

        let count = bindings.len();
        for (key, binding) in bindings {
            if let Some(fk) = self.tables[key.table]
                .attribute_mut(key.attribute)
                .and_then(Attribute::foreign_key_mut)
            {
                fk.binding = Some(binding);
            }
        }
        tracing::info!(
            "Resolved {} foreign keys across {} tables in schema '{}'",
            count,
            self.tables.len(),
            self.name
        );
        Ok(())
    }

    /// Wrap `err` with the table and attribute at `r`.
    fn context_error(&self, r: AttributeRef, err: Error) -> Error {
        match self.tables.get(r.table) {
            Some(table) => {
                let err = match table.attribute(r.attribute) {
                    Some(attribute) => err.in_attribute(attribute.name()),
                    None => err,
                };
                err.in_table(table.name())
            }
            None => err,
        }
    }

    /// Populate every attribute of every table.
    pub fn generate_data(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        let result = match ctx.order {
            GenerationOrder::Declared => self.generate_declared(ctx),
            GenerationOrder::Dependency => self.generate_by_dependency(ctx),
        };
        result
            .and_then(|()| self.check_keys())
            .map_err(|e| e.in_schema(&self.name))?;

        for table in &self.tables {
            tracing::info!(
                "Generated table '{}' ({} rows, {} attributes)",
                table.name(),
                table.quantity(),
                table.attributes().len()
            );
        }
        Ok(())
    }

    /// A table with rows cannot take its keys from an empty column.
    fn check_keys(&self) -> Result<()> {
        for (t, table) in self.tables.iter().enumerate() {
            if table.quantity() == 0 {
                continue;
            }
            for (a, attribute) in table.attributes().iter().enumerate() {
                let Some(fk) = attribute.as_foreign_key() else {
                    continue;
                };
                if attribute.data().is_some_and(|data| data.is_empty()) {
                    let err = Error::invalid(format!(
                        "referenced attribute '{}.{}' has no rows",
                        fk.table,
                        fk.attribute
                    ));
                    return Err(self.context_error(AttributeRef::new(t, a), err));
                }
            }
        }
        Ok(())
    }

    /// Tables in declaration order, each populating its attributes in order.
    fn generate_declared(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        for idx in 0..self.tables.len() {
            if let Some((table, siblings)) = split_table(&mut self.tables, idx) {
                table
                    .generate_data(&siblings, ctx)
                    .map_err(|e| e.in_table(table.name()))?;
            }
        }
        Ok(())
    }

    /// Every plain column first, then foreign keys by increasing chain depth.
    fn generate_by_dependency(&mut self, ctx: &mut GenerationContext) -> Result<()> {
        for table in &mut self.tables {
            table
                .generate_columns(ctx)
                .map_err(|e| e.in_table(table.name()))?;
        }

        let mut keys = Vec::new();
        for (t, table) in self.tables.iter().enumerate() {
            for (a, attribute) in table.attributes().iter().enumerate() {
                if let Some(fk) = attribute.as_foreign_key() {
                    let binding = fk
                        .binding()
                        .map_err(|e| self.context_error(AttributeRef::new(t, a), e))?;
                    keys.push((binding.depth, AttributeRef::new(t, a)));
                }
            }
        }
        keys.sort_by_key(|(depth, _)| *depth);

        for (_, key) in keys {
            if let Some((table, siblings)) = split_table(&mut self.tables, key.table) {
                table
                    .populate_attribute(key.attribute, &siblings, ctx)
                    .map_err(|e| e.in_table(table.name()))?;
            }
        }
        Ok(())
    }

    /// Emitter view of every attribute of the table at `table_idx`.
    pub fn attribute_views(&self, table_idx: usize) -> Result<Vec<AttributeView<'_>>> {
        let table = self.tables.get(table_idx).ok_or_else(|| {
            Error::invalid(format!("no table at position {table_idx}")).in_schema(&self.name)
        })?;

        table
            .attributes()
            .iter()
            .map(|attribute| self.view(attribute).map_err(|e| e.in_attribute(attribute.name())))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_table(table.name()))
    }

    fn view<'a>(&'a self, attribute: &'a Attribute) -> Result<AttributeView<'a>> {
        let data: &[GeneratedValue] = attribute.require_data()?;
        match attribute.as_foreign_key() {
            None => {
                let column = attribute.as_column();
                Ok(AttributeView {
                    name: attribute.name(),
                    db_type: column.map(|c| c.db_type).unwrap_or(DbType::String),
                    length: column.and_then(|c| c.length),
                    data,
                    references: None,
                })
            }
            Some(fk) => {
                let binding = fk.binding()?;
                let length = self
                    .attribute(binding.root)
                    .and_then(Attribute::as_column)
                    .and_then(|c| c.length);
                Ok(AttributeView {
                    name: attribute.name(),
                    db_type: binding.db_type,
                    length,
                    data,
                    references: Some(Reference {
                        table: &fk.table,
                        attribute: &fk.attribute,
                    }),
                })
            }
        }
    }
}

/// Borrow the table at `idx` mutably and the others read-only.
fn split_table(tables: &mut [Table], idx: usize) -> Option<(&mut Table, Siblings<'_>)> {
    if idx >= tables.len() {
        return None;
    }
    let (before, rest) = tables.split_at_mut(idx);
    let (current, after) = rest.split_first_mut()?;
    Some((current, Siblings::new(before, after)))
}
