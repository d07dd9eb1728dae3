//! Ordered field collection and the restrict / omit composition operations.

use crate::error::FormError;
use crate::field::infer::infer;
use crate::field::model::FieldModel;
use crate::schema::ColumnDescriptor;
use std::collections::HashSet;

/// Fields of one form, in render and insert order. Names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<FieldModel>,
}

impl FieldSet {
    /// One field per column in column order, skipping auto-increment columns.
    /// The first column that cannot be inferred aborts the whole build.
    pub fn build_all(columns: &[ColumnDescriptor]) -> Result<Self, FormError> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut seen = HashSet::new();
        for column in columns {
            if column.is_auto_increment {
                tracing::debug!(column = %column.name, "skipping auto_increment column");
                continue;
            }
            if !seen.insert(column.name.as_str()) {
                continue;
            }
            fields.push(infer(column)?);
        }
        Ok(FieldSet { fields })
    }

    /// Exactly `names`, in the given order. Every name must exist.
    pub fn restrict_to(&self, names: &[&str]) -> Result<Self, FormError> {
        if names.is_empty() {
            return Err(FormError::EmptySelection);
        }
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.get(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FormError::UnknownColumn { names: missing });
        }
        let mut seen = HashSet::new();
        let fields = names
            .iter()
            .filter(|n| seen.insert(**n))
            .filter_map(|n| self.get(n).cloned())
            .collect();
        Ok(FieldSet { fields })
    }

    /// Everything except `names`, order preserved. Names not in the set are ignored.
    pub fn omit(&self, names: &[&str]) -> Result<Self, FormError> {
        if names.is_empty() {
            return Err(FormError::EmptySelection);
        }
        let drop: HashSet<&str> = names.iter().copied().collect();
        for name in &drop {
            if self.get(name).is_none() {
                tracing::debug!(column = %name, "omit: column not in field set, ignored");
            }
        }
        let fields = self
            .fields
            .iter()
            .filter(|f| !drop.contains(f.name.as_str()))
            .cloned()
            .collect();
        Ok(FieldSet { fields })
    }

    pub fn get(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldModel> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldModel> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldModel;
    type IntoIter = std::slice::Iter<'a, FieldModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
