use crate::error::{MvdError, Result};
use crate::model::Attribute;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One column with every value replaced by a dense code.
///
/// Codes are assigned per column in order of first appearance, so two cells
/// of the same column carry equal codes iff their values are equal.
#[derive(Debug, Clone)]
struct EncodedColumn {
    attribute: Attribute,
    codes: Arc<[u32]>,
    cardinality: usize,
}

/// Read-only view over a cleaned dataset.
///
/// Row slices and attribute selections share the encoded columns, so carving
/// a view into processing units never copies data.
#[derive(Debug, Clone)]
pub struct DatasetView {
    columns: Vec<EncodedColumn>,
    offset: usize,
    len: usize,
}

impl DatasetView {
    /// Encode every column of `df`.
    ///
    /// Values are compared through their string form, which keeps numeric,
    /// categorical and temporal columns on the same equality footing.
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());
        for series in df.get_columns() {
            let as_text = series.cast(&DataType::String)?;
            let values = as_text.str()?;

            let mut dictionary: HashMap<Option<&str>, u32> = HashMap::new();
            let mut codes = Vec::with_capacity(values.len());
            for value in values.into_iter() {
                let next = dictionary.len() as u32;
                codes.push(*dictionary.entry(value).or_insert(next));
            }

            columns.push(EncodedColumn {
                attribute: Attribute::new(series.name()),
                codes: codes.into(),
                cardinality: dictionary.len(),
            });
        }

        Ok(Self {
            columns,
            offset: 0,
            len: df.height(),
        })
    }

    pub fn height(&self) -> usize {
        self.len
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        self.columns.iter().map(|c| c.attribute.clone()).collect()
    }

    /// Number of distinct values `attribute` takes over the whole dataset.
    pub fn cardinality(&self, attribute: &Attribute) -> Result<usize> {
        Ok(self.column(attribute)?.cardinality)
    }

    /// Rows `offset..offset + len` of this view, clamped to its height.
    pub fn slice_rows(&self, offset: usize, len: usize) -> Self {
        let offset = offset.min(self.len);
        let len = len.min(self.len - offset);
        Self {
            columns: self.columns.clone(),
            offset: self.offset + offset,
            len,
        }
    }

    /// Restrict the view to `attributes`, in the given order.
    pub fn select(&self, attributes: &[Attribute]) -> Result<Self> {
        let columns = attributes
            .iter()
            .map(|a| self.column(a).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            columns,
            offset: self.offset,
            len: self.len,
        })
    }

    /// Equivalence classes of rows under equality on `attributes`.
    ///
    /// Row indices are relative to this view. Classes come out in order of
    /// their first row.
    pub fn partition(&self, attributes: &[Attribute]) -> Result<Vec<Vec<usize>>> {
        let columns = self.codes_for(attributes)?;
        let mut index: HashMap<Vec<u32>, usize> = HashMap::new();
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for row in 0..self.len {
            let key = tuple(&columns, row);
            match index.get(&key) {
                Some(&class) => classes[class].push(row),
                None => {
                    index.insert(key, classes.len());
                    classes.push(vec![row]);
                }
            }
        }
        Ok(classes)
    }

    /// Distinct value tuples of `attributes` over every row of the view.
    pub fn distinct_tuples(&self, attributes: &[Attribute]) -> Result<HashSet<Vec<u32>>> {
        let columns = self.codes_for(attributes)?;
        Ok((0..self.len).map(|row| tuple(&columns, row)).collect())
    }

    /// Distinct value tuples of `attributes` over the given rows only.
    pub fn distinct_tuples_in(
        &self,
        attributes: &[Attribute],
        rows: &[usize],
    ) -> Result<HashSet<Vec<u32>>> {
        let columns = self.codes_for(attributes)?;
        Ok(rows.iter().map(|&row| tuple(&columns, row)).collect())
    }

    fn column(&self, attribute: &Attribute) -> Result<&EncodedColumn> {
        self.columns
            .iter()
            .find(|c| &c.attribute == attribute)
            .ok_or_else(|| MvdError::UnknownAttribute(attribute.clone()))
    }

    fn codes_for(&self, attributes: &[Attribute]) -> Result<Vec<&[u32]>> {
        attributes
            .iter()
            .map(|a| {
                let column = self.column(a)?;
                Ok(&column.codes[self.offset..self.offset + self.len])
            })
            .collect()
    }
}

fn tuple(columns: &[&[u32]], row: usize) -> Vec<u32> {
    columns.iter().map(|c| c[row]).collect()
}
