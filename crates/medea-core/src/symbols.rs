//! Label categories and multi-dimensional parameters.
//!
//! These are the two output structures handed to the optimization model:
//!
//! - [`Sets`]: label categories keyed by short category codes (`t`, `z`, `h`, ...)
//! - [`Parameters`]: numeric series in long relational form, keyed by uppercase names
//!
//! Parameters declare an ordered tuple of dimension names. A dimension named after
//! a category code is checked against that category by [`Symbols::validate`]; other
//! dimension names (`kind`, `year`, `fuel`, `product`, ...) are free.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::error::{MedeaError, MedeaResult};

/// Ordered collection of unique string labels forming one model dimension.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelSet {
    labels: Vec<String>,
    #[serde(skip)]
    members: HashSet<String>,
}

impl LabelSet {
    /// Build a category, keeping the first appearance of each label.
    pub fn from_unique(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.members.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl PartialEq for LabelSet {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LabelSet::default();
        for label in iter {
            let label = label.into();
            if set.members.insert(label.clone()) {
                set.labels.push(label);
            }
        }
        set
    }
}

/// Label categories keyed by category code.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Sets {
    categories: BTreeMap<String, LabelSet>,
}

impl Sets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, set: LabelSet) {
        self.categories.insert(code.into(), set);
    }

    pub fn get(&self, code: &str) -> MedeaResult<&LabelSet> {
        self.categories
            .get(code)
            .ok_or_else(|| MedeaError::lookup(format!("unknown label category '{code}'")))
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelSet)> {
        self.categories.iter().map(|(code, set)| (code.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One observation of a parameter: a key tuple and its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub key: Vec<String>,
    pub value: f64,
}

/// Numeric series indexed by an ordered tuple of dimensions, stored long-form.
///
/// Key tuples are unique and always match the declared arity. NaN values are
/// rejected on insert so undefined arithmetic never reaches the model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Parameter {
    dims: Vec<String>,
    records: Vec<Record>,
    #[serde(skip)]
    positions: HashMap<Vec<String>, usize>,
}

impl Parameter {
    pub fn new(dims: &[&str]) -> Self {
        Self {
            dims: dims.iter().map(|d| d.to_string()).collect(),
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Zero-dimensional parameter holding a single value.
    pub fn scalar(value: f64) -> MedeaResult<Self> {
        let mut param = Self::new(&[]);
        param.insert(Vec::new(), value)?;
        Ok(param)
    }

    pub fn insert(&mut self, key: Vec<String>, value: f64) -> MedeaResult<()> {
        if key.len() != self.dims.len() {
            return Err(MedeaError::validation(format!(
                "key {:?} has {} labels but parameter is indexed by {:?}",
                key,
                key.len(),
                self.dims
            )));
        }
        if value.is_nan() {
            return Err(MedeaError::validation(format!(
                "value for key {key:?} is not a number"
            )));
        }
        if self.positions.contains_key(&key) {
            return Err(MedeaError::validation(format!("duplicate key {key:?}")));
        }
        self.positions.insert(key.clone(), self.records.len());
        self.records.push(Record { key, value });
        Ok(())
    }

    pub fn get(&self, key: &[&str]) -> Option<f64> {
        let key: Vec<String> = key.iter().map(|k| k.to_string()).collect();
        self.positions.get(&key).map(|&pos| self.records[pos].value)
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Copy of this parameter with every value rounded to `decimals` places.
    pub fn rounded(&self, decimals: u32) -> Self {
        let mut out = self.clone();
        for record in &mut out.records {
            record.value = round_decimals(record.value, decimals);
        }
        out
    }
}

/// Round half to even on the scaled value, matching numpy's `round`.
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round_ties_even() / scale
}

/// Parameters keyed by uppercase name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Parameters {
    entries: BTreeMap<String, Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, param: Parameter) {
        self.entries.insert(name.into(), param);
    }

    pub fn get(&self, name: &str) -> MedeaResult<&Parameter> {
        self.entries
            .get(name)
            .ok_or_else(|| MedeaError::lookup(format!("unknown parameter '{name}'")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The complete compiler output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Symbols {
    pub sets: Sets,
    pub parameters: Parameters,
}

impl Symbols {
    /// Check that every label along a category-coded dimension is a member of
    /// that category.
    pub fn validate(&self) -> MedeaResult<()> {
        for (name, param) in self.parameters.iter() {
            for (axis, dim) in param.dims().iter().enumerate() {
                let Ok(category) = self.sets.get(dim) else {
                    continue;
                };
                if let Some(record) = param
                    .records()
                    .iter()
                    .find(|r| !category.contains(&r.key[axis]))
                {
                    return Err(MedeaError::validation(format!(
                        "{name}: label '{}' is not a member of category '{dim}'",
                        record.key[axis]
                    )));
                }
            }
        }
        Ok(())
    }
}
