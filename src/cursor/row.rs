use crate::types::OwnedValue;

/// One row of values, positionally aligned with the cursor's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<OwnedValue>,
}

impl Row {
    pub fn new(values: Vec<OwnedValue>) -> Self {
        Self { values }
    }

    pub fn column_count(&self) -> usize {
        self.values.len()
    }
}

impl FromIterator<OwnedValue> for Row {
    fn from_iter<I: IntoIterator<Item = OwnedValue>>(iter: I) -> Self {
        Row::new(iter.into_iter().collect())
    }
}
