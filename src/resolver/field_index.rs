use std::borrow::Cow;

use hashbrown::HashMap;

use crate::record::Field;

/// How column names are compared with field names and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnMatch {
    /// Byte-for-byte equality.
    #[default]
    Exact,
    /// ASCII letters compare equal regardless of case.
    IgnoreAsciiCase,
}

impl ColumnMatch {
    /// Lookup key for `name` under this policy.
    pub fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            ColumnMatch::IgnoreAsciiCase if name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(name.to_ascii_lowercase())
            }
            _ => Cow::Borrowed(name),
        }
    }
}

/// Column name to field position for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIndex {
    type_name: &'static str,
    matching: ColumnMatch,
    columns: HashMap<String, usize>,
}

impl FieldIndex {
    pub(crate) fn build(type_name: &'static str, fields: &[Field], matching: ColumnMatch) -> Self {
        // (position, claimed by annotation)
        let mut claims: HashMap<String, (usize, bool)> = HashMap::with_capacity(fields.len());

        for (position, field) in fields.iter().enumerate() {
            if !field.exported {
                continue;
            }
            match field.annotation() {
                Some(column) => {
                    let key = matching.key(column).into_owned();
                    if let Some(&(_, true)) = claims.get(&key) {
                        continue;
                    }
                    claims.insert(key, (position, true));
                }
                None => {
                    let key = matching.key(field.name).into_owned();
                    claims.entry(key).or_insert((position, false));
                }
            }
        }

        Self {
            type_name,
            matching,
            columns: claims
                .into_iter()
                .map(|(column, (position, _))| (column, position))
                .collect(),
        }
    }

    /// Field position for `column`.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns.get(&*self.matching.key(column)).copied()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.columns.iter().map(|(column, &position)| (column.as_str(), position))
    }
}
