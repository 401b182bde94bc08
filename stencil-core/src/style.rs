use indexmap::IndexMap;

/// Literal class token → collision-safe replacement, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMap {
    entries: IndexMap<String, String>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: impl Into<String>, hashed: impl Into<String>) -> Option<String> {
        self.entries.insert(class.into(), hashed.into())
    }

    pub fn get(&self, class: &str) -> Option<&str> {
        self.entries.get(class).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ClassMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ClassMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Replaces every literal occurrence of each class token in `template`, one
/// token at a time in map order. Purely textual: occurrences outside `class`
/// attributes are replaced too, and a replacement that contains a later key
/// is replaced again. Empty keys are skipped.
pub fn rewrite_classes(template: &str, map: &ClassMap) -> String {
    let mut out = template.to_owned();
    for (class, hashed) in map.iter() {
        if class.is_empty() {
            continue;
        }
        out = out.replace(class, hashed);
    }
    out
}
