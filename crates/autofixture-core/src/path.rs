use std::fmt;

/// Dotted location of a field inside a template, e.g. `orders[].total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the field `name` below `self`.
    pub fn child(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Path of the elements of the array at `self`.
    pub fn element(&self) -> Self {
        Self(format!("{}[]", self.0))
    }

    pub fn as_str(&self) -> &str {
        if self.0.is_empty() { "$" } else { &self.0 }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_and_element_segments() {
        let path = FieldPath::root().child("orders").element().child("total");
        assert_eq!(path.to_string(), "orders[].total");
        assert_eq!(FieldPath::root().to_string(), "$");
        assert_eq!(FieldPath::root().element().to_string(), "[]");
    }
}
