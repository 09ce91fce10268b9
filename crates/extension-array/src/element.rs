//! The per-cell missing marker.

/// One logical cell of a typed column: a payload or the missing marker.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Element<T> {
    /// A valid payload.
    Present(T),
    /// No value at this position.
    #[default]
    Missing,
}

impl<T> Element<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Element::Missing)
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Borrow the payload, if any.
    pub fn present(&self) -> Option<&T> {
        match self {
            Element::Present(value) => Some(value),
            Element::Missing => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Element::Present(value) => Some(value),
            Element::Missing => None,
        }
    }

    pub fn as_ref(&self) -> Element<&T> {
        match self {
            Element::Present(value) => Element::Present(value),
            Element::Missing => Element::Missing,
        }
    }

    pub fn map<U, F>(self, f: F) -> Element<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Element::Present(value) => Element::Present(f(value)),
            Element::Missing => Element::Missing,
        }
    }

    /// Map the payload with a fallible function; missing cells are passed through.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Element<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Element::Present(value) => f(value).map(Element::Present),
            Element::Missing => Ok(Element::Missing),
        }
    }
}

impl<T> From<Option<T>> for Element<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Element::Present(value),
            None => Element::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_roundtrip() {
        let present = Element::Present(3);
        let missing: Element<i32> = Element::default();

        assert!(present.is_present());
        assert!(missing.is_missing());
        assert_eq!(present.present(), Some(&3));
        assert_eq!(Element::from(None::<i32>), Element::Missing);
        assert_eq!(Element::from(Some(4)).into_option(), Some(4));
    }

    #[test]
    fn test_try_map_propagates() {
        let ok: Result<Element<i32>, String> = Element::Present(2).try_map(|v| Ok(v * 2));
        assert_eq!(ok.unwrap(), Element::Present(4));

        let err: Result<Element<i32>, String> =
            Element::Present(2).try_map(|_| Err("boom".to_string()));
        assert!(err.is_err());

        let skipped: Result<Element<i32>, String> =
            Element::Missing.try_map(|_: i32| Err("never called".to_string()));
        assert_eq!(skipped.unwrap(), Element::Missing);
    }
}
