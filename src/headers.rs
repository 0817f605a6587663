use super::error::Error;

/// This is an ordered mapping from text keys to text values.  It is used for
/// the headers, query parameters, and body fields of a parsed request.
///
/// Entries are kept in the order their keys were first inserted.  Inserting
/// a key which is already present replaces its value in place.  Keys are
/// compared exactly as written; no case folding is performed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldMap {
    fields: Vec<(String, String)>,
}

impl FieldMap {
    #[must_use]
    pub fn contains_key<K>(
        &self,
        key: K,
    ) -> bool
    where
        K: AsRef<str>,
    {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn get<K>(
        &self,
        key: K,
    ) -> Option<&str>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set the value for the given key, returning the value it replaced, if
    /// any.  A replaced entry keeps its original position.
    pub fn insert<K, V>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.fields.push((key, value));
                None
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldMap {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Parse one header line and add the header it describes to the given
/// headers.  The name is everything before the first colon, exactly as
/// written.  The value is everything after it, with surrounding whitespace
/// removed.  An empty line is not a header and leaves the headers untouched.
///
/// # Errors
///
/// [`Error::MalformedHeader`](enum.Error.html#variant.MalformedHeader) is
/// returned if the line is not empty but has no colon, or has nothing
/// before its first colon.  The headers are left untouched in that case.
pub fn parse_header(
    line: &str,
    headers: &mut FieldMap,
) -> Result<(), Error> {
    if line.is_empty() {
        return Ok(());
    }
    let delimiter = line
        .find(':')
        .ok_or_else(|| Error::MalformedHeader(line.into()))?;
    let name = &line[..delimiter];
    if name.is_empty() {
        return Err(Error::MalformedHeader(line.into()));
    }
    let value = line[delimiter + 1..].trim();
    headers.insert(name, value);
    Ok(())
}
