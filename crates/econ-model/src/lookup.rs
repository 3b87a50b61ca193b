use std::collections::HashMap;

/// Resolves configured column names against the headers a file actually has.
///
/// Matching ignores ASCII case and surrounding whitespace; the first header
/// wins when a file repeats a name with different casing.
#[derive(Debug, Clone)]
pub struct HeaderLookup {
    map: HashMap<String, String>,
}

impl HeaderLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(Self::key(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// The header as spelled in the file.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&Self::key(name)).map(String::as_str)
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_uppercase()
    }
}
