use std::fmt;

use serde::{
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap as _,
    Deserialize, Deserializer, Serialize, Serializer,
};

use super::FieldKind;

/// A known credential value.
/// Absence is expressed with `Option<CredValue>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredValue {
    Flag(bool),
    Text(String),
}

/// How a looked-up value looks to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptNeed {
    Absent,
    Empty,
    Text,
    Off,
    On,
}

impl CredValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// A value starting with `{` is an unresolved template reference such as `{host}`.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Text(s) if s.starts_with('{'))
    }

    /// Non-empty text, or `true`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Flag(b) => *b,
        }
    }

    /// Renders the value for display, hiding secrets.
    pub fn masked(&self, secret: bool) -> String {
        match self {
            Self::Text(s) if secret && !s.is_empty() => "********".to_owned(),
            v => v.to_string(),
        }
    }
}

impl fmt::Display for CredValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CredValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CredValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CredValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl PromptNeed {
    pub fn classify(value: Option<&CredValue>) -> Self {
        match value {
            None => Self::Absent,
            Some(CredValue::Text(s)) if s.is_empty() => Self::Empty,
            Some(CredValue::Text(_)) => Self::Text,
            Some(CredValue::Flag(false)) => Self::Off,
            Some(CredValue::Flag(true)) => Self::On,
        }
    }

    /// Whether the value alone forces a prompt.
    ///
    /// Only a blank string does: it was supplied but carries nothing.
    /// An explicit `false` is a deliberate "off" and never re-asked.
    /// Absence is left to the field's required-ness.
    pub fn should_prompt(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

pub fn should_prompt_for(value: Option<&CredValue>) -> bool {
    PromptNeed::classify(value).should_prompt()
}

/// Ordered mapping `FieldKind -> value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    pairs: Vec<(FieldKind, Option<CredValue>)>,
}

pub type Iter<'a> = std::slice::Iter<'a, (FieldKind, Option<CredValue>)>;

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Inserts or replaces, keeping the position of an existing field.
    pub fn insert(&mut self, field: FieldKind, mut value: Option<CredValue>) -> Option<CredValue> {
        if let Some((_, v)) = self.pairs.iter_mut().find(|(f, _)| *f == field) {
            std::mem::swap(v, &mut value);
            value
        } else {
            self.pairs.push((field, value));
            None
        }
    }

    pub fn contains(&self, field: FieldKind) -> bool {
        self.pairs.iter().any(|(f, _)| *f == field)
    }

    /// The value of `field`, `None` when missing or unset.
    pub fn get(&self, field: FieldKind) -> Option<&CredValue> {
        self.pairs
            .iter()
            .find(|(f, _)| *f == field)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn get_text(&self, field: FieldKind) -> Option<&str> {
        self.get(field).and_then(CredValue::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.pairs.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> Iter<'_> {
        self.pairs.iter()
    }

    /// Copies the usable values of `other` over this set.
    /// Placeholders, blanks and unset entries in `other` never overwrite.
    pub fn overlay(&mut self, other: &ValueSet) {
        for (field, value) in other.iter() {
            match value {
                Some(v) if !v.is_placeholder() && v != &CredValue::text("") => {
                    self.insert(*field, Some(v.clone()));
                }
                _ => {}
            }
        }
    }
}

impl FromIterator<(FieldKind, Option<CredValue>)> for ValueSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (FieldKind, Option<CredValue>)>,
    {
        let mut m = Self::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}

impl FromIterator<(FieldKind, CredValue)> for ValueSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (FieldKind, CredValue)>,
    {
        iter.into_iter().map(|(k, v)| (k, Some(v))).collect()
    }
}

impl IntoIterator for ValueSet {
    type Item = (FieldKind, Option<CredValue>);

    type IntoIter = <Vec<Self::Item> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a (FieldKind, Option<CredValue>);

    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl Serialize for ValueSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (field, value) in &self.pairs {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValueSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueSetVisitor;

        impl<'de> Visitor<'de> for ValueSetVisitor {
            type Value = ValueSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of credential fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ValueSet, A::Error> {
                let mut set = ValueSet::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.parse::<FieldKind>() {
                        Ok(field) => {
                            let value: Option<CredValue> = access.next_value()?;
                            set.insert(field, value);
                        }
                        Err(_) => {
                            // Unrelated deployment settings share the table.
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(ValueSetVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use FieldKind::*;

    #[test]
    fn classify_distinguishes_every_shape() {
        assert_eq!(PromptNeed::classify(None), PromptNeed::Absent);
        assert_eq!(PromptNeed::classify(Some(&"".into())), PromptNeed::Empty);
        assert_eq!(PromptNeed::classify(Some(&"bob".into())), PromptNeed::Text);
        assert_eq!(PromptNeed::classify(Some(&false.into())), PromptNeed::Off);
        assert_eq!(PromptNeed::classify(Some(&true.into())), PromptNeed::On);
    }

    #[test]
    fn only_blank_text_forces_a_prompt() {
        assert!(should_prompt_for(Some(&"".into())));
        assert!(!should_prompt_for(Some(&"bob".into())));
        assert!(!should_prompt_for(Some(&false.into())));
        assert!(!should_prompt_for(Some(&true.into())));
        assert!(!should_prompt_for(None));
    }

    #[test]
    fn placeholder_starts_with_open_brace() {
        assert!(CredValue::text("{host}").is_placeholder());
        assert!(CredValue::text("{").is_placeholder());
        assert!(!CredValue::text("host{1}").is_placeholder());
        assert!(!CredValue::Flag(true).is_placeholder());
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut set = ValueSet::new();
        set.insert(Host, Some(CredValue::text("a")));
        set.insert(Username, None);
        assert_eq!(
            set.insert(Host, Some(CredValue::text("b"))),
            Some(CredValue::text("a"))
        );

        let fields: Vec<_> = set.fields().collect();
        assert_eq!(fields, [Host, Username]);
        assert_eq!(set.get_text(Host), Some("b"));
        assert_eq!(set.get(Username), None);
        assert!(set.contains(Username));
    }

    #[test]
    fn deserialize_skips_unrelated_keys() {
        let src = r#"
            host = "example.com"
            root_directory = "/var/www"
            agent-forward = false
            password = "{password}"
        "#;
        let set: ValueSet = dbg!(toml::from_str(src)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get_text(Host), Some("example.com"));
        assert_eq!(set.get(AgentForward), Some(&CredValue::Flag(false)));
        assert!(set.get(Password).unwrap().is_placeholder());
    }

    #[test]
    fn serialize_as_map_keyed_by_field_name() {
        let set: ValueSet = [
            (Username, Some(CredValue::text("bob"))),
            (AgentForward, Some(CredValue::Flag(true))),
            (Key, None),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"username":"bob","agent-forward":true,"key":null}"#);

        let back: ValueSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn overlay_ignores_unusable_values() {
        let mut base: ValueSet = [
            (Host, CredValue::text("{host}")),
            (Username, CredValue::text("deploy")),
        ]
        .into_iter()
        .collect();
        let stored: ValueSet = [
            (Host, Some(CredValue::text("example.com"))),
            (Username, Some(CredValue::text(""))),
            (Password, Some(CredValue::text("{pw}"))),
            (Key, None),
        ]
        .into_iter()
        .collect();

        base.overlay(&stored);
        assert_eq!(base.get_text(Host), Some("example.com"));
        assert_eq!(base.get_text(Username), Some("deploy"));
        assert!(!base.contains(Password));
        assert!(!base.contains(Key));
    }
}
