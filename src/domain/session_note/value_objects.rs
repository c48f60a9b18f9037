use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Session Note Value Objects
// ============================================================================

/// Note template. The four practice templates are named; anything else is
/// kept verbatim as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NoteTemplate {
    Hypnose,
    Sophrologie,
    Naturopathie,
    Suivi,
    Custom(String),
}

impl NoteTemplate {
    pub fn parse(name: &str) -> Self {
        match name {
            "Hypnose" => NoteTemplate::Hypnose,
            "Sophrologie" => NoteTemplate::Sophrologie,
            "Naturopathie" => NoteTemplate::Naturopathie,
            "Suivi" => NoteTemplate::Suivi,
            other => NoteTemplate::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NoteTemplate::Hypnose => "Hypnose",
            NoteTemplate::Sophrologie => "Sophrologie",
            NoteTemplate::Naturopathie => "Naturopathie",
            NoteTemplate::Suivi => "Suivi",
            NoteTemplate::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for NoteTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NoteTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NoteTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(NoteTemplate::parse(&name))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
