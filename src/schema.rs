use serde::{Deserialize, Serialize};
use std::fmt;

/// The six data fields every upload must supply.
///
/// Matching against raw CSV headers is case/space/punctuation-insensitive:
/// "Media Type", "media_type", and "MEDIATYPE" all resolve to `MediaType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Date,
    Platform,
    Sentiment,
    Location,
    Engagements,
    MediaType,
}

impl RequiredField {
    /// All required fields in declaration order.
    pub const ALL: [RequiredField; 6] = [
        RequiredField::Date,
        RequiredField::Platform,
        RequiredField::Sentiment,
        RequiredField::Location,
        RequiredField::Engagements,
        RequiredField::MediaType,
    ];

    /// Canonical internal name of the field.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            RequiredField::Date => "date",
            RequiredField::Platform => "platform",
            RequiredField::Sentiment => "sentiment",
            RequiredField::Location => "location",
            RequiredField::Engagements => "engagements",
            RequiredField::MediaType => "mediatype",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Canonicalizes a column name for matching purposes.
///
/// Lowercases the name and removes spaces, hyphens, and underscores, so
/// "Media Type" and "media_type" both become "mediatype".
pub fn canonicalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Mapping from each required field to its column index in the uploaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    date: usize,
    platform: usize,
    sentiment: usize,
    location: usize,
    engagements: usize,
    mediatype: usize,
}

impl ColumnMap {
    /// Resolves the raw header row into a typed column mapping.
    ///
    /// Each required field must match exactly one header under
    /// canonicalization; when duplicate headers canonicalize to the same
    /// field the first occurrence wins.
    ///
    /// # Errors
    /// Returns `SchemaError::MissingColumns` naming every field that has no
    /// matching header. This is fatal for the upload: no partial mapping is
    /// ever produced.
    pub fn resolve(headers: &[String]) -> Result<Self, SchemaError> {
        let canonical: Vec<String> = headers.iter().map(|h| canonicalize(h)).collect();

        let find = |field: RequiredField| -> Option<usize> {
            canonical.iter().position(|c| c == field.canonical_name())
        };

        let mut missing = Vec::new();
        let mut index_of = |field: RequiredField| match find(field) {
            Some(idx) => idx,
            None => {
                missing.push(field);
                usize::MAX
            }
        };

        let date = index_of(RequiredField::Date);
        let platform = index_of(RequiredField::Platform);
        let sentiment = index_of(RequiredField::Sentiment);
        let location = index_of(RequiredField::Location);
        let engagements = index_of(RequiredField::Engagements);
        let mediatype = index_of(RequiredField::MediaType);

        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        Ok(ColumnMap {
            date,
            platform,
            sentiment,
            location,
            engagements,
            mediatype,
        })
    }

    /// Column index for a required field.
    pub fn index(&self, field: RequiredField) -> usize {
        match field {
            RequiredField::Date => self.date,
            RequiredField::Platform => self.platform,
            RequiredField::Sentiment => self.sentiment,
            RequiredField::Location => self.location,
            RequiredField::Engagements => self.engagements,
            RequiredField::MediaType => self.mediatype,
        }
    }
}

/// Errors produced while resolving the uploaded header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// One or more required columns have no matching header.
    MissingColumns(Vec<RequiredField>),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::MissingColumns(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.canonical_name()).collect();
                write!(f, "missing required columns: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonicalize_strips_separators_and_case() {
        assert_eq!(canonicalize("Media Type"), "mediatype");
        assert_eq!(canonicalize("media_type"), "mediatype");
        assert_eq!(canonicalize("MEDIA-TYPE"), "mediatype");
        assert_eq!(canonicalize("Engagements"), "engagements");
    }

    #[test]
    fn test_resolve_exact_headers() {
        let map = ColumnMap::resolve(&headers(&[
            "Date",
            "Platform",
            "Sentiment",
            "Location",
            "Engagements",
            "Media Type",
        ]))
        .unwrap();

        assert_eq!(map.index(RequiredField::Date), 0);
        assert_eq!(map.index(RequiredField::MediaType), 5);
    }

    #[test]
    fn test_resolve_is_order_independent() {
        let map = ColumnMap::resolve(&headers(&[
            "media_type",
            "engagements",
            "LOCATION",
            "sentiment",
            "platform",
            "date",
        ]))
        .unwrap();

        assert_eq!(map.index(RequiredField::MediaType), 0);
        assert_eq!(map.index(RequiredField::Engagements), 1);
        assert_eq!(map.index(RequiredField::Date), 5);
    }

    #[test]
    fn test_resolve_ignores_extra_columns() {
        let map = ColumnMap::resolve(&headers(&[
            "Author",
            "Date",
            "Platform",
            "Sentiment",
            "Location",
            "Engagements",
            "Media Type",
            "URL",
        ]))
        .unwrap();

        assert_eq!(map.index(RequiredField::Date), 1);
        assert_eq!(map.index(RequiredField::MediaType), 6);
    }

    #[test]
    fn test_resolve_reports_exactly_the_missing_fields() {
        let err = ColumnMap::resolve(&headers(&["Date", "Platform", "Engagements"])).unwrap_err();

        match err {
            SchemaError::MissingColumns(fields) => {
                assert_eq!(
                    fields,
                    vec![
                        RequiredField::Sentiment,
                        RequiredField::Location,
                        RequiredField::MediaType,
                    ]
                );
            }
        }
    }

    #[test]
    fn test_resolve_all_missing() {
        let err = ColumnMap::resolve(&headers(&["foo", "bar"])).unwrap_err();
        match err {
            SchemaError::MissingColumns(fields) => assert_eq!(fields.len(), 6),
        }
    }

    #[test]
    fn test_duplicate_headers_first_match_wins() {
        let map = ColumnMap::resolve(&headers(&[
            "Date",
            "date",
            "Platform",
            "Sentiment",
            "Location",
            "Engagements",
            "Media Type",
        ]))
        .unwrap();

        assert_eq!(map.index(RequiredField::Date), 0);
    }

    #[test]
    fn test_schema_error_display_names_fields() {
        let err = SchemaError::MissingColumns(vec![
            RequiredField::Date,
            RequiredField::MediaType,
        ]);
        assert_eq!(err.to_string(), "missing required columns: date, mediatype");
    }
}
