//! # Operation Identity
//!
//! An operation is one HTTP method on one path template within the
//! specification of one service. `OperationKey` is the triple that names
//! it everywhere: in example records, in catalog entries, and in the
//! reconciliation report.
//!
//! Keys order by service, then path, then method, and `HttpMethod`
//! variants are declared alphabetically so that sorted key sets read the
//! same as a sort over their rendered strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// HTTP methods recognised as operations inside a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Delete,
    Get,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    /// All recognised methods, in declaration order.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
    ];

    /// Upper-case rendering, as used in catalogs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// Lower-case rendering, as used in path items and example file names.
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "delete",
            HttpMethod::Get => "get",
            HttpMethod::Patch => "patch",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = CoreError;

    /// Case-insensitive: `get`, `GET` and `Get` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

impl FromStr for ParameterLocation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(ParameterLocation::Path),
            "query" => Ok(ParameterLocation::Query),
            "header" => Ok(ParameterLocation::Header),
            "cookie" => Ok(ParameterLocation::Cookie),
            other => Err(CoreError::UnknownLocation(other.to_string())),
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one declared operation: (service, path template, method).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationKey {
    /// Service the specification belongs to (its directory name).
    pub service: String,
    /// Path template exactly as written under `paths`.
    pub path: String,
    pub method: HttpMethod,
}

impl OperationKey {
    pub fn new(service: impl Into<String>, path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            service: service.into(),
            path: path.into(),
            method,
        }
    }
}

impl fmt::Display for OperationKey {
    /// Renders as `service METHOD /path`, the form used in reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.service, self.method, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
    }

    #[test]
    fn method_rejects_non_operation_keys() {
        for key in ["parameters", "summary", "head", "options", "trace", ""] {
            assert!(
                key.parse::<HttpMethod>().is_err(),
                "{key:?} must not parse as an operation method"
            );
        }
    }

    #[test]
    fn method_serializes_upper_case() {
        let json = serde_json::to_string(&HttpMethod::Delete).unwrap();
        assert_eq!(json, "\"DELETE\"");
        let back: HttpMethod = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(back, HttpMethod::Delete);
    }

    #[test]
    fn method_order_matches_string_order() {
        let mut by_variant = HttpMethod::ALL.to_vec();
        by_variant.sort();
        let mut by_string = HttpMethod::ALL.to_vec();
        by_string.sort_by_key(|m| m.as_str());
        assert_eq!(by_variant, by_string);
    }

    #[test]
    fn location_round_trips_through_str() {
        for loc in [
            ParameterLocation::Path,
            ParameterLocation::Query,
            ParameterLocation::Header,
            ParameterLocation::Cookie,
        ] {
            assert_eq!(loc.as_str().parse::<ParameterLocation>().unwrap(), loc);
        }
        assert!(matches!(
            "body".parse::<ParameterLocation>(),
            Err(CoreError::UnknownLocation(_))
        ));
    }

    #[test]
    fn operation_key_display() {
        let key = OperationKey::new("registry", "/records/{id}", HttpMethod::Get);
        assert_eq!(key.to_string(), "registry GET /records/{id}");
    }

    #[test]
    fn operation_keys_sort_by_service_path_method() {
        let keys: BTreeSet<_> = [
            OperationKey::new("b", "/x", HttpMethod::Get),
            OperationKey::new("a", "/y", HttpMethod::Post),
            OperationKey::new("a", "/x", HttpMethod::Put),
            OperationKey::new("a", "/x", HttpMethod::Delete),
        ]
        .into_iter()
        .collect();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["a DELETE /x", "a PUT /x", "a POST /y", "b GET /x"]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn method_parse_ignores_ascii_case(idx in 0usize..5, mask in any::<u8>()) {
                let method = HttpMethod::ALL[idx];
                let mixed: String = method
                    .as_str()
                    .chars()
                    .enumerate()
                    .map(|(i, c)| if mask & (1 << (i % 8)) != 0 { c.to_ascii_lowercase() } else { c })
                    .collect();
                prop_assert_eq!(mixed.parse::<HttpMethod>().unwrap(), method);
            }
        }
    }
}
