//! Route path pattern matching.
//!
//! # Responsibilities
//! - Compile route paths ("/", "/recherche", "/livre/:id", "/docs/:rest*")
//! - Match a requested path segment by segment
//! - Rank patterns by specificity
//! - Fill a pattern back into a concrete path (reverse routing)
//!
//! # Design Decisions
//! - Static segments are case-insensitive, params keep the caller's case
//! - Trailing slashes and repeated slashes are ignored
//! - Segments are percent-decoded before matching
//! - Optional (`:x?`) and catch-all (`:x*`) params only in last position,
//!   so matching never backtracks
//! - No regex to guarantee O(n) matching

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use percent_encoding::percent_decode_str;

/// Path parameters or query pairs, keyed by name.
pub type Params = BTreeMap<String, String>;

/// Why a route path could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("path must start with '/'")]
    MissingLeadingSlash,

    #[error("empty parameter name in segment '{0}'")]
    EmptyParam(String),

    #[error("segment '{0}' is only allowed in last position")]
    NotLast(String),

    #[error("parameter ':{0}' appears more than once")]
    DuplicateParam(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
    Optional(String),
    CatchAll(String),
}

impl Segment {
    fn score(&self) -> u8 {
        match self {
            Segment::Static(_) => 4,
            Segment::Param(_) => 3,
            Segment::Optional(_) => 2,
            Segment::CatchAll(_) => 1,
        }
    }

    fn key(&self) -> &str {
        match self {
            Segment::Static(s) => s,
            Segment::Param(_) => ":",
            Segment::Optional(_) => ":?",
            Segment::CatchAll(_) => ":*",
        }
    }
}

/// A compiled route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a route path.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if !source.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash);
        }

        let raw = path_segments(source);
        let mut seen = BTreeSet::new();
        let mut segments = Vec::with_capacity(raw.len());

        for (i, seg) in raw.iter().enumerate() {
            let last = i + 1 == raw.len();
            let segment = match seg.strip_prefix(':') {
                None => Segment::Static(seg.to_lowercase()),
                Some(param) => {
                    let (name, modifier) = match param.char_indices().last() {
                        Some((at, c @ ('*' | '?'))) => (&param[..at], Some(c)),
                        _ => (param, None),
                    };

                    if name.is_empty() {
                        return Err(PatternError::EmptyParam(seg.to_string()));
                    }
                    if !seen.insert(name) {
                        return Err(PatternError::DuplicateParam(name.to_string()));
                    }
                    match modifier {
                        Some('*') => Segment::CatchAll(name.to_string()),
                        Some(_) => Segment::Optional(name.to_string()),
                        None => Segment::Param(name.to_string()),
                    }
                }
            };

            if !last && matches!(segment, Segment::Optional(_) | Segment::CatchAll(_)) {
                return Err(PatternError::NotLast(seg.to_string()));
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Identity used for collision detection. Two patterns with the same key
    /// accept exactly the same requests.
    pub fn key(&self) -> String {
        let parts: Vec<&str> = self.segments.iter().map(Segment::key).collect();
        format!("/{}", parts.join("/"))
    }

    /// Match already-split request segments, returning the captured params.
    pub fn matches(&self, request: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        let mut i = 0;

        for segment in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    let got = request.get(i)?;
                    if got.to_lowercase() != *expected {
                        return None;
                    }
                    i += 1;
                }
                Segment::Param(name) => {
                    let got = request.get(i)?;
                    params.insert(name.clone(), (*got).to_string());
                    i += 1;
                }
                Segment::Optional(name) => {
                    if let Some(got) = request.get(i) {
                        params.insert(name.clone(), (*got).to_string());
                        i += 1;
                    }
                }
                Segment::CatchAll(name) => {
                    params.insert(name.clone(), request[i..].join("/"));
                    i = request.len();
                }
            }
        }

        (i == request.len()).then_some(params)
    }

    /// Build a concrete path from params. Returns the name of the first
    /// missing required param on failure.
    pub fn fill(&self, params: &Params) -> Result<String, String> {
        let mut parts = Vec::with_capacity(self.segments.len());

        for segment in &self.segments {
            match segment {
                Segment::Static(s) => parts.push(s.clone()),
                Segment::Param(name) => match params.get(name) {
                    Some(value) => parts.push(value.clone()),
                    None => return Err(name.clone()),
                },
                Segment::Optional(name) | Segment::CatchAll(name) => {
                    if let Some(value) = params.get(name).filter(|v| !v.is_empty()) {
                        parts.push(value.trim_matches('/').to_string());
                    }
                }
            }
        }

        Ok(format!("/{}", parts.join("/")))
    }

    /// Order by specificity: higher segment scores first. When one pattern
    /// is a prefix of the other, the longer one wins unless its extra segment
    /// can match nothing (optional or catch-all).
    pub fn cmp_specificity(&self, other: &Self) -> Ordering {
        for (a, b) in self.segments.iter().zip(&other.segments) {
            match a.score().cmp(&b.score()) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match self.segments.len().cmp(&other.segments.len()) {
            Ordering::Equal => Ordering::Equal,
            Ordering::Greater => tail_rank(&self.segments[other.segments.len()]),
            Ordering::Less => tail_rank(&other.segments[self.segments.len()]).reverse(),
        }
    }
}

fn tail_rank(extra: &Segment) -> Ordering {
    match extra {
        Segment::Static(_) | Segment::Param(_) => Ordering::Greater,
        Segment::Optional(_) | Segment::CatchAll(_) => Ordering::Less,
    }
}

/// Split a path into its non-empty segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Percent-decode a path or segment. Invalid UTF-8 is replaced, not rejected.
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Separate the path from the query, dropping any fragment.
pub fn split_request(requested: &str) -> (&str, Option<&str>) {
    let without_fragment = requested.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    }
}

/// Decode a query string into pairs. Later duplicates win.
pub fn parse_query(query: Option<&str>) -> Params {
    query
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
