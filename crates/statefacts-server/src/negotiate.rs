//! `Accept` header negotiation for the 404 fallback.
//!
//! Formats are tried in a fixed order (HTML, JSON, plain text) and the first
//! one the client accepts with a non-zero quality wins. Quality values only
//! decide acceptability, not ordering.

/// The representation used for a not-found response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundFormat {
  Html,
  Json,
  Text,
}

impl NotFoundFormat {
  /// Pick the format for an `Accept` header value. A missing or blank header
  /// accepts anything, so HTML is chosen.
  pub fn negotiate(accept: Option<&str>) -> Self {
    let Some(accept) = accept.filter(|a| !a.trim().is_empty()) else {
      return Self::Html;
    };
    let ranges: Vec<MediaRange<'_>> =
      accept.split(',').filter_map(MediaRange::parse).collect();

    if accepts(&ranges, "text", "html") {
      Self::Html
    } else if accepts(&ranges, "application", "json") {
      Self::Json
    } else {
      Self::Text
    }
  }
}

struct MediaRange<'a> {
  kind:    &'a str,
  subtype: &'a str,
  quality: f32,
}

impl<'a> MediaRange<'a> {
  fn parse(item: &'a str) -> Option<Self> {
    let mut parts = item.split(';');
    let (kind, subtype) = parts.next()?.trim().split_once('/')?;

    let mut quality = 1.0;
    for param in parts {
      if let Some((name, value)) = param.split_once('=')
        && name.trim().eq_ignore_ascii_case("q")
      {
        quality = value.trim().parse().unwrap_or(0.0);
      }
    }

    Some(Self { kind: kind.trim(), subtype: subtype.trim(), quality })
  }

  fn matches(&self, kind: &str, subtype: &str) -> bool {
    let kind_ok = self.kind == "*" || self.kind.eq_ignore_ascii_case(kind);
    let sub_ok = self.subtype == "*" || self.subtype.eq_ignore_ascii_case(subtype);
    kind_ok && sub_ok
  }
}

/// `true` if the most specific range matching `kind/subtype` has `q > 0`.
fn accepts(ranges: &[MediaRange<'_>], kind: &str, subtype: &str) -> bool {
  ranges
    .iter()
    .filter(|r| r.matches(kind, subtype))
    .max_by_key(|r| specificity(r))
    .is_some_and(|r| r.quality > 0.0)
}

fn specificity(range: &MediaRange<'_>) -> u8 {
  match (range.kind, range.subtype) {
    ("*", _) => 0,
    (_, "*") => 1,
    _ => 2,
  }
}
