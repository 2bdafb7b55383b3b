use thiserror::Error;

/// Output width of the upstream face encoder.
pub const EMBEDDING_DIM: usize = 128;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty embedding field")]
    Empty,
    #[error("invalid component {token:?} at index {index}")]
    BadToken { index: usize, token: String },
}

/// Parse one persisted embedding field: a bracket-delimited,
/// comma-separated list of decimals, e.g. `"[0.123,-0.04,...]"`.
///
/// Strips at most one leading `[` and one trailing `]`; the stored format
/// is an external compatibility constraint and must round-trip through
/// [`format_embedding`] byte-compatibly. Dimension is not checked here,
/// that belongs to the gallery builder (and the matcher for queries).
pub fn parse_embedding(raw: &str) -> Result<Vec<f32>, ParseError> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    inner
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            token.parse::<f32>().map_err(|_| ParseError::BadToken {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Render a vector in the stored textual format, `[c0,c1,...]`.
pub fn format_embedding(vector: &[f32]) -> String {
    let mut out = String::with_capacity(vector.len() * 12 + 2);
    out.push('[');
    for (i, component) in vector.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&component.to_string());
    }
    out.push(']');
    out
}

/// Euclidean (L2) distance between two equal-length vectors.
pub fn distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    // zip/map/sum lets LLVM auto-vectorize the scan
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_decimals() {
        let v = parse_embedding("[0.123,-0.04,1]").unwrap();
        assert_eq!(v, vec![0.123, -0.04, 1.0]);
    }

    #[test]
    fn brackets_are_optional() {
        assert_eq!(parse_embedding("1, 2 ,3").unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn rejects_empty_field() {
        assert_eq!(parse_embedding(""), Err(ParseError::Empty));
        assert_eq!(parse_embedding("   "), Err(ParseError::Empty));
        assert_eq!(parse_embedding("[]"), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_non_numeric_token() {
        let err = parse_embedding("[1,0,notanumber]").unwrap_err();
        assert_eq!(
            err,
            ParseError::BadToken {
                index: 2,
                token: "notanumber".to_string()
            }
        );
    }

    #[test]
    fn rejects_missing_component() {
        assert!(matches!(
            parse_embedding("[1,,3]"),
            Err(ParseError::BadToken { index: 1, .. })
        ));
    }

    #[test]
    fn format_round_trips_through_parse() {
        let v = vec![1.0, -0.5, 0.25, 128.0];
        assert_eq!(parse_embedding(&format_embedding(&v)).unwrap(), v);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = [0.3_f32, -1.2, 4.0];
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = [1.0_f32, 2.0, 3.0];
        let b = [-2.0_f32, 0.5, 9.0];
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn distance_matches_pythagoras() {
        assert_eq!(distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
    }
}
