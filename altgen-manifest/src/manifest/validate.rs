//! Source span lookup for validation errors.

use miette::SourceSpan;

/// Find every quoted occurrence of `value` in the TOML source.
///
/// Spans cover the value without its quotes. Both basic (`"..."`) and
/// literal (`'...'`) strings are searched, in source order.
pub(crate) fn find_value_spans(src: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        let pattern = format!("{quote}{value}{quote}");
        spans.extend(
            src.match_indices(&pattern)
                .map(|(pos, _)| SourceSpan::from((pos + 1, value.len()))),
        );
    }
    spans.sort_by_key(|span| span.offset());
    spans
}
