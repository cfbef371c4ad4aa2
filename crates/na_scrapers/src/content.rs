use na_core::{ContentElement, Error, Result};

/// Flattens a stored article body into one newline separated text.
///
/// Groups and lines keep their order. Non-text elements are skipped and
/// every kept line is trimmed. An article that yields nothing is an error,
/// so an empty prompt never reaches the model.
pub fn text_from_blocks(blocks: &[Vec<ContentElement>]) -> Result<String> {
    let text = blocks
        .iter()
        .flatten()
        .filter_map(ContentElement::as_text)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        return Err(Error::EmptyContent("content_col has no text lines".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blocks(value: serde_json::Value) -> Vec<Vec<ContentElement>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_joins_groups_in_order() {
        let content = blocks(json!([["  First line ", "Second line"], ["Third line\n"]]));
        let text = text_from_blocks(&content).unwrap();
        assert_eq!(text, "First line\nSecond line\nThird line");
    }

    #[test]
    fn test_skips_non_text_elements() {
        let content = blocks(json!([[{"type": "image", "src": "a.png"}, "Body"], [42, null]]));
        assert_eq!(text_from_blocks(&content).unwrap(), "Body");
    }

    #[test]
    fn test_empty_groups_are_an_error() {
        for value in [json!([]), json!([[], []]), json!([[null, {"img": "x"}], [1.5]])] {
            let result = text_from_blocks(&blocks(value));
            assert!(matches!(result, Err(Error::EmptyContent(_))));
        }
    }
}
