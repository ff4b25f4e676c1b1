/// Renders the generation prompt from assembled context and the user query.
pub fn build_prompt(context: &str, query: &str) -> String {
    format!("Context: {context}\n\nQuestion: {query}\n\nAnswer:")
}

/// Joins document texts with a single space, keeping rank order and duplicates.
pub fn assemble_context<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    texts.into_iter().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_empty_context() {
        assert_eq!(
            build_prompt("", "what?"),
            "Context: \n\nQuestion: what?\n\nAnswer:"
        );
    }

    #[test]
    fn test_context_keeps_duplicates_in_order() {
        let ctx = assemble_context(["b", "a", "b"]);
        assert_eq!(ctx, "b a b");
    }
}
