use crate::types::Prompt;

/// Prompts whose name or description contains `search_term` (ignoring case)
/// and which belong to `category` when one is given.
pub fn filter_prompts<'a>(
    prompts: &'a [Prompt],
    search_term: &str,
    category: Option<&str>,
) -> Vec<&'a Prompt> {
    let needle = search_term.to_lowercase();

    prompts
        .iter()
        .filter(|prompt| {
            let matches_search = needle.is_empty()
                || prompt.name.to_lowercase().contains(&needle)
                || prompt.description.to_lowercase().contains(&needle);
            let matches_category = category.map_or(true, |c| prompt.category == c);
            matches_search && matches_category
        })
        .collect()
}

/// Distinct categories in order of first appearance.
pub fn categories(prompts: &[Prompt]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for prompt in prompts {
        if !seen.contains(&prompt.category) {
            seen.push(prompt.category.clone());
        }
    }
    seen
}

/// Prompts grouped under their category, for the sidebar.
pub fn group_by_category(prompts: &[Prompt]) -> Vec<(String, Vec<&Prompt>)> {
    categories(prompts)
        .into_iter()
        .map(|category| {
            let members = prompts.iter().filter(|p| p.category == category).collect();
            (category, members)
        })
        .collect()
}
