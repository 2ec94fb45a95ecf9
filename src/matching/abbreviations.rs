/// Common shorthand for branch names and what it may stand for.
/// Keys are lowercase; expansions are matched as lowercase substrings.
const BRANCH_ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("cs", &["computer science", "computers"]),
    ("cse", &["computer science", "computers"]),
    ("comp", &["computer science", "computers"]),
    ("ece", &["electronics and communication", "electronics"]),
    ("ec", &["electronics and communication", "electronics"]),
    ("eee", &["electrical and electronics", "electrical"]),
    ("ee", &["electrical and electronics", "electrical"]),
    ("ei", &["electronics and instrumentation", "instrumentation"]),
    ("te", &["telecommunication"]),
    ("me", &["mechanical"]),
    ("mech", &["mechanical"]),
    ("cv", &["civil"]),
    ("ce", &["civil"]),
    ("ise", &["information science"]),
    ("is", &["information science"]),
    ("it", &["information technology", "information science"]),
    ("ai", &["artificial intelligence"]),
    ("ml", &["machine learning"]),
    ("aiml", &["artificial intelligence and machine learning", "artificial intelligence"]),
    ("aids", &["artificial intelligence and data science", "artificial intelligence"]),
    ("ds", &["data science", "data sciences"]),
    ("iot", &["internet of things"]),
    ("cy", &["cyber security"]),
    ("bt", &["biotechnology", "bio technology"]),
    ("ch", &["chemical"]),
    ("ae", &["aeronautical", "aerospace"]),
    ("au", &["automobile"]),
    ("mt", &["mechatronics"]),
    ("ro", &["robotics"]),
    ("im", &["industrial engineering and management", "industrial"]),
];

fn lookup(token: &str) -> Option<&'static [&'static str]> {
    BRANCH_ABBREVIATIONS
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, expansions)| *expansions)
}

/// The query itself followed by every expansion: whole-query, with spaces and
/// punctuation squeezed out (`"ai & ml"` → `aiml`), and token by token.
pub fn expand_query(query: &str) -> Vec<String> {
    let mut variants = vec![query.to_string()];

    let compact: String = query.chars().filter(|c| c.is_alphanumeric()).collect();
    for key in [query, compact.as_str()] {
        if let Some(expansions) = lookup(key) {
            variants.extend(expansions.iter().map(|e| e.to_string()));
        }
    }

    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.len() > 1 {
        for (idx, token) in tokens.iter().enumerate() {
            let Some(expansions) = lookup(token) else {
                continue;
            };
            for expansion in expansions.iter() {
                let mut replaced = tokens.clone();
                replaced[idx] = *expansion;
                variants.push(replaced.join(" "));
            }
        }
    }

    let mut seen = std::collections::HashSet::new();
    variants.retain(|v| seen.insert(v.clone()));
    variants
}
