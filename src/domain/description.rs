use crate::domain::links::LinkRegistry;

/// Body used when no source issue seeds the ticket.
pub const PLACEHOLDER_BODY: &str = "Description: <TODO>\n\n";
const REFERENCES_HEADER: &str = "References\n";

/// Body followed by a References block listing every registered link in order.
pub fn compose_description(body: Option<&str>, links: &LinkRegistry) -> String {
    let body = body.unwrap_or(PLACEHOLDER_BODY);

    let mut description = String::with_capacity(body.len() + REFERENCES_HEADER.len());
    description.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        description.push('\n');
    }

    description.push_str(REFERENCES_HEADER);
    for entry in links {
        description.push_str("- ");
        description.push_str(&entry.url);
        description.push('\n');
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_placeholder_without_source_body() {
        let mut links = LinkRegistry::new();
        links.add("http://s1", "http://s1");

        let description = compose_description(None, &links);
        assert_eq!(
            description,
            "Description: <TODO>\n\nReferences\n- http://s1\n"
        );
    }

    #[test]
    fn starts_header_on_its_own_line() {
        let mut links = LinkRegistry::new();
        links.add("Github Issue", "https://github.com/o/r/issues/42");

        let description = compose_description(Some("steps..."), &links);
        assert_eq!(
            description,
            "steps...\nReferences\n- https://github.com/o/r/issues/42\n"
        );
    }

    #[test]
    fn lists_final_url_for_overwritten_title() {
        let mut links = LinkRegistry::new();
        links.add("T", "http://u1");
        links.add("U", "http://other");
        links.add("T", "http://u2");

        let description = compose_description(Some(""), &links);
        assert_eq!(description, "References\n- http://u2\n- http://other\n");
    }

    #[test]
    fn is_idempotent() {
        let mut links = LinkRegistry::new();
        links.add("a", "http://a");
        assert_eq!(
            compose_description(Some("body\n"), &links),
            compose_description(Some("body\n"), &links)
        );
    }
}
