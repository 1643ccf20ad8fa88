use taskdeck_core::Item;

/// Render a list of items as a Markdown checklist headed by `title`.
///
/// ```text
/// # Inbox
///
/// - [x] write report
///   quarterly numbers
///   Tags: work, q3
///
/// - [ ] call mom
///   No tags
/// ```
pub fn items_to_markdown(title: &str, items: &[Item]) -> String {
    let mut out = format!("# {}\n\n", title);

    if items.is_empty() {
        out.push_str("_No items_\n");
        return out;
    }

    let entries: Vec<String> = items.iter().map(item_entry).collect();
    out.push_str(&entries.join("\n"));
    out
}

fn item_entry(item: &Item) -> String {
    let marker = if item.completed { "x" } else { " " };
    let mut entry = format!("- [{}] {}\n", marker, item.title);

    for line in item.description.lines().filter(|l| !l.trim().is_empty()) {
        entry.push_str("  ");
        entry.push_str(line.trim_end());
        entry.push('\n');
    }

    if item.tags.is_empty() {
        entry.push_str("  No tags\n");
    } else {
        entry.push_str(&format!("  Tags: {}\n", item.tags.join(", ")));
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn item(title: &str, description: &str, completed: bool, tags: &[&str]) -> Item {
        Item {
            id: format!("item-{}", title),
            board_id: "board-1".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_markdown_lists_every_item() {
        let items = vec![
            item("write report", "quarterly numbers", true, &["work", "q3"]),
            item("call mom", "", false, &[]),
        ];

        let markdown = items_to_markdown("Inbox", &items);

        assert_eq!(
            markdown,
            "# Inbox\n\n\
             - [x] write report\n  quarterly numbers\n  Tags: work, q3\n\
             \n\
             - [ ] call mom\n  No tags\n"
        );
    }

    #[test]
    fn test_markdown_indents_multiline_descriptions() {
        let items = vec![item("plan", "first line\n\nsecond line  ", false, &["home"])];

        let markdown = items_to_markdown("home", &items);

        assert_eq!(
            markdown,
            "# home\n\n- [ ] plan\n  first line\n  second line\n  Tags: home\n"
        );
    }

    #[test]
    fn test_markdown_for_empty_list() {
        assert_eq!(items_to_markdown("Empty", &[]), "# Empty\n\n_No items_\n");
    }
}
