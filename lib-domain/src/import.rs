//! CSV bulk import of learning resources. Spreadsheet exports arrive as
//! one row per content link; rows sharing (category, mainTitle) fold
//! into one resource with an ordered content list.

use lib_core::{AppResult, ErrType};
use serde::Deserialize;

use crate::datastore::learning_url::Content;

/// One parsed CSV row. Headers follow the spreadsheet template the
/// import screen documents (camelCase); absent columns default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatRow {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub main_title: String,
    #[serde(default)]
    pub main_description: String,
    #[serde(default)]
    pub content_title: String,
    #[serde(default)]
    pub content_description: String,
    #[serde(default)]
    pub content_url: String,
}

/// A grouped resource ready to be persisted for a workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningUrlDraft {
    pub category: String,
    pub main_title: String,
    pub main_description: String,
    pub contents: Vec<Content>,
}

pub fn parse_rows(bytes: &[u8]) -> AppResult<Vec<FlatRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(bytes);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        let row: FlatRow = row.map_err(|err| ErrType::InvalidBody.err(err, "Malformed CSV import"))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Fold flat rows into resources grouped by (category, mainTitle).
///
/// Rows missing either key field are dropped silently. The first
/// encountered mainDescription wins per group; each row carrying both a
/// content title and url contributes one content entry in input order.
/// Groups come out in first-encountered key order, deterministically.
pub fn group_rows(rows: &[FlatRow]) -> Vec<LearningUrlDraft> {
    let mut groups: Vec<LearningUrlDraft> = Vec::new();
    let mut index: std::collections::HashMap<(String, String), usize> = std::collections::HashMap::new();

    for row in rows {
        if row.category.is_empty() || row.main_title.is_empty() {
            continue;
        }

        let key = (row.category.clone(), row.main_title.clone());
        let at = *index.entry(key).or_insert_with(|| {
            groups.push(LearningUrlDraft {
                category: row.category.clone(),
                main_title: row.main_title.clone(),
                main_description: row.main_description.clone(),
                contents: Vec::new(),
            });
            groups.len() - 1
        });

        if !row.content_title.is_empty() && !row.content_url.is_empty() {
            groups[at].contents.push(Content {
                title: row.content_title.clone(),
                description: row.content_description.clone(),
                url: row.content_url.clone(),
            });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, main_title: &str, content_title: &str, content_url: &str) -> FlatRow {
        FlatRow {
            category: category.into(),
            main_title: main_title.into(),
            content_title: content_title.into(),
            content_url: content_url.into(),
            ..Default::default()
        }
    }

    #[test]
    fn groups_rows_sharing_the_composite_key() {
        let rows = vec![row("A", "T", "c1", "u1"), row("A", "T", "c2", "u2")];

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "A");
        assert_eq!(groups[0].main_title, "T");
        assert_eq!(groups[0].contents.len(), 2);
        assert_eq!(groups[0].contents[0].title, "c1");
        assert_eq!(groups[0].contents[1].title, "c2");
    }

    #[test]
    fn drops_rows_missing_a_key_field() {
        let rows = vec![row("", "T", "c1", "u1"), row("A", "", "c2", "u2")];
        assert!(group_rows(&rows).is_empty());
    }

    #[test]
    fn first_main_description_wins() {
        let mut first = row("A", "T", "c1", "u1");
        first.main_description = "keep".into();
        let mut second = row("A", "T", "c2", "u2");
        second.main_description = "ignore".into();

        let groups = group_rows(&[first, second]);
        assert_eq!(groups[0].main_description, "keep");
    }

    #[test]
    fn row_without_content_still_establishes_the_group() {
        // key fields present, content url missing: the group exists but
        // gains no content entry from this row
        let rows = vec![row("A", "T", "c1", ""), row("A", "T", "c2", "u2")];

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].contents.len(), 1);
        assert_eq!(groups[0].contents[0].title, "c2");
    }

    #[test]
    fn groups_appear_in_first_encountered_order() {
        let rows = vec![row("B", "T2", "c1", "u1"), row("A", "T1", "c2", "u2"), row("B", "T2", "c3", "u3")];

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].main_title, "T2");
        assert_eq!(groups[1].main_title, "T1");
    }

    #[test]
    fn parses_the_template_headers() {
        let csv = "category,mainTitle,mainDescription,contentTitle,contentDescription,contentUrl\n\
                   A,T,desc,c1,cdesc,https://example.com/1\n\
                   A,T,,c2,,https://example.com/2\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].main_description, "desc");
        assert_eq!(rows[1].content_url, "https://example.com/2");

        let groups = group_rows(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].contents.len(), 2);
    }

    #[test]
    fn parses_rows_with_missing_columns() {
        let csv = "category,mainTitle,contentTitle,contentUrl\nA,T,c1,u1\n";

        let rows = parse_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].main_description, "");
        assert_eq!(rows[0].content_title, "c1");
    }
}
