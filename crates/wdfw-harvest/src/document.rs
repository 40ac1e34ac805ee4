//! Flattens a parsed report page into the ordered sequence of nodes the
//! context walker consumes: district/unit headings and data tables.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static SEL_NODES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3, h4, table").expect("invalid selector: nodes"));

static SEL_CAPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("caption").expect("invalid selector: caption"));

static SEL_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("invalid selector: row"));

static SEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("invalid selector: cell"));

/// `h2` labels districts; `h3` and `h4` are interchangeable unit labels
/// depending on the report year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    Major,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading { level: HeadingLevel, text: String },
    Table(RawTable),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub caption: Option<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(caption: Option<&str>, rows: Vec<Vec<String>>) -> Self {
        Self {
            caption: caption.map(str::to_string),
            rows,
        }
    }
}

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn read_table(table: ElementRef) -> RawTable {
    let caption = table
        .select(&SEL_CAPTION)
        .next()
        .map(|c| normalize_whitespace(&elem_text(c)));

    let rows = table
        .select(&SEL_ROW)
        .map(|row| {
            row.select(&SEL_CELL)
                .map(|cell| normalize_whitespace(&elem_text(cell)))
                .collect()
        })
        .collect();

    RawTable { caption, rows }
}

/// Returns every heading and table of the page in document order.
pub fn read_nodes(html: &str) -> Vec<Node> {
    let document = Html::parse_document(html);

    document
        .select(&SEL_NODES)
        .map(|element| match element.value().name() {
            "table" => Node::Table(read_table(element)),
            "h2" => Node::Heading {
                level: HeadingLevel::Major,
                text: normalize_whitespace(&elem_text(element)),
            },
            _ => Node::Heading {
                level: HeadingLevel::Minor,
                text: normalize_whitespace(&elem_text(element)),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nodes_in_document_order() {
        let html = r#"
            <h2>District 1</h2>
            <h3>101 - SHERMAN</h3>
            <table>
                <caption> 105 – KELLY  HILL </caption>
                <tr><th>Method</th><th>Total</th></tr>
                <tr><td> Archery </td><td>1,234</td></tr>
            </table>
            <h4>108 - DOUGLAS</h4>
        "#;

        let nodes = read_nodes(html);

        assert_eq!(nodes.len(), 4);
        assert_eq!(
            nodes[0],
            Node::Heading {
                level: HeadingLevel::Major,
                text: "District 1".to_string()
            }
        );
        assert_eq!(
            nodes[1],
            Node::Heading {
                level: HeadingLevel::Minor,
                text: "101 - SHERMAN".to_string()
            }
        );

        let Node::Table(table) = &nodes[2] else {
            panic!("expected a table node, got {:?}", nodes[2]);
        };
        assert_eq!(table.caption.as_deref(), Some("105 – KELLY HILL"));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Archery", "1,234"]);

        assert!(matches!(
            &nodes[3],
            Node::Heading { level: HeadingLevel::Minor, text } if text == "108 - DOUGLAS"
        ));
    }

    #[test]
    fn test_table_without_caption() {
        let nodes = read_nodes("<table><tr><td>x</td></tr></table>");

        assert_eq!(
            nodes,
            vec![Node::Table(RawTable::new(None, vec![vec!["x".to_string()]]))]
        );
    }
}
