//! JSON shapes printed by the CLI.

use ledger_core::PageResult;
use reports::contract::model::Report;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Edge<'a> {
    pub cursor: String,
    pub node: &'a Report,
}

#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Connection-style page: edges with cursors plus page info.
#[derive(Debug, Serialize)]
pub struct Connection<'a> {
    pub total_count: u64,
    pub offset: u64,
    pub edges: Vec<Edge<'a>>,
    pub page_info: PageInfo,
}

impl<'a> From<&'a PageResult<Report>> for Connection<'a> {
    fn from(page: &'a PageResult<Report>) -> Self {
        Self {
            total_count: page.total,
            offset: page.offset,
            edges: page
                .edges()
                .map(|(cursor, node)| Edge { cursor, node })
                .collect(),
            page_info: PageInfo {
                start_cursor: page.start_cursor(),
                end_cursor: page.end_cursor(),
                has_next_page: page.has_next_page(),
                has_previous_page: page.has_previous_page(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Count {
    pub total_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::encode_cursor;

    #[test]
    fn connection_shape() {
        let page = PageResult::new(vec![Report::new(1, 0, vec![0xab])], 3, 1);
        let json = serde_json::to_value(Connection::from(&page)).unwrap();

        assert_eq!(json["total_count"], 3);
        assert_eq!(json["edges"][0]["cursor"], encode_cursor(1));
        assert_eq!(json["edges"][0]["node"]["payload"], "ab");
        assert_eq!(json["page_info"]["has_next_page"], true);
        assert_eq!(json["page_info"]["has_previous_page"], true);
    }
}
