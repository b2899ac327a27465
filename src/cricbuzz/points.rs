use crate::{
    cricbuzz::PointsRow,
    utils::{cell, clean_text},
    Page,
};
use lazy_static::lazy_static;
use scraper::{Html, Selector};

const E: &str = "Invalid selector";
lazy_static! {
    static ref POINTS_TABLE: Selector = Selector::parse(".cb-srs-pnts").expect(E);
    static ref ROW: Selector = Selector::parse("tr").expect(E);
    static ref CELL: Selector = Selector::parse("td").expect(E);
}

#[derive(Debug)]
pub struct PointsTable {
    pub series_id: String,
}

impl PointsRow {
    fn from_cells(cells: &[String]) -> Self {
        let number = |index: usize| -> Option<u32> { cell(cells, index).parse().ok() };
        PointsRow {
            position: cell(cells, 0),
            team: cell(cells, 1),
            matches: number(2),
            won: number(3),
            lost: number(4),
            tied: number(5),
            no_result: number(6),
            points: number(7),
            net_run_rate: cell(cells, 8).parse().ok(),
        }
    }
}

impl Page for PointsTable {
    type Output = Vec<PointsRow>;

    fn path(&self) -> String {
        format!("/cricket-series/{}/points-table", self.series_id)
    }

    fn extract(&self, doc: &Html) -> Self::Output {
        let mut rows = vec![];
        for table in doc.select(&POINTS_TABLE) {
            // First row is the column header.
            for row in table.select(&ROW).skip(1) {
                let cells = row.select(&CELL).map(clean_text).collect::<Vec<_>>();
                if !cells.is_empty() {
                    rows.push(PointsRow::from_cells(&cells));
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_parsing_points_table() {
        let page = PointsTable {
            series_id: "7476".to_string(),
        };
        let html = fs::read_to_string("tests/htmls/points.html").expect("Invalid file path");
        let html = Html::parse_document(&html);

        let rows = page.extract(&html);
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            PointsRow {
                position: "1".to_string(),
                team: "India".to_string(),
                matches: Some(9),
                won: Some(9),
                lost: Some(0),
                tied: Some(0),
                no_result: Some(0),
                points: Some(18),
                net_run_rate: Some(2.570),
            }
        );
        assert_eq!(rows[2].team, "Netherlands");
        assert_eq!(rows[2].net_run_rate, Some(-1.825));
        assert_eq!(rows[3].team, "Afghanistan");
        assert_eq!(rows[3].points, Some(8));
        assert_eq!(rows[3].net_run_rate, None);
    }
}
