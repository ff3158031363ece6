use log::debug;
use scraper::{ElementRef, Html, Selector};

/// One row of the output summary. Missing fields stay `None` until the
/// CSV boundary renders them as "N/A".
#[derive(Debug, Clone, Default)]
pub struct ParcelRecord {
    pub account: String,
    pub property_address: Option<String>,
    pub appraised_curr: Option<String>,
    pub appraised_prev: Option<String>,
    pub pct_appraised: Option<f64>,
    pub market_curr: Option<String>,
    pub market_prev: Option<String>,
    pub pct_market: Option<f64>,
    pub land_area: Option<String>,
    pub living_area: Option<String>,
}

struct Valuations {
    market_prev: String,
    appraised_prev: String,
    market_curr: String,
    appraised_curr: String,
}

pub struct Extractor {
    include_areas: bool,
    cell_selector: Selector,
    row_selector: Selector,
    td_selector: Selector,
}

impl Extractor {
    pub fn new(include_areas: bool) -> Self {
        Extractor {
            include_areas,
            cell_selector: Selector::parse("td, th").unwrap(),
            row_selector: Selector::parse("tr").unwrap(),
            td_selector: Selector::parse("td").unwrap(),
        }
    }

    /// Pulls every field out of one record page. Never fails: each field
    /// group falls through to `None` on its own when its anchor element
    /// is missing, without affecting the other groups.
    pub fn extract(&self, html: &str, account: &str) -> ParcelRecord {
        let document = Html::parse_document(html);

        let property_address = self.find_address(&document);

        let valuations = self.find_valuations(&document);
        if valuations.is_none() {
            debug!("Valuation table not found for {}", account);
        }
        let (market_prev, appraised_prev, market_curr, appraised_curr) = match valuations {
            Some(v) => (
                Some(v.market_prev),
                Some(v.appraised_prev),
                Some(v.market_curr),
                Some(v.appraised_curr),
            ),
            None => (None, None, None, None),
        };

        let pct_appraised = pct_change(&appraised_curr, &appraised_prev);
        let pct_market = pct_change(&market_curr, &market_prev);

        let (land_area, living_area) = if self.include_areas {
            self.find_areas(&document).unwrap_or((None, None))
        } else {
            (None, None)
        };

        ParcelRecord {
            account: account.to_string(),
            property_address,
            appraised_curr,
            appraised_prev,
            pct_appraised,
            market_curr,
            market_prev,
            pct_market,
            land_area,
            living_area,
        }
    }

    // The address value is the text of the next <th> after the label
    // cell, in document order.
    fn find_address(&self, document: &Html) -> Option<String> {
        let mut cells = document.select(&self.cell_selector);
        cells
            .by_ref()
            .find(|el| el.value().name() == "td" && element_text(el).contains("Property Address"))?;
        cells
            .find(|el| el.value().name() == "th")
            .map(|th| element_text(&th))
    }

    // Columns in the Total row: 1 = prior market, 2 = prior appraised,
    // 4 = current market, 5 = current appraised.
    fn find_valuations(&self, document: &Html) -> Option<Valuations> {
        let heading = document
            .select(&self.cell_selector)
            .find(|el| el.value().name() == "th" && element_text(el).contains("Valuations"))?;
        let table = heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "table")?;
        let total_row = table
            .select(&self.row_selector)
            .find(|row| element_text(row).contains("Total"))?;
        let cells: Vec<ElementRef> = total_row.select(&self.td_selector).collect();

        Some(Valuations {
            market_prev: numeric_cell(&cells, 1)?,
            appraised_prev: numeric_cell(&cells, 2)?,
            market_curr: numeric_cell(&cells, 4)?,
            appraised_curr: numeric_cell(&cells, 5)?,
        })
    }

    // Land area and living area sit in the row directly below the
    // "Land Area" label row.
    fn find_areas(&self, document: &Html) -> Option<(Option<String>, Option<String>)> {
        let label = document
            .select(&self.cell_selector)
            .find(|el| el.value().name() == "td" && element_text(el).contains("Land Area"))?;
        let label_row = label
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "tr")?;
        let value_row = label_row
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "tr")?;
        let cells: Vec<ElementRef> = value_row.select(&self.td_selector).collect();

        Some((digits_cell(&cells, 0), digits_cell(&cells, 1)))
    }
}

/// Year-over-year change in percent, rounded to 2 decimals. A missing
/// or non-numeric operand and a zero divisor all yield `None`, never an
/// error.
pub fn calc_pct_change(current: &str, previous: &str) -> Option<f64> {
    let current: f64 = current.parse().ok()?;
    let previous: f64 = previous.parse().ok()?;
    if previous == 0.0 {
        return None;
    }
    let pct = (current - previous) / previous * 100.0;
    Some((pct * 100.0).round() / 100.0)
}

fn pct_change(current: &Option<String>, previous: &Option<String>) -> Option<f64> {
    match (current, previous) {
        (Some(c), Some(p)) => calc_pct_change(c, p),
        _ => None,
    }
}

fn element_text(el: &ElementRef) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn numeric_cell(cells: &[ElementRef], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|cell| element_text(cell).replace(',', ""))
}

fn digits_cell(cells: &[ElementRef], index: usize) -> Option<String> {
    let digits: String = element_text(cells.get(index)?)
        .chars()
        .filter(|c| c.is_digit(10))
        .collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
