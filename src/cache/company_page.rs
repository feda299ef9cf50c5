//! Parsing of a rendered company page

use crate::cache::CompanyRecord;
use crate::model::not_available;
use scraper::{Html, Selector};

const SUMMARY_LIST: &str = ".org-top-card-summary-info-list";
const SUMMARY_ITEM: &str = ".org-top-card-summary-info-list__info-item";
const INLINE_ITEMS: &str =
    ".org-top-card-summary-info-list .inline-block .org-top-card-summary-info-list__info-item";
const TITLE: &str = ".org-top-card-summary__title";

/// Reads industry, name and location from a company page source
///
/// The summary list shows "industry, location, ..." except for companies
/// without an industry, where every item sits in the inline block and the
/// first item is the location.
pub fn parse_company_page(html: &str) -> CompanyRecord {
    let document = Html::parse_document(html);

    let items = texts(&document, SUMMARY_ITEM);
    let no_industry = match select_count(&document, SUMMARY_LIST) {
        0 => false,
        _ => items.len() == texts(&document, INLINE_ITEMS).len(),
    };

    let (industry, location) = if no_industry {
        (None, items.first().cloned())
    } else {
        (items.first().cloned(), items.get(1).cloned())
    };

    CompanyRecord {
        industry: industry.unwrap_or_else(not_available),
        name: company_name(&document).unwrap_or_else(not_available),
        location: location.unwrap_or_else(not_available),
    }
}

fn company_name(document: &Html) -> Option<String> {
    let selector = Selector::parse(TITLE).ok()?;
    let title = document.select(&selector).next()?;

    title
        .value()
        .attr("title")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            let text = title.text().collect::<String>().trim().to_string();
            (!text.is_empty()).then_some(text)
        })
}

fn texts(document: &Html, css: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn select_count(document: &Html, css: &str) -> usize {
    Selector::parse(css)
        .map(|selector| document.select(&selector).count())
        .unwrap_or(0)
}
