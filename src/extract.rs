//! Pure extraction of anime list rows from a rendered list page.
//!
//! Takes the HTML the browser produced and returns the rows in DOM
//! order. Kept free of browser state so it can be tested against
//! fixtures.

use crate::models::AnimeRecord;
use scraper::{Html, Selector};

/// Parse every list row out of a rendered animelist page.
///
/// A row contributes a record only when both its title anchor and its
/// thumbnail image are present; anything else is skipped. No sorting,
/// no deduplication.
pub fn parse_list_page(html: &str) -> Vec<AnimeRecord> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse(".list-table-data").unwrap();
    let title_selector = Selector::parse(".data.title a").unwrap();
    let image_selector = Selector::parse(".data.image img").unwrap();

    let mut records = Vec::new();

    for row in document.select(&row_selector) {
        let title_element = match row.select(&title_selector).next() {
            Some(el) => el,
            None => continue,
        };
        let image_element = match row.select(&image_selector).next() {
            Some(el) => el,
            None => continue,
        };

        let title = title_element.text().collect::<String>().trim().to_string();
        let url = title_element.value().attr("href").unwrap_or("").to_string();
        let image_url = image_element.value().attr("src").unwrap_or("").to_string();
        let id = anime_id_from_href(&url);

        records.push(AnimeRecord {
            id,
            title,
            image_url,
            url,
        });
    }

    records
}

/// Numeric id from a detail-page href, 0 when it cannot be parsed.
///
/// Hrefs come in both relative (`/anime/12345/Title`) and absolute
/// (`https://myanimelist.net/anime/12345/Title`) forms; the id is the
/// segment right after `anime` in either.
pub fn anime_id_from_href(href: &str) -> u32 {
    let mut segments = href.split('/');
    segments
        .find(|segment| *segment == "anime")
        .and_then(|_| segments.next())
        .and_then(|id| id.parse::<u32>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"
        <html><body>
        <table class="list-table">
          <tbody class="list-item">
            <tr class="list-table-data">
              <td class="data image">
                <a href="/anime/5114/Fullmetal_Alchemist__Brotherhood">
                  <img src="https://cdn.myanimelist.net/r/96x136/images/anime/1208/94745.jpg">
                </a>
              </td>
              <td class="data title">
                <a class="link sort" href="/anime/5114/Fullmetal_Alchemist__Brotherhood">
                  Fullmetal Alchemist: Brotherhood </a>
              </td>
            </tr>
            <tr class="list-table-data">
              <td class="data image"></td>
              <td class="data title">
                <a class="link sort" href="/anime/1/Cowboy_Bebop">Cowboy Bebop</a>
              </td>
            </tr>
            <tr class="list-table-data">
              <td class="data image">
                <a href="/anime/9253/Steins_Gate">
                  <img src="https://cdn.myanimelist.net/r/96x136/images/anime/1935/127974.jpg">
                </a>
              </td>
              <td class="data title">
                <a class="link sort" href="/anime/9253/Steins_Gate">Steins;Gate</a>
              </td>
            </tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn test_parses_rows_in_dom_order() {
        let records = parse_list_page(LIST_PAGE);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 5114);
        assert_eq!(records[0].title, "Fullmetal Alchemist: Brotherhood");
        assert_eq!(records[1].id, 9253);
        assert_eq!(records[1].title, "Steins;Gate");
    }

    #[test]
    fn test_row_without_image_is_dropped() {
        let records = parse_list_page(LIST_PAGE);
        assert!(records.iter().all(|r| r.id != 1));
    }

    #[test]
    fn test_row_without_title_anchor_is_dropped() {
        let html = r#"
            <tr class="list-table-data">
              <td class="data image"><img src="cover.jpg"></td>
              <td class="data title"></td>
            </tr>
        "#;
        assert!(parse_list_page(html).is_empty());
    }

    #[test]
    fn test_title_is_trimmed() {
        let records = parse_list_page(LIST_PAGE);
        assert_eq!(records[0].title, "Fullmetal Alchemist: Brotherhood");
    }

    #[test]
    fn test_missing_attributes_default_to_empty() {
        let html = r#"
            <tr class="list-table-data">
              <td class="data image"><img></td>
              <td class="data title"><a>No Href</a></td>
            </tr>
        "#;
        let records = parse_list_page(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].url, "");
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn test_empty_page_yields_no_records() {
        assert!(parse_list_page("<html><body></body></html>").is_empty());
    }

    #[test]
    fn test_id_from_relative_href() {
        assert_eq!(anime_id_from_href("/anime/12345/Some-Title"), 12345);
    }

    #[test]
    fn test_id_from_absolute_href() {
        assert_eq!(
            anime_id_from_href("https://myanimelist.net/anime/12345/Some-Title"),
            12345
        );
    }

    #[test]
    fn test_id_defaults_to_zero() {
        assert_eq!(anime_id_from_href("/profile/someone"), 0);
        assert_eq!(anime_id_from_href("/anime/not-a-number/Title"), 0);
        assert_eq!(anime_id_from_href("/anime"), 0);
        assert_eq!(anime_id_from_href(""), 0);
    }
}
