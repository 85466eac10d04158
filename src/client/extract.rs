//! Markup extraction for Anitaku pages.
//!
//! Each function owns exactly one assumption about the site's layout. A missing
//! outer container means the site has nothing to show and yields an empty value;
//! anything wrong inside a container that is present is an [`Error::Extraction`].

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::models::SearchResult;
use crate::error::{Error, Result};

pub const CATEGORY_PREFIX: &str = "/category/";

/// Heading text the site renders in place of a title on missing pages.
pub const NOT_FOUND_TEXT: &str = "404 Not Found";

/// Zero-based: the status line is the sixth paragraph of the info block.
const STATUS_PARAGRAPH_INDEX: usize = 5;

struct Selectors {
    search_list: Selector,
    list_item: Selector,
    link: Selector,
    image: Selector,
    name: Selector,
    info_body: Selector,
    paragraph: Selector,
    anime_name: Selector,
    episode_page: Selector,
}

static SELECTORS: OnceLock<Selectors> = OnceLock::new();

fn selectors() -> &'static Selectors {
    SELECTORS.get_or_init(|| Selectors {
        search_list: Selector::parse("ul.items").unwrap(),
        list_item: Selector::parse("li").unwrap(),
        link: Selector::parse("a").unwrap(),
        image: Selector::parse("img").unwrap(),
        name: Selector::parse("p.name").unwrap(),
        info_body: Selector::parse("div.anime_info_body_bg").unwrap(),
        paragraph: Selector::parse("p").unwrap(),
        anime_name: Selector::parse("div.anime_name.new_series").unwrap(),
        episode_page: Selector::parse("ul#episode_page").unwrap(),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Join a site-relative path onto the base URL with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

/// Everything after the last `/category/` in a link, or the link itself.
pub fn category_slug(href: &str) -> &str {
    match href.rfind(CATEGORY_PREFIX) {
        Some(idx) => &href[idx + CATEGORY_PREFIX.len()..],
        None => href,
    }
}

/// Prefix an anime identifier with `/category/` unless it already has it.
pub fn category_path(anime: &str) -> String {
    if anime.starts_with(CATEGORY_PREFIX) {
        anime.to_string()
    } else {
        format!("{}{}", CATEGORY_PREFIX, anime)
    }
}

/// Search listing: `ul.items > li` with a link, a poster and a `p.name` each.
pub fn search_results(document: &Html, base_url: &str) -> Result<Vec<SearchResult>> {
    let sel = selectors();

    let Some(list) = document.select(&sel.search_list).next() else {
        debug!("Search listing absent, treating as no results");
        return Ok(Vec::new());
    };

    let results = list
        .select(&sel.list_item)
        .map(|item| search_item(item, base_url))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = results.len(), "Parsed search results");
    Ok(results)
}

fn search_item(item: ElementRef<'_>, base_url: &str) -> Result<SearchResult> {
    let sel = selectors();

    let href = item
        .select(&sel.link)
        .next()
        .ok_or_else(|| Error::extraction("search result link", "list item has no <a>"))?
        .attr("href")
        .ok_or_else(|| Error::extraction("search result link", "<a> has no href"))?
        .to_string();

    let name = item
        .select(&sel.name)
        .next()
        .map(|p| text_of(p).trim().to_string())
        .ok_or_else(|| Error::extraction("search result name", "list item has no p.name"))?;

    let image = item
        .select(&sel.image)
        .next()
        .ok_or_else(|| Error::extraction("search result image", "list item has no <img>"))?
        .attr("src")
        .ok_or_else(|| Error::extraction("search result image", "<img> has no src"))?
        .to_string();

    Ok(SearchResult {
        name,
        url: category_slug(&href).to_string(),
        full_url: join_url(base_url, &href),
        href,
        image,
    })
}

/// Airing status from the detail page's info block, passed through as written.
pub fn status(document: &Html) -> Result<Option<String>> {
    let sel = selectors();

    let Some(info) = document.select(&sel.info_body).next() else {
        debug!("Info block absent, no status");
        return Ok(None);
    };

    let paragraph = info
        .select(&sel.paragraph)
        .nth(STATUS_PARAGRAPH_INDEX)
        .ok_or_else(|| {
            Error::extraction(
                "status",
                format!(
                    "info block has fewer than {} paragraphs",
                    STATUS_PARAGRAPH_INDEX + 1
                ),
            )
        })?;

    let link = paragraph
        .select(&sel.link)
        .next()
        .ok_or_else(|| Error::extraction("status", "status paragraph has no <a>"))?;

    Ok(Some(text_of(link).trim().to_string()))
}

/// False only when the title heading reads exactly "404 Not Found".
pub fn has_episode_zero(document: &Html) -> Result<bool> {
    let sel = selectors();

    let heading = document
        .select(&sel.anime_name)
        .next()
        .ok_or_else(|| Error::extraction("anime name", "no div.anime_name.new_series"))?;

    Ok(text_of(heading).trim() != NOT_FOUND_TEXT)
}

/// `ep_end` of the last range in the episode pagination list.
pub fn latest_episode(document: &Html) -> Result<Option<u32>> {
    let sel = selectors();

    let Some(list) = document.select(&sel.episode_page).next() else {
        debug!("Episode pagination absent, no episode number");
        return Ok(None);
    };

    let last = list
        .select(&sel.list_item)
        .last()
        .ok_or_else(|| Error::extraction("latest episode", "episode list has no items"))?;

    let value = last
        .select(&sel.link)
        .next()
        .ok_or_else(|| Error::extraction("latest episode", "last item has no <a>"))?
        .attr("ep_end")
        .ok_or_else(|| Error::extraction("latest episode", "link has no ep_end"))?;

    let number = value
        .trim()
        .parse::<u32>()
        .map_err(|source| Error::InvalidEpisodeNumber {
            value: value.to_string(),
            source,
        })?;

    Ok(Some(number))
}
