//! Regex scraping of title, description, running text, and review blocks
//! out of fetched HTML.

use regex::Regex;

/// Reviews kept per page, across all block patterns.
const MAX_REVIEWS: usize = 50;

pub struct HtmlScraper {
    title: Regex,
    h1: Regex,
    meta_description: Regex,
    og_description: Regex,
    script: Regex,
    style: Regex,
    tag: Regex,
    whitespace: Regex,
    review_blocks: Vec<Regex>,
}

impl HtmlScraper {
    pub fn new() -> Self {
        Self {
            title: Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap(),
            h1: Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap(),
            meta_description: Regex::new(
                r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#,
            )
            .unwrap(),
            og_description: Regex::new(
                r#"(?i)<meta[^>]*property=["']og:description["'][^>]*content=["']([^"']+)["']"#,
            )
            .unwrap(),
            script: Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap(),
            style: Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap(),
            tag: Regex::new(r"<[^>]+>").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
            review_blocks: vec![
                Regex::new(
                    r#"(?is)<div[^>]*class=["'][^"']*review[^"']*["'][^>]*>(.{50,500}?)</div>"#,
                )
                .unwrap(),
                Regex::new(
                    r#"(?is)<p[^>]*class=["'][^"']*comment[^"']*["'][^>]*>(.{50,500}?)</p>"#,
                )
                .unwrap(),
                Regex::new(r"(?is)<article[^>]*>(.{50,500}?)</article>").unwrap(),
            ],
        }
    }

    /// Page title from `<title>`, falling back to the first `<h1>`.
    /// A matched-but-blank title yields `None` rather than the fallback.
    pub fn title(&self, html: &str) -> Option<String> {
        [&self.title, &self.h1]
            .into_iter()
            .find_map(|re| re.captures(html))
            .map(|caps| caps[1].trim().to_string())
            .filter(|title| !title.is_empty())
    }

    /// Description from `<meta name="description">`, else `og:description`.
    pub fn description(&self, html: &str) -> Option<String> {
        self.meta_description
            .captures(html)
            .or_else(|| self.og_description.captures(html))
            .map(|caps| caps[1].to_string())
    }

    /// Visible running text: scripts and styles dropped, tags replaced by
    /// spaces, the common entities decoded, whitespace collapsed.
    pub fn main_text(&self, html: &str) -> String {
        let text = self.script.replace_all(html, "");
        let text = self.style.replace_all(&text, "");
        let text = self.tag.replace_all(&text, " ");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">");

        self.whitespace.replace_all(&text, " ").trim().to_string()
    }

    /// Review-looking blocks: divs with a `review` class, paragraphs with a
    /// `comment` class, and articles, in that pattern order. Raw bodies of
    /// 50 to 500 characters are cleaned like [`Self::main_text`] and kept
    /// when longer than 20 characters, up to [`MAX_REVIEWS`] in total.
    pub fn review_texts(&self, html: &str) -> Vec<String> {
        let mut reviews = Vec::new();

        for pattern in &self.review_blocks {
            for caps in pattern.captures_iter(html) {
                if reviews.len() >= MAX_REVIEWS {
                    return reviews;
                }
                let text = self.main_text(&caps[1]);
                if text.chars().count() > 20 {
                    reviews.push(text);
                }
            }
        }

        reviews
    }
}
