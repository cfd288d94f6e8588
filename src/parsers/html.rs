use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

/// Elements whose text never counts as page content
const NON_CONTENT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Raw structural signals pulled out of an HTML document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlSignals {
    /// Trimmed text of the first `<title>` that has any text
    ///
    /// A whitespace-only title comes through as `Some("")`; only a missing
    /// or empty element yields `None`.
    pub title: Option<String>,
    /// Trimmed `content` of the first `<meta name="description">`
    pub meta_description: Option<String>,
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub images: usize,
    /// Images with no `alt` attribute at all (`alt=""` counts as present)
    pub images_missing_alt: usize,
    /// `href` values of every anchor that has one
    pub hrefs: Vec<String>,
    /// Visible text with whitespace collapsed to single spaces
    ///
    /// Text inside script, style, noscript and template elements is left out,
    /// so word counts run lower than a plain tag-stripping pass on pages with
    /// inline scripts or styles.
    pub text: String,
}

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("static selector must parse"))
}

/// Parses an HTML document into structural SEO signals
pub fn parse(html: &str) -> HtmlSignals {
    static TITLE: OnceLock<Selector> = OnceLock::new();
    static META: OnceLock<Selector> = OnceLock::new();
    static H1: OnceLock<Selector> = OnceLock::new();
    static H2: OnceLock<Selector> = OnceLock::new();
    static H3: OnceLock<Selector> = OnceLock::new();
    static IMG: OnceLock<Selector> = OnceLock::new();
    static ANCHOR: OnceLock<Selector> = OnceLock::new();

    let doc = Html::parse_document(html);

    let title = doc
        .select(selector(&TITLE, "title"))
        .map(|el| el.text().collect::<String>())
        .find(|raw| !raw.is_empty())
        .map(|raw| raw.trim().to_string());

    let meta_description = doc
        .select(selector(&META, "meta[name][content]"))
        .filter(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .filter_map(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty());

    let images: Vec<ElementRef> = doc.select(selector(&IMG, "img")).collect();
    let images_missing_alt = images
        .iter()
        .filter(|img| img.value().attr("alt").is_none())
        .count();

    let hrefs = doc
        .select(selector(&ANCHOR, "a[href]"))
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect::<Vec<String>>();

    let signals = HtmlSignals {
        title,
        meta_description,
        h1: doc.select(selector(&H1, "h1")).count(),
        h2: doc.select(selector(&H2, "h2")).count(),
        h3: doc.select(selector(&H3, "h3")).count(),
        images: images.len(),
        images_missing_alt,
        hrefs,
        text: visible_text(&doc),
    };

    ::log::debug!(
        "HTML parser found {} headings, {} images, {} links",
        signals.h1 + signals.h2 + signals.h3,
        signals.images,
        signals.hrefs.len()
    );

    signals
}

/// Collects every text node outside script-like elements, separated by spaces
pub fn visible_text(doc: &Html) -> String {
    let fragments = doc
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some((node, &**text)),
            _ => None,
        })
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| NON_CONTENT_ELEMENTS.contains(&el.name()))
            })
        })
        .map(|(_, text)| text)
        .collect::<Vec<&str>>();

    fragments
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
