//! Line-oriented state machine for biolink configuration files.
//!
//! Every line is first classified on its own ([`LineKind`]), then applied
//! to the current [`Section`]. Builders for the category and link being
//! read live in a [`ParseState`] owned by a single parse call and are moved
//! into the [`Document`] when the next sibling header, the end of their
//! section, or the end of input is reached.
//!
//! Parsing never fails. Anything unrecognized is skipped and, in
//! diagnostics mode, reported as a [`ParseWarning`].

use tracing::{debug, trace};

use crate::error::{ParseWarning, ParseWarnings};
use crate::lexer::{Lexer, Line};
use crate::model::{Category, Document, LinkItem, SocialLink};
use crate::span::Span;
use crate::url::{bare_url, host_label, normalize_url};

const PROFILE_HEADER: &str = "## Profile";
const PROFILE_HEADER_LONG: &str = "## Profile Information";
const SOCIAL_HEADER: &str = "## Social Links";
const CATEGORIES_HEADER: &str = "## Categories";
const CATEGORY_MARKER: &str = "### ";
const CATEGORY_ICON_KEY: &str = "Category Icon";
const LINKS_GROUP_KEY: &str = "Links";

/// Result of a parse that also collected warnings.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed document.
    pub document: Document,
    /// Warnings about skipped or incomplete input, in line order.
    pub warnings: ParseWarnings,
}

impl ParseResult {
    /// True if the input was fully understood.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Tunable parser behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Treat a line holding only a URL as a link (see [`Parser`]).
    pub bare_urls: bool,
    /// Accept `## Profile Information` as a profile header.
    pub profile_alias: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            bare_urls: true,
            profile_alias: true,
        }
    }
}

impl ParserOptions {
    pub fn with_bare_urls(mut self, enabled: bool) -> Self {
        self.bare_urls = enabled;
        self
    }

    pub fn with_profile_alias(mut self, enabled: bool) -> Self {
        self.profile_alias = enabled;
        self
    }
}

/// Biolink configuration parser.
///
/// A `Parser` only holds options; every call builds fresh state, so one
/// instance can be shared freely between threads.
///
/// Bare URL lines: a line that is only a URL fills the URL of the open
/// link if it has none. Otherwise it starts a new link named after the
/// URL's host (without `www.`), which stays open for following fields.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse a configuration into a [`Document`].
    pub fn parse(&self, input: &str) -> Document {
        self.run(input, None).0
    }

    /// Parse a configuration, also collecting warnings.
    pub fn parse_with_diagnostics(&self, input: &str) -> ParseResult {
        let (document, warnings) = self.run(input, Some(ParseWarnings::new()));
        let mut warnings = warnings.unwrap_or_default();
        warnings.sort_by_line();
        ParseResult { document, warnings }
    }

    fn run(&self, input: &str, warnings: Option<ParseWarnings>) -> (Document, Option<ParseWarnings>) {
        let mut state = ParseState::new(self.options, warnings);

        for line in Lexer::new(input) {
            if line.is_blank() {
                continue;
            }
            let kind = classify(line.trimmed(), &self.options);
            state.apply(kind, &line);
        }

        state.finish()
    }
}

/// Parse a configuration with default options.
///
/// ```rust
/// let doc = biolink_core::parse("## Profile\n- **Hero Image**: https://a.com/h.jpg");
/// assert_eq!(doc.profile["hero_image"], "https://a.com/h.jpg");
/// ```
pub fn parse(input: &str) -> Document {
    Parser::new().parse(input)
}

/// Top-level region of the file currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Before any recognized header.
    None,
    Profile,
    Social,
    /// After `## Categories` but before the first `### ` heading.
    Categories,
    /// Inside a `### ` category.
    Category,
}

/// Item field named before the first colon of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Icon,
    Url,
    Description,
}

impl Field {
    fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("icon") {
            Some(Field::Icon)
        } else if label.eq_ignore_ascii_case("url") {
            Some(Field::Url)
        } else if label.eq_ignore_ascii_case("description") {
            Some(Field::Description)
        } else {
            None
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Field::Icon => "Icon",
            Field::Url => "URL",
            Field::Description => "Description",
        }
    }
}

/// What a single trimmed line looks like, independent of parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    ProfileHeader,
    SocialHeader,
    CategoriesHeader,
    /// `### Name`; the name may be empty.
    CategoryHeader(&'a str),
    /// `- **Key**: value`, `- **Name**:` or `- **Name**`.
    ///
    /// `value` is `None` when nothing follows the colon.
    Entry { key: &'a str, value: Option<&'a str> },
    /// `Icon: ...`, `URL: ...`, `Description: ...` with optional bullet.
    Field { field: Field, value: &'a str },
    /// A line consisting of only a URL.
    BareUrl(&'a str),
    Other,
}

/// Classify a trimmed, non-blank line.
pub fn classify<'a>(line: &'a str, options: &ParserOptions) -> LineKind<'a> {
    match line {
        PROFILE_HEADER => return LineKind::ProfileHeader,
        PROFILE_HEADER_LONG if options.profile_alias => return LineKind::ProfileHeader,
        SOCIAL_HEADER => return LineKind::SocialHeader,
        CATEGORIES_HEADER => return LineKind::CategoriesHeader,
        "###" => return LineKind::CategoryHeader(""),
        _ => {}
    }

    if let Some(name) = line.strip_prefix(CATEGORY_MARKER) {
        return LineKind::CategoryHeader(name.trim());
    }

    let body = strip_bullet(line);

    if let Some(entry) = classify_entry(body) {
        return entry;
    }

    if let Some((label, value)) = body.split_once(':') {
        if let Some(field) = Field::from_label(label.trim()) {
            return LineKind::Field {
                field,
                value: value.trim(),
            };
        }
    }

    if options.bare_urls {
        if let Some(url) = bare_url(line) {
            return LineKind::BareUrl(url);
        }
    }

    LineKind::Other
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map_or(line, str::trim_start)
}

/// `**Key**: value`, `**Key**:`, `**Key:**` or `**Key**`.
fn classify_entry(body: &str) -> Option<LineKind<'_>> {
    let inner = body.strip_prefix("**")?;
    let close = inner.find("**")?;
    let raw_key = inner[..close].trim();
    let rest = inner[close + 2..].trim();

    let (key, colon_in_bold) = match raw_key.strip_suffix(':') {
        Some(key) => (key.trim_end(), true),
        None => (raw_key, false),
    };
    if key.is_empty() {
        return None;
    }

    let value = if let Some(after) = rest.strip_prefix(':') {
        after.trim()
    } else if rest.is_empty() || colon_in_bold {
        rest
    } else {
        return None;
    };

    Some(LineKind::Entry {
        key,
        value: (!value.is_empty()).then_some(value),
    })
}

/// Lower-case the key and join whitespace-separated words with `_`.
pub fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// A builder that is still receiving fields, with the line that opened it.
#[derive(Debug)]
struct Pending<T> {
    value: T,
    line: u32,
    span: Span,
}

impl<T> Pending<T> {
    fn new(value: T, line: &Line<'_>) -> Self {
        Self {
            value,
            line: line.number,
            span: line.span,
        }
    }
}

#[derive(Debug)]
enum OpenItem {
    Social(Pending<SocialLink>),
    Link(Pending<LinkItem>),
}

/// Mutable state for one parse call.
struct ParseState {
    options: ParserOptions,
    document: Document,
    section: Section,
    category: Option<Pending<Category>>,
    item: Option<OpenItem>,
    warnings: Option<ParseWarnings>,
}

impl ParseState {
    fn new(options: ParserOptions, warnings: Option<ParseWarnings>) -> Self {
        Self {
            options,
            document: Document::default(),
            section: Section::None,
            category: None,
            item: None,
            warnings,
        }
    }

    fn warn(&mut self, make: impl FnOnce() -> ParseWarning) {
        if let Some(warnings) = self.warnings.as_mut() {
            warnings.push(make());
        }
    }

    fn enter(&mut self, section: Section, line: &Line<'_>) {
        debug!(line = line.number, from = ?self.section, to = ?section, "section change");
        self.section = section;
    }

    fn apply(&mut self, kind: LineKind<'_>, line: &Line<'_>) {
        match kind {
            LineKind::ProfileHeader => {
                self.flush_item();
                self.enter(Section::Profile, line);
            }
            LineKind::SocialHeader => {
                self.flush_item();
                self.enter(Section::Social, line);
            }
            LineKind::CategoriesHeader => {
                self.flush_item();
                self.enter(Section::Categories, line);
            }
            LineKind::CategoryHeader("") => {
                self.warn(|| ParseWarning::empty_heading(line.number, line.span));
            }
            LineKind::CategoryHeader(name) => {
                self.flush_item();
                self.flush_category();
                self.category = Some(Pending::new(Category::named(name), line));
                self.enter(Section::Category, line);
            }
            LineKind::Entry { key, value } => self.apply_entry(key, value, line),
            LineKind::Field { field, value } => self.apply_field(field, value, line),
            LineKind::BareUrl(url) => self.apply_bare_url(url, line),
            LineKind::Other => self.ignore(line),
        }
    }

    fn apply_entry(&mut self, key: &str, value: Option<&str>, line: &Line<'_>) {
        match (self.section, value) {
            (Section::Profile, Some(value)) => {
                let key = normalize_key(key);
                if self.document.profile.contains_key(&key) {
                    self.warn(|| ParseWarning::duplicate_profile_key(&key, line.number, line.span));
                }
                self.document.profile.insert(key, value.to_string());
            }
            (Section::Social, None) => {
                self.flush_item();
                self.item = Some(OpenItem::Social(Pending::new(SocialLink::named(key), line)));
            }
            (Section::Category, Some(value)) if key.eq_ignore_ascii_case(CATEGORY_ICON_KEY) => {
                if let Some(category) = self.category.as_mut() {
                    category.value.icon = normalize_url(value);
                }
            }
            (Section::Category, None) if key.eq_ignore_ascii_case(LINKS_GROUP_KEY) => {
                trace!(line = line.number, "links group marker");
            }
            (Section::Category, None) if self.category.is_some() => {
                self.flush_item();
                self.item = Some(OpenItem::Link(Pending::new(LinkItem::named(key), line)));
            }
            _ => self.ignore(line),
        }
    }

    fn apply_field(&mut self, field: Field, value: &str, line: &Line<'_>) {
        let link = match self.item.as_mut() {
            Some(OpenItem::Link(item)) => {
                if field == Field::Description {
                    item.value.description = value.to_string();
                    return;
                }
                &mut item.value.link
            }
            Some(OpenItem::Social(item)) if field != Field::Description => &mut item.value.link,
            Some(OpenItem::Social(_)) => {
                self.ignore(line);
                return;
            }
            None => {
                debug!(line = line.number, field = field.as_str(), "field outside of any link");
                self.warn(|| ParseWarning::orphan_field(field.as_str(), line.number, line.span));
                return;
            }
        };

        match field {
            Field::Icon => link.icon = normalize_url(value),
            Field::Url => link.url = normalize_url(value),
            Field::Description => {}
        }
    }

    fn apply_bare_url(&mut self, raw: &str, line: &Line<'_>) {
        let url = normalize_url(raw);

        let open_link = match self.item.as_mut() {
            Some(OpenItem::Link(item)) => Some(&mut item.value.link),
            Some(OpenItem::Social(item)) => Some(&mut item.value.link),
            None => None,
        };
        if let Some(link) = open_link {
            if link.url.is_empty() {
                link.url = url;
                return;
            }
        }

        let social_open = matches!(self.item, Some(OpenItem::Social(_)));
        let name = host_label(&url).unwrap_or_else(|| url.clone());
        let opened = if self.section == Section::Social || social_open {
            let mut social = SocialLink::named(name);
            social.link.url = url;
            OpenItem::Social(Pending::new(social, line))
        } else if self.section == Section::Category && self.category.is_some() {
            let mut item = LinkItem::named(name);
            item.link.url = url;
            OpenItem::Link(Pending::new(item, line))
        } else {
            self.ignore(line);
            return;
        };

        debug!(line = line.number, "bare URL starts a new link");
        self.flush_item();
        self.item = Some(opened);
    }

    fn ignore(&mut self, line: &Line<'_>) {
        debug!(line = line.number, section = ?self.section, "ignoring line");
        self.warn(|| ParseWarning::unrecognized_line(line.trimmed(), line.number, line.span));
    }

    /// Move the open item into its owning collection.
    fn flush_item(&mut self) {
        let Some(item) = self.item.take() else {
            return;
        };

        match item {
            OpenItem::Social(pending) => {
                self.check_url(&pending.value.link.name, pending.value.link.has_url(), &pending);
                trace!(name = %pending.value.link.name, "flush social link");
                self.document.social.push(pending.value);
            }
            OpenItem::Link(pending) => {
                self.check_url(&pending.value.link.name, pending.value.link.has_url(), &pending);
                match self.category.as_mut() {
                    Some(category) => {
                        trace!(
                            name = %pending.value.link.name,
                            category = %category.value.name,
                            "flush link"
                        );
                        category.value.links.push(pending.value);
                    }
                    None => debug!(name = %pending.value.link.name, "dropping link without category"),
                }
            }
        }
    }

    fn check_url<T>(&mut self, name: &str, has_url: bool, pending: &Pending<T>) {
        if !has_url {
            let (line, span) = (pending.line, pending.span);
            self.warn(|| ParseWarning::missing_url(name, line, span));
        }
    }

    fn flush_category(&mut self) {
        if let Some(category) = self.category.take() {
            trace!(name = %category.value.name, links = category.value.links.len(), "flush category");
            self.document.categories.push(category.value);
        }
    }

    fn finish(mut self) -> (Document, Option<ParseWarnings>) {
        self.flush_item();
        self.flush_category();
        debug!(
            profile = self.document.profile.len(),
            social = self.document.social.len(),
            categories = self.document.categories.len(),
            "parsed configuration"
        );
        (self.document, self.warnings)
    }
}
