//! # Biolink Core
//!
//! Parser for the markdown-like configuration behind a link-in-bio page.
//!
//! A configuration has a profile block, a row of social links, and
//! categories of link cards:
//!
//! ```text
//! ## Profile
//! - **Name**: Jane Doe
//! - **Hero Image**: https://example.com/hero.jpg
//!
//! ## Social Links
//! - **Twitter**:
//!   - Icon: https://example.com/twitter.png
//!   - URL: https://twitter.com/janedoe
//!
//! ## Categories
//! ### Work
//! - **Portfolio**:
//!   - URL: https://example.com
//!   - Description: My work
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use biolink_core::parse;
//!
//! let input = "## Social Links\n- **Mail**:\n  - URL: mailto:jane@example.com";
//! let doc = parse(input);
//!
//! assert_eq!(doc.social[0].link.name, "Mail");
//! assert_eq!(doc.social[0].link.url, "mailto:jane@example.com");
//! ```
//!
//! ## Lenient parsing
//!
//! Parsing never fails. Unknown lines are skipped and missing fields are
//! left empty. To see what was skipped, collect warnings:
//!
//! ```rust
//! use biolink_core::Parser;
//!
//! let result = Parser::new().parse_with_diagnostics("### Links\n- **Blog**:\nwhat is this");
//! assert_eq!(result.document.categories[0].links.len(), 1);
//! assert_eq!(result.warnings.len(), 2); // stray line, blog without URL
//! ```

pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod span;
pub mod url;

pub use error::{ParseWarning, ParseWarningKind, ParseWarnings};
pub use model::{Category, Document, Link, LinkItem, SocialLink};
pub use parser::{parse, ParseResult, Parser, ParserOptions};
pub use url::normalize_url;
