/*!
 * HTML document processing: text extraction and placeholder templating.
 *
 * A page goes through two passes here. The extraction pass collects the
 * translatable text blocks from a prioritized tag allowlist. The template
 * pass produces a language-neutral copy of the page where every extracted
 * block is replaced by a `{{text_N}}` placeholder token.
 */

use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::file_utils::FileManager;

/// Hard cap on extracted fragments per document, bounding API cost
pub const MAX_FRAGMENTS: usize = 15;

/// Minimum character count for paragraph-like content and meta descriptions
const MIN_BLOCK_CHARS: usize = 10;

/// Minimum character count for page titles
const MIN_TITLE_CHARS: usize = 3;

/// Tags scanned for translatable content, in priority order.
/// Page chrome and navigation noise outside these tags is ignored.
const CONTENT_TAGS: [&str; 9] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "title", "meta"];

/// One HTML source page. The raw markup is kept as loaded; each processing
/// pass parses its own DOM so no pass observes another's mutations.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    /// Path the document was loaded from
    source_path: PathBuf,
    /// Raw markup as read from disk
    html: String,
}

impl HtmlDocument {
    /// Load a document from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let html = FileManager::read_to_string(path)
            .map_err(|e| PipelineError::Parse(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            source_path: path.to_path_buf(),
            html,
        })
    }

    /// Build a document from an in-memory string
    pub fn from_string<P: AsRef<Path>>(source_path: P, html: impl Into<String>) -> Self {
        Self {
            source_path: source_path.as_ref().to_path_buf(),
            html: html.into(),
        }
    }

    /// Parse the markup into a fresh DOM
    pub fn parse(&self) -> RcDom {
        parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut self.html.as_bytes())
            .expect("reading from an in-memory buffer cannot fail")
    }

    /// Path the document was loaded from
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Source filename ("index.html")
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "index.html".to_string())
    }

    /// Source filename without extension ("index")
    pub fn file_stem(&self) -> String {
        self.source_path
            .file_stem()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "index".to_string())
    }
}

/// One extracted, deduplicated unit of translatable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Ordinal position assigned at extraction time, stable for the
    /// lifetime of the document's pipeline run
    pub index: usize,
    /// Original trimmed text
    pub text: String,
}

/// Bijective mapping from fragment text to placeholder token
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Derive tokens from fragment ordinals ("text_0", "text_1", ...)
    pub fn from_fragments(fragments: &[Fragment]) -> Self {
        let entries = fragments
            .iter()
            .map(|f| (f.text.clone(), format!("text_{}", f.index)))
            .collect();
        Self { entries }
    }

    /// Look up the token for a fragment text
    pub fn token_for(&self, text: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(original, _)| original == text)
            .map(|(_, token)| token.as_str())
    }

    /// All (fragment text, token) pairs in extraction order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Wrap a token in the reserved delimiter pair
    pub fn delimited(token: &str) -> String {
        format!("{{{{{}}}}}", token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extract the ordered, deduplicated list of translatable text fragments.
///
/// Never fails: a document with no qualifying content yields an empty list,
/// which callers treat as "nothing to translate".
pub fn extract_fragments(document: &HtmlDocument) -> Vec<Fragment> {
    let dom = document.parse();

    let mut texts: Vec<String> = Vec::new();
    for tag in CONTENT_TAGS {
        for element in collect_elements(&dom.document, tag) {
            match tag {
                "meta" => {
                    if get_node_attr(&element, "name").as_deref() != Some("description") {
                        continue;
                    }
                    if let Some(content) = get_node_attr(&element, "content") {
                        let content = content.trim();
                        if content.chars().count() > MIN_BLOCK_CHARS {
                            texts.push(content.to_string());
                        }
                    }
                }
                "title" => {
                    let content = text_content(&element).trim().to_string();
                    if content.chars().count() > MIN_TITLE_CHARS {
                        texts.push(content);
                    }
                }
                _ => {
                    let content = text_content(&element).trim().to_string();
                    // Only meaningful content (sentences or phrases)
                    if !content.is_empty()
                        && (content.chars().count() > MIN_BLOCK_CHARS
                            || content.contains(char::is_whitespace))
                    {
                        texts.push(content);
                    }
                }
            }
        }
    }

    // Remove duplicates while preserving first-seen order
    let mut seen: HashSet<String> = HashSet::new();
    let mut fragments: Vec<Fragment> = Vec::new();
    for text in texts {
        if !text.is_empty() && seen.insert(text.clone()) {
            fragments.push(Fragment {
                index: fragments.len(),
                text,
            });
        }
    }

    fragments.truncate(MAX_FRAGMENTS);

    debug!(
        "Extracted {} fragment(s) from {}",
        fragments.len(),
        document.file_name()
    );

    fragments
}

/// Build the language-neutral template: a new serialized document where
/// every node whose trimmed text exactly equals a fragment's text carries
/// that fragment's placeholder token instead.
///
/// All nodes with the same text receive the same token. Re-running the
/// replacement over an already-templated document is a no-op, since the
/// match test is exact equality against the original text.
pub fn build_template(
    document: &HtmlDocument,
    fragments: &[Fragment],
) -> Result<(String, PlaceholderMap)> {
    let placeholders = PlaceholderMap::from_fragments(fragments);
    let dom = document.parse();

    replace_text_nodes(&dom.document, &placeholders);
    replace_meta_descriptions(&dom.document, &placeholders);

    let template_html = serialize_dom(&dom)?;
    Ok((template_html, placeholders))
}

/// Recursively substitute placeholder tokens into matching text nodes
fn replace_text_nodes(node: &Handle, placeholders: &PlaceholderMap) {
    if let NodeData::Text { ref contents } = node.data {
        let token = {
            let text = contents.borrow();
            placeholders.token_for(text.trim()).map(str::to_string)
        };
        if let Some(token) = token {
            let mut text = contents.borrow_mut();
            text.clear();
            text.push_slice(&PlaceholderMap::delimited(&token));
        }
        return;
    }

    for child in node.children.borrow().iter() {
        replace_text_nodes(child, placeholders);
    }
}

/// Substitute tokens into matching meta-description content attributes.
/// The description lives in an attribute rather than a text node, so the
/// text-node pass cannot reach it.
fn replace_meta_descriptions(root: &Handle, placeholders: &PlaceholderMap) {
    for element in collect_elements(root, "meta") {
        if get_node_attr(&element, "name").as_deref() != Some("description") {
            continue;
        }
        let token = get_node_attr(&element, "content")
            .and_then(|content| placeholders.token_for(content.trim()).map(str::to_string));
        if let Some(token) = token {
            rewrite_node_attr(&element, "content", &PlaceholderMap::delimited(&token));
        }
    }
}

/// Collect all elements with the given local name, in document order
pub fn collect_elements(node: &Handle, tag_name: &str) -> Vec<Handle> {
    let mut found = Vec::new();

    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == tag_name {
            found.push(node.clone());
        }
    }

    for child in node.children.borrow().iter() {
        found.append(&mut collect_elements(child, tag_name));
    }

    found
}

/// Concatenated text content of a subtree, skipping script and style
/// elements so they never surface as translatable content
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            if matches!(name.local.as_ref(), "script" | "style") {
                return;
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

/// Get a named attribute value from an element node
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

/// Overwrite the value of an existing attribute on an element node
fn rewrite_node_attr(node: &Handle, attr_name: &str, attr_value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        for attr in attrs.borrow_mut().iter_mut() {
            if &*attr.name.local == attr_name {
                attr.value.clear();
                attr.value.push_slice(attr_value);
            }
        }
    }
}

/// Serialize a DOM back to markup
fn serialize_dom(dom: &RcDom) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .context("Unable to serialize DOM into buffer")?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}
