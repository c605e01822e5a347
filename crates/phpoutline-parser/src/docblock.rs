//! Doc-comment block parser.
//!
//! Turns the lines of one `/** ... */` block into a [`DocBlock`], the
//! tag-keyed attribute record the decorator applies onto structural
//! entities. Parsing is best effort: lines matching no recognizer are
//! ignored without error, since real-world doc blocks are wildly
//! inconsistent.

use phpoutline_model::{Author, License, Parameter, ReturnValue, ThrowsClause, TriggerClause};
use regex::Regex;
use std::sync::LazyLock;

// -- Tag patterns -------------------------------------------------------------

/// `@param [type] [&]$name [description]`
static RE_DOC_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\s+@param\s+(?:(\S+)\s+)?([&$]\S+)\s*(.+)?$").unwrap()
});

static RE_DOC_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*\s+@return\s+(\w+)\s*(.+)?$").unwrap());

static RE_DOC_THROWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*\s+@throws\s+(\w+)\s*(.+)?$").unwrap());

static RE_DOC_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*\s+@trigger\s+(\w+)\s*(.+)?$").unwrap());

static RE_DOC_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*\s+@author\s+(.+?)\s*(?:<(.+?)>)?\s*$").unwrap());

static RE_DOC_LICENSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\*\s+@license\s+(\S+)(\s+.+)?$").unwrap());

/// Generic `@tagname value` fallback
static RE_DOC_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s+@(\w+)\s*(.*)$").unwrap());

/// Free-text description line (no `@` after the `*`)
static RE_DOC_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s*([^@].+)?$").unwrap());

// -- DocBlock -----------------------------------------------------------------

/// Parsed attributes of one documentation block.
///
/// `extends` is honored by the decorator but never produced by the line
/// recognizers here; doc data supplied by the reflection strategy can
/// carry it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocBlock {
    pub description: Option<String>,
    /// `@param` entries keyed by parameter name, last occurrence wins
    pub params: Vec<Parameter>,
    /// `@return`, last occurrence wins
    pub return_value: Option<ReturnValue>,
    pub throws: Vec<ThrowsClause>,
    pub triggers: Vec<TriggerClause>,
    pub authors: Vec<Author>,
    pub licenses: Vec<License>,
    pub copyrights: Vec<String>,
    pub links: Vec<String>,
    pub sees: Vec<String>,
    pub uses: Vec<String>,
    pub implements: Vec<String>,
    pub deprecations: Vec<String>,
    pub todos: Vec<String>,
    pub since: Option<String>,
    pub version: Option<String>,
    pub access: Option<String>,
    pub category: Option<String>,
    pub package: Option<String>,
    pub subpackage: Option<String>,
    pub extends: Option<String>,
}

impl DocBlock {
    /// Look up a documented parameter by name.
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    fn set_param(&mut self, param: Parameter) {
        match self.params.iter().position(|p| p.name == param.name) {
            Some(idx) => self.params[idx] = param,
            None => self.params.push(param),
        }
    }
}

// -- Parser -------------------------------------------------------------------

/// Parse the trimmed lines of one doc block.
///
/// Lines are matched against the tag recognizers in order; free text
/// accumulates into the description only until the first stored tag.
pub fn parse_doc_block(lines: &[String]) -> DocBlock {
    let mut block = DocBlock::default();
    let mut tagged = false;
    let mut desc_lines: Vec<String> = Vec::new();

    for line in lines {
        let line = line.as_str();
        if let Some(caps) = RE_DOC_PARAM.captures(line) {
            let name = caps[2].trim_start_matches(['&', '$']).to_string();
            let mut param = Parameter::new(name);
            if let Some(cast) = caps.get(1) {
                param.type_annotation = Some(cast.as_str().to_string());
            }
            if let Some(description) = caps.get(3) {
                param.description = Some(description.as_str().trim().to_string());
            }
            block.set_param(param);
            tagged = true;
        } else if let Some(caps) = RE_DOC_RETURN.captures(line) {
            let mut ret = ReturnValue::new(caps[1].trim());
            if let Some(description) = caps.get(2) {
                ret.description = Some(description.as_str().trim().to_string());
            }
            block.return_value = Some(ret);
            tagged = true;
        } else if let Some(caps) = RE_DOC_THROWS.captures(line) {
            let mut throws = ThrowsClause::new(caps[1].trim());
            if let Some(reason) = caps.get(2) {
                throws.reason = Some(reason.as_str().trim().to_string());
            }
            block.throws.push(throws);
            tagged = true;
        } else if let Some(caps) = RE_DOC_TRIGGER.captures(line) {
            let mut trigger = TriggerClause::new(caps[1].trim());
            if let Some(condition) = caps.get(2) {
                trigger.condition = Some(condition.as_str().trim().to_string());
            }
            block.triggers.push(trigger);
            tagged = true;
        } else if let Some(caps) = RE_DOC_AUTHOR.captures(line) {
            let mut author = Author::new(caps[1].trim());
            if let Some(email) = caps.get(2) {
                author.email = Some(email.as_str().trim().to_string());
            }
            block.authors.push(author);
            tagged = true;
        } else if let Some(caps) = RE_DOC_LICENSE.captures(line) {
            block.licenses.push(parse_license(
                &caps[1],
                caps.get(2).map(|m| m.as_str()),
            ));
            tagged = true;
        } else if let Some(caps) = RE_DOC_TAG.captures(line) {
            let value = caps[2].to_string();
            match &caps[1] {
                "implements" => block.implements.push(value),
                "deprecated" => block.deprecations.push(value),
                "todo" => block.todos.push(value),
                "copyright" => block.copyrights.push(value),
                "see" => block.sees.push(value),
                "uses" => block.uses.push(value),
                "link" => block.links.push(value),
                "since" => block.since = Some(value),
                "version" => block.version = Some(value),
                "access" => block.access = Some(value),
                "category" => block.category = Some(value),
                "package" => block.package = Some(value),
                "subpackage" => block.subpackage = Some(value),
                // Unknown tags store nothing and do not end the
                // description phase
                _ => continue,
            }
            tagged = true;
        } else if !tagged {
            if let Some(caps) = RE_DOC_TEXT.captures(line) {
                desc_lines.push(
                    caps.get(1)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default(),
                );
            }
        }
    }

    let description = desc_lines.join("\n").trim().to_string();
    if !description.is_empty() {
        block.description = Some(description);
    }
    block
}

/// Whichever `@license` slot carries an http(s) prefix is the URL, the
/// other is the name.
fn parse_license(first: &str, second: Option<&str>) -> License {
    let is_url = |s: &str| s.starts_with("http://") || s.starts_with("https://");
    match second {
        Some(second) => {
            let (first, second) = (first.trim(), second.trim());
            if is_url(second) {
                License {
                    name: first.to_string(),
                    url: Some(second.to_string()),
                }
            } else {
                License {
                    name: second.to_string(),
                    url: Some(first.to_string()),
                }
            }
        }
        None => {
            let first = first.trim();
            License {
                name: first.to_string(),
                url: is_url(first).then(|| first.to_string()),
            }
        }
    }
}
