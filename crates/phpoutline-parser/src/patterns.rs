//! Line patterns and the line classifier.
//!
//! One compiled-once regex per recognized declaration shape, and a pure
//! [`classify`] function mapping a stripped line to a [`LineToken`]. The
//! scanner drives its state machine off these tokens; every branch here
//! is testable without any scanner state.

use phpoutline_model::Visibility;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_PHP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<\?(php)?|(php)?\?>$").unwrap());

/// `[abstract] [final] class|interface|trait Name [extends Base]
/// [implements A, B] [{]`
static RE_TYPE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(abstract)\s+)?(?:(final)\s+)?(interface|class|trait)\s+(\w+)",
        r"(?:\s+extends\s+([\w\\]+))?",
        r"(?:\s+implements\s+([\w\\]+(?:\s*,\s*[\w\\]+)*))?",
    ))
    .unwrap()
});

/// `[abstract] [final] [static] [access] [static] function [&]name(params)
/// [: type] [{ ...] [;]`
static RE_FUNCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(abstract)\s+)?(?:(final)\s+)?(?:(static)\s+)?",
        r"(?:(protected|private|public)\s+)?(?:(static)\s+)?",
        r"function\s*&?\s*(\w+)\s*\((.*)\)",
        r"(?:\s*:\s*([^\s{;]+))?\s*(?:\{.*)?;?\s*$",
    ))
    .unwrap()
});

/// One signature parameter fragment: `[type] [&]$name [= default]`
static RE_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\S+)\s+)?(&)?\s*\$(\w+)(?:\s*=\s*(\S+))?$").unwrap());

/// `[static] public|protected|private|var [static] $name [= default]`
static RE_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(static)\s+)?(protected|private|public|var)\s+(?:(static)\s+)?\$(\w+)(?:\s*=\s*([^(]+))?")
        .unwrap()
});

/// Single-line member annotation: `/** @var type $name [description] */`
static RE_VAR_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/\*\*\s+@var\s+(\w+)\s+\$(\w+)(?:\s+(.+?))?\s*\*/$").unwrap()
});

/// `use A, B;` inside a type body (trait usage)
static RE_TRAIT_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^use\s+([\w\\]+(?:\s*,\s*[\w\\]+)*)\s*;").unwrap());

static RE_NAMESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^namespace\s+([\w\\]+)\s*;").unwrap());

/// Doc block close, possibly sharing the line with the last `*`
static RE_DOC_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*?\*/\s*$").unwrap());

// -- Tokens -------------------------------------------------------------------

/// Kind of a type declaration header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
}

/// Captured class/interface/trait header
#[derive(Debug, Clone, PartialEq)]
pub struct TypeHeader {
    pub kind: TypeKind,
    pub name: String,
    pub is_abstract: bool,
    pub is_final: bool,
    pub extends: Option<String>,
    pub implements: Vec<String>,
}

/// Captured function/method header
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHeader {
    pub name: String,
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub access: Option<Visibility>,
    /// Raw text between the parentheses, not yet split
    pub raw_params: String,
    /// Return type hint after `):`
    pub return_hint: Option<String>,
}

/// Captured member variable declaration
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub name: String,
    pub access: Option<Visibility>,
    pub is_static: bool,
    /// Default value text, trailing `;` already removed
    pub default_value: Option<String>,
}

/// Captured single-line `@var` annotation
#[derive(Debug, Clone, PartialEq)]
pub struct VarAnnotation {
    pub name: String,
    pub type_annotation: String,
    pub description: Option<String>,
}

/// One recognized (or unrecognized) source line
#[derive(Debug, Clone, PartialEq)]
pub enum LineToken {
    /// `<?php` / `?>`
    PhpTag,
    /// Exactly `/**`
    DocBlockOpen,
    /// `*/` tail of a doc block
    DocBlockClose,
    TypeHeader(TypeHeader),
    FunctionHeader(FunctionHeader),
    TraitUse(Vec<String>),
    Namespace(String),
    VarAnnotation(VarAnnotation),
    MemberDecl(MemberDecl),
    /// Anything the patterns do not model
    Plain,
}

// -- Classifier ---------------------------------------------------------------

/// Classify one comment-stripped, trimmed line.
pub fn classify(line: &str) -> LineToken {
    if line.is_empty() {
        return LineToken::Plain;
    }
    if RE_PHP_TAG.is_match(line) {
        return LineToken::PhpTag;
    }
    if line == "/**" {
        return LineToken::DocBlockOpen;
    }
    if let Some(caps) = RE_TYPE_HEADER.captures(line) {
        let kind = match caps[3].to_ascii_lowercase().as_str() {
            "interface" => TypeKind::Interface,
            "trait" => TypeKind::Trait,
            _ => TypeKind::Class,
        };
        let implements = caps
            .get(6)
            .map(|m| {
                m.as_str()
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        return LineToken::TypeHeader(TypeHeader {
            kind,
            name: caps[4].to_string(),
            is_abstract: caps.get(1).is_some(),
            is_final: caps.get(2).is_some(),
            extends: caps.get(5).map(|m| m.as_str().to_string()),
            implements,
        });
    }
    if let Some(caps) = RE_FUNCTION_HEADER.captures(line) {
        return LineToken::FunctionHeader(FunctionHeader {
            name: caps[6].to_string(),
            is_abstract: caps.get(1).is_some(),
            is_final: caps.get(2).is_some(),
            is_static: caps.get(3).is_some() || caps.get(5).is_some(),
            access: caps.get(4).and_then(|m| m.as_str().to_lowercase().parse().ok()),
            raw_params: caps[7].to_string(),
            return_hint: caps.get(8).map(|m| m.as_str().to_string()),
        });
    }
    if let Some(caps) = RE_VAR_ANNOTATION.captures(line) {
        return LineToken::VarAnnotation(VarAnnotation {
            name: caps[2].to_string(),
            type_annotation: caps[1].to_string(),
            description: caps.get(3).map(|m| m.as_str().trim().to_string()),
        });
    }
    if let Some(caps) = RE_MEMBER.captures(line) {
        let access = match caps[2].to_ascii_lowercase().as_str() {
            // `var` declares a member without an access level
            "var" => None,
            other => other.parse().ok(),
        };
        return LineToken::MemberDecl(MemberDecl {
            name: caps[4].to_string(),
            access,
            is_static: caps.get(1).is_some() || caps.get(3).is_some(),
            default_value: caps
                .get(5)
                .map(|m| m.as_str().trim_end_matches(';').trim().to_string()),
        });
    }
    if let Some(caps) = RE_TRAIT_USE.captures(line) {
        let names = caps[1]
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        return LineToken::TraitUse(names);
    }
    if let Some(caps) = RE_NAMESPACE.captures(line) {
        return LineToken::Namespace(caps[1].to_string());
    }
    if RE_DOC_CLOSE.is_match(line) {
        return LineToken::DocBlockClose;
    }
    LineToken::Plain
}

/// Parse one comma-split signature parameter fragment. Fragments the
/// pattern does not model (e.g. defaults containing spaces) yield `None`
/// and the parameter is skipped, as with any unrecognized input.
pub fn parse_parameter_fragment(fragment: &str) -> Option<ParameterCapture> {
    let caps = RE_PARAMETER.captures(fragment)?;
    Some(ParameterCapture {
        name: caps[3].to_string(),
        cast: caps.get(1).map(|m| m.as_str().to_string()),
        by_reference: caps.get(2).is_some(),
        default_value: caps.get(4).map(|m| m.as_str().to_string()),
    })
}

/// Captured signature parameter fragment
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCapture {
    pub name: String,
    pub cast: Option<String>,
    pub by_reference: bool,
    pub default_value: Option<String>,
}

/// True for the `*/` (or `**/`) tail ending a doc block.
pub fn is_doc_close(line: &str) -> bool {
    RE_DOC_CLOSE.is_match(line)
}

/// Strip a trailing `//` or `#` line comment. Markers are honored only at
/// the line start or after whitespace, so `http://` URLs survive.
pub fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut cut = line.len();
    for (idx, _) in line.match_indices("//") {
        if idx == 0 || bytes[idx - 1].is_ascii_whitespace() {
            cut = cut.min(idx);
        }
    }
    for (idx, _) in line.match_indices('#') {
        if idx == 0 || bytes[idx - 1].is_ascii_whitespace() {
            cut = cut.min(idx);
        }
    }
    &line[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_php_tags() {
        assert_eq!(classify("<?php"), LineToken::PhpTag);
        assert_eq!(classify("<?"), LineToken::PhpTag);
        assert_eq!(classify("?>"), LineToken::PhpTag);
    }

    #[test]
    fn classify_class_header() {
        let token = classify("class Foo extends Bar implements Baz, Qux {");
        let LineToken::TypeHeader(header) = token else {
            panic!("expected type header, got {token:?}");
        };
        assert_eq!(header.kind, TypeKind::Class);
        assert_eq!(header.name, "Foo");
        assert_eq!(header.extends.as_deref(), Some("Bar"));
        assert_eq!(header.implements, vec!["Baz".to_string(), "Qux".to_string()]);
        assert!(!header.is_abstract);
        assert!(!header.is_final);
    }

    #[test]
    fn classify_abstract_final_flags() {
        let LineToken::TypeHeader(header) = classify("abstract class Base") else {
            panic!("expected type header");
        };
        assert!(header.is_abstract);

        let LineToken::TypeHeader(header) = classify("final class Leaf {") else {
            panic!("expected type header");
        };
        assert!(header.is_final);
    }

    #[test]
    fn classify_interface_and_trait_headers() {
        let LineToken::TypeHeader(header) = classify("interface Readable extends Closable") else {
            panic!("expected type header");
        };
        assert_eq!(header.kind, TypeKind::Interface);
        assert_eq!(header.extends.as_deref(), Some("Closable"));

        let LineToken::TypeHeader(header) = classify("trait Loggable {") else {
            panic!("expected type header");
        };
        assert_eq!(header.kind, TypeKind::Trait);
        assert_eq!(header.name, "Loggable");
    }

    #[test]
    fn classify_function_header() {
        let token = classify("function add(float $a, float $b): float { return $a + $b; }");
        let LineToken::FunctionHeader(header) = token else {
            panic!("expected function header, got {token:?}");
        };
        assert_eq!(header.name, "add");
        assert_eq!(header.raw_params, "float $a, float $b");
        assert_eq!(header.return_hint.as_deref(), Some("float"));
        assert!(header.access.is_none());
    }

    #[test]
    fn classify_method_qualifiers() {
        let LineToken::FunctionHeader(header) =
            classify("abstract protected static function run($job);")
        else {
            panic!("expected function header");
        };
        assert!(header.is_abstract);
        assert!(header.is_static);
        assert_eq!(header.access, Some(Visibility::Protected));
        assert_eq!(header.return_hint, None);

        // `static` may also follow the access level
        let LineToken::FunctionHeader(header) = classify("public static function make() {") else {
            panic!("expected function header");
        };
        assert!(header.is_static);
    }

    #[test]
    fn classify_reference_return_function() {
        let LineToken::FunctionHeader(header) = classify("function &getRef() {") else {
            panic!("expected function header");
        };
        assert_eq!(header.name, "getRef");
    }

    #[test]
    fn classify_member_decl() {
        let LineToken::MemberDecl(member) = classify("protected static $count = 0;") else {
            panic!("expected member");
        };
        assert_eq!(member.name, "count");
        assert_eq!(member.access, Some(Visibility::Protected));
        assert!(member.is_static);
        assert_eq!(member.default_value.as_deref(), Some("0"));

        let LineToken::MemberDecl(member) = classify("var $legacy;") else {
            panic!("expected member");
        };
        assert_eq!(member.access, None);
        assert_eq!(member.default_value, None);
    }

    #[test]
    fn classify_var_annotation() {
        let LineToken::VarAnnotation(var) = classify("/** @var string $name Holds the name */")
        else {
            panic!("expected var annotation");
        };
        assert_eq!(var.name, "name");
        assert_eq!(var.type_annotation, "string");
        assert_eq!(var.description.as_deref(), Some("Holds the name"));
    }

    #[test]
    fn classify_trait_use_and_namespace() {
        assert_eq!(
            classify("use HasAuthors, HasLinks;"),
            LineToken::TraitUse(vec!["HasAuthors".to_string(), "HasLinks".to_string()])
        );
        assert_eq!(
            classify("namespace App\\Models;"),
            LineToken::Namespace("App\\Models".to_string())
        );
    }

    #[test]
    fn classify_doc_block_boundaries() {
        assert_eq!(classify("/**"), LineToken::DocBlockOpen);
        assert_eq!(classify("*/"), LineToken::DocBlockClose);
        assert_eq!(classify("**/"), LineToken::DocBlockClose);
    }

    #[test]
    fn classify_plain_lines() {
        assert_eq!(classify(""), LineToken::Plain);
        assert_eq!(classify("$x = compute();"), LineToken::Plain);
        assert_eq!(classify("return $a + $b;"), LineToken::Plain);
        // Closures are not declarations
        assert_eq!(classify("$f = function($x) use ($y) {"), LineToken::Plain);
    }

    #[test]
    fn parameter_fragments() {
        let param = parse_parameter_fragment("float $a").unwrap();
        assert_eq!(param.name, "a");
        assert_eq!(param.cast.as_deref(), Some("float"));
        assert!(!param.by_reference);

        let param = parse_parameter_fragment("&$ref").unwrap();
        assert_eq!(param.name, "ref");
        assert!(param.by_reference);

        let param = parse_parameter_fragment("$limit = 10").unwrap();
        assert_eq!(param.default_value.as_deref(), Some("10"));

        let param = parse_parameter_fragment("?int $count = NULL").unwrap();
        assert_eq!(param.cast.as_deref(), Some("?int"));
        assert_eq!(param.default_value.as_deref(), Some("NULL"));

        // A default containing spaces is not modeled
        assert!(parse_parameter_fragment("$a = array( 1, 2 )").is_none());
    }

    #[test]
    fn comment_stripping() {
        assert_eq!(strip_line_comment("$x = 1; // count"), "$x = 1; ");
        assert_eq!(strip_line_comment("$x = 1; # count"), "$x = 1; ");
        assert_eq!(strip_line_comment("// whole line"), "");
        assert_eq!(
            strip_line_comment("* @link http://example.org/doc"),
            "* @link http://example.org/doc"
        );
    }
}
