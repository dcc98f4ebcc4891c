//! Prompt template service
//!
//! Renders flow prompts from a handlebars-style subset:
//!
//! - `{{field}}` inserts the field, HTML-escaped
//! - `{{{field}}}` inserts the field verbatim
//! - `{{media url=field}}` inserts the data URI in `field` as a media part
//! - `{{#if field}} ... {{else}} ... {{/if}}` renders on truthiness
//!
//! Fields may be dotted paths into nested objects. Missing fields render
//! as the empty string.

use crate::core::TemplateError;
use crate::domain::entities::DataUri;
use crate::domain::repositories::PromptPart;
use serde_json::Value;

/// A parsed template node
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field { path: String, escape: bool },
    Media(String),
    If {
        path: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// A tag found between braces
#[derive(Debug)]
enum Tag {
    Field { path: String, escape: bool },
    Media(String),
    If(String),
    Else,
    EndIf,
}

/// A prompt template
///
/// # Example
///
/// ```
/// use forensics_hub::domain::services::PromptTemplate;
/// use serde_json::json;
///
/// let template = PromptTemplate::new("Scan {{#if name}}'{{name}}'{{else}}unknown file{{/if}}");
/// let parts = template.render(&json!({ "name": "calls.log" })).unwrap();
/// assert_eq!(parts[0].as_text(), Some("Scan 'calls.log'"));
/// ```
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    /// Creates a template; syntax is checked at render time
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the raw template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Checks the template syntax without rendering
    pub fn check(&self) -> Result<(), TemplateError> {
        parse(&self.source).map(|_| ())
    }

    /// Renders the template against a JSON object
    ///
    /// Adjacent text is merged, so a template without media renders to a
    /// single text part.
    pub fn render(&self, vars: &Value) -> Result<Vec<PromptPart>, TemplateError> {
        if !vars.is_object() {
            return Err(TemplateError::NotAnObject);
        }
        let nodes = parse(&self.source)?;
        let mut out = Vec::new();
        render_nodes(&nodes, vars, &mut out)?;
        Ok(out)
    }
}

fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    // Each frame collects the nodes of one open `#if`.
    struct Frame {
        path: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
        in_else: bool,
    }

    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    fn push(root: &mut Vec<Node>, stack: &mut [Frame], node: Node) {
        match stack.last_mut() {
            Some(frame) if frame.in_else => frame.otherwise.push(node),
            Some(frame) => frame.then.push(node),
            None => root.push(node),
        }
    }

    let mut rest = source;
    while !rest.is_empty() {
        let Some(open) = rest.find("{{") else {
            push(&mut root, &mut stack, Node::Text(rest.to_string()));
            break;
        };
        if open > 0 {
            push(&mut root, &mut stack, Node::Text(rest[..open].to_string()));
        }
        let after_open = &rest[open..];

        let (tag_text, consumed, raw) = if let Some(inner) = after_open.strip_prefix("{{{") {
            match inner.find("}}}") {
                Some(close) => (&inner[..close], 3 + close + 3, true),
                None => {
                    push(&mut root, &mut stack, Node::Text(after_open.to_string()));
                    break;
                }
            }
        } else {
            let inner = &after_open[2..];
            match inner.find("}}") {
                Some(close) => (&inner[..close], 2 + close + 2, false),
                None => {
                    push(&mut root, &mut stack, Node::Text(after_open.to_string()));
                    break;
                }
            }
        };
        rest = &after_open[consumed..];

        match classify(tag_text.trim(), raw)? {
            Tag::Field { path, escape } => {
                push(&mut root, &mut stack, Node::Field { path, escape })
            }
            Tag::Media(path) => push(&mut root, &mut stack, Node::Media(path)),
            Tag::If(path) => stack.push(Frame {
                path,
                then: Vec::new(),
                otherwise: Vec::new(),
                in_else: false,
            }),
            Tag::Else => match stack.last_mut() {
                Some(frame) if !frame.in_else => frame.in_else = true,
                _ => return Err(TemplateError::UnexpectedTag("else".to_string())),
            },
            Tag::EndIf => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| TemplateError::UnexpectedTag("/if".to_string()))?;
                let node = Node::If {
                    path: frame.path,
                    then: frame.then,
                    otherwise: frame.otherwise,
                };
                push(&mut root, &mut stack, node);
            }
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(TemplateError::UnclosedBlock(format!("if {}", frame.path)));
    }
    Ok(root)
}

fn classify(tag: &str, raw: bool) -> Result<Tag, TemplateError> {
    if raw {
        return Ok(Tag::Field {
            path: tag.to_string(),
            escape: false,
        });
    }
    if let Some(block) = tag.strip_prefix('#') {
        let mut words = block.split_whitespace();
        return match (words.next(), words.next(), words.next()) {
            (Some("if"), Some(path), None) => Ok(Tag::If(path.to_string())),
            (Some(helper), _, _) => Err(TemplateError::UnsupportedHelper(helper.to_string())),
            (None, _, _) => Err(TemplateError::UnsupportedHelper(String::new())),
        };
    }
    if let Some(closing) = tag.strip_prefix('/') {
        return match closing.trim() {
            "if" => Ok(Tag::EndIf),
            other => Err(TemplateError::UnexpectedTag(format!("/{other}"))),
        };
    }
    if tag == "else" {
        return Ok(Tag::Else);
    }
    let mut words = tag.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("media"), Some(arg), None) => match arg.strip_prefix("url=") {
            Some(path) if !path.is_empty() => Ok(Tag::Media(path.to_string())),
            _ => Err(TemplateError::UnsupportedHelper(format!("media {arg}"))),
        },
        (Some(path), None, None) => Ok(Tag::Field {
            path: path.to_string(),
            escape: true,
        }),
        _ => Err(TemplateError::UnsupportedHelper(tag.to_string())),
    }
}

fn render_nodes(
    nodes: &[Node],
    vars: &Value,
    out: &mut Vec<PromptPart>,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Text(text) => push_text(out, text),
            Node::Field { path, escape } => {
                let value = stringify(lookup(vars, path));
                if *escape {
                    push_text(out, &escape_html(&value));
                } else {
                    push_text(out, &value);
                }
            }
            Node::Media(path) => {
                let raw = stringify(lookup(vars, path));
                let uri: DataUri = raw.parse().map_err(|e| TemplateError::InvalidMedia {
                    field: path.clone(),
                    reason: format!("{e}"),
                })?;
                out.push(PromptPart::Media {
                    mime_type: uri.mime_type().to_string(),
                    data: uri.payload().to_string(),
                });
            }
            Node::If {
                path,
                then,
                otherwise,
            } => {
                let branch = if is_truthy(lookup(vars, path)) {
                    then
                } else {
                    otherwise
                };
                render_nodes(branch, vars, out)?;
            }
        }
    }
    Ok(())
}

fn push_text(out: &mut Vec<PromptPart>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(PromptPart::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(PromptPart::Text(text.to_string()));
    }
}

fn lookup<'a>(vars: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(vars, |current, segment| current.get(segment))
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Object(_)) => true,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
