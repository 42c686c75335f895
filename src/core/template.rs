/// Fragment templates: parsing, placeholder checks, and rendering.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownField(String),
    #[error("placeholder '{{{0}}}' is not available here")]
    FieldNotAllowed(Field),
}

/// A value the composer can interpolate into a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// `{clinic}`: the clinic name from the context.
    Clinic,
    /// `{director}`: the director name from the context.
    Director,
    /// `{character}`: the story protagonist's name.
    Character,
    /// `{text}`: the text a linguistic pattern wraps.
    Text,
}

impl Field {
    fn from_name(name: &str) -> Option<Field> {
        match name {
            "clinic" => Some(Field::Clinic),
            "director" => Some(Field::Director),
            "character" => Some(Field::Character),
            "text" => Some(Field::Text),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Clinic => "clinic",
            Field::Director => "director",
            Field::Character => "character",
            Field::Text => "text",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A placeholder such as `{clinic}`.
    Field(Field),
}

/// Values substituted for placeholders during rendering. Unset fields render
/// as empty text; catalog validation rejects templates that reference a field
/// their role never supplies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    pub clinic: &'a str,
    pub director: &'a str,
    pub character: &'a str,
    pub text: &'a str,
}

impl<'a> Fields<'a> {
    fn get(&self, field: Field) -> &'a str {
        match field {
            Field::Clinic => self.clinic,
            Field::Director => self.director,
            Field::Character => self.character,
            Field::Text => self.text,
        }
    }
}

/// A parsed fragment template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// Syntax:
    /// - `{clinic}` / `{director}` / `{character}` / `{text}` → `Field`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal_buf.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        match inner {
                            '{' => {
                                return Err(TemplateError::Parse(
                                    "nested braces are not allowed".to_string(),
                                ))
                            }
                            '}' => {
                                closed = true;
                                break;
                            }
                            other => name.push(other),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::Parse("unclosed brace".to_string()));
                    }
                    if name.is_empty() {
                        return Err(TemplateError::Parse("empty braces".to_string()));
                    }
                    let field =
                        Field::from_name(name.trim()).ok_or(TemplateError::UnknownField(name))?;
                    if !literal_buf.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal_buf.push('}');
                }
                '}' => {
                    return Err(TemplateError::Parse(
                        "unmatched closing brace".to_string(),
                    ))
                }
                other => literal_buf.push(other),
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Ok(Template {
            source: input.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The text the template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders referenced by this template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(*f),
            Segment::Literal(_) => None,
        })
    }

    /// Fail if the template references a field outside `allowed`.
    pub fn check_fields(&self, allowed: &[Field]) -> Result<(), TemplateError> {
        match self.fields().find(|f| !allowed.contains(f)) {
            Some(field) => Err(TemplateError::FieldNotAllowed(field)),
            None => Ok(()),
        }
    }

    /// True when the template renders to whitespace regardless of fields.
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| match s {
            Segment::Literal(text) => text.trim().is_empty(),
            Segment::Field(_) => false,
        })
    }

    pub fn render(&self, fields: &Fields<'_>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(fields.get(*field)),
            }
        }
        out
    }
}

impl TryFrom<String> for Template {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Template::parse(&value)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> String {
        template.source
    }
}
