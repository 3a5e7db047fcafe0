use crate::error::{DoveError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Escaped braces, a replacement field, or a stray brace.
static FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("valid field regex"));

/// Tag naming template (e.g., "myapp:{0}.{1}.{2}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    pub template: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Automatic,
    Manual,
}

impl TagTemplate {
    /// Create a new tag template
    pub fn new(template: impl Into<String>) -> Self {
        TagTemplate {
            template: template.into(),
        }
    }

    /// Substitute version components into the template.
    ///
    /// `{N}` takes component `N`, `{}` takes the next component in order and
    /// `{{` / `}}` produce literal braces.
    /// Example: template="app:{0}.{1}", components=["1", "2"] -> "app:1.2"
    pub fn render(&self, components: &[String]) -> Result<String> {
        let mut rendered = String::with_capacity(self.template.len());
        let mut last = 0;
        let mut next_auto = 0;
        let mut numbering: Option<Numbering> = None;

        for caps in FIELD.captures_iter(&self.template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            rendered.push_str(&self.template[last..whole.start()]);
            last = whole.end();

            let field = match whole.as_str() {
                "{{" => {
                    rendered.push('{');
                    continue;
                }
                "}}" => {
                    rendered.push('}');
                    continue;
                }
                "{" | "}" => {
                    return Err(self.malformed(format!(
                        "single '{}' at offset {}",
                        whole.as_str(),
                        whole.start()
                    )));
                }
                _ => caps.get(1).map_or("", |m| m.as_str()),
            };

            let index = if field.is_empty() {
                self.switch_numbering(&mut numbering, Numbering::Automatic)?;
                next_auto += 1;
                next_auto - 1
            } else {
                self.switch_numbering(&mut numbering, Numbering::Manual)?;
                let unsupported =
                    || self.malformed(format!("unsupported placeholder '{{{}}}'", field));
                // usize parsing alone would accept a sign, e.g. "{+1}"
                if !field.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(unsupported());
                }
                field.parse::<usize>().map_err(|_| unsupported())?
            };

            let component = components.get(index).ok_or_else(|| {
                DoveError::format_mismatch(format!(
                    "template '{}' references placeholder {} but the version has {} component(s)",
                    self.template,
                    index,
                    components.len()
                ))
            })?;
            rendered.push_str(component);
        }

        rendered.push_str(&self.template[last..]);
        Ok(rendered)
    }

    fn switch_numbering(&self, current: &mut Option<Numbering>, wanted: Numbering) -> Result<()> {
        match *current {
            Some(mode) if mode != wanted => Err(self.malformed(
                "cannot mix automatic '{}' and numbered '{N}' placeholders",
            )),
            _ => {
                *current = Some(wanted);
                Ok(())
            }
        }
    }

    fn malformed(&self, detail: impl AsRef<str>) -> DoveError {
        DoveError::format_mismatch(format!(
            "malformed template '{}': {}",
            self.template,
            detail.as_ref()
        ))
    }
}

/// Render the alternate template registered under `name`
pub fn render_alternate(
    components: &[String],
    name: &str,
    alternates: &BTreeMap<String, String>,
) -> Result<String> {
    let template = alternates
        .get(name)
        .ok_or_else(|| DoveError::alternate_not_found(name))?;
    TagTemplate::new(template.as_str()).render(components)
}
