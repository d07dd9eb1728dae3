//! Form presentation options. Built once, read-only while rendering and submitting.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    #[default]
    Post,
    Get,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Post => "POST",
            RequestMethod::Get => "GET",
            RequestMethod::Put => "PUT",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }

    /// htmx attribute issuing this method, e.g. `hx-post`.
    pub fn htmx_attribute(self) -> &'static str {
        match self {
            RequestMethod::Post => "hx-post",
            RequestMethod::Get => "hx-get",
            RequestMethod::Put => "hx-put",
            RequestMethod::Patch => "hx-patch",
            RequestMethod::Delete => "hx-delete",
        }
    }
}

impl FromStr for RequestMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "POST" => Ok(RequestMethod::Post),
            "GET" => Ok(RequestMethod::Get),
            "PUT" => Ok(RequestMethod::Put),
            "PATCH" => Ok(RequestMethod::Patch),
            "DELETE" => Ok(RequestMethod::Delete),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How htmx places the response relative to the target. See <https://htmx.org/attributes/hx-swap/>.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapMode {
    #[default]
    #[serde(rename = "innerHTML")]
    InnerHtml,
    #[serde(rename = "outerHTML")]
    OuterHtml,
    #[serde(rename = "textContent")]
    TextContent,
    #[serde(rename = "beforebegin")]
    BeforeBegin,
    #[serde(rename = "afterbegin")]
    AfterBegin,
    #[serde(rename = "beforeend")]
    BeforeEnd,
    #[serde(rename = "afterend")]
    AfterEnd,
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "none")]
    None,
}

impl SwapMode {
    pub const ALL: [SwapMode; 9] = [
        SwapMode::InnerHtml,
        SwapMode::OuterHtml,
        SwapMode::TextContent,
        SwapMode::BeforeBegin,
        SwapMode::AfterBegin,
        SwapMode::BeforeEnd,
        SwapMode::AfterEnd,
        SwapMode::Delete,
        SwapMode::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SwapMode::InnerHtml => "innerHTML",
            SwapMode::OuterHtml => "outerHTML",
            SwapMode::TextContent => "textContent",
            SwapMode::BeforeBegin => "beforebegin",
            SwapMode::AfterBegin => "afterbegin",
            SwapMode::BeforeEnd => "beforeend",
            SwapMode::AfterEnd => "afterend",
            SwapMode::Delete => "delete",
            SwapMode::None => "none",
        }
    }
}

impl FromStr for SwapMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwapMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidSwapMode(s.to_string()))
    }
}

/// Id of the container rendered after the form when the target is [`HtmxTarget::Auto`].
pub const AUTO_TARGET_ID: &str = "form-response";

/// Element that receives the htmx response. In JSON: `"auto"` or a CSS selector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HtmxTarget {
    /// Render a response container after the form and target it.
    #[default]
    Auto,
    Selector(String),
}

impl HtmxTarget {
    pub fn selector(&self) -> String {
        match self {
            HtmxTarget::Auto => format!("#{}", AUTO_TARGET_ID),
            HtmxTarget::Selector(s) => s.clone(),
        }
    }
}

impl From<String> for HtmxTarget {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("auto") {
            HtmxTarget::Auto
        } else {
            HtmxTarget::Selector(s)
        }
    }
}

impl From<HtmxTarget> for String {
    fn from(t: HtmxTarget) -> Self {
        match t {
            HtmxTarget::Auto => "auto".into(),
            HtmxTarget::Selector(s) => s,
        }
    }
}

pub const DEFAULT_HTMX_SCRIPT_SRC: &str = "https://unpkg.com/htmx.org@2.0.4";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmxConfig {
    #[serde(default)]
    pub target: HtmxTarget,
    #[serde(default)]
    pub swap: SwapMode,
    #[serde(default = "default_script_src")]
    pub script_src: String,
}

impl Default for HtmxConfig {
    fn default() -> Self {
        HtmxConfig {
            target: HtmxTarget::Auto,
            swap: SwapMode::InnerHtml,
            script_src: default_script_src(),
        }
    }
}

fn default_script_src() -> String {
    DEFAULT_HTMX_SCRIPT_SRC.into()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Form `action`; htmx mode sends the request here too.
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: RequestMethod,
    /// Wrap every field in a container element.
    #[serde(default)]
    pub wrap: bool,
    /// Render a label before every field.
    #[serde(default = "default_true")]
    pub labels: bool,
    #[serde(default = "default_true")]
    pub csrf: bool,
    #[serde(default = "default_submit_text")]
    pub submit_text: String,
    /// Partial-update mode; `None` renders a plain form.
    #[serde(default)]
    pub htmx: Option<HtmxConfig>,
    /// Custom labels keyed by column name.
    #[serde(default)]
    pub field_labels: HashMap<String, String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            action: String::new(),
            method: RequestMethod::Post,
            wrap: false,
            labels: true,
            csrf: true,
            submit_text: default_submit_text(),
            htmx: None,
            field_labels: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_submit_text() -> String {
    "Submit".into()
}
