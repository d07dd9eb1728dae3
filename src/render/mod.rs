//! Form markup: form tag (plain or htmx), CSRF field, one block per field, submit button.

mod fields;
pub mod markup;

pub use fields::{date_input_type, render_field};

use crate::config::{FormConfig, HtmxTarget, AUTO_TARGET_ID};
use crate::csrf::CSRF_FIELD_NAME;
use crate::field::{FieldKind, FieldSet};
use markup::{Markup, Tag};

/// Class on the container wrapping each field in wrap mode.
pub const WRAPPER_CLASS: &str = "form-field";

/// Output of one page render. Several forms may share a pass; the htmx
/// script is injected at most once per pass.
#[derive(Debug, Default)]
pub struct RenderPass {
    out: Markup,
    htmx_injected: bool,
}

impl RenderPass {
    pub fn new() -> Self {
        RenderPass::default()
    }

    pub fn htmx_injected(&self) -> bool {
        self.htmx_injected
    }

    pub fn into_string(self) -> String {
        self.out.into_string()
    }
}

/// Everything the renderer needs besides the fields and config.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderContext<'a> {
    pub title: Option<&'a str>,
    /// Token for the hidden field; `None` when CSRF is disabled.
    pub csrf_token: Option<&'a str>,
}

pub fn render_form(pass: &mut RenderPass, fields: &FieldSet, config: &FormConfig, ctx: RenderContext<'_>) {
    if let Some(title) = ctx.title {
        pass.out.element(&Tag::new("h2"), title);
    }

    let form_tag = match &config.htmx {
        Some(htmx) => {
            if !pass.htmx_injected {
                pass.out.element(&Tag::new("script").attr("src", &htmx.script_src), "");
                pass.htmx_injected = true;
            }
            Tag::new("form")
                .attr(config.method.htmx_attribute(), &config.action)
                .attr("hx-swap", htmx.swap.as_str())
                .attr("hx-target", htmx.target.selector())
        }
        None => Tag::new("form")
            .attr("action", &config.action)
            .attr("method", config.method.as_str()),
    };
    pass.out.open(&form_tag);

    if let Some(token) = ctx.csrf_token {
        pass.out.void(
            &Tag::new("input")
                .attr("type", "hidden")
                .attr("name", CSRF_FIELD_NAME)
                .attr("value", token),
        );
    }

    for field in fields {
        if config.wrap {
            pass.out.open(&Tag::new("div").attr("class", WRAPPER_CLASS));
        }
        if config.labels {
            // Radio inputs carry per-option ids, so the group caption is not a `<label>`.
            let caption = if field.kind == FieldKind::Radio {
                Tag::new("span").attr("id", format!("{}_label", field.name))
            } else {
                Tag::new("label").attr("for", &field.name)
            };
            pass.out.element(&caption, &format!("{}:", field.display_label()));
        }
        render_field(&mut pass.out, field);
        if config.wrap {
            pass.out.close("div");
        }
    }

    pass.out.element(&Tag::new("button").attr("type", "submit"), &config.submit_text);
    pass.out.close("form");

    if let Some(htmx) = &config.htmx {
        if htmx.target == HtmxTarget::Auto {
            pass.out.element(&Tag::new("div").attr("id", AUTO_TARGET_ID), "");
        }
    }
}
