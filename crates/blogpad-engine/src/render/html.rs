use super::{InlineRun, Rendered};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Semantic HTML for a rendered post body, one element per line
pub fn to_html(rendered: &[Rendered]) -> String {
    let mut out = String::new();
    for unit in rendered {
        push_unit(&mut out, unit);
        out.push('\n');
    }
    out
}

fn push_unit(out: &mut String, unit: &Rendered) {
    match unit {
        Rendered::Heading { level, emoji, text } => {
            out.push_str(&format!("<h{level}>"));
            if let Some(emoji) = emoji {
                out.push_str(&format!("<span class=\"emoji\">{}</span> ", encode_text(emoji)));
            }
            out.push_str(&format!("{}</h{level}>", encode_text(text)));
        }
        Rendered::Paragraph(runs) => {
            out.push_str("<p>");
            for run in runs {
                match run {
                    InlineRun::Plain(text) => out.push_str(&encode_text(text)),
                    InlineRun::Strong(text) => {
                        out.push_str(&format!("<strong>{}</strong>", encode_text(text)))
                    }
                }
            }
            out.push_str("</p>");
        }
        Rendered::BulletList(items) => push_list(out, "ul", items),
        Rendered::NumberedList(items) => push_list(out, "ol", items),
        Rendered::Quote(text) => {
            out.push_str(&format!("<blockquote>{}</blockquote>", encode_text(text)))
        }
        Rendered::Divider => out.push_str("<hr>"),
        Rendered::Callout { emoji, text } => {
            out.push_str("<div class=\"callout\">");
            if let Some(emoji) = emoji {
                out.push_str(&format!("<span class=\"emoji\">{}</span>", encode_text(emoji)));
            }
            out.push_str(&format!("<p>{}</p></div>", encode_text(text)));
        }
        Rendered::Code(code) => {
            out.push_str(&format!("<pre><code>{}</code></pre>", encode_text(code)))
        }
        Rendered::Image { url, caption } => {
            out.push_str("<figure>");
            // No <img> until the upload has produced a URL
            if let Some(url) = url {
                let alt = caption.as_deref().unwrap_or("Blog image");
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    encode_double_quoted_attribute(url),
                    encode_double_quoted_attribute(alt)
                ));
            }
            if let Some(caption) = caption {
                out.push_str(&format!("<figcaption>{}</figcaption>", encode_text(caption)));
            }
            out.push_str("</figure>");
        }
    }
}

fn push_list(out: &mut String, tag: &str, items: &[String]) {
    out.push_str(&format!("<{tag}>"));
    for item in items {
        out.push_str(&format!("<li>{}</li>", encode_text(item)));
    }
    out.push_str(&format!("</{tag}>"));
}
