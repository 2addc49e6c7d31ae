use super::Rendered;

/// Plain-text lines for terminal display. Blocks are separated by a blank line.
pub fn to_lines(rendered: &[Rendered]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, unit) in rendered.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        push_unit(&mut lines, unit);
    }
    lines
}

fn with_emoji(emoji: Option<&str>, text: &str) -> String {
    match emoji {
        Some(emoji) => format!("{emoji} {text}"),
        None => text.to_string(),
    }
}

fn push_unit(lines: &mut Vec<String>, unit: &Rendered) {
    match unit {
        Rendered::Heading { level, emoji, text } => {
            let marks = "#".repeat(usize::from(*level));
            lines.push(format!("{marks} {}", with_emoji(emoji.as_deref(), text)));
        }
        Rendered::Paragraph(runs) => {
            lines.push(runs.iter().map(|run| run.text()).collect());
        }
        Rendered::BulletList(items) => {
            lines.extend(items.iter().map(|item| format!("• {item}")));
        }
        Rendered::NumberedList(items) => {
            lines.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(n, item)| format!("{}. {item}", n + 1)),
            );
        }
        Rendered::Quote(text) => lines.extend(text.lines().map(|line| format!("│ {line}"))),
        Rendered::Divider => lines.push("─".repeat(24)),
        Rendered::Callout { emoji, text } => {
            lines.push(format!("[{}]", with_emoji(emoji.as_deref(), text)));
        }
        Rendered::Code(code) => lines.extend(code.lines().map(|line| format!("    {line}"))),
        Rendered::Image { url, caption } => {
            let label = caption.as_deref().or(url.as_deref()).unwrap_or("pending upload");
            lines.push(format!("[image: {label}]"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::InlineRun;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_for_mixed_body() {
        let rendered = vec![
            Rendered::Heading {
                level: 2,
                emoji: Some("🌿".to_string()),
                text: "Garden".to_string(),
            },
            Rendered::Paragraph(vec![
                InlineRun::Plain("Water ".to_string()),
                InlineRun::Strong("daily".to_string()),
            ]),
            Rendered::NumberedList(vec!["dig".to_string(), "plant".to_string()]),
            Rendered::Image {
                url: Some("https://x/p.png".to_string()),
                caption: None,
            },
        ];

        assert_eq!(
            to_lines(&rendered),
            vec![
                "## 🌿 Garden",
                "",
                "Water daily",
                "",
                "1. dig",
                "2. plant",
                "",
                "[image: https://x/p.png]",
            ]
        );
    }
}
