//! Server-rendered forecast page.
//!
//! Every pair block uses the pair id as element id prefix (`jpy-rate`,
//! `usd-comment`, ...). A failed refresh renders the failure block only.

use weather_types::{DisplayFields, Locale, RefreshOutcome};

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
.pair{border:1px solid #ddd;border-radius:8px;padding:1rem;margin-bottom:1rem}\
.icon{font-size:3rem}.rate{font-size:1.5rem}.unit{font-size:1rem;color:#666}\
.positive{color:#c0392b}.negative{color:#2471a3}.neutral{color:#555}\
.error{background:#fdecea;padding:1rem;border-radius:8px}footer{color:#888}";

pub fn render(locale: Locale, outcome: &RefreshOutcome) -> String {
    let mut body = String::new();
    match outcome {
        RefreshOutcome::Ready { report } => {
            for fields in &report.pairs {
                render_pair(&mut body, fields);
            }
            body.push_str(&format!(
                r#"<footer id="updated-at">{}: {}</footer>"#,
                escape(locale.updated_label()),
                escape(&report.updated_at)
            ));
        }
        RefreshOutcome::Error { .. } => {
            body.push_str(&format!(
                r#"<div id="error" class="error">{}</div>"#,
                escape(locale.failure_message())
            ));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        lang = locale.code(),
        title = escape(locale.title()),
        style = STYLE,
        body = body,
    )
}

fn render_pair(out: &mut String, f: &DisplayFields) {
    let id = escape(&f.id);
    let trend = f.trend.css_class();
    out.push_str(&format!(
        r#"<section id="{id}" class="pair {weather}">
<h2 id="{id}-label">{label}</h2>
<div id="{id}-icon" class="icon">{icon}</div>
<div id="{id}-rate" class="rate">{rate} <span class="unit">{unit}</span></div>
<div id="{id}-difference" class="difference {trend}">{difference}</div>
<p id="{id}-comment" class="comment">{comment}</p>
</section>
"#,
        weather = f.weather.as_str(),
        label = escape(&f.label),
        icon = escape(&f.icon),
        rate = escape(&f.rate),
        unit = escape(&f.unit),
        difference = escape(&f.difference),
        comment = escape(&f.comment),
    ));
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
