//! Server-side HTML rendering of page views

use crate::content::{SiteContent, TeamSection};
use crate::pages::{
    LabelLegend, Page, PageBody, PageView, PredictionsView, RawTable, TabOutcome,
};
use pulldown_cmark::{html, Parser};
use std::fmt::Write;

/// Render a complete HTML document for a view
pub fn render_page(content: &SiteContent, view: &PageView) -> String {
    let mut out = String::with_capacity(8 * 1024);

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
"#,
        title = escape_html(&content.title)
    );

    render_sidebar(&mut out, view.page);

    out.push_str("<main class=\"content\">\n");
    render_header(&mut out, content);

    match &view.body {
        PageBody::About { section } | PageBody::ProjectDescription { section } => {
            info_banner(&mut out, &section.intro);
            out.push_str(&markdown(&section.markdown));
        }
        PageBody::Team { section } => render_team(&mut out, section),
        PageBody::Information {
            section,
            legend,
            total_examples,
            raw,
        } => {
            info_banner(&mut out, &section.intro);
            out.push_str(&markdown(&section.markdown));
            render_legend(&mut out, legend, *total_examples);
            render_raw_data(&mut out, raw.as_ref());
        }
        PageBody::Predictions(predictions) => render_predictions(&mut out, predictions),
        PageBody::NotFound { requested } => {
            let _ = write!(
                out,
                "<div class=\"alert error\">Unknown page &quot;{}&quot;. Choose an option from the sidebar.</div>\n",
                escape_html(requested)
            );
        }
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_sidebar(out: &mut String, current: Option<Page>) {
    out.push_str(
        "<aside class=\"sidebar\">\n<form method=\"get\" action=\"/\">\n\
         <label for=\"page\">Choose Option</label>\n\
         <select id=\"page\" name=\"page\" onchange=\"this.form.submit()\">\n",
    );
    for page in Page::ALL {
        let selected = if Some(page) == current { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            page.slug(),
            selected,
            page.title()
        );
    }
    out.push_str("</select>\n<noscript><button type=\"submit\">Go</button></noscript>\n</form>\n</aside>\n");
}

fn render_header(out: &mut String, content: &SiteContent) {
    if !content.logos.is_empty() {
        out.push_str("<div class=\"logos\">\n");
        for logo in &content.logos {
            let _ = writeln!(
                out,
                "<img src=\"/assets/{}\" alt=\"{}\" width=\"200\">",
                escape_html(&logo.path),
                escape_html(&logo.alt)
            );
        }
        out.push_str("</div>\n");
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&content.title));
    if !content.subheader.is_empty() {
        let _ = writeln!(out, "<h2 class=\"subheader\">{}</h2>", escape_html(&content.subheader));
    }
}

fn info_banner(out: &mut String, intro: &str) {
    if !intro.is_empty() {
        let _ = writeln!(out, "<div class=\"alert info\">{}</div>", escape_html(intro));
    }
}

fn render_team(out: &mut String, team: &TeamSection) {
    info_banner(out, &team.intro);

    out.push_str("<nav class=\"tabs\">\n");
    for (index, member) in team.members.iter().enumerate() {
        let _ = writeln!(
            out,
            "<a href=\"#member-{index}\">{}</a>",
            escape_html(member.tab_label())
        );
    }
    out.push_str("</nav>\n");

    for (index, member) in team.members.iter().enumerate() {
        let _ = writeln!(out, "<section class=\"tab\" id=\"member-{index}\">");
        let _ = writeln!(out, "<h3>{}</h3>", escape_html(&member.name));
        let _ = writeln!(out, "<p>{}</p>", escape_html(&member.role));
        match &member.image {
            Some(image) => {
                let _ = writeln!(
                    out,
                    "<img src=\"/assets/{}\" alt=\"{}\" width=\"200\">",
                    escape_html(image),
                    escape_html(&member.name)
                );
            }
            None => {
                let _ = writeln!(out, "<div class=\"avatar\">{}</div>", escape_html(&member.initials()));
            }
        }
        out.push_str("</section>\n");
    }
}

fn render_legend(out: &mut String, legend: &[LabelLegend], total: usize) {
    out.push_str("<ul class=\"legend\">\n");
    for entry in legend {
        let _ = writeln!(
            out,
            "<li><strong>[{}] - {}:</strong> {} <span class=\"count\">({} of {} tweets)</span></li>",
            entry.label.value(),
            entry.name,
            escape_html(entry.description),
            entry.count,
            total
        );
    }
    out.push_str("</ul>\n");
}

fn render_raw_data(out: &mut String, raw: Option<&RawTable>) {
    out.push_str("<h3>Raw Twitter data and label</h3>\n");

    let Some(table) = raw else {
        let _ = writeln!(
            out,
            "<p><a class=\"toggle\" href=\"/?page={}&amp;show_raw=true\">Show raw data</a></p>",
            Page::Information.slug()
        );
        return;
    };

    let _ = writeln!(
        out,
        "<p><a class=\"toggle\" href=\"/?page={}\">Hide raw data</a></p>",
        Page::Information.slug()
    );
    if table.is_truncated() {
        let _ = writeln!(
            out,
            "<p class=\"note\">Showing {} of {} rows.</p>",
            table.rows.len(),
            table.total
        );
    }

    out.push_str("<table class=\"raw\">\n<thead><tr><th>sentiment</th><th>message</th></tr></thead>\n<tbody>\n");
    for row in &table.rows {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td></tr>",
            row.label.value(),
            escape_html(&row.text)
        );
    }
    out.push_str("</tbody>\n</table>\n");
}

fn render_predictions(out: &mut String, view: &PredictionsView) {
    info_banner(out, &view.section.intro);
    out.push_str(&markdown(&view.section.markdown));

    let _ = write!(
        out,
        "<form class=\"predict\" method=\"get\" action=\"/\">\n\
         <input type=\"hidden\" name=\"page\" value=\"{}\">\n\
         <label for=\"text\">Enter Text</label>\n\
         <textarea id=\"text\" name=\"text\" rows=\"4\" placeholder=\"{}\">{}</textarea>\n\
         <button type=\"submit\">Classify</button>\n\
         </form>\n",
        Page::ModelPredictions.slug(),
        escape_html(&view.placeholder),
        escape_html(&view.text)
    );

    if let Some(warning) = view.warning {
        let _ = writeln!(out, "<div class=\"alert warning\">{}</div>", escape_html(warning.message()));
    }

    out.push_str("<nav class=\"tabs\">\n");
    for tab in &view.tabs {
        let _ = writeln!(
            out,
            "<a href=\"#model-{}\">{}</a>",
            escape_html(&tab.model_id),
            escape_html(&tab.title)
        );
    }
    out.push_str("</nav>\n");

    for tab in &view.tabs {
        let _ = writeln!(out, "<section class=\"tab\" id=\"model-{}\">", escape_html(&tab.model_id));
        let _ = writeln!(out, "<h3>{}</h3>", escape_html(&tab.title));
        if !tab.description.is_empty() {
            let _ = writeln!(out, "<p>{}</p>", escape_html(&tab.description));
        }
        match &tab.outcome {
            Some(TabOutcome::Success { display_text, .. }) => {
                let _ = writeln!(out, "<div class=\"alert success\">{}</div>", markdown(display_text));
            }
            Some(TabOutcome::Error { message }) => {
                let _ = writeln!(out, "<div class=\"alert error\">{}</div>", escape_html(message));
            }
            None => {}
        }
        out.push_str("</section>\n");
    }
}

/// Render trusted markdown copy to HTML
pub fn markdown(source: &str) -> String {
    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new(source));
    rendered
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
