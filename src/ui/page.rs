use crate::state::Dashboard;

const TEMPLATE: &str = include_str!("../../assets/dashboard.html");

// ---------------------------------------------------------------------------
// Static page layout
// ---------------------------------------------------------------------------

/// Render the dashboard page: heading, the two selectors pre-filled with
/// their option sets, the two chart panels, and the initial figures.
pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let options = dashboard.options();
    let initial = dashboard.initial_view().to_json().to_string();

    let category_options = option_list(&options.categories, options.default_category.as_deref());
    let year_options = option_list(&options.years, options.default_year.as_deref());
    let figures = script_safe(&initial);

    fill_template(
        TEMPLATE,
        &[
            ("CATEGORY_OPTIONS", category_options.as_str()),
            ("YEAR_OPTIONS", year_options.as_str()),
            ("INITIAL_FIGURES", figures.as_str()),
        ],
    )
}

/// Substitute `{{NAME}}` markers in one pass over `template`.
///
/// Substituted text is never rescanned, so values may themselves contain
/// marker syntax. Unknown markers are left as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn option_list(values: &[String], selected: Option<&str>) -> String {
    values
        .iter()
        .map(|v| {
            let escaped = escape_html(v);
            let marker = if Some(v.as_str()) == selected { " selected" } else { "" };
            format!("      <option value=\"{escaped}\"{marker}>{escaped}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// JSON embedded in a `<script>` block must not close the tag early.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Observation, ObservationTable};

    fn dashboard() -> Dashboard {
        let obs = |indicator: &str, year: &str| Observation {
            country_name: "Côte d'Ivoire".into(),
            country_code: "CIV".into(),
            indicator_name: indicator.into(),
            indicator_code: "X".into(),
            year: year.into(),
            value: Some(1.0),
        };
        Dashboard::new(ObservationTable::new(vec![
            obs("Access to electricity", "2010"),
            obs("Fossil <fuel> & coal", "2011"),
        ]))
    }

    #[test]
    fn page_lists_options_with_defaults_selected() {
        let page = dashboard_page(&dashboard());
        assert!(page.contains("<h1>ESG Data Dashboard</h1>"));
        assert!(page.contains(
            "<option value=\"Access to electricity\" selected>Access to electricity</option>"
        ));
        assert!(page.contains("<option value=\"2010\" selected>2010</option>"));
        assert!(page.contains("<option value=\"2011\">2011</option>"));
        assert!(page.contains("Fossil &lt;fuel&gt; &amp; coal"));
        assert!(page.contains("id=\"world-map\""));
        assert!(page.contains("id=\"bar-chart\""));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn embedded_json_cannot_close_script() {
        assert_eq!(script_safe(r#"{"t":"</script>"}"#), r#"{"t":"<\/script>"}"#);
        assert_eq!(escape_html("Côte d'Ivoire"), "Côte d&#39;Ivoire");
    }

    #[test]
    fn marker_text_in_data_is_not_substituted_again() {
        let obs = |indicator: &str| Observation {
            country_name: "Chile".into(),
            country_code: "CHL".into(),
            indicator_name: indicator.into(),
            indicator_code: "X".into(),
            year: "2000".into(),
            value: Some(1.0),
        };
        let dashboard = Dashboard::new(ObservationTable::new(vec![
            obs("A"),
            obs("{{YEAR_OPTIONS}}"),
            obs("{{INITIAL_FIGURES}}"),
        ]));
        let page = dashboard_page(&dashboard);

        assert_eq!(page.matches("<option value=\"2000\"").count(), 1);
        assert!(page.contains("<option value=\"{{YEAR_OPTIONS}}\">{{YEAR_OPTIONS}}</option>"));
        assert_eq!(page.matches("const initial = ").count(), 1);
        assert_eq!(page.matches("\"layout\"").count(), 2);
    }

    #[test]
    fn fill_template_handles_unknown_and_unclosed_markers() {
        let values = [("A", "{{B}}"), ("B", "x")];
        assert_eq!(fill_template("<{{A}}|{{B}}>", &values), "<{{B}}|x>");
        assert_eq!(fill_template("{{C}} {{A", &values), "{{C}} {{A");
    }
}
