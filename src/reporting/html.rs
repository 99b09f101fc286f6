use crate::core::types::CheckedRow;

/// HTML report generator for mailed results.
///
/// Titles and URIs are interpolated as-is, without HTML escaping. Input
/// rows are trusted; a title or URI containing markup ends up in the
/// document unchanged.
pub struct HtmlReport;

impl HtmlReport {
    /// Generate a complete standalone HTML document whose `<title>` and
    /// heading are `mail_title`, with one table row per checked row.
    pub fn generate<'a, I>(mail_title: &str, rows: I) -> String
    where
        I: IntoIterator<Item = &'a CheckedRow>,
    {
        let table_rows: Vec<String> = rows.into_iter().map(Self::generate_row).collect();

        format!(
            r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="UTF-8">
        <title>{mail_title}</title>
        <style>{css}</style>
    </head>

    <body>
        <h2>{mail_title}</h2>

        <table>
            <tr>
                <th>Result</th>
                <th>Title</th>
                <th>URI</th>
            </tr>
{table_data}
        </table>
    </body>
</html>
"#,
            css = Self::generate_css(),
            table_data = table_rows.join("\n"),
        )
    }

    fn generate_css() -> &'static str {
        r#"
            html {
                font-family: Arial, Helvetica, sans-serif;
            }

            table, th, td {
                border: 1px solid black;
                border-collapse: collapse;
            }

            th, td {
                padding: 4px 8px;
                text-align: left;
            }
        "#
    }

    /// Generate a single table row; the URI cell links to the URI itself.
    fn generate_row(row: &CheckedRow) -> String {
        format!(
            r#"            <tr>
                <td>{result}</td>
                <td>{title}</td>
                <td><a href="{uri}">{uri}</a></td>
            </tr>"#,
            result = row.result(),
            title = row.title(),
            uri = row.uri(),
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::{NotifyPolicy, ProbeStatus, Row};

    fn checked(title: &str, uri: &str, result: ProbeStatus) -> CheckedRow {
        Row {
            title: title.to_string(),
            uri: uri.to_string(),
            notify: NotifyPolicy::Always,
        }
        .checked(result)
    }

    #[test]
    fn test_generate__document_structure() {
        let rows = vec![checked("Example", "http://example.com", ProbeStatus::Ok)];
        let html = HtmlReport::generate("Links 2024-01-31", &rows);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Links 2024-01-31</title>"));
        assert!(html.contains("<h2>Links 2024-01-31</h2>"));
        assert!(html.contains("<th>Result</th>"));
        assert!(html.contains("<th>Title</th>"));
        assert!(html.contains("<th>URI</th>"));
        assert!(html.contains("<style>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_generate__uri_is_link_with_same_text() {
        let rows = vec![checked("Example", "http://example.com/a?b=c", ProbeStatus::Invalid)];
        let html = HtmlReport::generate("Subject", &rows);

        assert!(html.contains(r#"<a href="http://example.com/a?b=c">http://example.com/a?b=c</a>"#));
        assert!(html.contains("<td>Invalid</td>"));
        assert!(html.contains("<td>Example</td>"));
    }

    #[test]
    fn test_generate__one_row_per_checked_row() {
        let rows = vec![
            checked("a", "http://a.com", ProbeStatus::Ok),
            checked("b", "http://b.com", ProbeStatus::Invalid),
            checked("c", "http://a.com", ProbeStatus::Ok),
        ];
        let html = HtmlReport::generate("Subject", &rows);

        // one header row plus three data rows
        assert_eq!(html.matches("<tr>").count(), 4);
        let a = html.find("<td>a</td>").unwrap();
        let b = html.find("<td>b</td>").unwrap();
        let c = html.find("<td>c</td>").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_generate__content_is_not_escaped() {
        let rows = vec![checked("<b>bold</b> & co", "http://example.com", ProbeStatus::Ok)];
        let html = HtmlReport::generate("A & B", &rows);

        assert!(html.contains("<td><b>bold</b> & co</td>"));
        assert!(html.contains("<title>A & B</title>"));
    }

    #[test]
    fn test_generate__is_deterministic() {
        let rows = vec![checked("Example", "http://example.com", ProbeStatus::Ok)];
        assert_eq!(
            HtmlReport::generate("Subject", &rows),
            HtmlReport::generate("Subject", &rows)
        );
    }

    #[test]
    fn test_generate__empty_table() {
        let html = HtmlReport::generate("Subject", Vec::<&CheckedRow>::new());
        assert_eq!(html.matches("<tr>").count(), 1);
    }
}
