//! Extraction of workload rows from the server's table markup.
//!
//! The dashboard page is a full HTML document; only the `<tbody>` element's
//! rows matter here. Cells may wrap their values in badge spans, so cell
//! text is taken with tags stripped and whitespace collapsed.

use crate::model::{SENTINEL, WorkloadRow};

use super::SourceError;

/// Extracts the `<tbody>` rows of the workload table from a full page.
///
/// Cell order: namespace, type, workload, last disruption, OOM count,
/// termination count. A `"-"` timestamp cell maps to `None`.
pub fn parse_workload_table(html: &str) -> Result<Vec<WorkloadRow>, SourceError> {
    let body = element_inner(html, "tbody")
        .ok_or_else(|| SourceError::Parse("page has no <tbody> element".to_string()))?;

    let mut rows = Vec::new();
    for tr in elements_inner(body, "tr") {
        let cells: Vec<String> = elements_inner(tr, "td")
            .map(|td| decode_entities(&strip_tags(td)))
            .collect();
        if cells.len() < 6 {
            return Err(SourceError::Parse(format!(
                "table row has {} cells, expected 6",
                cells.len()
            )));
        }

        let last_disruption = match cells[3].as_str() {
            SENTINEL | "" => None,
            ts => Some(ts.to_string()),
        };
        rows.push(WorkloadRow {
            namespace: cells[0].clone(),
            kind: cells[1].clone(),
            name: cells[2].clone(),
            last_disruption,
            oom_kills: parse_count(&cells[4])?,
            terminations: parse_count(&cells[5])?,
        });
    }
    Ok(rows)
}

fn parse_count(cell: &str) -> Result<u64, SourceError> {
    cell.parse::<u64>()
        .map_err(|_| SourceError::Parse(format!("bad count cell: {:?}", cell)))
}

/// Returns the inner markup of the first `<tag ...>...</tag>` element.
fn element_inner<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);
    let lower = html.to_ascii_lowercase();

    let start_tag = lower.find(&open)?;
    let content_start = start_tag + lower[start_tag..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find(&close)?;
    Some(&html[content_start..content_end])
}

/// Iterates the inner markup of every `<tag ...>...</tag>` element, in order.
fn elements_inner<'a>(html: &'a str, tag: &'a str) -> impl Iterator<Item = &'a str> {
    let mut rest = html;
    std::iter::from_fn(move || {
        let inner = element_inner(rest, tag)?;
        let advance = inner.as_ptr() as usize - rest.as_ptr() as usize + inner.len();
        rest = &rest[advance..];
        Some(inner)
    })
}

/// Drops tags and collapses the remaining text, like `textContent.trim()`.
fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the entities the server emits in cell text.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
    <html><body>
    <table>
      <thead><tr><th>Namespace</th></tr></thead>
      <tbody>
        <tr>
          <td>prod-a</td>
          <td>Deployment</td>
          <td>api</td>
          <td>2024-01-02 10:15:00</td>
          <td><span class="count-oom">2</span></td>
          <td><span class="count-term">0</span></td>
        </tr>
        <tr>
          <td>kube-system</td>
          <td>DaemonSet</td>
          <td>log-agent &amp; shipper</td>
          <td>-</td>
          <td><span class="count-oom">0</span></td>
          <td><span class="count-term">3</span></td>
        </tr>
      </tbody>
    </table>
    </body></html>"#;

    #[test]
    fn parses_rows_with_badges_and_entities() {
        let rows = parse_workload_table(PAGE).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].namespace, "prod-a");
        assert_eq!(rows[0].kind, "Deployment");
        assert_eq!(rows[0].name, "api");
        assert_eq!(
            rows[0].last_disruption.as_deref(),
            Some("2024-01-02 10:15:00")
        );
        assert_eq!(rows[0].oom_kills, 2);
        assert_eq!(rows[0].terminations, 0);

        assert_eq!(rows[1].name, "log-agent & shipper");
        assert_eq!(rows[1].last_disruption, None);
        assert_eq!(rows[1].terminations, 3);
    }

    #[test]
    fn empty_tbody_yields_no_rows() {
        let rows = parse_workload_table("<table><tbody>\n</tbody></table>").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_tbody_is_a_parse_error() {
        let err = parse_workload_table("<html><p>maintenance</p></html>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let err =
            parse_workload_table("<tbody><tr><td>ns</td><td>D</td></tr></tbody>").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn bad_count_is_a_parse_error() {
        let page = "<tbody><tr><td>ns</td><td>D</td><td>api</td><td>-</td><td>x</td><td>0</td></tr></tbody>";
        let err = parse_workload_table(page).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }
}
