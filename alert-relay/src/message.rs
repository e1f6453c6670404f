//! Rendering of an alert item into the chat message text.

use chrono::TimeZone;
use chrono::Utc;
use chrono_tz::Tz;
use url::Url;

use crate::alert::AlertItem;
use crate::severity::Severity;

/// Titles longer than this many characters are cut with an ellipsis suffix.
pub const TITLE_LIMIT: usize = 200;

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━";

/// Truncates a title to [`TITLE_LIMIT`] characters, never splitting a code
/// point. Shorter titles pass through unchanged.
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(TITLE_LIMIT) {
        Some((cut, _)) => format!("{}...", &title[..cut]),
        None => title.to_owned(),
    }
}

/// Human-readable project name for the message header.
///
/// Prefers the explicit `project_name` field. Item URLs look like
/// `https://rollbar.com/<account>/<project>/items/<counter>`, so the second
/// path segment is the project slug; when neither source is usable the
/// project id stands in.
pub fn display_project_name(item: &AlertItem) -> String {
    if let Some(name) = item.project_name.as_deref()
        && !name.is_empty()
    {
        return name.to_owned();
    }

    if let Some(name) = item.url.as_deref().and_then(project_from_url) {
        return name;
    }

    match item.project_id {
        Some(id) => format!("Project-{id}"),
        None => "Project-unknown".to_owned(),
    }
}

fn project_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let _account = segments.next()?;
    segments.next().map(str::to_owned)
}

/// Formats an epoch-seconds timestamp in the display timezone; `None` for
/// absent or out-of-range values.
pub fn format_epoch(epoch: Option<i64>, tz: Tz) -> Option<String> {
    let instant = Utc.timestamp_opt(epoch?, 0).single()?;
    Some(instant.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Renders the full message text sent to the chat webhook.
pub fn render_text(item: &AlertItem, severity: Severity, tz: Tz) -> String {
    let glyph = severity.glyph();
    let label = severity.label();
    let project = display_project_name(item);
    let environment = item.environment.as_deref().unwrap_or("unknown");
    let title = truncate_title(&item.title);
    let first_seen =
        format_epoch(item.first_occurrence_timestamp, tz).unwrap_or_else(|| "N/A".into());
    let last_seen =
        format_epoch(item.last_occurrence_timestamp, tz).unwrap_or_else(|| "N/A".into());
    let url = item.url.as_deref().unwrap_or("No URL provided");

    let mut text = format!(
        "{glyph} *{label} in Rollbar* {glyph}\n\
         {SEPARATOR}\n\
         *Project:* {project}\n\
         *Environment:* {environment}\n\
         *Error:* {title}\n"
    );

    if let Some(location) = item.location() {
        text.push_str(&format!("*Location:* `{location}`\n"));
    }

    text.push_str(&format!(
        "*Occurrences:* {occurrences}\n\
         *First Seen:* {first_seen}\n\
         *Last Seen:* {last_seen}\n\
         {SEPARATOR}\n\
         🔗 [View Full Error Details]({url})",
        occurrences = item.occurrence_count(),
    ));

    text
}
