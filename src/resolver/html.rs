//! Single-page wrapper synthesis for remote URLs

/// Escape a value for interpolation into HTML text or attribute positions.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
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

/// Prefix schemeless URLs with the default transport.
pub fn resolve_url(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Synthesize the full-viewport iframe wrapper around a remote site.
///
/// The feature-policy allowances cover the capabilities embedded web apps
/// commonly need. `primary_color` must already be validated; name and URL
/// are escaped here before interpolation.
pub fn wrapper_page(app_name: &str, resolved_url: &str, primary_color: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, viewport-fit=cover">
    <title>{title}</title>
    <style>
      body, html, iframe {{ margin: 0; padding: 0; height: 100%; width: 100%; overflow: hidden; background: {color}; }}
      iframe {{ border: none; }}
    </style>
  </head>
  <body>
    <iframe src="{url}" style="width:100%;height:100%;" allow="geolocation; microphone; camera; midi; encrypted-media;"></iframe>
  </body>
</html>
"#,
        title = escape_html(app_name),
        color = primary_color,
        url = escape_html(resolved_url),
    )
}
