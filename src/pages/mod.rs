//! HTML pages for humans: the landing page and the catch-all 404.

use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
};

use crate::origin::RequestOrigin;

const ORIGIN_PLACEHOLDER: &str = "{{ORIGIN}}";

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>ESP8266 OTA Server</title>
  <style>
    body { font-family: 'Segoe UI', Tahoma, sans-serif; background: #f4f4f8; padding: 20px; }
    .container { background: white; padding: 40px; border-radius: 12px; max-width: 800px; margin: 0 auto; }
    .status { background: #e8f5e9; border-left: 4px solid #4caf50; padding: 15px; margin: 20px 0; }
    .endpoint { background: #f5f5f5; padding: 12px; margin: 8px 0; border-radius: 6px; font-family: monospace; }
    .endpoint .desc { color: #666; font-family: sans-serif; font-size: 0.9em; }
    .code-block { background: #2d2d2d; color: #f8f8f2; padding: 20px; border-radius: 8px; font-family: monospace; overflow-x: auto; }
  </style>
</head>
<body>
  <div class="container">
    <h1>ESP8266 OTA Server</h1>
    <p>Over-The-Air Firmware Update Service</p>

    <div class="status"><strong>Status:</strong> Server is running and ready to serve firmware updates.</div>

    <h2>Available Endpoints</h2>
    <div class="endpoint"><a href="/version.txt">/version.txt</a><div class="desc">Current firmware version number</div></div>
    <div class="endpoint"><a href="/firmware.bin">/firmware.bin</a><div class="desc">Firmware binary</div></div>
    <div class="endpoint"><a href="/firmware.md5">/firmware.md5</a><div class="desc">MD5 checksum for firmware verification</div></div>
    <div class="endpoint"><a href="/api/version">/api/version</a><div class="desc">JSON API with version information</div></div>
    <div class="endpoint"><a href="/health">/health</a><div class="desc">Server health check</div></div>

    <h2>Device Configuration</h2>
    <p>Use these URLs in your device sketch:</p>
    <div class="code-block">
const char* serverURL = "{{ORIGIN}}";<br>
const char* versionURL = "{{ORIGIN}}/version.txt";<br>
const char* firmwareURL = "{{ORIGIN}}/firmware.bin";
    </div>

    <h2>Publishing a Release</h2>
    <ol>
      <li>Build the new firmware</li>
      <li>Export the compiled binary as firmware.bin</li>
      <li>Generate its MD5 checksum into firmware.md5</li>
      <li>Write the new version number to version.txt</li>
      <li>Replace the files in the public directory</li>
      <li>Deploy</li>
    </ol>
  </div>
</body>
</html>
"#;

/// GET /
pub async fn index(origin: RequestOrigin) -> Html<String> {
    Html(render_index(&origin))
}

fn render_index(origin: &RequestOrigin) -> String {
    INDEX_TEMPLATE.replace(ORIGIN_PLACEHOLDER, &escape_html(&origin.base_url()))
}

/// Fallback for anything no route or static file claimed
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    (
        StatusCode::NOT_FOUND,
        Html(format!(
            "<h1>404 - Not Found</h1>\n\
             <p>The endpoint <code>{}</code> does not exist.</p>\n\
             <p><a href=\"/\">Go back to home</a></p>\n",
            escape_html(&requested)
        )),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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
