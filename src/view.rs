//!
//! Server rendered HTML pages
//!

use crate::{auth::User, dto::output, error::Error};
use time::{macros::format_description, UtcOffset};

pub fn index_page(ticket_count: i64, user: Option<&User>) -> String {
    let account = match user {
        Some(user) => format!(
            r#"<p>Logged in as <strong>{}</strong> · <a href="/logout">Log out</a></p>"#,
            escape_html(user.display_name())
        ),
        None => r#"<p><a href="/login">Log in</a> · <a href="/sign-up">Sign up</a></p>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Tickets</title>
</head>
<body>
<h1>Tickets</h1>
{account}
<p>Tickets issued so far: <strong id="ticket-count">{ticket_count}</strong></p>
<form id="ticket-form">
<label>VATIN <input name="vatin" maxlength="11" required></label>
<label>First name <input name="firstName" required></label>
<label>Last name <input name="lastName" required></label>
<button type="submit">Create ticket</button>
</form>
<p id="result"></p>
<img id="qr-code" alt="" hidden>
<script>
document.getElementById("ticket-form").addEventListener("submit", async (event) => {{
  event.preventDefault();
  const form = new FormData(event.target);
  const result = document.getElementById("result");
  const qrCode = document.getElementById("qr-code");
  const response = await fetch("/create-ticket", {{
    method: "POST",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify(Object.fromEntries(form)),
  }});
  const body = await response.json();
  if (!response.ok) {{
    result.textContent = body.error;
    qrCode.hidden = true;
    return;
  }}
  result.textContent = body.message + ": " + body.ticketUrl;
  qrCode.src = body.qrCodeImage;
  qrCode.hidden = false;
}});
</script>
</body>
</html>
"#
    )
}

pub fn ticket_page(ticket: &output::Ticket, viewer: &User) -> Result<String, Error> {
    let created_at = ticket
        .created_at
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        ))
        .map_err(|err| Error::UnexpectedError(err.into()))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Ticket {id}</title>
</head>
<body>
<h1>Ticket</h1>
<dl>
<dt>VATIN</dt><dd>{vatin}</dd>
<dt>First name</dt><dd>{first_name}</dd>
<dt>Last name</dt><dd>{last_name}</dd>
<dt>Created at</dt><dd>{created_at}</dd>
</dl>
<p>Viewing as <strong>{viewer}</strong> · <a href="/logout">Log out</a></p>
<p><a href="/">Back</a></p>
</body>
</html>
"#,
        id = ticket.id,
        vatin = escape_html(&ticket.vatin),
        first_name = escape_html(&ticket.first_name),
        last_name = escape_html(&ticket.last_name),
        viewer = escape_html(viewer.display_name()),
    ))
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            character => escaped.push(character),
        }
    }

    escaped
}
